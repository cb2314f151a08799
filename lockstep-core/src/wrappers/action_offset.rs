use crate::{Action, Env, RawObs, Step};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Configuration of [`ActionOffset`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionOffsetConfig<C> {
    /// Configuration of the wrapped environment.
    pub env: C,

    /// The number of leading actions hidden from the controller.
    pub offset: usize,
}

/// Hides the first `offset` actions of an environment.
///
/// Useful for games whose action 0 is a no-op the agent should not use:
/// the controller requests actions in `0..n - offset` and `a` is executed as `a + offset`.
pub struct ActionOffset<E: Env> {
    env: E,
    offset: usize,
}

impl<E: Env> ActionOffset<E> {
    /// Wraps an environment.
    pub fn new(env: E, offset: usize) -> Self {
        Self { env, offset }
    }
}

impl<E: Env> Env for ActionOffset<E> {
    type Config = ActionOffsetConfig<E::Config>;
    type Info = E::Info;

    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        Ok(Self::new(E::build(&config.env, seed)?, config.offset))
    }

    fn reset(&mut self) -> Result<RawObs> {
        self.env.reset()
    }

    fn step(&mut self, act: Action) -> Result<Step<Self::Info>> {
        self.env.step(act)
    }

    fn n_actions(&self) -> usize {
        self.env.n_actions().saturating_sub(self.offset)
    }

    fn map_action(&self, act: Action) -> Action {
        self.env.map_action(act + self.offset)
    }

    fn lives(&self) -> Option<usize> {
        self.env.lives()
    }

    fn render(&mut self) -> Result<()> {
        self.env.render()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dummy::{CorridorConfig, CorridorEnv};

    #[test]
    fn test_offset() -> Result<()> {
        let config = ActionOffsetConfig {
            env: CorridorConfig::default().n_actions(4),
            offset: 1,
        };
        let env = ActionOffset::<CorridorEnv>::build(&config, 0)?;
        assert_eq!(env.n_actions(), 3);
        assert_eq!(env.map_action(0), 1);
        assert_eq!(env.map_action(2), 3);
        Ok(())
    }
}
