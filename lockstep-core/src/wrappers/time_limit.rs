use crate::{Action, Env, RawObs, Step};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Configuration of [`TimeLimit`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeLimitConfig<C> {
    /// Configuration of the wrapped environment.
    pub env: C,

    /// The maximum number of steps in an episode.
    pub max_steps: usize,
}

/// Truncates episodes after a fixed number of steps.
pub struct TimeLimit<E: Env> {
    env: E,
    max_steps: usize,
    steps: usize,
}

impl<E: Env> TimeLimit<E> {
    /// Wraps an environment.
    pub fn new(env: E, max_steps: usize) -> Self {
        Self {
            env,
            max_steps,
            steps: 0,
        }
    }

    /// The wrapped environment.
    pub fn inner(&self) -> &E {
        &self.env
    }

    /// The number of steps taken in the current episode.
    pub fn elapsed_steps(&self) -> usize {
        self.steps
    }
}

impl<E: Env> Env for TimeLimit<E> {
    type Config = TimeLimitConfig<E::Config>;
    type Info = E::Info;

    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        Ok(Self::new(E::build(&config.env, seed)?, config.max_steps))
    }

    fn reset(&mut self) -> Result<RawObs> {
        self.steps = 0;
        self.env.reset()
    }

    fn step(&mut self, act: Action) -> Result<Step<Self::Info>> {
        let mut step = self.env.step(act)?;
        self.steps += 1;
        if !step.is_done() && self.steps >= self.max_steps {
            step.is_truncated = true;
        }
        Ok(step)
    }

    fn n_actions(&self) -> usize {
        self.env.n_actions()
    }

    fn map_action(&self, act: Action) -> Action {
        self.env.map_action(act)
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
    use crate::dummy::{CorridorEnv, CorridorConfig};

    #[test]
    fn test_truncates_at_limit() -> Result<()> {
        let config = TimeLimitConfig {
            env: CorridorConfig::default().episode_len(100),
            max_steps: 3,
        };
        let mut env = TimeLimit::<CorridorEnv>::build(&config, 0)?;
        env.reset()?;
        assert!(!env.step(1)?.is_done());
        assert!(!env.step(1)?.is_done());
        let step = env.step(1)?;
        assert!(step.is_truncated);
        assert!(!step.is_terminated);

        env.reset()?;
        assert_eq!(env.elapsed_steps(), 0);
        assert!(!env.step(1)?.is_done());
        Ok(())
    }

    #[test]
    fn test_termination_wins_over_truncation() -> Result<()> {
        let config = TimeLimitConfig {
            env: CorridorConfig::default().episode_len(2),
            max_steps: 2,
        };
        let mut env = TimeLimit::<CorridorEnv>::build(&config, 0)?;
        env.reset()?;
        env.step(0)?;
        let step = env.step(0)?;
        assert!(step.is_terminated);
        assert!(!step.is_truncated);
        Ok(())
    }
}
