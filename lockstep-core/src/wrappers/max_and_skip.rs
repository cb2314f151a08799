use crate::{Action, Env, RawObs, Step};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Configuration of [`MaxAndSkip`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaxAndSkipConfig<C> {
    /// Configuration of the wrapped environment.
    pub env: C,

    /// The number of times an action is repeated.
    pub skip: usize,
}

/// Repeats every action `skip` times and max-pools the last two frames.
///
/// Rewards of the repeated steps are summed. Repetition stops at the end of an
/// episode, in which case the last observation is returned as is.
pub struct MaxAndSkip<E: Env> {
    env: E,
    skip: usize,
}

impl<E: Env> MaxAndSkip<E> {
    /// Wraps an environment.
    pub fn new(env: E, skip: usize) -> Result<Self> {
        if skip == 0 {
            bail!("skip must be positive");
        }
        Ok(Self { env, skip })
    }
}

impl<E: Env> Env for MaxAndSkip<E> {
    type Config = MaxAndSkipConfig<E::Config>;
    type Info = E::Info;

    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        Self::new(E::build(&config.env, seed)?, config.skip)
    }

    fn reset(&mut self) -> Result<RawObs> {
        self.env.reset()
    }

    fn step(&mut self, act: Action) -> Result<Step<Self::Info>> {
        let mut total_reward = 0f32;
        let mut second_last = None;
        let mut last = None;

        for i in 0..self.skip {
            let step = self.env.step(act)?;
            total_reward += step.reward;
            let done = step.is_done();
            if self.skip >= 2 && i == self.skip - 2 {
                second_last = Some(step.obs.image()?.clone());
            }
            last = Some((i, step));
            if done {
                break;
            }
        }

        let (i, mut step) = match last {
            Some(last) => last,
            None => bail!("no step was taken"),
        };

        // Max pooling
        if let (true, Some(prev)) = (i + 1 == self.skip, second_last) {
            let img = step.obs.image()?;
            if img.shape() != prev.shape() {
                bail!(
                    "Frames of shape {:?} and {:?} cannot be pooled",
                    prev.shape(),
                    img.shape()
                );
            }
            let mut pooled = img.clone();
            pooled.zip_mut_with(&prev, |a, &b| *a = (*a).max(b));
            step.obs = step.obs.with_image(pooled);
        }
        step.reward = total_reward;

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
