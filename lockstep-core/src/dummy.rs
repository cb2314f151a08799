//! This module is used for tests.
//!
//! [`CorridorEnv`] is a deterministic stand-in for a grid-world. Its observations are
//! uniformly gray RGB images whose intensity encodes the step within the episode and
//! the executed action (see [`CorridorEnv::intensity`]), and frames right after a
//! reset have intensities that never occur during an episode (see
//! [`CorridorEnv::reset_intensity`]). Every episode lasts a fixed number of steps
//! and pays a reward of 1 on its last step.
use crate::{Action, Env, RawObs, Step};
use anyhow::{bail, Result};
use ndarray::{Array2, Array3};
use serde::{Deserialize, Serialize};

/// Configuration of [`CorridorEnv`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CorridorConfig {
    /// The number of steps until the episode terminates.
    pub episode_len: usize,

    /// The number of actions.
    pub n_actions: usize,

    /// Height of observations.
    pub height: usize,

    /// Width of observations.
    pub width: usize,

    /// If true, observations are `(image, mission)` tuples.
    pub tuple_obs: bool,

    /// Lives at the start of an episode, `None` for an environment without lives.
    pub lives: Option<usize>,

    /// A life is lost every this many steps.
    pub lose_life_every: Option<usize>,

    /// The step (counted over the lifetime of the environment) on which `step()` fails.
    pub fail_at_step: Option<usize>,

    /// If true, `render()` fails.
    #[serde(default)]
    pub fail_render: bool,
}

impl Default for CorridorConfig {
    fn default() -> Self {
        Self {
            episode_len: 4,
            n_actions: 7,
            height: 7,
            width: 7,
            tuple_obs: false,
            lives: None,
            lose_life_every: None,
            fail_at_step: None,
            fail_render: false,
        }
    }
}

impl CorridorConfig {
    /// Sets the length of episodes.
    pub fn episode_len(mut self, v: usize) -> Self {
        self.episode_len = v;
        self
    }

    /// Sets the number of actions.
    pub fn n_actions(mut self, v: usize) -> Self {
        self.n_actions = v;
        self
    }

    /// Sets the size of observations.
    pub fn size(mut self, height: usize, width: usize) -> Self {
        self.height = height;
        self.width = width;
        self
    }

    /// Wraps observations in tuples.
    pub fn tuple_obs(mut self, v: bool) -> Self {
        self.tuple_obs = v;
        self
    }

    /// Gives the agent `lives` lives, one of which is lost every `every` steps.
    ///
    /// `every` must be positive, otherwise [`CorridorEnv::build`] fails.
    pub fn lives(mut self, lives: usize, every: usize) -> Self {
        self.lives = Some(lives);
        self.lose_life_every = Some(every);
        self
    }

    /// Makes the `n`-th call of `step()` fail.
    pub fn fail_at_step(mut self, n: usize) -> Self {
        self.fail_at_step = Some(n);
        self
    }

    /// Makes `render()` fail.
    pub fn fail_render(mut self, v: bool) -> Self {
        self.fail_render = v;
        self
    }
}

/// A deterministic environment for tests.
pub struct CorridorEnv {
    config: CorridorConfig,
    t: usize,
    total_steps: usize,
    resets: usize,
    renders: usize,
    lives: Option<usize>,
    actions: Vec<Action>,
}

impl CorridorEnv {
    /// Intensity of the observation after step `t` of an episode with action `act`.
    pub fn intensity(t: usize, act: Action) -> u8 {
        ((t * 16 + act % 16) % 192) as u8
    }

    /// Intensity of the observation returned by the `n`-th reset.
    pub fn reset_intensity(n: usize) -> u8 {
        (255 - n % 32) as u8
    }

    /// Actions executed so far, over all episodes.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// The number of resets so far.
    pub fn resets(&self) -> usize {
        self.resets
    }

    /// The number of successful calls of `render()` so far.
    pub fn renders(&self) -> usize {
        self.renders
    }

    fn obs(&self, v: u8) -> RawObs {
        let img = Array3::<u8>::from_elem((self.config.height, self.config.width, 3), v);
        if self.config.tuple_obs {
            RawObs::Tuple(vec![img.into(), Array2::<u8>::zeros((1, 1)).into()])
        } else {
            img.into()
        }
    }
}

impl Env for CorridorEnv {
    type Config = CorridorConfig;
    type Info = ();

    fn build(config: &Self::Config, _seed: i64) -> Result<Self> {
        if config.lose_life_every == Some(0) {
            bail!("lose_life_every must be positive");
        }
        Ok(Self {
            config: config.clone(),
            t: 0,
            total_steps: 0,
            resets: 0,
            renders: 0,
            lives: config.lives,
            actions: vec![],
        })
    }

    fn reset(&mut self) -> Result<RawObs> {
        self.resets += 1;
        self.t = 0;
        self.lives = self.config.lives;
        Ok(self.obs(Self::reset_intensity(self.resets)))
    }

    fn step(&mut self, act: Action) -> Result<Step<()>> {
        if act >= self.config.n_actions {
            bail!("Invalid action: {}", act);
        }
        self.total_steps += 1;
        if self.config.fail_at_step == Some(self.total_steps) {
            bail!("Simulated failure at step {}", self.total_steps);
        }

        self.t += 1;
        self.actions.push(act);

        if let (Some(lives), Some(every)) = (self.lives.as_mut(), self.config.lose_life_every) {
            if self.t % every == 0 && *lives > 0 {
                *lives -= 1;
            }
        }

        let is_terminated = self.t >= self.config.episode_len;
        let reward = if is_terminated { 1.0 } else { 0.0 };
        let obs = self.obs(Self::intensity(self.t, act));

        Ok(Step::new(obs, reward, is_terminated, false, ()))
    }

    fn n_actions(&self) -> usize {
        self.config.n_actions
    }

    fn lives(&self) -> Option<usize> {
        self.lives
    }

    fn render(&mut self) -> Result<()> {
        if self.config.fail_render {
            bail!("Simulated render failure after step {}", self.total_steps);
        }
        self.renders += 1;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_zero_life_interval_is_rejected() {
        let config = CorridorConfig::default().lives(3, 0);
        assert!(CorridorEnv::build(&config, 0).is_err());
    }

    #[test]
    fn test_lives_and_render() -> Result<()> {
        let config = CorridorConfig::default().episode_len(10).lives(2, 3);
        let mut env = CorridorEnv::build(&config, 0)?;
        env.reset()?;
        let mut lives = vec![];
        for _ in 0..4 {
            env.step(0)?;
            lives.push(env.lives());
        }
        assert_eq!(lives, vec![Some(2), Some(2), Some(1), Some(1)]);

        env.render()?;
        assert_eq!(env.renders(), 1);

        let mut env = CorridorEnv::build(&config.fail_render(true), 0)?;
        assert!(env.render().is_err());
        assert_eq!(env.renders(), 0);
        Ok(())
    }
}
