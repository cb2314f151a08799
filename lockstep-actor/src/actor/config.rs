//! Configuration of [`EnvironmentActor`](super::EnvironmentActor).
use crate::ActorError;
use anyhow::Result;
use lockstep_core::Interpolation;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`EnvironmentActor`](super::EnvironmentActor).
///
/// The environment itself, including its step limit, is configured separately
/// through its own [`Env::Config`](lockstep_core::Env::Config).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
#[serde(default)]
pub struct ActorConfig {
    /// Renders the environment after every step.
    pub render: bool,

    /// The number of stacked frames.
    pub history_size: usize,

    /// Height of preprocessed frames.
    pub height: usize,

    /// Width of preprocessed frames.
    pub width: usize,

    /// Resampling algorithm of the preprocessor.
    pub interpolation: Interpolation,

    /// Sets `force_done` when a life is lost, for environments with lives.
    pub life_done: bool,

    /// Enables sticky actions.
    pub sticky_action: bool,

    /// Probability of repeating the previous action.
    pub sticky_prob: f64,

    /// Seed of sticky actions, offset by the actor index. Seeded from entropy if `None`.
    pub seed: Option<u64>,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            render: false,
            history_size: 4,
            height: 7,
            width: 7,
            interpolation: Interpolation::Bilinear,
            life_done: true,
            sticky_action: true,
            sticky_prob: 0.25,
            seed: None,
        }
    }
}

impl ActorConfig {
    /// Sets the render flag.
    pub fn render(mut self, v: bool) -> Self {
        self.render = v;
        self
    }

    /// Sets the number of stacked frames.
    pub fn history_size(mut self, v: usize) -> Self {
        self.history_size = v;
        self
    }

    /// Sets the size of preprocessed frames.
    pub fn frame_size(mut self, height: usize, width: usize) -> Self {
        self.height = height;
        self.width = width;
        self
    }

    /// Sets the resampling algorithm.
    pub fn interpolation(mut self, v: Interpolation) -> Self {
        self.interpolation = v;
        self
    }

    /// Sets the life-loss flag.
    pub fn life_done(mut self, v: bool) -> Self {
        self.life_done = v;
        self
    }

    /// Enables or disables sticky actions.
    pub fn sticky_action(mut self, v: bool) -> Self {
        self.sticky_action = v;
        self
    }

    /// Sets the probability of sticky actions.
    pub fn sticky_prob(mut self, v: f64) -> Self {
        self.sticky_prob = v;
        self
    }

    /// Sets the seed of sticky actions.
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = Some(v);
        self
    }

    /// Checks the consistency of the configuration.
    pub fn validate(&self) -> Result<(), ActorError> {
        if self.history_size == 0 {
            return Err(ActorError::InvalidConfig(
                "history_size must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.sticky_prob) {
            return Err(ActorError::InvalidConfig(format!(
                "sticky_prob must be in [0, 1], got {}",
                self.sticky_prob
            )));
        }
        Ok(())
    }

    /// Constructs [`ActorConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`ActorConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_serde_actor_config() -> Result<()> {
        let config = ActorConfig::default()
            .history_size(2)
            .frame_size(84, 84)
            .interpolation(Interpolation::Nearest)
            .sticky_prob(0.1)
            .seed(42);

        let dir = TempDir::new("actor_config")?;
        let path = dir.path().join("actor_config.yaml");
        config.save(&path)?;
        let config_ = ActorConfig::load(&path)?;
        assert_eq!(config, config_);
        Ok(())
    }

    #[test]
    fn test_missing_fields_take_defaults() -> Result<()> {
        let config: ActorConfig = serde_yaml::from_str("history_size: 8\ninterpolation: nearest\n")?;
        assert_eq!(
            config,
            ActorConfig::default()
                .history_size(8)
                .interpolation(Interpolation::Nearest)
        );
        Ok(())
    }

    #[test]
    fn test_validate() {
        assert!(ActorConfig::default().validate().is_ok());
        assert!(ActorConfig::default().history_size(0).validate().is_err());
        assert!(ActorConfig::default().sticky_prob(1.5).validate().is_err());
    }
}
