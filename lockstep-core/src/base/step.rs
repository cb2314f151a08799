//! Environment step.
use super::RawObs;

/// Additional information to the observation and the reward.
pub trait Info {}

impl Info for () {}

/// Result of a single environment step `(o_t+1, r_t, terminated, truncated, info)`.
#[derive(Clone, Debug)]
pub struct Step<I: Info> {
    /// Observation.
    pub obs: RawObs,

    /// Reward.
    pub reward: f32,

    /// Flag denoting if episode is terminated, e.g. the task was solved.
    pub is_terminated: bool,

    /// Flag denoting if episode is truncated by a step limit.
    pub is_truncated: bool,

    /// Information defined by the environment.
    pub info: I,
}

impl<I: Info> Step<I> {
    /// Constructs a [`Step`] object.
    pub fn new(obs: RawObs, reward: f32, is_terminated: bool, is_truncated: bool, info: I) -> Self {
        Step {
            obs,
            reward,
            is_terminated,
            is_truncated,
            info,
        }
    }

    #[inline]
    /// Terminated or truncated.
    pub fn is_done(&self) -> bool {
        self.is_terminated || self.is_truncated
    }
}
