//! Policy.
use super::Action;
use crate::Frame;

/// A policy acting on preprocessed frames.
///
/// Policy is a mapping from an observation to an action.
/// The mapping can be either of deterministic or stochastic.
pub trait Policy {
    /// Sample an action given an observation.
    fn sample(&mut self, obs: &Frame) -> Action;
}

impl<F> Policy for F
where
    F: FnMut(&Frame) -> Action,
{
    fn sample(&mut self, obs: &Frame) -> Action {
        self(obs)
    }
}
