//! Environment.
use super::{Action, Info, RawObs, Step};
use anyhow::Result;

/// Represents an environment with a discrete action space and image-like observations.
///
/// This is the contract an environment collaborator (a grid-world, an emulator, ...)
/// has to satisfy to be driven by an actor. Errors returned from [`Env::reset`] and
/// [`Env::step`] are treated as fatal by the actor: the environment is assumed to be
/// in an undefined state afterwards.
pub trait Env {
    /// Configurations.
    type Config: Clone;

    /// Information in the [`Step`] object.
    type Info: Info;

    /// Builds an environment with a given random seed.
    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized;

    /// Re-initializes the environment to a fresh episode and returns the first observation.
    fn reset(&mut self) -> Result<RawObs>;

    /// Performes an environment step.
    fn step(&mut self, act: Action) -> Result<Step<Self::Info>>;

    /// The number of actions a controller may request, i.e. requests are in `0..n_actions()`.
    fn n_actions(&self) -> usize;

    /// Maps an action requested by a controller to the action of the underlying game.
    ///
    /// The mapping is applied before sticky actions, so the action remembered as
    /// the last one is always in the space of the underlying game.
    /// The default implementation is the identity.
    fn map_action(&self, act: Action) -> Action {
        act
    }

    /// Remaining lives, for environments having such a notion.
    fn lives(&self) -> Option<usize> {
        None
    }

    /// Renders the current state. Does nothing in the default implementation.
    fn render(&mut self) -> Result<()> {
        Ok(())
    }
}
