//! Messages between a controller and an actor.
use lockstep_core::{Action, History};

/// Messages that actors receive.
#[derive(Clone, Debug, PartialEq)]
pub enum ActorRequest {
    /// Advance the environment by one step with the given action.
    Act(Action),

    /// Leave the actor loop.
    Shutdown,
}

/// The answer to [`ActorRequest::Act`].
///
/// The five fields keep the order `[history, reward, force_done, done, raw_reward]`.
/// `force_done` and `done` differ only when a life is lost in an environment with lives
/// (`force_done` set, episode continuing); `reward` and `raw_reward` are identical as no
/// reward shaping is applied.
#[derive(Clone, Debug, PartialEq)]
pub struct ActorResponse {
    /// Copy of the history buffer, `[history_size, H, W]`.
    pub history: History,

    /// Reward of the step.
    pub reward: f32,

    /// Flag denoting the end of a trajectory segment for the learner.
    pub force_done: bool,

    /// Flag denoting the end of the episode. The environment has been reset and
    /// `history` holds the first frame of the next episode.
    pub done: bool,

    /// Reward of the step, before any shaping.
    pub raw_reward: f32,
}

impl ActorResponse {
    /// Splits the response into `(history, reward, force_done, done, raw_reward)`.
    pub fn into_parts(self) -> (History, f32, bool, bool, f32) {
        (
            self.history,
            self.reward,
            self.force_done,
            self.done,
            self.raw_reward,
        )
    }
}
