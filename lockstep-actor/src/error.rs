//! Errors in the library.
use lockstep_core::PreprocessError;
use thiserror::Error;

/// Errors terminating an actor.
///
/// None of them is retried by the actor. When an actor stops with an error its
/// channel endpoints are dropped, which the controller observes as
/// [`ActorError::Disconnected`] on its next send or receive.
#[derive(Error, Debug)]
pub enum ActorError {
    /// An observation could not be preprocessed.
    #[error("Preprocessing failed: {0}")]
    Preprocess(#[from] PreprocessError),

    /// The environment failed in `reset()` or `step()`.
    #[error("Environment fault: {0:#}")]
    EnvironmentFault(anyhow::Error),

    /// A malformed request, e.g. an action out of the action space.
    #[error("Protocol violation: {0}")]
    ProtocolViolation(String),

    /// The actor configuration is inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The other end of a channel is gone.
    #[error("Channel disconnected")]
    Disconnected,

    /// The actor thread panicked.
    #[error("Actor thread panicked")]
    Panicked,
}
