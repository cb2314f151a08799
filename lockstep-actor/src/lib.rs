#![warn(missing_docs)]
//! Environment actors answering one action with one observation history.
//!
//! An [`EnvironmentActor`] owns a single environment and runs a loop receiving
//! [`ActorRequest`]s and sending [`ActorResponse`]s:
//!
//! 1. receive an action (the only blocking point),
//! 2. remap it for the environment and apply sticky actions,
//! 3. step the environment,
//! 4. preprocess the observation and push it into the history,
//! 5. update episode statistics; at the end of an episode log a summary line,
//!    reset the environment and re-seed the history,
//! 6. send `[history, reward, force_done, done, raw_reward]`.
//!
//! [`ActorHandle`] runs the loop on a dedicated thread and communicates through
//! [`crossbeam_channel`]s.
//!
//! ```
//! use lockstep_actor::{ActorConfig, ActorHandle};
//! use lockstep_core::dummy::{CorridorConfig, CorridorEnv};
//!
//! # fn main() -> Result<(), lockstep_actor::ActorError> {
//! let config = ActorConfig::default().sticky_prob(0.0);
//! let env_config = CorridorConfig::default().episode_len(3);
//! let actor = ActorHandle::spawn::<CorridorEnv>(0, &config, &env_config);
//!
//! let response = actor.act(2)?;
//! assert_eq!(response.history.dim(), (4, 7, 7));
//! assert!(!response.done);
//!
//! let stat = actor.shutdown()?;
//! assert_eq!(stat.env_steps, 1);
//! # Ok(())
//! # }
//! ```
mod actor;
mod error;
mod handle;
mod messages;
pub use actor::{actor_stats_fmt, ActorConfig, ActorStat, EnvironmentActor};
pub use error::ActorError;
pub use handle::ActorHandle;
pub use messages::{ActorRequest, ActorResponse};
