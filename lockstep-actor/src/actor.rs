//! Steps an environment in response to actions from a controller.
mod base;
mod config;
mod stat;
pub use base::EnvironmentActor;
pub use config::ActorConfig;
pub use stat::{actor_stats_fmt, ActorStat};
