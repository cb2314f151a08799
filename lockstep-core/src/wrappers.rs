//! Composable environment wrappers.
//!
//! Each wrapper is itself an [`Env`](crate::Env) whose configuration embeds the
//! configuration of the wrapped environment, so wrappers can be stacked and the whole
//! stack is built from a single config, e.g.
//! `TimeLimit<MaxAndSkip<MyEnv>>` from a `TimeLimitConfig<MaxAndSkipConfig<MyConfig>>`.
mod action_offset;
mod max_and_skip;
mod time_limit;
pub use action_offset::{ActionOffset, ActionOffsetConfig};
pub use max_and_skip::{MaxAndSkip, MaxAndSkipConfig};
pub use time_limit::{TimeLimit, TimeLimitConfig};
