#![warn(missing_docs)]
//! Environment contract and observation pipeline for lock-step actors.
//!
//! The pieces in this crate are combined by `lockstep-actor` into a worker that
//! answers every action with a fixed-shape history of preprocessed frames:
//!
//! * [`Env`] - the contract an environment collaborator has to satisfy,
//!   together with composable [`wrappers`].
//! * [`FramePreprocessor`] - converts a [`RawObs`] into a single-channel [`Frame`].
//! * [`HistoryBuffer`] - keeps the most recent frames.
//! * [`StickyAction`] - repeats the previously executed action with a fixed probability.
//! * [`EpisodeTracker`] - per-episode return and recent-return statistics.
pub mod dummy;
pub mod error;
pub mod util;
pub mod wrappers;

mod base;
pub use base::{Action, Env, Info, Policy, RawObs, Step};

mod episode;
pub use episode::{EpisodeSummary, EpisodeTracker, RecentReturns, RECENT_RETURNS_CAPACITY};

mod history;
pub use history::{History, HistoryBuffer};

mod preprocess;
pub use preprocess::{Frame, FramePreprocessor, GrayscaleResize, Interpolation};

mod sticky;
pub use sticky::{sticky_action, StickyAction};

pub use error::PreprocessError;
