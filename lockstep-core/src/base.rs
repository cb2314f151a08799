//! Core functionalities.
mod env;
mod obs;
mod policy;
mod step;
pub use env::Env;
pub use obs::RawObs;
pub use policy::Policy;
pub use step::{Info, Step};

/// Index into the discrete action space of an environment.
pub type Action = usize;
