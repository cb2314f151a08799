//! Sticky actions.
use crate::Action;

/// Decides the action to execute given a random `draw` in `[0, 1)`.
///
/// When enabled, the previous action is repeated if `draw <= p` (and `p > 0`),
/// otherwise the requested one is executed. Returns `(effective, new_last)`, where
/// `new_last` is always the executed action.
pub fn sticky_action(
    requested: Action,
    last: Action,
    enabled: bool,
    p: f64,
    draw: f64,
) -> (Action, Action) {
    let effective = if enabled && p > 0.0 && draw <= p {
        last
    } else {
        requested
    };
    (effective, effective)
}

/// Repeats the previously executed action with probability `p`.
///
/// Injects temporally correlated noise independent of the agent's policy.
/// The remembered action starts at 0 and is set back to 0 by [`StickyAction::reset`].
pub struct StickyAction {
    enabled: bool,
    p: f64,
    last_action: Action,
    rng: fastrand::Rng,
}

impl StickyAction {
    /// Creates a sticky action policy seeded from entropy.
    pub fn new(enabled: bool, p: f64) -> Self {
        Self::with_rng(enabled, p, fastrand::Rng::new())
    }

    /// Creates a sticky action policy with a fixed seed.
    pub fn with_seed(enabled: bool, p: f64, seed: u64) -> Self {
        Self::with_rng(enabled, p, fastrand::Rng::with_seed(seed))
    }

    fn with_rng(enabled: bool, p: f64, rng: fastrand::Rng) -> Self {
        Self {
            enabled,
            p,
            last_action: 0,
            rng,
        }
    }

    /// Returns the action to execute for a requested one, remembering it.
    pub fn apply(&mut self, requested: Action) -> Action {
        let draw = if self.enabled { self.rng.f64() } else { 1.0 };
        let (effective, last) = sticky_action(requested, self.last_action, self.enabled, self.p, draw);
        self.last_action = last;
        effective
    }

    /// The last executed action.
    pub fn last_action(&self) -> Action {
        self.last_action
    }

    /// Forgets the last action, called at the start of every episode.
    pub fn reset(&mut self) {
        self.last_action = 0;
    }
}
