//! Ordered rule chains
//!
//! Every decision layer of the keeper is a list of named steps evaluated in
//! order. A step either produces the cycle's decision or defers to the next
//! one; the first step that produces a decision wins.

use super::action::Decision;

/// One named step of a rule chain.
///
/// `run` receives the layer context mutably so steps that own cross-cycle
/// state (the pressing flag) can update it even when they defer.
pub struct Step<C, T> {
    pub tag: T,
    pub run: fn(&mut C) -> Option<Decision>,
}

impl<C, T: Copy> Step<C, T> {
    pub const fn new(tag: T, run: fn(&mut C) -> Option<Decision>) -> Self {
        Self { tag, run }
    }
}

/// Evaluate `steps` in order and return the first decision with its step tag
pub fn first_match<C, T: Copy + std::fmt::Debug>(
    steps: &[Step<C, T>],
    ctx: &mut C,
) -> Option<(T, Decision)> {
    for step in steps {
        if let Some(decision) = (step.run)(ctx) {
            tracing::trace!(step = ?step.tag, label = decision.label, "rule fired");
            return Some((step.tag, decision));
        }
    }
    None
}
