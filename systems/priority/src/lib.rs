#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Single-slot focus arbitration for dialogs, cutscenes, and other
//! subsystems that need exclusive control of system-level input.

use crate_siege_core::ClaimantId;

/// Non-blocking single-slot exclusion token.
///
/// Not a queue and not a lock: a request against an occupied slot is
/// rejected immediately, and a holder that never releases blocks every
/// other claimant indefinitely. That is acceptable for a
/// one-focus-at-a-time UI gate; callers poll rather than wait. Safe only
/// under the single-threaded tick model.
#[derive(Debug, Default)]
pub struct PriorityArbiter {
    holder: Option<ClaimantId>,
}

impl PriorityArbiter {
    /// Creates an arbiter with an unclaimed slot.
    #[must_use]
    pub const fn new() -> Self {
        Self { holder: None }
    }

    /// Claims the slot for `id`.
    ///
    /// Grants when the slot is empty or already held by `id` (re-entrant
    /// for the same holder). Returns `false` and leaves the slot
    /// untouched otherwise.
    pub fn acquire(&mut self, id: ClaimantId) -> bool {
        if !self.is_available_to(id) {
            return false;
        }
        self.holder = Some(id);
        true
    }

    /// Releases the slot if `id` is the current holder.
    ///
    /// A release by any other claimant is a silent no-op, so no caller
    /// can drop someone else's claim. Releasing an already-empty slot is
    /// equally harmless, which makes release idempotent.
    pub fn release(&mut self, id: ClaimantId) {
        if self.holder == Some(id) {
            self.holder = None;
        }
    }

    /// Reports whether `id` could claim the slot right now.
    #[must_use]
    pub fn is_available_to(&self, id: ClaimantId) -> bool {
        match self.holder {
            None => true,
            Some(holder) => holder == id,
        }
    }
}
