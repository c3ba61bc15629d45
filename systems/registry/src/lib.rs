#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Registry that aggregates item counts across the arena's loot crates.

use crate_siege_core::{ConfigurationError, ItemCrate, ItemProgress};

/// Owns the round's fixed set of item crates and aggregates their totals.
///
/// Capacity is summed once at setup; the live fill is resummed from every
/// crate on each query. The resummation is deliberate: it is idempotent
/// and self-corrects any transient miscount caused by a missed external
/// collection update, at the cost of a walk over a small fixed collection.
pub struct CrateRegistry {
    crates: Vec<Box<dyn ItemCrate>>,
    total_capacity: u32,
}

impl CrateRegistry {
    /// Creates a registry over the provided crates.
    ///
    /// Fails with [`ConfigurationError::NoCrates`] if the collection is
    /// empty; a round without loot crates cannot start.
    pub fn new(crates: Vec<Box<dyn ItemCrate>>) -> Result<Self, ConfigurationError> {
        if crates.is_empty() {
            return Err(ConfigurationError::NoCrates);
        }

        let total_capacity = crates.iter().map(|item| item.capacity()).sum();
        Ok(Self {
            crates,
            total_capacity,
        })
    }

    /// Combined capacity of every registered crate, fixed at setup.
    #[must_use]
    pub const fn total_capacity(&self) -> u32 {
        self.total_capacity
    }

    /// Combined live fill of every registered crate.
    ///
    /// Full resummation on every call, never an incremental counter.
    #[must_use]
    pub fn current_fill(&self) -> u32 {
        self.crates.iter().map(|item| item.current_fill()).sum()
    }

    /// Captures the collected/total item snapshot for the current tick.
    #[must_use]
    pub fn progress(&self) -> ItemProgress {
        ItemProgress {
            collected: self.current_fill(),
            total: self.total_capacity,
        }
    }
}
