#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Crate Siege round engine.
//!
//! This crate defines the boundary that connects the authoritative round
//! controller, the pure systems it composes, and the external collaborators
//! supplied by the host: wave portals that spawn enemies, item crates that
//! accumulate loot, and the pointer probe used for UI hit-testing. Systems
//! report outbound [`Notification`] values into caller-provided buffers;
//! hosts implement the capability traits and hand fully-formed collections
//! to the round at setup.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Crate Siege.";

/// Discrete round segment during which enemies spawn and must be defeated.
///
/// Wave numbers are one-based; [`Wave::PRE_ROUND`] (zero) denotes the state
/// before the first wave has been started.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Wave(u32);

impl Wave {
    /// Sentinel wave meaning "no wave has been started yet".
    pub const PRE_ROUND: Wave = Wave(0);

    /// Creates a new wave number wrapper.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the underlying wave number.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns the wave that follows this one.
    #[must_use]
    pub const fn next(self) -> Wave {
        Wave(self.0.saturating_add(1))
    }
}

/// Opaque identity of a caller competing for system focus priority.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ClaimantId(u32);

impl ClaimantId {
    /// Creates a new claimant identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Snapshot of the current wave's enemy attrition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyProgress {
    /// Enemies of the current wave that are out of action.
    pub defeated: u32,
    /// Total enemies the current wave spawns across all portals.
    pub total: u32,
}

/// Snapshot of aggregated item collection across all registered crates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemProgress {
    /// Items currently held across all crates.
    pub collected: u32,
    /// Combined capacity of all crates, fixed at setup.
    pub total: u32,
}

/// Outbound notifications consumed by the presentation layer.
///
/// Each variant is fired at most once per logical event; the round never
/// repeats an announcement for the same wave clear or game over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notification {
    /// Announces that the given wave is incoming and may be started.
    WaveAnnounced {
        /// Wave the external driver should start via an explicit advance.
        wave: Wave,
    },
    /// Announces that the final wave was cleared and the round ended.
    GameOver,
}

/// Fatal setup failures that prevent a round from starting.
///
/// Raised once during wiring; steady-state rejections (advancing past the
/// last wave, acquiring an occupied priority slot) are no-op indicators,
/// never errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The registry was handed an empty crate collection.
    #[error("round setup requires at least one item crate")]
    NoCrates,
    /// The coordinator was handed an empty portal collection.
    #[error("round setup requires at least one wave portal")]
    NoPortals,
    /// The configured wave count was zero.
    #[error("round setup requires at least one wave")]
    NoWaves,
}

/// Capability contract implemented by external enemy spawners.
///
/// A portal owns its spawned enemies; the round only reads aggregate
/// counts. `start_wave` is idempotent-unsafe: calling it twice for the
/// same wave restarts or duplicates spawns, so the coordinator calls it
/// exactly once per wave.
pub trait WavePortal {
    /// Begins spawning the enemy set for the provided wave.
    fn start_wave(&mut self, wave: Wave);

    /// Reports whether every enemy spawned for the active wave is out of
    /// action.
    fn is_wave_ended(&self) -> bool;

    /// Number of the active wave's enemies that are out of action.
    ///
    /// Monotonically non-decreasing within a wave; reset by `start_wave`.
    fn out_of_action_count(&self) -> u32;

    /// Fixed number of enemies this portal spawns for the provided wave.
    fn total_count_for_wave(&self, wave: Wave) -> u32;
}

/// Capability contract implemented by external item crates.
///
/// A crate reporting a fill outside `[0, capacity]` violates its contract;
/// the round passes the value through without validation.
pub trait ItemCrate {
    /// Maximum number of items the crate can hold.
    fn capacity(&self) -> u32;

    /// Number of items the crate currently holds.
    fn current_fill(&self) -> u32;
}

/// Capability contract for the external UI hit-test collaborator.
pub trait PointerProbe {
    /// Reports whether the pointer currently rests on an interactive
    /// UI surface. Invoked exactly once per tick by the round.
    fn pointer_over_ui(&self) -> bool;
}
