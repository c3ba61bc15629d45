#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative round state for Crate Siege.
//!
//! The [`RoundController`] composes the crate registry, the wave
//! coordinator, and the priority arbiter behind a single per-tick entry
//! point. The host constructs it once from fully-formed collections and
//! passes it by reference to any collaborator that needs it; there is no
//! global lookup. Presentation reads state through [`query`] and reacts
//! to the [`Notification`] values drained from each tick.

use crate_siege_core::{
    ClaimantId, ConfigurationError, ItemCrate, ItemProgress, Notification,
    PointerProbe, Wave, WavePortal,
};
use crate_siege_system_priority::PriorityArbiter;
use crate_siege_system_registry::CrateRegistry;
use crate_siege_system_waves::WaveCoordinator;

/// Collections and collaborators supplied by external wiring, once,
/// before the first tick.
pub struct RoundSetup {
    /// Item crates populated by the external asset setup step.
    pub crates: Vec<Box<dyn ItemCrate>>,
    /// Spawn portals populated by the external asset setup step.
    pub portals: Vec<Box<dyn WavePortal>>,
    /// Number of waves the round runs; must be at least one.
    pub total_waves: u32,
    /// External UI hit-test collaborator, polled once per tick.
    pub pointer_probe: Box<dyn PointerProbe>,
}

/// Top-level round driver, polled once per simulation tick.
///
/// Getters expose snapshot reads of the latest tick's computed values and
/// never recompute on demand. All state runs on one logical simulation
/// thread; no locking is performed here.
pub struct RoundController {
    registry: CrateRegistry,
    coordinator: WaveCoordinator,
    arbiter: PriorityArbiter,
    pointer_probe: Box<dyn PointerProbe>,
    item_progress: ItemProgress,
    pointer_over_ui: bool,
    first_wave_announced: bool,
    game_over: bool,
    game_over_announced: bool,
}

impl RoundController {
    /// Wires a round from the provided setup.
    ///
    /// Fails with a [`ConfigurationError`] when either collection is
    /// empty or the wave count is zero; a misconfigured round never
    /// starts.
    pub fn new(setup: RoundSetup) -> Result<Self, ConfigurationError> {
        let registry = CrateRegistry::new(setup.crates)?;
        let coordinator = WaveCoordinator::new(setup.portals, setup.total_waves)?;
        let item_progress = registry.progress();

        Ok(Self {
            registry,
            coordinator,
            arbiter: PriorityArbiter::new(),
            pointer_probe: setup.pointer_probe,
            item_progress,
            pointer_over_ui: false,
            first_wave_announced: false,
            game_over: false,
            game_over_announced: false,
        })
    }

    /// Advances the round by one simulation tick.
    ///
    /// Fixed order, because game-over evaluation depends on wave and
    /// crate state computed this same tick: wave refresh, crate
    /// resummation, pointer probe, game-over evaluation, then the
    /// one-time game-over announcement. Notifications are pushed into
    /// `out` for the presentation layer to drain.
    pub fn tick(&mut self, out: &mut Vec<Notification>) {
        if !self.first_wave_announced
            && self.coordinator.current_wave() == Wave::PRE_ROUND
        {
            // The round opens with a staged announcement; the external
            // driver decides when wave one actually starts.
            self.first_wave_announced = true;
            out.push(Notification::WaveAnnounced { wave: Wave::new(1) });
        }

        self.coordinator.refresh(out);
        self.item_progress = self.registry.progress();
        self.pointer_over_ui = self.pointer_probe.pointer_over_ui();

        if self.coordinator.is_round_complete() {
            self.game_over = true;
        }

        if self.game_over && !self.game_over_announced {
            self.game_over_announced = true;
            out.push(Notification::GameOver);
        }
    }

    /// Starts the next wave on every portal.
    ///
    /// The external driver calls this after reacting to a
    /// [`Notification::WaveAnnounced`], typically once a display delay
    /// has elapsed. Returns `false` as a silent no-op when no further
    /// wave exists.
    pub fn advance_wave(&mut self) -> bool {
        self.coordinator.advance()
    }

    /// Claims the system focus slot for `id`; re-entrant for the holder.
    pub fn gain_priority(&mut self, id: ClaimantId) -> bool {
        self.arbiter.acquire(id)
    }

    /// Releases the focus slot if `id` holds it; otherwise a no-op.
    pub fn release_priority(&mut self, id: ClaimantId) {
        self.arbiter.release(id);
    }

    /// Reports whether `id` could claim the focus slot right now.
    #[must_use]
    pub fn is_priority_available(&self, id: ClaimantId) -> bool {
        self.arbiter.is_available_to(id)
    }
}

/// Query functions that provide read-only access to the round state.
pub mod query {
    use super::RoundController;
    use crate_siege_core::{EnemyProgress, ItemProgress, Wave};

    /// Wave currently in progress; [`Wave::PRE_ROUND`] before the first
    /// advance.
    #[must_use]
    pub fn wave(round: &RoundController) -> Wave {
        round.coordinator.current_wave()
    }

    /// Defeated/total enemy snapshot for the current wave.
    #[must_use]
    pub fn enemy_progress(round: &RoundController) -> EnemyProgress {
        round.coordinator.enemy_progress()
    }

    /// Collected/total item snapshot captured by the latest tick.
    #[must_use]
    pub fn item_progress(round: &RoundController) -> ItemProgress {
        round.item_progress
    }

    /// Reports whether a cleared wave is waiting on an explicit advance.
    #[must_use]
    pub fn is_ready_to_advance(round: &RoundController) -> bool {
        round.coordinator.is_ready_to_advance()
    }

    /// Reports whether the round has ended. Monotonic: never reverts to
    /// `false` within a round's lifetime.
    #[must_use]
    pub fn is_game_over(round: &RoundController) -> bool {
        round.game_over
    }

    /// Cached result of the latest tick's pointer hit-test poll.
    #[must_use]
    pub fn is_pointer_over_ui(round: &RoundController) -> bool {
        round.pointer_over_ui
    }
}
