#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave progression state machine over the arena's spawn portals.

use crate_siege_core::{
    ConfigurationError, EnemyProgress, Notification, Wave, WavePortal,
};

/// Drives wave progression across the round's spawn portals.
///
/// The coordinator owns the portal handles and the current wave number.
/// `refresh` aggregates per-portal completion each tick; `advance` is the
/// explicit transition that starts the next wave. The two are deliberately
/// separate calls: a cleared wave stages an announcement, and an external
/// driver decides when the next wave actually begins (typically after a
/// display delay). The coordinator never advances on its own.
pub struct WaveCoordinator {
    portals: Vec<Box<dyn WavePortal>>,
    total_waves: u32,
    current_wave: Wave,
    defeated: u32,
    total: u32,
    ready_to_advance: bool,
    next_wave_announced: bool,
    round_complete: bool,
}

impl WaveCoordinator {
    /// Creates a coordinator over the provided portals.
    ///
    /// Fails with [`ConfigurationError::NoPortals`] on an empty portal
    /// collection (zero portals would make "all portals ended" vacuously
    /// true, which is a wiring mistake rather than a cleared wave) and
    /// with [`ConfigurationError::NoWaves`] when `total_waves` is zero.
    pub fn new(
        portals: Vec<Box<dyn WavePortal>>,
        total_waves: u32,
    ) -> Result<Self, ConfigurationError> {
        if portals.is_empty() {
            return Err(ConfigurationError::NoPortals);
        }
        if total_waves < 1 {
            return Err(ConfigurationError::NoWaves);
        }

        Ok(Self {
            portals,
            total_waves,
            current_wave: Wave::PRE_ROUND,
            defeated: 0,
            total: 0,
            ready_to_advance: false,
            next_wave_announced: false,
            round_complete: false,
        })
    }

    /// Starts the next wave on every portal in registration order.
    ///
    /// Returns `false` without touching any state when the round is
    /// complete or the next wave would exceed the configured count; both
    /// are expected no-ops, not errors. On success the per-wave counters
    /// are reset, every portal receives exactly one `start_wave` call,
    /// and the staged announcement is cleared.
    pub fn advance(&mut self) -> bool {
        if self.round_complete {
            return false;
        }
        let next = self.current_wave.next();
        if next.get() > self.total_waves {
            return false;
        }

        self.current_wave = next;
        self.defeated = 0;
        self.total = self
            .portals
            .iter()
            .map(|portal| portal.total_count_for_wave(next))
            .sum();
        for portal in &mut self.portals {
            portal.start_wave(next);
        }
        self.ready_to_advance = false;
        self.next_wave_announced = false;
        true
    }

    /// Re-aggregates portal state for the current tick.
    ///
    /// No-op before the first wave and once the round is complete.
    /// Otherwise the defeated count is resummed from every portal and
    /// wave completion is the logical AND of per-portal completion. A
    /// cleared non-final wave stages [`WaveCoordinator::is_ready_to_advance`]
    /// and emits [`Notification::WaveAnnounced`] for the following wave
    /// exactly once; a cleared final wave marks the round complete.
    pub fn refresh(&mut self, out: &mut Vec<Notification>) {
        if self.current_wave == Wave::PRE_ROUND || self.round_complete {
            return;
        }

        let mut defeated = 0;
        let mut all_ended = true;
        for portal in &self.portals {
            defeated += portal.out_of_action_count();
            if !portal.is_wave_ended() {
                all_ended = false;
            }
        }
        self.defeated = defeated;

        if !all_ended {
            return;
        }

        if self.current_wave.get() < self.total_waves {
            self.ready_to_advance = true;
            if !self.next_wave_announced {
                self.next_wave_announced = true;
                out.push(Notification::WaveAnnounced {
                    wave: self.current_wave.next(),
                });
            }
        } else {
            self.round_complete = true;
        }
    }

    /// Wave currently in progress; [`Wave::PRE_ROUND`] before the first
    /// advance.
    #[must_use]
    pub const fn current_wave(&self) -> Wave {
        self.current_wave
    }

    /// Number of waves the round runs in total.
    #[must_use]
    pub const fn total_waves(&self) -> u32 {
        self.total_waves
    }

    /// Defeated/total snapshot for the wave in progress.
    #[must_use]
    pub const fn enemy_progress(&self) -> EnemyProgress {
        EnemyProgress {
            defeated: self.defeated,
            total: self.total,
        }
    }

    /// Reports whether a cleared wave is waiting on an explicit advance.
    #[must_use]
    pub const fn is_ready_to_advance(&self) -> bool {
        self.ready_to_advance
    }

    /// Reports whether the final wave has been cleared. Terminal and
    /// sticky: once set, `advance` and `refresh` become no-ops.
    #[must_use]
    pub const fn is_round_complete(&self) -> bool {
        self.round_complete
    }
}

#[cfg(test)]
mod tests {
    use super::WaveCoordinator;
    use crate_siege_core::{ConfigurationError, Wave, WavePortal};

    struct InertPortal;

    impl WavePortal for InertPortal {
        fn start_wave(&mut self, _wave: Wave) {}

        fn is_wave_ended(&self) -> bool {
            false
        }

        fn out_of_action_count(&self) -> u32 {
            0
        }

        fn total_count_for_wave(&self, _wave: Wave) -> u32 {
            0
        }
    }

    #[test]
    fn empty_portal_list_is_a_configuration_error() {
        let result = WaveCoordinator::new(Vec::new(), 2);
        assert!(matches!(result, Err(ConfigurationError::NoPortals)));
    }

    #[test]
    fn zero_waves_is_a_configuration_error() {
        let portals: Vec<Box<dyn WavePortal>> = vec![Box::new(InertPortal)];
        let result = WaveCoordinator::new(portals, 0);
        assert!(matches!(result, Err(ConfigurationError::NoWaves)));
    }

    #[test]
    fn refresh_is_a_no_op_before_the_first_wave() {
        let portals: Vec<Box<dyn WavePortal>> = vec![Box::new(InertPortal)];
        let mut coordinator = WaveCoordinator::new(portals, 2).expect("coordinator");

        let mut out = Vec::new();
        coordinator.refresh(&mut out);

        assert!(out.is_empty());
        assert_eq!(coordinator.current_wave(), Wave::PRE_ROUND);
        assert!(!coordinator.is_ready_to_advance());
        assert!(!coordinator.is_round_complete());
    }

    #[test]
    fn advance_past_the_last_wave_is_a_silent_no_op() {
        let portals: Vec<Box<dyn WavePortal>> = vec![Box::new(InertPortal)];
        let mut coordinator = WaveCoordinator::new(portals, 1).expect("coordinator");

        assert!(coordinator.advance());
        assert_eq!(coordinator.current_wave(), Wave::new(1));

        assert!(!coordinator.advance());
        assert_eq!(coordinator.current_wave(), Wave::new(1));
    }
}
