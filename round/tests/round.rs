use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate_siege_core::{
    ClaimantId, ConfigurationError, ItemCrate, Notification, PointerProbe, Wave,
    WavePortal,
};
use crate_siege_round::{query, RoundController, RoundSetup};

#[derive(Default)]
struct PortalState {
    out_of_action: u32,
    wave_total: u32,
}

struct ScriptedPortal {
    totals: Vec<u32>,
    state: Rc<RefCell<PortalState>>,
}

impl ScriptedPortal {
    fn new(totals: Vec<u32>) -> (Self, Rc<RefCell<PortalState>>) {
        let state = Rc::new(RefCell::new(PortalState::default()));
        (
            Self {
                totals,
                state: Rc::clone(&state),
            },
            state,
        )
    }
}

impl WavePortal for ScriptedPortal {
    fn start_wave(&mut self, wave: Wave) {
        let mut state = self.state.borrow_mut();
        state.out_of_action = 0;
        state.wave_total = self.totals[(wave.get() - 1) as usize];
    }

    fn is_wave_ended(&self) -> bool {
        let state = self.state.borrow();
        state.out_of_action >= state.wave_total
    }

    fn out_of_action_count(&self) -> u32 {
        self.state.borrow().out_of_action
    }

    fn total_count_for_wave(&self, wave: Wave) -> u32 {
        self.totals[(wave.get() - 1) as usize]
    }
}

struct SharedCrate {
    capacity: u32,
    fill: Rc<Cell<u32>>,
}

impl ItemCrate for SharedCrate {
    fn capacity(&self) -> u32 {
        self.capacity
    }

    fn current_fill(&self) -> u32 {
        self.fill.get()
    }
}

/// Probe that counts how often the round polls it.
struct CountingProbe {
    over_ui: Rc<Cell<bool>>,
    polls: Rc<Cell<u32>>,
}

impl PointerProbe for CountingProbe {
    fn pointer_over_ui(&self) -> bool {
        self.polls.set(self.polls.get() + 1);
        self.over_ui.get()
    }
}

struct Fixture {
    round: RoundController,
    portal: Rc<RefCell<PortalState>>,
    fill: Rc<Cell<u32>>,
    over_ui: Rc<Cell<bool>>,
    polls: Rc<Cell<u32>>,
}

fn fixture(totals: Vec<u32>, total_waves: u32) -> Fixture {
    let (portal, portal_state) = ScriptedPortal::new(totals);
    let fill = Rc::new(Cell::new(0));
    let over_ui = Rc::new(Cell::new(false));
    let polls = Rc::new(Cell::new(0));

    let round = RoundController::new(RoundSetup {
        crates: vec![
            Box::new(SharedCrate {
                capacity: 5,
                fill: Rc::clone(&fill),
            }) as Box<dyn ItemCrate>,
            Box::new(SharedCrate {
                capacity: 3,
                fill: Rc::new(Cell::new(3)),
            }),
        ],
        portals: vec![Box::new(portal)],
        total_waves,
        pointer_probe: Box::new(CountingProbe {
            over_ui: Rc::clone(&over_ui),
            polls: Rc::clone(&polls),
        }),
    })
    .expect("round setup");

    Fixture {
        round,
        portal: portal_state,
        fill,
        over_ui,
        polls,
    }
}

fn defeat(state: &Rc<RefCell<PortalState>>, count: u32) {
    let mut state = state.borrow_mut();
    state.out_of_action = (state.out_of_action + count).min(state.wave_total);
}

#[test]
fn empty_setup_collections_abort_round_start() {
    let (portal, _) = ScriptedPortal::new(vec![1]);
    let result = RoundController::new(RoundSetup {
        crates: Vec::new(),
        portals: vec![Box::new(portal)],
        total_waves: 1,
        pointer_probe: Box::new(CountingProbe {
            over_ui: Rc::new(Cell::new(false)),
            polls: Rc::new(Cell::new(0)),
        }),
    });
    assert!(matches!(result, Err(ConfigurationError::NoCrates)));
}

#[test]
fn full_round_runs_announce_advance_clear_game_over() {
    let mut fx = fixture(vec![3, 5], 2);
    let mut out = Vec::new();

    // First tick stages the opening announcement; nothing has started yet.
    fx.round.tick(&mut out);
    assert_eq!(
        out,
        vec![Notification::WaveAnnounced { wave: Wave::new(1) }]
    );
    assert_eq!(query::wave(&fx.round), Wave::PRE_ROUND);

    // The driver reacts to the announcement.
    assert!(fx.round.advance_wave());
    assert_eq!(query::wave(&fx.round), Wave::new(1));
    let progress = query::enemy_progress(&fx.round);
    assert_eq!((progress.defeated, progress.total), (0, 3));

    // Clear wave one; the next tick announces wave two exactly once.
    defeat(&fx.portal, 3);
    out.clear();
    fx.round.tick(&mut out);
    fx.round.tick(&mut out);
    assert_eq!(
        out,
        vec![Notification::WaveAnnounced { wave: Wave::new(2) }]
    );
    assert!(query::is_ready_to_advance(&fx.round));

    assert!(fx.round.advance_wave());
    defeat(&fx.portal, 5);
    out.clear();
    fx.round.tick(&mut out);
    assert_eq!(out, vec![Notification::GameOver]);
    assert!(query::is_game_over(&fx.round));

    // Repeated ticks never re-announce and never revert game over.
    out.clear();
    fx.round.tick(&mut out);
    fx.round.tick(&mut out);
    assert!(out.is_empty());
    assert!(query::is_game_over(&fx.round));
    assert!(!fx.round.advance_wave());
}

#[test]
fn game_over_lands_on_the_same_tick_as_the_final_clear() {
    let mut fx = fixture(vec![2], 1);
    let mut out = Vec::new();
    fx.round.tick(&mut out);
    assert!(fx.round.advance_wave());

    // Wave refresh runs before game-over evaluation, so the tick that
    // observes the last defeat also ends the round.
    defeat(&fx.portal, 2);
    out.clear();
    fx.round.tick(&mut out);
    assert_eq!(out, vec![Notification::GameOver]);
}

#[test]
fn item_progress_is_a_snapshot_of_the_latest_tick() {
    let mut fx = fixture(vec![3], 1);
    let mut out = Vec::new();
    fx.round.tick(&mut out);

    let progress = query::item_progress(&fx.round);
    assert_eq!((progress.collected, progress.total), (3, 8));

    // External mutation is only observed by the next tick, never by the
    // getter itself.
    fx.fill.set(4);
    let stale = query::item_progress(&fx.round);
    assert_eq!(stale.collected, 3);

    fx.round.tick(&mut out);
    let fresh = query::item_progress(&fx.round);
    assert_eq!((fresh.collected, fresh.total), (7, 8));
}

#[test]
fn pointer_probe_is_polled_once_per_tick_and_cached() {
    let mut fx = fixture(vec![1], 1);
    let mut out = Vec::new();

    assert!(!query::is_pointer_over_ui(&fx.round));
    fx.over_ui.set(true);

    fx.round.tick(&mut out);
    assert_eq!(fx.polls.get(), 1);
    assert!(query::is_pointer_over_ui(&fx.round));

    // Reads between ticks reuse the cached value.
    assert!(query::is_pointer_over_ui(&fx.round));
    assert_eq!(fx.polls.get(), 1);

    fx.over_ui.set(false);
    fx.round.tick(&mut out);
    assert_eq!(fx.polls.get(), 2);
    assert!(!query::is_pointer_over_ui(&fx.round));
}

#[test]
fn priority_surface_delegates_to_the_arbiter() {
    let mut fx = fixture(vec![1], 1);
    let dialog = ClaimantId::new(10);
    let cutscene = ClaimantId::new(20);

    assert!(fx.round.is_priority_available(dialog));
    assert!(fx.round.gain_priority(dialog));
    assert!(fx.round.gain_priority(dialog), "re-entrant for the holder");
    assert!(!fx.round.gain_priority(cutscene));

    fx.round.release_priority(cutscene);
    assert!(!fx.round.is_priority_available(cutscene), "holder unchanged");

    fx.round.release_priority(dialog);
    assert!(fx.round.gain_priority(cutscene));
}
