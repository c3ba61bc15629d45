#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives a scripted Crate Siege round.
//!
//! Hosts in-process stand-ins for the external collaborators (portals,
//! crates, pointer probe) and plays a full round to stdout: one enemy
//! falls per portal per tick, one item lands per crate per tick, and the
//! driver advances waves as announcements arrive.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::Result;
use clap::Parser;
use crate_siege_core::{
    ItemCrate, Notification, PointerProbe, Wave, WavePortal, WELCOME_BANNER,
};
use crate_siege_round::{query, RoundController, RoundSetup};

/// Command-line arguments for the scripted round.
#[derive(Debug, Parser)]
#[command(name = "crate-siege", about = "Plays a scripted Crate Siege round")]
struct Args {
    /// Number of waves the round runs.
    #[arg(long, default_value_t = 2)]
    waves: u32,

    /// Number of spawn portals in the arena.
    #[arg(long, default_value_t = 2)]
    portals: u32,

    /// Enemies each portal spawns per wave.
    #[arg(long, default_value_t = 3)]
    enemies_per_wave: u32,

    /// Number of item crates in the arena.
    #[arg(long, default_value_t = 2)]
    crates: u32,

    /// Item capacity of each crate.
    #[arg(long, default_value_t = 5)]
    crate_capacity: u32,
}

#[derive(Default)]
struct PortalState {
    active: bool,
    out_of_action: u32,
    wave_total: u32,
}

/// Portal stand-in: a fixed enemy count per wave, one defeat per tick.
struct ScriptedPortal {
    enemies_per_wave: u32,
    state: Rc<RefCell<PortalState>>,
}

impl WavePortal for ScriptedPortal {
    fn start_wave(&mut self, _wave: Wave) {
        let mut state = self.state.borrow_mut();
        state.active = true;
        state.out_of_action = 0;
        state.wave_total = self.enemies_per_wave;
    }

    fn is_wave_ended(&self) -> bool {
        let state = self.state.borrow();
        state.active && state.out_of_action >= state.wave_total
    }

    fn out_of_action_count(&self) -> u32 {
        self.state.borrow().out_of_action
    }

    fn total_count_for_wave(&self, _wave: Wave) -> u32 {
        self.enemies_per_wave
    }
}

/// Crate stand-in whose fill the driver raises between ticks.
struct StockedCrate {
    capacity: u32,
    fill: Rc<Cell<u32>>,
}

impl ItemCrate for StockedCrate {
    fn capacity(&self) -> u32 {
        self.capacity
    }

    fn current_fill(&self) -> u32 {
        self.fill.get()
    }
}

/// Hit-test stand-in: the pointer never rests on UI in the scripted run.
struct NoUiProbe;

impl PointerProbe for NoUiProbe {
    fn pointer_over_ui(&self) -> bool {
        false
    }
}

/// Entry point for the Crate Siege command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    println!("{WELCOME_BANNER}");

    let mut portal_states = Vec::new();
    let mut portals: Vec<Box<dyn WavePortal>> = Vec::new();
    for _ in 0..args.portals {
        let state = Rc::new(RefCell::new(PortalState::default()));
        portal_states.push(Rc::clone(&state));
        portals.push(Box::new(ScriptedPortal {
            enemies_per_wave: args.enemies_per_wave,
            state,
        }));
    }

    let mut fills = Vec::new();
    let mut crates: Vec<Box<dyn ItemCrate>> = Vec::new();
    for _ in 0..args.crates {
        let fill = Rc::new(Cell::new(0));
        fills.push(Rc::clone(&fill));
        crates.push(Box::new(StockedCrate {
            capacity: args.crate_capacity,
            fill,
        }));
    }

    let mut round = RoundController::new(RoundSetup {
        crates,
        portals,
        total_waves: args.waves,
        pointer_probe: Box::new(NoUiProbe),
    })?;

    let mut notifications = Vec::new();
    loop {
        round.tick(&mut notifications);

        let mut game_over = false;
        for notification in notifications.drain(..) {
            match notification {
                Notification::WaveAnnounced { wave } => {
                    println!("wave {} incoming", wave.get());
                    let _ = round.advance_wave();
                }
                Notification::GameOver => {
                    println!("game over");
                    game_over = true;
                }
            }
        }
        if game_over {
            break;
        }

        let wave = query::wave(&round);
        let enemies = query::enemy_progress(&round);
        let items = query::item_progress(&round);
        println!(
            "wave {} | enemies {}/{} | items {}/{}",
            wave.get(),
            enemies.defeated,
            enemies.total,
            items.collected,
            items.total
        );

        // Scripted world activity between ticks: every portal loses one
        // enemy and every crate gains one item.
        for state in &portal_states {
            let mut state = state.borrow_mut();
            if state.active && state.out_of_action < state.wave_total {
                state.out_of_action += 1;
            }
        }
        for fill in &fills {
            let next = fill.get() + 1;
            if next <= args.crate_capacity {
                fill.set(next);
            }
        }
    }

    let items = query::item_progress(&round);
    println!("items collected: {}/{}", items.collected, items.total);
    Ok(())
}
