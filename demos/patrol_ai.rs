//! Patrol AI
//!
//! This demo builds a two-level hierarchical state machine for a guard.
//!
//! Key concepts:
//! - A single-slot machine at the root switches between behaviors
//! - The "alert" behavior is itself a machine with its own child states
//! - Entering the alert behavior selects its default child through a hook
//! - Observers count every top-level change
//!
//! Run with: cargo run --example patrol_ai

use statecraft::{State, StateMachine};
use std::cell::Cell;
use std::rc::{Rc, Weak};
use std::time::Duration;

type Brain = StateMachine<dyn State>;

struct Patrol {
    brain: Weak<Brain>,
    alert: Rc<Brain>,
    waypoint: Cell<u32>,
}

impl State for Patrol {
    fn name(&self) -> &str {
        "patrol"
    }

    fn on_enter(&self) {
        println!("  [patrol] starting route");
    }

    fn on_update(&self, _delta_time: Duration) {
        let waypoint = self.waypoint.get() + 1;
        self.waypoint.set(waypoint);
        println!("  [patrol] reached waypoint {waypoint}");

        if waypoint == 3 {
            println!("  [patrol] heard a noise!");
            if let Some(brain) = self.brain.upgrade() {
                brain.set_state(Some(self.alert.clone()));
            }
        }
    }
}

struct Search;

impl State for Search {
    fn name(&self) -> &str {
        "search"
    }

    fn on_enter(&self) {
        println!("    [search] scanning the area");
    }

    fn on_update(&self, _delta_time: Duration) {
        println!("    [search] ...");
    }
}

/// Sub-machine that starts searching every time the guard becomes alert.
fn alert() -> Rc<Brain> {
    let search: Rc<dyn State> = Rc::new(Search);
    Rc::new(
        StateMachine::<dyn State>::builder()
            .on_entered(move |behaviors| {
                println!("  [alert] on guard");
                behaviors.set_state(Some(Rc::clone(&search)));
            })
            .on_exited(|behaviors| {
                println!("  [alert] standing down");
                behaviors.clear_state();
            })
            .build(),
    )
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Patrol AI Example ===\n");

    let brain: Rc<Brain> = Rc::new(StateMachine::new());
    let changes = Rc::new(Cell::new(0u32));
    {
        let changes = Rc::clone(&changes);
        brain.on_state_changed(move |_| changes.set(changes.get() + 1));
    }

    let alert = alert();

    brain.set_state(Some(Rc::new(Patrol {
        brain: Rc::downgrade(&brain),
        alert: alert.clone(),
        waypoint: Cell::new(0),
    })));

    let tick = Duration::from_millis(500);
    for _ in 0..5 {
        brain.update(tick);
    }

    println!(
        "\nAlert for {:.1}s, searching for {:.1}s",
        brain.elapsed_secs(),
        alert.elapsed_secs()
    );

    brain.clear_state();

    println!("\n{} top-level changes", changes.get());
    println!("\n=== Example Complete ===");
}
