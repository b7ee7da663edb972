//! Menu Stack
//!
//! This demo drives a stack of UI screens the way a game loop would.
//!
//! Key concepts:
//! - Screens are pushed on top of each other and popped to go back
//! - A screen resumed by a pop refreshes itself instead of re-initialising
//! - The top screen closes itself from its own update
//!
//! Run with: RUST_LOG=statecraft=trace cargo run --example menu_stack

use statecraft::{MachineError, StackAction, StackState, StackStateMachine};
use std::cell::Cell;
use std::rc::{Rc, Weak};
use std::time::Duration;

type Screens = StackStateMachine<dyn StackState>;

struct TitleScreen;

impl StackState for TitleScreen {
    fn name(&self) -> &str {
        "title"
    }

    fn on_enter(&self, action: StackAction) {
        match action {
            StackAction::Push => println!("  [title] building menu"),
            StackAction::Pop => println!("  [title] refreshing save slots"),
        }
    }

    fn on_exit(&self, action: StackAction) {
        if action == StackAction::Push {
            println!("  [title] dimmed behind overlay");
        }
    }
}

/// Splash that closes itself after a fixed time on screen.
struct Toast {
    screens: Weak<Screens>,
    shown_for: Cell<Duration>,
    lifetime: Duration,
}

impl StackState for Toast {
    fn name(&self) -> &str {
        "toast"
    }

    fn on_enter(&self, _action: StackAction) {
        println!("  [toast] \"Settings saved\"");
    }

    fn on_update(&self, delta_time: Duration) {
        self.shown_for.set(self.shown_for.get() + delta_time);
        if self.shown_for.get() < self.lifetime {
            return;
        }
        if let Some(screens) = self.screens.upgrade() {
            if let Err(err) = screens.pop() {
                eprintln!("  [toast] could not close: {err}");
            }
        }
    }
}

struct OptionsScreen;

impl StackState for OptionsScreen {
    fn name(&self) -> &str {
        "options"
    }

    fn on_enter(&self, action: StackAction) {
        println!("  [options] entered via {action}");
    }

    fn on_exit(&self, action: StackAction) {
        println!("  [options] exited via {action}");
    }
}

fn main() -> Result<(), MachineError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Menu Stack Example ===\n");

    let screens: Rc<Screens> = Rc::new(StackStateMachine::new());
    let frame = Duration::from_millis(250);

    println!("Boot:");
    screens.push(Rc::new(TitleScreen));

    println!("\nOpen options:");
    screens.push(Rc::new(OptionsScreen));

    println!("\nSave settings:");
    screens.push(Rc::new(Toast {
        screens: Rc::downgrade(&screens),
        shown_for: Cell::new(Duration::ZERO),
        lifetime: Duration::from_secs(1),
    }));

    let mut frames = 0;
    while screens.current_state()?.name() == "toast" {
        screens.update(frame);
        frames += 1;
    }
    println!("  toast closed after {frames} frames");

    println!("\nBack to title:");
    screens.pop()?;
    println!("  depth: {}, top: {}", screens.len(), screens.current_state()?.name());

    println!("\nQuit:");
    let closed = screens.pop_all();
    println!("  closed {} screen(s)", closed.len());

    println!("\n=== Example Complete ===");
    Ok(())
}
