use clap::Subcommand;

use super::{open_controller, print_outcome, CliResult};

#[derive(Subcommand)]
pub enum SlotAction {
    /// Print all slots
    List,
    /// Add one to a slot's tally
    Incr {
        /// Slot position (1-4)
        position: usize,
    },
    /// Subtract one from a slot's tally (stops at zero)
    Decr {
        /// Slot position (1-4)
        position: usize,
    },
    /// Rename a slot
    Rename {
        /// Slot position (1-4)
        position: usize,
        /// New name
        name: String,
    },
    /// Set the occupancy (1-4); three seats keep a reserved fourth slot
    Occupancy {
        /// Number of active participants (malformed input clamps to 1)
        #[arg(value_parser = super::lenient_u32)]
        count: u32,
    },
    /// Rotate every slot one position toward the front
    RotateLeft,
    /// Rotate every slot one position toward the back
    RotateRight,
}

/// CLI positions are 1-based; the core indexes from 0. A position of 0
/// maps to an out-of-range index and falls through as a no-op.
fn index(position: usize) -> usize {
    position.wrapping_sub(1)
}

pub fn run(session: Option<&str>, action: SlotAction) -> CliResult {
    let mut ctl = open_controller(session)?;
    match action {
        SlotAction::List => {
            for (i, slot) in ctl.state().slots.iter().enumerate() {
                if slot.is_empty {
                    println!("{}. (reserved)", i + 1);
                } else if slot.name.is_empty() {
                    println!("{}. (unnamed)  {}", i + 1, slot.count);
                } else {
                    println!("{}. {}  {}", i + 1, slot.name, slot.count);
                }
            }
            Ok(())
        }
        SlotAction::Incr { position } => print_outcome(ctl.increment_slot(index(position))?),
        SlotAction::Decr { position } => print_outcome(ctl.decrement_slot(index(position))?),
        SlotAction::Rename { position, name } => {
            print_outcome(ctl.rename_slot(index(position), &name)?)
        }
        SlotAction::Occupancy { count } => print_outcome(ctl.set_occupancy(count)?),
        SlotAction::RotateLeft => print_outcome(ctl.rotate_left()?),
        SlotAction::RotateRight => print_outcome(ctl.rotate_right()?),
    }
}
