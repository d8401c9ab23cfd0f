#![warn(missing_docs)]
//! Inventory window interaction: slot geometry and the click state machine.

pub mod controller;
pub mod layout;

pub use controller::{ClickKind, ClickOutcome, SlotController};
pub use layout::SlotLayout;
