#![warn(missing_docs)]
//! Inventory store, crafting engine and block mining queries.

pub mod block_properties;
pub mod crafting;
pub mod drop_item;
pub mod inventory;

pub use block_properties::{calculate_dig_time, can_harvest_block, BlockProperties, DigTime};
pub use crafting::{CraftAmount, CraftingEngine};
pub use drop_item::get_block_drop;
pub use inventory::{
    Inventory, Section, SlotAddress, StoreTarget, CRAFTING_GRID_SIZE, CRAFTING_OUTPUT_INDEX,
    HOTBAR_SIZE, MAIN_SIZE, TOTAL_SLOTS,
};
