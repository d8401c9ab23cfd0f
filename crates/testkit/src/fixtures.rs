//! Inventory fixtures.

use blockcraft_core::{ItemStack, ItemType};
use blockcraft_world::{CraftingEngine, Inventory, Section, SlotAddress};

/// Inventory holding the given items, added in order via `add_item`.
pub fn inventory_with(items: &[(ItemType, u32)]) -> Inventory {
    let mut inv = Inventory::new();
    for &(item, count) in items {
        assert!(inv.add_item(item, count), "fixture overflow adding {item:?}");
    }
    inv
}

/// Put `(cell, item, count)` stacks into the crafting grid and recompute the
/// output with `engine`.
pub fn fill_grid(
    inv: &mut Inventory,
    engine: &CraftingEngine<'_>,
    cells: &[(usize, ItemType, u8)],
) {
    for &(index, item, count) in cells {
        let addr = SlotAddress::new(Section::CraftingGrid, index).expect("grid index in range");
        if let Some(slot) = inv.slot_at_mut(addr) {
            *slot = ItemStack::new(item, count);
        }
    }
    engine.update_output(inv);
}

/// Address helper for tests.
pub fn addr(section: Section, index: usize) -> SlotAddress {
    SlotAddress::new(section, index).expect("slot index in range")
}
