//! Inventory totals for conservation and canonical-form assertions.

use blockcraft_core::ItemType;
use blockcraft_world::{Inventory, Section};
use std::collections::BTreeMap;

/// Per-type item totals across an inventory.
pub type ItemTotals = BTreeMap<ItemType, u32>;

/// Totals over hotbar, main storage, crafting grid and the held stack.
///
/// The crafting output is excluded: it is derived from the grid, not owned.
pub fn item_totals(inv: &Inventory) -> ItemTotals {
    let mut totals = ItemTotals::new();
    let owned = inv
        .slots()
        .filter(|(addr, _)| addr.section != Section::CraftingOutput)
        .map(|(_, stack)| stack)
        .chain(std::iter::once(inv.held_item()));
    for stack in owned {
        if !stack.is_empty() {
            *totals.entry(stack.item_type).or_default() += stack.count as u32;
        }
    }
    totals
}

/// Panic unless every slot and the held stack are in canonical form and no
/// stack exceeds its catalog max stack size.
pub fn assert_canonical(inv: &Inventory) {
    for (addr, stack) in inv.slots() {
        assert!(stack.is_canonical(), "slot {addr:?} not canonical: {stack:?}");
        if addr.section != Section::CraftingOutput {
            assert!(
                stack.count <= stack.max_stack_size(),
                "slot {addr:?} overfull: {stack:?}"
            );
        }
    }
    let held = inv.held_item();
    assert!(held.is_canonical(), "held stack not canonical: {held:?}");
    assert!(held.count <= held.max_stack_size(), "held stack overfull: {held:?}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockcraft_core::ItemStack;

    #[test]
    fn totals_include_held_and_skip_output() {
        let mut inv = Inventory::new();
        inv.add_item(ItemType::Dirt, 70);
        inv.set_held_item(ItemStack::new(ItemType::Dirt, 5));
        let totals = item_totals(&inv);
        assert_eq!(totals.get(&ItemType::Dirt), Some(&75));
        assert_eq!(totals.len(), 1);
        assert_canonical(&inv);
    }
}
