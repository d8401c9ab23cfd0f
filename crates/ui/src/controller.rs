//! Mouse-driven slot interaction: pick up, place, swap, split, quick-transfer
//! and crafting from the output slot.
//!
//! Every click is one complete state transition. Clicks that cannot apply
//! leave the inventory untouched and report [`ClickOutcome::Unchanged`].

use crate::layout::SlotLayout;
use blockcraft_core::{can_stack, ItemStack};
use blockcraft_world::{CraftingEngine, Inventory, Section, SlotAddress, StoreTarget};
use egui::Pos2;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

/// Kind of pointer click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickKind {
    /// Primary button.
    Left,
    /// Secondary button.
    Right,
    /// Primary button with shift held (quick transfer).
    ShiftLeft,
}

/// Result of a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing changed.
    Unchanged,
    /// The inventory changed.
    Changed,
    /// A craft-all produced more than storage could take; the surplus stack
    /// was destroyed.
    Dropped(ItemStack),
}

impl ClickOutcome {
    /// Whether the inventory changed.
    pub fn changed(self) -> bool {
        !matches!(self, ClickOutcome::Unchanged)
    }
}

/// Applies clicks to an inventory.
#[derive(Debug, Clone)]
pub struct SlotController<'r> {
    engine: CraftingEngine<'r>,
    layout: SlotLayout,
}

impl<'r> SlotController<'r> {
    /// Create a controller crafting with `engine` and hit-testing with `layout`.
    pub fn new(engine: CraftingEngine<'r>, layout: SlotLayout) -> Self {
        Self { engine, layout }
    }

    /// The crafting engine in use.
    pub fn engine(&self) -> &CraftingEngine<'r> {
        &self.engine
    }

    /// The slot layout in use.
    pub fn layout(&self) -> &SlotLayout {
        &self.layout
    }

    /// Resolve a screen position and apply the click there.
    pub fn handle_pointer(&self, inv: &mut Inventory, pos: Pos2, kind: ClickKind) -> ClickOutcome {
        match self.layout.get_clicked_slot(pos) {
            Some(addr) => self.click(inv, addr, kind),
            None => ClickOutcome::Unchanged,
        }
    }

    /// Apply a click to a slot.
    pub fn click(&self, inv: &mut Inventory, addr: SlotAddress, kind: ClickKind) -> ClickOutcome {
        let outcome = match kind {
            ClickKind::Left => self.left_click(inv, addr),
            ClickKind::Right => self.right_click(inv, addr),
            ClickKind::ShiftLeft => self.shift_click(inv, addr),
        };
        if outcome.changed() && addr.section == Section::CraftingGrid {
            self.engine.update_output(inv);
        }
        trace!(?addr, ?kind, ?outcome, "slot click");
        outcome
    }

    fn left_click(&self, inv: &mut Inventory, addr: SlotAddress) -> ClickOutcome {
        if addr.section == Section::CraftingOutput {
            return self.take_output(inv);
        }

        let mut held = *inv.held_item();
        let Some(slot) = inv.slot_at_mut(addr) else {
            return ClickOutcome::Unchanged;
        };

        match (held.is_empty(), slot.is_empty()) {
            (true, true) => return ClickOutcome::Unchanged,
            (true, false) => held = std::mem::take(slot),
            (false, true) => *slot = std::mem::take(&mut held),
            (false, false) if can_stack(&held, slot) => {
                let moved = held.count - slot.add(held.count);
                if moved == 0 {
                    return ClickOutcome::Unchanged;
                }
                held.remove(moved);
            }
            (false, false) => std::mem::swap(&mut held, slot),
        }

        inv.set_held_item(held);
        ClickOutcome::Changed
    }

    /// Take one craft's worth from the output slot into the hand.
    ///
    /// The hand must be empty, or hold the output type with room for the
    /// whole output.
    fn take_output(&self, inv: &mut Inventory) -> ClickOutcome {
        self.engine.update_output(inv);
        let output = *inv.crafting_output();
        if output.is_empty() {
            return ClickOutcome::Unchanged;
        }

        let held = *inv.held_item();
        let new_held = if held.is_empty() {
            output
        } else if can_stack(&held, &output)
            && held.count as u32 + output.count as u32 <= held.max_stack_size() as u32
        {
            held.with_count(held.count + output.count)
        } else {
            return ClickOutcome::Unchanged;
        };

        if !self.engine.try_craft(inv) {
            return ClickOutcome::Unchanged;
        }
        inv.set_held_item(new_held);
        ClickOutcome::Changed
    }

    fn right_click(&self, inv: &mut Inventory, addr: SlotAddress) -> ClickOutcome {
        let mut held = *inv.held_item();
        let Some(slot) = inv.slot_at_mut(addr) else {
            // The output slot cannot be split.
            return ClickOutcome::Unchanged;
        };

        if held.is_empty() {
            if slot.is_empty() {
                return ClickOutcome::Unchanged;
            }
            let half = slot.count.div_ceil(2);
            held = slot.with_count(half);
            slot.remove(half);
        } else if slot.is_empty() {
            *slot = held.with_count(1);
            held.remove(1);
        } else if can_stack(&held, slot) && !slot.is_full() {
            slot.add(1);
            held.remove(1);
        } else {
            return ClickOutcome::Unchanged;
        }

        inv.set_held_item(held);
        ClickOutcome::Changed
    }

    fn shift_click(&self, inv: &mut Inventory, addr: SlotAddress) -> ClickOutcome {
        match addr.section {
            Section::CraftingOutput => self.craft_all_into_storage(inv),
            Section::Hotbar => {
                // All or nothing: try on a copy and commit only if every unit fits.
                let mut draft = inv.clone();
                let Some(slot) = draft.slot_at_mut(addr) else {
                    return ClickOutcome::Unchanged;
                };
                let stack = std::mem::take(slot);
                if stack.is_empty() {
                    return ClickOutcome::Unchanged;
                }
                if !draft.store_stack(stack, StoreTarget::Main).is_empty() {
                    return ClickOutcome::Unchanged;
                }
                *inv = draft;
                ClickOutcome::Changed
            }
            Section::Main | Section::CraftingGrid => {
                let Some(slot) = inv.slot_at_mut(addr) else {
                    return ClickOutcome::Unchanged;
                };
                let stack = std::mem::take(slot);
                if stack.is_empty() {
                    return ClickOutcome::Unchanged;
                }
                let left = inv.store_stack(stack, StoreTarget::Hotbar);
                if let Some(slot) = inv.slot_at_mut(addr) {
                    *slot = left;
                }
                if left == stack {
                    ClickOutcome::Unchanged
                } else {
                    ClickOutcome::Changed
                }
            }
        }
    }

    /// Craft as much as possible and deposit it into hotbar then main storage.
    ///
    /// Whatever does not fit is destroyed and returned in
    /// [`ClickOutcome::Dropped`]; it is not put back into the grid.
    fn craft_all_into_storage(&self, inv: &mut Inventory) -> ClickOutcome {
        self.engine.update_output(inv);
        let crafted = self.engine.craft_all(inv);
        if crafted.is_empty() {
            return ClickOutcome::Unchanged;
        }

        let left = inv.store_stack(crafted, StoreTarget::HotbarThenMain);
        if left.is_empty() {
            ClickOutcome::Changed
        } else {
            warn!(
                item = ?left.item_type,
                count = left.count,
                "storage full; crafted items dropped"
            );
            ClickOutcome::Dropped(left)
        }
    }
}
