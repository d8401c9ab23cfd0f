//! Player inventory: hotbar, main storage, crafting grid, crafting output and
//! the cursor-held stack.
//!
//! Slots are addressed either by [`SlotAddress`] or by a flat global index:
//! `[0, 9)` hotbar, `[9, 36)` main, `[36, 45)` crafting grid, `45` output.
//! The crafting output is derived from the grid by
//! [`CraftingEngine`](crate::crafting::CraftingEngine) and cannot be written
//! from outside this crate.

use blockcraft_core::{ItemStack, ItemType, GRID_SIZE};
use serde::{Deserialize, Serialize};

/// Number of hotbar slots.
pub const HOTBAR_SIZE: usize = 9;

/// Number of main inventory slots.
pub const MAIN_SIZE: usize = 27;

/// Number of crafting grid slots.
pub const CRAFTING_GRID_SIZE: usize = GRID_SIZE;

/// First global index of the hotbar.
pub const HOTBAR_START: usize = 0;

/// First global index of main storage.
pub const MAIN_START: usize = HOTBAR_START + HOTBAR_SIZE;

/// First global index of the crafting grid.
pub const CRAFTING_GRID_START: usize = MAIN_START + MAIN_SIZE;

/// Global index of the crafting output slot.
pub const CRAFTING_OUTPUT_INDEX: usize = CRAFTING_GRID_START + CRAFTING_GRID_SIZE;

/// Total number of addressable slots.
pub const TOTAL_SLOTS: usize = CRAFTING_OUTPUT_INDEX + 1;

/// One of the four addressable slot groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// 3x3 crafting grid.
    CraftingGrid,
    /// Single derived crafting output slot.
    CraftingOutput,
    /// 27 main storage slots.
    Main,
    /// 9 hotbar slots.
    Hotbar,
}

impl Section {
    /// Number of slots in this section.
    pub fn slot_count(self) -> usize {
        match self {
            Section::CraftingGrid => CRAFTING_GRID_SIZE,
            Section::CraftingOutput => 1,
            Section::Main => MAIN_SIZE,
            Section::Hotbar => HOTBAR_SIZE,
        }
    }

    /// First global index of this section.
    pub fn start(self) -> usize {
        match self {
            Section::CraftingGrid => CRAFTING_GRID_START,
            Section::CraftingOutput => CRAFTING_OUTPUT_INDEX,
            Section::Main => MAIN_START,
            Section::Hotbar => HOTBAR_START,
        }
    }
}

/// A (section, index) pair naming one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotAddress {
    /// Owning section.
    pub section: Section,
    /// Index within the section.
    pub index: usize,
}

impl SlotAddress {
    /// Build an address, rejecting indices outside the section.
    pub fn new(section: Section, index: usize) -> Option<Self> {
        (index < section.slot_count()).then_some(Self { section, index })
    }

    /// The crafting output slot.
    pub const OUTPUT: SlotAddress = SlotAddress {
        section: Section::CraftingOutput,
        index: 0,
    };

    /// Map a flat global index to an address.
    pub fn from_global(global: usize) -> Option<Self> {
        let section = match global {
            i if i < MAIN_START => Section::Hotbar,
            i if i < CRAFTING_GRID_START => Section::Main,
            i if i < CRAFTING_OUTPUT_INDEX => Section::CraftingGrid,
            CRAFTING_OUTPUT_INDEX => Section::CraftingOutput,
            _ => return None,
        };
        Some(Self {
            section,
            index: global - section.start(),
        })
    }

    /// Flat global index of this address.
    pub fn global(self) -> usize {
        self.section.start() + self.index
    }
}

/// Which storage sections a placement may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreTarget {
    /// Hotbar first, then main storage.
    HotbarThenMain,
    /// Hotbar only.
    Hotbar,
    /// Main storage only.
    Main,
}

/// Player inventory state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    hotbar: [ItemStack; HOTBAR_SIZE],
    main: [ItemStack; MAIN_SIZE],
    crafting_grid: [ItemStack; CRAFTING_GRID_SIZE],
    crafting_output: ItemStack,
    selected_hotbar_slot: usize,
    is_open: bool,
    held_item: ItemStack,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

impl Inventory {
    /// Create an empty inventory with hotbar slot 0 selected.
    pub fn new() -> Self {
        Self {
            hotbar: [ItemStack::EMPTY; HOTBAR_SIZE],
            main: [ItemStack::EMPTY; MAIN_SIZE],
            crafting_grid: [ItemStack::EMPTY; CRAFTING_GRID_SIZE],
            crafting_output: ItemStack::EMPTY,
            selected_hotbar_slot: 0,
            is_open: false,
            held_item: ItemStack::EMPTY,
        }
    }

    /// Slot at a flat global index.
    pub fn get_slot(&self, global: usize) -> Option<&ItemStack> {
        SlotAddress::from_global(global).and_then(|addr| self.slot_at(addr))
    }

    /// Slot at an address.
    pub fn slot_at(&self, addr: SlotAddress) -> Option<&ItemStack> {
        match addr.section {
            Section::Hotbar => self.hotbar.get(addr.index),
            Section::Main => self.main.get(addr.index),
            Section::CraftingGrid => self.crafting_grid.get(addr.index),
            Section::CraftingOutput => (addr.index == 0).then_some(&self.crafting_output),
        }
    }

    /// Mutable slot at an address. The crafting output is never handed out.
    ///
    /// Callers that change a grid cell must recompute the crafting output.
    pub fn slot_at_mut(&mut self, addr: SlotAddress) -> Option<&mut ItemStack> {
        match addr.section {
            Section::Hotbar => self.hotbar.get_mut(addr.index),
            Section::Main => self.main.get_mut(addr.index),
            Section::CraftingGrid => self.crafting_grid.get_mut(addr.index),
            Section::CraftingOutput => None,
        }
    }

    /// Every address paired with its stack, in global index order.
    pub fn slots(&self) -> impl Iterator<Item = (SlotAddress, &ItemStack)> + '_ {
        (0..TOTAL_SLOTS).filter_map(move |global| {
            let addr = SlotAddress::from_global(global)?;
            self.slot_at(addr).map(|stack| (addr, stack))
        })
    }

    /// Hotbar slots.
    pub fn hotbar(&self) -> &[ItemStack; HOTBAR_SIZE] {
        &self.hotbar
    }

    /// Main storage slots.
    pub fn main(&self) -> &[ItemStack; MAIN_SIZE] {
        &self.main
    }

    /// Crafting grid cells, row-major.
    pub fn crafting_grid(&self) -> &[ItemStack; CRAFTING_GRID_SIZE] {
        &self.crafting_grid
    }

    pub(crate) fn crafting_grid_mut(&mut self) -> &mut [ItemStack; CRAFTING_GRID_SIZE] {
        &mut self.crafting_grid
    }

    /// Item types currently laid out in the crafting grid.
    pub fn crafting_pattern(&self) -> [ItemType; CRAFTING_GRID_SIZE] {
        self.crafting_grid.map(|stack| stack.item_type)
    }

    /// Current (derived) crafting output.
    pub fn crafting_output(&self) -> &ItemStack {
        &self.crafting_output
    }

    pub(crate) fn set_crafting_output(&mut self, stack: ItemStack) {
        self.crafting_output = stack;
    }

    /// Stack held by the cursor.
    pub fn held_item(&self) -> &ItemStack {
        &self.held_item
    }

    /// Replace the cursor stack.
    pub fn set_held_item(&mut self, stack: ItemStack) {
        self.held_item = if stack.is_empty() {
            ItemStack::EMPTY
        } else {
            stack
        };
    }

    /// Take the cursor stack, leaving the cursor empty.
    pub fn take_held_item(&mut self) -> ItemStack {
        std::mem::take(&mut self.held_item)
    }

    /// Whether the cursor holds anything.
    pub fn is_holding_item(&self) -> bool {
        !self.held_item.is_empty()
    }

    /// Whether the inventory screen is open.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Open or close the inventory screen.
    pub fn set_open(&mut self, open: bool) {
        self.is_open = open;
    }

    /// Currently selected hotbar slot.
    pub fn selected_hotbar_slot(&self) -> usize {
        self.selected_hotbar_slot
    }

    /// Select a hotbar slot. Out-of-range values are ignored.
    pub fn set_selected_hotbar_slot(&mut self, slot: usize) {
        if slot < HOTBAR_SIZE {
            self.selected_hotbar_slot = slot;
        }
    }

    /// Stack in the selected hotbar slot.
    pub fn get_selected_hotbar_item(&self) -> &ItemStack {
        &self.hotbar[self.selected_hotbar_slot]
    }

    /// Total of `item_type` across hotbar and main storage.
    pub fn count_item(&self, item_type: ItemType) -> u32 {
        if item_type.is_none() {
            return 0;
        }
        self.hotbar
            .iter()
            .chain(self.main.iter())
            .filter(|stack| stack.item_type == item_type)
            .map(|stack| stack.count as u32)
            .sum()
    }

    /// Add `count` fresh items to hotbar then main storage.
    ///
    /// Existing stacks are topped up first, then empty slots are filled.
    /// Returns whether everything was placed; whatever did fit stays placed.
    pub fn add_item(&mut self, item_type: ItemType, count: u32) -> bool {
        if count == 0 {
            return true;
        }
        let template = ItemStack::new(item_type, 1);
        if template.is_empty() {
            return false;
        }
        self.place(template, count, StoreTarget::HotbarThenMain) == 0
    }

    /// Whether [`Inventory::add_item`] would place everything, without mutating.
    pub fn can_add_item(&self, item_type: ItemType, count: u32) -> bool {
        if count == 0 {
            return true;
        }
        let template = ItemStack::new(item_type, 1);
        if template.is_empty() {
            return false;
        }
        let max_stack = template.max_stack_size() as u32;
        let storage = || self.hotbar.iter().chain(self.main.iter());

        let stack_space: u32 = storage()
            .filter(|stack| blockcraft_core::can_stack(stack, &template))
            .map(|stack| stack.remaining_space() as u32)
            .sum();
        let remaining = count.saturating_sub(stack_space);
        if remaining == 0 {
            return true;
        }
        let empty_slots = storage().filter(|stack| stack.is_empty()).count() as u32;
        remaining.div_ceil(max_stack) <= empty_slots
    }

    /// Store an existing stack (durability preserved) into `target`.
    ///
    /// Returns whatever did not fit, or an empty stack.
    pub fn store_stack(&mut self, stack: ItemStack, target: StoreTarget) -> ItemStack {
        if stack.is_empty() {
            return ItemStack::EMPTY;
        }
        let left = self.place(stack, stack.count as u32, target);
        // `left` never exceeds the stack's original u8 count.
        stack.with_count(left as u8)
    }

    /// Remove `count` items from the slot at a global index.
    ///
    /// Fails for empty or short slots, out-of-range indices and the crafting
    /// output. Removing from a grid cell leaves the output stale until the
    /// crafting engine recomputes it.
    pub fn remove_item(&mut self, global: usize, count: u8) -> bool {
        let Some(stack) = SlotAddress::from_global(global).and_then(|addr| self.slot_at_mut(addr))
        else {
            return false;
        };
        if stack.is_empty() || stack.count < count {
            return false;
        }
        stack.remove(count);
        true
    }

    /// Take up to `amount` units of `item_type`, scanning the crafting grid,
    /// then the hotbar, then main storage. Returns the withdrawn units as one
    /// stack (carrying the first matching slot's durability), never more than
    /// one stack's worth.
    pub fn withdraw(&mut self, item_type: ItemType, amount: u8) -> ItemStack {
        let amount = amount.min(item_type.properties().max_stack_size);
        if item_type.is_none() || amount == 0 {
            return ItemStack::EMPTY;
        }
        let mut taken = ItemStack::EMPTY;
        let slots = self
            .crafting_grid
            .iter_mut()
            .chain(self.hotbar.iter_mut())
            .chain(self.main.iter_mut());
        for slot in slots {
            if taken.count == amount {
                break;
            }
            if slot.item_type != item_type {
                continue;
            }
            if taken.is_empty() {
                taken = ItemStack { count: 0, ..*slot };
            }
            taken.count += slot.remove(amount - taken.count);
        }
        if taken.count == 0 {
            ItemStack::EMPTY
        } else {
            taken
        }
    }

    fn storage_mut(&mut self, target: StoreTarget) -> impl Iterator<Item = &mut ItemStack> + '_ {
        let (hotbar, main) = match target {
            StoreTarget::HotbarThenMain => (&mut self.hotbar[..], &mut self.main[..]),
            StoreTarget::Hotbar => (&mut self.hotbar[..], &mut self.main[..0]),
            StoreTarget::Main => (&mut self.hotbar[..0], &mut self.main[..]),
        };
        hotbar.iter_mut().chain(main.iter_mut())
    }

    /// Two-phase placement of `count` units shaped like `template`.
    /// Returns the number of units that did not fit.
    fn place(&mut self, template: ItemStack, count: u32, target: StoreTarget) -> u32 {
        let mut remaining = count;
        let max_stack = template.max_stack_size();

        for slot in self.storage_mut(target) {
            if remaining == 0 {
                break;
            }
            if blockcraft_core::can_stack(slot, &template) && !slot.is_full() {
                let offer = remaining.min(max_stack as u32) as u8;
                let overflow = slot.add(offer);
                remaining -= (offer - overflow) as u32;
            }
        }

        for slot in self.storage_mut(target) {
            if remaining == 0 {
                break;
            }
            if slot.is_empty() {
                let amount = remaining.min(max_stack as u32) as u8;
                *slot = template.with_count(amount);
                remaining -= amount as u32;
            }
        }

        remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(inv: &Inventory, item_type: ItemType) -> u32 {
        inv.slots()
            .filter(|(_, stack)| stack.item_type == item_type)
            .map(|(_, stack)| stack.count as u32)
            .sum::<u32>()
            + if inv.held_item().item_type == item_type {
                inv.held_item().count as u32
            } else {
                0
            }
    }

    #[test]
    fn global_indices_round_trip() {
        for global in 0..TOTAL_SLOTS {
            let addr = SlotAddress::from_global(global).unwrap();
            assert_eq!(addr.global(), global);
        }
        assert_eq!(SlotAddress::from_global(0).unwrap().section, Section::Hotbar);
        assert_eq!(SlotAddress::from_global(9).unwrap().section, Section::Main);
        assert_eq!(SlotAddress::from_global(36).unwrap().section, Section::CraftingGrid);
        assert_eq!(SlotAddress::from_global(45), Some(SlotAddress::OUTPUT));
        assert_eq!(SlotAddress::from_global(46), None);
        assert_eq!(SlotAddress::new(Section::Hotbar, 9), None);
    }

    #[test]
    fn new_inventory_is_empty() {
        let inv = Inventory::new();
        assert_eq!(inv.slots().count(), TOTAL_SLOTS);
        assert!(inv.slots().all(|(_, stack)| *stack == ItemStack::EMPTY));
        assert_eq!(inv.selected_hotbar_slot(), 0);
        assert!(!inv.is_holding_item());
        assert!(!inv.is_open());
        assert!(inv.get_slot(TOTAL_SLOTS).is_none());
    }

    #[test]
    fn add_merges_before_filling() {
        let mut inv = Inventory::new();
        assert!(inv.add_item(ItemType::Dirt, 32));
        assert!(inv.add_item(ItemType::Stone, 1));
        assert!(inv.add_item(ItemType::Dirt, 40));

        assert_eq!(inv.hotbar()[0], ItemStack::new(ItemType::Dirt, 64));
        assert_eq!(inv.hotbar()[1], ItemStack::new(ItemType::Stone, 1));
        assert_eq!(inv.hotbar()[2], ItemStack::new(ItemType::Dirt, 8));
        assert_eq!(inv.count_item(ItemType::Dirt), 72);
    }

    #[test]
    fn add_next_to_full_stack_uses_first_empty_slot() {
        let mut inv = Inventory::new();
        inv.add_item(ItemType::Dirt, 64);
        assert!(inv.add_item(ItemType::Dirt, 10));
        assert_eq!(inv.hotbar()[0].count, 64);
        assert_eq!(inv.hotbar()[1], ItemStack::new(ItemType::Dirt, 10));
    }

    #[test]
    fn add_spills_from_hotbar_into_main() {
        let mut inv = Inventory::new();
        assert!(inv.add_item(ItemType::Cobblestone, 64 * 10));
        assert!(inv.hotbar().iter().all(|s| s.count == 64));
        assert_eq!(inv.main()[0].count, 64);
        assert!(inv.main()[1].is_empty());
    }

    #[test]
    fn tools_take_one_slot_each() {
        let mut inv = Inventory::new();
        assert!(inv.add_item(ItemType::StonePickaxe, 3));
        for slot in &inv.hotbar()[..3] {
            assert_eq!(slot.count, 1);
            assert_eq!(slot.durability, 131);
        }
        assert!(inv.hotbar()[3].is_empty());
    }

    #[test]
    fn add_is_best_effort_when_full() {
        let mut inv = Inventory::new();
        assert!(inv.add_item(ItemType::Egg, 16 * 36 - 5));
        assert!(!inv.can_add_item(ItemType::Egg, 6));
        assert!(inv.can_add_item(ItemType::Egg, 5));
        assert!(!inv.add_item(ItemType::Egg, 6));
        assert_eq!(inv.count_item(ItemType::Egg), 16 * 36);
    }

    #[test]
    fn can_add_agrees_with_add() {
        let cases = [
            (ItemType::Dirt, 0),
            (ItemType::Dirt, 10),
            (ItemType::Dirt, 64 * 35),
            (ItemType::Dirt, 64 * 35 + 1),
            (ItemType::IronPickaxe, 35),
            (ItemType::IronPickaxe, 36),
            (ItemType::None, 1),
        ];
        for (item, count) in cases {
            let mut inv = Inventory::new();
            inv.add_item(ItemType::Dirt, 20);
            inv.add_item(ItemType::Sand, 64);
            let predicted = inv.can_add_item(item, count);
            assert_eq!(predicted, inv.add_item(item, count), "{item:?} x{count}");
        }
    }

    #[test]
    fn remove_item_checks_slot() {
        let mut inv = Inventory::new();
        inv.add_item(ItemType::Sand, 5);
        assert!(!inv.remove_item(0, 6));
        assert!(!inv.remove_item(1, 1));
        assert!(!inv.remove_item(CRAFTING_OUTPUT_INDEX, 1));
        assert!(!inv.remove_item(TOTAL_SLOTS, 1));
        assert!(inv.remove_item(0, 2));
        assert_eq!(inv.hotbar()[0].count, 3);
        assert!(inv.remove_item(0, 3));
        assert_eq!(inv.hotbar()[0], ItemStack::EMPTY);
    }

    #[test]
    fn output_is_not_writable() {
        let mut inv = Inventory::new();
        assert!(inv.slot_at_mut(SlotAddress::OUTPUT).is_none());
        assert!(inv.slot_at(SlotAddress::OUTPUT).is_some());
    }

    #[test]
    fn selected_slot_ignores_out_of_range() {
        let mut inv = Inventory::new();
        inv.add_item(ItemType::Torch, 3);
        inv.set_selected_hotbar_slot(4);
        assert_eq!(inv.selected_hotbar_slot(), 4);
        inv.set_selected_hotbar_slot(9);
        assert_eq!(inv.selected_hotbar_slot(), 4);
        inv.set_selected_hotbar_slot(0);
        assert_eq!(inv.get_selected_hotbar_item().item_type, ItemType::Torch);
    }

    #[test]
    fn store_stack_respects_target() {
        let mut inv = Inventory::new();
        for slot in 0..HOTBAR_SIZE {
            *inv.slot_at_mut(SlotAddress::new(Section::Hotbar, slot).unwrap()).unwrap() =
                ItemStack::new(ItemType::Gravel, 63);
        }
        let left = inv.store_stack(ItemStack::new(ItemType::Gravel, 20), StoreTarget::Hotbar);
        assert_eq!(left.count, 11);
        assert!(inv.main().iter().all(|s| s.is_empty()));

        let left = inv.store_stack(left, StoreTarget::Main);
        assert!(left.is_empty());
        assert_eq!(inv.main()[0].count, 11);
    }

    #[test]
    fn store_stack_keeps_tool_wear() {
        let mut inv = Inventory::new();
        let mut worn = ItemStack::new(ItemType::IronAxe, 1);
        worn.durability = 17;
        assert!(inv.store_stack(worn, StoreTarget::HotbarThenMain).is_empty());
        assert_eq!(inv.hotbar()[0].durability, 17);
        assert_eq!(inv.hotbar()[0].max_durability, 250);
    }

    #[test]
    fn withdraw_scans_grid_then_hotbar_then_main() {
        let mut inv = Inventory::new();
        inv.add_item(ItemType::WoodPlanks, 64 * 9 + 10);
        *inv.slot_at_mut(SlotAddress::new(Section::CraftingGrid, 4).unwrap()).unwrap() =
            ItemStack::new(ItemType::WoodPlanks, 3);

        let before = total(&inv, ItemType::WoodPlanks);
        let taken = inv.withdraw(ItemType::WoodPlanks, 60);
        assert_eq!(taken, ItemStack::new(ItemType::WoodPlanks, 60));
        assert!(inv.crafting_grid()[4].is_empty());
        assert_eq!(inv.hotbar()[0].count, 7);
        assert_eq!(inv.hotbar()[1].count, 64);
        assert_eq!(inv.main()[0].count, 10);
        assert_eq!(total(&inv, ItemType::WoodPlanks), before - 60);

        assert!(inv.withdraw(ItemType::Diamond, 1).is_empty());
    }

    #[test]
    fn withdraw_never_exceeds_one_stack() {
        let mut inv = Inventory::new();
        inv.add_item(ItemType::Dirt, 200);
        assert_eq!(inv.withdraw(ItemType::Dirt, 100).count, 64);
        assert_eq!(inv.count_item(ItemType::Dirt), 136);

        inv.add_item(ItemType::IronPickaxe, 3);
        let pick = inv.withdraw(ItemType::IronPickaxe, 2);
        assert_eq!(pick, ItemStack::new(ItemType::IronPickaxe, 1));
        assert!(pick.is_canonical());
        assert_eq!(inv.count_item(ItemType::IronPickaxe), 2);
    }

    #[test]
    fn held_item_stays_canonical() {
        let mut inv = Inventory::new();
        inv.set_held_item(ItemStack {
            item_type: ItemType::Coal,
            count: 0,
            durability: 0,
            max_durability: 0,
        });
        assert_eq!(*inv.held_item(), ItemStack::EMPTY);
        inv.set_held_item(ItemStack::new(ItemType::Coal, 2));
        assert!(inv.is_holding_item());
        assert_eq!(inv.take_held_item().count, 2);
        assert!(!inv.is_holding_item());
    }
}
