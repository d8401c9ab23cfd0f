use blockcraft_core::{ItemStack, ItemType, RecipeDatabase};
use blockcraft_ui::{SlotController, SlotLayout};
use blockcraft_world::{CraftingEngine, Inventory, StoreTarget};

/// One player's open inventory window, driven by session commands.
pub struct Session<'r> {
    inventory: Inventory,
    controller: SlotController<'r>,
}

impl<'r> Session<'r> {
    pub fn new(recipes: &'r RecipeDatabase, layout: SlotLayout) -> Self {
        let mut inventory = Inventory::new();
        inventory.set_open(true);
        Self {
            inventory,
            controller: SlotController::new(CraftingEngine::new(recipes), layout),
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub fn controller(&self) -> &SlotController<'r> {
        &self.controller
    }

    /// Split borrow used by click handling.
    pub fn parts(&mut self) -> (&SlotController<'r>, &mut Inventory) {
        (&self.controller, &mut self.inventory)
    }

    /// Give `count` items, one full stack at a time. Returns how many did not fit.
    pub fn give_item(&mut self, item: ItemType, count: u32) -> u32 {
        if item.is_none() {
            return count;
        }
        let max = u32::from(item.properties().max_stack_size.max(1));
        let mut remaining = count;
        while remaining > 0 {
            let chunk = remaining.min(max);
            let left = self
                .inventory
                .store_stack(ItemStack::new(item, chunk as u8), StoreTarget::HotbarThenMain);
            remaining -= chunk - u32::from(left.count);
            if !left.is_empty() {
                break;
            }
        }
        remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockcraft_world::{HOTBAR_SIZE, MAIN_SIZE};

    #[test]
    fn give_splits_into_stacks() {
        let db = RecipeDatabase::with_defaults();
        let mut session = Session::new(&db, SlotLayout::default());
        assert_eq!(session.give_item(ItemType::Dirt, 130), 0);
        assert_eq!(session.inventory().count_item(ItemType::Dirt), 130);
        assert_eq!(session.inventory().hotbar()[0].count, 64);
        assert_eq!(session.inventory().hotbar()[2].count, 2);
        assert!(session.inventory().is_open());
    }

    #[test]
    fn give_reports_overflow() {
        let db = RecipeDatabase::with_defaults();
        let mut session = Session::new(&db, SlotLayout::default());
        let capacity = ((HOTBAR_SIZE + MAIN_SIZE) * 64) as u32;
        assert_eq!(session.give_item(ItemType::Sand, capacity + 10), 10);
        assert_eq!(session.inventory().count_item(ItemType::Sand), capacity);
        assert_eq!(session.give_item(ItemType::None, 3), 3);
    }
}
