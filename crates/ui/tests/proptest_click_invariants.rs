//! Property tests for the click state machine.
//!
//! Random click sequences that never touch the crafting output must conserve
//! every item type and keep every slot in canonical form.

use blockcraft_core::{ItemType, RecipeDatabase};
use blockcraft_testkit::{assert_canonical, inventory_with, item_totals};
use blockcraft_ui::{ClickKind, SlotController, SlotLayout};
use blockcraft_world::{CraftingEngine, SlotAddress, CRAFTING_OUTPUT_INDEX};
use proptest::prelude::*;

fn item_strategy() -> impl Strategy<Value = ItemType> {
    prop::sample::select(vec![
        ItemType::Dirt,
        ItemType::WoodLog,
        ItemType::WoodPlanks,
        ItemType::Stick,
        ItemType::Coal,
        ItemType::Egg,
        ItemType::WhiteWool,
        ItemType::StonePickaxe,
        ItemType::IronSword,
    ])
}

/// One prefill entry. Counts stay within a stack (two for tools), so twelve
/// entries occupy at most 24 of the 36 storage slots.
fn entry_strategy() -> impl Strategy<Value = (ItemType, u32)> {
    item_strategy().prop_flat_map(|item| {
        let props = item.properties();
        let limit = if props.is_tool {
            2
        } else {
            u32::from(props.max_stack_size)
        };
        (Just(item), 1u32..=limit)
    })
}

fn kind_strategy() -> impl Strategy<Value = ClickKind> {
    prop_oneof![
        Just(ClickKind::Left),
        Just(ClickKind::Right),
        Just(ClickKind::ShiftLeft),
    ]
}

proptest! {
    /// Property: clicks away from the output conserve items and canonical form
    #[test]
    fn clicks_conserve_items(
        items in prop::collection::vec(entry_strategy(), 0..12),
        clicks in prop::collection::vec((0usize..CRAFTING_OUTPUT_INDEX, kind_strategy()), 0..80),
    ) {
        let db = RecipeDatabase::with_defaults();
        let controller = SlotController::new(CraftingEngine::new(&db), SlotLayout::default());
        let mut inv = inventory_with(&items);
        let expected = item_totals(&inv);

        for (global, kind) in clicks {
            let addr = SlotAddress::from_global(global).unwrap();
            controller.click(&mut inv, addr, kind);
            assert_canonical(&inv);
            prop_assert_eq!(&item_totals(&inv), &expected);
        }
    }

    /// Property: the output always mirrors the grid after any click
    #[test]
    fn output_tracks_grid(
        items in prop::collection::vec(entry_strategy(), 1..12),
        clicks in prop::collection::vec((0usize..CRAFTING_OUTPUT_INDEX, kind_strategy()), 0..60),
    ) {
        let db = RecipeDatabase::with_defaults();
        let engine = CraftingEngine::new(&db);
        let controller = SlotController::new(engine, SlotLayout::default());
        let mut inv = inventory_with(&items);

        for (global, kind) in clicks {
            controller.click(&mut inv, SlotAddress::from_global(global).unwrap(), kind);
            let mut recomputed = inv.clone();
            engine.update_output(&mut recomputed);
            prop_assert_eq!(recomputed.crafting_output(), inv.crafting_output());
        }
    }
}
