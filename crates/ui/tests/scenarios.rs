//! End-to-end crafting scenarios driven through the click controller.

use blockcraft_core::{ItemStack, ItemType, RecipeDatabase};
use blockcraft_testkit::{addr, assert_canonical, fill_grid, inventory_with, item_totals};
use blockcraft_ui::{ClickKind, ClickOutcome, SlotController, SlotLayout};
use blockcraft_world::{CraftAmount, CraftingEngine, Inventory, Section, SlotAddress};

#[test]
fn log_to_planks_to_pickaxe() {
    let db = RecipeDatabase::with_defaults();
    let engine = CraftingEngine::new(&db);
    let controller = SlotController::new(engine, SlotLayout::default());
    let mut inv = inventory_with(&[(ItemType::WoodLog, 3)]);

    // Log into the grid, craft all planks out.
    controller.click(&mut inv, addr(Section::Hotbar, 0), ClickKind::Left);
    controller.click(&mut inv, addr(Section::CraftingGrid, 4), ClickKind::Left);
    assert_eq!(
        controller.click(&mut inv, SlotAddress::OUTPUT, ClickKind::ShiftLeft),
        ClickOutcome::Changed
    );
    assert_eq!(inv.count_item(ItemType::WoodPlanks), 12);

    // One plank makes four sticks.
    let planks = engine.recipe_for(ItemType::Stick).unwrap();
    assert_eq!(engine.auto_place_ingredients(&mut inv, planks, CraftAmount::Exactly(1)), 1);
    controller.click(&mut inv, SlotAddress::OUTPUT, ClickKind::ShiftLeft);
    assert_eq!(inv.count_item(ItemType::Stick), 4);

    let pickaxe = engine.recipe_for(ItemType::WoodenPickaxe).unwrap();
    assert_eq!(engine.auto_place_ingredients(&mut inv, pickaxe, CraftAmount::Exactly(1)), 1);
    assert_eq!(inv.crafting_output().item_type, ItemType::WoodenPickaxe);
    controller.click(&mut inv, SlotAddress::OUTPUT, ClickKind::Left);

    assert_eq!(inv.held_item().item_type, ItemType::WoodenPickaxe);
    assert_eq!(inv.held_item().durability, 59);
    assert_eq!(inv.count_item(ItemType::WoodPlanks), 8);
    assert_eq!(inv.count_item(ItemType::Stick), 2);
    assert_canonical(&inv);
}

#[test]
fn pickaxe_matches_top_left_and_bottom_right() {
    let db = RecipeDatabase::with_defaults();
    let engine = CraftingEngine::new(&db);
    let p = ItemType::WoodPlanks;
    let s = ItemType::Stick;

    let mut inv = Inventory::new();
    fill_grid(&mut inv, &engine, &[(0, p, 1), (1, p, 1), (2, p, 1), (4, s, 1), (7, s, 1)]);
    assert_eq!(inv.crafting_output().item_type, ItemType::WoodenPickaxe);

    // A two-wide axe shifted one column right still matches.
    let mut inv = Inventory::new();
    fill_grid(&mut inv, &engine, &[(1, p, 1), (2, p, 1), (4, p, 1), (5, s, 1), (8, s, 1)]);
    assert_eq!(inv.crafting_output().item_type, ItemType::WoodenAxe);
}

#[test]
fn bed_from_any_three_cells() {
    let db = RecipeDatabase::with_defaults();
    let engine = CraftingEngine::new(&db);
    let w = ItemType::WhiteWool;
    let p = ItemType::WoodPlanks;

    for cells in [[0, 1, 3], [8, 2, 6], [4, 5, 0], [7, 3, 1]] {
        let mut inv = Inventory::new();
        fill_grid(&mut inv, &engine, &[(cells[0], w, 1), (cells[1], w, 1), (cells[2], p, 1)]);
        assert_eq!(*inv.crafting_output(), ItemStack::new(ItemType::WhiteBed, 1), "{cells:?}");
    }
}

#[test]
fn shift_click_sticks_into_empty_inventory() {
    let db = RecipeDatabase::with_defaults();
    let engine = CraftingEngine::new(&db);
    let controller = SlotController::new(engine, SlotLayout::default());
    let mut inv = Inventory::new();
    fill_grid(&mut inv, &engine, &[(0, ItemType::WoodPlanks, 1)]);
    let before = item_totals(&inv);
    assert_eq!(before.get(&ItemType::WoodPlanks), Some(&1));

    controller.click(&mut inv, SlotAddress::OUTPUT, ClickKind::ShiftLeft);
    assert_eq!(inv.hotbar()[0], ItemStack::new(ItemType::Stick, 4));
    assert!(inv.crafting_grid()[0].is_empty());
    assert_eq!(item_totals(&inv).get(&ItemType::WoodPlanks), None);
}

#[test]
fn pointer_drag_of_tool_into_grid_and_back() {
    let db = RecipeDatabase::with_defaults();
    let controller = SlotController::new(CraftingEngine::new(&db), SlotLayout::default());
    let mut inv = inventory_with(&[(ItemType::IronAxe, 1)]);
    let layout = controller.layout().clone();

    let hotbar = layout.slot_rect(addr(Section::Hotbar, 0)).center();
    let grid = layout.slot_rect(addr(Section::CraftingGrid, 8)).center();
    controller.handle_pointer(&mut inv, hotbar, ClickKind::Left);
    controller.handle_pointer(&mut inv, grid, ClickKind::Left);
    assert_eq!(inv.crafting_grid()[8].item_type, ItemType::IronAxe);
    assert!(inv.crafting_output().is_empty());

    controller.handle_pointer(&mut inv, grid, ClickKind::ShiftLeft);
    assert_eq!(inv.hotbar()[0].item_type, ItemType::IronAxe);
    assert_eq!(inv.hotbar()[0].durability, 250);
    assert_canonical(&inv);
}
