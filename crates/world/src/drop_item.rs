//! Block drop table: what a broken block leaves behind.

use blockcraft_core::{BlockType, ItemStack, ItemType};

/// `(block, item, count)`; the first entry for a block wins.
static DROP_TABLE: &[(BlockType, ItemType, u8)] = &[
    (BlockType::Stone, ItemType::Cobblestone, 1),
    (BlockType::Grass, ItemType::Dirt, 1),
    (BlockType::Dirt, ItemType::Dirt, 1),
    (BlockType::Cobblestone, ItemType::Cobblestone, 1),
    (BlockType::WoodLog, ItemType::WoodLog, 1),
    (BlockType::WoodPlanks, ItemType::WoodPlanks, 1),
    (BlockType::Leaves, ItemType::None, 0),
    (BlockType::Sand, ItemType::Sand, 1),
    (BlockType::Gravel, ItemType::Gravel, 1),
    (BlockType::Glass, ItemType::None, 0),
    (BlockType::Bedrock, ItemType::None, 0),
    (BlockType::Water, ItemType::None, 0),
    (BlockType::Lava, ItemType::None, 0),
    (BlockType::CoalOre, ItemType::Coal, 1),
    (BlockType::IronOre, ItemType::IronOre, 1),
    (BlockType::DiamondOre, ItemType::Diamond, 1),
    (BlockType::CraftingTable, ItemType::CraftingTable, 1),
    (BlockType::Furnace, ItemType::Furnace, 1),
    (BlockType::Chest, ItemType::Chest, 1),
    (BlockType::WhiteWool, ItemType::WhiteWool, 1),
    (BlockType::WhiteBed, ItemType::WhiteBed, 1),
    (BlockType::Torch, ItemType::Torch, 1),
];

/// Stack dropped when `block` is broken, or an empty stack if nothing drops.
pub fn get_block_drop(block: BlockType) -> ItemStack {
    DROP_TABLE
        .iter()
        .find(|(source, _, _)| *source == block)
        .map(|&(_, item, count)| ItemStack::new(item, count))
        .unwrap_or(ItemStack::EMPTY)
}
