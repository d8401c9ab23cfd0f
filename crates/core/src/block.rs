//! Block identifiers referenced by items (placement targets) and the drop table.

use serde::{Deserialize, Serialize};

/// Number of block enumerants.
pub const BLOCK_TYPE_COUNT: usize = 23;

/// World block type.
#[repr(u8)]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    /// Empty space
    #[default]
    Air = 0,
    /// Stone
    Stone,
    /// Grass
    Grass,
    /// Dirt
    Dirt,
    /// Cobblestone
    Cobblestone,
    /// Wood log
    WoodLog,
    /// Wood planks
    WoodPlanks,
    /// Leaves
    Leaves,
    /// Sand
    Sand,
    /// Gravel
    Gravel,
    /// Glass
    Glass,
    /// Bedrock (unbreakable)
    Bedrock,
    /// Water (fluid)
    Water,
    /// Lava (fluid)
    Lava,
    /// Coal ore
    CoalOre,
    /// Iron ore
    IronOre,
    /// Diamond ore
    DiamondOre,
    /// Crafting table
    CraftingTable,
    /// Furnace
    Furnace,
    /// Chest
    Chest,
    /// White wool
    WhiteWool,
    /// White bed
    WhiteBed,
    /// Torch
    Torch,
}

impl BlockType {
    /// Every block type in discriminant order.
    pub const ALL: [BlockType; BLOCK_TYPE_COUNT] = [
        BlockType::Air,
        BlockType::Stone,
        BlockType::Grass,
        BlockType::Dirt,
        BlockType::Cobblestone,
        BlockType::WoodLog,
        BlockType::WoodPlanks,
        BlockType::Leaves,
        BlockType::Sand,
        BlockType::Gravel,
        BlockType::Glass,
        BlockType::Bedrock,
        BlockType::Water,
        BlockType::Lava,
        BlockType::CoalOre,
        BlockType::IronOre,
        BlockType::DiamondOre,
        BlockType::CraftingTable,
        BlockType::Furnace,
        BlockType::Chest,
        BlockType::WhiteWool,
        BlockType::WhiteBed,
        BlockType::Torch,
    ];

    /// Numeric id of this block.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Map a raw id to a block. Unknown ids become [`BlockType::Air`].
    pub fn from_id(id: u8) -> BlockType {
        Self::ALL.get(id as usize).copied().unwrap_or(BlockType::Air)
    }

    /// Stable snake_case key (e.g. `coal_ore`).
    pub fn key(self) -> &'static str {
        match self {
            BlockType::Air => "air",
            BlockType::Stone => "stone",
            BlockType::Grass => "grass",
            BlockType::Dirt => "dirt",
            BlockType::Cobblestone => "cobblestone",
            BlockType::WoodLog => "wood_log",
            BlockType::WoodPlanks => "wood_planks",
            BlockType::Leaves => "leaves",
            BlockType::Sand => "sand",
            BlockType::Gravel => "gravel",
            BlockType::Glass => "glass",
            BlockType::Bedrock => "bedrock",
            BlockType::Water => "water",
            BlockType::Lava => "lava",
            BlockType::CoalOre => "coal_ore",
            BlockType::IronOre => "iron_ore",
            BlockType::DiamondOre => "diamond_ore",
            BlockType::CraftingTable => "crafting_table",
            BlockType::Furnace => "furnace",
            BlockType::Chest => "chest",
            BlockType::WhiteWool => "white_wool",
            BlockType::WhiteBed => "white_bed",
            BlockType::Torch => "torch",
        }
    }

    /// Parse a block key (case-insensitive).
    pub fn from_key(key: &str) -> Option<BlockType> {
        let key = key.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|block| block.key().eq_ignore_ascii_case(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_and_keys_are_consistent() {
        for (index, block) in BlockType::ALL.iter().enumerate() {
            assert_eq!(block.id() as usize, index);
            assert_eq!(BlockType::from_id(block.id()), *block);
            assert_eq!(BlockType::from_key(block.key()), Some(*block));
            let serialized = serde_json::to_value(block).unwrap();
            assert_eq!(serialized.as_str(), Some(block.key()));
        }
        assert_eq!(BlockType::from_id(250), BlockType::Air);
        assert_eq!(BlockType::from_key("obsidian"), None);
    }
}
