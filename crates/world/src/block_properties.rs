//! Block properties - hardness, tool requirements, dig time

use blockcraft_core::{BlockType, ItemType, ToolType};

/// Mining-related properties of a block type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockProperties {
    /// Base dig time in seconds; negative means unbreakable
    pub hardness: f32,

    /// Whether a matching tool is needed to get a drop
    pub requires_tool: bool,

    /// Tool type that speeds up digging
    pub preferred_tool: ToolType,
}

impl BlockProperties {
    const fn new(hardness: f32, requires_tool: bool, preferred_tool: ToolType) -> Self {
        Self {
            hardness,
            requires_tool,
            preferred_tool,
        }
    }

    /// Properties for `block`.
    pub fn of(block: BlockType) -> Self {
        use BlockType::*;
        use ToolType::{Axe, Pickaxe, Shovel};

        match block {
            Air | Torch => Self::new(0.0, false, ToolType::None),
            Bedrock | Water | Lava => Self::new(-1.0, false, ToolType::None),
            Stone => Self::new(1.5, true, Pickaxe),
            Cobblestone => Self::new(2.0, true, Pickaxe),
            CoalOre | IronOre | DiamondOre => Self::new(3.0, true, Pickaxe),
            Furnace => Self::new(3.5, true, Pickaxe),
            Grass => Self::new(0.6, false, Shovel),
            Dirt | Sand => Self::new(0.5, false, Shovel),
            Gravel => Self::new(0.6, false, Shovel),
            WoodLog | WoodPlanks => Self::new(2.0, false, Axe),
            CraftingTable | Chest => Self::new(2.5, false, Axe),
            Leaves | WhiteBed => Self::new(0.2, false, ToolType::None),
            Glass => Self::new(0.3, false, ToolType::None),
            WhiteWool => Self::new(0.8, false, ToolType::None),
        }
    }

    /// Whether no tool can ever break this block
    pub fn is_unbreakable(&self) -> bool {
        self.hardness < 0.0
    }

    /// Whether `tool` is a tool of this block's preferred type
    pub fn is_preferred_tool(&self, tool: ItemType) -> bool {
        let props = tool.properties();
        props.is_tool
            && self.preferred_tool != ToolType::None
            && props.tool_type == self.preferred_tool
    }
}

/// How long a block takes to dig.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DigTime {
    /// Cannot be dug at all.
    Unbreakable,
    /// Breaks on the first hit.
    Instant,
    /// Breaks after this many seconds.
    Seconds(f32),
}

/// Dig time of `block` with `tool` in hand (`ItemType::None` for bare hands).
///
/// The tool's dig speed only applies when it is the block's preferred tool.
pub fn calculate_dig_time(block: BlockType, tool: ItemType) -> DigTime {
    let props = BlockProperties::of(block);
    if props.is_unbreakable() {
        return DigTime::Unbreakable;
    }
    if props.hardness == 0.0 {
        return DigTime::Instant;
    }

    let speed = if props.is_preferred_tool(tool) {
        tool.properties().dig_speed
    } else {
        1.0
    };
    DigTime::Seconds(props.hardness / speed)
}

/// Whether digging `block` with `tool` yields its drop.
pub fn can_harvest_block(block: BlockType, tool: ItemType) -> bool {
    let props = BlockProperties::of(block);
    !props.requires_tool || props.is_preferred_tool(tool)
}
