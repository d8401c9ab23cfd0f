//! Item catalog - item identities, immutable per-type properties, and stacks.

use crate::block::BlockType;
use serde::{Deserialize, Serialize};

/// Number of item enumerants (including [`ItemType::None`]).
pub const ITEM_TYPE_COUNT: usize = 42;

/// Largest count a single stack can ever hold (storage width of `count`).
pub const MAX_COUNT: u8 = u8::MAX;

/// Item type identifier.
///
/// The discriminant doubles as the index into the static catalog, so the
/// order here must match [`CATALOG`].
#[repr(u8)]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    /// Empty sentinel.
    #[default]
    None = 0,
    /// Stone block
    Stone,
    /// Grass block
    Grass,
    /// Dirt block
    Dirt,
    /// Cobblestone block
    Cobblestone,
    /// Wood log block
    WoodLog,
    /// Wood planks block
    WoodPlanks,
    /// Leaves block
    Leaves,
    /// Sand block
    Sand,
    /// Gravel block
    Gravel,
    /// Glass block
    Glass,
    /// Coal ore block
    CoalOre,
    /// Iron ore block
    IronOre,
    /// Diamond ore block
    DiamondOre,
    /// Crafting table block
    CraftingTable,
    /// Furnace block
    Furnace,
    /// Chest block
    Chest,
    /// White wool block
    WhiteWool,
    /// White bed
    WhiteBed,
    /// Torch
    Torch,
    /// Stick
    Stick,
    /// Coal
    Coal,
    /// Iron ingot
    IronIngot,
    /// Diamond
    Diamond,
    /// String
    String,
    /// Egg (stacks to 16)
    Egg,
    /// Wooden pickaxe
    WoodenPickaxe,
    /// Wooden axe
    WoodenAxe,
    /// Wooden shovel
    WoodenShovel,
    /// Wooden sword
    WoodenSword,
    /// Stone pickaxe
    StonePickaxe,
    /// Stone axe
    StoneAxe,
    /// Stone shovel
    StoneShovel,
    /// Stone sword
    StoneSword,
    /// Iron pickaxe
    IronPickaxe,
    /// Iron axe
    IronAxe,
    /// Iron shovel
    IronShovel,
    /// Iron sword
    IronSword,
    /// Diamond pickaxe
    DiamondPickaxe,
    /// Diamond axe
    DiamondAxe,
    /// Diamond shovel
    DiamondShovel,
    /// Diamond sword
    DiamondSword,
}

/// Tool categories. Blocks name their preferred category with the same type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolType {
    /// Not a tool / no preferred tool.
    #[default]
    None,
    /// Pickaxe - mines stone, ores
    Pickaxe,
    /// Axe - chops wood
    Axe,
    /// Shovel - digs dirt, sand, gravel
    Shovel,
    /// Sword - combat weapon
    Sword,
}

/// Texture atlas cell. Only the renderer interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AtlasCoord {
    /// Column in the atlas.
    pub x: u8,
    /// Row in the atlas.
    pub y: u8,
}

/// Immutable per-type properties.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemProperties {
    /// Display name.
    pub name: &'static str,
    /// Maximum number of items in one stack (0 for the empty sentinel).
    pub max_stack_size: u8,
    /// Block placed when this item is used on the world, if any.
    pub placeable: Option<BlockType>,
    /// Whether this item is a tool (never stacks, carries durability).
    pub is_tool: bool,
    /// Tool category (`ToolType::None` for non-tools).
    pub tool_type: ToolType,
    /// Durability of a freshly crafted item (0 for non-tools).
    pub durability: u16,
    /// Dig speed multiplier applied when the tool matches a block.
    pub dig_speed: f32,
    /// Icon location in the item atlas.
    pub atlas: AtlasCoord,
}

impl ItemProperties {
    /// Whether this item can be placed as a block.
    pub fn is_placeable(&self) -> bool {
        self.placeable.is_some()
    }
}

const fn empty() -> ItemProperties {
    ItemProperties {
        name: "None",
        max_stack_size: 0,
        placeable: None,
        is_tool: false,
        tool_type: ToolType::None,
        durability: 0,
        dig_speed: 1.0,
        atlas: AtlasCoord { x: 0, y: 0 },
    }
}

const fn block(name: &'static str, target: BlockType, x: u8, y: u8) -> ItemProperties {
    ItemProperties {
        name,
        max_stack_size: 64,
        placeable: Some(target),
        is_tool: false,
        tool_type: ToolType::None,
        durability: 0,
        dig_speed: 1.0,
        atlas: AtlasCoord { x, y },
    }
}

const fn material(name: &'static str, max_stack_size: u8, x: u8, y: u8) -> ItemProperties {
    ItemProperties {
        name,
        max_stack_size,
        placeable: None,
        is_tool: false,
        tool_type: ToolType::None,
        durability: 0,
        dig_speed: 1.0,
        atlas: AtlasCoord { x, y },
    }
}

const fn tool(
    name: &'static str,
    tool_type: ToolType,
    durability: u16,
    dig_speed: f32,
    x: u8,
    y: u8,
) -> ItemProperties {
    ItemProperties {
        name,
        max_stack_size: 1,
        placeable: None,
        is_tool: true,
        tool_type,
        durability,
        dig_speed,
        atlas: AtlasCoord { x, y },
    }
}

// Tier values: wood 59/2x, stone 131/4x, iron 250/6x, diamond 1561/8x.
static CATALOG: [ItemProperties; ITEM_TYPE_COUNT] = [
    empty(),
    block("Stone", BlockType::Stone, 1, 0),
    block("Grass", BlockType::Grass, 3, 0),
    block("Dirt", BlockType::Dirt, 2, 0),
    block("Cobblestone", BlockType::Cobblestone, 0, 1),
    block("Wood Log", BlockType::WoodLog, 4, 1),
    block("Wood Planks", BlockType::WoodPlanks, 4, 0),
    block("Leaves", BlockType::Leaves, 4, 3),
    block("Sand", BlockType::Sand, 2, 1),
    block("Gravel", BlockType::Gravel, 3, 1),
    block("Glass", BlockType::Glass, 1, 3),
    block("Coal Ore", BlockType::CoalOre, 2, 2),
    block("Iron Ore", BlockType::IronOre, 1, 2),
    block("Diamond Ore", BlockType::DiamondOre, 2, 3),
    block("Crafting Table", BlockType::CraftingTable, 11, 3),
    block("Furnace", BlockType::Furnace, 12, 2),
    block("Chest", BlockType::Chest, 11, 1),
    block("White Wool", BlockType::WhiteWool, 0, 4),
    ItemProperties {
        max_stack_size: 1,
        ..block("White Bed", BlockType::WhiteBed, 6, 8)
    },
    block("Torch", BlockType::Torch, 0, 5),
    material("Stick", 64, 5, 3),
    material("Coal", 64, 7, 0),
    material("Iron Ingot", 64, 7, 1),
    material("Diamond", 64, 7, 3),
    material("String", 64, 8, 0),
    material("Egg", 16, 12, 0),
    tool("Wooden Pickaxe", ToolType::Pickaxe, 59, 2.0, 0, 6),
    tool("Wooden Axe", ToolType::Axe, 59, 2.0, 0, 7),
    tool("Wooden Shovel", ToolType::Shovel, 59, 2.0, 0, 5),
    tool("Wooden Sword", ToolType::Sword, 59, 1.5, 0, 4),
    tool("Stone Pickaxe", ToolType::Pickaxe, 131, 4.0, 1, 6),
    tool("Stone Axe", ToolType::Axe, 131, 4.0, 1, 7),
    tool("Stone Shovel", ToolType::Shovel, 131, 4.0, 1, 5),
    tool("Stone Sword", ToolType::Sword, 131, 1.5, 1, 4),
    tool("Iron Pickaxe", ToolType::Pickaxe, 250, 6.0, 2, 6),
    tool("Iron Axe", ToolType::Axe, 250, 6.0, 2, 7),
    tool("Iron Shovel", ToolType::Shovel, 250, 6.0, 2, 5),
    tool("Iron Sword", ToolType::Sword, 250, 1.5, 2, 4),
    tool("Diamond Pickaxe", ToolType::Pickaxe, 1561, 8.0, 3, 6),
    tool("Diamond Axe", ToolType::Axe, 1561, 8.0, 3, 7),
    tool("Diamond Shovel", ToolType::Shovel, 1561, 8.0, 3, 5),
    tool("Diamond Sword", ToolType::Sword, 1561, 1.5, 3, 4),
];

impl ItemType {
    /// Every item type in discriminant order.
    pub const ALL: [ItemType; ITEM_TYPE_COUNT] = [
        ItemType::None,
        ItemType::Stone,
        ItemType::Grass,
        ItemType::Dirt,
        ItemType::Cobblestone,
        ItemType::WoodLog,
        ItemType::WoodPlanks,
        ItemType::Leaves,
        ItemType::Sand,
        ItemType::Gravel,
        ItemType::Glass,
        ItemType::CoalOre,
        ItemType::IronOre,
        ItemType::DiamondOre,
        ItemType::CraftingTable,
        ItemType::Furnace,
        ItemType::Chest,
        ItemType::WhiteWool,
        ItemType::WhiteBed,
        ItemType::Torch,
        ItemType::Stick,
        ItemType::Coal,
        ItemType::IronIngot,
        ItemType::Diamond,
        ItemType::String,
        ItemType::Egg,
        ItemType::WoodenPickaxe,
        ItemType::WoodenAxe,
        ItemType::WoodenShovel,
        ItemType::WoodenSword,
        ItemType::StonePickaxe,
        ItemType::StoneAxe,
        ItemType::StoneShovel,
        ItemType::StoneSword,
        ItemType::IronPickaxe,
        ItemType::IronAxe,
        ItemType::IronShovel,
        ItemType::IronSword,
        ItemType::DiamondPickaxe,
        ItemType::DiamondAxe,
        ItemType::DiamondShovel,
        ItemType::DiamondSword,
    ];

    /// Numeric id of this item type.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Dense index for per-type tables.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Map a raw id to an item type. Unknown ids become [`ItemType::None`].
    pub fn from_id(id: u8) -> ItemType {
        Self::ALL
            .get(id as usize)
            .copied()
            .unwrap_or(ItemType::None)
    }

    /// Look up an item by its snake_case key (e.g. `wood_planks`).
    pub fn from_key(key: &str) -> Option<ItemType> {
        let key = key.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|ty| key_matches(ty.properties().name, key))
    }

    /// Whether this is the empty sentinel.
    pub fn is_none(self) -> bool {
        self == ItemType::None
    }

    /// Catalog entry for this type.
    pub fn properties(self) -> &'static ItemProperties {
        &CATALOG[self.index()]
    }
}

fn key_matches(name: &str, key: &str) -> bool {
    name.len() == key.len()
        && name.bytes().zip(key.bytes()).all(|(n, k)| {
            if n == b' ' {
                k == b'_'
            } else {
                n.to_ascii_lowercase() == k.to_ascii_lowercase()
            }
        })
}

/// Catalog lookup. Total: every type has an entry.
pub fn get_properties(item_type: ItemType) -> &'static ItemProperties {
    item_type.properties()
}

/// Catalog lookup by raw id; unknown ids resolve to the empty entry.
pub fn properties_by_id(id: u8) -> &'static ItemProperties {
    ItemType::from_id(id).properties()
}

/// Display name of an item type.
pub fn get_name(item_type: ItemType) -> &'static str {
    item_type.properties().name
}

/// Two stacks can merge when both hold the same non-tool item.
///
/// Durability is not compared: tools never stack regardless of wear.
pub fn can_stack(a: &ItemStack, b: &ItemStack) -> bool {
    !a.is_empty() && !b.is_empty() && a.item_type == b.item_type && !a.properties().is_tool
}

/// An item stack in a slot or on the cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemStack {
    /// Type of item
    pub item_type: ItemType,
    /// Quantity in stack
    pub count: u8,
    /// Remaining uses (tools only)
    pub durability: u16,
    /// Durability of a fresh item of this type (tools only)
    pub max_durability: u16,
}

impl ItemStack {
    /// The canonical empty stack.
    pub const EMPTY: ItemStack = ItemStack {
        item_type: ItemType::None,
        count: 0,
        durability: 0,
        max_durability: 0,
    };

    /// Create a stack with durability seeded from the catalog.
    ///
    /// A `None` type or a zero count yields [`ItemStack::EMPTY`].
    pub fn new(item_type: ItemType, count: u8) -> Self {
        if item_type.is_none() || count == 0 {
            return Self::EMPTY;
        }
        let durability = item_type.properties().durability;
        Self {
            item_type,
            count,
            durability,
            max_durability: durability,
        }
    }

    /// Whether this slot holds nothing.
    pub fn is_empty(&self) -> bool {
        self.item_type.is_none() || self.count == 0
    }

    /// Reset to the canonical empty form.
    pub fn clear(&mut self) {
        *self = Self::EMPTY;
    }

    /// Catalog entry for the held type.
    pub fn properties(&self) -> &'static ItemProperties {
        self.item_type.properties()
    }

    /// Maximum stack size for this item type
    pub fn max_stack_size(&self) -> u8 {
        self.properties().max_stack_size
    }

    /// How many more items fit on top of this stack.
    pub fn remaining_space(&self) -> u8 {
        self.max_stack_size().saturating_sub(self.count)
    }

    /// Whether the stack is at (or beyond) its maximum size.
    pub fn is_full(&self) -> bool {
        self.count >= self.max_stack_size()
    }

    /// A copy of this stack carrying `count` items (durability preserved).
    pub fn with_count(&self, count: u8) -> Self {
        if count == 0 || self.item_type.is_none() {
            return Self::EMPTY;
        }
        Self { count, ..*self }
    }

    /// Remove up to `amount` items, returning how many were removed.
    /// An emptied stack is reset to the canonical empty form.
    pub fn remove(&mut self, amount: u8) -> u8 {
        let removed = amount.min(self.count);
        self.count -= removed;
        if self.count == 0 {
            self.clear();
        }
        removed
    }

    /// Add up to `amount` items (bounded by the stack size), returning the
    /// amount that did not fit.
    pub fn add(&mut self, amount: u8) -> u8 {
        let added = amount.min(self.remaining_space());
        self.count += added;
        amount - added
    }

    /// Whether the empty-slot invariant holds for this stack.
    pub fn is_canonical(&self) -> bool {
        let empty_type = self.item_type.is_none();
        empty_type == (self.count == 0)
            && (!empty_type || (self.durability == 0 && self.max_durability == 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_order_matches_enum() {
        for (index, ty) in ItemType::ALL.iter().enumerate() {
            assert_eq!(ty.index(), index);
            let name = CATALOG[index].name.replace(' ', "");
            assert_eq!(name, format!("{ty:?}"), "catalog entry {index} out of order");
        }
    }

    #[test]
    fn unknown_ids_resolve_to_none() {
        assert_eq!(ItemType::from_id(200), ItemType::None);
        assert_eq!(properties_by_id(255).max_stack_size, 0);
        assert_eq!(get_name(ItemType::from_id(ITEM_TYPE_COUNT as u8)), "None");
        assert_eq!(ItemType::from_id(6), ItemType::WoodPlanks);
    }

    #[test]
    fn keys_round_trip_through_names() {
        assert_eq!(ItemType::from_key("wood_planks"), Some(ItemType::WoodPlanks));
        assert_eq!(ItemType::from_key("Wooden_Pickaxe"), Some(ItemType::WoodenPickaxe));
        assert_eq!(ItemType::from_key("string"), Some(ItemType::String));
        assert_eq!(ItemType::from_key("planks"), None);
        for ty in ItemType::ALL {
            let key = serde_json::to_value(ty).unwrap();
            assert_eq!(ItemType::from_key(key.as_str().unwrap()), Some(ty));
        }
    }

    #[test]
    fn tools_have_single_stacks_and_durability() {
        for ty in ItemType::ALL {
            let props = ty.properties();
            if props.is_tool {
                assert_eq!(props.max_stack_size, 1, "{ty:?}");
                assert!(props.durability > 0, "{ty:?}");
                assert_ne!(props.tool_type, ToolType::None, "{ty:?}");
            } else {
                assert_eq!(props.durability, 0, "{ty:?}");
            }
        }
    }

    #[test]
    fn test_item_stack_new_seeds_durability() {
        let pick = ItemStack::new(ItemType::IronPickaxe, 1);
        assert_eq!(pick.durability, 250);
        assert_eq!(pick.max_durability, 250);

        let dirt = ItemStack::new(ItemType::Dirt, 10);
        assert_eq!(dirt.durability, 0);
        assert_eq!(dirt.max_stack_size(), 64);

        assert_eq!(ItemStack::new(ItemType::None, 5), ItemStack::EMPTY);
        assert_eq!(ItemStack::new(ItemType::Dirt, 0), ItemStack::EMPTY);
    }

    #[test]
    fn test_can_stack() {
        let dirt_a = ItemStack::new(ItemType::Dirt, 3);
        let dirt_b = ItemStack::new(ItemType::Dirt, 60);
        let sand = ItemStack::new(ItemType::Sand, 1);
        let pick_a = ItemStack::new(ItemType::WoodenPickaxe, 1);
        let mut pick_b = pick_a;
        assert!(can_stack(&dirt_a, &dirt_b));
        assert!(!can_stack(&dirt_a, &sand));
        assert!(!can_stack(&dirt_a, &ItemStack::EMPTY));
        assert!(!can_stack(&ItemStack::EMPTY, &ItemStack::EMPTY));
        assert!(!can_stack(&pick_a, &pick_b));
        pick_b.durability = 10;
        assert!(!can_stack(&pick_a, &pick_b));
    }

    #[test]
    fn test_stack_add_remove() {
        let mut stack = ItemStack::new(ItemType::Egg, 10);
        assert_eq!(stack.add(10), 4);
        assert_eq!(stack.count, 16);
        assert!(stack.is_full());

        assert_eq!(stack.remove(20), 16);
        assert_eq!(stack, ItemStack::EMPTY);
        assert!(stack.is_canonical());
    }

    #[test]
    fn placeable_blocks_point_at_their_block() {
        assert_eq!(ItemType::Dirt.properties().placeable, Some(BlockType::Dirt));
        assert!(ItemType::Torch.properties().is_placeable());
        assert!(!ItemType::Stick.properties().is_placeable());
    }
}
