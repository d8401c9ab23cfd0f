#![warn(missing_docs)]
//! Core primitives shared across the workspace: the item catalog, block ids,
//! crafting recipes and the recipe database.

pub mod block;
pub mod crafting;
pub mod item;
pub mod recipes;

// Re-export commonly used types
pub use block::BlockType;
pub use crafting::{
    match_shaped, match_shapeless, CraftingPattern, CraftingRecipe, ItemCounts, RecipeKind,
    GRID_SIZE, GRID_WIDTH,
};
pub use item::{
    can_stack, get_name, get_properties, properties_by_id, ItemProperties, ItemStack, ItemType,
    ToolType,
};
pub use recipes::{RecipeDatabase, RecipeError, MAX_RECIPES};
