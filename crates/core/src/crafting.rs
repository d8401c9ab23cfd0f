//! Crafting recipes and the two grid matchers (shaped and shapeless).

use crate::item::{ItemStack, ItemType, ITEM_TYPE_COUNT};
use serde::{Deserialize, Serialize};

/// Width (and height) of the crafting grid.
pub const GRID_WIDTH: usize = 3;

/// Number of cells in the crafting grid.
pub const GRID_SIZE: usize = GRID_WIDTH * GRID_WIDTH;

/// Row-major 3x3 arrangement of item types; `ItemType::None` marks an empty cell.
pub type CraftingPattern = [ItemType; GRID_SIZE];

/// How a recipe's inputs are compared with the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeKind {
    /// Relative layout matters; the pattern may sit anywhere in the grid.
    Shaped,
    /// Only the multiset of ingredients matters.
    Shapeless,
}

/// A crafting recipe that transforms grid contents into an output stack.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CraftingRecipe {
    /// Matching algorithm.
    pub kind: RecipeKind,
    /// Row-major inputs. For shapeless recipes only the multiset is meaningful.
    pub inputs: CraftingPattern,
    /// Item produced.
    pub output: ItemType,
    /// Number of output items produced per craft.
    pub output_count: u8,
}

impl CraftingRecipe {
    /// Build a shaped recipe from up to three rows of up to three cells,
    /// anchored at the top-left of the grid.
    pub fn shaped(rows: &[&[ItemType]], output: ItemType, output_count: u8) -> Self {
        debug_assert!(rows.len() <= GRID_WIDTH, "shaped recipe has too many rows");
        let mut inputs = [ItemType::None; GRID_SIZE];
        for (row, cells) in rows.iter().take(GRID_WIDTH).enumerate() {
            debug_assert!(cells.len() <= GRID_WIDTH, "shaped recipe row too wide");
            for (col, item) in cells.iter().take(GRID_WIDTH).enumerate() {
                inputs[row * GRID_WIDTH + col] = *item;
            }
        }
        Self {
            kind: RecipeKind::Shaped,
            inputs,
            output,
            output_count,
        }
    }

    /// Build a shapeless recipe from up to nine ingredients.
    pub fn shapeless(ingredients: &[ItemType], output: ItemType, output_count: u8) -> Self {
        debug_assert!(ingredients.len() <= GRID_SIZE, "too many shapeless ingredients");
        let mut inputs = [ItemType::None; GRID_SIZE];
        for (cell, item) in inputs.iter_mut().zip(ingredients) {
            *cell = *item;
        }
        Self {
            kind: RecipeKind::Shapeless,
            inputs,
            output,
            output_count,
        }
    }

    /// Test the grid with the matcher appropriate for this recipe's kind.
    pub fn matches(&self, grid: &CraftingPattern) -> bool {
        match self.kind {
            RecipeKind::Shaped => match_shaped(&self.inputs, grid),
            RecipeKind::Shapeless => match_shapeless(&self.inputs, grid),
        }
    }

    /// Per-type ingredient totals for one craft.
    pub fn ingredient_counts(&self) -> ItemCounts {
        ItemCounts::from_types(self.inputs.iter().copied())
    }

    /// Whether the recipe has at least one ingredient.
    pub fn has_ingredients(&self) -> bool {
        self.inputs.iter().any(|item| !item.is_none())
    }

    /// The stack one craft yields (durability seeded from the catalog).
    pub fn output_stack(&self) -> ItemStack {
        ItemStack::new(self.output, self.output_count)
    }
}

/// Dense per-type counter indexed by item discriminant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCounts([u32; ITEM_TYPE_COUNT]);

impl Default for ItemCounts {
    fn default() -> Self {
        Self([0; ITEM_TYPE_COUNT])
    }
}

impl ItemCounts {
    /// Count one unit per non-empty type.
    pub fn from_types(types: impl IntoIterator<Item = ItemType>) -> Self {
        let mut counts = Self::default();
        for ty in types {
            counts.add(ty, 1);
        }
        counts
    }

    /// Sum the counts of a sequence of stacks.
    pub fn from_stacks<'a>(stacks: impl IntoIterator<Item = &'a ItemStack>) -> Self {
        let mut counts = Self::default();
        for stack in stacks {
            counts.add(stack.item_type, stack.count as u32);
        }
        counts
    }

    /// Add `amount` units of `ty`. The empty sentinel is never counted.
    pub fn add(&mut self, ty: ItemType, amount: u32) {
        if !ty.is_none() {
            let slot = &mut self.0[ty.index()];
            *slot = slot.saturating_add(amount);
        }
    }

    /// Count for one type.
    pub fn get(&self, ty: ItemType) -> u32 {
        self.0[ty.index()]
    }

    /// Non-zero entries in discriminant order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemType, u32)> + '_ {
        ItemType::ALL
            .iter()
            .zip(self.0.iter())
            .filter(|(_, count)| **count > 0)
            .map(|(ty, count)| (*ty, *count))
    }

    /// Whether no type has a non-zero count.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|count| *count == 0)
    }
}

/// Inclusive bounding box of the occupied cells of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bounds {
    min_row: usize,
    min_col: usize,
    max_row: usize,
    max_col: usize,
}

impl Bounds {
    fn of(cells: &CraftingPattern) -> Option<Self> {
        let mut bounds: Option<Bounds> = None;
        for (index, item) in cells.iter().enumerate() {
            if item.is_none() {
                continue;
            }
            let (row, col) = (index / GRID_WIDTH, index % GRID_WIDTH);
            bounds = Some(match bounds {
                None => Bounds {
                    min_row: row,
                    min_col: col,
                    max_row: row,
                    max_col: col,
                },
                Some(b) => Bounds {
                    min_row: b.min_row.min(row),
                    min_col: b.min_col.min(col),
                    max_row: b.max_row.max(row),
                    max_col: b.max_col.max(col),
                },
            });
        }
        bounds
    }

    fn height(&self) -> usize {
        self.max_row - self.min_row + 1
    }

    fn width(&self) -> usize {
        self.max_col - self.min_col + 1
    }

    fn cell(&self, cells: &CraftingPattern, row: usize, col: usize) -> ItemType {
        cells[(self.min_row + row) * GRID_WIDTH + self.min_col + col]
    }
}

/// Shaped matching: the occupied sub-rectangles of pattern and grid must have
/// the same size and identical contents. Translation is free; rotation and
/// reflection are not attempted.
pub fn match_shaped(pattern: &CraftingPattern, grid: &CraftingPattern) -> bool {
    match (Bounds::of(pattern), Bounds::of(grid)) {
        (None, None) => true,
        (Some(p), Some(g)) => {
            if p.height() != g.height() || p.width() != g.width() {
                return false;
            }
            (0..p.height()).all(|row| {
                (0..p.width()).all(|col| p.cell(pattern, row, col) == g.cell(grid, row, col))
            })
        }
        _ => false,
    }
}

/// Shapeless matching: the per-type counts of non-empty cells must be equal.
pub fn match_shapeless(ingredients: &CraftingPattern, grid: &CraftingPattern) -> bool {
    ItemCounts::from_types(ingredients.iter().copied())
        == ItemCounts::from_types(grid.iter().copied())
}
