//! Crafting engine: keeps the crafting output in step with the grid, consumes
//! ingredients, and answers availability queries for the recipe guide.

use crate::inventory::{Inventory, StoreTarget, CRAFTING_GRID_SIZE};
use blockcraft_core::{CraftingRecipe, ItemCounts, ItemStack, ItemType, RecipeDatabase};
use tracing::debug;

/// How many crafts [`CraftingEngine::auto_place_ingredients`] should lay out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CraftAmount {
    /// At most this many (capped by what the inventory holds).
    Exactly(u32),
    /// As many as the inventory allows.
    Max,
}

/// Crafting operations over an [`Inventory`], backed by a recipe database.
#[derive(Debug, Clone, Copy)]
pub struct CraftingEngine<'r> {
    recipes: &'r RecipeDatabase,
}

impl Default for CraftingEngine<'static> {
    fn default() -> Self {
        Self::new(RecipeDatabase::global())
    }
}

impl<'r> CraftingEngine<'r> {
    /// Create an engine over `recipes`.
    pub fn new(recipes: &'r RecipeDatabase) -> Self {
        Self { recipes }
    }

    /// The recipe database in use.
    pub fn recipes(&self) -> &'r RecipeDatabase {
        self.recipes
    }

    /// Recipe matching the current grid, if any.
    pub fn current_recipe(&self, inv: &Inventory) -> Option<&'r CraftingRecipe> {
        self.recipes.find_match(&inv.crafting_pattern())
    }

    fn derived_output(&self, inv: &Inventory) -> ItemStack {
        self.current_recipe(inv)
            .map(CraftingRecipe::output_stack)
            .unwrap_or(ItemStack::EMPTY)
    }

    /// Recompute the crafting output from the grid.
    pub fn update_output(&self, inv: &mut Inventory) {
        let output = self.derived_output(inv);
        inv.set_crafting_output(output);
    }

    /// Consume one unit from every occupied grid cell and recompute the output.
    ///
    /// The match is re-derived first: if the grid no longer produces the cached
    /// output, the output is refreshed and nothing is consumed.
    pub fn try_craft(&self, inv: &mut Inventory) -> bool {
        if inv.crafting_output().is_empty() {
            return false;
        }
        let output = self.derived_output(inv);
        if output != *inv.crafting_output() {
            debug!(
                cached = ?inv.crafting_output().item_type,
                actual = ?output.item_type,
                "crafting output was stale; refusing craft"
            );
            inv.set_crafting_output(output);
            return false;
        }

        for cell in inv.crafting_grid_mut().iter_mut() {
            cell.remove(1);
        }
        self.update_output(inv);
        debug!(item = ?output.item_type, count = output.count, "crafted");
        true
    }

    /// Largest number of crafts the grid supports in one go.
    ///
    /// Limited by the smallest occupied cell, by the output's max stack size
    /// and by the 255-unit stack ceiling.
    pub fn max_craft_count(&self, inv: &Inventory) -> u8 {
        let Some(recipe) = self.current_recipe(inv) else {
            return 0;
        };
        let per_craft = recipe.output_count as u32;
        if per_craft == 0 {
            return 0;
        }

        let cell_limit = inv
            .crafting_grid()
            .iter()
            .filter(|cell| !cell.is_empty())
            .map(|cell| cell.count as u32)
            .min()
            .unwrap_or(0);
        let stack_limit = recipe.output.properties().max_stack_size as u32 / per_craft;
        let ceiling = u8::MAX as u32 / per_craft;

        cell_limit.min(stack_limit).min(ceiling).min(u8::MAX as u32) as u8
    }

    /// Craft as many times as [`CraftingEngine::max_craft_count`] allows and
    /// return the combined output. The caller deposits the stack.
    pub fn craft_all(&self, inv: &mut Inventory) -> ItemStack {
        if inv.crafting_output().is_empty() {
            return ItemStack::EMPTY;
        }
        let crafts = self.max_craft_count(inv);
        let Some(recipe) = self.current_recipe(inv).filter(|_| crafts > 0) else {
            return ItemStack::EMPTY;
        };

        let total = (crafts as u32 * recipe.output_count as u32).min(u8::MAX as u32) as u8;
        let result = ItemStack::new(recipe.output, total);

        for cell in inv.crafting_grid_mut().iter_mut() {
            cell.remove(crafts);
        }
        self.update_output(inv);
        debug!(item = ?recipe.output, crafts, total, "craft-all");
        result
    }

    /// How many times `recipe` could be crafted from hotbar, main storage and
    /// the grid combined.
    pub fn count_available_crafts(&self, inv: &Inventory, recipe: &CraftingRecipe) -> u32 {
        let available = ItemCounts::from_stacks(
            inv.hotbar()
                .iter()
                .chain(inv.main().iter())
                .chain(inv.crafting_grid().iter()),
        );
        crafts_from(&available, recipe)
    }

    /// Whether at least one craft of `recipe` is possible, counting the
    /// cursor stack as well.
    pub fn can_craft_recipe(&self, inv: &Inventory, recipe: &CraftingRecipe) -> bool {
        let mut available = ItemCounts::from_stacks(
            inv.hotbar()
                .iter()
                .chain(inv.main().iter())
                .chain(inv.crafting_grid().iter()),
        );
        let held = inv.held_item();
        available.add(held.item_type, held.count as u32);
        crafts_from(&available, recipe) >= 1
    }

    /// Clear the grid back into storage and lay out ingredients for `amount`
    /// crafts of `recipe`. Returns the number of crafts laid out.
    ///
    /// Runs against a scratch copy: if the grid cannot be returned to
    /// storage or nothing can be laid out, the inventory is left untouched.
    pub fn auto_place_ingredients(
        &self,
        inv: &mut Inventory,
        recipe: &CraftingRecipe,
        amount: CraftAmount,
    ) -> u32 {
        let mut draft = inv.clone();

        for index in 0..CRAFTING_GRID_SIZE {
            let cell = std::mem::take(&mut draft.crafting_grid_mut()[index]);
            let left = draft.store_stack(cell, StoreTarget::HotbarThenMain);
            if !left.is_empty() {
                debug!(item = ?left.item_type, "no room to clear crafting grid");
                return 0;
            }
        }

        let available = self.count_available_crafts(&draft, recipe);
        let requested = match amount {
            CraftAmount::Exactly(n) => n.min(available),
            CraftAmount::Max => available,
        };
        // Each cell holds one stack, so a craft count is bounded by the
        // smallest ingredient stack size.
        let per_cell_limit = recipe
            .inputs
            .iter()
            .filter(|item| !item.is_none())
            .map(|item| item.properties().max_stack_size as u32)
            .min()
            .unwrap_or(0);
        let crafts = requested.min(per_cell_limit);
        if crafts == 0 {
            return 0;
        }

        // Withdraw every cell before writing the grid so later cells cannot
        // pull back what earlier cells received.
        let mut layout = [ItemStack::EMPTY; CRAFTING_GRID_SIZE];
        for (cell, item) in layout.iter_mut().zip(recipe.inputs.iter()) {
            if item.is_none() {
                continue;
            }
            let taken = draft.withdraw(*item, crafts as u8);
            if taken.count as u32 != crafts {
                debug!(item = ?item, "ingredient shortfall while laying out recipe");
                return 0;
            }
            *cell = taken;
        }
        *draft.crafting_grid_mut() = layout;

        self.update_output(&mut draft);
        *inv = draft;
        debug!(output = ?recipe.output, crafts, "auto-placed ingredients");
        crafts
    }

    /// First recipe producing `output`, for the recipe guide.
    pub fn recipe_for(&self, output: ItemType) -> Option<&'r CraftingRecipe> {
        self.recipes.find_recipe_for_output(output)
    }
}

fn crafts_from(available: &ItemCounts, recipe: &CraftingRecipe) -> u32 {
    let needed = recipe.ingredient_counts();
    needed
        .iter()
        .map(|(item, per_craft)| available.get(item) / per_craft)
        .min()
        .unwrap_or(0)
}
