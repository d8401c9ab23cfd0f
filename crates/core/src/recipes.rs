//! Recipe database: built once at start-up, read-only afterwards.
//!
//! Recipes are kept in registration order, which is the tie-break when more
//! than one recipe accepts the same grid. Extra recipes can be appended from
//! JSON recipe packs.

use crate::crafting::{CraftingPattern, CraftingRecipe, RecipeKind, GRID_SIZE, GRID_WIDTH};
use crate::item::ItemType;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

/// Default capacity of a recipe database.
pub const MAX_RECIPES: usize = 128;

static GLOBAL_RECIPES: OnceLock<RecipeDatabase> = OnceLock::new();

/// Errors emitted while loading recipe packs.
#[derive(Debug, Error)]
pub enum RecipeError {
    /// Wrap IO errors when reading packs.
    #[error("failed to read recipe pack: {0}")]
    Io(#[from] std::io::Error),
    /// Wrap serde parsing issues.
    #[error("failed to parse recipe pack: {0}")]
    Parse(#[from] serde_json::Error),
    /// A recipe definition is structurally invalid.
    #[error("invalid recipe #{index}: {reason}")]
    Invalid {
        /// Position of the definition in the pack.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum RecipeDefinition {
    Shaped {
        pattern: Vec<String>,
        key: BTreeMap<String, ItemType>,
        output: ItemType,
        #[serde(default = "default_count")]
        count: u8,
    },
    Shapeless {
        ingredients: Vec<ItemType>,
        output: ItemType,
        #[serde(default = "default_count")]
        count: u8,
    },
}

fn default_count() -> u8 {
    1
}

impl RecipeDefinition {
    fn into_recipe(self, index: usize) -> Result<CraftingRecipe, RecipeError> {
        let invalid = |reason: String| RecipeError::Invalid { index, reason };

        let (kind, inputs, output, count) = match self {
            RecipeDefinition::Shaped {
                pattern,
                key,
                output,
                count,
            } => {
                if pattern.is_empty() || pattern.len() > GRID_WIDTH {
                    return Err(invalid(format!(
                        "pattern must have 1-{GRID_WIDTH} rows, got {}",
                        pattern.len()
                    )));
                }
                let mut inputs: CraftingPattern = [ItemType::None; GRID_SIZE];
                for (row, line) in pattern.iter().enumerate() {
                    if line.chars().count() > GRID_WIDTH {
                        return Err(invalid(format!(
                            "pattern row {row} is wider than {GRID_WIDTH}"
                        )));
                    }
                    for (col, symbol) in line.chars().enumerate() {
                        if symbol == ' ' {
                            continue;
                        }
                        let item = key
                            .iter()
                            .find(|(k, _)| k.chars().eq(std::iter::once(symbol)))
                            .map(|(_, item)| *item)
                            .ok_or_else(|| {
                                invalid(format!("pattern symbol '{symbol}' has no key"))
                            })?;
                        inputs[row * GRID_WIDTH + col] = item;
                    }
                }
                (RecipeKind::Shaped, inputs, output, count)
            }
            RecipeDefinition::Shapeless {
                ingredients,
                output,
                count,
            } => {
                if ingredients.len() > GRID_SIZE {
                    return Err(invalid(format!(
                        "shapeless recipe has {} ingredients (max {GRID_SIZE})",
                        ingredients.len()
                    )));
                }
                let mut inputs: CraftingPattern = [ItemType::None; GRID_SIZE];
                for (cell, item) in inputs.iter_mut().zip(ingredients) {
                    *cell = item;
                }
                (RecipeKind::Shapeless, inputs, output, count)
            }
        };

        if output.is_none() {
            return Err(invalid("output cannot be none".to_string()));
        }
        if count == 0 {
            return Err(invalid("output count must be > 0".to_string()));
        }
        if inputs.iter().all(|item| item.is_none()) {
            return Err(invalid("recipe has no ingredients".to_string()));
        }

        Ok(CraftingRecipe {
            kind,
            inputs,
            output,
            output_count: count,
        })
    }
}

/// Append-only, fixed-capacity list of crafting recipes.
#[derive(Debug, Clone)]
pub struct RecipeDatabase {
    recipes: Vec<CraftingRecipe>,
    capacity: usize,
}

impl Default for RecipeDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeDatabase {
    /// Create an empty database with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(MAX_RECIPES)
    }

    /// Create an empty database holding at most `capacity` recipes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            recipes: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Register a recipe. Returns `false` (and logs) when the database is full
    /// or the recipe has no ingredients; the recipe is dropped in that case.
    pub fn register(&mut self, recipe: CraftingRecipe) -> bool {
        if !recipe.has_ingredients() {
            tracing::warn!(output = ?recipe.output, "ignoring recipe with no ingredients");
            return false;
        }
        if self.recipes.len() >= self.capacity {
            tracing::warn!(
                capacity = self.capacity,
                output = ?recipe.output,
                "recipe database full; dropping recipe"
            );
            return false;
        }
        self.recipes.push(recipe);
        true
    }

    /// Number of registered recipes.
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Whether no recipes are registered.
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Maximum number of recipes this database accepts.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Recipe at `index`, or `None` outside the registered range.
    pub fn get(&self, index: usize) -> Option<&CraftingRecipe> {
        self.recipes.get(index)
    }

    /// All recipes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CraftingRecipe> {
        self.recipes.iter()
    }

    /// First recipe (in registration order) that accepts the grid.
    pub fn find_match(&self, grid: &CraftingPattern) -> Option<&CraftingRecipe> {
        self.recipes.iter().find(|recipe| recipe.matches(grid))
    }

    /// First recipe producing `output`.
    pub fn find_recipe_for_output(&self, output: ItemType) -> Option<&CraftingRecipe> {
        if output.is_none() {
            return None;
        }
        self.recipes.iter().find(|recipe| recipe.output == output)
    }

    /// Append recipes from a JSON recipe pack. Returns how many were registered.
    ///
    /// The whole pack is validated before anything is registered.
    pub fn extend_from_str(&mut self, content: &str) -> Result<usize, RecipeError> {
        let definitions: Vec<RecipeDefinition> = serde_json::from_str(content)?;
        let recipes = definitions
            .into_iter()
            .enumerate()
            .map(|(index, def)| def.into_recipe(index))
            .collect::<Result<Vec<_>, _>>()?;

        let added = recipes
            .into_iter()
            .map(|recipe| self.register(recipe))
            .filter(|registered| *registered)
            .count();
        tracing::debug!(added, total = self.len(), "loaded recipe pack");
        Ok(added)
    }

    /// Append recipes from a JSON recipe pack on disk.
    pub fn extend_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, RecipeError> {
        let content = fs::read_to_string(path)?;
        self.extend_from_str(&content)
    }

    /// The process-wide database. Installs the defaults on first use if
    /// [`RecipeDatabase::install_global`] was never called.
    pub fn global() -> &'static RecipeDatabase {
        GLOBAL_RECIPES.get_or_init(RecipeDatabase::with_defaults)
    }

    /// Install the process-wide database. Fails (handing the database back)
    /// if one is already installed.
    pub fn install_global(database: RecipeDatabase) -> Result<(), RecipeDatabase> {
        GLOBAL_RECIPES.set(database)
    }

    /// Database holding the built-in recipe set.
    pub fn with_defaults() -> Self {
        use ItemType::*;

        let mut db = Self::new();
        let e = None;

        db.register(CraftingRecipe::shapeless(&[WoodLog], WoodPlanks, 4));
        db.register(CraftingRecipe::shapeless(&[WoodPlanks], Stick, 4));
        db.register(CraftingRecipe::shaped(
            &[&[WoodPlanks, WoodPlanks], &[WoodPlanks, WoodPlanks]],
            CraftingTable,
            1,
        ));
        db.register(CraftingRecipe::shaped(&[&[Coal], &[Stick]], Torch, 4));
        db.register(CraftingRecipe::shaped(
            &[&[String, String], &[String, String]],
            WhiteWool,
            1,
        ));
        db.register(CraftingRecipe::shapeless(
            &[WhiteWool, WhiteWool, WoodPlanks],
            WhiteBed,
            1,
        ));

        for (material, [pickaxe, axe, shovel, sword]) in [
            (WoodPlanks, [WoodenPickaxe, WoodenAxe, WoodenShovel, WoodenSword]),
            (Cobblestone, [StonePickaxe, StoneAxe, StoneShovel, StoneSword]),
            (IronIngot, [IronPickaxe, IronAxe, IronShovel, IronSword]),
            (Diamond, [DiamondPickaxe, DiamondAxe, DiamondShovel, DiamondSword]),
        ] {
            let m = material;
            db.register(CraftingRecipe::shaped(
                &[&[m, m, m], &[e, Stick, e], &[e, Stick, e]],
                pickaxe,
                1,
            ));
            db.register(CraftingRecipe::shaped(
                &[&[m, m], &[m, Stick], &[e, Stick]],
                axe,
                1,
            ));
            db.register(CraftingRecipe::shaped(&[&[m], &[Stick], &[Stick]], shovel, 1));
            db.register(CraftingRecipe::shaped(&[&[m], &[m], &[Stick]], sword, 1));
        }

        db.register(CraftingRecipe::shaped(
            &[
                &[Cobblestone, Cobblestone, Cobblestone],
                &[Cobblestone, e, Cobblestone],
                &[Cobblestone, Cobblestone, Cobblestone],
            ],
            Furnace,
            1,
        ));
        db.register(CraftingRecipe::shaped(
            &[
                &[WoodPlanks, WoodPlanks, WoodPlanks],
                &[WoodPlanks, e, WoodPlanks],
                &[WoodPlanks, WoodPlanks, WoodPlanks],
            ],
            Chest,
            1,
        ));

        db
    }
}
