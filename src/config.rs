use blockcraft_core::{ItemType, RecipeDatabase};
use blockcraft_ui::SlotLayout;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

pub const DEFAULT_SESSION_PATH: &str = "config/session.toml";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// Inventory window geometry used to resolve `click` commands.
    pub layout: SlotLayout,
    /// Optional JSON recipe pack appended after the built-in recipes.
    pub recipe_pack: Option<PathBuf>,
    /// Items given to the player when the session starts.
    pub starting_items: Vec<StartingItem>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct StartingItem {
    pub item: ItemType,
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_count() -> u32 {
    1
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            layout: SlotLayout::default(),
            recipe_pack: None,
            starting_items: Vec::new(),
        }
    }
}

impl SessionConfig {
    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<SessionConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    SessionConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_SESSION_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else {
                    tracing::debug!(
                        "Session config not found at {}. Using defaults",
                        path.display()
                    );
                }
                SessionConfig::default()
            }
        }
    }

    /// Built-in recipes plus the configured recipe pack.
    ///
    /// A pack that fails to load is logged and skipped; the defaults remain.
    pub fn build_recipe_database(&self) -> RecipeDatabase {
        let mut db = RecipeDatabase::with_defaults();
        if let Some(path) = &self.recipe_pack {
            match db.extend_from_file(path) {
                Ok(added) => {
                    tracing::info!(added, path = %path.display(), "Loaded recipe pack");
                }
                Err(err) => {
                    warn!("Failed to load recipe pack {}: {err}. Skipping", path.display());
                }
            }
        }
        db
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("blockcraft-{label}-{nanos}"));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn parses_full_config() {
        let cfg: SessionConfig = toml::from_str(
            r#"
            recipe_pack = "packs/extra.json"

            [layout]
            slot_size = 20.0
            hotbar_origin = { x = 4.0, y = 200.0 }

            [[starting_items]]
            item = "wood_log"
            count = 8

            [[starting_items]]
            item = "stone_pickaxe"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.layout.slot_size, 20.0);
        assert_eq!(cfg.layout.hotbar_origin.y, 200.0);
        assert_eq!(cfg.layout.spacing, SlotLayout::default().spacing);
        assert_eq!(cfg.recipe_pack, Some(PathBuf::from("packs/extra.json")));
        assert_eq!(
            cfg.starting_items,
            vec![
                StartingItem { item: ItemType::WoodLog, count: 8 },
                StartingItem { item: ItemType::StonePickaxe, count: 1 },
            ]
        );
    }

    #[test]
    fn invalid_config_falls_back_to_defaults() {
        let dir = temp_dir("bad-config");
        let path = dir.join("session.toml");
        fs::write(&path, "starting_items = 12").unwrap();
        assert_eq!(SessionConfig::load_from_path(&path), SessionConfig::default());
        assert_eq!(
            SessionConfig::load_from_path(&dir.join("missing.toml")),
            SessionConfig::default()
        );
    }

    #[test]
    fn recipe_pack_appends_after_defaults() {
        let dir = temp_dir("recipe-pack");
        let pack = dir.join("pack.json");
        fs::write(
            &pack,
            r#"[{"kind": "shapeless", "ingredients": ["sand", "sand"], "output": "glass", "count": 2}]"#,
        )
        .unwrap();
        let cfg = SessionConfig {
            recipe_pack: Some(pack),
            ..SessionConfig::default()
        };
        let db = cfg.build_recipe_database();
        let defaults = RecipeDatabase::with_defaults().len();
        assert_eq!(db.len(), defaults + 1);
        assert_eq!(db.get(defaults).map(|r| r.output), Some(ItemType::Glass));

        let broken = SessionConfig {
            recipe_pack: Some(dir.join("nope.json")),
            ..SessionConfig::default()
        };
        assert_eq!(broken.build_recipe_database().len(), defaults);
    }
}
