//! Loader for RON content files at startup.

use ron::Options;
use std::fs;
use std::path::Path;

use super::data::*;
use super::registry::ContentRegistry;

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Load a RON file containing a DataFile<T> wrapper.
fn load_data_file<T>(path: &Path) -> Result<Vec<T>, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    let data: DataFile<T> = ron_options()
        .from_str(&contents)
        .map_err(|e| ContentLoadError {
            file: file_name,
            message: format!("Parse error: {}", e),
        })?;

    Ok(data.items)
}

/// Load all content from assets/data/*.ron into a ContentRegistry.
/// Every failure is collected rather than aborting; callers backfill the
/// missing categories from built-in defaults.
pub fn load_all_content(base_path: &Path) -> (ContentRegistry, Vec<ContentLoadError>) {
    let mut registry = ContentRegistry::default();
    let mut errors = Vec::new();

    macro_rules! load_into {
        ($registry_field:expr, $file:expr, $type:ty) => {
            let path = base_path.join($file);
            match load_data_file::<$type>(&path) {
                Ok(items) => {
                    for item in items {
                        $registry_field.insert(item.id.clone(), item);
                    }
                }
                Err(e) => errors.push(e),
            }
        };
    }

    load_into!(registry.characters, "characters.ron", CharacterDef);
    load_into!(registry.enemies, "enemies.ron", EnemyDef);
    load_into!(registry.weapons, "weapons.ron", WeaponDef);
    load_into!(registry.armors, "armor.ron", ArmorDef);

    (registry, errors)
}
