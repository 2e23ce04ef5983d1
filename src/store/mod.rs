mod storage;

pub use storage::{FileStorage, MemoryStorage, Storage};

use log::{debug, warn};

use crate::error::StoreError;
use crate::model::Recipe;

/// Slot holding the serialized recipe collection
pub const RECIPES_KEY: &str = "recipes";

/// Slot receiving unparsable collection contents before they are overwritten
pub const RECIPES_BACKUP_KEY: &str = "recipes.bak";

/// The persisted recipe collection
///
/// Every mutation reads the collection, changes it and writes the whole
/// collection back in one `Storage::write`. There is a single writer.
pub struct RecipeStore<S: Storage> {
    storage: S,
}

impl<S: Storage> RecipeStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// All stored recipes in order; absent or unparsable content is an empty collection
    pub fn load_all(&self) -> Vec<Recipe> {
        self.parse_slot().unwrap_or_default()
    }

    /// Parsed collection, or the raw contents when they do not parse
    fn parse_slot(&self) -> Result<Vec<Recipe>, String> {
        let Some(contents) = self.storage.read(RECIPES_KEY) else {
            return Ok(Vec::new());
        };

        serde_json::from_str(&contents).map_err(|e| {
            warn!("Stored recipes could not be parsed, treating as empty: {}", e);
            contents
        })
    }

    /// Collection to mutate; unparsable contents are copied to the backup slot first
    fn load_for_write(&mut self) -> Result<Vec<Recipe>, StoreError> {
        match self.parse_slot() {
            Ok(recipes) => Ok(recipes),
            Err(contents) => {
                warn!(
                    "Overwriting unparsable recipes slot, previous contents kept in '{}'",
                    RECIPES_BACKUP_KEY
                );
                self.storage.write(RECIPES_BACKUP_KEY, &contents)?;
                Ok(Vec::new())
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<Recipe> {
        self.load_all().into_iter().find(|r| r.id == id)
    }

    /// Replace the recipe with the same id in place, or append it
    ///
    /// A non-edit save whose id is already stored also replaces, so ids stay
    /// unique within the collection.
    pub fn save(&mut self, recipe: Recipe, is_edit: bool) -> Result<(), StoreError> {
        let mut recipes = self.load_for_write()?;

        match recipes.iter().position(|r| r.id == recipe.id) {
            Some(index) => {
                if !is_edit {
                    warn!("Recipe id '{}' already stored, replacing it", recipe.id);
                }
                debug!("Replacing recipe '{}' at position {}", recipe.id, index);
                recipes[index] = recipe;
            }
            None => {
                debug!("Appending recipe '{}'", recipe.id);
                recipes.push(recipe);
            }
        }

        self.write_all(&recipes)
    }

    /// Remove the recipe with this id; unknown ids are ignored
    pub fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let mut recipes = self.load_for_write()?;
        let before = recipes.len();
        recipes.retain(|r| r.id != id);

        if recipes.len() == before {
            debug!("No recipe '{}' to delete", id);
            return Ok(());
        }
        self.write_all(&recipes)
    }

    fn write_all(&mut self, recipes: &[Recipe]) -> Result<(), StoreError> {
        let contents = serde_json::to_string(recipes)?;
        self.storage.write(RECIPES_KEY, &contents)
    }
}
