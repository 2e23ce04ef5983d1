//! Recipe authoring with nutrition lookups.
//!
//! Ingredients are enriched from a remote nutrition catalog through
//! [`NutritionResolver`]: a lookup that, when the catalog lacks the
//! ingredient, asks the user for values and adds it. Recipes are kept in a
//! local [`RecipeStore`].
//!
//! ```no_run
//! use recipe_nutrition::{
//!     IngredientName, NutritionClient, NutritionResolver, Outcome, TerminalInput,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = NutritionResolver::new(NutritionClient::with_base_url(
//!     "https://api.abdulhabeeb.de/api",
//! ));
//! let name = IngredientName::parse("oats")?;
//! match resolver.resolve(&name, &mut TerminalInput).await {
//!     Outcome::Found(info) | Outcome::Created(info) => println!("{}", info),
//!     Outcome::Failed(reason) => eprintln!("{}", reason.message()),
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod form;
pub mod model;
pub mod nutrition;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, NutritionError, StoreError, ValidationError};
pub use form::RecipeDraft;
pub use model::{Ingredient, IngredientName, NutritionInfo, Recipe, Unit};
pub use nutrition::{
    FailureReason, InputProvider, ManualEntry, NewIngredient, NutritionClient, NutritionResolver,
    Outcome, ScriptedInput, TerminalInput,
};
pub use store::{FileStorage, MemoryStorage, RecipeStore, Storage};
