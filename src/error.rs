use thiserror::Error;

/// A required field was missing or malformed before any remote call or write
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Ingredient name was blank
    #[error("Please enter an ingredient name first")]
    MissingIngredientName,

    /// Recipe title was blank
    #[error("Recipe title is required")]
    MissingTitle,

    /// Step at the given position (1-based) was blank
    #[error("Step {0} must not be empty")]
    EmptyStep(usize),

    /// Unit string is not one of the supported units
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    /// Ingredient argument could not be split into name, amount and unit
    #[error("Invalid ingredient '{0}', expected name:amount:unit")]
    MalformedIngredient(String),
}

/// Errors from the remote nutrition service
#[derive(Error, Debug)]
pub enum NutritionError {
    /// The service does not know this ingredient
    #[error("Ingredient not found: {0}")]
    NotFound(String),

    /// The request failed before a complete response arrived
    #[error("Could not connect to the nutrition API: {0}")]
    Unreachable(#[source] reqwest::Error),

    /// The request or client could not be built
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a status we do not handle
    #[error("Unexpected status from nutrition API: {0}")]
    UnexpectedStatus(reqwest::StatusCode),

    /// The service rejected a create request
    #[error("Nutrition API rejected the new ingredient with status {0}")]
    CreateRejected(reqwest::StatusCode),

    /// The payload did not have the expected shape
    #[error("Invalid response from nutrition API: {0}")]
    InvalidResponse(String),
}

/// Errors while persisting the recipe collection
#[derive(Error, Debug)]
pub enum StoreError {
    /// Writing the slot failed
    #[error("Failed to write storage: {0}")]
    Io(#[from] std::io::Error),

    /// The temp file could not be moved into place
    #[error("Failed to replace storage slot: {0}")]
    Persist(#[from] tempfile::PersistError),

    /// The collection could not be serialized
    #[error("Failed to serialize recipes: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Top-level error for the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Nutrition(#[from] NutritionError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// No recipe with this id is stored
    #[error("No recipe with id '{0}'")]
    RecipeNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
