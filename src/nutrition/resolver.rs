use std::fmt;

use log::{debug, info, warn};

use crate::error::NutritionError;
use crate::model::{IngredientName, NutritionInfo};
use crate::nutrition::client::{NewIngredient, NutritionClient};
use crate::nutrition::input::InputProvider;

/// Shown before the manual entry prompt when the catalog lacks an ingredient
pub const NOT_FOUND_GUIDANCE: &str = "Nutritional info is not present. Please add the info.";

/// Why a resolution ended without nutrition data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    InvalidInput,
    CreateFailed,
    NetworkUnreachable,
    Unknown,
}

impl FailureReason {
    /// Notification text for the user
    pub fn message(&self) -> &'static str {
        match self {
            FailureReason::InvalidInput => "Invalid nutrition values.",
            FailureReason::CreateFailed => "Failed to add ingredient.",
            FailureReason::NetworkUnreachable => {
                "Could not connect to the nutrition API. Please check your internet connection or try again later."
            }
            FailureReason::Unknown => "Failed to fetch nutrition information. Please try again.",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FailureReason::InvalidInput => "invalid-input",
            FailureReason::CreateFailed => "create-failed",
            FailureReason::NetworkUnreachable => "network-unreachable",
            FailureReason::Unknown => "unknown",
        })
    }
}

/// Terminal state of one `resolve` call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// The catalog already had the ingredient
    Found(NutritionInfo),
    /// The user supplied values and the catalog accepted them
    Created(NutritionInfo),
    Failed(FailureReason),
}

impl Outcome {
    /// Nutrition to attach to the ingredient, if any
    pub fn nutrition(&self) -> Option<NutritionInfo> {
        match self {
            Outcome::Found(info) | Outcome::Created(info) => Some(*info),
            Outcome::Failed(_) => None,
        }
    }

    /// Notification to show for this outcome; a plain lookup hit shows none
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Outcome::Found(_) => None,
            Outcome::Created(_) => Some("Ingredient added!"),
            Outcome::Failed(reason) => Some(reason.message()),
        }
    }
}

/// Looks an ingredient up and, when the catalog lacks it, asks the user and creates it
///
/// Every remote call is attempted once; nothing is retried.
pub struct NutritionResolver {
    client: NutritionClient,
}

impl NutritionResolver {
    pub fn new(client: NutritionClient) -> Self {
        Self { client }
    }

    pub async fn resolve(&self, name: &IngredientName, input: &mut dyn InputProvider) -> Outcome {
        debug!("Resolving nutrition for '{}'", name);

        match self.client.lookup(name.as_str()).await {
            Ok(info) => Outcome::Found(info),
            Err(NutritionError::NotFound(_)) => self.supply_and_create(name, input).await,
            Err(NutritionError::Unreachable(e)) => {
                warn!("Nutrition API unreachable: {}", e);
                Outcome::Failed(FailureReason::NetworkUnreachable)
            }
            Err(e) => {
                warn!("Failed to fetch nutrition info for '{}': {}", name, e);
                Outcome::Failed(FailureReason::Unknown)
            }
        }
    }

    async fn supply_and_create(
        &self,
        name: &IngredientName,
        input: &mut dyn InputProvider,
    ) -> Outcome {
        input.notify(NOT_FOUND_GUIDANCE);

        let Some(values) = input.nutrition_values(name.as_str()).parse() else {
            return Outcome::Failed(FailureReason::InvalidInput);
        };

        let ingredient = NewIngredient::new(name.as_str(), values);
        if let Err(e) = self.client.create(&ingredient).await {
            warn!("Failed to add ingredient '{}': {}", name, e);
            return Outcome::Failed(FailureReason::CreateFailed);
        }
        info!("Added '{}' to the nutrition catalog", name);

        // The catalog's own copy wins when it can be read back
        match self.client.lookup(name.as_str()).await {
            Ok(info) => Outcome::Created(info),
            Err(NutritionError::NotFound(_)) => {
                warn!("'{}' still missing after create", name);
                Outcome::Failed(FailureReason::Unknown)
            }
            Err(e) => {
                debug!("Re-fetch of '{}' failed, keeping submitted values: {}", name, e);
                Outcome::Created(values)
            }
        }
    }
}
