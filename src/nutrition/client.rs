use crate::config::NutritionConfig;
use crate::error::NutritionError;
use crate::model::NutritionInfo;
use log::{debug, error, warn};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;

/// Body of a create request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewIngredient {
    pub name: String,
    pub carbs: f64,
    pub fat: f64,
    pub protein: f64,
}

impl NewIngredient {
    pub fn new(name: impl Into<String>, nutrition: NutritionInfo) -> Self {
        NewIngredient {
            name: name.into(),
            carbs: nutrition.carbs,
            fat: nutrition.fat,
            protein: nutrition.protein,
        }
    }

    pub fn nutrition(&self) -> NutritionInfo {
        NutritionInfo::new(self.carbs, self.fat, self.protein)
    }
}

/// HTTP client for the remote ingredient catalog
pub struct NutritionClient {
    client: Client,
    base_url: String,
}

impl NutritionClient {
    /// Create a new client from configuration
    pub fn new(config: &NutritionConfig) -> Result<Self, NutritionError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(NutritionClient {
            client: builder.build()?,
            base_url: config.base_url.clone(),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        NutritionClient {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/ingredients", self.base_url.trim_end_matches('/'))
    }

    /// Fetch nutrition information for an ingredient
    pub async fn lookup(&self, name: &str) -> Result<NutritionInfo, NutritionError> {
        let response = self
            .client
            .get(self.endpoint())
            .query(&[("ingredient", name)])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            warn!("Ingredient not found (404): {}", name);
            return Err(NutritionError::NotFound(name.to_string()));
        }
        if !status.is_success() {
            error!("Failed to fetch nutrition info for '{}': {}", name, status);
            return Err(NutritionError::UnexpectedStatus(status));
        }

        // A body cut off mid-stream is a transport failure, a complete but bad body is not
        let bytes = response.bytes().await.map_err(transport_error)?;
        let body: Value = serde_json::from_slice(&bytes)
            .map_err(|e| NutritionError::InvalidResponse(e.to_string()))?;
        debug!("{:?}", body);

        parse_nutrition(&body)
    }

    /// Add a new ingredient to the catalog
    pub async fn create(&self, ingredient: &NewIngredient) -> Result<(), NutritionError> {
        let response = self
            .client
            .post(self.endpoint())
            .json(ingredient)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            error!("Failed to add ingredient '{}': {}", ingredient.name, status);
            return Err(NutritionError::CreateRejected(status));
        }

        debug!("Created ingredient '{}'", ingredient.name);
        Ok(())
    }

    /// Look the ingredient up; when the catalog does not have it, add it and fetch again
    pub async fn get_or_add(
        &self,
        ingredient: &NewIngredient,
    ) -> Result<NutritionInfo, NutritionError> {
        match self.lookup(&ingredient.name).await {
            Err(NutritionError::NotFound(_)) => {
                self.create(ingredient).await?;
                self.lookup(&ingredient.name).await
            }
            other => other,
        }
    }
}

/// Any failure without an HTTP response is a connectivity problem, except a request that could not be built
fn transport_error(e: reqwest::Error) -> NutritionError {
    if e.is_builder() {
        NutritionError::Request(e)
    } else {
        NutritionError::Unreachable(e)
    }
}

/// Validate a lookup payload
///
/// Fields may be JSON numbers or numeric strings. Anything that does not
/// coerce to a finite, non-negative number makes the whole payload invalid.
pub(crate) fn parse_nutrition(body: &Value) -> Result<NutritionInfo, NutritionError> {
    if !body.is_object() {
        return Err(NutritionError::InvalidResponse(format!(
            "expected an object, got {}",
            body
        )));
    }

    Ok(NutritionInfo {
        carbs: coerce_field(body, "carbs")?,
        fat: coerce_field(body, "fat")?,
        protein: coerce_field(body, "protein")?,
    })
}

fn coerce_field(body: &Value, field: &str) -> Result<f64, NutritionError> {
    let value = match body.get(field) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if s.trim().is_empty() => Some(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match value {
        Some(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(NutritionError::InvalidResponse(format!(
            "field '{}' is not a non-negative number: {}",
            field,
            body.get(field).unwrap_or(&Value::Null)
        ))),
    }
}
