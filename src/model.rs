use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Macro content of an ingredient, in the unit the nutrition service uses
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionInfo {
    pub carbs: f64,
    pub fat: f64,
    pub protein: f64,
}

impl NutritionInfo {
    pub fn new(carbs: f64, fat: f64, protein: f64) -> Self {
        Self {
            carbs,
            fat,
            protein,
        }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl Add for NutritionInfo {
    type Output = NutritionInfo;

    fn add(self, other: NutritionInfo) -> NutritionInfo {
        NutritionInfo {
            carbs: self.carbs + other.carbs,
            fat: self.fat + other.fat,
            protein: self.protein + other.protein,
        }
    }
}

impl AddAssign for NutritionInfo {
    fn add_assign(&mut self, other: NutritionInfo) {
        *self = *self + other;
    }
}

impl fmt::Display for NutritionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "carbs {}g, fat {}g, protein {}g",
            self.carbs, self.fat, self.protein
        )
    }
}

/// Measurement unit of an ingredient amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    G,
    Kg,
    Ml,
    L,
    Tsp,
    Tbsp,
    Cup,
    Piece,
    Slice,
    /// No unit selected
    #[default]
    #[serde(rename = "")]
    None,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::G => "g",
            Unit::Kg => "kg",
            Unit::Ml => "ml",
            Unit::L => "l",
            Unit::Tsp => "tsp",
            Unit::Tbsp => "tbsp",
            Unit::Cup => "cup",
            Unit::Piece => "piece",
            Unit::Slice => "slice",
            Unit::None => "",
        }
    }
}

impl FromStr for Unit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "g" => Ok(Unit::G),
            "kg" => Ok(Unit::Kg),
            "ml" => Ok(Unit::Ml),
            "l" => Ok(Unit::L),
            "tsp" => Ok(Unit::Tsp),
            "tbsp" => Ok(Unit::Tbsp),
            "cup" => Ok(Unit::Cup),
            "piece" => Ok(Unit::Piece),
            "slice" => Ok(Unit::Slice),
            "" => Ok(Unit::None),
            other => Err(ValidationError::UnknownUnit(other.to_string())),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ingredient name that has passed the blank check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientName(String);

impl IngredientName {
    pub fn parse(name: &str) -> Result<Self, ValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingIngredientName);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IngredientName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub unit: Unit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<NutritionInfo>,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, amount: impl Into<String>, unit: Unit) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
            unit,
            nutrition: None,
        }
    }
}

impl FromStr for Ingredient {
    type Err = ValidationError;

    /// Parse `name:amount:unit`; amount and unit may be left out
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let name = parts.next().unwrap_or_default().trim();
        if name.is_empty() {
            return Err(ValidationError::MalformedIngredient(s.to_string()));
        }
        let amount = parts.next().unwrap_or_default().trim();
        let unit = parts.next().unwrap_or_default().parse()?;
        Ok(Ingredient::new(name, amount, unit))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub steps: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Recipe {
    /// Sum of the nutrition of every ingredient that has it attached
    pub fn total_nutrition(&self) -> Option<NutritionInfo> {
        self.ingredients
            .iter()
            .filter_map(|i| i.nutrition)
            .reduce(|acc, n| acc + n)
    }
}

/// Fresh id for a new recipe
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_round_trips_through_json() {
        let json = serde_json::to_string(&Unit::Tbsp).unwrap();
        assert_eq!(json, r#""tbsp""#);
        let none: Unit = serde_json::from_str(r#""""#).unwrap();
        assert_eq!(none, Unit::None);
    }

    #[test]
    fn test_unit_from_str() {
        assert_eq!("KG".parse::<Unit>().unwrap(), Unit::Kg);
        assert_eq!("".parse::<Unit>().unwrap(), Unit::None);
        assert_eq!(
            "pinch".parse::<Unit>(),
            Err(ValidationError::UnknownUnit("pinch".to_string()))
        );
    }

    #[test]
    fn test_ingredient_name_rejects_blank() {
        assert_eq!(
            IngredientName::parse("   "),
            Err(ValidationError::MissingIngredientName)
        );
        assert_eq!(IngredientName::parse(" oats ").unwrap().as_str(), "oats");
    }

    #[test]
    fn test_ingredient_from_str() {
        let ingredient: Ingredient = "flour:200:g".parse().unwrap();
        assert_eq!(ingredient.name, "flour");
        assert_eq!(ingredient.amount, "200");
        assert_eq!(ingredient.unit, Unit::G);

        let bare: Ingredient = "salt".parse().unwrap();
        assert_eq!(bare.amount, "");
        assert_eq!(bare.unit, Unit::None);

        assert!(":2:g".parse::<Ingredient>().is_err());
        assert!("egg:2:dozen".parse::<Ingredient>().is_err());
    }

    #[test]
    fn test_recipe_json_uses_camel_case() {
        let recipe = Recipe {
            id: "a".to_string(),
            title: "Soup".to_string(),
            ingredients: vec![Ingredient::new("leek", "1", Unit::Piece)],
            steps: vec!["Chop".to_string()],
            created_at: "2024-05-01T10:00:00Z".parse().unwrap(),
        };

        let value = serde_json::to_value(&recipe).unwrap();
        assert_eq!(value["createdAt"], "2024-05-01T10:00:00Z");
        assert_eq!(value["ingredients"][0]["unit"], "piece");
        assert!(value["ingredients"][0].get("nutrition").is_none());
    }

    #[test]
    fn test_total_nutrition() {
        let mut a = Ingredient::new("rice", "100", Unit::G);
        a.nutrition = Some(NutritionInfo::new(28.0, 0.3, 2.7));
        let mut b = Ingredient::new("butter", "10", Unit::G);
        b.nutrition = Some(NutritionInfo::new(0.0, 8.1, 0.1));
        let c = Ingredient::new("salt", "", Unit::None);

        let recipe = Recipe {
            id: generate_id(),
            title: "Buttered rice".to_string(),
            ingredients: vec![a, b, c],
            steps: vec![],
            created_at: Utc::now(),
        };

        let total = recipe.total_nutrition().unwrap();
        assert!((total.carbs - 28.0).abs() < 1e-9);
        assert!((total.fat - 8.4).abs() < 1e-9);
        assert!((total.protein - 2.8).abs() < 1e-9);
    }

    #[test]
    fn test_total_nutrition_none_when_nothing_attached() {
        let recipe = Recipe {
            id: generate_id(),
            title: "Water".to_string(),
            ingredients: vec![Ingredient::new("water", "1", Unit::L)],
            steps: vec![],
            created_at: Utc::now(),
        };
        assert_eq!(recipe.total_nutrition(), None);
    }

    #[test]
    fn test_generate_id_is_unique() {
        assert_ne!(generate_id(), generate_id());
    }
}
