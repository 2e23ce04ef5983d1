use chrono::{DateTime, Utc};

use crate::error::ValidationError;
use crate::model::{generate_id, Ingredient, IngredientName, NutritionInfo, Recipe};

/// A recipe being written or edited, not yet validated
#[derive(Debug, Clone, Default)]
pub struct RecipeDraft {
    pub title: String,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<String>,
    editing: Option<(String, DateTime<Utc>)>,
}

impl RecipeDraft {
    /// Blank form: one empty ingredient row and one empty step
    pub fn new() -> Self {
        Self {
            ingredients: vec![Ingredient::default()],
            steps: vec![String::new()],
            ..Self::default()
        }
    }

    /// Load a stored recipe for editing
    pub fn edit(recipe: &Recipe) -> Self {
        Self {
            title: recipe.title.clone(),
            ingredients: recipe.ingredients.clone(),
            steps: recipe.steps.clone(),
            editing: Some((recipe.id.clone(), recipe.created_at)),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    pub fn add_ingredient(&mut self, ingredient: Ingredient) {
        self.ingredients.push(ingredient);
    }

    pub fn remove_ingredient(&mut self, index: usize) -> Option<Ingredient> {
        (index < self.ingredients.len()).then(|| self.ingredients.remove(index))
    }

    pub fn add_step(&mut self, step: impl Into<String>) {
        self.steps.push(step.into());
    }

    pub fn remove_step(&mut self, index: usize) -> Option<String> {
        (index < self.steps.len()).then(|| self.steps.remove(index))
    }

    /// Name of the ingredient row, checked before any lookup
    pub fn ingredient_name(&self, index: usize) -> Result<IngredientName, ValidationError> {
        let name = self
            .ingredients
            .get(index)
            .map(|i| i.name.as_str())
            .unwrap_or_default();
        IngredientName::parse(name)
    }

    /// Attach nutrition to a row, replacing what an earlier lookup put there
    pub fn set_nutrition(&mut self, index: usize, nutrition: NutritionInfo) -> bool {
        match self.ingredients.get_mut(index) {
            Some(ingredient) => {
                ingredient.nutrition = Some(nutrition);
                true
            }
            None => false,
        }
    }

    /// Validate and turn the draft into a recipe ready for the store
    ///
    /// New recipes get a fresh id and creation time; edited ones keep theirs.
    pub fn build(&self) -> Result<Recipe, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingTitle);
        }

        let mut ingredients = Vec::with_capacity(self.ingredients.len());
        for ingredient in &self.ingredients {
            let name = IngredientName::parse(&ingredient.name)?;
            ingredients.push(Ingredient {
                name: name.as_str().to_string(),
                ..ingredient.clone()
            });
        }

        if let Some(position) = self.steps.iter().position(|s| s.trim().is_empty()) {
            return Err(ValidationError::EmptyStep(position + 1));
        }

        let (id, created_at) = match &self.editing {
            Some((id, created_at)) => (id.clone(), *created_at),
            None => (generate_id(), Utc::now()),
        };

        Ok(Recipe {
            id,
            title: title.to_string(),
            ingredients,
            steps: self.steps.clone(),
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Unit;

    fn filled_draft() -> RecipeDraft {
        let mut draft = RecipeDraft::default();
        draft.title = "Pancakes".to_string();
        draft.add_ingredient(Ingredient::new("flour", "200", Unit::G));
        draft.add_ingredient(Ingredient::new("milk", "300", Unit::Ml));
        draft.add_step("Whisk everything");
        draft.add_step("Fry");
        draft
    }

    #[test]
    fn test_new_draft_has_one_empty_row_each() {
        let draft = RecipeDraft::new();
        assert_eq!(draft.ingredients.len(), 1);
        assert_eq!(draft.steps.len(), 1);
        assert!(!draft.is_edit());
        assert_eq!(
            draft.ingredient_name(0),
            Err(ValidationError::MissingIngredientName)
        );
    }

    #[test]
    fn test_build_new_recipe() {
        let recipe = filled_draft().build().unwrap();
        assert_eq!(recipe.title, "Pancakes");
        assert_eq!(recipe.ingredients.len(), 2);
        assert_eq!(recipe.steps, ["Whisk everything", "Fry"]);
        assert!(!recipe.id.is_empty());
    }

    #[test]
    fn test_build_validates() {
        let mut draft = filled_draft();
        draft.title = "  ".to_string();
        assert_eq!(draft.build(), Err(ValidationError::MissingTitle));

        let mut draft = filled_draft();
        draft.add_ingredient(Ingredient::default());
        assert_eq!(draft.build(), Err(ValidationError::MissingIngredientName));

        let mut draft = filled_draft();
        draft.add_step("");
        assert_eq!(draft.build(), Err(ValidationError::EmptyStep(3)));
    }

    #[test]
    fn test_edit_keeps_id_and_created_at() {
        let original = filled_draft().build().unwrap();

        let mut draft = RecipeDraft::edit(&original);
        assert!(draft.is_edit());
        draft.title = "Crepes".to_string();
        draft.remove_step(1);
        assert!(draft.set_nutrition(0, NutritionInfo::new(76.0, 1.0, 10.0)));

        let edited = draft.build().unwrap();
        assert_eq!(edited.id, original.id);
        assert_eq!(edited.created_at, original.created_at);
        assert_eq!(edited.title, "Crepes");
        assert_eq!(edited.steps.len(), 1);
        assert!(edited.ingredients[0].nutrition.is_some());
    }

    #[test]
    fn test_row_operations_out_of_range() {
        let mut draft = filled_draft();
        assert_eq!(draft.remove_ingredient(5), None);
        assert_eq!(draft.remove_step(5), None);
        assert!(!draft.set_nutrition(5, NutritionInfo::zero()));
        assert_eq!(
            draft.ingredient_name(5),
            Err(ValidationError::MissingIngredientName)
        );
        assert_eq!(draft.remove_ingredient(0).unwrap().name, "flour");
    }
}
