use chrono::Utc;
use recipe_nutrition::store::RECIPES_KEY;
use recipe_nutrition::{
    FileStorage, Ingredient, NutritionInfo, Recipe, RecipeDraft, RecipeStore, Storage, Unit,
};

fn recipe(id: &str, title: &str) -> Recipe {
    Recipe {
        id: id.to_string(),
        title: title.to_string(),
        ingredients: vec![],
        steps: vec![],
        created_at: Utc::now(),
    }
}

#[test]
fn test_soup_and_stew() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = RecipeStore::new(FileStorage::new(dir.path()));

    store.save(recipe("a", "Soup"), false).unwrap();
    store.save(recipe("b", "Stew"), false).unwrap();
    let titles: Vec<_> = store.load_all().into_iter().map(|r| r.title).collect();
    assert_eq!(titles, ["Soup", "Stew"]);

    store.delete("a").unwrap();
    let remaining = store.load_all();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, "b");
}

#[test]
fn test_reads_are_idempotent_and_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = RecipeStore::new(FileStorage::new(dir.path()));

    let mut draft = RecipeDraft::default();
    draft.title = "Hummus".to_string();
    draft.add_ingredient(Ingredient::new("chickpeas", "400", Unit::G));
    draft.add_ingredient(Ingredient::new("tahini", "2", Unit::Tbsp));
    draft.add_step("Blend");
    draft.set_nutrition(0, NutritionInfo::new(27.4, 2.6, 8.9));
    let hummus = draft.build().unwrap();
    store.save(hummus.clone(), draft.is_edit()).unwrap();

    let first = store.load_all();
    let second = store.load_all();
    assert_eq!(first, second);
    assert_eq!(first, [hummus.clone()]);

    let reopened = RecipeStore::new(FileStorage::new(dir.path()));
    assert_eq!(reopened.load_all(), [hummus]);
}

#[test]
fn test_edit_through_draft_keeps_position() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = RecipeStore::new(FileStorage::new(dir.path()));
    for (id, title) in [("a", "Soup"), ("b", "Stew"), ("c", "Pie")] {
        store.save(recipe(id, title), false).unwrap();
    }

    let mut draft = RecipeDraft::edit(&store.get("a").unwrap());
    draft.title = "Leek soup".to_string();
    store.save(draft.build().unwrap(), draft.is_edit()).unwrap();

    let all = store.load_all();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].id, "a");
    assert_eq!(all[0].title, "Leek soup");
    assert_eq!(all[1].title, "Stew");
    assert_eq!(all[2].title, "Pie");
}

#[test]
fn test_stored_format() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = RecipeStore::new(FileStorage::new(dir.path()));
    store.save(recipe("a", "Soup"), false).unwrap();

    let raw = store.storage().read(RECIPES_KEY).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value[0]["id"], "a");
    assert_eq!(value[0]["title"], "Soup");
    assert!(value[0]["createdAt"].is_string());
}

#[test]
fn test_corrupt_slot_loads_empty_and_is_replaced_on_save() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("recipes.json"), "not json at all").unwrap();

    let mut store = RecipeStore::new(FileStorage::new(dir.path()));
    assert!(store.load_all().is_empty());

    store.save(recipe("a", "Soup"), false).unwrap();
    assert_eq!(store.load_all().len(), 1);

    let backup = std::fs::read_to_string(dir.path().join("recipes.bak.json")).unwrap();
    assert_eq!(backup, "not json at all");
}

#[test]
fn test_reads_recipes_without_optional_fields() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("recipes.json"),
        r#"[{"id":"x1","title":"Toast","ingredients":[{"name":"bread","amount":"2","unit":"slice"}],"steps":["Toast it"],"createdAt":"2025-01-02T08:30:00.000Z"}]"#,
    )
    .unwrap();

    let store = RecipeStore::new(FileStorage::new(dir.path()));
    let all = store.load_all();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].ingredients[0].unit, Unit::Slice);
    assert_eq!(all[0].ingredients[0].nutrition, None);
}
