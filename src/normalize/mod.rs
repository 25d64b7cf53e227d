//! Maps a matched schema.org `Recipe` object onto the canonical [`Recipe`] record.
//!
//! Every coercion is total: missing fields, scalars, lists and nested objects
//! all have a defined outcome, and unexpected shapes degrade to absent/empty.

mod duration;
mod instructions;

pub use duration::parse_duration;
pub use instructions::flatten_instructions;

use serde_json::{Map, Value};
use url::Url;

use crate::model::{Extraction, Recipe, LEGAL_NOTE, UNTITLED};

/// Build a record from a structured `Recipe` object found on `final_url`.
pub fn normalize_recipe(object: &Value, final_url: &Url) -> Recipe {
    let empty = Map::new();
    let fields = object.as_object().unwrap_or(&empty);

    Recipe {
        title: first_text(fields, &["name", "headline"]).unwrap_or_else(|| UNTITLED.to_string()),
        description: fields.get("description").and_then(non_empty_text),
        servings: fields.get("recipeYield").and_then(servings),
        prep_time_min: minutes(fields.get("prepTime")),
        cook_time_min: minutes(fields.get("cookTime")),
        total_time_min: minutes(fields.get("totalTime")),
        ingredients: ingredients(fields),
        steps: fields
            .get("recipeInstructions")
            .map(flatten_instructions)
            .unwrap_or_default(),
        source_url: final_url.to_string(),
        source_host: final_url.host_str().map(String::from),
        extraction: Extraction::Structured,
        legal_note: LEGAL_NOTE.to_string(),
        raw_json: Some(object.clone()),
    }
}

/// Best-effort string form of a value.
///
/// Lists yield their first coercible element; objects their `text`, `name`
/// or `@value` field.
pub(crate) fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => items.iter().find_map(text_value),
        Value::Object(map) => ["text", "name", "@value"]
            .iter()
            .find_map(|key| map.get(*key).and_then(text_value)),
        Value::Null => None,
    }
}

fn non_empty_text(value: &Value) -> Option<String> {
    text_value(value)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// First of `keys` whose value coerces to non-empty trimmed text.
pub(crate) fn first_text(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .find_map(non_empty_text)
}

fn minutes(value: Option<&Value>) -> Option<u32> {
    value
        .and_then(text_value)
        .and_then(|text| parse_duration(&text))
}

fn servings(value: &Value) -> Option<String> {
    let text = match value {
        // e.g. ["4", "4 servings"]: prefer the descriptive form
        Value::Array(items) => {
            let entries: Vec<String> = items.iter().filter_map(text_value).collect();
            entries
                .iter()
                .find(|entry| entry.contains(char::is_alphabetic))
                .or_else(|| entries.first())
                .cloned()
        }
        other => text_value(other),
    }?;

    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn as_list(value: &Value) -> Vec<&Value> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    }
}

fn ingredients(fields: &Map<String, Value>) -> Vec<String> {
    let Some(source) = ["recipeIngredient", "ingredients"]
        .iter()
        .filter_map(|key| fields.get(*key))
        .find(|value| !is_blank(value))
    else {
        return Vec::new();
    };

    as_list(source)
        .into_iter()
        .filter_map(ingredient_text)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}

fn ingredient_text(entry: &Value) -> Option<String> {
    match entry {
        Value::Object(fields) => {
            if let Some(text) = fields.get("text") {
                return text_value(text);
            }
            let name = fields.get("name").and_then(text_value)?;
            match fields.get("amount").and_then(non_empty_text) {
                Some(amount) => Some(format!("{amount} {name}")),
                None => Some(name),
            }
        }
        other => text_value(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn url() -> Url {
        Url::parse("https://www.example.com/recipes/soup?ref=home").unwrap()
    }

    #[test]
    fn test_full_mapping() {
        let object = json!({
            "@type": "Recipe",
            "name": "  Tomato Soup ",
            "description": "Warming.",
            "recipeYield": ["4", "4 bowls"],
            "prepTime": "PT10M",
            "cookTime": "PT1H",
            "totalTime": "PT1H10M",
            "recipeIngredient": ["4 tomatoes", " ", "1 onion"],
            "recipeInstructions": [
                {"@type": "HowToStep", "text": "Chop."},
                {"@type": "HowToStep", "text": "Simmer."}
            ]
        });

        let recipe = normalize_recipe(&object, &url());
        assert_eq!(recipe.title, "Tomato Soup");
        assert_eq!(recipe.description.as_deref(), Some("Warming."));
        assert_eq!(recipe.servings.as_deref(), Some("4 bowls"));
        assert_eq!(recipe.prep_time_min, Some(10));
        assert_eq!(recipe.cook_time_min, Some(60));
        assert_eq!(recipe.total_time_min, Some(70));
        assert_eq!(recipe.ingredients, vec!["4 tomatoes", "1 onion"]);
        assert_eq!(recipe.steps, vec!["Chop.", "Simmer."]);
        assert_eq!(recipe.source_url, "https://www.example.com/recipes/soup?ref=home");
        assert_eq!(recipe.source_host.as_deref(), Some("www.example.com"));
        assert_eq!(recipe.extraction, Extraction::Structured);
        assert_eq!(recipe.raw_json, Some(object));
    }

    #[test]
    fn test_title_fallbacks() {
        let recipe = normalize_recipe(&json!({"headline": "From Headline"}), &url());
        assert_eq!(recipe.title, "From Headline");

        let recipe = normalize_recipe(&json!({"name": "   ", "headline": "Second"}), &url());
        assert_eq!(recipe.title, "Second");

        let recipe = normalize_recipe(&json!({"@type": "Recipe"}), &url());
        assert_eq!(recipe.title, UNTITLED);
    }

    #[test]
    fn test_servings_shapes() {
        assert_eq!(servings(&json!(6)), Some("6".to_string()));
        assert_eq!(servings(&json!("12 cookies")), Some("12 cookies".to_string()));
        assert_eq!(servings(&json!("")), None);
        assert_eq!(servings(&json!(["8"])), Some("8".to_string()));
        assert_eq!(servings(&json!([])), None);
        assert_eq!(servings(&json!(null)), None);
    }

    #[test]
    fn test_scalar_ingredient_becomes_list() {
        let recipe = normalize_recipe(&json!({"recipeIngredient": "1 egg"}), &url());
        assert_eq!(recipe.ingredients, vec!["1 egg"]);
    }

    #[test]
    fn test_ingredient_objects() {
        let recipe = normalize_recipe(
            &json!({"recipeIngredient": [
                {"text": "2 cups rice"},
                {"name": "salt", "amount": "1 tsp"},
                {"name": "pepper"},
                {"@type": "Thing"},
                null,
                3
            ]}),
            &url(),
        );
        assert_eq!(
            recipe.ingredients,
            vec!["2 cups rice", "1 tsp salt", "pepper", "3"]
        );
    }

    #[test]
    fn test_legacy_ingredients_field() {
        let recipe = normalize_recipe(
            &json!({"recipeIngredient": [], "ingredients": ["butter"]}),
            &url(),
        );
        assert_eq!(recipe.ingredients, vec!["butter"]);
    }

    #[test]
    fn test_missing_fields_degrade() {
        let recipe = normalize_recipe(
            &json!({"name": "Bare", "description": {"@type": "Thing"}, "prepTime": 0, "cookTime": ["PT5M"]}),
            &url(),
        );
        assert_eq!(recipe.description, None);
        assert_eq!(recipe.servings, None);
        assert_eq!(recipe.prep_time_min, None);
        assert_eq!(recipe.cook_time_min, Some(5));
        assert_eq!(recipe.total_time_min, None);
        assert!(recipe.ingredients.is_empty());
        assert!(recipe.steps.is_empty());
    }

    #[test]
    fn test_non_object_input() {
        let recipe = normalize_recipe(&json!("not an object"), &url());
        assert_eq!(recipe.title, UNTITLED);
        assert!(recipe.ingredients.is_empty());
    }

    #[test]
    fn test_text_value() {
        assert_eq!(text_value(&json!({"@value": "x"})), Some("x".to_string()));
        assert_eq!(text_value(&json!([null, "y"])), Some("y".to_string()));
        assert_eq!(text_value(&json!(1.5)), Some("1.5".to_string()));
        assert_eq!(text_value(&json!(null)), None);
    }
}
