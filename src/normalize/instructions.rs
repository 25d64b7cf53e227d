use serde_json::Value;

use super::first_text;

/// Flatten `recipeInstructions` into an ordered list of steps.
///
/// Accepted shapes:
/// - a string: one step per non-empty line
/// - a list whose elements are strings, `HowToStep`-like objects (`text`,
///   falling back to `name`), `HowToSection`-like objects carrying an
///   `itemListElement` (flattened recursively), or nested lists
///
/// Anything else yields no steps.
pub fn flatten_instructions(instructions: &Value) -> Vec<String> {
    let mut steps = Vec::new();
    collect_steps(instructions, &mut steps);
    steps
}

fn collect_steps(value: &Value, steps: &mut Vec<String>) {
    match value {
        Value::String(text) => steps.extend(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from),
        ),
        Value::Array(items) => {
            for item in items {
                collect_item(item, steps);
            }
        }
        _ => {}
    }
}

fn collect_item(item: &Value, steps: &mut Vec<String>) {
    match item {
        Value::Object(fields) => match fields.get("itemListElement") {
            Some(section) => collect_steps(section, steps),
            None => push_step(first_text(fields, &["text", "name"]), steps),
        },
        Value::Array(_) => collect_steps(item, steps),
        Value::String(text) => push_step(Some(text.clone()), steps),
        Value::Number(n) => push_step(Some(n.to_string()), steps),
        Value::Bool(_) | Value::Null => {}
    }
}

fn push_step(text: Option<String>, steps: &mut Vec<String>) {
    if let Some(text) = text {
        let text = text.trim();
        if !text.is_empty() {
            steps.push(text.to_string());
        }
    }
}
