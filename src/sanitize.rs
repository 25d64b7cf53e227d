//! Text cleanup applied to every extracted string.

use html_escape::decode_html_entities;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use serde_json::Value;
use std::borrow::Cow;
use unicode_normalization::UnicodeNormalization;

use crate::model::{Recipe, UNTITLED};

static HORIZONTAL_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t\x0B\x0C]+").unwrap());

const ZERO_WIDTH: [char; 4] = ['\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}'];
const NO_BREAK_SPACE: char = '\u{00A0}';

/// Clean a single string.
///
/// In order: unescape HTML entities, strip inline markup, compose to NFC,
/// drop zero-width characters and turn no-break spaces into spaces, collapse
/// runs of spaces/tabs (newlines are kept), trim.
///
/// The steps repeat until the text stops changing, so double-escaped feeds
/// (`&amp;eacute;`) decode fully and the result is a fixed point.
pub fn clean_text(text: &str) -> String {
    let mut current = clean_pass(text);
    // Every changing pass shrinks the text or settles it
    for _ in 0..=text.len() {
        let next = clean_pass(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn clean_pass(text: &str) -> String {
    let unescaped = decode_html_entities(text);
    let stripped = strip_html_tags(&unescaped);
    let composed: String = stripped.nfc().collect();
    let visible: String = composed
        .chars()
        .filter(|c| !ZERO_WIDTH.contains(c))
        .map(|c| if c == NO_BREAK_SPACE { ' ' } else { c })
        .collect();

    HORIZONTAL_WHITESPACE
        .replace_all(&visible, " ")
        .trim()
        .to_string()
}

fn strip_html_tags(text: &str) -> Cow<'_, str> {
    if !(text.contains('<') && text.contains('>')) {
        return Cow::Borrowed(text);
    }
    let fragment = Html::parse_fragment(text);
    Cow::Owned(fragment.root_element().text().collect::<String>())
}

/// Recursively clean every string inside a JSON value.
///
/// Strings in lists that end up empty are removed; other values are kept.
pub fn sanitize_value(value: Value) -> Value {
    match value {
        Value::String(text) => Value::String(clean_text(&text)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(sanitize_value)
                .filter(|item| !matches!(item, Value::String(s) if s.is_empty()))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, sanitize_value(value)))
                .collect(),
        ),
        other => other,
    }
}

/// Clean a list of strings, dropping entries that become empty.
pub fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .iter()
        .map(|item| clean_text(item))
        .filter(|item| !item.is_empty())
        .collect()
}

fn clean_optional(text: Option<String>) -> Option<String> {
    text.map(|t| clean_text(&t)).filter(|t| !t.is_empty())
}

impl Recipe {
    /// Clean every content field of the record.
    ///
    /// `source_url`, `source_host` and `legal_note` are attached by the
    /// pipeline after this step and are left untouched.
    pub fn sanitized(self) -> Self {
        let title = clean_text(&self.title);
        Recipe {
            title: if title.is_empty() {
                UNTITLED.to_string()
            } else {
                title
            },
            description: clean_optional(self.description),
            servings: clean_optional(self.servings),
            ingredients: clean_list(self.ingredients),
            steps: clean_list(self.steps),
            raw_json: self.raw_json.map(sanitize_value),
            ..self
        }
    }
}
