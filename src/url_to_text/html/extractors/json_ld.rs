use super::{Extractor, ParsingContext};
use crate::error::ExtractError;
use log::debug;
use once_cell::sync::Lazy;
use scraper::Selector;
use serde_json::Value;

static SCRIPT_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("script[type]").unwrap());

const JSON_LD_MIME: &str = "application/ld+json";

pub struct JsonLdExtractor;

impl Extractor for JsonLdExtractor {
    fn name(&self) -> &'static str {
        "JsonLdExtractor"
    }

    fn extract(&self, context: &ParsingContext) -> Result<Vec<Value>, ExtractError> {
        let scripts: Vec<String> = context
            .document
            .select(&SCRIPT_SELECTOR)
            .filter(|script| {
                script
                    .value()
                    .attr("type")
                    .and_then(|kind| kind.split(';').next())
                    .is_some_and(|kind| kind.trim().eq_ignore_ascii_case(JSON_LD_MIME))
            })
            .map(|script| script.text().collect::<String>())
            .collect();
        debug!(
            "JsonLdExtractor: Found {} JSON-LD script tags",
            scripts.len()
        );

        let mut candidates = Vec::new();
        let mut failed = 0;
        for (index, raw_json) in scripts.iter().enumerate() {
            match parse_block(raw_json) {
                Some(block) => flatten_block(block, &mut candidates),
                None => {
                    debug!("JsonLdExtractor: Failed to parse JSON-LD {index}");
                    failed += 1;
                }
            }
        }

        if !scripts.is_empty() && failed == scripts.len() {
            return Err(ExtractError::MalformedJson(failed));
        }
        Ok(candidates)
    }
}

fn parse_block(raw_json: &str) -> Option<Value> {
    let trimmed = strip_wrappers(raw_json);
    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("JsonLdExtractor: strict parse failed ({e}), trying repair");
            serde_json::from_str::<Value>(&repair_json(trimmed)).ok()
        }
    }
}

/// Remove `<!-- -->` and `<![CDATA[ ]]>` wrappers some CMSes emit.
fn strip_wrappers(raw_json: &str) -> &str {
    let mut text = raw_json.trim();
    for (open, close) in [("<!--", "-->"), ("<![CDATA[", "]]>")] {
        if let Some(inner) = text.strip_prefix(open) {
            text = inner.strip_suffix(close).unwrap_or(inner).trim();
        }
    }
    text
}

/// Expand a parsed block into candidate objects in document order.
///
/// A top-level array is expanded one level; every object carrying an
/// `@graph` array is followed by the objects of that graph.
fn flatten_block(block: Value, candidates: &mut Vec<Value>) {
    match block {
        Value::Array(items) => {
            for item in items.into_iter().filter(Value::is_object) {
                push_with_graph(item, candidates);
            }
        }
        Value::Object(_) => push_with_graph(block, candidates),
        _ => {}
    }
}

fn push_with_graph(object: Value, candidates: &mut Vec<Value>) {
    let graph: Vec<Value> = object
        .get("@graph")
        .and_then(Value::as_array)
        .map(|nodes| nodes.iter().filter(|node| node.is_object()).cloned().collect())
        .unwrap_or_default();
    candidates.push(object);
    candidates.extend(graph);
}

/// Best-effort fix for hand-written JSON-LD: inserts missing commas between
/// members and drops duplicate or trailing ones. Whitespace outside strings
/// is removed.
fn repair_json(json_str: &str) -> String {
    let mut minified = String::with_capacity(json_str.len());
    let mut in_string = false;
    let mut prev_char = None;
    let mut depth = 0i32;
    let chars: Vec<char> = json_str.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        match c {
            '"' if prev_char != Some('\\') => {
                in_string = !in_string;
                if !in_string {
                    // Closing quote directly followed by another value
                    let next_char = chars[i + 1..].iter().find(|c| !c.is_whitespace());
                    if matches!(next_char, Some('"' | '[' | '{')) {
                        minified.push('"');
                        minified.push(',');
                        prev_char = Some(',');
                        continue;
                    }
                }
                minified.push(c);
            }
            '[' | '{' if !in_string => {
                depth += 1;
                minified.push(c);
            }
            ']' | '}' if !in_string => {
                depth -= 1;
                minified.push(c);
                let next_char = chars[i + 1..].iter().find(|c| !c.is_whitespace());
                if depth > 0 && matches!(next_char, Some('"' | '{' | '[')) {
                    minified.push(',');
                    prev_char = Some(',');
                    continue;
                }
            }
            ',' if !in_string => {
                if prev_char != Some(',') {
                    minified.push(c);
                }
            }
            _ => {
                if in_string || !c.is_whitespace() {
                    minified.push(c);
                }
            }
        }
        prev_char = Some(c);
    }

    minified.replace(",]", "]").replace(",}", "}")
}
