//! Tree walk shared by the attribute-based syntaxes (microdata, RDFa).
//!
//! Items are rendered to the same uniform shape JSON-LD uses: `@type` holds
//! local type names, properties map to strings or nested objects, and a
//! property seen more than once becomes a list.

use scraper::ElementRef;
use serde_json::{Map, Value};
use url::Url;

/// Attribute names that define items and properties for one syntax.
pub(super) struct ItemAttributes {
    /// Marks an element as an item
    pub scope: &'static str,
    /// Holds the item's type IRIs
    pub item_type: &'static str,
    /// Holds the property names an element contributes
    pub property: &'static str,
    /// Extra attribute whose value is an IRI (RDFa `resource`)
    pub resource: Option<&'static str>,
}

/// Render an item element and everything scoped beneath it.
pub(super) fn read_item(element: ElementRef, attrs: &ItemAttributes, base: &Url) -> Value {
    let mut item = Map::new();

    if let Some(types) = element.value().attr(attrs.item_type) {
        let mut names: Vec<Value> = types
            .split_whitespace()
            .map(|iri| Value::String(local_name(iri).to_string()))
            .collect();
        match names.len() {
            0 => {}
            1 => {
                item.insert("@type".to_string(), names.remove(0));
            }
            _ => {
                item.insert("@type".to_string(), Value::Array(names));
            }
        }
    }

    for child in element.children().filter_map(ElementRef::wrap) {
        collect_properties(child, attrs, base, &mut item);
    }
    Value::Object(item)
}

fn collect_properties(
    element: ElementRef,
    attrs: &ItemAttributes,
    base: &Url,
    item: &mut Map<String, Value>,
) {
    let is_scope = element.value().attr(attrs.scope).is_some();

    if let Some(properties) = element.value().attr(attrs.property) {
        let value = if is_scope {
            read_item(element, attrs, base)
        } else {
            property_value(element, attrs, base)
        };
        for name in properties.split_whitespace().map(local_name) {
            add_property(item, name, value.clone());
        }
    }

    // A nested item owns everything below it
    if is_scope {
        return;
    }
    for child in element.children().filter_map(ElementRef::wrap) {
        collect_properties(child, attrs, base, item);
    }
}

fn add_property(item: &mut Map<String, Value>, name: &str, value: Value) {
    match item.get_mut(name) {
        Some(Value::Array(values)) => values.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            item.insert(name.to_string(), value);
        }
    }
}

fn property_value(element: ElementRef, attrs: &ItemAttributes, base: &Url) -> Value {
    let node = element.value();

    if let Some(content) = node.attr("content") {
        return Value::String(content.trim().to_string());
    }

    let url_attr = match node.name() {
        "audio" | "embed" | "iframe" | "img" | "source" | "track" | "video" => Some("src"),
        "a" | "area" | "link" => Some("href"),
        "object" => Some("data"),
        _ => attrs.resource,
    };
    if let Some(link) = url_attr.and_then(|name| node.attr(name)) {
        return Value::String(resolve(base, link));
    }

    let literal = match node.name() {
        "data" | "meter" => node.attr("value"),
        "time" => node.attr("datetime"),
        _ => None,
    };
    if let Some(literal) = literal {
        return Value::String(literal.trim().to_string());
    }

    Value::String(element.text().collect::<String>().trim().to_string())
}

fn resolve(base: &Url, link: &str) -> String {
    base.join(link.trim())
        .map(|url| url.to_string())
        .unwrap_or_else(|_| link.trim().to_string())
}

/// `http://schema.org/Recipe`, `schema:Recipe` and `Recipe` all become `Recipe`.
pub(super) fn local_name(iri: &str) -> &str {
    let trimmed = iri.trim_end_matches(['/', '#']);
    match trimmed.rsplit(['/', '#', ':']).next() {
        Some(name) if !name.is_empty() => name,
        _ => iri,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_name() {
        assert_eq!(local_name("http://schema.org/Recipe"), "Recipe");
        assert_eq!(local_name("https://schema.org/Recipe/"), "Recipe");
        assert_eq!(local_name("schema:recipeYield"), "recipeYield");
        assert_eq!(local_name("http://data-vocabulary.org/Recipe"), "Recipe");
        assert_eq!(local_name("name"), "name");
    }

    #[test]
    fn test_add_property_promotes_to_list() {
        let mut item = Map::new();
        add_property(&mut item, "step", Value::from("one"));
        add_property(&mut item, "step", Value::from("two"));
        add_property(&mut item, "step", Value::from("three"));
        assert_eq!(item["step"], serde_json::json!(["one", "two", "three"]));
    }
}
