use log::debug;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde_json::Value;
use url::Url;

use crate::error::ExtractError;

mod items;
mod json_ld;
mod microdata;
mod rdfa;

pub use json_ld::JsonLdExtractor;
pub use microdata::MicroDataExtractor;
pub use rdfa::RdfaExtractor;

static BASE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("base[href]").unwrap());

/// A parsed page plus the URLs needed to interpret it.
pub struct ParsingContext {
    /// Final URL of the page, after redirects
    pub url: Url,
    /// URL that relative links resolve against (`<base href>` or `url`)
    pub base_url: Url,
    pub document: Html,
}

impl ParsingContext {
    pub fn new(html: &str, url: &Url) -> Self {
        let document = Html::parse_document(html);
        let base_url = document
            .select(&BASE_SELECTOR)
            .next()
            .and_then(|base| base.value().attr("href"))
            .and_then(|href| url.join(href.trim()).ok())
            .unwrap_or_else(|| url.clone());

        Self {
            url: url.clone(),
            base_url,
            document,
        }
    }
}

/// One structured-data syntax.
///
/// Returns every candidate object on the page in document order, or an error
/// when the syntax is present but unreadable.
pub trait Extractor {
    fn name(&self) -> &'static str;
    fn extract(&self, context: &ParsingContext) -> Result<Vec<Value>, ExtractError>;
}

/// Finds the first schema.org `Recipe` across JSON-LD, microdata and RDFa.
pub struct StructuredDataExtractor {
    extractors: Vec<Box<dyn Extractor>>,
}

impl Default for StructuredDataExtractor {
    fn default() -> Self {
        Self {
            extractors: vec![
                Box::new(JsonLdExtractor),
                Box::new(MicroDataExtractor),
                Box::new(RdfaExtractor),
            ],
        }
    }
}

impl StructuredDataExtractor {
    /// Syntaxes are tried in priority order; within a syntax the first
    /// `Recipe` in document order wins.
    pub fn find_recipe(&self, context: &ParsingContext) -> Option<Value> {
        for extractor in &self.extractors {
            match extractor.extract(context) {
                Ok(candidates) => {
                    debug!(
                        "{}: {} candidate object(s) on {}",
                        extractor.name(),
                        candidates.len(),
                        context.url
                    );
                    if let Some(recipe) = candidates.into_iter().find(is_recipe_type) {
                        debug!("{}: found Recipe", extractor.name());
                        return Some(recipe);
                    }
                }
                Err(e) => {
                    debug!("{}: {}", extractor.name(), e);
                }
            }
        }
        None
    }
}

/// `@type` is `"Recipe"` or a list containing `"Recipe"`.
pub fn is_recipe_type(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(kind)) => kind == "Recipe",
        Some(Value::Array(kinds)) => kinds.iter().any(|kind| kind == "Recipe"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context(html: &str) -> ParsingContext {
        ParsingContext::new(html, &Url::parse("https://example.com/r/1").unwrap())
    }

    #[test]
    fn test_is_recipe_type() {
        assert!(is_recipe_type(&json!({"@type": "Recipe"})));
        assert!(is_recipe_type(&json!({"@type": ["NewsArticle", "Recipe"]})));
        assert!(!is_recipe_type(&json!({"@type": "recipe"})));
        assert!(!is_recipe_type(&json!({"@type": "WebPage"})));
        assert!(!is_recipe_type(&json!({"name": "Recipe"})));
    }

    #[test]
    fn test_base_url_from_base_tag() {
        let ctx = context(r#"<html><head><base href="/static/"></head><body></body></html>"#);
        assert_eq!(ctx.base_url.as_str(), "https://example.com/static/");

        let ctx = context("<html><body></body></html>");
        assert_eq!(ctx.base_url.as_str(), "https://example.com/r/1");
    }

    #[test]
    fn test_json_ld_wins_over_microdata() {
        let html = r#"
        <html><head>
            <script type="application/ld+json">{"@type": "Recipe", "name": "From JSON-LD"}</script>
        </head><body>
            <div itemscope itemtype="http://schema.org/Recipe">
                <span itemprop="name">From Microdata</span>
            </div>
        </body></html>
        "#;
        let recipe = StructuredDataExtractor::default()
            .find_recipe(&context(html))
            .unwrap();
        assert_eq!(recipe["name"], "From JSON-LD");
    }

    #[test]
    fn test_malformed_json_ld_falls_through_to_microdata() {
        let html = r#"
        <html><head>
            <script type="application/ld+json">{"@type": "Recipe", "name": </script>
        </head><body>
            <div itemscope itemtype="https://schema.org/Recipe">
                <h1 itemprop="name">Microdata Cake</h1>
            </div>
        </body></html>
        "#;
        let recipe = StructuredDataExtractor::default()
            .find_recipe(&context(html))
            .unwrap();
        assert_eq!(recipe["name"], "Microdata Cake");
    }

    #[test]
    fn test_microdata_wins_over_rdfa() {
        let html = r#"
        <html><body>
            <div vocab="https://schema.org/" typeof="Recipe">
                <span property="name">From RDFa</span>
            </div>
            <div itemscope itemtype="http://schema.org/Recipe">
                <span itemprop="name">From Microdata</span>
            </div>
        </body></html>
        "#;
        let recipe = StructuredDataExtractor::default()
            .find_recipe(&context(html))
            .unwrap();
        assert_eq!(recipe["name"], "From Microdata");
    }

    #[test]
    fn test_no_recipe() {
        let html = r#"
        <html><head>
            <script type="application/ld+json">{"@type": "WebSite", "name": "Blog"}</script>
        </head><body><p>Nothing here</p></body></html>
        "#;
        assert!(StructuredDataExtractor::default()
            .find_recipe(&context(html))
            .is_none());
    }
}
