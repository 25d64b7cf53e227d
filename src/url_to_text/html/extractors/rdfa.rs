use super::items::{read_item, ItemAttributes};
use super::{Extractor, ParsingContext};
use crate::error::ExtractError;
use log::debug;
use once_cell::sync::Lazy;
use scraper::Selector;
use serde_json::Value;

static TOP_LEVEL_RESOURCES: Lazy<Selector> =
    Lazy::new(|| Selector::parse("[typeof]:not([property])").unwrap());

const RDFA: ItemAttributes = ItemAttributes {
    scope: "typeof",
    item_type: "typeof",
    property: "property",
    resource: Some("resource"),
};

/// RDFa Lite (`vocab` / `typeof` / `property`), reduced to local names.
pub struct RdfaExtractor;

impl Extractor for RdfaExtractor {
    fn name(&self) -> &'static str {
        "RdfaExtractor"
    }

    fn extract(&self, context: &ParsingContext) -> Result<Vec<Value>, ExtractError> {
        let resources: Vec<Value> = context
            .document
            .select(&TOP_LEVEL_RESOURCES)
            .map(|element| read_item(element, &RDFA, &context.base_url))
            .collect();
        debug!("RdfaExtractor: Found {} typed resources", resources.len());
        Ok(resources)
    }
}
