use super::items::{read_item, ItemAttributes};
use super::{Extractor, ParsingContext};
use crate::error::ExtractError;
use log::debug;
use once_cell::sync::Lazy;
use scraper::Selector;
use serde_json::Value;

static TOP_LEVEL_ITEMS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("[itemscope]:not([itemprop])").unwrap());

const MICRODATA: ItemAttributes = ItemAttributes {
    scope: "itemscope",
    item_type: "itemtype",
    property: "itemprop",
    resource: None,
};

pub struct MicroDataExtractor;

impl Extractor for MicroDataExtractor {
    fn name(&self) -> &'static str {
        "MicroDataExtractor"
    }

    fn extract(&self, context: &ParsingContext) -> Result<Vec<Value>, ExtractError> {
        let items: Vec<Value> = context
            .document
            .select(&TOP_LEVEL_ITEMS)
            .map(|element| read_item(element, &MICRODATA, &context.base_url))
            .collect();
        debug!("MicroDataExtractor: Found {} top-level items", items.len());
        Ok(items)
    }
}
