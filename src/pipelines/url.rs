use crate::config::ImportConfig;
use crate::error::ImportError;
use crate::model::Recipe;
use crate::normalize::normalize_recipe;
use crate::url_to_text::fetchers::RequestFetcher;
use crate::url_to_text::html::decode_html;
use crate::url_to_text::html::extractors::{ParsingContext, StructuredDataExtractor};
use crate::url_to_text::html::readability::ReadabilityExtractor;
use log::{debug, info};
use url::Url;

/// Imports recipe pages into [`Recipe`] records.
///
/// Holds no state between calls besides the HTTP client, so one importer can
/// serve many concurrent imports.
pub struct RecipeImporter {
    fetcher: RequestFetcher,
    config: ImportConfig,
}

impl RecipeImporter {
    pub fn new(config: ImportConfig) -> Result<Self, ImportError> {
        let fetcher = RequestFetcher::new(&config)?;
        Ok(Self { fetcher, config })
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Fetch `url` and extract a record from it.
    ///
    /// Only the fetch can fail; extraction always produces a record, falling
    /// back to the page's main content when it carries no structured recipe.
    pub async fn import(&self, url: &str) -> Result<Recipe, ImportError> {
        let page = self.fetcher.fetch(url).await?;
        let recipe = extract_recipe(&page.body, &page.final_url, &self.config.legal_note);
        info!(
            "Imported \"{}\" from {} via {}",
            recipe.title, recipe.source_url, recipe.extraction
        );
        Ok(recipe)
    }
}

/// Everything after the fetch: structured data first, main-content heuristics
/// otherwise, then sanitation.
///
/// `source_url`, `source_host` and `legal_note` are attached after sanitizing
/// and always describe `final_url`.
pub fn extract_recipe(body: &[u8], final_url: &Url, legal_note: &str) -> Recipe {
    let html = decode_html(body);
    let context = ParsingContext::new(&html, final_url);

    let recipe = match StructuredDataExtractor::default().find_recipe(&context) {
        Some(object) => normalize_recipe(&object, final_url),
        None => {
            debug!("No structured recipe on {}, using readability", final_url);
            ReadabilityExtractor.extract(&context.document, final_url)
        }
    };

    let mut recipe = recipe.sanitized();
    recipe.source_url = final_url.to_string();
    recipe.source_host = final_url.host_str().map(String::from);
    recipe.legal_note = legal_note.to_string();
    recipe
}

/// Import a single URL with the default configuration.
pub async fn import_recipe(url: &str) -> Result<Recipe, ImportError> {
    RecipeImporter::new(ImportConfig::default())?.import(url).await
}
