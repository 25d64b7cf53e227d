//! Extract a clean, normalized recipe record from a recipe web page.
//!
//! Structured schema.org data (JSON-LD, microdata, RDFa) is preferred; pages
//! without it fall back to main-content heuristics. Images are never
//! extracted.
//!
//! ```no_run
//! # async fn run() -> Result<(), recipe_import::ImportError> {
//! let recipe = recipe_import::import_recipe("https://example.com/recipes/chili").await?;
//! println!("{recipe}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod pipelines;
pub mod sanitize;
pub mod url_to_text;

pub use crate::config::{load_config, ImportConfig};
pub use error::{ExtractError, ImportError};
pub use model::{Extraction, Recipe, LEGAL_NOTE};
pub use normalize::{flatten_instructions, parse_duration};
pub use pipelines::{extract_recipe, import_recipe, RecipeImporter};
pub use sanitize::{clean_text, sanitize_value};
