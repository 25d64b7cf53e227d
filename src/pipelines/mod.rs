pub mod url;

pub use self::url::{extract_recipe, import_recipe, RecipeImporter};
