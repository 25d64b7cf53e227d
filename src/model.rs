use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Advisory text attached to every record.
pub const LEGAL_NOTE: &str =
    "For personal use/research only. Do not republish; see the original source link.";

/// Title used when a page offers none.
pub const UNTITLED: &str = "Untitled";

/// Which path produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extraction {
    /// A schema.org `Recipe` object was found in JSON-LD, microdata or RDFa
    Structured,
    /// No structured data; heuristics over the main page content
    Readability,
}

impl fmt::Display for Extraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extraction::Structured => write!(f, "structured"),
            Extraction::Readability => write!(f, "readability"),
        }
    }
}

/// The canonical recipe record.
///
/// Every field is always serialized; absent values become `null` so that
/// consumers never have to probe for keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    pub description: Option<String>,
    pub servings: Option<String>,
    pub prep_time_min: Option<u32>,
    pub cook_time_min: Option<u32>,
    pub total_time_min: Option<u32>,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    /// Final URL after redirects
    pub source_url: String,
    pub source_host: Option<String>,
    pub extraction: Extraction,
    pub legal_note: String,
    /// The matched structured object, kept for provenance
    pub raw_json: Option<Value>,
}

const RULE_WIDTH: usize = 80;

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(f, "{rule}")?;
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Note: {}", self.legal_note)?;
        writeln!(f, "Source: {}", self.source_url)?;

        if let Some(host) = &self.source_host {
            writeln!(f, "Site: {host}")?;
        }
        if let Some(servings) = self.servings.as_deref().filter(|s| !s.trim().is_empty()) {
            writeln!(f, "Servings: {servings}")?;
        }
        for (label, minutes) in [
            ("Prep (min)", self.prep_time_min),
            ("Cook (min)", self.cook_time_min),
            ("Total (min)", self.total_time_min),
        ] {
            if let Some(minutes) = minutes {
                writeln!(f, "{label}: {minutes}")?;
            }
        }

        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            writeln!(f, "\nDescription:")?;
            for line in wrap(description, RULE_WIDTH) {
                writeln!(f, "{line}")?;
            }
        }

        if !self.ingredients.is_empty() {
            writeln!(f, "\nIngredients:")?;
            for ingredient in &self.ingredients {
                writeln!(f, "  • {ingredient}")?;
            }
        }

        if !self.steps.is_empty() {
            writeln!(f, "\nSteps:")?;
            for (idx, step) in self.steps.iter().enumerate() {
                writeln!(f, "  {}. {}", idx + 1, step)?;
            }
        }

        writeln!(f, "\n[extracted via: {}]", self.extraction)
    }
}

/// Greedy word wrap; words longer than `width` get a line of their own.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
