//! Heuristic extraction for pages without structured recipe data.

use log::debug;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use url::Url;

use crate::model::{Extraction, Recipe, LEGAL_NOTE, UNTITLED};

static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());
static H1_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").unwrap());
static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("body").unwrap());
static SEMANTIC_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("article, main, [role=main]").unwrap());
static PARAGRAPH_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());
static LIST_ITEM_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("li").unwrap());
static LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());
static CANDIDATE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div, section, td, article, main").unwrap());

/// Subtrees that never hold recipe content.
const BOILERPLATE_TAGS: &[&str] = &[
    "script", "style", "noscript", "nav", "header", "footer", "aside", "form",
];

const TITLE_DELIMITERS: &[&str] = &[" | ", " - ", " – ", " — ", " :: ", " / "];

const UNIT_LEXICON: &[&str] = &[
    "cup", "tsp", "tbsp", "teaspoon", "tablespoon", "g", "gram", "kg", "ml", "l", "oz",
    "ounce", "lb",
];

const MAX_ITEMS: usize = 50;
const MIN_STEP_WORDS: usize = 5;
const MIN_PARAGRAPH_CHARS: usize = 25;
const MIN_CANDIDATE_SCORE: f64 = 5.0;

/// Builds a best-effort record from the main content of a page.
pub struct ReadabilityExtractor;

impl ReadabilityExtractor {
    pub fn extract(&self, document: &Html, final_url: &Url) -> Recipe {
        let title = short_title(document);
        let root = main_content(document);

        let (ingredients, steps) = match root {
            Some(root) => (ingredient_lines(root), step_paragraphs(root)),
            None => (Vec::new(), Vec::new()),
        };
        debug!(
            "ReadabilityExtractor: {} ingredient(s), {} step(s) for {}",
            ingredients.len(),
            steps.len(),
            final_url
        );

        Recipe {
            title,
            description: None,
            servings: None,
            prep_time_min: None,
            cook_time_min: None,
            total_time_min: None,
            ingredients,
            steps,
            source_url: final_url.to_string(),
            source_host: final_url.host_str().map(String::from),
            extraction: Extraction::Readability,
            legal_note: LEGAL_NOTE.to_string(),
            raw_json: None,
        }
    }
}

/// `<title>` minus the site name, else the first `<h1>`, else `Untitled`.
fn short_title(document: &Html) -> String {
    let from_title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|el| el.text().collect::<String>())
        .and_then(|title| {
            let title = title.trim();
            let segment = TITLE_DELIMITERS
                .iter()
                .find(|delimiter| title.contains(**delimiter))
                .and_then(|delimiter| title.split(*delimiter).next())
                .unwrap_or(title)
                .trim();
            (!segment.is_empty()).then(|| segment.to_string())
        });

    from_title
        .or_else(|| {
            document
                .select(&H1_SELECTOR)
                .next()
                .map(|el| el.text().collect::<String>().trim().to_string())
                .filter(|h1| !h1.is_empty())
        })
        .unwrap_or_else(|| UNTITLED.to_string())
}

/// Pick the element most likely to hold the article body.
///
/// An `<article>`/`<main>` that carries text wins outright; otherwise
/// paragraphs score their parent (full) and grandparent (half), discounted
/// by link density. Falls back to `<body>`.
fn main_content(document: &Html) -> Option<ElementRef<'_>> {
    let semantic = document
        .select(&SEMANTIC_SELECTOR)
        .find(|el| !in_boilerplate(*el, None) && has_content(*el));
    if let Some(el) = semantic {
        debug!("ReadabilityExtractor: using <{}>", el.value().name());
        return Some(el);
    }

    let mut scores: HashMap<_, f64> = HashMap::new();
    for paragraph in document.select(&PARAGRAPH_SELECTOR) {
        if in_boilerplate(paragraph, None) {
            continue;
        }
        let text = paragraph.text().collect::<String>();
        let length = text.trim().chars().count();
        if length < MIN_PARAGRAPH_CHARS {
            continue;
        }
        let score = 1.0 + text.matches(',').count() as f64 + (length as f64 / 100.0).min(3.0);

        let parent = paragraph.parent().and_then(ElementRef::wrap);
        if let Some(parent) = parent {
            *scores.entry(parent.id()).or_default() += score;
            if let Some(grandparent) = parent.parent().and_then(ElementRef::wrap) {
                *scores.entry(grandparent.id()).or_default() += score / 2.0;
            }
        }
    }

    // Document order breaks ties
    let best = document
        .select(&CANDIDATE_SELECTOR)
        .filter_map(|el| {
            let score = scores.get(&el.id())?;
            Some((el, score * (1.0 - link_density(el))))
        })
        .filter(|(_, score)| *score >= MIN_CANDIDATE_SCORE)
        .fold(None, |best: Option<(ElementRef, f64)>, (el, score)| match best {
            Some((_, top)) if top >= score => best,
            _ => Some((el, score)),
        });

    match best {
        Some((el, score)) => {
            debug!(
                "ReadabilityExtractor: best candidate <{}> scored {:.1}",
                el.value().name(),
                score
            );
            Some(el)
        }
        None => document.select(&BODY_SELECTOR).next(),
    }
}

fn has_content(el: ElementRef) -> bool {
    el.select(&PARAGRAPH_SELECTOR)
        .chain(el.select(&LIST_ITEM_SELECTOR))
        .any(|child| !child.text().collect::<String>().trim().is_empty())
}

fn link_density(el: ElementRef) -> f64 {
    let total = el.text().map(|t| t.chars().count()).sum::<usize>();
    if total == 0 {
        return 0.0;
    }
    let linked = el
        .select(&LINK_SELECTOR)
        .flat_map(|a| a.text())
        .map(|t| t.chars().count())
        .sum::<usize>();
    linked as f64 / total as f64
}

/// True when `el` sits inside a boilerplate subtree below `root`.
fn in_boilerplate(el: ElementRef, root: Option<ElementRef>) -> bool {
    std::iter::once(el)
        .chain(el.ancestors().filter_map(ElementRef::wrap))
        .take_while(|node| root.map_or(true, |root| node.id() != root.id()))
        .any(|node| BOILERPLATE_TAGS.contains(&node.value().name()))
}

fn content_texts<'a>(root: ElementRef<'a>, selector: &'a Selector) -> impl Iterator<Item = String> + 'a {
    root.select(selector)
        .filter(move |el| !in_boilerplate(*el, Some(root)))
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}

fn ingredient_lines(root: ElementRef) -> Vec<String> {
    content_texts(root, &LIST_ITEM_SELECTOR)
        .filter(|text| mentions_unit(text))
        .take(MAX_ITEMS)
        .collect()
}

fn step_paragraphs(root: ElementRef) -> Vec<String> {
    content_texts(root, &PARAGRAPH_SELECTOR)
        .filter(|text| text.split_whitespace().count() > MIN_STEP_WORDS)
        .take(MAX_ITEMS)
        .collect()
}

/// Substring match against the lowercase text, so `cups`, `200g` and
/// `tablespoonful` all count. Single-letter units make this loose.
fn mentions_unit(text: &str) -> bool {
    let lower = text.to_lowercase();
    UNIT_LEXICON.iter().any(|unit| lower.contains(unit))
}
