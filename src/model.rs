use serde::{Deserialize, Serialize};

/// Output language for flow results.
///
/// `En` renders the built-in English prompt text directly; `Ar` first
/// translates the prompt template through the model before invoking it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "ar")]
    Ar,
}

impl Language {
    /// Human-readable language name, as embedded in the translation prompt
    pub fn english_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Ar => "Arabic",
        }
    }

    /// Parse a language tag such as "en" or "ar"
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "en" => Some(Language::En),
            "ar" => Some(Language::Ar),
            _ => None,
        }
    }
}

/// A single recipe as produced by the model.
/// Flow code passes these through unchanged; it never constructs or edits them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
}

/// Result of the recipe suggestion flow. An empty list is a valid,
/// non-error outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeSuggestions {
    pub recipes: Vec<Recipe>,
}

/// Request for the ingredient substitution flow
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubstitutionRequest {
    pub recipe_name: String,
    pub original_ingredient: String,
    pub available_ingredients: Vec<String>,
    #[serde(default)]
    pub language: Language,
}

/// Result of the ingredient substitution flow
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Substitution {
    pub suggested_substitutes: Vec<String>,
    pub reasoning: String,
}

/// Split a raw comma-separated ingredient string into a clean list.
///
/// Entries are trimmed and empties dropped; duplicates and ordering are
/// preserved as entered, the model deals with them.
pub fn parse_ingredient_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
