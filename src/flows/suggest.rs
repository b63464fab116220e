use log::debug;
use serde::Serialize;

use crate::error::FlowError;
use crate::flows::translated_template_source;
use crate::model::{Language, RecipeSuggestions};
use crate::prompt::{Prompt, PromptTemplate};
use crate::providers::LlmProvider;

/// Fields the suggestion template renders. The language tag never reaches
/// the rendered prompt; it only selects the template variant.
#[derive(Debug, Serialize)]
struct SuggestRecipesVars {
    ingredients: Vec<String>,
}

static SUGGEST_RECIPES: Prompt<SuggestRecipesVars, RecipeSuggestions> = Prompt::new(
    PromptTemplate::new("suggest_recipes", include_str!("../prompts/suggest_recipes.txt")),
);

/// Suggest recipes that can be made from the given ingredients.
///
/// With the default language the built-in English template is invoked
/// directly; otherwise the template text is first translated (cached per
/// language) and the derived template invoked with the same contracts.
///
/// The model's recipe list is returned unchanged; an empty list is a valid
/// result, as is an empty ingredient list as input.
pub async fn suggest_recipes(
    provider: &dyn LlmProvider,
    ingredients: &[String],
    language: Language,
) -> Result<RecipeSuggestions, FlowError> {
    let vars = SuggestRecipesVars {
        ingredients: ingredients.to_vec(),
    };

    let suggestions = match language {
        Language::En => SUGGEST_RECIPES.invoke(provider, &vars).await?,
        _ => {
            let source =
                translated_template_source(provider, SUGGEST_RECIPES.template(), language).await?;
            SUGGEST_RECIPES
                .with_template_source(source)
                .invoke(provider, &vars)
                .await?
        }
    };

    debug!("suggest_recipes returned {} recipes", suggestions.recipes.len());
    Ok(suggestions)
}
