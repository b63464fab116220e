use log::debug;
use serde::Serialize;

use crate::error::FlowError;
use crate::flows::translated_template_source;
use crate::model::{Language, Substitution, SubstitutionRequest};
use crate::prompt::{Prompt, PromptTemplate};
use crate::providers::LlmProvider;

/// Fields the substitution template renders: exactly the recipe name, the
/// missing ingredient, and what is available. The language tag stays out.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubstituteIngredientVars {
    recipe_name: String,
    original_ingredient: String,
    available_ingredients: Vec<String>,
}

static SUBSTITUTE_INGREDIENT: Prompt<SubstituteIngredientVars, Substitution> = Prompt::new(
    PromptTemplate::new(
        "substitute_ingredient",
        include_str!("../prompts/substitute_ingredient.txt"),
    ),
);

/// Suggest substitutes for an ingredient missing from a recipe.
///
/// Same branch structure as the suggestion flow: the default language
/// invokes the English template directly, any other language goes through
/// the cached translation first. An original ingredient that also appears
/// in the available list is passed through unvalidated; the model judges it.
pub async fn substitute_ingredient(
    provider: &dyn LlmProvider,
    request: &SubstitutionRequest,
) -> Result<Substitution, FlowError> {
    let vars = SubstituteIngredientVars {
        recipe_name: request.recipe_name.clone(),
        original_ingredient: request.original_ingredient.clone(),
        available_ingredients: request.available_ingredients.clone(),
    };

    let substitution = match request.language {
        Language::En => SUBSTITUTE_INGREDIENT.invoke(provider, &vars).await?,
        _ => {
            let source = translated_template_source(
                provider,
                SUBSTITUTE_INGREDIENT.template(),
                request.language,
            )
            .await?;
            SUBSTITUTE_INGREDIENT
                .with_template_source(source)
                .invoke(provider, &vars)
                .await?
        }
    };

    debug!(
        "substitute_ingredient returned {} substitutes for '{}'",
        substitution.suggested_substitutes.len(),
        request.original_ingredient
    );
    Ok(substitution)
}
