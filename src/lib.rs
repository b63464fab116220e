pub mod config;
pub mod error;
pub mod flows;
pub mod model;
pub mod prompt;
pub mod providers;
pub mod translate;

pub use config::{AiConfig, ProviderConfig};
pub use error::FlowError;
pub use model::{
    parse_ingredient_list, Language, Recipe, RecipeSuggestions, Substitution, SubstitutionRequest,
};
pub use prompt::{Prompt, PromptTemplate};
pub use providers::{
    AnthropicProvider, LlmProvider, OllamaProvider, OpenAIProvider, ProviderFactory,
};

use log::debug;

/// Build the default provider: from `config.toml` / `FRIDGECHEF__*`
/// environment variables when present, otherwise from the conventional
/// `OPENAI_API_KEY` environment variable.
pub fn default_provider() -> Result<Box<dyn LlmProvider>, FlowError> {
    match AiConfig::load() {
        Ok(ai_config) => ProviderFactory::get_default_provider(&ai_config),
        Err(e) => {
            debug!("No usable config ({e}), falling back to OPENAI_API_KEY");
            let api_key = std::env::var("OPENAI_API_KEY")?;
            let model =
                std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4.1-mini".to_string());
            Ok(Box::new(OpenAIProvider::with_api_key(api_key, model)))
        }
    }
}

/// Suggest recipes from an ingredient list using the default provider.
pub async fn suggest_recipes(
    ingredients: &[String],
    language: Language,
) -> Result<RecipeSuggestions, FlowError> {
    let provider = default_provider()?;
    flows::suggest_recipes(provider.as_ref(), ingredients, language).await
}

/// Suggest substitutes for a missing ingredient using the default provider.
pub async fn substitute_ingredient(
    request: &SubstitutionRequest,
) -> Result<Substitution, FlowError> {
    let provider = default_provider()?;
    flows::substitute_ingredient(provider.as_ref(), request).await
}
