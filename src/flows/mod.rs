pub mod substitute;
pub mod suggest;

pub use substitute::substitute_ingredient;
pub use suggest::suggest_recipes;

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use log::debug;

use crate::error::FlowError;
use crate::model::Language;
use crate::prompt::PromptTemplate;
use crate::providers::LlmProvider;
use crate::translate::translate_text;

/// Translated template variants, keyed by (template name, language).
///
/// A variant is computed at most once per process and reused afterwards.
/// Template source text is fixed at compile time, so there is no
/// invalidation path.
fn translated_templates() -> &'static Mutex<HashMap<(&'static str, Language), String>> {
    static CACHE: OnceLock<Mutex<HashMap<(&'static str, Language), String>>> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Get the template source text for a non-default language, translating it
/// through the model on the first request and serving the cached text after.
///
/// The template text is translated as-is, placeholder syntax included; the
/// model is relied upon to leave the placeholder tokens intact.
pub(crate) async fn translated_template_source(
    provider: &dyn LlmProvider,
    template: &PromptTemplate,
    language: Language,
) -> Result<String, FlowError> {
    let key = (template.name(), language);
    if let Some(hit) = lock(translated_templates()).get(&key).cloned() {
        debug!(
            "Using cached {} variant of template '{}'",
            language.english_name(),
            template.name()
        );
        return Ok(hit);
    }

    let translated = translate_text(provider, template.source(), language.english_name()).await?;

    // Two concurrent misses may both translate; the last write wins.
    lock(translated_templates()).insert(key, translated.clone());
    Ok(translated)
}
