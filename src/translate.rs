use serde::{Deserialize, Serialize};

use crate::error::FlowError;
use crate::prompt::{Prompt, PromptTemplate};
use crate::providers::LlmProvider;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TranslateRequest {
    text: String,
    target_language: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslatedText {
    translated_text: String,
}

static TRANSLATE_TEXT: Prompt<TranslateRequest, TranslatedText> = Prompt::new(
    PromptTemplate::new("translate_text", include_str!("prompts/translate.txt")),
);

/// Translate a piece of text to the named target language.
///
/// The text is treated as opaque: prompt templates run through here are
/// translated literally, placeholder syntax included, and the model is
/// relied upon to leave the placeholder tokens intact.
pub async fn translate_text(
    provider: &dyn LlmProvider,
    text: &str,
    target_language: &str,
) -> Result<String, FlowError> {
    let input = TranslateRequest {
        text: text.to_string(),
        target_language: target_language.to_string(),
    };
    let output = TRANSLATE_TEXT.invoke(provider, &input).await?;
    Ok(output.translated_text)
}
