use std::borrow::Cow;
use std::marker::PhantomData;

use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::FlowError;
use crate::providers::LlmProvider;

/// A named, immutable prompt template.
///
/// The template text uses Handlebars-style placeholders: `{{field}}` and
/// `{{{field}}}` substitute a scalar field (arrays of scalars render as a
/// comma-separated list), and `{{#each field}}...{{/each}}` repeats its body
/// once per array element with `{{this}}` bound to the element.
///
/// Built-in templates are embedded at compile time with `include_str!`;
/// translated variants derived at runtime carry an owned copy of the text
/// but keep the original name and contracts.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    name: &'static str,
    source: Cow<'static, str>,
}

impl PromptTemplate {
    pub const fn new(name: &'static str, source: &'static str) -> Self {
        PromptTemplate {
            name,
            source: Cow::Borrowed(source),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Derive a variant with replaced template text (used for translated
    /// prompts). The name and the input/output contracts stay the same.
    pub fn with_source(&self, source: String) -> Self {
        PromptTemplate {
            name: self.name,
            source: Cow::Owned(source),
        }
    }

    /// Render the template against a JSON object of input fields.
    ///
    /// Missing fields and shape mismatches (a scalar where an array is
    /// declared, or vice versa) fail before any model call is made.
    pub fn render(&self, vars: &Value) -> Result<String, FlowError> {
        let fields = vars.as_object().ok_or_else(|| {
            FlowError::InvalidInput("template input must be a JSON object".to_string())
        })?;
        let expanded = expand_each_blocks(&self.source, fields)?;
        substitute_placeholders(&expanded, fields)
    }
}

/// A prompt template coupled with its input and output data contracts.
///
/// `invoke` performs exactly one model call: it renders the template from
/// the serialized input, submits the text to the provider, and decodes the
/// completion into `O`. A completion that cannot be decoded is a schema
/// mismatch; no partial value is ever returned.
pub struct Prompt<I, O> {
    template: PromptTemplate,
    _contract: PhantomData<fn(I) -> O>,
}

impl<I, O> Prompt<I, O>
where
    I: Serialize,
    O: DeserializeOwned,
{
    pub const fn new(template: PromptTemplate) -> Self {
        Prompt {
            template,
            _contract: PhantomData,
        }
    }

    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }

    /// Derive a prompt with replaced template text but identical contracts
    pub fn with_template_source(&self, source: String) -> Self {
        Prompt {
            template: self.template.with_source(source),
            _contract: PhantomData,
        }
    }

    pub async fn invoke(&self, provider: &dyn LlmProvider, input: &I) -> Result<O, FlowError> {
        let vars = serde_json::to_value(input)
            .map_err(|e| FlowError::InvalidInput(e.to_string()))?;
        let rendered = self.template.render(&vars)?;
        debug!(
            "Invoking prompt '{}' via {} ({} chars)",
            self.template.name(),
            provider.provider_name(),
            rendered.len()
        );

        let completion = provider.complete(&rendered).await?;
        let payload = extract_json_payload(&completion);
        serde_json::from_str(payload).map_err(|e| {
            FlowError::SchemaMismatch(format!("prompt '{}': {}", self.template.name(), e))
        })
    }
}

fn expand_each_blocks(source: &str, fields: &Map<String, Value>) -> Result<String, FlowError> {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;

    while let Some(start) = rest.find("{{#each ") {
        out.push_str(&rest[..start]);
        let after_tag = &rest[start + "{{#each ".len()..];
        let tag_end = after_tag.find("}}").ok_or_else(|| {
            FlowError::InvalidInput("unterminated {{#each}} tag".to_string())
        })?;
        let name = after_tag[..tag_end].trim();
        let body_and_rest = &after_tag[tag_end + 2..];
        let block_end = body_and_rest.find("{{/each}}").ok_or_else(|| {
            FlowError::InvalidInput(format!("missing {{{{/each}}}} for '{name}'"))
        })?;
        let body = &body_and_rest[..block_end];

        let items = fields
            .get(name)
            .ok_or_else(|| FlowError::InvalidInput(format!("missing template field '{name}'")))?
            .as_array()
            .ok_or_else(|| {
                FlowError::InvalidInput(format!("template field '{name}' must be an array"))
            })?;

        for item in items {
            let text = scalar_to_string(name, item)?;
            out.push_str(&body.replace("{{{this}}}", &text).replace("{{this}}", &text));
        }

        rest = &body_and_rest[block_end + "{{/each}}".len()..];
    }

    out.push_str(rest);
    Ok(out)
}

fn substitute_placeholders(source: &str, fields: &Map<String, Value>) -> Result<String, FlowError> {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        rest = &rest[start..];
        let (open, close) = if rest.starts_with("{{{") {
            ("{{{", "}}}")
        } else {
            ("{{", "}}")
        };
        let inner = &rest[open.len()..];
        let end = inner.find(close).ok_or_else(|| {
            FlowError::InvalidInput("unterminated placeholder".to_string())
        })?;
        let name = inner[..end].trim();
        let value = fields
            .get(name)
            .ok_or_else(|| FlowError::InvalidInput(format!("missing template field '{name}'")))?;
        out.push_str(&scalar_to_string(name, value)?);
        rest = &inner[end + close.len()..];
    }

    out.push_str(rest);
    Ok(out)
}

fn scalar_to_string(name: &str, value: &Value) -> Result<String, FlowError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Array(items) => {
            let mut parts = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(s) => parts.push(s.clone()),
                    Value::Number(n) => parts.push(n.to_string()),
                    _ => {
                        return Err(FlowError::InvalidInput(format!(
                            "template field '{name}' contains a non-scalar element"
                        )))
                    }
                }
            }
            Ok(parts.join(", "))
        }
        _ => Err(FlowError::InvalidInput(format!(
            "template field '{name}' is not renderable"
        ))),
    }
}

/// Pull the JSON payload out of a raw completion.
/// Models sometimes wrap the JSON in a markdown code fence or add prose
/// around it; everything outside the outermost braces is discarded.
fn extract_json_payload(raw: &str) -> &str {
    let trimmed = raw.trim();
    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|s| s.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed);
    match (unfenced.find('{'), unfenced.rfind('}')) {
        (Some(start), Some(end)) if start < end => &unfenced[start..=end],
        _ => unfenced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_scalar_placeholders() {
        let template = PromptTemplate::new("test", "Hello {{name}}, welcome to {{{place}}}!");
        let rendered = template
            .render(&json!({"name": "Chef", "place": "the kitchen"}))
            .unwrap();
        assert_eq!(rendered, "Hello Chef, welcome to the kitchen!");
    }

    #[test]
    fn test_render_array_as_comma_list() {
        let template = PromptTemplate::new("test", "Available: {{{items}}}.");
        let rendered = template
            .render(&json!({"items": ["tofu", "rice", "soy sauce"]}))
            .unwrap();
        assert_eq!(rendered, "Available: tofu, rice, soy sauce.");
    }

    #[test]
    fn test_render_each_block() {
        let template =
            PromptTemplate::new("test", "Ingredients:\n{{#each items}}- {{{this}}}\n{{/each}}Done");
        let rendered = template.render(&json!({"items": ["eggs", "spinach"]})).unwrap();
        assert_eq!(rendered, "Ingredients:\n- eggs\n- spinach\nDone");
    }

    #[test]
    fn test_render_each_block_empty_array() {
        let template = PromptTemplate::new("test", "List:\n{{#each items}}- {{this}}\n{{/each}}");
        let rendered = template.render(&json!({"items": []})).unwrap();
        assert_eq!(rendered, "List:\n");
    }

    #[test]
    fn test_render_missing_field_is_invalid_input() {
        let template = PromptTemplate::new("test", "Hello {{name}}");
        let err = template.render(&json!({})).unwrap_err();
        assert!(matches!(err, FlowError::InvalidInput(_)));
    }

    #[test]
    fn test_render_scalar_where_array_declared() {
        let template = PromptTemplate::new("test", "{{#each items}}{{this}}{{/each}}");
        let err = template.render(&json!({"items": "not-an-array"})).unwrap_err();
        assert!(matches!(err, FlowError::InvalidInput(_)));
    }

    #[test]
    fn test_render_non_object_input() {
        let template = PromptTemplate::new("test", "hi");
        let err = template.render(&json!(["a"])).unwrap_err();
        assert!(matches!(err, FlowError::InvalidInput(_)));
    }

    #[test]
    fn test_with_source_keeps_name() {
        let template = PromptTemplate::new("suggest_recipes", "original {{x}}");
        let derived = template.with_source("translated {{x}}".to_string());
        assert_eq!(derived.name(), "suggest_recipes");
        assert_eq!(derived.source(), "translated {{x}}");
    }

    #[test]
    fn test_extract_json_payload_plain() {
        assert_eq!(extract_json_payload(r#"{"a": 1}"#), r#"{"a": 1}"#);
    }

    #[test]
    fn test_extract_json_payload_fenced() {
        let raw = "```json\n{\"a\": 1}\n```";
        assert_eq!(extract_json_payload(raw), "{\"a\": 1}");
    }

    #[test]
    fn test_extract_json_payload_with_prose() {
        let raw = "Here is your recipe:\n{\"a\": 1}\nEnjoy!";
        assert_eq!(extract_json_payload(raw), "{\"a\": 1}");
    }
}
