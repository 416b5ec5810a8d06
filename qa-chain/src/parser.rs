//! Query structuring: split freeform input into question + answer language.
//!
//! One generation call with a fixed instruction prompt, then validation of
//! the model output against the [`StructuredQuery`] schema. Validation is a
//! swappable strategy so callers can substitute a stricter (or test) one.

use std::sync::Arc;

use llm_service::LlmServiceProfiles;
use serde::Deserialize;
use tracing::debug;

use crate::error::ParseError;
use crate::prompt;

/// Structured form of a freeform user query.
///
/// Invariant: `question` does not contain the language directive, and
/// `language` is never empty (it defaults to `"english"`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StructuredQuery {
    /// Question asked by the user.
    pub question: String,
    /// Language requested by the user to respond in.
    #[serde(default)]
    pub language: String,
}

/// Validation strategy for the model's structuring output.
pub trait SchemaValidator: Send + Sync {
    /// Validates raw model output into a [`StructuredQuery`].
    fn validate(&self, raw: &str) -> Result<StructuredQuery, ParseError>;
}

/// Default validator: extract the first JSON object from the output and
/// deserialize it against the schema.
#[derive(Debug, Default)]
pub struct JsonSchemaValidator;

impl SchemaValidator for JsonSchemaValidator {
    fn validate(&self, raw: &str) -> Result<StructuredQuery, ParseError> {
        // Models often wrap JSON in prose or code fences; take the outermost
        // object rather than insisting on a bare payload.
        let start = raw.find('{').ok_or(ParseError::MissingJson)?;
        let end = raw.rfind('}').ok_or(ParseError::MissingJson)?;
        if end < start {
            return Err(ParseError::MissingJson);
        }

        let mut parsed: StructuredQuery = serde_json::from_str(&raw[start..=end])?;

        if parsed.question.trim().is_empty() {
            return Err(ParseError::EmptyQuestion);
        }
        if parsed.language.trim().is_empty() {
            parsed.language = "english".to_string();
        }

        Ok(parsed)
    }
}

/// Parser issuing the structuring call and validating its output.
pub struct QueryParser {
    profiles: Arc<LlmServiceProfiles>,
    validator: Box<dyn SchemaValidator>,
}

impl QueryParser {
    /// Creates a parser with the default JSON schema validator.
    pub fn new(profiles: Arc<LlmServiceProfiles>) -> Self {
        Self::with_validator(profiles, Box::new(JsonSchemaValidator))
    }

    /// Creates a parser with a custom validation strategy.
    pub fn with_validator(
        profiles: Arc<LlmServiceProfiles>,
        validator: Box<dyn SchemaValidator>,
    ) -> Self {
        Self {
            profiles,
            validator,
        }
    }

    /// Extracts a [`StructuredQuery`] from freeform input.
    ///
    /// # Errors
    /// - [`ParseError::Generation`] if the structuring call fails.
    /// - Validation errors if the model output does not match the schema.
    pub async fn parse(&self, raw: &str) -> Result<StructuredQuery, ParseError> {
        let prompt = prompt::build_structure_prompt(raw);
        let output = self
            .profiles
            .generate(&prompt, Some(prompt::STRUCTURE_SYSTEM))
            .await
            .map_err(ParseError::Generation)?;

        let parsed = self.validator.validate(&output)?;
        debug!(
            question = %parsed.question,
            language = %parsed.language,
            "query structured"
        );
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_plain_json() {
        let out = JsonSchemaValidator
            .validate(r#"{"question": "What is the capital of France?", "language": "French"}"#)
            .unwrap();
        assert_eq!(out.question, "What is the capital of France?");
        assert_eq!(out.language, "French");
        assert!(!out.question.to_lowercase().contains("french"));
    }

    #[test]
    fn validates_fenced_json() {
        let raw = "Here you go:\n```json\n{\"question\": \"Who is Ada Lovelace?\", \"language\": \"english\"}\n```";
        let out = JsonSchemaValidator.validate(raw).unwrap();
        assert_eq!(out.question, "Who is Ada Lovelace?");
    }

    #[test]
    fn empty_language_defaults_to_english() {
        let out = JsonSchemaValidator
            .validate(r#"{"question": "Who is Ada Lovelace?", "language": ""}"#)
            .unwrap();
        assert_eq!(out.language, "english");

        let out = JsonSchemaValidator
            .validate(r#"{"question": "Who is Ada Lovelace?"}"#)
            .unwrap();
        assert_eq!(out.language, "english");
    }

    #[test]
    fn missing_json_is_a_parse_error() {
        let err = JsonSchemaValidator.validate("no structure here").unwrap_err();
        assert!(matches!(err, ParseError::MissingJson));
    }

    #[test]
    fn schema_mismatch_is_a_parse_error() {
        let err = JsonSchemaValidator
            .validate(r#"{"query": "wrong field"}"#)
            .unwrap_err();
        assert!(matches!(err, ParseError::Schema(_)));
    }

    #[test]
    fn blank_question_is_rejected() {
        let err = JsonSchemaValidator
            .validate(r#"{"question": "   ", "language": "english"}"#)
            .unwrap_err();
        assert!(matches!(err, ParseError::EmptyQuestion));
    }
}
