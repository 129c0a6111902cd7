//! Skill extraction — pluggable, trait-based extractor behind the scorer.
//!
//! Production: `LlmSkillExtractor` (one model call, JSON schema enforced).
//! Tests: fixture impls returning canned `ExtractionResult`s, so the
//! deterministic scorer is exercised without a live model.
//!
//! `AppState` holds an `Arc<dyn SkillExtractor>`.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::scoring::prompts::{EXTRACTION_PROMPT_TEMPLATE, extraction_system};

/// The four skill lists produced by one extraction call.
///
/// The extractor is an opaque model call and may return partial or malformed
/// data; missing or non-array fields deserialize to empty lists so a broken
/// extraction still yields a best-effort score.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub required_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub preferred_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub resume_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub keywords: Vec<String>,
}

/// Deserializes a JSON array of strings, coercing anything else (null, a
/// bare string, an object) to an empty list. Non-string array elements are
/// dropped rather than stringified.
fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| item.as_str().map(str::to_owned))
            .collect(),
        _ => Vec::new(),
    })
}

/// The skill extractor trait. Implement this to swap backends without
/// touching the endpoint, handler, or scorer code.
#[async_trait]
pub trait SkillExtractor: Send + Sync {
    async fn extract(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<ExtractionResult, AppError>;
}

/// Production extractor backed by the shared LLM client.
pub struct LlmSkillExtractor {
    llm: LlmClient,
}

impl LlmSkillExtractor {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl SkillExtractor for LlmSkillExtractor {
    async fn extract(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<ExtractionResult, AppError> {
        let prompt = EXTRACTION_PROMPT_TEMPLATE
            .replace("{resume_text}", resume_text)
            .replace("{job_description}", job_description);

        self.llm
            .call_json::<ExtractionResult>(&prompt, &extraction_system())
            .await
            .map_err(|e| AppError::Llm(format!("Skill extraction failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_extraction_deserializes() {
        let json = r#"{
            "requiredSkills": ["Python", "SQL"],
            "preferredSkills": ["AWS"],
            "resumeSkills": ["python", "excel"],
            "keywords": ["agile"]
        }"#;
        let result: ExtractionResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.required_skills, vec!["Python", "SQL"]);
        assert_eq!(result.preferred_skills, vec!["AWS"]);
        assert_eq!(result.resume_skills, vec!["python", "excel"]);
        assert_eq!(result.keywords, vec!["agile"]);
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let result: ExtractionResult = serde_json::from_str("{}").unwrap();
        assert!(result.required_skills.is_empty());
        assert!(result.preferred_skills.is_empty());
        assert!(result.resume_skills.is_empty());
        assert!(result.keywords.is_empty());
    }

    #[test]
    fn test_non_array_fields_coerce_to_empty() {
        let json = r#"{
            "requiredSkills": "not an array",
            "preferredSkills": 42,
            "resumeSkills": {"nested": true},
            "keywords": null
        }"#;
        let result: ExtractionResult = serde_json::from_str(json).unwrap();
        assert!(result.required_skills.is_empty());
        assert!(result.preferred_skills.is_empty());
        assert!(result.resume_skills.is_empty());
        assert!(result.keywords.is_empty());
    }

    #[test]
    fn test_non_string_elements_are_dropped() {
        let json = r#"{"requiredSkills": ["Rust", 7, null, "Go"]}"#;
        let result: ExtractionResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.required_skills, vec!["Rust", "Go"]);
    }
}
