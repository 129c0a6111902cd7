// LLM prompt constants for the scoring extractor.

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

/// Output schema for extraction. camelCase to match the API surface.
const EXTRACTION_SCHEMA: &str = r#"{
  "requiredSkills": [<skills the job description explicitly requires>],
  "preferredSkills": [<skills listed as preferred / nice-to-have>],
  "resumeSkills": [<skills and technologies present in the resume>],
  "keywords": [<other important keywords and phrases from the job description>]
}"#;

/// System prompt for skill extraction — enforces JSON-only output.
pub fn extraction_system() -> String {
    format!(
        "You are an expert ATS (Applicant Tracking System) keyword analyst. \
         Your task is to extract skill and keyword lists from a resume and a job description.\n\n\
         {JSON_ONLY_SYSTEM}\n\n\
         Output format (must be valid JSON):\n{EXTRACTION_SCHEMA}\n\n\
         Every entry must be a short free-text skill or keyword name. \
         Do not deduplicate aggressively or normalize casing; list what you see."
    )
}

/// Extraction prompt template. Replace `{resume_text}` and `{job_description}`
/// before sending.
pub const EXTRACTION_PROMPT_TEMPLATE: &str = r#"Extract skill and keyword lists from the following resume and job description:

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}

Return the four lists in the required JSON format."#;
