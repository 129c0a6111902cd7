// LLM prompt constants and builders for cover letter generation.

use crate::cover_letter::models::{Length, Tone};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

const COVER_LETTER_SCHEMA: &str = r#"{
  "coverLetter": "<the full cover letter text, with paragraphs separated by blank lines>",
  "bulletsUsed": [<array of resume achievements referenced in the letter>],
  "detectedCompany": "<company name found in the job description, or null>",
  "detectedRole": "<role title found in the job description, or null>"
}"#;

pub fn cover_letter_system(tone: Tone, length: Length) -> String {
    let tone_instruction = match tone {
        Tone::Professional => {
            "Write in a polished, professional register. Confident but measured."
        }
        Tone::Enthusiastic => {
            "Write with genuine enthusiasm for the role and company. Energetic but never gushing."
        }
        Tone::Concise => "Write tersely. Short sentences, no filler, every line earns its place.",
    };
    let length_instruction = match length {
        Length::Short => "Keep the letter to 2 short paragraphs, under 150 words.",
        Length::Standard => "Write 3-4 paragraphs, roughly 250-350 words.",
    };

    format!(
        "You are an expert cover letter writer. \
         Your task is to write a tailored cover letter grounded in the candidate's resume and the job description. \
         Never invent experience the resume does not support.\n\n\
         {JSON_ONLY_SYSTEM}\n\n\
         Output format (must be valid JSON):\n{COVER_LETTER_SCHEMA}\n\n\
         {tone_instruction}\n{length_instruction}"
    )
}

/// Builds the user prompt from the resume/JD pair and any optional details
/// the client supplied.
pub fn cover_letter_prompt(
    resume_text: &str,
    job_description: &str,
    company_name: Option<&str>,
    role_title: Option<&str>,
    hiring_manager: Option<&str>,
    location: Option<&str>,
    key_highlights: &[String],
    user_name: Option<&str>,
    contact_info: Option<&str>,
) -> String {
    let mut details = String::new();
    let mut push_detail = |label: &str, value: Option<&str>| {
        if let Some(v) = value.filter(|v| !v.trim().is_empty()) {
            details.push_str(&format!("{label}: {v}\n"));
        }
    };
    push_detail("Company", company_name);
    push_detail("Role", role_title);
    push_detail("Hiring manager", hiring_manager);
    push_detail("Location", location);
    push_detail("Candidate name", user_name);
    push_detail("Contact info", contact_info);
    if !key_highlights.is_empty() {
        details.push_str(&format!(
            "Key highlights to feature: {}\n",
            key_highlights.join("; ")
        ));
    }

    let details_block = if details.is_empty() {
        String::new()
    } else {
        format!("\nADDITIONAL DETAILS:\n{details}")
    };

    format!(
        "Write a cover letter for the following resume and job description:\n\n\
         RESUME:\n{resume_text}\n\n\
         JOB DESCRIPTION:\n{job_description}\n{details_block}\n\
         If the company or role is not given above, detect them from the job description."
    )
}
