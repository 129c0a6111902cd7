// LLM prompt constants and builders for the analysis endpoints.

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

const MATCH_SCHEMA: &str = r#"{
  "matchScore": <number 0-100>,
  "categoryScores": {
    "skills": <number 0-100>,
    "experience": <number 0-100>,
    "education": <number 0-100>,
    "relevance": <number 0-100>
  },
  "matchedKeywords": [<array of matched keywords/phrases>],
  "missingKeywords": [<array of important keywords from job description not found in resume>],
  "summaryFeedback": "<detailed explanation of the match analysis>"
}"#;

pub fn match_system() -> String {
    format!(
        "You are an expert ATS (Applicant Tracking System) and resume optimization assistant. \
         Your task is to analyze how well a resume matches a job description and provide a detailed, structured analysis.\n\n\
         {JSON_ONLY_SYSTEM}\n\n\
         Output format (must be valid JSON):\n{MATCH_SCHEMA}\n\n\
         Be thorough and specific. The matchScore should reflect overall alignment."
    )
}

pub const MATCH_PROMPT_TEMPLATE: &str = r#"Analyze the following resume and job description:

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}

Provide a comprehensive match analysis."#;

const OPTIMIZE_SCHEMA: &str = r#"{
  "steps": [
    {
      "title": "<step title>",
      "description": "<explanation of what to change and why>",
      "suggestions": [
        {
          "section": "<section name, e.g., 'Summary', 'Experience - Job Title', 'Skills'>",
          "currentText": "<current text from resume>",
          "suggestedText": "<improved version>"
        }
      ]
    }
  ],
  "optimizedResumeText": "<the full resume text with improvements applied>",
  "changesSummary": [<array of one-line summaries of the changes made>]
}"#;

pub fn optimize_system() -> String {
    format!(
        "You are an expert resume optimization assistant. \
         Your task is to create a step-by-step optimization plan to improve a resume's alignment with a job description.\n\n\
         {JSON_ONLY_SYSTEM}\n\n\
         Output format (must be valid JSON):\n{OPTIMIZE_SCHEMA}\n\n\
         Create 4-6 actionable steps covering: headline/summary, skills section, work experience bullets, keywords, and achievements alignment."
    )
}

pub const OPTIMIZE_PROMPT_TEMPLATE: &str = r#"Create an optimization plan for the following resume to better match this job description:

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}

Provide a detailed, step-by-step optimization plan with concrete before/after suggestions."#;

const LAYOUT_SCHEMA: &str = r#"{
  "layoutScore": <number 0-100>,
  "issues": [
    {
      "type": "<issue type, e.g., 'columns', 'tables', 'images', 'fonts', 'headings', 'length'>",
      "description": "<detailed description of the issue>",
      "severity": "<'low' | 'medium' | 'high'>"
    }
  ],
  "recommendations": [<array of actionable recommendations>]
}"#;

pub fn layout_system() -> String {
    format!(
        "You are an expert ATS compatibility analyst. \
         Your task is to analyze resume layout and formatting for ATS compatibility.\n\n\
         {JSON_ONLY_SYSTEM}\n\n\
         Output format (must be valid JSON):\n{LAYOUT_SCHEMA}\n\n\
         Focus on ATS parsing compatibility: one-column layouts, clear headings, bullet structure, \
         standard fonts, appropriate length (1-2 pages), and absence of graphics/icons."
    )
}

pub const LAYOUT_PROMPT_TEMPLATE: &str = r#"Analyze the layout and formatting of the following resume text for ATS compatibility:

{resume_text}

Provide a comprehensive layout analysis with specific issues and recommendations."#;
