//! LLM-backed analysis endpoints: match analysis, optimization plan, and
//! layout/ATS-compatibility check. Thin handlers: validate, prompt, forward.

pub mod handlers;
pub mod models;
pub mod prompts;
