//! ATS scoring — deterministic score over LLM-extracted skill lists.
//!
//! The extractor (one LLM call) turns a resume/JD pair into four skill lists;
//! the scorer is pure arithmetic over those lists and never touches the model.

pub mod extractor;
pub mod handlers;
pub mod prompts;
pub mod scorer;
