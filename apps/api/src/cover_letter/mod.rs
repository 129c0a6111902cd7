//! Cover letter generation — one LLM call shaped by tone and length presets
//! plus optional company/role details supplied by the client.

pub mod handlers;
pub mod models;
pub mod prompts;
