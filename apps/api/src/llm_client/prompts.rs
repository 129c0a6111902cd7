// Shared prompt constants.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "\
    CRITICAL: You MUST output ONLY valid JSON. \
    Do not include any text before or after the JSON. \
    No explanations, no markdown formatting, just pure JSON.";
