// Shared prompt fragments. Each feature that calls the LLM keeps its own prompts.rs.

/// Appended to every system prompt: the reply is parsed, so it must be bare JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// The product serves Vietnamese job seekers and employers.
pub const LANGUAGE_INSTRUCTION: &str =
    "Write every human-readable string value in Vietnamese. Keep JSON keys in English.";
