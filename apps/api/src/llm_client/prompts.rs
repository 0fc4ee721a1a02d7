// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_RULES: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction appended to every extraction prompt.
pub const NO_GUESSING_INSTRUCTION: &str = "\
    Only extract what the text states. If a field is not present, use null \
    (or an empty list for list fields). Do NOT infer employers, dates or degrees.";

/// Caps the text sent to the model. Cuts on a char boundary.
pub fn truncate_for_prompt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_prompt_short_text_untouched() {
        assert_eq!(truncate_for_prompt("abc", 10), "abc");
    }

    #[test]
    fn test_truncate_for_prompt_respects_char_boundaries() {
        assert_eq!(truncate_for_prompt("héllo wörld", 4), "héll");
    }
}
