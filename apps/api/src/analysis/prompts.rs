// Prompt template for resume analysis.

/// Resume text beyond this many characters is dropped before prompting.
/// No truncation marker is added.
pub const MAX_RESUME_CHARS: usize = 10_000;

/// Analysis prompt. Replace `{resume_text}` before sending.
pub const RESUME_ANALYSIS_PROMPT_TEMPLATE: &str = r#"You are an AI resume reviewer. Analyze this resume and return structured JSON only.
Respond in this exact JSON format:
{
  "score": 85,
  "summary": "Brief professional summary here",
  "strengths": ["Strength 1", "Strength 2", "Strength 3"],
  "weaknesses": ["Weakness 1", "Weakness 2"],
  "keywords_to_add": ["Keyword 1", "Keyword 2"],
  "grammar_and_formatting": ["Suggestion 1", "Suggestion 2"],
  "recommended_changes": ["Change 1", "Change 2"]
}

"score" is an integer from 0 to 100. "summary" is a single line.
Every other field is a list of short strings.

Resume content:
{resume_text}
"#;

pub fn build_prompt(resume_text: &str) -> String {
    RESUME_ANALYSIS_PROMPT_TEMPLATE
        .replace("{resume_text}", truncate_chars(resume_text, MAX_RESUME_CHARS))
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_resume_and_schema() {
        let prompt = build_prompt("Jane Doe, Rust engineer");
        assert!(prompt.contains("Jane Doe, Rust engineer"));
        for key in [
            "\"score\"",
            "\"summary\"",
            "\"strengths\"",
            "\"weaknesses\"",
            "\"keywords_to_add\"",
            "\"grammar_and_formatting\"",
            "\"recommended_changes\"",
        ] {
            assert!(prompt.contains(key), "missing {key}");
        }
        assert!(!prompt.contains("{resume_text}"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(build_prompt("same input"), build_prompt("same input"));
    }

    #[test]
    fn test_long_text_truncated_to_limit() {
        let text = format!("{}{}", "a".repeat(MAX_RESUME_CHARS), "TAIL");
        let prompt = build_prompt(&text);
        assert!(prompt.contains(&"a".repeat(MAX_RESUME_CHARS)));
        assert!(!prompt.contains("TAIL"));
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let text = "é".repeat(MAX_RESUME_CHARS + 5);
        let truncated = truncate_chars(&text, MAX_RESUME_CHARS);
        assert_eq!(truncated.chars().count(), MAX_RESUME_CHARS);
    }

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(truncate_chars("short", MAX_RESUME_CHARS), "short");
    }
}
