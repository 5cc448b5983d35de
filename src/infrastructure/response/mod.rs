use crate::domain::error::{AppError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static THINK_TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<think>[\s\S]*?</think>|<think\s*/>").unwrap());

static MULTIPLE_NEWLINES_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Cleans a conversational LLM reply: reasoning tags out, whitespace tidied.
pub fn clean_llm_response(response: &str) -> String {
    let cleaned = THINK_TAG_PATTERN.replace_all(response, "");
    let cleaned = cleaned.trim();
    MULTIPLE_NEWLINES_PATTERN
        .replace_all(cleaned, "\n\n")
        .to_string()
}

/// Strips a surrounding markdown code fence, if any.
pub fn strip_code_fence(value: &str) -> &str {
    let trimmed = value.trim();
    if let Some(stripped) = trimmed.strip_prefix("```json") {
        return stripped.trim().trim_end_matches("```").trim();
    }
    if let Some(stripped) = trimmed.strip_prefix("```") {
        return stripped.trim().trim_end_matches("```").trim();
    }
    trimmed
}

/// Extracts the first balanced `[...]` JSON array from free text. The scan
/// ignores brackets inside string literals; if no balanced close is found
/// the slice falls back to first-`[`/last-`]`.
pub fn extract_json_array(text: &str) -> Result<&str> {
    let text = strip_code_fence(text);
    let start = text
        .find('[')
        .ok_or_else(|| AppError::ParseError("No JSON array found in reply".to_string()))?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&text[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    // Unbalanced reply; take everything up to the last closing bracket.
    match text.rfind(']') {
        Some(end) if end > start => Ok(&text[start..=end]),
        _ => Err(AppError::ParseError(
            "No JSON array found in reply".to_string(),
        )),
    }
}
