//! Carves the first JSON object out of free-form model output.
//!
//! Models often wrap the requested JSON in prose or code fences. Rather than a
//! greedy `\{[\s\S]*\}` match, this walks from the first `{` and tracks brace
//! depth, skipping braces that appear inside string literals.

/// Returns the first balanced `{...}` region of `text`, braces included.
/// `None` if there is no `{` or it is never closed.
pub fn first_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + ch.len_utf8();
                    return Some(&text[start..end]);
                }
            }
            _ => {}
        }
    }

    None
}
