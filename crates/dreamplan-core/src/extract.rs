//! Extraction of a JSON object from free-text model output.
//!
//! The model is asked for a single JSON object but replies with prose around
//! it often enough that a plain parse is not viable. A greedy first-`{` to
//! last-`}` match breaks on replies with trailing brace characters, so this
//! is a balanced scan instead: string- and escape-aware, returning the first
//! complete object.

/// Return the first balanced `{...}` substring of `text`, if any.
///
/// Brace characters inside JSON string literals (including escaped quotes)
/// do not affect the balance. Returns `None` when no `{` occurs or the first
/// object never closes.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth: usize = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + i + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}
