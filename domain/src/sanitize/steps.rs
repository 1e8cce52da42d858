//! Individual repair steps of the response sanitizer.
//!
//! Each step is a pure `&str -> String` transformation that leaves
//! already-clean JSON untouched, so steps can be composed freely and
//! tested in isolation.

use regex::Regex;
use std::sync::LazyLock;

static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```[A-Za-z0-9_+\-]*").expect("valid regex"));

static LINE_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n\t]+").expect("valid regex"));

static TRAILING_COMMA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([}\]])").expect("valid regex"));

static UNQUOTED_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([{,]\s*)'?([A-Za-z_][A-Za-z0-9_\-]*)'?\s*:"#).expect("valid regex")
});

/// Remove markdown fence markers (with optional language tag) and stray
/// leading/trailing backticks.
pub fn strip_code_fences(text: &str) -> String {
    FENCE_RE
        .replace_all(text, "")
        .trim()
        .trim_matches('`')
        .trim()
        .to_string()
}

/// Locate the first balanced top-level `{...}` or `[...]` span.
///
/// Whichever opener appears first wins. Brackets inside string literals
/// are ignored. When the span never closes (truncated output), the span
/// runs to the last matching closer, or to the end of the text.
pub fn extract_json_span(text: &str) -> Option<&str> {
    let start = text.find(['{', '['])?;
    let opener = text[start..].chars().next()?;
    let closer = if opener == '{' { '}' } else { ']' };

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
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
            '{' | '[' => depth += 1,
            '}' | ']' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    let end = start + offset + c.len_utf8();
                    return Some(&text[start..end]);
                }
            }
            _ => {}
        }
    }

    match text.rfind(closer) {
        Some(end) if end > start => Some(&text[start..=end]),
        _ => Some(&text[start..]),
    }
}

/// Drop C0/C1 control characters, keeping the whitespace ones
/// (`\t`, `\n`, `\r`) for [`collapse_line_breaks`].
pub fn remove_control_chars(text: &str) -> String {
    text.chars()
        .filter(|&c| {
            let code = c as u32;
            let control = code <= 0x1F || (0x7F..=0x9F).contains(&code);
            !control || matches!(c, '\t' | '\n' | '\r')
        })
        .collect()
}

/// Double every backslash that does not start a valid JSON escape.
pub fn repair_escapes(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c != '\\' {
            out.push(c);
            i += 1;
            continue;
        }

        let valid = match chars.get(i + 1) {
            Some('"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't') => true,
            Some('u') => {
                chars.len() >= i + 6 && chars[i + 2..i + 6].iter().all(|h| h.is_ascii_hexdigit())
            }
            _ => false,
        };

        if valid {
            out.push('\\');
            out.push(chars[i + 1]);
            i += 2;
        } else {
            out.push_str("\\\\");
            i += 1;
        }
    }

    out
}

/// Collapse raw line breaks and tabs into single spaces.
///
/// Models often emit unescaped newlines inside string values; between
/// tokens a space is equivalent.
pub fn collapse_line_breaks(text: &str) -> String {
    LINE_BREAK_RE.replace_all(text, " ").into_owned()
}

/// Remove commas directly preceding `}` or `]`.
pub fn remove_trailing_commas(text: &str) -> String {
    TRAILING_COMMA_RE.replace_all(text, "$1").into_owned()
}

/// Remove `//` comments that start outside string literals.
pub fn strip_line_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        if c == '/' && chars.peek() == Some(&'/') {
            // Skip to end of line, keep the newline itself.
            for skipped in chars.by_ref() {
                if skipped == '\n' {
                    out.push('\n');
                    break;
                }
            }
            continue;
        }

        if c == '"' {
            in_string = true;
        }
        out.push(c);
    }

    out
}

/// Quote bare or single-quoted object keys: `{title: 1}` → `{"title": 1}`.
///
/// Text inside double-quoted strings is left as is.
pub fn quote_unquoted_keys(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while !rest.is_empty() {
        let (outside, tail) = match rest.find('"') {
            Some(start) => rest.split_at(start),
            None => (rest, ""),
        };
        out.push_str(&UNQUOTED_KEY_RE.replace_all(outside, r#"$1"$2":"#));
        if tail.is_empty() {
            break;
        }
        let end = string_literal_len(tail);
        out.push_str(&tail[..end]);
        rest = &tail[end..];
    }

    out
}

/// Byte length of the string literal opening `text`, closing quote included.
/// An unterminated literal runs to the end.
fn string_literal_len(text: &str) -> usize {
    let mut escaped = false;
    for (i, c) in text.char_indices().skip(1) {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            return i + 1;
        }
    }
    text.len()
}
