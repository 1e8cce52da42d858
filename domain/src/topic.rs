//! Topic classification and text cleanup for generated learning content.

use crate::core::string::take_chars;
use regex::Regex;
use std::sync::LazyLock;

/// Keyword groups marking a topic as technical.
const TECH_KEYWORDS: &[&[&str]] = &[
    &["javascript", "python", "java", "coding", "programming", "typescript"],
    &["html", "css", "react", "angular", "vue", "frontend", "backend", "fullstack"],
    &["sql", "database", "mongodb", "postgres"],
    &["api", "development", "software", "git", "devops", "algorithms"],
    &["computer science", "data structures", "networking", "cloud"],
];

/// Code language per keyword list; the first matching language wins.
const LANGUAGE_KEYWORDS: &[(&str, &[&str])] = &[
    ("javascript", &["javascript", "js", "node", "react", "vue", "angular"]),
    ("python", &["python", "django", "flask"]),
    ("java", &["java", "spring"]),
    ("html", &["html", "markup"]),
    ("css", &["css", "styling", "scss"]),
    ("sql", &["sql", "database", "mysql", "postgresql"]),
    ("typescript", &["typescript", "ts"]),
];

pub const DEFAULT_LANGUAGE: &str = "javascript";

/// Content embedded in a quiz prompt is capped at this many characters.
pub const MAX_PROMPT_CONTENT_CHARS: usize = 5000;

/// Shorter source content is not worth building a quiz on.
pub const MIN_SOURCE_CONTENT_CHARS: usize = 50;

static MODULE_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*module\s+\d+\s*:\s*(.+?)\s*$").expect("valid regex"));

static BARE_MODULE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*module\s+\d+\s*:?\s*$").expect("valid regex"));

static LEADING_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\s*[.:)\-]\s*").expect("valid regex"));

static FENCE_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```[A-Za-z0-9_+\-]*\n?").expect("valid regex"));

pub fn is_code_related_topic(topic: &str) -> bool {
    let lower = topic.to_lowercase();
    TECH_KEYWORDS
        .iter()
        .flat_map(|group| group.iter())
        .any(|keyword| lower.contains(keyword))
}

pub fn appropriate_language(topic: &str) -> &'static str {
    let lower = topic.to_lowercase();
    LANGUAGE_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(language, _)| *language)
        .unwrap_or(DEFAULT_LANGUAGE)
}

/// Source content usable for a quiz prompt, capped in length.
pub fn usable_source_content(content: Option<&str>) -> Option<&str> {
    let content = content?.trim();
    if content.chars().count() <= MIN_SOURCE_CONTENT_CHARS {
        return None;
    }
    Some(take_chars(content, MAX_PROMPT_CONTENT_CHARS))
}

/// Topic to put in a quiz prompt.
///
/// `Module 3: Closures` becomes `Closures`. A bare `Module 3` takes the
/// title from the first line of the content when that line reads
/// `Something: Title`, otherwise the placeholder is kept.
pub fn quiz_prompt_topic(topic: &str, content: Option<&str>) -> String {
    if let Some(caps) = MODULE_TITLE_RE.captures(topic) {
        return caps[1].to_string();
    }

    if BARE_MODULE_RE.is_match(topic)
        && let Some(content) = usable_source_content(content)
        && let Some(first_line) = content.lines().next()
        && let Some((_, title)) = first_line.split_once(':')
        && !title.trim().is_empty()
    {
        return title.trim().to_string();
    }

    topic.trim().to_string()
}

/// Remove leading `1.` / `2:` / `3)` numbering from a title.
pub fn strip_numbering(title: &str) -> String {
    LEADING_NUMBER_RE.replace(title, "").trim().to_string()
}

/// Title without a `Module N:` or `N.` prefix.
pub fn strip_module_prefix(title: &str) -> String {
    match MODULE_TITLE_RE.captures(title) {
        Some(caps) => caps[1].to_string(),
        None => strip_numbering(title),
    }
}

/// Clean section prose: fence markers and stray backticks go, literal
/// `\n` sequences become newlines.
pub fn clean_section_text(text: &str) -> String {
    let unfenced = FENCE_MARKER_RE.replace_all(text, "");
    unfenced
        .replace('`', "")
        .replace("\\n", "\n")
        .replace("\\\\", "\\")
        .trim()
        .to_string()
}

/// Clean a code sample: fence markers removed, surrounding blank lines trimmed.
pub fn clean_code(code: &str) -> String {
    FENCE_MARKER_RE
        .replace_all(code, "")
        .replace("```", "")
        .trim()
        .to_string()
}
