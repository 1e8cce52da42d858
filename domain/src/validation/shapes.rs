//! Per-shape validation predicates over parsed JSON payloads.

use super::CountRule;
use crate::content::career::MODULES_PER_PATH;
use crate::content::nudge::NUDGE_TEXT_SOFT_LIMIT;
use crate::content::quiz::OPTIONS_PER_QUESTION;
use serde_json::Value;

/// Section prose must be longer than this to count as content.
pub const MIN_SECTION_CHARS: usize = 50;

const DIFFICULTIES: [&str; 3] = ["beginner", "intermediate", "advanced"];
const NUDGE_TYPES: [&str; 3] = ["tip", "recommendation", "challenge"];

fn non_empty_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

fn require_str<'a>(value: &'a Value, key: &str, at: &str) -> Result<&'a str, String> {
    non_empty_str(value, key).ok_or_else(|| format!("{}: missing or empty `{}`", at, key))
}

fn require_array<'a>(value: &'a Value, key: &str, at: &str) -> Result<&'a Vec<Value>, String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| format!("{}: `{}` is not a list", at, key))
}

fn as_list<'a>(payload: &'a Value, what: &str) -> Result<&'a Vec<Value>, String> {
    payload
        .as_array()
        .ok_or_else(|| format!("expected a list of {}", what))
}

pub(super) fn module_content(payload: &Value) -> Result<(), String> {
    require_str(payload, "title", "module")?;
    let sections = require_array(payload, "sections", "module")?;
    if sections.is_empty() {
        return Err("module has no sections".to_string());
    }

    for (i, section) in sections.iter().enumerate() {
        let at = format!("section {}", i + 1);
        require_str(section, "title", &at)?;
        let content = section
            .get("content")
            .and_then(Value::as_str)
            .ok_or_else(|| format!("{}: `content` is not a string", at))?;
        if content.chars().count() <= MIN_SECTION_CHARS {
            return Err(format!(
                "{}: content must be longer than {} characters",
                at, MIN_SECTION_CHARS
            ));
        }
        if let Some(example) = section.get("codeExample").filter(|v| !v.is_null()) {
            require_str(example, "language", &format!("{} code example", at))?;
            require_str(example, "code", &format!("{} code example", at))?;
        }
    }
    Ok(())
}

pub(super) fn quiz(payload: &Value, items: CountRule) -> Result<(), String> {
    let questions = require_array(payload, "questions", "quiz")?;
    items.check("questions", questions.len())?;

    for (i, question) in questions.iter().enumerate() {
        let at = format!("question {}", i + 1);
        require_str(question, "question", &at)?;
        let options = require_array(question, "options", &at)?;
        if options.len() != OPTIONS_PER_QUESTION {
            return Err(format!(
                "{}: expected {} options, got {}",
                at,
                OPTIONS_PER_QUESTION,
                options.len()
            ));
        }
        let options: Vec<&str> = options.iter().filter_map(Value::as_str).collect();
        if options.len() != OPTIONS_PER_QUESTION || options.iter().any(|o| o.trim().is_empty()) {
            return Err(format!("{}: options must be non-empty strings", at));
        }

        let correct = require_array(question, "correctAnswer", &at)?;
        if correct.is_empty() {
            return Err(format!("{}: no correct answer", at));
        }
        for answer in correct {
            match answer.as_str() {
                Some(a) if options.contains(&a) => {}
                _ => return Err(format!("{}: correct answer {} is not an option", at, answer)),
            }
        }

        require_str(question, "explanation", &at)?;
    }
    Ok(())
}

pub(super) fn flashcards(payload: &Value, items: CountRule) -> Result<(), String> {
    let cards = as_list(payload, "flashcards")?;
    items.check("flashcards", cards.len())?;

    for (i, card) in cards.iter().enumerate() {
        let at = format!("flashcard {}", i + 1);
        if !card.get("id").is_some_and(Value::is_u64) {
            return Err(format!("{}: `id` is not a number", at));
        }
        require_str(card, "frontHTML", &at)?;
        require_str(card, "backHTML", &at)?;
    }
    Ok(())
}

pub(super) fn learning_path(payload: &Value, items: CountRule) -> Result<(), String> {
    let modules = as_list(payload, "modules")?;
    items.check("modules", modules.len())?;

    for (i, module) in modules.iter().enumerate() {
        require_str(module, "title", &format!("module {}", i + 1))?;
    }
    Ok(())
}

pub(super) fn career_paths(payload: &Value, items: CountRule) -> Result<(), String> {
    let paths = as_list(payload, "career paths")?;
    items.check("career paths", paths.len())?;

    let module_rule = if items.is_exact() {
        CountRule::Exactly(MODULES_PER_PATH)
    } else {
        CountRule::AtLeast(0)
    };

    for (i, path) in paths.iter().enumerate() {
        let at = format!("career path {}", i + 1);
        require_str(path, "pathName", &at)?;

        match path.get("difficulty").and_then(Value::as_str) {
            Some(d) if DIFFICULTIES.contains(&d) => {}
            other => return Err(format!("{}: invalid difficulty {:?}", at, other)),
        }

        match path.get("relevanceScore").and_then(Value::as_f64) {
            Some(score) if (0.0..=100.0).contains(&score) => {}
            _ => return Err(format!("{}: relevanceScore must be within 0-100", at)),
        }

        let modules = require_array(path, "modules", &at)?;
        module_rule
            .check("modules", modules.len())
            .map_err(|e| format!("{}: {}", at, e))?;
        for (j, module) in modules.iter().enumerate() {
            require_str(module, "title", &format!("{} module {}", at, j + 1))?;
        }
    }
    Ok(())
}

/// Returns soft notes for texts over the length bound.
pub(super) fn nudges(payload: &Value, items: CountRule) -> Result<Vec<String>, String> {
    let nudges = as_list(payload, "nudges")?;
    items.check("nudges", nudges.len())?;

    let mut notes = Vec::new();
    for (i, nudge) in nudges.iter().enumerate() {
        let at = format!("nudge {}", i + 1);
        match nudge.get("type").and_then(Value::as_str) {
            Some(t) if NUDGE_TYPES.contains(&t) => {}
            other => return Err(format!("{}: invalid type {:?}", at, other)),
        }
        let text = require_str(nudge, "text", &at)?;
        let len = text.chars().count();
        if len > NUDGE_TEXT_SOFT_LIMIT {
            notes.push(format!(
                "{}: text is {} characters (soft limit {})",
                at, len, NUDGE_TEXT_SOFT_LIMIT
            ));
        }
    }
    Ok(notes)
}

pub(super) fn plain_text(payload: &Value) -> Result<(), String> {
    match payload.as_str() {
        Some(text) if !text.trim().is_empty() => Ok(()),
        Some(_) => Err("response text is empty".to_string()),
        None => Err("expected plain text".to_string()),
    }
}
