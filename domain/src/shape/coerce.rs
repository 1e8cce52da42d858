//! Payload coercion: field aliases and defaults applied before validation.
//!
//! Models drift from the requested schema in predictable ways (an
//! `answers` list instead of `options`, a `correctIndex` instead of
//! `correctAnswer`, a wrapper object around a list). Coercion maps those
//! onto the canonical shape and fills defaulted fields. Required content
//! is never invented here.

use crate::content::career::Difficulty;
use crate::content::nudge::NudgeType;
use crate::content::quiz::DEFAULT_POINTS;
use crate::topic::{appropriate_language, is_code_related_topic};
use serde_json::{Map, Value, json};

const DEFAULT_RELEVANCE: u64 = 85;
const DEFAULT_MODULE_HOURS: u64 = 8;
const MAX_MODULE_HOURS: u32 = 10_000;

/// Unwrap `{"<key>": [...]}` into the list for the first key present.
fn unwrap_list(payload: Value, keys: &[&str]) -> Value {
    if let Value::Object(map) = &payload {
        for key in keys {
            if let Some(list @ Value::Array(_)) = map.get(*key) {
                return list.clone();
            }
        }
    }
    payload
}

fn each_object(payload: &mut Value, mut f: impl FnMut(usize, &mut Map<String, Value>)) {
    if let Value::Array(items) = payload {
        for (i, item) in items.iter_mut().enumerate() {
            if let Value::Object(map) = item {
                f(i, map);
            }
        }
    }
}

fn non_empty_str<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn default_str(map: &mut Map<String, Value>, key: &str, default: impl FnOnce() -> String) {
    if non_empty_str(map, key).is_none() {
        map.insert(key.to_string(), Value::String(default()));
    }
}

fn rename(map: &mut Map<String, Value>, from: &str, to: &str) {
    if !map.contains_key(to)
        && let Some(value) = map.remove(from)
    {
        map.insert(to.to_string(), value);
    }
}

pub(super) fn module_content(mut payload: Value, topic: &str) -> Value {
    if let Value::Object(module) = &mut payload {
        let technical = is_code_related_topic(topic);
        module.insert(
            "type".to_string(),
            json!(if technical { "technical" } else { "general" }),
        );

        if let Some(sections) = module.get_mut("sections") {
            each_object(sections, |_, section| coerce_section(section, topic));
        }
    }
    payload
}

fn coerce_section(section: &mut Map<String, Value>, topic: &str) {
    if !section.get("keyPoints").is_some_and(Value::is_array) {
        section.insert("keyPoints".to_string(), json!([]));
    }

    let has_code = match section.get("codeExample") {
        Some(Value::Object(example)) => non_empty_str(example, "code").is_some(),
        _ => false,
    };
    if !has_code {
        section.insert("codeExample".to_string(), Value::Null);
        return;
    }
    if let Some(Value::Object(example)) = section.get_mut("codeExample") {
        default_str(example, "language", || appropriate_language(topic).to_string());
        if !example.get("explanation").is_some_and(Value::is_string) {
            example.insert("explanation".to_string(), json!(""));
        }
    }
}

/// Map a letter answer (`"B"`) onto the option it names.
fn letter_option(answer: &str, options: &[Value]) -> Option<Value> {
    let mut chars = answer.trim().chars();
    let letter = chars.next()?.to_ascii_uppercase();
    let rest = chars.as_str().trim_start_matches([')', '.', ':']);
    if !rest.trim().is_empty() || !('A'..='D').contains(&letter) {
        return None;
    }
    options.get((letter as u8 - b'A') as usize).cloned()
}

pub(super) fn quiz(payload: Value) -> Value {
    let mut payload = match payload {
        list @ Value::Array(_) => json!({ "questions": list }),
        other => other,
    };

    if let Some(questions) = payload.get_mut("questions") {
        each_object(questions, |_, question| {
            rename(question, "answers", "options");
            let options: Vec<Value> = question
                .get("options")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();

            let correct = match question.remove("correctAnswer") {
                Some(Value::String(s)) => Some(json!([s])),
                Some(other) => Some(other),
                None => question
                    .get("correctIndex")
                    .and_then(Value::as_u64)
                    .and_then(|i| options.get(i as usize).cloned())
                    .map(|answer| json!([answer])),
            };
            match correct {
                Some(Value::Array(answers)) => {
                    let answers: Vec<Value> = answers
                        .into_iter()
                        .map(|answer| {
                            let mapped = answer
                                .as_str()
                                .filter(|a| !options.iter().any(|o| o.as_str() == Some(*a)))
                                .and_then(|a| letter_option(a, &options));
                            mapped.unwrap_or(answer)
                        })
                        .collect();
                    question.insert("correctAnswer".to_string(), Value::Array(answers));
                }
                Some(other) => {
                    question.insert("correctAnswer".to_string(), other);
                }
                None => {}
            }
            question.remove("correctIndex");

            if !question.get("point").is_some_and(Value::is_u64) {
                question.insert("point".to_string(), json!(DEFAULT_POINTS));
            }
            // Derived from the answers during normalisation.
            question.remove("questionType");
        });
    }
    payload
}

pub(super) fn flashcards(payload: Value) -> Value {
    let mut payload = unwrap_list(payload, &["flashcards", "cards"]);
    each_object(&mut payload, |i, card| {
        rename(card, "front", "frontHTML");
        rename(card, "question", "frontHTML");
        rename(card, "back", "backHTML");
        rename(card, "answer", "backHTML");

        let id = match card.get("id") {
            Some(Value::Number(n)) if n.is_u64() => None,
            Some(Value::String(s)) => Some(s.trim().parse::<u64>().unwrap_or(i as u64 + 1)),
            _ => Some(i as u64 + 1),
        };
        if let Some(id) = id {
            card.insert("id".to_string(), json!(id));
        }
    });
    payload
}

pub(super) fn learning_path(payload: Value, goal: &str, detailed: bool) -> Value {
    let items = match unwrap_list(payload, &["modules", "learningPath", "path"]) {
        Value::Array(items) => items,
        other => return other,
    };

    let items = items
        .into_iter()
        .map(|item| match item {
            Value::String(title) => json!({ "title": title }),
            Value::Object(mut module) => {
                rename(&mut module, "name", "title");
                if detailed {
                    default_str(&mut module, "title", || format!("Learning {}", goal));
                    default_str(&mut module, "description", || format!("Learn about {}", goal));
                    default_str(&mut module, "estimatedTime", || "1-2 hours".to_string());
                    default_str(&mut module, "content", || {
                        format!("This module will teach you about {}", goal)
                    });
                }
                Value::Object(module)
            }
            other => other,
        })
        .collect();
    Value::Array(items)
}

pub(super) fn career_paths(payload: Value, goal: &str) -> Value {
    let mut payload = unwrap_list(payload, &["careerPaths", "paths"]);
    each_object(&mut payload, |_, path| {
        default_str(path, "pathName", || "Career Path".to_string());
        default_str(path, "description", || {
            format!("A learning path toward {}", goal)
        });
        default_str(path, "estimatedTimeToComplete", || "3 months".to_string());

        let difficulty = path
            .get("difficulty")
            .and_then(Value::as_str)
            .and_then(Difficulty::parse)
            .unwrap_or(Difficulty::Intermediate);
        path.insert("difficulty".to_string(), json!(difficulty));

        let relevance = path
            .get("relevanceScore")
            .and_then(Value::as_f64)
            .map(|score| score.clamp(0.0, 100.0).round() as u64)
            .unwrap_or(DEFAULT_RELEVANCE);
        path.insert("relevanceScore".to_string(), json!(relevance));

        let modules = match path.remove("modules") {
            Some(Value::Array(modules)) => modules
                .into_iter()
                .filter_map(|module| match module {
                    Value::String(title) => Some(json!({ "title": title })),
                    module @ Value::Object(_) => Some(module),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };
        path.insert("modules".to_string(), Value::Array(modules));
        if let Some(modules) = path.get_mut("modules") {
            each_object(modules, |i, module| {
                default_str(module, "title", || format!("Module {}", i + 1));
                default_str(module, "description", || {
                    "Learn important skills in this area".to_string()
                });
                match module.get("estimatedHours").and_then(Value::as_f64) {
                    Some(hours) if hours >= 0.0 => {
                        let hours = hours.round().min(MAX_MODULE_HOURS as f64) as u32;
                        module.insert("estimatedHours".to_string(), json!(hours));
                    }
                    _ => {
                        module.insert("estimatedHours".to_string(), json!(DEFAULT_MODULE_HOURS));
                    }
                }
                let skills: Vec<Value> = module
                    .get("keySkills")
                    .and_then(Value::as_array)
                    .map(|s| s.iter().filter(|v| v.is_string()).cloned().collect())
                    .unwrap_or_default();
                module.insert("keySkills".to_string(), Value::Array(skills));
            });
        }
    });
    payload
}

/// Nudges with an unknown type or no text are dropped; normalisation pads
/// the set back to its full size.
pub(super) fn nudges(payload: Value) -> Value {
    let items = match unwrap_list(payload, &["nudges"]) {
        Value::Array(items) => items,
        other => return other,
    };

    let items = items
        .into_iter()
        .filter_map(|item| {
            let Value::Object(mut nudge) = item else {
                return None;
            };
            let kind = nudge
                .get("type")
                .and_then(Value::as_str)
                .and_then(NudgeType::parse)?;
            non_empty_str(&nudge, "text")?;

            nudge.insert("type".to_string(), json!(kind));
            let icon_ok = matches!(
                nudge.get("icon").and_then(Value::as_str),
                Some("bulb") | Some("rocket")
            );
            if !icon_ok {
                nudge.insert("icon".to_string(), json!(kind.default_icon()));
            }
            if !nudge.get("actionText").is_some_and(Value::is_string) {
                nudge.remove("actionText");
            }
            Some(Value::Object(nudge))
        })
        .collect();
    Value::Array(items)
}
