//! Content shapes: the per-task pipeline from parsed payload to result.
//!
//! A payload is accepted in four steps:
//!
//! 1. [`ContentShape::coerce`] maps field aliases and fills defaults
//! 2. a lenient validation pass checks structure with any item count
//! 3. the payload is deserialized and [`ContentShape::normalize`]d
//!    (truncate/pad to the requested count, clean text)
//! 4. a strict validation pass checks the exact item counts
//!
//! Fallback content goes through step 4 as a self-check.

mod coerce;
mod impls;

use crate::core::task::GenerationTask;
use crate::validation::{ContentValidator, CountRule, ValidationRejected, ValidationResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A content shape produced by one generation task.
pub trait ContentShape: Serialize + DeserializeOwned + Sized {
    /// Request parameters the shape is built from.
    type Params;

    fn task(params: &Self::Params) -> GenerationTask;

    /// Item count the final content must have.
    fn expected_items(params: &Self::Params) -> CountRule;

    /// Map aliases and fill defaulted fields on the raw payload.
    fn coerce(payload: Value, params: &Self::Params) -> Value;

    /// Bring a deserialized payload to its final form.
    fn normalize(self, params: &Self::Params) -> Self;

    /// Deterministic stand-in used when generation fails.
    fn fallback(params: &Self::Params) -> Self;
}

/// Content that passed validation, with soft notes worth logging.
#[derive(Debug, Clone, PartialEq)]
pub struct Accepted<T> {
    pub content: T,
    pub notes: Vec<String>,
}

/// Turn a parsed payload into validated content.
pub fn accept<S: ContentShape>(
    payload: Value,
    params: &S::Params,
) -> Result<Accepted<S>, ValidationRejected> {
    let task = S::task(params);
    let payload = S::coerce(payload, params);

    ContentValidator::validate(task, &payload, CountRule::AtLeast(1)).into_result(task)?;

    let content: S = serde_json::from_value(payload).map_err(|e| ValidationRejected {
        task,
        reason: format!("payload does not fit the {} shape: {}", task, e),
    })?;
    let content = content.normalize(params);

    let notes = check(&content, params).into_result(task)?;
    Ok(Accepted { content, notes })
}

/// Strict validation of finished content.
pub fn check<S: ContentShape>(content: &S, params: &S::Params) -> ValidationResult {
    match serde_json::to_value(content) {
        Ok(value) => ContentValidator::validate(S::task(params), &value, S::expected_items(params)),
        Err(e) => ValidationResult::reject(format!("content does not serialize: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::career::{CAREER_PATHS, MODULES_PER_PATH};
    use crate::content::{
        CareerPathSet, ContentKind, FlashcardSet, LearningPath, ModuleContent, NarrativeSummary,
        NudgeIcon, NudgeSet, QuestionType, Quiz,
    };
    use crate::core::request::{
        CareerPathRequest, FlashcardRequest, LearningPathRequest, ModuleRequest, NudgeRequest,
        QuizRequest, SummaryRequest, UserProfile,
    };
    use crate::core::string::normalized_key;
    use serde_json::json;

    fn question(n: usize) -> Value {
        json!({
            "question": format!("Q{}?", n),
            "options": ["a", "b", "c", "d"],
            "correctAnswer": ["a"],
            "explanation": "because"
        })
    }

    fn questions(n: usize) -> Value {
        json!({ "questions": (1..=n).map(question).collect::<Vec<_>>() })
    }

    #[test]
    fn test_quiz_truncates_and_pads_to_requested_count() {
        let request = QuizRequest::new("Binary Search Trees", 5);
        for returned in [1, 5, 9] {
            let quiz = accept::<Quiz>(questions(returned), &request).unwrap().content;
            assert_eq!(quiz.questions.len(), 5, "model returned {}", returned);
            assert_eq!(quiz.topic, "Binary Search Trees");
        }

        let padded = accept::<Quiz>(questions(3), &request).unwrap().content;
        assert_eq!(padded.questions[3].question, "Additional question 1 about Binary Search Trees?");
        assert_eq!(padded.questions[0].question, "Q1?");
    }

    #[test]
    fn test_quiz_question_type_derived_from_answers() {
        let mut payload = questions(2);
        payload["questions"][1]["correctAnswer"] = json!(["a", "c"]);
        payload["questions"][0]["questionType"] = json!("multiple");
        let quiz = accept::<Quiz>(payload, &QuizRequest::new("Sets", 2)).unwrap().content;
        assert_eq!(quiz.questions[0].question_type, QuestionType::Single);
        assert_eq!(quiz.questions[1].question_type, QuestionType::Multiple);
    }

    #[test]
    fn test_quiz_without_questions_is_rejected() {
        let err = accept::<Quiz>(json!({"questions": []}), &QuizRequest::new("Sets", 2)).unwrap_err();
        assert_eq!(err.task, GenerationTask::Quiz);
    }

    #[test]
    fn test_quiz_from_content_keeps_caller_topic() {
        let request = QuizRequest::new("Module 2", 1)
            .with_content("Lesson: Closures\nClosures capture variables from their enclosing scope.");
        let quiz = accept::<Quiz>(questions(1), &request).unwrap().content;
        assert_eq!(quiz.topic, "Module 2");
    }

    #[test]
    fn test_module_content_is_cleaned() {
        let payload = json!({
            "title": " Python Lists ",
            "type": "general",
            "sections": [{
                "title": "Basics",
                "content": "```markdown\\nA list is an ordered, mutable collection.\\nIt can hold values of any type.```",
                "codeExample": {"code": "```python\nxs = [1, 2]\n```"}
            }]
        });
        let module = accept::<ModuleContent>(payload, &ModuleRequest::new("Python Lists"))
            .unwrap()
            .content;
        assert_eq!(module.title, "Python Lists");
        assert_eq!(module.kind, ContentKind::Technical);
        let section = &module.sections[0];
        assert_eq!(
            section.content,
            "A list is an ordered, mutable collection.\nIt can hold values of any type."
        );
        let example = section.code_example.as_ref().unwrap();
        assert_eq!(example.code, "xs = [1, 2]");
        assert_eq!(example.language, "python");
    }

    #[test]
    fn test_flashcards_padded_with_sequential_ids() {
        let payload = json!([{"id": 1, "frontHTML": "Q", "backHTML": "A"}]);
        let set = accept::<FlashcardSet>(payload, &FlashcardRequest::new("Rust", 3))
            .unwrap()
            .content;
        let ids: Vec<u32> = set.0.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_flashcard_ids_unique_after_padding() {
        let payload = json!([
            {"id": 2, "frontHTML": "Q1", "backHTML": "A1"},
            {"id": 2, "frontHTML": "Q2", "backHTML": "A2"}
        ]);
        let set = accept::<FlashcardSet>(payload, &FlashcardRequest::new("Rust", 4))
            .unwrap()
            .content;
        let ids: Vec<u32> = set.0.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(set.0[1].front_html, "Q2");
    }

    #[test]
    fn test_skeleton_titles_renumbered() {
        let payload = json!(["1. Basics", "Module 7: Ownership", "Traits"]);
        let path = accept::<LearningPath>(payload, &LearningPathRequest::new("Rust"))
            .unwrap()
            .content;
        assert_eq!(
            path.titles(),
            vec![
                "Module 1: Basics",
                "Module 2: Ownership",
                "Module 3: Traits",
                "Module 4: Advanced Rust Applications",
                "Module 5: Real-world Rust Projects",
            ]
        );
    }

    #[test]
    fn test_detailed_path_keeps_up_to_seven() {
        let modules: Vec<Value> = (1..=9).map(|i| json!({"title": format!("M{}", i)})).collect();
        let request = LearningPathRequest::new("Rust").detailed();
        let path = accept::<LearningPath>(json!(modules), &request).unwrap().content;
        assert_eq!(path.0.len(), 7);
        assert_eq!(path.0[0].estimated_time, "1-2 hours");
    }

    fn career_request(goal: &str) -> CareerPathRequest {
        CareerPathRequest::new(UserProfile {
            career_goal: Some(goal.to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn test_career_paths_normalized_to_four_with_five_modules() {
        let payload = json!([{
            "pathName": "Cloud Engineering",
            "difficulty": "advanced",
            "relevanceScore": 92,
            "modules": [{"title": "1. Linux"}, {"title": "2: Networking"}]
        }]);
        let set = accept::<CareerPathSet>(payload, &career_request("DevOps"))
            .unwrap()
            .content;
        assert_eq!(set.len(), CAREER_PATHS);
        assert!(set.0.iter().all(|p| p.modules.len() == MODULES_PER_PATH));
        assert_eq!(set.0[0].modules[0].title, "Linux");
        assert_eq!(set.0[0].modules[1].title, "Networking");
        assert_eq!(set.0[1].path_name, "Alternative Cloud Engineering");
        assert_eq!(set.0[1].relevance_score, 82);
    }

    #[test]
    fn test_career_modules_given_as_titles() {
        let payload = json!({"careerPaths": [{
            "pathName": "Cloud Engineering",
            "modules": ["Linux basics", "Networking", "Containers"]
        }]});
        let set = accept::<CareerPathSet>(payload, &career_request("DevOps"))
            .unwrap()
            .content;
        let modules = &set.0[0].modules;
        assert_eq!(modules.len(), MODULES_PER_PATH);
        assert_eq!(modules[0].title, "Linux basics");
        assert_eq!(modules[2].title, "Containers");
    }

    #[test]
    fn test_career_goal_is_excluded() {
        let payload = json!([
            {"pathName": "devops", "modules": []},
            {"pathName": "SRE Foundations", "modules": []}
        ]);
        let set = accept::<CareerPathSet>(payload, &career_request("DevOps"))
            .unwrap()
            .content;
        let goal = normalized_key("DevOps");
        assert!(set.0.iter().all(|p| normalized_key(&p.path_name) != goal));
        assert_eq!(set.0[0].path_name, "DevOps Career Accelerator");
    }

    #[test]
    fn test_nudges_padded_from_fallback() {
        let payload = json!([{"type": "challenge", "text": "Finish module 3 today"}]);
        let accepted = accept::<NudgeSet>(payload, &NudgeRequest::default()).unwrap();
        let set = accepted.content;
        assert_eq!(set.0.len(), 3);
        assert_eq!(set.0[0].icon, NudgeIcon::Rocket);
        assert_eq!(set.0[1].text, "Review previous modules to reinforce your knowledge.");
        assert!(accepted.notes.is_empty());
    }

    #[test]
    fn test_nudge_with_unknown_type_is_replaced() {
        let payload = json!([
            {"type": "tip", "text": "Revisit closures before the quiz"},
            {"type": "warning", "text": "You missed two days"},
            {"type": "challenge", "text": "Finish module 3 today"}
        ]);
        let set = accept::<NudgeSet>(payload, &NudgeRequest::default())
            .unwrap()
            .content;
        assert_eq!(set.0.len(), 3);
        assert_eq!(set.0[0].text, "Revisit closures before the quiz");
        assert_eq!(set.0[1].text, "Finish module 3 today");
        assert!(set.0.iter().all(|n| n.text != "You missed two days"));
    }

    #[test]
    fn test_summary_text() {
        let accepted =
            accept::<NarrativeSummary>(json!("  Great work!  "), &SummaryRequest::default())
                .unwrap();
        assert_eq!(accepted.content.as_str(), "Great work!");
        assert!(accept::<NarrativeSummary>(json!(""), &SummaryRequest::default()).is_err());
    }

    #[test]
    fn test_every_fallback_passes_strict_validation() {
        let profile = UserProfile {
            career_goal: Some("Data Science".to_string()),
            quiz_answers: [("1", "A"), ("2", "B")]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ..Default::default()
        };

        fn assert_fallback_valid<S: ContentShape>(params: &S::Params) {
            let content = S::fallback(params);
            let result = check(&content, params);
            assert!(result.is_valid(), "{}: {:?}", S::task(params), result.reason);
        }

        assert_fallback_valid::<ModuleContent>(&ModuleRequest::new("Rust"));
        assert_fallback_valid::<ModuleContent>(&ModuleRequest::new("Rust").detailed());
        assert_fallback_valid::<Quiz>(&QuizRequest::new("Binary Search Trees", 5));
        assert_fallback_valid::<Quiz>(&QuizRequest::new("Module 1", 3).with_content("x"));
        assert_fallback_valid::<FlashcardSet>(&FlashcardRequest::new("Rust", 7));
        assert_fallback_valid::<LearningPath>(&LearningPathRequest::new("Rust"));
        assert_fallback_valid::<LearningPath>(&LearningPathRequest::new("Rust").detailed());
        assert_fallback_valid::<CareerPathSet>(&CareerPathRequest::new(profile));
        assert_fallback_valid::<CareerPathSet>(&CareerPathRequest::new(UserProfile::default()));
        assert_fallback_valid::<NudgeSet>(&NudgeRequest::default());
        assert_fallback_valid::<NarrativeSummary>(&SummaryRequest::default());
    }
}
