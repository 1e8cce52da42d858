//! Fallback synthesizer: deterministic, network-free content per task.
//!
//! Every synthesized result must pass the same strict validation as
//! generated content. The same builders produce the padding entries used
//! when a model returns too few items.

mod career;

use crate::content::learning_path::SKELETON_MODULES;
use crate::content::{
    CareerPathSet, ContentKind, Flashcard, FlashcardSet, LearningPath, ModuleContent,
    NarrativeSummary, Nudge, NudgeIcon, NudgeSet, NudgeType, PathModule, Quiz, QuizQuestion,
    Section,
};
use crate::core::request::{
    CareerPathRequest, FlashcardRequest, LearningPathRequest, ModuleRequest, NudgeRequest,
    QuizRequest, SummaryRequest,
};
use crate::topic::is_code_related_topic;

pub use career::default_modules;

/// Builds synthetic content from request parameters alone.
pub struct FallbackSynthesizer;

impl FallbackSynthesizer {
    pub fn module_content(request: &ModuleRequest) -> ModuleContent {
        let topic = request.topic.trim();
        let mut sections = vec![
            Section {
                title: format!("Introduction to {}", topic),
                content: format!(
                    "This section introduces {} and the problems it helps you solve. \
                     Start with the vocabulary below before moving on to the core ideas.",
                    topic
                ),
                key_points: vec![
                    format!("What {} is", topic),
                    "Key terminology".to_string(),
                    "Where it is used".to_string(),
                ],
                code_example: None,
            },
            Section {
                title: format!("Core Concepts of {}", topic),
                content: format!(
                    "The core concepts of {} build on each other. Work through them in order \
                     and write down one example for every concept you meet.",
                    topic
                ),
                key_points: vec![
                    "Fundamental principles".to_string(),
                    "How the pieces fit together".to_string(),
                    "Common misconceptions".to_string(),
                ],
                code_example: None,
            },
            Section {
                title: format!("Applying {}", topic),
                content: format!(
                    "Practice turns knowledge of {} into skill. Pick a small, realistic \
                     exercise and apply each concept from the previous sections to it.",
                    topic
                ),
                key_points: vec![
                    "Hands-on practice".to_string(),
                    "Reviewing your results".to_string(),
                    "Next steps".to_string(),
                ],
                code_example: None,
            },
        ];
        if request.detailed {
            sections.push(Section {
                title: format!("Advanced Topics in {}", topic),
                content: format!(
                    "Once the fundamentals of {} feel natural, explore the edge cases and \
                     trade-offs that experienced practitioners reason about.",
                    topic
                ),
                key_points: vec![
                    "Edge cases".to_string(),
                    "Trade-offs".to_string(),
                    "Further reading".to_string(),
                ],
                code_example: None,
            });
        }

        ModuleContent {
            title: topic.to_string(),
            kind: if is_code_related_topic(topic) {
                ContentKind::Technical
            } else {
                ContentKind::General
            },
            sections,
        }
    }

    /// Placeholder question `n` (1-based) of a fallback quiz.
    pub fn quiz_question(topic: &str, n: usize) -> QuizQuestion {
        QuizQuestion::placeholder(
            format!("Question {} about {}?", n, topic),
            format!("This is the correct answer for question {} about {}.", n, topic),
        )
    }

    /// Question `n` (1-based) appended when a model returned too few.
    pub fn padding_question(topic: &str, n: usize) -> QuizQuestion {
        QuizQuestion::placeholder(
            format!("Additional question {} about {}?", n, topic),
            format!("This is the correct answer for additional question {}.", n),
        )
    }

    pub fn quiz(request: &QuizRequest) -> Quiz {
        let topic = request.topic.trim();
        Quiz {
            topic: topic.to_string(),
            questions: (1..=request.count)
                .map(|n| Self::quiz_question(topic, n))
                .collect(),
        }
    }

    /// Flashcard `id` (1-based) of a fallback set.
    pub fn flashcard(topic: &str, id: u32) -> Flashcard {
        Flashcard {
            id,
            front_html: format!("Basic to advanced {} question {}?", topic, id),
            back_html: format!(
                "Detailed answer explaining {} at difficulty level {}.",
                topic, id
            ),
        }
    }

    pub fn flashcards(request: &FlashcardRequest) -> FlashcardSet {
        let topic = request.topic.trim();
        FlashcardSet(
            (1..=request.count as u32)
                .map(|id| Self::flashcard(topic, id))
                .collect(),
        )
    }

    /// Skeleton entry `n` (1-based, at most 5) for a learning path.
    pub fn skeleton_module(goal: &str, n: usize) -> PathModule {
        let title = match n {
            1 => format!("Introduction to {}", goal),
            2 => format!("Core Concepts of {}", goal),
            3 => format!("Intermediate {} Techniques", goal),
            4 => format!("Advanced {} Applications", goal),
            _ => format!("Real-world {} Projects", goal),
        };
        PathModule {
            title: format!("Module {}: {}", n, title),
            description: String::new(),
            estimated_time: String::new(),
            content: String::new(),
        }
    }

    /// Detailed outline `n` (1-based) for a learning path.
    pub fn outline_module(goal: &str, n: usize) -> PathModule {
        let (title, description, estimated_time, content) = match n {
            1 => (
                format!("Introduction to {}", goal),
                format!("Learn the fundamentals of {}", goal),
                "1-2 hours",
                format!("This module introduces the basic concepts of {}.", goal),
            ),
            2 => (
                format!("{} Fundamentals", goal),
                format!("Understand the core principles of {}", goal),
                "2-3 hours",
                format!(
                    "Build a solid foundation in {} by mastering the essential concepts.",
                    goal
                ),
            ),
            3 => (
                format!("Practical {}", goal),
                "Apply your knowledge through practical exercises".to_string(),
                "3-4 hours",
                "Practice makes perfect. In this module, you'll apply your theoretical knowledge."
                    .to_string(),
            ),
            4 => (
                format!("Advanced {}", goal),
                "Dive deeper into advanced concepts".to_string(),
                "3-4 hours",
                "Take your skills to the next level with advanced techniques and methodologies."
                    .to_string(),
            ),
            _ => (
                format!("{} in the Real World", goal),
                "Learn how to apply your skills in real-world scenarios".to_string(),
                "2-3 hours",
                "Discover how professionals use these skills in industry settings.".to_string(),
            ),
        };
        PathModule {
            title,
            description,
            estimated_time: estimated_time.to_string(),
            content,
        }
    }

    pub fn learning_path(request: &LearningPathRequest) -> LearningPath {
        let goal = request.goal.trim();
        LearningPath(
            (1..=SKELETON_MODULES)
                .map(|n| {
                    if request.detailed {
                        Self::outline_module(goal, n)
                    } else {
                        Self::skeleton_module(goal, n)
                    }
                })
                .collect(),
        )
    }

    pub fn career_paths(request: &CareerPathRequest) -> CareerPathSet {
        career::career_paths(&request.profile)
    }

    pub fn nudges(_request: &NudgeRequest) -> NudgeSet {
        NudgeSet(vec![
            Nudge {
                kind: NudgeType::Tip,
                text: "Keep learning consistently to maintain your progress!".to_string(),
                action_text: None,
                icon: NudgeIcon::Bulb,
            },
            Nudge {
                kind: NudgeType::Recommendation,
                text: "Review previous modules to reinforce your knowledge.".to_string(),
                action_text: None,
                icon: NudgeIcon::Bulb,
            },
            Nudge {
                kind: NudgeType::Challenge,
                text: "Try completing a quiz with 100% accuracy as your next goal.".to_string(),
                action_text: None,
                icon: NudgeIcon::Rocket,
            },
        ])
    }

    pub fn summary(request: &SummaryRequest) -> NarrativeSummary {
        let name = request
            .user
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or("there");
        let path = &request.career_path;
        let career = if path.career_name.trim().is_empty() {
            request.user.goal()
        } else {
            path.career_name.trim()
        };

        let mut text = format!(
            "Hi {}, you are making real progress on your journey toward {}. ",
            name, career
        );
        text.push_str(&format!(
            "You have completed {} of {} modules and reached {}% of your path. ",
            path.completed_modules.len(),
            path.modules.len(),
            path.progress
        ));

        if !request.assessments.is_empty() {
            let average = request.assessments.iter().map(|a| a.score).sum::<f64>()
                / request.assessments.len() as f64;
            text.push_str(&format!(
                "Across {} recent assessments you averaged {:.1} out of 10, which shows steady understanding. ",
                request.assessments.len(),
                average
            ));
        }

        if !path.recommended_skills.is_empty() {
            text.push_str(&format!(
                "Focusing next on {} will make the biggest difference. ",
                path.recommended_skills.join(", ")
            ));
        }

        text.push_str(
            "Keep a steady rhythm, build a small project with what you have learned, \
             and revisit the modules that felt hardest. You are on the right track.",
        );
        NarrativeSummary(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::quiz::OPTIONS_PER_QUESTION;
    use crate::core::request::{AssessmentScore, PathProgress, UserProfile};

    #[test]
    fn test_quiz_fallback_matches_requested_count() {
        let quiz = FallbackSynthesizer::quiz(&QuizRequest::new("Binary Search Trees", 5));
        assert_eq!(quiz.questions.len(), 5);
        for q in &quiz.questions {
            assert_eq!(q.options.len(), OPTIONS_PER_QUESTION);
            assert!(!q.correct_answer.is_empty());
            assert!(q.correct_answer.iter().all(|a| q.options.contains(a)));
        }
        assert_eq!(quiz.questions[0].question, "Question 1 about Binary Search Trees?");
    }

    #[test]
    fn test_flashcard_ids_are_sequential() {
        let set = FallbackSynthesizer::flashcards(&FlashcardRequest::new("Rust", 3));
        let ids: Vec<u32> = set.0.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_module_fallback_kind_and_sections() {
        let module = FallbackSynthesizer::module_content(&ModuleRequest::new("Python basics"));
        assert_eq!(module.kind, ContentKind::Technical);
        assert_eq!(module.sections.len(), 3);
        let detailed =
            FallbackSynthesizer::module_content(&ModuleRequest::new("Poetry").detailed());
        assert_eq!(detailed.kind, ContentKind::General);
        assert_eq!(detailed.sections.len(), 4);
    }

    #[test]
    fn test_learning_path_skeleton_titles() {
        let path = FallbackSynthesizer::learning_path(&LearningPathRequest::new("Rust"));
        assert_eq!(
            path.titles(),
            vec![
                "Module 1: Introduction to Rust",
                "Module 2: Core Concepts of Rust",
                "Module 3: Intermediate Rust Techniques",
                "Module 4: Advanced Rust Applications",
                "Module 5: Real-world Rust Projects",
            ]
        );
    }

    #[test]
    fn test_summary_mentions_progress() {
        let request = SummaryRequest {
            user: UserProfile {
                name: Some("Ada".to_string()),
                ..Default::default()
            },
            career_path: PathProgress {
                career_name: "Data Engineering".to_string(),
                progress: 40,
                modules: vec!["a".into(), "b".into(), "c".into(), "d".into(), "e".into()],
                completed_modules: vec!["a".into(), "b".into()],
                recommended_skills: vec!["SQL".into()],
            },
            assessments: vec![AssessmentScore {
                module_name: "a".to_string(),
                score: 8.0,
                accuracy: 80.0,
                feedback: String::new(),
            }],
        };
        let summary = FallbackSynthesizer::summary(&request);
        assert!(summary.as_str().starts_with("Hi Ada"));
        assert!(summary.as_str().contains("2 of 5 modules"));
        assert!(summary.as_str().contains("40%"));
        assert!(summary.as_str().contains("SQL"));
    }
}
