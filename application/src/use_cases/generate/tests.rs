use super::*;
use crate::ports::llm_gateway::GatewayError;
use async_trait::async_trait;
use coursegen_domain::{Origin, ProviderKind, UserProfile};
use serde_json::json;
use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

// ==================== Mock Gateway ====================

/// Pops scripted answers in call order; unreachable once the script ends.
struct ScriptedGateway {
    answers: Mutex<VecDeque<Result<String, GatewayError>>>,
    calls: AtomicUsize,
    delay: Option<Duration>,
}

impl ScriptedGateway {
    fn new(answers: Vec<Result<String, GatewayError>>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            calls: AtomicUsize::new(0),
            delay: None,
        }
    }

    fn unreachable() -> Self {
        Self::new(vec![])
    }

    fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new(vec![])
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn complete(
        &self,
        _candidate: &ModelCandidate,
        _prompt: &str,
    ) -> Result<String, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(GatewayError::Network("connection refused".into())))
    }
}

// ==================== Helpers ====================

fn config() -> GenerationConfig {
    GenerationConfig::default().with_retry_delay(Duration::ZERO)
}

fn service(gateway: &Arc<ScriptedGateway>) -> GenerationService {
    GenerationService::new(gateway.clone(), config())
}

/// A one-candidate list, so each attempt makes exactly one call.
fn single() -> Vec<ModelCandidate> {
    vec![ModelCandidate::new(ProviderKind::Groq, "llama3-70b-8192", 0)]
}

fn question_json(n: usize) -> Value {
    json!({
        "question": format!("What does step {} do?", n),
        "options": ["Inserts", "Deletes", "Balances", "Searches"],
        "correctAnswer": ["Searches"],
        "explanation": "It walks the tree comparing keys."
    })
}

fn quiz_text(questions: usize) -> String {
    let questions: Vec<Value> = (1..=questions).map(question_json).collect();
    json!({ "questions": questions }).to_string()
}

fn module_text() -> String {
    let content = "A binary search tree keeps smaller keys to the left and larger keys to the right of every node.";
    json!({
        "title": "Binary Search Trees",
        "sections": [
            { "title": "Ordering", "content": content },
            { "title": "Lookup", "content": content }
        ]
    })
    .to_string()
}

// ==================== Generated Path ====================

#[tokio::test]
async fn test_quiz_generated_on_first_try() {
    let gateway = Arc::new(ScriptedGateway::new(vec![Ok(quiz_text(5))]));
    let result = service(&gateway)
        .generate_quiz(QuizRequest::new("Binary Search Trees", 5))
        .await
        .unwrap();

    assert_eq!(result.origin, Origin::Generated);
    assert_eq!(result.content.questions.len(), 5);
    assert_eq!(result.content.topic, "Binary Search Trees");
    assert_eq!(gateway.calls(), 1);
}

#[tokio::test]
async fn test_quiz_count_is_truncated_or_padded() {
    let gateway = Arc::new(ScriptedGateway::new(vec![Ok(quiz_text(8)), Ok(quiz_text(2))]));
    let service = service(&gateway);

    let long = service
        .generate_quiz(QuizRequest::new("Trees", 5))
        .await
        .unwrap();
    assert_eq!(long.content.questions.len(), 5);
    assert_eq!(long.origin, Origin::Generated);

    let short = service
        .generate_quiz(QuizRequest::new("Trees", 5))
        .await
        .unwrap();
    assert_eq!(short.origin, Origin::Generated);
    assert_eq!(short.content.questions.len(), 5);
    assert_eq!(
        short.content.questions[2].question,
        "Additional question 3 about Trees?"
    );
}

#[tokio::test]
async fn test_module_content_with_fence_and_trailing_prose() {
    let text = format!("```json\n{}\n```\nHope this helps!", module_text());
    let gateway = Arc::new(ScriptedGateway::new(vec![Ok(text)]));

    let result = service(&gateway)
        .generate_module_content(ModuleRequest::new("Binary Search Trees"))
        .await
        .unwrap();

    assert_eq!(result.origin, Origin::Generated);
    assert_eq!(result.content.title, "Binary Search Trees");
    assert_eq!(result.content.sections.len(), 2);
}

#[tokio::test]
async fn test_unusable_candidate_moves_to_next_in_same_pass() {
    let gateway = Arc::new(ScriptedGateway::new(vec![
        Ok("Sorry, I cannot help with that.".into()),
        Ok(quiz_text(3)),
    ]));

    let result = service(&gateway)
        .generate_quiz(QuizRequest::new("Graphs", 3))
        .await
        .unwrap();

    assert_eq!(result.origin, Origin::Generated);
    assert_eq!(gateway.calls(), 2);
}

#[tokio::test]
async fn test_rejected_then_retry_then_success() {
    let invalid = json!({ "questions": [{ "question": "Q?", "options": ["a", "b"] }] });
    let gateway = Arc::new(ScriptedGateway::new(vec![
        Ok(invalid.to_string()),
        Ok(quiz_text(4)),
    ]));
    let result = service(&gateway)
        .with_candidates(GenerationTask::Quiz, single())
        .generate_quiz(QuizRequest::new("Graphs", 4))
        .await
        .unwrap();

    // The second call is the second attempt.
    assert_eq!(result.origin, Origin::Generated);
    assert_eq!(gateway.calls(), 2);
}

#[tokio::test]
async fn test_narrative_summary_is_plain_text() {
    let gateway = Arc::new(ScriptedGateway::new(vec![Ok(
        "  You are making steady progress.  ".into()
    )]));

    let result = service(&gateway)
        .generate_narrative_summary(SummaryRequest::default())
        .await
        .unwrap();

    assert_eq!(result.origin, Origin::Generated);
    assert_eq!(result.content.as_str(), "You are making steady progress.");
}

// ==================== Fallback Path ====================

#[tokio::test]
async fn test_unreachable_providers_fall_back_quiz() {
    let gateway = Arc::new(ScriptedGateway::unreachable());
    let service = service(&gateway);
    let candidates = service.config().candidates_for(GenerationTask::Quiz).len();

    let result = service
        .generate_quiz(QuizRequest::new("Binary Search Trees", 5))
        .await
        .unwrap();

    assert_eq!(result.origin, Origin::Fallback);
    assert_eq!(result.content.questions.len(), 5);
    for q in &result.content.questions {
        assert_eq!(q.options.len(), 4);
        assert!(!q.correct_answer.is_empty());
        assert!(q.correct_answer.iter().all(|a| q.options.contains(a)));
    }
    // Three attempts, one call per candidate each.
    assert_eq!(gateway.calls(), 3 * candidates);
}

#[tokio::test]
async fn test_every_content_task_falls_back_to_valid_content() {
    let gateway = Arc::new(ScriptedGateway::unreachable());
    let service = service(&gateway);
    let profile = UserProfile {
        career_goal: Some("Data Engineer".into()),
        ..UserProfile::default()
    };

    let requests = vec![
        GenerationRequest::Module(ModuleRequest::new("Rust ownership")),
        GenerationRequest::Quiz(QuizRequest::new("Rust", 4)),
        GenerationRequest::Quiz(
            QuizRequest::new("Module 2", 3).with_content("Module 2: Lifetimes\nBorrowing rules."),
        ),
        GenerationRequest::Flashcards(FlashcardRequest::new("Rust", 6)),
        GenerationRequest::LearningPath(LearningPathRequest::new("Backend developer")),
        GenerationRequest::LearningPath(LearningPathRequest::new("Backend developer").detailed()),
        GenerationRequest::CareerPaths(CareerPathRequest::new(profile)),
        GenerationRequest::Nudges(NudgeRequest::default()),
        GenerationRequest::Summary(SummaryRequest::default()),
    ];

    for request in requests {
        let task = request.task();
        let content = service.generate(request).await.unwrap();
        assert!(content.is_fallback(), "{} did not fall back", task);
        match content {
            GeneratedContent::Module(r) => {
                assert!(shape::check(&r.content, &ModuleRequest::new("Rust ownership")).is_valid())
            }
            GeneratedContent::Quiz(r) => assert!(!r.content.questions.is_empty()),
            GeneratedContent::Flashcards(r) => assert_eq!(r.content.0.len(), 6),
            GeneratedContent::LearningPath(r) => assert!(r.content.0.len() >= 5),
            GeneratedContent::CareerPaths(r) => {
                assert_eq!(r.content.0.len(), 4);
                assert!(
                    r.content
                        .0
                        .iter()
                        .all(|p| !p.path_name.eq_ignore_ascii_case("data engineer"))
                );
            }
            GeneratedContent::Nudges(r) => assert_eq!(r.content.0.len(), 3),
            GeneratedContent::Summary(r) => assert!(!r.content.as_str().is_empty()),
            GeneratedContent::Chat(_) => unreachable!(),
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_career_paths_time_out_into_fallback() {
    let gateway = Arc::new(ScriptedGateway::slow(Duration::from_secs(120)));
    let config = GenerationConfig::default()
        .with_candidates(GenerationTask::CareerPathSet, single())
        .with_career_timeout(Some(Duration::from_secs(30)));
    let service = GenerationService::new(gateway.clone(), config);

    let mut answers = BTreeMap::new();
    answers.insert("1".to_string(), "A".to_string());
    let profile = UserProfile {
        career_goal: Some("Cloud Architect".into()),
        quiz_answers: answers,
        ..UserProfile::default()
    };

    let started = tokio::time::Instant::now();
    let result = service
        .generate_career_paths(CareerPathRequest::new(profile))
        .await
        .unwrap();

    assert_eq!(result.origin, Origin::Fallback);
    assert_eq!(result.content.0.len(), 4);
    assert_eq!(gateway.calls(), 3);
    // Three timed-out attempts plus two retry delays, never the full 120s.
    assert!(started.elapsed() < Duration::from_secs(120));
}

// ==================== Errors ====================

#[tokio::test]
async fn test_invalid_input_fails_before_network() {
    let gateway = Arc::new(ScriptedGateway::new(vec![Ok(quiz_text(5))]));

    let err = service(&gateway)
        .generate_quiz(QuizRequest::new("  ", 5))
        .await
        .unwrap_err();

    assert!(matches!(err, GenerationError::InvalidInput(_)));
    assert_eq!(gateway.calls(), 0);
}

#[tokio::test]
async fn test_chat_reply_returns_trimmed_text() {
    let gateway = Arc::new(ScriptedGateway::new(vec![Ok(
        "\nA closure captures its environment.\n".into()
    )]));

    let reply = service(&gateway)
        .chat_reply(ChatRequest::new("What is a closure?", Default::default()))
        .await
        .unwrap();

    assert_eq!(reply, "A closure captures its environment.");
}

#[tokio::test]
async fn test_chat_exhaustion_is_an_error_not_a_fallback() {
    let gateway = Arc::new(ScriptedGateway::unreachable());

    let err = service(&gateway)
        .chat_reply(ChatRequest::new("Hello?", Default::default()))
        .await
        .unwrap_err();

    assert!(matches!(err, GenerationError::ChatUnavailable));
    // No provider identity leaks into the caller-facing message.
    assert!(!err.to_string().contains("groq"));
    assert!(!err.to_string().contains("llama"));
}

#[tokio::test]
async fn test_empty_candidate_list_is_misconfigured() {
    let gateway = Arc::new(ScriptedGateway::unreachable());

    let err = service(&gateway)
        .with_candidates(GenerationTask::FlashcardSet, vec![])
        .generate_flashcards(FlashcardRequest::new("Rust", 3))
        .await
        .unwrap_err();

    assert!(matches!(err, GenerationError::Misconfigured(_)));
    assert_eq!(gateway.calls(), 0);
}

#[tokio::test]
async fn test_task_attempt_override() {
    let gateway = Arc::new(ScriptedGateway::unreachable());
    let service = GenerationService::new(
        gateway.clone(),
        config()
            .with_candidates(GenerationTask::NudgeSet, single())
            .with_task_attempts(GenerationTask::NudgeSet, 1),
    );

    let result = service.generate_nudges(NudgeRequest::default()).await.unwrap();

    assert!(result.is_fallback());
    assert_eq!(gateway.calls(), 1);
}
