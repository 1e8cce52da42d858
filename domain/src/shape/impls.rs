use super::ContentShape;
use super::coerce;
use crate::content::career::{CAREER_PATHS, MODULES_PER_PATH};
use crate::content::learning_path::{MAX_DETAILED_MODULES, SKELETON_MODULES};
use crate::content::nudge::NUDGES;
use crate::content::{
    CareerPathSet, ContentKind, FlashcardSet, LearningPath, ModuleContent, NarrativeSummary,
    NudgeSet, QuestionType, Quiz,
};
use crate::core::request::{
    CareerPathRequest, FlashcardRequest, LearningPathRequest, ModuleRequest, NudgeRequest,
    QuizRequest, SummaryRequest,
};
use crate::core::task::GenerationTask;
use crate::fallback::{FallbackSynthesizer, default_modules};
use crate::topic::{
    clean_code, clean_section_text, is_code_related_topic, strip_module_prefix, strip_numbering,
};
use crate::validation::CountRule;
use serde_json::Value;

impl ContentShape for ModuleContent {
    type Params = ModuleRequest;

    fn task(_: &ModuleRequest) -> GenerationTask {
        GenerationTask::ModuleContent
    }

    fn expected_items(_: &ModuleRequest) -> CountRule {
        CountRule::AtLeast(1)
    }

    fn coerce(payload: Value, params: &ModuleRequest) -> Value {
        coerce::module_content(payload, &params.topic)
    }

    fn normalize(mut self, params: &ModuleRequest) -> Self {
        self.title = self.title.trim().to_string();
        self.kind = if is_code_related_topic(&params.topic) {
            ContentKind::Technical
        } else {
            ContentKind::General
        };
        for section in &mut self.sections {
            section.title = section.title.trim().to_string();
            section.content = clean_section_text(&section.content);
            section.key_points = section
                .key_points
                .iter()
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect();
            if let Some(example) = &mut section.code_example {
                example.code = clean_code(&example.code);
            }
            if section
                .code_example
                .as_ref()
                .is_some_and(|e| e.code.is_empty())
            {
                section.code_example = None;
            }
        }
        self
    }

    fn fallback(params: &ModuleRequest) -> Self {
        FallbackSynthesizer::module_content(params)
    }
}

impl ContentShape for Quiz {
    type Params = QuizRequest;

    fn task(params: &QuizRequest) -> GenerationTask {
        params.task()
    }

    fn expected_items(params: &QuizRequest) -> CountRule {
        CountRule::Exactly(params.count)
    }

    fn coerce(payload: Value, _: &QuizRequest) -> Value {
        coerce::quiz(payload)
    }

    fn normalize(mut self, params: &QuizRequest) -> Self {
        let topic = params.topic.trim();
        self.topic = topic.to_string();

        self.questions.truncate(params.count);
        let missing = params.count - self.questions.len();
        self.questions
            .extend((1..=missing).map(|n| FallbackSynthesizer::padding_question(topic, n)));

        for question in &mut self.questions {
            question.question_type = if question.correct_answer.len() == 1 {
                QuestionType::Single
            } else {
                QuestionType::Multiple
            };
        }
        self
    }

    fn fallback(params: &QuizRequest) -> Self {
        FallbackSynthesizer::quiz(params)
    }
}

impl ContentShape for FlashcardSet {
    type Params = FlashcardRequest;

    fn task(_: &FlashcardRequest) -> GenerationTask {
        GenerationTask::FlashcardSet
    }

    fn expected_items(params: &FlashcardRequest) -> CountRule {
        CountRule::Exactly(params.count)
    }

    fn coerce(payload: Value, _: &FlashcardRequest) -> Value {
        coerce::flashcards(payload)
    }

    fn normalize(mut self, params: &FlashcardRequest) -> Self {
        let topic = params.topic.trim();
        self.0.truncate(params.count);
        // Ids follow position so padded cards never collide with model ids.
        for (i, card) in self.0.iter_mut().enumerate() {
            card.id = i as u32 + 1;
        }
        for id in (self.0.len() + 1)..=params.count {
            self.0.push(FallbackSynthesizer::flashcard(topic, id as u32));
        }
        self
    }

    fn fallback(params: &FlashcardRequest) -> Self {
        FallbackSynthesizer::flashcards(params)
    }
}

impl ContentShape for LearningPath {
    type Params = LearningPathRequest;

    fn task(_: &LearningPathRequest) -> GenerationTask {
        GenerationTask::LearningPathSkeleton
    }

    fn expected_items(params: &LearningPathRequest) -> CountRule {
        if params.detailed {
            CountRule::Between(SKELETON_MODULES, MAX_DETAILED_MODULES)
        } else {
            CountRule::Exactly(SKELETON_MODULES)
        }
    }

    fn coerce(payload: Value, params: &LearningPathRequest) -> Value {
        coerce::learning_path(payload, params.goal.trim(), params.detailed)
    }

    fn normalize(mut self, params: &LearningPathRequest) -> Self {
        let goal = params.goal.trim();
        if params.detailed {
            self.0.truncate(MAX_DETAILED_MODULES);
            for n in (self.0.len() + 1)..=SKELETON_MODULES {
                self.0.push(FallbackSynthesizer::outline_module(goal, n));
            }
            for module in &mut self.0 {
                module.title = module.title.trim().to_string();
            }
        } else {
            self.0.truncate(SKELETON_MODULES);
            for (i, module) in self.0.iter_mut().enumerate() {
                module.title = format!("Module {}: {}", i + 1, strip_module_prefix(&module.title));
            }
            for n in (self.0.len() + 1)..=SKELETON_MODULES {
                self.0.push(FallbackSynthesizer::skeleton_module(goal, n));
            }
        }
        self
    }

    fn fallback(params: &LearningPathRequest) -> Self {
        FallbackSynthesizer::learning_path(params)
    }
}

impl ContentShape for CareerPathSet {
    type Params = CareerPathRequest;

    fn task(_: &CareerPathRequest) -> GenerationTask {
        GenerationTask::CareerPathSet
    }

    fn expected_items(_: &CareerPathRequest) -> CountRule {
        CountRule::Exactly(CAREER_PATHS)
    }

    fn coerce(payload: Value, params: &CareerPathRequest) -> Value {
        coerce::career_paths(payload, params.profile.goal())
    }

    fn normalize(mut self, params: &CareerPathRequest) -> Self {
        for path in &mut self.0 {
            path.path_name = path.path_name.trim().to_string();
            path.modules.truncate(MODULES_PER_PATH);
            for module in &mut path.modules {
                module.title = strip_numbering(&module.title);
            }
            let defaults = default_modules(&path.path_name);
            let have = path.modules.len();
            path.modules.extend(defaults.into_iter().skip(have));
        }

        self.0.truncate(CAREER_PATHS);
        if let Some(first) = self.0.first().cloned() {
            while self.0.len() < CAREER_PATHS {
                let mut alternative = first.clone();
                alternative.path_name = format!("Alternative {}", first.path_name);
                alternative.relevance_score = first.relevance_score.saturating_sub(10).max(1);
                self.0.push(alternative);
            }
        }

        self.exclude_goal(params.profile.goal());
        self
    }

    fn fallback(params: &CareerPathRequest) -> Self {
        FallbackSynthesizer::career_paths(params)
    }
}

impl ContentShape for NudgeSet {
    type Params = NudgeRequest;

    fn task(_: &NudgeRequest) -> GenerationTask {
        GenerationTask::NudgeSet
    }

    fn expected_items(_: &NudgeRequest) -> CountRule {
        CountRule::Exactly(NUDGES)
    }

    fn coerce(payload: Value, _: &NudgeRequest) -> Value {
        coerce::nudges(payload)
    }

    fn normalize(mut self, params: &NudgeRequest) -> Self {
        for nudge in &mut self.0 {
            nudge.text = nudge.text.trim().to_string();
        }
        self.0.truncate(NUDGES);
        let have = self.0.len();
        self.0
            .extend(FallbackSynthesizer::nudges(params).0.into_iter().skip(have));
        self
    }

    fn fallback(params: &NudgeRequest) -> Self {
        FallbackSynthesizer::nudges(params)
    }
}

impl ContentShape for NarrativeSummary {
    type Params = SummaryRequest;

    fn task(_: &SummaryRequest) -> GenerationTask {
        GenerationTask::NarrativeSummary
    }

    fn expected_items(_: &SummaryRequest) -> CountRule {
        CountRule::AtLeast(1)
    }

    fn coerce(payload: Value, _: &SummaryRequest) -> Value {
        payload
    }

    fn normalize(self, _: &SummaryRequest) -> Self {
        NarrativeSummary(self.0.trim().to_string())
    }

    fn fallback(params: &SummaryRequest) -> Self {
        FallbackSynthesizer::summary(params)
    }
}
