//! Prompt templates for each generation task

use crate::content::career::{CAREER_PATHS, MODULES_PER_PATH};
use crate::content::learning_path::{MAX_DETAILED_MODULES, SKELETON_MODULES};
use crate::content::nudge::{NUDGES, NUDGE_TEXT_SOFT_LIMIT};
use crate::core::request::{
    CareerPathRequest, ChatRequest, FlashcardRequest, LearningPathRequest, ModuleRequest,
    NudgeRequest, QuizRequest, SummaryRequest,
};
use crate::profile::{InterestCategory, InterestProfile};
use crate::topic::{appropriate_language, is_code_related_topic, quiz_prompt_topic, usable_source_content};

/// Templates for generating prompts per task
pub struct PromptTemplate;

fn list_or(items: &[String], empty: &str) -> String {
    if items.is_empty() {
        empty.to_string()
    } else {
        items.join(", ")
    }
}

impl PromptTemplate {
    /// Module content prompt; technical topics ask for code examples.
    pub fn module_content(request: &ModuleRequest) -> String {
        let topic = request.topic.trim();
        let technical = is_code_related_topic(topic);
        let code_example = if technical {
            format!(
                r#""codeExample": {{
          "language": "{}",
          "code": "// Standard, executable code example",
          "explanation": "Explanation of how the code works"
        }}"#,
                appropriate_language(topic)
            )
        } else {
            r#""codeExample": null"#.to_string()
        };

        format!(
            r#"Generate factual educational content about: "{topic}"

IMPORTANT CONSTRAINTS:
- ONLY include FACTUAL content that you are CERTAIN about
- If you don't know something, provide general, established information instead of specifics
- Do NOT include subjective opinions or unverified information
- Focus only on core concepts that are well-established in this field
- DO NOT reference current events, trends, or statistics
- DO NOT reference your capabilities or limitations

CONTENT TYPE: {content_type}
LEVEL: {level}

CONTENT STRUCTURE:
- Begin with fundamental concepts that have remained stable for years
- Use factual, precise language without speculation
- Include practical examples that illustrate key points{code_rule}

FORMAT:
Return a JSON object with this EXACT structure:
{{
  "title": "Clear title for {topic}",
  "type": "{kind}",
  "sections": [
    {{
      "title": "Core Concept Name",
      "content": "Factual explanation with concrete examples",
      "keyPoints": ["Key point 1", "Key point 2", "Key point 3"],
      {code_example}
    }}
  ]
}}

Create {sections} focused sections that cover essential aspects of the topic.
ONLY RETURN VALID JSON WITHOUT ANY EXPLANATION OR INTRODUCTION."#,
            topic = topic,
            content_type = if technical {
                "Technical/Programming"
            } else {
                "General Education"
            },
            level = if request.detailed { "Advanced" } else { "Basic" },
            code_rule = if technical {
                "\n- Include code that follows standard conventions and works correctly"
            } else {
                ""
            },
            kind = if technical { "technical" } else { "general" },
            code_example = code_example,
            sections = if request.detailed { 4 } else { 3 },
        )
    }

    /// Quiz prompt, from a topic alone or grounded in module content.
    pub fn quiz(request: &QuizRequest) -> String {
        let content = usable_source_content(request.source_content.as_deref());
        let topic = quiz_prompt_topic(&request.topic, request.source_content.as_deref());
        let count = request.count;

        let source = match content {
            Some(content) => format!(
                "\nUse the following content to create relevant questions:\n{}\n",
                content
            ),
            None => String::new(),
        };
        let basis = if content.is_some() {
            "based on the provided content"
        } else {
            "drawn from a typical course on this subject"
        };

        format!(
            r#"Create a quiz about "{topic}" with exactly {count} questions.
{source}
Each question must be directly relevant to "{topic}" and {basis}.

Each question needs:
- A clear and challenging question
- Exactly 4 answer options
- The correct answer(s), copied verbatim from the options
- A brief explanation of why the answer is correct

Return the quiz in this exact JSON format:
{{
  "topic": "{topic}",
  "questions": [
    {{
      "question": "Question text goes here?",
      "options": ["Answer A", "Answer B", "Answer C", "Answer D"],
      "correctAnswer": ["Answer A"],
      "explanation": "Explanation of correct answer",
      "point": 10,
      "questionType": "single"
    }}
  ]
}}

For questions with more than one correct answer, list every correct option in
"correctAnswer" and set "questionType" to "multiple".
Make sure all JSON is valid and the question count is exactly {count}."#
        )
    }

    pub fn flashcards(request: &FlashcardRequest) -> String {
        let topic = request.topic.trim();
        let count = request.count;
        format!(
            r#"Generate {count} educational flashcards on "{topic}" with increasing difficulty.

Requirements:
- The front side (question) must be short and clear.
- The back side (answer) must be detailed (3-4 sentences) and informative.
- Difficulty increases from flashcard 1 to {count}: start with basic concepts,
  progress to intermediate details, end with advanced questions.
- Format the response strictly as a JSON array:

[
  {{ "id": 1, "frontHTML": "Basic question?", "backHTML": "Detailed easy explanation." }},
  {{ "id": 2, "frontHTML": "Intermediate question?", "backHTML": "Detailed intermediate explanation." }},
  {{ "id": {count}, "frontHTML": "Advanced question?", "backHTML": "Detailed advanced explanation." }}
]"#
        )
    }

    pub fn chat(request: &ChatRequest) -> String {
        let context = &request.context;
        let pick = |value: &Option<String>, default: &'static str| -> String {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
                .to_string()
        };
        format!(
            r#"Context:
Topic: {}
Level: {}
Focus: {}

Be concise and helpful. Answer the following: {}"#,
            pick(&context.topic, "General"),
            pick(&context.level, "Intermediate"),
            pick(&context.focus, "General understanding"),
            request.message.trim()
        )
    }

    pub fn learning_path(request: &LearningPathRequest) -> String {
        let goal = request.goal.trim();
        if request.detailed {
            format!(
                r#"Create a structured learning path for someone who wants to learn about "{goal}".
Design a series of modules (between {min} and {max}) that progressively build knowledge from basics to advanced concepts.

Return the result as a JSON array with this structure:
[
  {{
    "title": "Module title",
    "description": "Brief description of what will be covered in this module",
    "estimatedTime": "Estimated time to complete (e.g., '2-3 hours')",
    "content": "Detailed content overview with key points to learn"
  }}
]

Make sure the content is accurate and follows a logical progression from fundamentals to more complex topics."#,
                min = SKELETON_MODULES,
                max = MAX_DETAILED_MODULES,
            )
        } else {
            format!(
                r#"Generate a comprehensive learning path for: "{goal}"
Requirements:
- Create exactly {n} progressive modules
- Each module should build upon previous knowledge
- Focus on practical, hands-on learning
- Include both theoretical and practical aspects

Return ONLY a JSON array with exactly {n} strings in this format:
["Module 1: [Clear Title]", "Module 2: [Clear Title]", "Module 3: [Clear Title]", "Module 4: [Clear Title]", "Module 5: [Clear Title]"]"#,
                n = SKELETON_MODULES,
            )
        }
    }

    /// Career path prompt with the learner profile and quiz analysis.
    pub fn career_paths(request: &CareerPathRequest) -> String {
        let profile = &request.profile;
        let analysis = match InterestProfile::analyze(&profile.quiz_answers) {
            Some(interests) => {
                let mut lines = String::from("Career Interest Areas:");
                for category in InterestCategory::ALL {
                    lines.push_str(&format!(
                        "\n{} Interest: {}%",
                        category.label(),
                        interests.get(category)
                    ));
                }
                lines
            }
            None => "No quiz data provided".to_string(),
        };

        format!(
            r#"Create {paths} highly personalized career/learning paths for a user with the following profile:

Name: {name}
Age: {age}
Career Goal: "{goal}"
Current Skills: {skills}
Interests: {interests}

--- Quiz Analysis ---
{analysis}
-------------------

For each career path:
1. Give it a specific, personalized name that aligns with their goal, interests and quiz results
2. Do not simply name the path after the career goal itself
3. Create exactly {modules} focused modules that build logically on each other
4. Tailor the content to leverage their existing skills

Return EXACTLY {paths} career paths in this JSON format:
[
  {{
    "pathName": "Personalized path name based on their profile",
    "description": "How this path helps them achieve their goal",
    "difficulty": "beginner|intermediate|advanced",
    "estimatedTimeToComplete": "X months",
    "relevanceScore": 95,
    "modules": [
      {{
        "title": "Module Title",
        "description": "Brief description of what this module covers",
        "estimatedHours": 8,
        "keySkills": ["skill1", "skill2"]
      }}
    ]
  }}
]

relevanceScore is how relevant the path is to their profile (0-100).
STRICTLY use {modules} modules per path. Be concise and practical."#,
            paths = CAREER_PATHS,
            modules = MODULES_PER_PATH,
            name = profile.name.as_deref().unwrap_or("Anonymous"),
            age = profile
                .age
                .map(|a| a.to_string())
                .unwrap_or_else(|| "Unknown".to_string()),
            goal = profile.goal(),
            skills = list_or(&profile.skills, "none listed"),
            interests = list_or(&profile.interests, "none listed"),
            analysis = analysis,
        )
    }

    pub fn nudges(request: &NudgeRequest) -> String {
        let (career, progress, completed) = match &request.path {
            Some(path) => (
                path.career_name.as_str(),
                path.progress,
                path.completed_modules.len(),
            ),
            None => ("Learning journey", 0, 0),
        };
        let assessments = if request.assessments.is_empty() {
            "No recent assessments".to_string()
        } else {
            request
                .assessments
                .iter()
                .map(|a| format!("Score: {}, Accuracy: {}%", a.score, a.accuracy))
                .collect::<Vec<_>>()
                .join("; ")
        };

        format!(
            r#"Generate {n} personalized learning nudges for a student with the following profile:

Career Path: {career}
Progress: {progress}%
Recent Assessments: {assessments}
Completed Modules: {completed}

Return exactly {n} nudges as a JSON array with this structure:
[
  {{
    "type": "tip" | "recommendation" | "challenge",
    "text": "The motivational/insightful message",
    "actionText": "Optional call to action button text",
    "icon": "bulb" | "rocket"
  }}
]

Make nudges specific to their progress and performance.
Keep texts concise (max {limit} characters).
One nudge should be a "challenge" type."#,
            n = NUDGES,
            limit = NUDGE_TEXT_SOFT_LIMIT,
        )
    }

    /// Narrative career summary; the model answers in plain prose.
    pub fn narrative_summary(request: &SummaryRequest) -> String {
        let user = &request.user;
        let path = &request.career_path;
        let assessments = if request.assessments.is_empty() {
            "- No assessments yet".to_string()
        } else {
            request
                .assessments
                .iter()
                .map(|a| format!("- {}: Scored {}/10 - {}", a.module_name, a.score, a.feedback))
                .collect::<Vec<_>>()
                .join("\n")
        };
        let career = if path.career_name.trim().is_empty() {
            user.goal()
        } else {
            path.career_name.as_str()
        };

        format!(
            r#"You are an AI career coach and motivational mentor for students on their learning journey.

Generate a detailed, emotionally supportive and strategic career summary for the following user based on their learning progress, completed modules, quiz feedback, career goal and interests.

Write the output as a personalized narrative, not a list. Be friendly and motivating, like a personal coach who believes in the student. The report must include:

1. A warm introduction using the user's name
2. A recap of their progress so far
3. A reflection on their performance and strengths
4. Guidance on skills to focus on next
5. A vision of what they can achieve at this pace
6. An evaluation of job or internship readiness
7. Recommended next steps to speed up progress
8. A motivational closing message
9. Three short, practical tips for immediate action

### User Profile:
- Name: {name}
- Career Goal: {career}
- Interests: {interests}
- Skills: {skills}

### Learning Journey:
- Total Modules: {total}
- Completed Modules: {completed}
- Overall Progress: {progress}%
- Recommended Skills: {recommended}

### Quiz Assessments:
{assessments}

Speak directly to the user. Avoid bullet points in the final report."#,
            name = user.name.as_deref().unwrap_or("Learner"),
            interests = list_or(&user.interests, "Not specified"),
            skills = list_or(&user.skills, "Not specified"),
            total = path.modules.len(),
            completed = path.completed_modules.len(),
            progress = path.progress,
            recommended = list_or(&path.recommended_skills, "None listed"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::request::{ChatContext, UserProfile};

    #[test]
    fn test_module_prompt_mentions_code_for_technical_topics() {
        let prompt = PromptTemplate::module_content(&ModuleRequest::new("Python decorators"));
        assert!(prompt.contains("Technical/Programming"));
        assert!(prompt.contains(r#""language": "python""#));
        assert!(prompt.contains("Create 3 focused sections"));

        let prompt = PromptTemplate::module_content(&ModuleRequest::new("Baroque music").detailed());
        assert!(prompt.contains(r#""codeExample": null"#));
        assert!(prompt.contains("Create 4 focused sections"));
    }

    #[test]
    fn test_quiz_prompt_embeds_content_and_clean_topic() {
        let content = format!("Chapter: Iterators\n{}", "Iterators yield items lazily. ".repeat(5));
        let request = QuizRequest::new("Module 4", 3).with_content(content);
        let prompt = PromptTemplate::quiz(&request);
        assert!(prompt.contains(r#"Create a quiz about "Iterators" with exactly 3 questions."#));
        assert!(prompt.contains("Iterators yield items lazily."));
    }

    #[test]
    fn test_chat_prompt_defaults() {
        let prompt = PromptTemplate::chat(&ChatRequest::new("What is a monad?", ChatContext::default()));
        assert!(prompt.contains("Topic: General"));
        assert!(prompt.contains("Level: Intermediate"));
        assert!(prompt.contains("Focus: General understanding"));
        assert!(prompt.ends_with("What is a monad?"));
    }

    #[test]
    fn test_career_prompt_includes_analysis() {
        let profile = UserProfile {
            career_goal: Some("UX Design".to_string()),
            quiz_answers: [("1".to_string(), "B".to_string())].into_iter().collect(),
            ..Default::default()
        };
        let prompt = PromptTemplate::career_paths(&CareerPathRequest::new(profile));
        assert!(prompt.contains("Creative Interest: 100%"));
        assert!(prompt.contains(r#"Career Goal: "UX Design""#));

        let prompt = PromptTemplate::career_paths(&CareerPathRequest::new(UserProfile::default()));
        assert!(prompt.contains("No quiz data provided"));
        assert!(prompt.contains(r#"Career Goal: "tech career""#));
    }

    #[test]
    fn test_learning_path_prompt_variants() {
        let plain = PromptTemplate::learning_path(&LearningPathRequest::new("Go"));
        assert!(plain.contains("exactly 5 strings"));
        let detailed = PromptTemplate::learning_path(&LearningPathRequest::new("Go").detailed());
        assert!(detailed.contains("between 5 and 7"));
    }
}
