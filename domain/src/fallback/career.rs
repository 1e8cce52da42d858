//! Career path fallbacks.
//!
//! With a quiz-derived interest profile the two strongest categories pick
//! themed paths. Without one, a profile that lists skills or interests gets
//! paths built around them, and an empty profile gets a plain
//! beginner-to-advanced ladder.

use crate::content::career::MODULES_PER_PATH;
use crate::content::{CareerModule, CareerPath, CareerPathSet, Difficulty};
use crate::core::request::UserProfile;
use crate::profile::{InterestCategory, InterestProfile};

struct Theme {
    name: &'static str,
    description: &'static str,
    modules: [&'static str; MODULES_PER_PATH],
}

fn theme(category: InterestCategory) -> Theme {
    match category {
        InterestCategory::Technical => Theme {
            name: "Technical Development",
            description: "building technical skills through hands-on projects",
            modules: [
                "Module 1: Core Technical Foundations",
                "Module 2: Programming Fundamentals",
                "Module 3: Building Your First Project",
                "Module 4: Advanced Technical Skills",
                "Module 5: Technical Portfolio Development",
            ],
        },
        InterestCategory::Creative => Theme {
            name: "Creative Expression",
            description: "combining creativity with technical skills",
            modules: [
                "Module 1: Creative Thinking Principles",
                "Module 2: Design and Expression Fundamentals",
                "Module 3: Creative Tools Mastery",
                "Module 4: Building a Creative Portfolio",
                "Module 5: Launching Your Creative Project",
            ],
        },
        InterestCategory::Business => Theme {
            name: "Business and Entrepreneurship",
            description: "developing business acumen and leadership skills",
            modules: [
                "Module 1: Business Fundamentals",
                "Module 2: Market Analysis and Strategy",
                "Module 3: Financial Planning and Management",
                "Module 4: Leadership and Team Building",
                "Module 5: Business Plan Development",
            ],
        },
        InterestCategory::Performance => Theme {
            name: "Performance and Presentation",
            description: "mastering presentation and performance skills",
            modules: [
                "Module 1: Communication Fundamentals",
                "Module 2: Presentation Skills Development",
                "Module 3: Audience Engagement Techniques",
                "Module 4: Performance Optimization",
                "Module 5: Capstone Performance Project",
            ],
        },
        InterestCategory::Service => Theme {
            name: "Community Impact and Service",
            description: "making a positive impact through service and leadership",
            modules: [
                "Module 1: Understanding Community Needs",
                "Module 2: Service Leadership Principles",
                "Module 3: Project Planning for Impact",
                "Module 4: Building Sustainable Solutions",
                "Module 5: Measuring and Scaling Impact",
            ],
        },
    }
}

const STAGES: [(&str, u32); MODULES_PER_PATH] = [
    ("Foundations", 6),
    ("Core Concepts", 8),
    ("Applied Practice", 10),
    ("Advanced Topics", 10),
    ("Capstone Project", 12),
];

/// Five generic modules for a path called `name`.
pub fn default_modules(name: &str) -> Vec<CareerModule> {
    STAGES
        .iter()
        .enumerate()
        .map(|(i, (stage, hours))| CareerModule {
            title: format!("Module {}: {} {}", i + 1, name, stage),
            description: format!(
                "Step {} of the {} path: {}",
                i + 1,
                name,
                stage.to_lowercase()
            ),
            estimated_hours: *hours,
            key_skills: vec![name.to_string(), stage.to_string()],
        })
        .collect()
}

fn path(
    path_name: String,
    description: String,
    difficulty: Difficulty,
    months: u32,
    relevance_score: u32,
    modules: Vec<CareerModule>,
) -> CareerPath {
    CareerPath {
        path_name,
        description,
        difficulty,
        estimated_time_to_complete: format!("{} months", months),
        relevance_score,
        modules,
    }
}

fn module(
    title: &str,
    description: &str,
    estimated_hours: u32,
    key_skills: &[&str],
) -> CareerModule {
    CareerModule {
        title: title.to_string(),
        description: description.to_string(),
        estimated_hours,
        key_skills: key_skills.iter().map(|s| s.to_string()).collect(),
    }
}

fn first_non_empty(items: &[String]) -> Option<&str> {
    items.iter().map(|s| s.trim()).find(|s| !s.is_empty())
}

fn themed_paths(profile: &UserProfile, interests: &InterestProfile) -> Vec<CareerPath> {
    let goal = profile.goal();
    let top = interests.top(2);
    let (first, second) = (top[0], top[1]);
    let skills: Vec<String> = profile.skills.iter().take(2).cloned().collect();
    let skills_with = |category: InterestCategory| {
        let mut s = skills.clone();
        s.push(format!("{} skills", category));
        s
    };

    let primary = theme(first);
    let secondary = theme(second);
    let focus = first_non_empty(&profile.interests).unwrap_or("Core");

    vec![
        path(
            format!("{} through {}", goal, primary.name),
            format!(
                "Achieve your goal in {} by focusing on {}",
                goal, primary.description
            ),
            Difficulty::Beginner,
            3,
            90,
            primary
                .modules
                .iter()
                .enumerate()
                .map(|(i, title)| CareerModule {
                    title: title.to_string(),
                    description: format!(
                        "Step {} in mastering {} skills related to {}",
                        i + 1,
                        first,
                        goal
                    ),
                    estimated_hours: 8,
                    key_skills: skills_with(first),
                })
                .collect(),
        ),
        path(
            format!("{} Approach to {}", second.label(), goal),
            format!("A {}-focused pathway to achieving your {}", second, goal),
            Difficulty::Intermediate,
            4,
            85,
            secondary
                .modules
                .iter()
                .enumerate()
                .map(|(i, title)| CareerModule {
                    title: title.to_string(),
                    description: format!(
                        "Step {} in developing {} expertise for your {}",
                        i + 1,
                        second,
                        goal
                    ),
                    estimated_hours: 10,
                    key_skills: skills_with(second),
                })
                .collect(),
        ),
        path(
            format!("{} Specialization", focus),
            format!(
                "Deepen your knowledge in {} to excel in {}",
                first_non_empty(&profile.interests).unwrap_or("your area of interest"),
                goal
            ),
            Difficulty::Intermediate,
            3,
            80,
            default_modules(&format!("{} Specialization", focus)),
        ),
        path(
            format!("Practical {} Projects", goal),
            format!(
                "Hands-on project work to build real-world experience in {}",
                goal
            ),
            Difficulty::Advanced,
            4,
            75,
            vec![
                module(
                    "Module 1: Project Planning and Requirements",
                    "Learn how to plan and scope your projects effectively",
                    8,
                    &["Planning", "Requirements analysis"],
                ),
                module(
                    "Module 2: Design and Architecture",
                    "Develop the architecture for your projects",
                    12,
                    &["Design thinking", "Architecture"],
                ),
                module(
                    "Module 3: Implementation and Development",
                    "Build your projects using best practices",
                    15,
                    &["Development", "Testing"],
                ),
                module(
                    "Module 4: Testing and Quality Assurance",
                    "Ensure your projects meet quality standards",
                    10,
                    &["Quality assurance", "Testing methodologies"],
                ),
                module(
                    "Module 5: Deployment and Presentation",
                    "Launch your projects and present your work",
                    8,
                    &["Deployment", "Presentation"],
                ),
            ],
        ),
    ]
}

fn profile_paths(profile: &UserProfile) -> Vec<CareerPath> {
    let goal = profile.goal();
    let interest = first_non_empty(&profile.interests);
    let skill = first_non_empty(&profile.skills);

    vec![
        path(
            format!("{} Fundamentals", goal),
            format!(
                "Master the core concepts needed for a successful career in {}",
                goal
            ),
            Difficulty::Beginner,
            3,
            90,
            default_modules(&format!("{} Fundamentals", goal)),
        ),
        path(
            format!("Advanced {} Specialization", interest.unwrap_or("Tech")),
            format!(
                "Deepen your knowledge in {} to stand out in your career",
                interest.unwrap_or("technology")
            ),
            Difficulty::Intermediate,
            4,
            85,
            default_modules(&format!("{} Specialization", interest.unwrap_or("Tech"))),
        ),
        path(
            format!("{} Mastery", skill.unwrap_or("Coding")),
            format!(
                "Build upon your existing {} skills to reach expert level",
                skill.unwrap_or("coding")
            ),
            Difficulty::Advanced,
            5,
            80,
            default_modules(&format!("{} Mastery", skill.unwrap_or("Coding"))),
        ),
        path(
            format!("Practical {} Projects", goal),
            format!(
                "Apply your knowledge through hands-on projects relevant to {}",
                goal
            ),
            Difficulty::Intermediate,
            3,
            88,
            default_modules(&format!("{} Projects", goal)),
        ),
    ]
}

fn ladder_paths(profile: &UserProfile) -> Vec<CareerPath> {
    let goal = profile.goal();
    let numbered = |label: &str, description: &str, base_hours: u32, skills: &[&str]| {
        (1..=MODULES_PER_PATH as u32)
            .map(|i| {
                module(
                    &format!("Module {}: {} {}", i, label, i),
                    description,
                    base_hours + i - 1,
                    skills,
                )
            })
            .collect::<Vec<_>>()
    };

    vec![
        path(
            format!("Getting Started with {}", goal),
            format!("Fundamental path to begin your journey in {}", goal),
            Difficulty::Beginner,
            2,
            95,
            vec![
                module(
                    "Module 1: Understanding the Basics",
                    "Learn core concepts and terminology",
                    6,
                    &["Fundamentals", "Terminology"],
                ),
                module(
                    "Module 2: Essential Skills Development",
                    "Build the must-have skills for this field",
                    8,
                    &["Core skills", "Practical basics"],
                ),
                module(
                    "Module 3: Your First Project",
                    "Apply what you've learned in a simple project",
                    10,
                    &["Project work", "Application"],
                ),
                module(
                    "Module 4: Problem-Solving Techniques",
                    "Learn to overcome common challenges",
                    8,
                    &["Problem solving", "Troubleshooting"],
                ),
                module(
                    "Module 5: Next Steps and Growth",
                    "Plan your continued learning journey",
                    6,
                    &["Career planning", "Continuous learning"],
                ),
            ],
        ),
        path(
            format!("Intermediate {}", goal),
            format!("Build on your existing knowledge to advance in {}", goal),
            Difficulty::Intermediate,
            3,
            85,
            numbered(
                "Intermediate Topic",
                "Deepen your understanding of important concepts",
                8,
                &["Advanced understanding", "Implementation skills"],
            ),
        ),
        path(
            format!("{} Specialization", goal),
            format!("Focus on specialized areas within {}", goal),
            Difficulty::Advanced,
            4,
            80,
            numbered(
                "Specialization Area",
                "Master specialized techniques and approaches",
                10,
                &["Specialization", "Expert techniques"],
            ),
        ),
        path(
            format!("Practical {} Applications", goal),
            "Apply your knowledge in real-world scenarios".to_string(),
            Difficulty::Intermediate,
            3,
            75,
            numbered(
                "Real-world Application",
                "Learn how to apply concepts in practical situations",
                9,
                &["Practical application", "Real-world skills"],
            ),
        ),
    ]
}

pub(super) fn career_paths(profile: &UserProfile) -> CareerPathSet {
    let paths = match InterestProfile::analyze(&profile.quiz_answers) {
        Some(interests) => themed_paths(profile, &interests),
        None if first_non_empty(&profile.skills).is_some()
            || first_non_empty(&profile.interests).is_some() =>
        {
            profile_paths(profile)
        }
        None => ladder_paths(profile),
    };

    let mut set = CareerPathSet(paths);
    set.exclude_goal(profile.goal());
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::career::CAREER_PATHS;

    fn profile_with_answers(answers: &[&str]) -> UserProfile {
        UserProfile {
            career_goal: Some("Data Science".to_string()),
            skills: vec!["Python".to_string(), "Excel".to_string(), "SQL".to_string()],
            interests: vec!["statistics".to_string()],
            quiz_answers: answers
                .iter()
                .enumerate()
                .map(|(i, a)| (i.to_string(), a.to_string()))
                .collect(),
            ..Default::default()
        }
    }

    fn assert_well_formed(set: &CareerPathSet) {
        assert_eq!(set.len(), CAREER_PATHS);
        for path in &set.0 {
            assert_eq!(path.modules.len(), MODULES_PER_PATH, "{}", path.path_name);
            assert!(path.relevance_score <= 100);
        }
    }

    #[test]
    fn test_themed_paths_follow_top_interests() {
        let set = career_paths(&profile_with_answers(&["B", "B", "C", "A", "B", "C"]));
        assert_well_formed(&set);
        assert_eq!(set.0[0].path_name, "Data Science through Creative Expression");
        assert_eq!(set.0[1].path_name, "Business Approach to Data Science");
        assert_eq!(set.0[2].path_name, "statistics Specialization");
        assert_eq!(
            set.0[0].modules[0].key_skills,
            vec!["Python", "Excel", "creative skills"]
        );
    }

    #[test]
    fn test_profile_paths_without_quiz() {
        let set = career_paths(&profile_with_answers(&[]));
        assert_well_formed(&set);
        assert_eq!(set.0[0].path_name, "Data Science Fundamentals");
        assert_eq!(set.0[2].path_name, "Python Mastery");
    }

    #[test]
    fn test_ladder_paths_for_empty_profile() {
        let set = career_paths(&UserProfile::default());
        assert_well_formed(&set);
        assert_eq!(set.0[0].path_name, "Getting Started with tech career");
        assert_eq!(set.0[1].modules[4].estimated_hours, 12);
    }

    #[test]
    fn test_fallback_never_names_the_goal() {
        let profile = UserProfile {
            career_goal: Some("Web Specialization".to_string()),
            interests: vec!["Web".to_string()],
            quiz_answers: [("1".to_string(), "A".to_string())].into_iter().collect(),
            ..Default::default()
        };
        let set = career_paths(&profile);
        assert_eq!(set.0[2].path_name, "Web Specialization Career Accelerator");
    }

    #[test]
    fn test_default_modules() {
        let modules = default_modules("Rust Mastery");
        assert_eq!(modules.len(), MODULES_PER_PATH);
        assert_eq!(modules[0].title, "Module 1: Rust Mastery Foundations");
        assert_eq!(modules[4].estimated_hours, 12);
    }
}
