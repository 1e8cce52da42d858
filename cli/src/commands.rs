//! CLI command definitions

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use coursegen_domain::{
    CareerPathRequest, ChatContext, ChatRequest, FlashcardRequest, GenerationRequest,
    LearningPathRequest, ModuleRequest, NudgeRequest, QuizRequest, SummaryRequest, UserProfile,
};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Output format for generated content
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Indented JSON; chat replies as plain text
    Pretty,
    /// Compact single-line JSON
    Json,
}

/// CLI arguments for coursegen
#[derive(Parser, Debug)]
#[command(name = "coursegen")]
#[command(author, version, about = "Generate validated learning content with LLM fallbacks")]
#[command(long_about = r#"
coursegen turns a topic into structured learning content (modules, quizzes,
flashcards, learning paths, career paths, nudges, summaries) by calling one
or more LLM providers. Model output is sanitized and validated; when no
provider produces usable content, deterministic fallback content is
returned instead, tagged with "origin": "fallback".

API keys are read from GROQ_API_KEY, GEMINI_API_KEY and OPENAI_API_KEY
unless configured otherwise.

Configuration files are loaded from (in priority order):
1. COURSEGEN_* environment variables
2. --config <path>     Explicit config file
3. ./coursegen.toml    Project-level config
4. ~/.config/coursegen/config.toml   Global config

Example:
  coursegen module "Binary Search Trees" --detailed
  coursegen quiz "Module 3" --content-file module3.md -n 5
  coursegen careers --goal "Data Engineer" --answer 1=A --answer 2=B
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress the fallback notice on stderr
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Also write logs to daily rolling files in this directory
    #[arg(long, value_name = "DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long, global = true)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a learning module for a topic
    Module {
        topic: String,
        /// Advanced level with four sections
        #[arg(long)]
        detailed: bool,
    },

    /// Generate a multiple-choice quiz
    Quiz {
        topic: String,
        /// Number of questions
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,
        /// Build the quiz from this module content
        #[arg(long, value_name = "PATH")]
        content_file: Option<PathBuf>,
    },

    /// Generate flashcards
    Flashcards {
        topic: String,
        /// Number of cards
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,
    },

    /// Ask the learning assistant a question
    Chat {
        message: String,
        #[arg(long)]
        topic: Option<String>,
        #[arg(long)]
        level: Option<String>,
        #[arg(long)]
        focus: Option<String>,
    },

    /// Generate a learning path for a goal
    Path {
        goal: String,
        /// Module outlines instead of titles only
        #[arg(long)]
        detailed: bool,
    },

    /// Suggest four career paths for a learner
    Careers(CareerArgs),

    /// Generate three progress nudges
    Nudges {
        /// JSON file with `path` progress and `assessments`
        #[arg(long, value_name = "PATH")]
        input: Option<PathBuf>,
    },

    /// Write a narrative progress summary
    Summary {
        /// JSON file with `user`, `careerPath` and `assessments`
        #[arg(long, value_name = "PATH")]
        input: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
pub struct CareerArgs {
    /// JSON file with the learner profile; flags below override it
    #[arg(long, value_name = "PATH")]
    pub profile: Option<PathBuf>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub goal: Option<String>,

    /// Known skill (repeatable)
    #[arg(long = "skill", value_name = "SKILL")]
    pub skills: Vec<String>,

    /// Interest (repeatable)
    #[arg(long = "interest", value_name = "INTEREST")]
    pub interests: Vec<String>,

    /// Interest quiz answer as `question=LETTER` (repeatable)
    #[arg(long = "answer", value_name = "ID=LETTER")]
    pub answers: Vec<String>,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn read_json_or_default<T: DeserializeOwned + Default>(path: Option<&Path>) -> Result<T> {
    path.map(read_json).transpose().map(Option::unwrap_or_default)
}

impl CareerArgs {
    fn into_profile(self) -> Result<UserProfile> {
        let mut profile: UserProfile = read_json_or_default(self.profile.as_deref())?;

        if self.name.is_some() {
            profile.name = self.name;
        }
        if self.goal.is_some() {
            profile.career_goal = self.goal;
        }
        profile.skills.extend(self.skills);
        profile.interests.extend(self.interests);

        for answer in &self.answers {
            let Some((id, letter)) = answer.split_once('=') else {
                bail!("Invalid --answer '{}': expected ID=LETTER", answer);
            };
            profile
                .quiz_answers
                .insert(id.trim().to_string(), letter.trim().to_string());
        }
        Ok(profile)
    }
}

impl Command {
    /// Build the generation request, reading any input files.
    pub fn into_request(self) -> Result<GenerationRequest> {
        Ok(match self {
            Command::Module { topic, detailed } => {
                let request = ModuleRequest::new(topic);
                GenerationRequest::Module(if detailed { request.detailed() } else { request })
            }
            Command::Quiz {
                topic,
                count,
                content_file,
            } => {
                let mut request = QuizRequest::new(topic, count);
                if let Some(path) = content_file {
                    let content = std::fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    request = request.with_content(content);
                }
                GenerationRequest::Quiz(request)
            }
            Command::Flashcards { topic, count } => {
                GenerationRequest::Flashcards(FlashcardRequest::new(topic, count))
            }
            Command::Chat {
                message,
                topic,
                level,
                focus,
            } => GenerationRequest::Chat(ChatRequest::new(
                message,
                ChatContext {
                    topic,
                    level,
                    focus,
                },
            )),
            Command::Path { goal, detailed } => {
                let request = LearningPathRequest::new(goal);
                GenerationRequest::LearningPath(if detailed {
                    request.detailed()
                } else {
                    request
                })
            }
            Command::Careers(args) => {
                GenerationRequest::CareerPaths(CareerPathRequest::new(args.into_profile()?))
            }
            Command::Nudges { input } => {
                let request: NudgeRequest = read_json_or_default(input.as_deref())?;
                GenerationRequest::Nudges(request)
            }
            Command::Summary { input } => {
                let request: SummaryRequest = read_json_or_default(input.as_deref())?;
                GenerationRequest::Summary(request)
            }
        })
    }
}
