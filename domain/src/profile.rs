//! Interest profile analysis for career-path generation.
//!
//! Each sign-up quiz answer is a single letter `A`..`E`, one per interest
//! category. The profile is the share of answers per category in whole
//! percent. Largest-remainder rounding keeps the total at exactly 100.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The five fixed interest categories, in answer-letter order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterestCategory {
    Technical,
    Creative,
    Business,
    Performance,
    Service,
}

impl InterestCategory {
    pub const ALL: [InterestCategory; 5] = [
        InterestCategory::Technical,
        InterestCategory::Creative,
        InterestCategory::Business,
        InterestCategory::Performance,
        InterestCategory::Service,
    ];

    /// Category for a quiz answer letter (case-insensitive, trimmed).
    pub fn from_answer(answer: &str) -> Option<Self> {
        match answer.trim().to_ascii_uppercase().as_str() {
            "A" => Some(InterestCategory::Technical),
            "B" => Some(InterestCategory::Creative),
            "C" => Some(InterestCategory::Business),
            "D" => Some(InterestCategory::Performance),
            "E" => Some(InterestCategory::Service),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InterestCategory::Technical => "technical",
            InterestCategory::Creative => "creative",
            InterestCategory::Business => "business",
            InterestCategory::Performance => "performance",
            InterestCategory::Service => "service",
        }
    }

    /// Capitalised label used in prompts and path names.
    pub fn label(&self) -> &'static str {
        match self {
            InterestCategory::Technical => "Technical",
            InterestCategory::Creative => "Creative",
            InterestCategory::Business => "Business",
            InterestCategory::Performance => "Performance",
            InterestCategory::Service => "Service",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for InterestCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Percentage per interest category; always sums to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestProfile {
    pub technical: u32,
    pub creative: u32,
    pub business: u32,
    pub performance: u32,
    pub service: u32,
}

impl InterestProfile {
    /// Analyze raw quiz answers.
    ///
    /// Answers outside `A`..`E` are ignored. Returns `None` when no
    /// answer maps to a category.
    pub fn analyze(answers: &BTreeMap<String, String>) -> Option<Self> {
        let mut counts = [0u32; 5];
        for answer in answers.values() {
            if let Some(category) = InterestCategory::from_answer(answer) {
                counts[category.index()] += 1;
            }
        }

        let total: u32 = counts.iter().sum();
        if total == 0 {
            return None;
        }

        let mut percents = [0u32; 5];
        let mut remainders = [0u32; 5];
        for (i, count) in counts.iter().enumerate() {
            percents[i] = count * 100 / total;
            remainders[i] = count * 100 % total;
        }

        // Hand the rounding deficit to the largest remainders; ties go to
        // the earlier category.
        let deficit = 100 - percents.iter().sum::<u32>();
        let mut order: Vec<usize> = (0..5).collect();
        order.sort_by(|a, b| remainders[*b].cmp(&remainders[*a]).then(a.cmp(b)));
        for i in order.into_iter().take(deficit as usize) {
            percents[i] += 1;
        }

        Some(Self {
            technical: percents[0],
            creative: percents[1],
            business: percents[2],
            performance: percents[3],
            service: percents[4],
        })
    }

    pub fn get(&self, category: InterestCategory) -> u32 {
        match category {
            InterestCategory::Technical => self.technical,
            InterestCategory::Creative => self.creative,
            InterestCategory::Business => self.business,
            InterestCategory::Performance => self.performance,
            InterestCategory::Service => self.service,
        }
    }

    pub fn total(&self) -> u32 {
        InterestCategory::ALL.iter().map(|c| self.get(*c)).sum()
    }

    /// The `n` strongest categories, ties broken in category order.
    pub fn top(&self, n: usize) -> Vec<InterestCategory> {
        let mut categories = InterestCategory::ALL.to_vec();
        categories.sort_by(|a, b| self.get(*b).cmp(&self.get(*a)).then(a.cmp(b)));
        categories.truncate(n);
        categories
    }
}
