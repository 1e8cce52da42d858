//! Motivational nudge shape.

use serde::{Deserialize, Serialize};

/// A nudge set always holds exactly this many nudges.
pub const NUDGES: usize = 3;

/// Texts beyond this length are reported but not rejected.
pub const NUDGE_TEXT_SOFT_LIMIT: usize = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NudgeType {
    Tip,
    Recommendation,
    Challenge,
}

impl NudgeType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "tip" => Some(NudgeType::Tip),
            "recommendation" => Some(NudgeType::Recommendation),
            "challenge" => Some(NudgeType::Challenge),
            _ => None,
        }
    }

    pub fn default_icon(&self) -> NudgeIcon {
        match self {
            NudgeType::Challenge => NudgeIcon::Rocket,
            _ => NudgeIcon::Bulb,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NudgeIcon {
    Bulb,
    Rocket,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nudge {
    #[serde(rename = "type")]
    pub kind: NudgeType,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_text: Option<String>,
    pub icon: NudgeIcon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NudgeSet(pub Vec<Nudge>);
