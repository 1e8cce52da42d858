//! Flashcard set shape.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: u32,
    #[serde(rename = "frontHTML")]
    pub front_html: String,
    #[serde(rename = "backHTML")]
    pub back_html: String,
}

/// Cards ordered by increasing difficulty; serialized as a bare array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlashcardSet(pub Vec<Flashcard>);

impl FlashcardSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
