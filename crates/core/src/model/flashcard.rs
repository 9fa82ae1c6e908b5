use serde::{Deserialize, Serialize};

use crate::model::ids::{FlashcardId, MeaningId, WordId};
use crate::model::media::Media;

//
// ─── WORD & MEANING ────────────────────────────────────────────────────────────
//

/// Dictionary entry a flashcard is built around.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub word_id: WordId,
    pub word: String,
    #[serde(default)]
    pub core_meaning: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// One sense of a word together with its example sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    pub meaning_id: MeaningId,
    #[serde(default)]
    pub pos: String,
    pub translation: String,
    #[serde(default)]
    pub pronunciation: Option<String>,
    #[serde(default)]
    pub example_eng: String,
    #[serde(default)]
    pub example_jpn: String,
    #[serde(default)]
    pub rank: Option<u32>,
}

//
// ─── FLASHCARD ─────────────────────────────────────────────────────────────────
//

/// The core learning unit.
///
/// `meanings` is kept in display order. Local edits go through the
/// `with_*` methods, which return a new value and leave `self` untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub flashcard_id: FlashcardId,
    pub word: Word,
    #[serde(default)]
    pub meanings: Vec<Meaning>,
    #[serde(default)]
    pub media: Option<Media>,
    #[serde(default)]
    pub memo: String,
    #[serde(default)]
    pub check_flag: bool,
}

impl Flashcard {
    #[must_use]
    pub fn with_check_flag(&self, check_flag: bool) -> Self {
        Self {
            check_flag,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_memo(&self, memo: impl Into<String>) -> Self {
        Self {
            memo: memo.into(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_media(&self, media: Media) -> Self {
        Self {
            media: Some(media),
            ..self.clone()
        }
    }

    /// Append meanings not already present, keeping existing order.
    #[must_use]
    pub fn with_added_meanings(&self, added: &[Meaning]) -> Self {
        let mut meanings = self.meanings.clone();
        for meaning in added {
            if !meanings.iter().any(|m| m.meaning_id == meaning.meaning_id) {
                meanings.push(meaning.clone());
            }
        }
        Self {
            meanings,
            ..self.clone()
        }
    }

    /// Drop meanings whose id is listed, keeping the relative order of the rest.
    #[must_use]
    pub fn without_meanings(&self, removed: &[MeaningId]) -> Self {
        let meanings = self
            .meanings
            .iter()
            .filter(|m| !removed.contains(&m.meaning_id))
            .cloned()
            .collect();
        Self {
            meanings,
            ..self.clone()
        }
    }

    /// Whether this card is for `word`, ignoring case and surrounding space.
    #[must_use]
    pub fn is_for_word(&self, word: &str) -> bool {
        self.word.word.trim().to_lowercase() == word.trim().to_lowercase()
    }

    #[must_use]
    pub fn meaning_ids(&self) -> Vec<MeaningId> {
        self.meanings.iter().map(|m| m.meaning_id.clone()).collect()
    }
}
