//! Wire schemas for every backend route the app consumes.
//!
//! Field names follow the backend's camelCase JSON. Response fields the
//! backend may omit carry `#[serde(default)]` so a missing list decodes as
//! empty rather than failing the call.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;
use vocab_core::model::{
    Comparison, ComparisonId, Flashcard, FlashcardId, GenerationType, Meaning, MeaningId, MediaId,
    Template, TemplateId, UserId, Word, WordId,
};

/// Acknowledgement body; accepts anything, including an empty body.
pub type Ack = serde::de::IgnoredAny;

pub mod paths {
    use super::{UserId, WordId, encode_segment};

    pub const FLASHCARD_CHECK_FLAG: &str = "/flashcard/update/checkFlag";
    pub const FLASHCARD_MEMO: &str = "/flashcard/update/memo";
    pub const FLASHCARD_USING_MEANINGS: &str = "/flashcard/update/usingMeaningIdList";
    pub const FLASHCARD_CREATE: &str = "/flashcard/create";
    pub const USER_ADD_FLASHCARD: &str = "/user/add/usingFlashcard";
    pub const MEDIA_CREATE: &str = "/media/create";
    pub const COMPARISON_UPDATE: &str = "/comparison/update";
    pub const TEMPLATES: &str = "/template";
    pub const USER_SETUP: &str = "/user/setup";
    pub const USER_UPDATE: &str = "/user/update";

    #[must_use]
    pub fn flashcards(user_id: &UserId) -> String {
        format!("/flashcard/{}", encode_segment(user_id.as_str()))
    }

    #[must_use]
    pub fn comparisons(user_id: &UserId) -> String {
        format!("/comparison/{}", encode_segment(user_id.as_str()))
    }

    #[must_use]
    pub fn meanings(word_id: &WordId) -> String {
        format!("/meaning/{}", encode_segment(word_id.as_str()))
    }

    #[must_use]
    pub fn word(word: &str) -> String {
        format!("/word/{}", encode_segment(word))
    }
}

/// Percent-encode one path segment.
#[must_use]
pub fn encode_segment(segment: &str) -> String {
    // form encoding turns spaces into '+' and escapes a literal '+' as %2B,
    // so swapping '+' back out yields path encoding.
    form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

//
// ─── FLASHCARDS ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlashcardsResponse {
    #[serde(default)]
    pub flashcards: Vec<Flashcard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckFlagRequest {
    pub flashcard_id: FlashcardId,
    pub check_flag: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoRequest {
    pub flashcard_id: FlashcardId,
    pub memo: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsingMeaningsRequest {
    pub flashcard_id: FlashcardId,
    pub using_meaning_id_list: Vec<MeaningId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateFlashcardRequest {
    pub word: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFlashcardResponse {
    pub flashcard_id: FlashcardId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachFlashcardRequest {
    pub user_id: UserId,
    pub flashcard_id: FlashcardId,
}

/// Result of `GET /word/{word}` when the word already has a flashcard.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordLookupResponse {
    pub flashcard_id: FlashcardId,
    #[serde(default)]
    pub word: Option<Word>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeaningsResponse {
    #[serde(default)]
    pub meanings: Vec<Meaning>,
}

//
// ─── MEDIA & COMPARISONS ───────────────────────────────────────────────────────
//

/// Everything the generator needs to produce a new artifact for one meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaCreateRequest {
    pub flashcard_id: FlashcardId,
    pub old_media_id: Option<MediaId>,
    pub meaning_id: MeaningId,
    pub pos: String,
    pub word: String,
    pub translation: String,
    pub example_jpn: String,
    pub explanation: String,
    pub core_meaning: String,
    pub generation_type: GenerationType,
    pub template_id: Option<TemplateId>,
    pub user_prompt: String,
    pub other_settings: Vec<String>,
    pub allow_generating_person: bool,
    pub input_media_urls: Vec<String>,
}

impl MediaCreateRequest {
    /// Request prefilled from a card and one of its meanings.
    #[must_use]
    pub fn for_meaning(card: &Flashcard, meaning: &Meaning) -> Self {
        Self {
            flashcard_id: card.flashcard_id.clone(),
            old_media_id: card.media.as_ref().map(|media| media.media_id.clone()),
            meaning_id: meaning.meaning_id.clone(),
            pos: meaning.pos.clone(),
            word: card.word.word.clone(),
            translation: meaning.translation.clone(),
            example_jpn: meaning.example_jpn.clone(),
            explanation: card.word.explanation.clone().unwrap_or_default(),
            core_meaning: card.word.core_meaning.clone().unwrap_or_default(),
            generation_type: GenerationType::default(),
            template_id: None,
            user_prompt: String::new(),
            other_settings: Vec::new(),
            allow_generating_person: false,
            input_media_urls: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaCreateResponse {
    pub comparison_id: ComparisonId,
    pub new_media_id: MediaId,
    #[serde(default)]
    pub new_media_urls: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComparisonsResponse {
    #[serde(default)]
    pub comparisons: Vec<Comparison>,
}

/// The user's pick between the old and the new media variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonUpdateRequest {
    pub flashcard_id: FlashcardId,
    pub comparison_id: ComparisonId,
    pub old_media_id: Option<MediaId>,
    pub new_media_id: MediaId,
    pub is_selected_new: bool,
}

impl ComparisonUpdateRequest {
    #[must_use]
    pub fn select(comparison: &Comparison, is_selected_new: bool) -> Self {
        Self {
            flashcard_id: comparison.flashcard_id.clone(),
            comparison_id: comparison.comparison_id.clone(),
            old_media_id: comparison.old_media_id.clone(),
            new_media_id: comparison.new_media_id.clone(),
            is_selected_new,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplatesResponse {
    #[serde(default)]
    pub templates: Vec<Template>,
}

//
// ─── USERS ─────────────────────────────────────────────────────────────────────
//

/// Body of both `/user/setup` and `/user/update`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
}
