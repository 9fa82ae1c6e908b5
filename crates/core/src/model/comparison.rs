use serde::{Deserialize, Serialize};

use crate::model::ids::{ComparisonId, FlashcardId, MediaId};

/// A pending choice between a flashcard's current media and a newly
/// generated variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub comparison_id: ComparisonId,
    pub flashcard_id: FlashcardId,
    #[serde(default)]
    pub old_media_id: Option<MediaId>,
    pub new_media_id: MediaId,
    #[serde(default)]
    pub old_media_urls: Vec<String>,
    #[serde(default)]
    pub new_media_urls: Vec<String>,
    #[serde(default)]
    pub is_selected_new: Option<bool>,
}

impl Comparison {
    /// Whether the user has not picked a variant yet.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.is_selected_new.is_none()
    }
}
