use serde::{Deserialize, Serialize};

use crate::model::ids::{MeaningId, MediaId};

/// Generated artifact attached to a flashcard's example sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub media_id: MediaId,
    #[serde(default)]
    pub meaning_id: Option<MeaningId>,
    #[serde(default)]
    pub media_urls: Vec<String>,
}

impl Media {
    /// The first URL, used as the card's thumbnail.
    #[must_use]
    pub fn primary_url(&self) -> Option<&str> {
        self.media_urls.first().map(String::as_str)
    }
}

/// What kind of artifact to generate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GenerationType {
    #[default]
    TextToImage,
    ImageToImage,
    TextToVideo,
    ImageToVideo,
}

impl GenerationType {
    #[must_use]
    pub const fn needs_input_media(self) -> bool {
        matches!(self, Self::ImageToImage | Self::ImageToVideo)
    }
}
