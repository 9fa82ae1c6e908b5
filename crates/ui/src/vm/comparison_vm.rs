use std::collections::HashMap;

use vocab_core::model::{Comparison, Flashcard, FlashcardId};

/// A flashcard with its current and newly generated media side by side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComparisonCardVm {
    pub comparison: Comparison,
    pub flashcard_id: FlashcardId,
    pub word: String,
    pub old_media_urls: Vec<String>,
    pub new_media_urls: Vec<String>,
    pub is_pending: bool,
}

/// Join comparisons onto the flashcard list by flashcard id.
///
/// Output follows the flashcard order. When a card has several
/// comparisons the last one listed wins; comparisons for cards the user no
/// longer has are dropped. A comparison without recorded old URLs falls back
/// to the card's current media.
#[must_use]
pub fn merge_comparisons(
    flashcards: &[Flashcard],
    comparisons: &[Comparison],
) -> Vec<ComparisonCardVm> {
    let latest: HashMap<&FlashcardId, &Comparison> = comparisons
        .iter()
        .map(|comparison| (&comparison.flashcard_id, comparison))
        .collect();

    flashcards
        .iter()
        .filter_map(|card| {
            let comparison = latest.get(&card.flashcard_id)?;
            let old_media_urls = if comparison.old_media_urls.is_empty() {
                card.media
                    .as_ref()
                    .map(|media| media.media_urls.clone())
                    .unwrap_or_default()
            } else {
                comparison.old_media_urls.clone()
            };
            Some(ComparisonCardVm {
                comparison: (*comparison).clone(),
                flashcard_id: card.flashcard_id.clone(),
                word: card.word.word.clone(),
                old_media_urls,
                new_media_urls: comparison.new_media_urls.clone(),
                is_pending: comparison.is_pending(),
            })
        })
        .collect()
}
