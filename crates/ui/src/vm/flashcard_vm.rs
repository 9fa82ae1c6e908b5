use vocab_core::model::{Flashcard, FlashcardId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeaningRowVm {
    pub pos: String,
    pub translation: String,
    pub pronunciation: Option<String>,
    pub example_eng: String,
    pub example_jpn: String,
}

/// Display-ready projection of one flashcard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlashcardVm {
    pub flashcard_id: FlashcardId,
    pub word: String,
    pub core_meaning: Option<String>,
    pub explanation: Option<String>,
    pub meanings: Vec<MeaningRowVm>,
    pub image_url: Option<String>,
    pub memo: String,
    pub check_flag: bool,
}

impl FlashcardVm {
    #[must_use]
    pub fn has_examples(&self) -> bool {
        self.meanings
            .iter()
            .any(|m| !m.example_eng.is_empty() || !m.example_jpn.is_empty())
    }
}

#[must_use]
pub fn map_flashcard(card: &Flashcard) -> FlashcardVm {
    FlashcardVm {
        flashcard_id: card.flashcard_id.clone(),
        word: card.word.word.clone(),
        core_meaning: non_blank(card.word.core_meaning.as_deref()),
        explanation: non_blank(card.word.explanation.as_deref()),
        meanings: card
            .meanings
            .iter()
            .map(|meaning| MeaningRowVm {
                pos: meaning.pos.clone(),
                translation: meaning.translation.clone(),
                pronunciation: non_blank(meaning.pronunciation.as_deref()),
                example_eng: meaning.example_eng.clone(),
                example_jpn: meaning.example_jpn.clone(),
            })
            .collect(),
        image_url: card
            .media
            .as_ref()
            .and_then(|media| media.primary_url())
            .map(str::to_string),
        memo: card.memo.clone(),
        check_flag: card.check_flag,
    }
}

#[must_use]
pub fn map_flashcards(cards: &[Flashcard]) -> Vec<FlashcardVm> {
    cards.iter().map(map_flashcard).collect()
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_media_and_drops_blank_text() {
        let card: Flashcard = serde_json::from_value(serde_json::json!({
            "flashcardId": "f1",
            "word": { "wordId": "w1", "word": "run", "coreMeaning": "  ", "explanation": "to move fast" },
            "meanings": [{ "meaningId": "m1", "pos": "verb", "translation": "hashiru", "exampleEng": "I run." }],
            "media": { "mediaId": "md1", "mediaUrls": ["https://cdn/run.png", "https://cdn/run2.png"] },
            "checkFlag": true
        }))
        .unwrap();

        let vm = map_flashcard(&card);

        assert_eq!(vm.core_meaning, None);
        assert_eq!(vm.explanation.as_deref(), Some("to move fast"));
        assert_eq!(vm.image_url.as_deref(), Some("https://cdn/run.png"));
        assert!(vm.has_examples());
        assert!(vm.check_flag);
    }
}
