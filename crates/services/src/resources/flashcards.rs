use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};
use vocab_core::ApiResult;
use vocab_core::model::{Flashcard, FlashcardId, Meaning, MeaningId, Media, UserId};

use crate::api::{Ack, CheckFlagRequest, FlashcardsResponse, MemoRequest, paths};
use crate::http::ApiClient;
use crate::optimistic::optimistic;
use crate::store::{Reducer, Store};

pub const FLASHCARDS_LOAD_ERROR: &str = "Failed to load your flashcards. Please try again.";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlashcardsState {
    pub flashcards: Vec<Flashcard>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl FlashcardsState {
    #[must_use]
    pub fn find(&self, id: &FlashcardId) -> Option<&Flashcard> {
        self.flashcards.iter().find(|card| &card.flashcard_id == id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlashcardsAction {
    SetLoading(bool),
    SetError(Option<String>),
    SetFlashcards(Vec<Flashcard>),
    SetCheckFlag {
        flashcard_id: FlashcardId,
        check_flag: bool,
    },
    SetMemo {
        flashcard_id: FlashcardId,
        memo: String,
    },
    AddMeanings {
        flashcard_id: FlashcardId,
        meanings: Vec<Meaning>,
    },
    DeleteMeanings {
        flashcard_id: FlashcardId,
        meaning_ids: Vec<MeaningId>,
    },
    SetMedia {
        flashcard_id: FlashcardId,
        media: Media,
    },
    ResetState,
}

impl Reducer for FlashcardsState {
    type Action = FlashcardsAction;

    fn reduce(self, action: FlashcardsAction) -> Self {
        match action {
            FlashcardsAction::SetLoading(is_loading) => Self { is_loading, ..self },
            FlashcardsAction::SetError(error) => Self { error, ..self },
            FlashcardsAction::SetFlashcards(flashcards) => Self {
                flashcards,
                error: None,
                ..self
            },
            FlashcardsAction::SetCheckFlag {
                flashcard_id,
                check_flag,
            } => self.map_card(&flashcard_id, |card| card.with_check_flag(check_flag)),
            FlashcardsAction::SetMemo { flashcard_id, memo } => {
                self.map_card(&flashcard_id, |card| card.with_memo(memo.clone()))
            }
            FlashcardsAction::AddMeanings {
                flashcard_id,
                meanings,
            } => self.map_card(&flashcard_id, |card| card.with_added_meanings(&meanings)),
            FlashcardsAction::DeleteMeanings {
                flashcard_id,
                meaning_ids,
            } => self.map_card(&flashcard_id, |card| card.without_meanings(&meaning_ids)),
            FlashcardsAction::SetMedia {
                flashcard_id,
                media,
            } => self.map_card(&flashcard_id, |card| card.with_media(media.clone())),
            FlashcardsAction::ResetState => Self::default(),
        }
    }
}

impl FlashcardsState {
    // Builds a new list; untouched cards are carried over as-is.
    fn map_card(self, id: &FlashcardId, mut f: impl FnMut(&Flashcard) -> Flashcard) -> Self {
        let flashcards = self
            .flashcards
            .iter()
            .map(|card| {
                if &card.flashcard_id == id {
                    f(card)
                } else {
                    card.clone()
                }
            })
            .collect();
        Self { flashcards, ..self }
    }
}

/// The signed-in user's flashcard list and every local mutation of it.
#[derive(Clone)]
pub struct FlashcardsResource {
    client: Arc<ApiClient>,
    store: Arc<Store<FlashcardsState>>,
}

impl FlashcardsResource {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            store: Arc::new(Store::default()),
        }
    }

    #[must_use]
    pub fn state(&self) -> FlashcardsState {
        self.store.state()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FlashcardsState> {
        self.store.subscribe()
    }

    /// Replace the list with the user's flashcards.
    ///
    /// Failures store a fixed sentence, not the server's message.
    pub async fn load(&self, user_id: &UserId) {
        self.store.dispatch(FlashcardsAction::SetLoading(true));
        self.store.dispatch(FlashcardsAction::SetError(None));
        let _release = self
            .store
            .dispatch_on_drop(FlashcardsAction::SetLoading(false));

        match self
            .client
            .get::<FlashcardsResponse>(&paths::flashcards(user_id), None)
            .await
        {
            Ok(response) => {
                debug!(count = response.flashcards.len(), "loaded flashcards");
                self.store
                    .dispatch(FlashcardsAction::SetFlashcards(response.flashcards));
            }
            Err(err) => {
                warn!(user_id = %user_id, kind = %err.kind(), "failed to load flashcards");
                self.store
                    .dispatch(FlashcardsAction::SetError(Some(FLASHCARDS_LOAD_ERROR.into())));
            }
        }
    }

    /// Flip a card's check flag right away, then persist it.
    ///
    /// On failure the card goes back to the value it had before this call
    /// and nothing is surfaced to the user.
    pub async fn update_check_flag(&self, flashcard_id: &FlashcardId, check_flag: bool) {
        let Some(previous) = self.store.read(|s| s.find(flashcard_id).map(|c| c.check_flag)) else {
            warn!(flashcard_id = %flashcard_id, "check flag update for unknown flashcard");
            return;
        };

        let body = CheckFlagRequest {
            flashcard_id: flashcard_id.clone(),
            check_flag,
        };
        let result = optimistic(
            &*self.store,
            FlashcardsAction::SetCheckFlag {
                flashcard_id: flashcard_id.clone(),
                check_flag,
            },
            FlashcardsAction::SetCheckFlag {
                flashcard_id: flashcard_id.clone(),
                check_flag: previous,
            },
            self.client
                .put::<_, Ack>(paths::FLASHCARD_CHECK_FLAG, &body, None),
        )
        .await;

        if let Err(err) = result {
            warn!(
                flashcard_id = %flashcard_id,
                kind = %err.kind(),
                restored = previous,
                "check flag update rolled back"
            );
        }
    }

    /// Persist a memo; local state changes only once the backend accepts it.
    ///
    /// # Errors
    ///
    /// Returns the classified `AppError`; local state is left untouched.
    pub async fn update_memo(&self, flashcard_id: &FlashcardId, memo: &str) -> ApiResult<()> {
        let body = MemoRequest {
            flashcard_id: flashcard_id.clone(),
            memo: memo.to_string(),
        };
        self.client
            .put::<_, Ack>(paths::FLASHCARD_MEMO, &body, None)
            .await?;
        self.store.dispatch(FlashcardsAction::SetMemo {
            flashcard_id: flashcard_id.clone(),
            memo: memo.to_string(),
        });
        Ok(())
    }

    /// Append meanings to a card locally. Persisting them is the caller's job.
    pub fn add_meanings(&self, flashcard_id: &FlashcardId, meanings: Vec<Meaning>) {
        self.store.dispatch(FlashcardsAction::AddMeanings {
            flashcard_id: flashcard_id.clone(),
            meanings,
        });
    }

    /// Remove meanings from a card locally. Persisting the removal is the caller's job.
    pub fn delete_meanings(&self, flashcard_id: &FlashcardId, meaning_ids: Vec<MeaningId>) {
        self.store.dispatch(FlashcardsAction::DeleteMeanings {
            flashcard_id: flashcard_id.clone(),
            meaning_ids,
        });
    }

    /// Swap in a card's media after a comparison kept the new variant.
    pub fn replace_media(&self, flashcard_id: &FlashcardId, media: Media) {
        self.store.dispatch(FlashcardsAction::SetMedia {
            flashcard_id: flashcard_id.clone(),
            media,
        });
    }

    pub fn reset_state(&self) {
        self.store.dispatch(FlashcardsAction::ResetState);
    }
}

#[cfg(test)]
mod tests {
    use vocab_core::model::{Word, WordId};

    use super::*;

    fn card(id: &str, check_flag: bool) -> Flashcard {
        Flashcard {
            flashcard_id: FlashcardId::new(id),
            word: Word {
                word_id: WordId::new(format!("w-{id}")),
                word: id.to_string(),
                core_meaning: None,
                explanation: None,
            },
            meanings: Vec::new(),
            media: None,
            memo: String::new(),
            check_flag,
        }
    }

    #[test]
    fn set_flashcards_clears_error() {
        let state = FlashcardsState::default()
            .reduce(FlashcardsAction::SetError(Some("x".into())))
            .reduce(FlashcardsAction::SetFlashcards(vec![card("a", false)]));
        assert!(state.error.is_none());
        assert_eq!(state.flashcards.len(), 1);
    }

    #[test]
    fn check_flag_only_touches_target_card() {
        let state = FlashcardsState::default()
            .reduce(FlashcardsAction::SetFlashcards(vec![
                card("a", false),
                card("b", true),
            ]))
            .reduce(FlashcardsAction::SetCheckFlag {
                flashcard_id: FlashcardId::new("a"),
                check_flag: true,
            });
        assert!(state.find(&FlashcardId::new("a")).unwrap().check_flag);
        assert!(state.find(&FlashcardId::new("b")).unwrap().check_flag);
    }

    #[test]
    fn unknown_card_leaves_list_alone() {
        let before = FlashcardsState::default()
            .reduce(FlashcardsAction::SetFlashcards(vec![card("a", false)]));
        let after = before.clone().reduce(FlashcardsAction::SetMemo {
            flashcard_id: FlashcardId::new("zzz"),
            memo: "note".into(),
        });
        assert_eq!(before, after);
    }

    #[test]
    fn reset_returns_initial_state() {
        let state = FlashcardsState::default()
            .reduce(FlashcardsAction::SetLoading(true))
            .reduce(FlashcardsAction::SetFlashcards(vec![card("a", false)]))
            .reduce(FlashcardsAction::ResetState);
        assert_eq!(state, FlashcardsState::default());
        assert_eq!(
            state.clone().reduce(FlashcardsAction::ResetState),
            FlashcardsState::default()
        );
    }
}
