use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};
use vocab_core::ApiResult;
use vocab_core::model::{Flashcard, Meaning, MeaningId, WordId};

use crate::api::{Ack, MeaningsResponse, UsingMeaningsRequest, paths};
use crate::http::ApiClient;
use crate::resources::flashcards::FlashcardsResource;
use crate::store::{Reducer, Store};

pub const MEANINGS_LOAD_ERROR: &str = "Failed to load meanings. Please try again.";
pub const MEANINGS_SAVE_ERROR: &str = "Failed to update meanings. Please try again.";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MeaningsState {
    pub word_id: Option<WordId>,
    pub meanings: Vec<Meaning>,
    pub is_loading: bool,
    pub is_success: bool,
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MeaningsAction {
    SetLoading(bool),
    SetError(Option<String>),
    SetMeanings { word_id: WordId, meanings: Vec<Meaning> },
    SetSaved,
    ResetState,
}

impl Reducer for MeaningsState {
    type Action = MeaningsAction;

    fn reduce(self, action: MeaningsAction) -> Self {
        match action {
            MeaningsAction::SetLoading(is_loading) => Self { is_loading, ..self },
            MeaningsAction::SetError(error) => Self {
                error,
                is_success: false,
                ..self
            },
            MeaningsAction::SetMeanings { word_id, meanings } => Self {
                word_id: Some(word_id),
                meanings,
                error: None,
                ..self
            },
            MeaningsAction::SetSaved => Self {
                is_success: true,
                error: None,
                ..self
            },
            MeaningsAction::ResetState => Self::default(),
        }
    }
}

/// Which of a word's meanings a card shows.
///
/// Saving writes the chosen id list to the backend and then mirrors the
/// change into the shared flashcard list.
#[derive(Clone)]
pub struct MeaningsResource {
    client: Arc<ApiClient>,
    flashcards: FlashcardsResource,
    store: Arc<Store<MeaningsState>>,
}

impl MeaningsResource {
    #[must_use]
    pub fn new(client: Arc<ApiClient>, flashcards: FlashcardsResource) -> Self {
        Self {
            client,
            flashcards,
            store: Arc::new(Store::default()),
        }
    }

    #[must_use]
    pub fn state(&self) -> MeaningsState {
        self.store.state()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<MeaningsState> {
        self.store.subscribe()
    }

    /// Every meaning the dictionary knows for `word_id`.
    pub async fn load(&self, word_id: &WordId) {
        self.store.dispatch(MeaningsAction::SetLoading(true));
        let _release = self.store.dispatch_on_drop(MeaningsAction::SetLoading(false));
        match self
            .client
            .get::<MeaningsResponse>(&paths::meanings(word_id), None)
            .await
        {
            Ok(response) => self.store.dispatch(MeaningsAction::SetMeanings {
                word_id: word_id.clone(),
                meanings: response.meanings,
            }),
            Err(err) => {
                warn!(%word_id, kind = %err.kind(), "failed to load meanings");
                self.store
                    .dispatch(MeaningsAction::SetError(Some(MEANINGS_LOAD_ERROR.into())));
            }
        }
    }

    /// Make `selected` the card's meaning list.
    ///
    /// Meanings to add are taken from the loaded list; ids it does not
    /// contain are still sent but cannot be shown until the next reload.
    ///
    /// # Errors
    ///
    /// Returns the classified `AppError`; the flashcard list is untouched.
    pub async fn save_using_meanings(
        &self,
        card: &Flashcard,
        selected: &[MeaningId],
    ) -> ApiResult<()> {
        let current = card.meaning_ids();
        let removed: Vec<MeaningId> = current
            .iter()
            .filter(|id| !selected.contains(id))
            .cloned()
            .collect();
        let added: Vec<Meaning> = self.store.read(|state| {
            state
                .meanings
                .iter()
                .filter(|m| selected.contains(&m.meaning_id) && !current.contains(&m.meaning_id))
                .cloned()
                .collect()
        });

        self.store.dispatch(MeaningsAction::SetLoading(true));
        let _release = self.store.dispatch_on_drop(MeaningsAction::SetLoading(false));

        let body = UsingMeaningsRequest {
            flashcard_id: card.flashcard_id.clone(),
            using_meaning_id_list: selected.to_vec(),
        };
        if let Err(err) = self
            .client
            .put::<_, Ack>(paths::FLASHCARD_USING_MEANINGS, &body, None)
            .await
        {
            warn!(flashcard_id = %card.flashcard_id, kind = %err.kind(), "failed to save meanings");
            self.store
                .dispatch(MeaningsAction::SetError(Some(MEANINGS_SAVE_ERROR.into())));
            return Err(err);
        }

        debug!(
            flashcard_id = %card.flashcard_id,
            added = added.len(),
            removed = removed.len(),
            "meanings saved"
        );
        if !added.is_empty() {
            self.flashcards.add_meanings(&card.flashcard_id, added);
        }
        if !removed.is_empty() {
            self.flashcards.delete_meanings(&card.flashcard_id, removed);
        }
        self.store.dispatch(MeaningsAction::SetSaved);
        Ok(())
    }

    pub fn reset_state(&self) {
        self.store.dispatch(MeaningsAction::ResetState);
    }
}
