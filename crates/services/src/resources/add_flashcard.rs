use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};
use vocab_core::model::{Flashcard, FlashcardId, UserId};
use vocab_core::{ApiResult, ErrorKind};

use crate::api::{
    Ack, AttachFlashcardRequest, CreateFlashcardRequest, CreateFlashcardResponse,
    WordLookupResponse, paths,
};
use crate::error::AddFlashcardError;
use crate::http::ApiClient;
use crate::store::{Reducer, Store};

/// Pause between showing the spinner and the first request.
pub const DEFAULT_PAINT_DELAY: Duration = Duration::from_millis(100);

/// Where the add-word saga currently is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AddFlashcardPhase {
    #[default]
    Idle,
    LookingUp,
    Creating,
    Attaching,
    Succeeded,
    Failed,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddFlashcardState {
    pub phase: AddFlashcardPhase,
    pub added: Option<FlashcardId>,
    pub is_loading: bool,
    pub is_success: bool,
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AddFlashcardAction {
    SetLoading(bool),
    SetPhase(AddFlashcardPhase),
    SetError(Option<String>),
    SetAdded(FlashcardId),
    ResetState,
}

impl Reducer for AddFlashcardState {
    type Action = AddFlashcardAction;

    fn reduce(self, action: AddFlashcardAction) -> Self {
        match action {
            AddFlashcardAction::SetLoading(is_loading) => Self { is_loading, ..self },
            AddFlashcardAction::SetPhase(phase) => Self { phase, ..self },
            AddFlashcardAction::SetError(error) => {
                let phase = if error.is_some() {
                    AddFlashcardPhase::Failed
                } else {
                    self.phase
                };
                Self {
                    error,
                    phase,
                    is_success: false,
                    ..self
                }
            }
            AddFlashcardAction::SetAdded(id) => Self {
                added: Some(id),
                phase: AddFlashcardPhase::Succeeded,
                is_success: true,
                error: None,
                ..self
            },
            AddFlashcardAction::ResetState => Self::default(),
        }
    }
}

/// Adds a word to the user's flashcards, reusing an existing card for the
/// word when the backend already has one.
#[derive(Clone)]
pub struct AddFlashcardResource {
    client: Arc<ApiClient>,
    store: Arc<Store<AddFlashcardState>>,
    paint_delay: Duration,
}

impl AddFlashcardResource {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            store: Arc::new(Store::default()),
            paint_delay: DEFAULT_PAINT_DELAY,
        }
    }

    #[must_use]
    pub fn with_paint_delay(mut self, paint_delay: Duration) -> Self {
        self.paint_delay = paint_delay;
        self
    }

    #[must_use]
    pub fn state(&self) -> AddFlashcardState {
        self.store.state()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AddFlashcardState> {
        self.store.subscribe()
    }

    /// Check `word` against the list the user already has. No I/O.
    ///
    /// # Errors
    ///
    /// `EmptyWord` for blank input, `Duplicate` when a card for the word
    /// exists (case-insensitive).
    pub fn validate(word: &str, existing: &[Flashcard]) -> Result<String, AddFlashcardError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(AddFlashcardError::EmptyWord);
        }
        if existing.iter().any(|card| card.is_for_word(word)) {
            return Err(AddFlashcardError::Duplicate(word.to_string()));
        }
        Ok(word.to_string())
    }

    /// Run the whole saga: validate, resolve a flashcard id, attach it to
    /// the user. The loading flag is raised only after validation passes
    /// and is always lowered again before this returns.
    ///
    /// # Errors
    ///
    /// Validation errors are returned before any request is made; otherwise
    /// the first failing request's `AppError`.
    pub async fn add(
        &self,
        user_id: &UserId,
        word: &str,
        existing: &[Flashcard],
    ) -> Result<FlashcardId, AddFlashcardError> {
        let word = match Self::validate(word, existing) {
            Ok(word) => word,
            Err(err) => {
                debug!(%err, "rejected new flashcard");
                self.store
                    .dispatch(AddFlashcardAction::SetError(Some(err.user_message())));
                return Err(err);
            }
        };

        self.store.dispatch(AddFlashcardAction::SetError(None));
        self.store.dispatch(AddFlashcardAction::SetLoading(true));
        let _release = self
            .store
            .dispatch_on_drop(AddFlashcardAction::SetLoading(false));
        tokio::time::sleep(self.paint_delay).await;

        match self.resolve_and_attach(user_id, &word).await {
            Ok(flashcard_id) => {
                info!(%word, %flashcard_id, "flashcard added");
                self.store
                    .dispatch(AddFlashcardAction::SetAdded(flashcard_id.clone()));
                Ok(flashcard_id)
            }
            Err(err) => {
                warn!(%word, kind = %err.kind(), "failed to add flashcard");
                self.store
                    .dispatch(AddFlashcardAction::SetError(Some(err.user_message())));
                Err(err.into())
            }
        }
    }

    async fn resolve_and_attach(&self, user_id: &UserId, word: &str) -> ApiResult<FlashcardId> {
        self.store
            .dispatch(AddFlashcardAction::SetPhase(AddFlashcardPhase::LookingUp));
        let flashcard_id = match self
            .client
            .get::<WordLookupResponse>(&paths::word(word), None)
            .await
        {
            Ok(found) => {
                debug!(%word, flashcard_id = %found.flashcard_id, "reusing existing flashcard");
                found.flashcard_id
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                self.store
                    .dispatch(AddFlashcardAction::SetPhase(AddFlashcardPhase::Creating));
                let created: CreateFlashcardResponse = self
                    .client
                    .post(
                        paths::FLASHCARD_CREATE,
                        &CreateFlashcardRequest {
                            word: word.to_string(),
                        },
                        None,
                    )
                    .await?;
                created.flashcard_id
            }
            Err(err) => return Err(err),
        };

        self.store
            .dispatch(AddFlashcardAction::SetPhase(AddFlashcardPhase::Attaching));
        self.client
            .put::<_, Ack>(
                paths::USER_ADD_FLASHCARD,
                &AttachFlashcardRequest {
                    user_id: user_id.clone(),
                    flashcard_id: flashcard_id.clone(),
                },
                None,
            )
            .await?;
        Ok(flashcard_id)
    }

    pub fn reset_state(&self) {
        self.store.dispatch(AddFlashcardAction::ResetState);
    }
}
