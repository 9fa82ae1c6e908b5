use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::api::{MediaCreateRequest, MediaCreateResponse, paths};
use crate::http::{ApiClient, RequestConfig};
use crate::store::{Reducer, Store};

pub const MEDIA_CREATE_ERROR: &str = "Failed to generate media. Please try again.";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MediaState {
    pub created: Option<MediaCreateResponse>,
    pub is_creating: bool,
    pub is_success: bool,
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MediaAction {
    SetCreating(bool),
    SetError(Option<String>),
    SetCreatedMedia(MediaCreateResponse),
    ResetState,
}

impl Reducer for MediaState {
    type Action = MediaAction;

    fn reduce(self, action: MediaAction) -> Self {
        match action {
            MediaAction::SetCreating(is_creating) => Self {
                is_creating,
                ..self
            },
            MediaAction::SetError(error) => Self {
                error,
                is_success: false,
                ..self
            },
            MediaAction::SetCreatedMedia(created) => Self {
                created: Some(created),
                is_success: true,
                error: None,
                ..self
            },
            MediaAction::ResetState => Self::default(),
        }
    }
}

/// Media generation for one example sentence.
#[derive(Clone)]
pub struct MediaResource {
    client: Arc<ApiClient>,
    store: Arc<Store<MediaState>>,
    config: RequestConfig,
}

impl MediaResource {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self::with_config(client, RequestConfig::media())
    }

    /// Use a custom timeout/retry policy instead of the media default.
    #[must_use]
    pub fn with_config(client: Arc<ApiClient>, config: RequestConfig) -> Self {
        Self {
            client,
            store: Arc::new(Store::default()),
            config,
        }
    }

    #[must_use]
    pub fn state(&self) -> MediaState {
        self.store.state()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<MediaState> {
        self.store.subscribe()
    }

    /// Generate a new media variant. `is_creating` is false again once this
    /// returns, whatever the outcome, and also if the call is abandoned.
    pub async fn create(&self, request: &MediaCreateRequest) -> Option<MediaCreateResponse> {
        self.store.dispatch(MediaAction::SetCreating(true));
        let _release = self.store.dispatch_on_drop(MediaAction::SetCreating(false));

        match self
            .client
            .post::<_, MediaCreateResponse>(paths::MEDIA_CREATE, request, Some(&self.config))
            .await
        {
            Ok(created) => {
                info!(
                    flashcard_id = %request.flashcard_id,
                    comparison_id = %created.comparison_id,
                    "media generated"
                );
                self.store
                    .dispatch(MediaAction::SetCreatedMedia(created.clone()));
                Some(created)
            }
            Err(err) => {
                warn!(flashcard_id = %request.flashcard_id, kind = %err.kind(), "media generation failed");
                self.store
                    .dispatch(MediaAction::SetError(Some(MEDIA_CREATE_ERROR.into())));
                None
            }
        }
    }

    pub fn reset_state(&self) {
        self.store.dispatch(MediaAction::ResetState);
    }
}
