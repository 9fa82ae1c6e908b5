use std::sync::Arc;

use tokio::sync::watch;
use tracing::warn;
use vocab_core::ApiResult;
use vocab_core::model::{Comparison, UserId};

use crate::api::{Ack, ComparisonUpdateRequest, ComparisonsResponse, paths};
use crate::http::ApiClient;
use crate::store::{Reducer, Store};

pub const COMPARISON_UPDATE_ERROR: &str = "Failed to save your choice. Please try again.";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComparisonState {
    pub update_result: Option<ComparisonUpdateRequest>,
    pub is_loading: bool,
    pub is_success: bool,
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ComparisonAction {
    SetLoading(bool),
    SetError(Option<String>),
    SetUpdateResult(ComparisonUpdateRequest),
    ResetState,
}

impl Reducer for ComparisonState {
    type Action = ComparisonAction;

    fn reduce(self, action: ComparisonAction) -> Self {
        match action {
            ComparisonAction::SetLoading(is_loading) => Self { is_loading, ..self },
            ComparisonAction::SetError(error) => Self {
                error,
                is_success: false,
                ..self
            },
            ComparisonAction::SetUpdateResult(update) => Self {
                update_result: Some(update),
                is_success: true,
                error: None,
                ..self
            },
            ComparisonAction::ResetState => Self::default(),
        }
    }
}

/// Old-vs-new media comparisons.
///
/// Unlike the other resources, [`ComparisonResource::get_comparisons`]
/// hands failures back to the caller so it can tell "nothing yet" from
/// "could not load".
#[derive(Clone)]
pub struct ComparisonResource {
    client: Arc<ApiClient>,
    store: Arc<Store<ComparisonState>>,
}

impl ComparisonResource {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            store: Arc::new(Store::default()),
        }
    }

    #[must_use]
    pub fn state(&self) -> ComparisonState {
        self.store.state()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ComparisonState> {
        self.store.subscribe()
    }

    /// Record which variant the user kept. Returns whether it was saved.
    pub async fn update(&self, request: &ComparisonUpdateRequest) -> bool {
        self.store.dispatch(ComparisonAction::SetLoading(true));
        let _release = self.store.dispatch_on_drop(ComparisonAction::SetLoading(false));
        match self
            .client
            .put::<_, Ack>(paths::COMPARISON_UPDATE, request, None)
            .await
        {
            Ok(_) => {
                self.store
                    .dispatch(ComparisonAction::SetUpdateResult(request.clone()));
                true
            }
            Err(err) => {
                warn!(comparison_id = %request.comparison_id, kind = %err.kind(), "comparison update failed");
                self.store.dispatch(ComparisonAction::SetError(Some(
                    COMPARISON_UPDATE_ERROR.into(),
                )));
                false
            }
        }
    }

    /// Persisted comparisons for the user.
    ///
    /// # Errors
    ///
    /// Returns the classified `AppError`; resource state is not touched.
    pub async fn get_comparisons(&self, user_id: &UserId) -> ApiResult<Vec<Comparison>> {
        let response = self
            .client
            .get::<ComparisonsResponse>(&paths::comparisons(user_id), None)
            .await?;
        Ok(response.comparisons)
    }

    pub fn reset_state(&self) {
        self.store.dispatch(ComparisonAction::ResetState);
    }
}
