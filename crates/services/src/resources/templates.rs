use std::sync::Arc;

use tokio::sync::watch;
use tracing::warn;
use vocab_core::model::Template;

use crate::api::{TemplatesResponse, paths};
use crate::http::ApiClient;
use crate::store::{Reducer, Store};

pub const TEMPLATES_LOAD_ERROR: &str = "Failed to load templates. Please try again.";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TemplatesState {
    pub templates: Vec<Template>,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TemplatesAction {
    SetLoading(bool),
    SetError(Option<String>),
    SetTemplates(Vec<Template>),
    ResetState,
}

impl Reducer for TemplatesState {
    type Action = TemplatesAction;

    fn reduce(self, action: TemplatesAction) -> Self {
        match action {
            TemplatesAction::SetLoading(is_loading) => Self { is_loading, ..self },
            TemplatesAction::SetError(error) => Self { error, ..self },
            TemplatesAction::SetTemplates(templates) => Self {
                templates,
                error: None,
                ..self
            },
            TemplatesAction::ResetState => Self::default(),
        }
    }
}

/// Media generation templates.
#[derive(Clone)]
pub struct TemplatesResource {
    client: Arc<ApiClient>,
    store: Arc<Store<TemplatesState>>,
}

impl TemplatesResource {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            store: Arc::new(Store::default()),
        }
    }

    #[must_use]
    pub fn state(&self) -> TemplatesState {
        self.store.state()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<TemplatesState> {
        self.store.subscribe()
    }

    pub async fn load(&self) {
        self.store.dispatch(TemplatesAction::SetLoading(true));
        let _release = self.store.dispatch_on_drop(TemplatesAction::SetLoading(false));
        match self
            .client
            .get::<TemplatesResponse>(paths::TEMPLATES, None)
            .await
        {
            Ok(response) => self
                .store
                .dispatch(TemplatesAction::SetTemplates(response.templates)),
            Err(err) => {
                warn!(kind = %err.kind(), "failed to load templates");
                self.store
                    .dispatch(TemplatesAction::SetError(Some(TEMPLATES_LOAD_ERROR.into())));
            }
        }
    }

    pub fn reset_state(&self) {
        self.store.dispatch(TemplatesAction::ResetState);
    }
}
