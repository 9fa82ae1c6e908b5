use std::sync::Arc;

use crate::http::{ApiClient, ClientConfig, ReqwestTransport, Transport};
use crate::resources::{
    AddFlashcardResource, ComparisonResource, FlashcardsResource, MeaningsResource,
    MediaResource, TemplatesResource, UserResource,
};

/// Assembles the two HTTP clients and every resource built on them.
///
/// Constructed once at startup and cloned into the UI; clones share state.
#[derive(Clone)]
pub struct AppServices {
    api: Arc<ApiClient>,
    backend: Arc<ApiClient>,
    flashcards: FlashcardsResource,
    meanings: MeaningsResource,
    media: MediaResource,
    templates: TemplatesResource,
    comparison: ComparisonResource,
    add_flashcard: AddFlashcardResource,
    user: UserResource,
}

impl AppServices {
    /// Build services that talk HTTP through reqwest.
    #[must_use]
    pub fn with_reqwest(api: ClientConfig, backend: ClientConfig) -> Self {
        let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::default());
        Self::new(
            ApiClient::new(api, Arc::clone(&transport)),
            ApiClient::new(backend, transport),
        )
    }

    /// Build services over the environment-configured origins.
    #[must_use]
    pub fn from_env() -> Self {
        Self::with_reqwest(ClientConfig::api_from_env(), ClientConfig::backend_from_env())
    }

    #[must_use]
    pub fn new(api: ApiClient, backend: ApiClient) -> Self {
        let api = Arc::new(api);
        let backend = Arc::new(backend);
        let flashcards = FlashcardsResource::new(Arc::clone(&api));

        Self {
            meanings: MeaningsResource::new(Arc::clone(&api), flashcards.clone()),
            media: MediaResource::new(Arc::clone(&api)),
            templates: TemplatesResource::new(Arc::clone(&api)),
            comparison: ComparisonResource::new(Arc::clone(&api)),
            add_flashcard: AddFlashcardResource::new(Arc::clone(&api)),
            user: UserResource::new(Arc::clone(&backend)),
            flashcards,
            api,
            backend,
        }
    }

    #[must_use]
    pub fn api(&self) -> Arc<ApiClient> {
        Arc::clone(&self.api)
    }

    #[must_use]
    pub fn backend(&self) -> Arc<ApiClient> {
        Arc::clone(&self.backend)
    }

    #[must_use]
    pub fn flashcards(&self) -> &FlashcardsResource {
        &self.flashcards
    }

    #[must_use]
    pub fn meanings(&self) -> &MeaningsResource {
        &self.meanings
    }

    #[must_use]
    pub fn media(&self) -> &MediaResource {
        &self.media
    }

    #[must_use]
    pub fn templates(&self) -> &TemplatesResource {
        &self.templates
    }

    #[must_use]
    pub fn comparison(&self) -> &ComparisonResource {
        &self.comparison
    }

    #[must_use]
    pub fn add_flashcard(&self) -> &AddFlashcardResource {
        &self.add_flashcard
    }

    #[must_use]
    pub fn user(&self) -> &UserResource {
        &self.user
    }

    /// Drop every resource back to its initial state, e.g. on sign-out.
    pub fn reset_all(&self) {
        self.flashcards.reset_state();
        self.meanings.reset_state();
        self.media.reset_state();
        self.templates.reset_state();
        self.comparison.reset_state();
        self.add_flashcard.reset_state();
        self.user.reset_state();
    }
}
