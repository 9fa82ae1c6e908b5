use std::sync::Arc;

use services::AppServices;
use vocab_core::model::UserId;

/// What the composition root hands to the UI.
pub trait UiApp: Send + Sync {
    fn user_id(&self) -> UserId;
    fn services(&self) -> AppServices;
}

#[derive(Clone)]
pub struct AppContext {
    user_id: UserId,
    services: AppServices,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            user_id: app.user_id(),
            services: app.services(),
        }
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id.clone()
    }

    #[must_use]
    pub fn services(&self) -> &AppServices {
        &self.services
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
