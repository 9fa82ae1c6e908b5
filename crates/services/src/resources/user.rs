use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};
use vocab_core::ApiResult;
use vocab_core::model::UserId;

use crate::api::{Ack, UserProfile, paths};
use crate::http::{ApiClient, Method};
use crate::store::{Reducer, Store};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserState {
    pub profile: Option<UserProfile>,
    pub is_loading: bool,
    pub is_success: bool,
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserAction {
    SetLoading(bool),
    SetError(Option<String>),
    SetProfile(UserProfile),
    ResetState,
}

impl Reducer for UserState {
    type Action = UserAction;

    fn reduce(self, action: UserAction) -> Self {
        match action {
            UserAction::SetLoading(is_loading) => Self { is_loading, ..self },
            UserAction::SetError(error) => Self {
                error,
                is_success: false,
                ..self
            },
            UserAction::SetProfile(profile) => Self {
                profile: Some(profile),
                is_success: true,
                error: None,
                ..self
            },
            UserAction::ResetState => Self::default(),
        }
    }
}

/// Account registration and profile edits.
///
/// Talks to the backend origin directly, so it is built with the backend
/// client rather than the same-origin one.
#[derive(Clone)]
pub struct UserResource {
    backend: Arc<ApiClient>,
    store: Arc<Store<UserState>>,
}

impl UserResource {
    #[must_use]
    pub fn new(backend: Arc<ApiClient>) -> Self {
        Self {
            backend,
            store: Arc::new(Store::default()),
        }
    }

    #[must_use]
    pub fn state(&self) -> UserState {
        self.store.state()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<UserState> {
        self.store.subscribe()
    }

    /// Register a freshly signed-up user with the backend.
    ///
    /// # Errors
    ///
    /// Returns the classified `AppError`; its user message is also stored.
    pub async fn setup(&self, user_id: &UserId, user_name: &str, email: &str) -> ApiResult<()> {
        self.save(Method::Post, paths::USER_SETUP, profile(user_id, user_name, email))
            .await
    }

    /// Change the user's display name or email.
    ///
    /// # Errors
    ///
    /// Returns the classified `AppError`; its user message is also stored.
    pub async fn update(&self, user_id: &UserId, user_name: &str, email: &str) -> ApiResult<()> {
        self.save(Method::Put, paths::USER_UPDATE, profile(user_id, user_name, email))
            .await
    }

    async fn save(&self, method: Method, path: &str, profile: UserProfile) -> ApiResult<()> {
        self.store.dispatch(UserAction::SetLoading(true));
        let _release = self.store.dispatch_on_drop(UserAction::SetLoading(false));

        let sent = match method {
            Method::Post => self.backend.post::<_, Ack>(path, &profile, None).await,
            _ => self.backend.put::<_, Ack>(path, &profile, None).await,
        };
        match sent {
            Ok(_) => {
                info!(user_id = %profile.user_id, %path, "user profile saved");
                self.store.dispatch(UserAction::SetProfile(profile));
                Ok(())
            }
            Err(err) => {
                warn!(user_id = %profile.user_id, %path, kind = %err.kind(), "user profile save failed");
                self.store
                    .dispatch(UserAction::SetError(Some(err.user_message())));
                Err(err)
            }
        }
    }

    pub fn reset_state(&self) {
        self.store.dispatch(UserAction::ResetState);
    }
}

fn profile(user_id: &UserId, user_name: &str, email: &str) -> UserProfile {
    UserProfile {
        user_id: user_id.clone(),
        user_name: user_name.trim().to_string(),
        email: email.trim().to_string(),
    }
}
