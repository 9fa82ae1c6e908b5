//! Seam to the external sign-in service.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::AuthError;

/// Provider name passed along with credential sign-ins.
pub const CREDENTIALS_PROVIDER: &str = "credentials";

/// Whether the credentials log into an existing account or create one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    SignIn,
    SignUp,
}

impl AuthMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SignIn => "signin",
            Self::SignUp => "signup",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub mode: AuthMode,
    pub user_name: Option<String>,
}

impl Credentials {
    /// Reject obviously incomplete input before contacting the provider.
    ///
    /// # Errors
    ///
    /// `MissingField` naming the first empty field.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.email.trim().is_empty() {
            return Err(AuthError::MissingField("email"));
        }
        if self.password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }
        if self.mode == AuthMode::SignUp
            && self
                .user_name
                .as_deref()
                .is_none_or(|name| name.trim().is_empty())
        {
            return Err(AuthError::MissingField("user name"));
        }
        Ok(())
    }
}

/// External sign-in service. Opaque beyond these two calls.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, provider: &str, credentials: &Credentials) -> Result<(), AuthError>;
    async fn sign_out(&self) -> Result<(), AuthError>;
}

/// Validate `credentials`, then hand them to `provider` as a credential
/// sign-in.
///
/// # Errors
///
/// Missing fields are reported without calling the provider; otherwise
/// whatever the provider returned.
pub async fn sign_in_with_credentials(
    provider: &dyn AuthProvider,
    credentials: &Credentials,
) -> Result<(), AuthError> {
    credentials.validate()?;
    match provider.sign_in(CREDENTIALS_PROVIDER, credentials).await {
        Ok(()) => {
            info!(mode = credentials.mode.as_str(), "signed in");
            Ok(())
        }
        Err(err) => {
            warn!(mode = credentials.mode.as_str(), %err, "sign-in failed");
            Err(err)
        }
    }
}
