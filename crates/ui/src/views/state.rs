use dioxus::prelude::*;
use tokio::sync::watch;
use vocab_core::{AppError, ErrorKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Offline,
    SignedOut,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn from_app_error(err: &AppError) -> Self {
        match err.kind() {
            ErrorKind::Network => Self::Offline,
            ErrorKind::Authentication => Self::SignedOut,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Offline => "You appear to be offline. Please try again.",
            Self::SignedOut => "Please sign in again.",
            Self::Unknown => "Something went wrong. Please try again.",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

/// Mirror a resource's state feed into a signal so the component re-renders
/// on every dispatch.
pub fn use_watch<T>(subscribe: impl FnOnce() -> watch::Receiver<T>) -> Signal<T>
where
    T: Clone + Send + Sync + 'static,
{
    let rx = use_hook(subscribe);
    let mut value = use_signal(|| rx.borrow().clone());
    use_future(move || {
        let mut rx = rx.clone();
        async move {
            while rx.changed().await.is_ok() {
                let next = rx.borrow_and_update().clone();
                value.set(next);
            }
        }
    });
    value
}
