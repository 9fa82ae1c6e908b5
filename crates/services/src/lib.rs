#![forbid(unsafe_code)]

pub mod api;
pub mod auth;
pub mod app_services;
pub mod error;
pub mod http;
pub mod optimistic;
pub mod resources;
pub mod store;

pub use app_services::AppServices;
pub use error::{AddFlashcardError, AuthError, TransportError};
pub use http::{ApiClient, ClientConfig, RequestConfig, ScriptedReply, ScriptedTransport};
pub use optimistic::optimistic;
pub use store::{Reducer, Store};
