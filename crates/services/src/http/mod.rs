//! HTTP plumbing: request tuning, the transport seam and the retrying client.

mod client;
mod config;
mod scripted;
mod transport;

pub use client::ApiClient;
pub use config::{CONTENT_TYPE, ClientConfig, JSON_CONTENT_TYPE, RequestConfig};
pub use scripted::{ScriptedReply, ScriptedTransport};
pub use transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport};
