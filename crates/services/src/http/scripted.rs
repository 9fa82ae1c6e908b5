use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::http::transport::{HttpRequest, HttpResponse, Method, Transport};

/// Canned outcome for one attempt.
#[derive(Clone, Debug)]
pub enum ScriptedReply {
    Respond(HttpResponse),
    Fail(TransportError),
    /// Never answers; only a client-side timeout ends the attempt.
    Hang,
    Delayed(Duration, Box<ScriptedReply>),
}

impl ScriptedReply {
    #[must_use]
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self::Respond(HttpResponse::new(status, body.to_string()))
    }

    #[must_use]
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Respond(HttpResponse::new(status, body))
    }

    #[must_use]
    pub fn offline() -> Self {
        Self::Fail(TransportError::Connect("network unreachable".into()))
    }

    #[must_use]
    pub fn after(self, delay: Duration) -> Self {
        Self::Delayed(delay, Box::new(self))
    }
}

struct Route {
    method: Method,
    path: String,
    replies: VecDeque<ScriptedReply>,
}

#[derive(Default)]
struct ScriptState {
    routes: Vec<Route>,
    calls: Vec<HttpRequest>,
}

/// In-memory transport for tests and offline prototyping.
///
/// Replies are matched by method and URL suffix and consumed in order; the
/// last reply of a route repeats for every further call.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    state: Arc<Mutex<ScriptState>>,
}

impl ScriptedTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `reply` for `method path`.
    pub fn push(&self, method: Method, path: &str, reply: ScriptedReply) {
        let mut state = self.lock();
        if let Some(route) = state
            .routes
            .iter_mut()
            .find(|route| route.method == method && route.path == path)
        {
            route.replies.push_back(reply);
            return;
        }
        state.routes.push(Route {
            method,
            path: path.to_string(),
            replies: VecDeque::from([reply]),
        });
    }

    #[must_use]
    pub fn with(self, method: Method, path: &str, reply: ScriptedReply) -> Self {
        self.push(method, path, reply);
        self
    }

    /// Every request sent so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<HttpRequest> {
        self.lock().calls.clone()
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// Number of requests that hit `method path`.
    #[must_use]
    pub fn calls_to(&self, method: Method, path: &str) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| call.method == method && call.url.ends_with(path))
            .count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ScriptState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_reply(&self, request: &HttpRequest) -> ScriptedReply {
        let mut state = self.lock();
        state.calls.push(request.clone());
        let route = state
            .routes
            .iter_mut()
            .filter(|route| route.method == request.method && request.url.ends_with(&route.path))
            .max_by_key(|route| route.path.len());
        match route {
            Some(route) if route.replies.len() > 1 => route
                .replies
                .pop_front()
                .unwrap_or_else(ScriptedReply::offline),
            Some(route) => route
                .replies
                .front()
                .cloned()
                .unwrap_or_else(ScriptedReply::offline),
            None => ScriptedReply::Fail(TransportError::Connect(format!(
                "no scripted reply for {} {}",
                request.method, request.url
            ))),
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut reply = self.next_reply(&request);
        loop {
            match reply {
                ScriptedReply::Respond(response) => return Ok(response),
                ScriptedReply::Fail(err) => return Err(err),
                ScriptedReply::Hang => return std::future::pending().await,
                ScriptedReply::Delayed(delay, inner) => {
                    tokio::time::sleep(delay).await;
                    reply = *inner;
                }
            }
        }
    }
}
