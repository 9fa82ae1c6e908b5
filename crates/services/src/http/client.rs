use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::time::{sleep, timeout};
use tracing::debug;
use vocab_core::{ApiResult, AppError, ErrorKind};

use crate::error::TransportError;
use crate::http::config::{CONTENT_TYPE, ClientConfig, JSON_CONTENT_TYPE, RequestConfig};
use crate::http::transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport};

/// JSON client with per-attempt timeout and bounded linear-backoff retry.
///
/// Every call resolves to exactly one [`ApiResult`]; transport failures,
/// timeouts and non-success statuses all come back as classified
/// [`AppError`]s.
#[derive(Clone)]
pub struct ApiClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    #[must_use]
    pub fn new(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// Client over a fresh `reqwest` connection pool.
    #[must_use]
    pub fn with_reqwest(config: ClientConfig) -> Self {
        Self::new(config, Arc::new(ReqwestTransport::default()))
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// # Errors
    ///
    /// Returns the classified `AppError` of the last attempt.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        config: Option<&RequestConfig>,
    ) -> ApiResult<T> {
        self.request(Method::Get, path, None, config).await
    }

    /// # Errors
    ///
    /// Returns the classified `AppError` of the last attempt.
    pub async fn post<B, T>(&self, path: &str, body: &B, config: Option<&RequestConfig>) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode_body(body)?;
        self.request(Method::Post, path, Some(body), config).await
    }

    /// # Errors
    ///
    /// Returns the classified `AppError` of the last attempt.
    pub async fn put<B, T>(&self, path: &str, body: &B, config: Option<&RequestConfig>) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode_body(body)?;
        self.request(Method::Put, path, Some(body), config).await
    }

    /// Execute one logical request.
    ///
    /// Attempts run strictly one after another, at most `max_retries + 1`
    /// times. Only network and server failures are retried; the wait before
    /// attempt `n + 1` is `retry_base_delay * (n + 1)`. The terminal failure
    /// is logged once.
    ///
    /// # Errors
    ///
    /// Returns the classified `AppError` of the last attempt.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        config: Option<&RequestConfig>,
    ) -> ApiResult<T> {
        let config = config.unwrap_or(&self.config.defaults);
        let url = self.config.url(path);
        let headers = self.merged_headers(config);

        let mut attempt: u32 = 0;
        loop {
            let request = HttpRequest {
                method,
                url: url.clone(),
                headers: headers.clone(),
                body: body.clone(),
            };

            // Dropping the timed-out future cancels the attempt; nothing of it
            // outlives this iteration.
            let error = match timeout(config.timeout, self.transport.send(request)).await {
                Ok(Ok(response)) if response.is_success() => {
                    return decode(&response).inspect_err(|err| log_terminal(method, path, err));
                }
                Ok(Ok(response)) => AppError::from_status(Some(response.status), response.error_message()),
                Ok(Err(err)) => AppError::from_thrown(err, None),
                Err(_) => AppError::from_thrown(TransportError::Timeout(config.timeout), None),
            };

            if !error.is_retryable() || attempt >= config.max_retries {
                log_terminal(method, path, &error);
                return Err(error);
            }

            let delay = config.backoff(attempt);
            debug!(
                %method,
                path,
                attempt,
                kind = %error.kind(),
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "retrying request"
            );
            sleep(delay).await;
            attempt += 1;
        }
    }

    fn merged_headers(&self, config: &RequestConfig) -> std::collections::BTreeMap<String, String> {
        let mut headers = std::collections::BTreeMap::new();
        headers.insert(CONTENT_TYPE.to_string(), JSON_CONTENT_TYPE.to_string());
        headers.extend(self.config.defaults.headers.clone());
        headers.extend(config.headers.clone());
        headers
    }
}

fn encode_body<B: Serialize + ?Sized>(body: &B) -> ApiResult<serde_json::Value> {
    serde_json::to_value(body)
        .map_err(|err| AppError::new(ErrorKind::Validation, format!("invalid request body: {err}")))
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> ApiResult<T> {
    let body = response.body.trim();
    let body = if body.is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|err| {
        AppError::from_thrown(TransportError::Body(err.to_string()), Some(response.status))
    })
}

fn log_terminal(method: Method, path: &str, error: &AppError) {
    error.log_request(method.as_str(), path);
}
