pub mod endpoints;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Body, Client, Method, Request, Response, StatusCode, Url};
use serde_json::Value;
use tokio::sync::Mutex;
use tower::limit::RateLimit;
use tower::Service;
use tower::ServiceExt;

use crate::error::{ClientError, ConfigError};

/// Performs one API call and hands back the decoded JSON body.
///
/// Implementations never retry: the first failure goes straight back to the caller.
#[async_trait]
pub trait RemoteAccess: Send + Sync {
    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, ClientError>;
}

#[derive(Clone)]
pub struct HttpRemote {
    base: String,
    rate_limited_client: Arc<Mutex<RateLimit<Client>>>
}

impl HttpRemote {
    pub fn new(api_base: &str, requests_per_minute: u64) -> Result<Self, ConfigError> {
        Url::parse(api_base)
            .map_err(|err| format!("Invalid api_base {}: {}", api_base, err))?;
        let base = api_base.trim_end_matches('/').to_string();

        let svc = tower::ServiceBuilder::new()
            .rate_limit(requests_per_minute.max(1), Duration::from_secs(60))
            .service(Client::new());

        Ok(HttpRemote {
            base,
            rate_limited_client: Arc::new(Mutex::new(svc))
        })
    }

    fn endpoint_url(&self, path: &str) -> Result<Url, ClientError> {
        Url::parse(format!("{}{}", self.base, path).as_str())
            .map_err(|err| ClientError::transport(format!("Failed to build API request for {}: {}", path, err)))
    }
}

#[async_trait]
impl RemoteAccess for HttpRemote {
    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, ClientError> {
        let url = self.endpoint_url(path)?;
        tracing::debug!(%method, %url, "sending API request");

        let mut request = Request::new(method, url);
        if let Some(body) = body {
            *request.body_mut() = Some(Body::from(serde_json::to_vec(&body)?));
            request.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        let mut client = self.rate_limited_client.lock().await;
        let response: Response = client.ready().await
            .map_err(|err| ClientError::transport(format!("Failed to obtain ticket for sending requests: {}", err)))?
            .call(request).await?;
        drop(client);

        let status = response.status();
        if !status.is_success() {
            // The status alone decides the outcome, an unreadable body only loses the detail text
            let body_text = response.text().await.unwrap_or_default();
            return Err(remote_error(status, body_text));
        }

        let text = response.text().await?;
        interpret_response(status, text)
    }
}

fn remote_error(status: StatusCode, body_text: String) -> ClientError {
    ClientError::Remote {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_string(),
        body_text
    }
}

/// Maps a received status and body onto the adapter's result.
pub fn interpret_response(status: StatusCode, body_text: String) -> Result<Value, ClientError> {
    if !status.is_success() {
        return Err(remote_error(status, body_text));
    }

    if body_text.trim().is_empty() {
        return Ok(Value::Null);
    }

    Ok(serde_json::from_str(&body_text)?)
}
