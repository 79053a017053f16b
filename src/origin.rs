//! HTTP client for the origin's stream and event endpoints.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response, Url};
use serde::Serialize;
use thiserror::Error;
use tokio::time::timeout;

use crate::config::Config;
use crate::stream::StreamError;

const STREAM_PATH: &str = "a2ui/stream";
const EVENT_PATH: &str = "a2ui/event";
const EVENT_STREAM: &str = "text/event-stream";

/// Errors building an [`OriginClient`].
#[derive(Debug, Error)]
pub enum OriginError {
    #[error("invalid origin base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Shared, cheaply cloneable handle to one origin server.
#[derive(Clone)]
pub struct OriginClient {
    client: Client,
    stream_endpoint: Url,
    event_endpoint: Url,
    request_timeout: Duration,
}

impl OriginClient {
    pub fn new(config: &Config) -> Result<Self, OriginError> {
        let base = config.origin.base_url.trim_end_matches('/');
        let endpoint = |path: &str| {
            Url::parse(&format!("{base}/{path}")).map_err(|e| OriginError::InvalidBaseUrl {
                url: config.origin.base_url.clone(),
                reason: e.to_string(),
            })
        };

        let client = Client::builder()
            .connect_timeout(config.stream.connect_timeout())
            .build()?;

        Ok(Self {
            client,
            stream_endpoint: endpoint(STREAM_PATH)?,
            event_endpoint: endpoint(EVENT_PATH)?,
            request_timeout: config.stream.request_timeout(),
        })
    }

    /// `GET <base>/a2ui/stream?sessionId=<id>`
    pub fn stream_url(&self, session_id: &str) -> Url {
        let mut url = self.stream_endpoint.clone();
        url.query_pairs_mut().append_pair("sessionId", session_id);
        url
    }

    /// `POST <base>/a2ui/event`
    pub fn event_url(&self) -> &Url {
        &self.event_endpoint
    }

    /// Open the session's event stream.
    ///
    /// Succeeds only for a 2xx response with an event-stream content type.
    /// Waiting for the response head is bounded by the request timeout; the
    /// body is read by the caller.
    pub async fn open_stream(&self, session_id: &str) -> Result<Response, StreamError> {
        let url = self.stream_url(session_id);
        tracing::debug!(url = %url, "opening event stream");

        let send = self
            .client
            .get(url.clone())
            .header(ACCEPT, EVENT_STREAM)
            .send();

        let response = timeout(self.request_timeout, send)
            .await
            .map_err(|_| StreamError::Timeout {
                what: "stream response",
                seconds: self.request_timeout.as_secs(),
            })?
            .map_err(|source| StreamError::Connect {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(StreamError::Status {
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if !content_type.contains(EVENT_STREAM) {
            return Err(StreamError::ContentType {
                content_type: content_type.to_string(),
            });
        }

        Ok(response)
    }

    /// POST a JSON body to the event endpoint.
    pub async fn post_event<T: Serialize + ?Sized>(
        &self,
        body: &T,
        request_timeout: Duration,
    ) -> Result<Response, reqwest::Error> {
        self.client
            .post(self.event_endpoint.clone())
            .timeout(request_timeout)
            .json(body)
            .send()
            .await
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}
