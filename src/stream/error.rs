use thiserror::Error;

/// Transport failures while opening or reading the event stream.
///
/// Every variant leads to a reconnect; none of them is surfaced to the
/// renderer.
#[derive(Debug, Error)]
pub enum StreamError {
    /// No session id was available when the session started.
    #[error("no session id available")]
    NoSession,

    /// Failed to connect to the origin
    #[error("connection to '{url}' failed: {source}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Origin answered with a non-2xx status
    #[error("stream request returned HTTP {status}")]
    Status { status: u16 },

    /// Origin answered 2xx but not with an event stream
    #[error("unexpected content type '{content_type}'")]
    ContentType { content_type: String },

    /// Response head or next chunk did not arrive in time
    #[error("timed out after {seconds}s waiting for {what}")]
    Timeout { what: &'static str, seconds: u64 },

    /// Connection broke mid-stream
    #[error("stream read failed: {0}")]
    Read(#[source] reqwest::Error),

    /// Server closed the body without sending `[DONE]`
    #[error("stream ended without [DONE]")]
    UnexpectedEof,
}

impl StreamError {
    /// Short label for log fields.
    pub fn error_type(&self) -> &'static str {
        match self {
            StreamError::NoSession => "no_session",
            StreamError::Connect { .. } => "connection_error",
            StreamError::Status { .. } => "http_status",
            StreamError::ContentType { .. } => "content_type",
            StreamError::Timeout { .. } => "timeout",
            StreamError::Read(_) => "read_error",
            StreamError::UnexpectedEof => "unexpected_eof",
        }
    }
}
