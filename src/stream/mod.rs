//! Event stream transport: SSE decoding, reconnect policy, error reporting
//! and the per-session controller that feeds the runtime reducer.

pub mod backoff;
pub mod error;
pub mod phase;
pub mod report;
pub mod session;
pub mod sse;

pub use backoff::Backoff;
pub use error::StreamError;
pub use phase::SessionPhase;
pub use report::{send_report, ErrorReport, INVALID_MESSAGE};
pub use session::{SessionHandle, StreamSession};
pub use sse::{SseDecoder, SseFrame};
