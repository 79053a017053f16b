use std::fmt;

/// Lifecycle of a streaming session.
///
/// ```text
/// Idle → Connecting → Streaming → Closed
///            ↑  │          │
///            │  ↓          ↓
///          Reconnecting ←──┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Connecting,
    Streaming,
    Reconnecting,
    /// Terminal; no further updates are published.
    Closed,
}

impl SessionPhase {
    pub fn is_closed(&self) -> bool {
        matches!(self, SessionPhase::Closed)
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Connecting => "connecting",
            SessionPhase::Streaming => "streaming",
            SessionPhase::Reconnecting => "reconnecting",
            SessionPhase::Closed => "closed",
        };
        f.write_str(name)
    }
}
