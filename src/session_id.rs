//! Session identity: where the current session id comes from.

pub const SESSION_ID_ENV: &str = "A2UI_SESSION_ID";

/// Supplies the id of the session the client is attached to.
pub trait SessionIdProvider: Send + Sync {
    fn session_id(&self) -> Option<String>;
}

/// How the session ID was determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSource {
    /// Passed explicitly (e.g. `--session-id <id>`).
    Explicit,
    /// Read from `A2UI_SESSION_ID`.
    Environment,
    /// Nothing given, so a new UUID was generated.
    Generated,
}

/// Result of session resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResolution {
    pub session_id: String,
    pub source: SessionSource,
}

impl SessionResolution {
    pub fn explicit(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            source: SessionSource::Explicit,
        }
    }
}

impl SessionIdProvider for SessionResolution {
    fn session_id(&self) -> Option<String> {
        Some(self.session_id.clone())
    }
}

/// Pick a session id: explicit value, then environment, then a fresh UUID.
/// Blank values are treated as absent.
pub fn resolve_session(explicit: Option<&str>, env_value: Option<&str>) -> SessionResolution {
    let non_blank = |value: Option<&str>| {
        value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    if let Some(id) = non_blank(explicit) {
        return SessionResolution {
            session_id: id,
            source: SessionSource::Explicit,
        };
    }
    if let Some(id) = non_blank(env_value) {
        return SessionResolution {
            session_id: id,
            source: SessionSource::Environment,
        };
    }
    SessionResolution {
        session_id: uuid::Uuid::new_v4().to_string(),
        source: SessionSource::Generated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_wins() {
        let resolved = resolve_session(Some("abc"), Some("env"));
        assert_eq!(resolved, SessionResolution::explicit("abc"));
    }

    #[test]
    fn environment_is_second() {
        let resolved = resolve_session(Some("  "), Some("env"));
        assert_eq!(resolved.session_id, "env");
        assert_eq!(resolved.source, SessionSource::Environment);
    }

    #[test]
    fn generates_uuid_when_absent() {
        let resolved = resolve_session(None, None);
        assert_eq!(resolved.source, SessionSource::Generated);
        assert!(uuid::Uuid::parse_str(&resolved.session_id).is_ok());
        assert_eq!(resolved.session_id(), Some(resolved.session_id.clone()));
    }
}
