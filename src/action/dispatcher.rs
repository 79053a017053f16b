//! Submits user actions to the origin's event endpoint.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::origin::OriginClient;
use crate::protocol::{validate_action, Action, ActionResult};
use crate::session_id::SessionIdProvider;

pub const INVALID_ACTION: &str = "invalid_action";
pub const NETWORK_ERROR: &str = "network_error";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ActionEnvelope<'a> {
    session_id: Option<String>,
    user_action: &'a Action,
}

/// The origin's verdict. Unlike [`ActionResult`], `accepted` is required, so
/// an unrelated JSON body does not pass for an envelope.
#[derive(Debug, Deserialize)]
struct VerdictEnvelope {
    accepted: bool,
    #[serde(default)]
    reason: Option<String>,
}

pub struct ActionDispatcher {
    origin: OriginClient,
    session: Arc<dyn SessionIdProvider>,
    timeout: Duration,
}

impl ActionDispatcher {
    pub fn new(origin: OriginClient, session: Arc<dyn SessionIdProvider>) -> Self {
        let timeout = origin.request_timeout();
        Self {
            origin,
            session,
            timeout,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validate locally, then submit and return the origin's verdict.
    ///
    /// Never retries. An invalid action is rejected without a request.
    pub async fn dispatch(&self, action: &Action) -> ActionResult {
        let validation = validate_action(action);
        if !validation.is_valid() {
            tracing::warn!(
                action = %action.name,
                violations = ?validation.violations,
                "rejecting invalid action"
            );
            return ActionResult::rejected(INVALID_ACTION);
        }

        let envelope = ActionEnvelope {
            session_id: self.session.session_id(),
            user_action: action,
        };

        let response = match self.origin.post_event(&envelope, self.timeout).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(action = %action.name, error = %err, "action submission failed");
                return ActionResult::rejected(NETWORK_ERROR);
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(action = %action.name, error = %err, "failed to read action response");
                return ActionResult::rejected(NETWORK_ERROR);
            }
        };

        match serde_json::from_slice::<VerdictEnvelope>(&body) {
            Ok(VerdictEnvelope { accepted, reason }) => {
                let result = ActionResult { accepted, reason };
                tracing::debug!(
                    action = %action.name,
                    accepted = result.accepted,
                    reason = ?result.reason,
                    "action submitted"
                );
                result
            }
            Err(_) if status.is_success() => {
                // A bare 2xx without an envelope still means the origin took it.
                ActionResult::accepted()
            }
            Err(_) => {
                tracing::warn!(action = %action.name, status = status.as_u16(), "origin refused action");
                ActionResult::rejected(format!("http_{}", status.as_u16()))
            }
        }
    }
}
