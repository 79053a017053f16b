//! Out-of-band error reports for messages the client refused to apply.

use std::time::Duration;

use serde::Serialize;

use crate::origin::OriginClient;

pub const INVALID_MESSAGE: &str = "invalid_message";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport<'a> {
    pub session_id: &'a str,
    pub error: ErrorDetail<'a>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail<'a> {
    #[serde(rename = "type")]
    pub error_type: &'static str,
    pub surface_id: Option<&'a str>,
    pub violations: &'a [String],
}

impl<'a> ErrorReport<'a> {
    pub fn invalid_message(
        session_id: &'a str,
        surface_id: Option<&'a str>,
        violations: &'a [String],
    ) -> Self {
        Self {
            session_id,
            error: ErrorDetail {
                error_type: INVALID_MESSAGE,
                surface_id,
                violations,
            },
        }
    }
}

/// Send one report. Best effort: failures are logged and swallowed.
///
/// Returns whether the origin answered with a 2xx status.
pub async fn send_report(origin: &OriginClient, report: &ErrorReport<'_>, timeout: Duration) -> bool {
    match origin.post_event(report, timeout).await {
        Ok(response) if response.status().is_success() => {
            tracing::debug!(surface = ?report.error.surface_id, "reported invalid message");
            true
        }
        Ok(response) => {
            tracing::warn!(
                status = response.status().as_u16(),
                surface = ?report.error.surface_id,
                "origin rejected error report"
            );
            false
        }
        Err(err) => {
            tracing::warn!(error = %err, surface = ?report.error.surface_id, "failed to send error report");
            false
        }
    }
}
