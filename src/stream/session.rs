//! The streaming session controller.
//!
//! One background task per session owns the connection and is the only
//! writer of that session's [`RuntimeState`]. Snapshots and phase changes
//! are published on `watch` channels; any number of readers may subscribe.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::timeout;

use crate::cancel::CancelHandle;
use crate::config::StreamConfig;
use crate::origin::OriginClient;
use crate::protocol::{surface_id_hint, A2uiMessage, ValidMessage};
use crate::runtime::{Reducer, RuntimeReducer, RuntimeState};
use crate::session_id::SessionIdProvider;

use super::backoff::Backoff;
use super::error::StreamError;
use super::phase::SessionPhase;
use super::report::{send_report, ErrorReport};
use super::sse::{SseDecoder, SseFrame};

/// How a single connection ended without a transport failure.
enum StreamEnd {
    Done,
}

/// Configured but not yet running session.
pub struct StreamSession {
    origin: OriginClient,
    config: StreamConfig,
    session_id: String,
}

impl StreamSession {
    pub fn new(origin: OriginClient, config: StreamConfig, session_id: impl Into<String>) -> Self {
        Self {
            origin,
            config,
            session_id: session_id.into(),
        }
    }

    /// Build a session for whatever id `provider` currently reports.
    pub fn for_provider(
        origin: OriginClient,
        config: StreamConfig,
        provider: &dyn SessionIdProvider,
    ) -> Result<Self, StreamError> {
        let session_id = provider
            .session_id()
            .filter(|id| !id.trim().is_empty())
            .ok_or(StreamError::NoSession)?;
        Ok(Self::new(origin, config, session_id))
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Start the background task. Must be called inside a tokio runtime.
    pub fn spawn(self) -> SessionHandle {
        let (state_tx, state_rx) = watch::channel(Arc::new(RuntimeState::new()));
        let (phase_tx, phase_rx) = watch::channel(SessionPhase::Idle);
        let cancel = CancelHandle::new();
        let session_id = self.session_id.clone();

        let backoff = Backoff::new(
            self.config.retry_backoff_base(),
            self.config.retry_backoff_max(),
            self.config.reconnect_limit(),
        );
        let worker = SessionWorker {
            origin: self.origin,
            config: self.config,
            session_id: self.session_id,
            state_tx,
            phase_tx,
            current: Arc::new(RuntimeState::new()),
            backoff,
        };
        let task = tokio::spawn(worker.run(cancel.clone()));

        SessionHandle {
            session_id,
            state: state_rx,
            phase: phase_rx,
            cancel,
            task,
        }
    }
}

/// Owner-side handle to a running session.
///
/// Dropping the handle does not stop the task; call [`cancel`](Self::cancel)
/// or [`shutdown`](Self::shutdown) when the owning session ends.
pub struct SessionHandle {
    session_id: String,
    state: watch::Receiver<Arc<RuntimeState>>,
    phase: watch::Receiver<SessionPhase>,
    cancel: CancelHandle,
    task: JoinHandle<()>,
}

impl SessionHandle {
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// A new subscription to state snapshots.
    pub fn state(&self) -> watch::Receiver<Arc<RuntimeState>> {
        self.state.clone()
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> Arc<RuntimeState> {
        self.state.borrow().clone()
    }

    /// A new subscription to phase changes.
    pub fn phase(&self) -> watch::Receiver<SessionPhase> {
        self.phase.clone()
    }

    pub fn current_phase(&self) -> SessionPhase {
        *self.phase.borrow()
    }

    /// Stop the task: aborts any pending backoff and drops the connection.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait until the session reaches [`SessionPhase::Closed`].
    pub async fn closed(&self) {
        let mut phase = self.phase.clone();
        // Err means the task is gone, which only happens after Closed.
        let _ = phase.wait_for(SessionPhase::is_closed).await;
    }

    /// Cancel and wait for the task to finish.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(err) = self.task.await {
            tracing::warn!(session = %self.session_id, error = %err, "session task ended abnormally");
        }
    }
}

struct SessionWorker {
    origin: OriginClient,
    config: StreamConfig,
    session_id: String,
    state_tx: watch::Sender<Arc<RuntimeState>>,
    phase_tx: watch::Sender<SessionPhase>,
    current: Arc<RuntimeState>,
    backoff: Backoff,
}

impl SessionWorker {
    async fn run(mut self, cancel: CancelHandle) {
        loop {
            self.set_phase(SessionPhase::Connecting);

            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                outcome = self.stream_once() => Some(outcome),
            };

            match outcome {
                None => {
                    tracing::info!(session = %self.session_id, "session cancelled");
                    break;
                }
                Some(Ok(StreamEnd::Done)) => {
                    tracing::info!(session = %self.session_id, "stream finished");
                    break;
                }
                Some(Err(err)) => {
                    tracing::warn!(
                        session = %self.session_id,
                        kind = err.error_type(),
                        error = %err,
                        "event stream failed"
                    );
                    self.set_phase(SessionPhase::Reconnecting);

                    let Some(delay) = self.backoff.next_delay() else {
                        tracing::warn!(
                            session = %self.session_id,
                            attempts = self.backoff.attempts() - 1,
                            "giving up after reconnect limit"
                        );
                        break;
                    };
                    tracing::debug!(session = %self.session_id, delay_ms = delay.as_millis() as u64, "reconnecting");

                    let cancelled = tokio::select! {
                        biased;
                        _ = cancel.cancelled() => true,
                        _ = tokio::time::sleep(delay) => false,
                    };
                    if cancelled {
                        tracing::info!(session = %self.session_id, "session cancelled during backoff");
                        break;
                    }
                }
            }
        }

        self.set_phase(SessionPhase::Closed);
    }

    /// Open one connection and consume it until `[DONE]` or failure.
    async fn stream_once(&mut self) -> Result<StreamEnd, StreamError> {
        let mut response = self.origin.open_stream(&self.session_id).await?;
        self.backoff.reset();
        self.set_phase(SessionPhase::Streaming);

        let idle = self.config.idle_timeout();
        let mut decoder = SseDecoder::new();

        loop {
            let chunk = timeout(idle, response.chunk())
                .await
                .map_err(|_| StreamError::Timeout {
                    what: "next event",
                    seconds: idle.as_secs(),
                })?
                .map_err(StreamError::Read)?;

            let (frames, eof) = match chunk {
                Some(bytes) => (decoder.push(&bytes), false),
                None => (decoder.finish(), true),
            };

            for frame in frames {
                match frame {
                    SseFrame::Done => return Ok(StreamEnd::Done),
                    SseFrame::Data(payload) => self.handle_payload(&payload).await,
                }
            }

            if eof {
                return Err(StreamError::UnexpectedEof);
            }
        }
    }

    /// Decode, validate, then either apply and publish or report.
    async fn handle_payload(&mut self, payload: &str) {
        let message = match A2uiMessage::decode(payload) {
            Ok(message) => message,
            Err(err) => {
                let surface_id = surface_id_hint(payload);
                let violations = vec![format!("malformed message: {err}")];
                self.report_invalid(surface_id.as_deref(), &violations).await;
                return;
            }
        };

        let surface_id = message.surface_id().map(str::to_string);
        match ValidMessage::try_from(message) {
            Ok(valid) => self.apply(valid),
            Err(result) => {
                self.report_invalid(surface_id.as_deref(), &result.violations)
                    .await
            }
        }
    }

    fn apply(&mut self, message: ValidMessage) {
        tracing::debug!(session = %self.session_id, case = message.case_name(), "applying message");
        let next = RuntimeReducer::reduce(self.current.as_ref().clone(), message);
        if next.shares_surfaces_with(&self.current) {
            return;
        }
        self.current = Arc::new(next);
        self.state_tx.send_replace(self.current.clone());
    }

    async fn report_invalid(&self, surface_id: Option<&str>, violations: &[String]) {
        tracing::warn!(
            session = %self.session_id,
            surface = ?surface_id,
            violations = ?violations,
            "dropping invalid message"
        );
        let report = ErrorReport::invalid_message(&self.session_id, surface_id, violations);
        send_report(&self.origin, &report, self.config.report_timeout()).await;
    }

    fn set_phase(&self, phase: SessionPhase) {
        let previous = self.phase_tx.send_replace(phase);
        if previous != phase {
            tracing::info!(session = %self.session_id, from = %previous, to = %phase, "session phase");
        }
    }
}
