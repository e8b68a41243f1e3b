//! Fetch-and-log cycle behind the dashboard's user logger.
//!
//! DESIGN
//! ======
//! The cycle is split from the view so it can run without a browser:
//! - `MountScope` is the per-instance lifecycle (`Idle -> Fired`) and owns the
//!   abort pair that ties the request to the view's lifetime.
//! - `FetchOutcome` classifies a completed request. Non-2xx bodies stay raw
//!   text and are never decoded.
//! - `UserLogSink` is where outcomes are reported. Views resolve it from
//!   context and fall back to `ConsoleSink`.
//!
//! Exactly one sink call happens per completed cycle; an aborted cycle
//! reports nothing.

#[cfg(test)]
#[path = "user_log_test.rs"]
mod user_log_test;

use std::future::Future;
use std::sync::Arc;

use futures::future::{AbortHandle, AbortRegistration, Abortable};

use crate::net::api::{FetchError, RawResponse};
use crate::net::types::{User, UserList};

pub const FAILED_FETCH_LABEL: &str = "Failed to Fetch All Users";
pub const USER_LIST_LABEL: &str = "This is the list of all Users";
pub const ERROR_LABEL: &str = "Error";

// =============================================================================
// SINKS
// =============================================================================

/// Receiver for user-logger outcomes.
pub trait UserLogSink {
    /// Informational: the list decoded successfully.
    fn users_listed(&self, users: &[User]);
    /// Diagnostic: the endpoint answered with a non-2xx status.
    fn fetch_failed(&self, status: u16, body: &str);
    /// Diagnostic: transport, body, or decode failure.
    fn error(&self, err: &FetchError);
}

/// Render the list the way it arrived on the wire.
pub(crate) fn users_json(users: &[User]) -> String {
    serde_json::to_string(users).unwrap_or_else(|_| format!("{users:?}"))
}

/// Writes through the `log` facade (the browser console once `console_log`
/// is installed).
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink;

impl UserLogSink for ConsoleSink {
    fn users_listed(&self, users: &[User]) {
        log::info!("{USER_LIST_LABEL} {}", users_json(users));
    }

    fn fetch_failed(&self, status: u16, body: &str) {
        log::error!("{FAILED_FETCH_LABEL} {status} {body}");
    }

    fn error(&self, err: &FetchError) {
        log::error!("{ERROR_LABEL} {err}");
    }
}

/// Shareable sink handle, suitable for `provide_context`.
#[derive(Clone)]
pub struct LogSinkHandle(Arc<dyn UserLogSink + Send + Sync>);

impl LogSinkHandle {
    pub fn new(sink: impl UserLogSink + Send + Sync + 'static) -> Self {
        Self(Arc::new(sink))
    }

    #[must_use]
    pub fn sink(&self) -> &(dyn UserLogSink + Send + Sync) {
        self.0.as_ref()
    }
}

impl Default for LogSinkHandle {
    fn default() -> Self {
        Self::new(ConsoleSink)
    }
}

impl std::fmt::Debug for LogSinkHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("LogSinkHandle")
    }
}

// =============================================================================
// OUTCOME
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    Users(UserList),
    Failed { status: u16, body: String },
    Error(FetchError),
}

impl FetchOutcome {
    /// Classify a completed request. Only 2xx bodies are decoded.
    #[must_use]
    pub fn from_result(result: Result<RawResponse, FetchError>) -> Self {
        match result {
            Err(err) => Self::Error(err),
            Ok(resp) if !resp.is_success() => Self::Failed { status: resp.status, body: resp.body },
            Ok(resp) => match serde_json::from_str::<UserList>(&resp.body) {
                Ok(users) => Self::Users(users),
                Err(e) => Self::Error(FetchError::Decode(e.to_string())),
            },
        }
    }

    pub fn report(&self, sink: &dyn UserLogSink) {
        match self {
            Self::Users(users) => sink.users_listed(users),
            Self::Failed { status, body } => sink.fetch_failed(*status, body),
            Self::Error(err) => sink.error(err),
        }
    }
}

// =============================================================================
// MOUNT LIFECYCLE
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MountState {
    #[default]
    Idle,
    Fired,
}

/// Lifecycle of one logger instance.
#[derive(Debug)]
pub struct MountScope {
    state: MountState,
    handle: AbortHandle,
    registration: Option<AbortRegistration>,
}

impl MountScope {
    #[must_use]
    pub fn new() -> Self {
        let (handle, registration) = AbortHandle::new_pair();
        Self { state: MountState::Idle, handle, registration: Some(registration) }
    }

    #[must_use]
    pub fn state(&self) -> MountState {
        self.state
    }

    /// Move `Idle -> Fired`. Returns the abort registration on the first call
    /// only; later calls are no-ops.
    pub fn fire(&mut self) -> Option<AbortRegistration> {
        if self.state == MountState::Fired {
            return None;
        }
        self.state = MountState::Fired;
        self.registration.take()
    }

    /// Handle to abort the in-flight cycle when the view is torn down.
    #[must_use]
    pub fn unmount_handle(&self) -> AbortHandle {
        self.handle.clone()
    }
}

impl Default for MountScope {
    fn default() -> Self {
        Self::new()
    }
}

/// Run one fetch-and-log cycle.
///
/// Returns the reported outcome, or `None` when the scope was aborted before
/// the fetch settled (nothing is logged in that case).
pub async fn log_all_users<Fut>(
    fetch: Fut,
    registration: AbortRegistration,
    sink: &dyn UserLogSink,
) -> Option<FetchOutcome>
where
    Fut: Future<Output = Result<RawResponse, FetchError>>,
{
    let result = Abortable::new(fetch, registration).await.ok()?;
    let outcome = FetchOutcome::from_result(result);
    outcome.report(sink);
    Some(outcome)
}
