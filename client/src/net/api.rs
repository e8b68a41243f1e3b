//! REST helpers for the users API.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): the fetch reports a transport error, since the request
//! is only meaningful in the browser and the logger never fires during SSR.
//!
//! ERROR HANDLING
//! ==============
//! The fetch never decodes. It hands back status plus raw body text so the
//! caller decides whether the body is a user list or a diagnostic.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

/// Path of the users list endpoint.
pub const USERS_ENDPOINT: &str = "/api/go/users";

/// Configuration of an outbound `GET`, kept separate from the transport so
/// it can be inspected without issuing the request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestSpec {
    pub path: &'static str,
    /// Never read from or write to the browser's HTTP cache.
    pub bypass_cache: bool,
}

/// The users list request: always fresh.
#[must_use]
pub fn users_request() -> RequestSpec {
    RequestSpec { path: USERS_ENDPOINT, bypass_cache: true }
}

/// Status and undecoded body of a completed request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    /// `true` for any 2xx status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("reading response body failed: {0}")]
    Body(String),
    #[error("decoding user list failed: {0}")]
    Decode(String),
}

#[cfg(feature = "hydrate")]
fn request_cache(spec: RequestSpec) -> web_sys::RequestCache {
    if spec.bypass_cache {
        web_sys::RequestCache::NoStore
    } else {
        web_sys::RequestCache::Default
    }
}

/// Aborts the browser request when the owning future is dropped mid-flight.
#[cfg(feature = "hydrate")]
struct AbortOnDrop(Option<web_sys::AbortController>);

#[cfg(feature = "hydrate")]
impl AbortOnDrop {
    fn new() -> Self {
        Self(web_sys::AbortController::new().ok())
    }

    fn signal(&self) -> Option<web_sys::AbortSignal> {
        self.0.as_ref().map(web_sys::AbortController::signal)
    }
}

#[cfg(feature = "hydrate")]
impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        // No-op once the fetch has settled.
        if let Some(controller) = &self.0 {
            controller.abort();
        }
    }
}

/// Fetch `/api/go/users` with caching bypassed.
///
/// # Errors
///
/// Returns [`FetchError::Transport`] if the request cannot be sent and
/// [`FetchError::Body`] if the response body cannot be read.
pub async fn fetch_all_users() -> Result<RawResponse, FetchError> {
    #[cfg(feature = "hydrate")]
    {
        let spec = users_request();
        let guard = AbortOnDrop::new();
        let signal = guard.signal();
        let resp = gloo_net::http::Request::get(spec.path)
            .cache(request_cache(spec))
            .abort_signal(signal.as_ref())
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| FetchError::Body(e.to_string()))?;
        drop(guard);
        Ok(RawResponse { status, body })
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(FetchError::Transport("not available on server".to_owned()))
    }
}
