//! Invisible component that logs the users list once per mount.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted by the dashboard. In hydrated builds it fires a single
//! `GET /api/go/users` and reports the outcome through the `LogSinkHandle`
//! found in context (console by default). Teardown aborts the request and
//! silences any late result. SSR renders nothing and issues no request.

use leptos::prelude::*;

#[cfg(feature = "hydrate")]
use crate::util::user_log::{LogSinkHandle, MountScope, log_all_users};

/// Fetch-and-log side effect with no visual output.
#[component]
pub fn UserLogger() -> impl IntoView {
    #[cfg(feature = "hydrate")]
    start_on_mount();
}

#[cfg(feature = "hydrate")]
fn start_on_mount() {
    let sink = use_context::<LogSinkHandle>().unwrap_or_default();
    let mut scope = MountScope::new();
    let unmount = scope.unmount_handle();
    on_cleanup(move || unmount.abort());

    if let Some(registration) = scope.fire() {
        leptos::task::spawn_local(async move {
            log_all_users(crate::net::api::fetch_all_users(), registration, sink.sink()).await;
        });
    }
}
