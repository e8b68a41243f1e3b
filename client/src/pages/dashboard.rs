//! Dashboard landing page.

#[cfg(all(test, feature = "ssr"))]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::components::user_logger::UserLogger;

/// Page shell: a heading plus the user logger.
#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <main>
            <h1>"Dashboard"</h1>
            <UserLogger/>
        </main>
    }
}
