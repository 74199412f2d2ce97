//! Dashboard page: the authenticated landing route.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pack browsing and assessment widgets mount inside this shell; the page
//! itself only owns the auth gate and the header chrome.

use leptos::prelude::*;

use crate::components::route_guard::RouteGuard;
use crate::components::user_menu::UserMenu;
use crate::state::context::use_session;

/// Signed-in-only dashboard. Guests are redirected to the login page.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = use_session().session;
    let greeting = move || {
        session
            .get()
            .user
            .map(|u| format!("Welcome back, {}", u.label()))
            .unwrap_or_default()
    };

    view! {
        <RouteGuard require_auth=true>
            <div class="dashboard-page">
                <header class="dashboard-page__header toolbar">
                    <span class="toolbar__title">"Prompt Packs"</span>
                    <span class="toolbar__spacer"></span>
                    <UserMenu/>
                </header>
                <main class="dashboard-page__body">
                    <h2>{greeting}</h2>
                    <section class="dashboard-page__section">
                        <h3>"Your packs"</h3>
                        <p class="dashboard-page__empty">"No prompt packs yet."</p>
                    </section>
                    <section class="dashboard-page__section">
                        <h3>"Assessments"</h3>
                        <p class="dashboard-page__empty">"No findings to review."</p>
                    </section>
                </main>
            </div>
        </RouteGuard>
    }
}
