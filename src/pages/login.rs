//! Login page: email + password sign-in against the identity provider.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

use crate::components::route_guard::RouteGuard;
use crate::config::REGISTER_PATH;
use crate::net::identity::{DEMO_EMAIL, DEMO_PASSWORD};
use crate::state::context::use_session;

/// Trim the email and require both fields.
pub(crate) fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter both email and password.");
    }
    Ok((email.to_owned(), password.to_owned()))
}

/// Guest-only sign-in form. Signed-in visitors are redirected to the dashboard.
#[component]
pub fn LoginPage() -> impl IntoView {
    let store = StoredValue::new(use_session().store);
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, password_value) = match validate_login_input(&email.get(), &password.get()) {
            Ok(values) => values,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            let store = store.get_value();
            leptos::task::spawn_local(async move {
                // On success the guard redirects; the page may be gone by the time we land.
                if let Err(e) = store.login(&email_value, &password_value).await {
                    let _ = info.try_set(e.to_string());
                    let _ = password.try_set(String::new());
                }
                let _ = busy.try_set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (store, email_value, password_value);
        }
    };

    let on_fill_demo = move |_| {
        email.set(DEMO_EMAIL.to_owned());
        password.set(DEMO_PASSWORD.to_owned());
    };

    view! {
        <RouteGuard require_auth=false>
            <div class="login-page">
                <div class="login-card">
                    <h1>"Prompt Packs"</h1>
                    <p class="login-card__subtitle">"Sign in to continue"</p>
                    <form class="login-form" on:submit=on_submit>
                        <input
                            class="login-input"
                            type="email"
                            placeholder="you@example.com"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                        <input
                            class="login-input"
                            type="password"
                            placeholder="Password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                        <button class="login-button" type="submit" disabled=move || busy.get()>
                            "Sign In"
                        </button>
                    </form>
                    <Show when=move || !info.get().is_empty()>
                        <p class="login-message" role="alert">{move || info.get()}</p>
                    </Show>
                    <button class="login-link" type="button" on:click=on_fill_demo>
                        "Use demo account"
                    </button>
                    <div class="login-divider"></div>
                    <a href=REGISTER_PATH class="login-link">"Create an account"</a>
                </div>
            </div>
        </RouteGuard>
    }
}
