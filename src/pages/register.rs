//! Registration page: create an unverified account and sign in as it.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;

use crate::components::route_guard::RouteGuard;
use crate::config::LOGIN_PATH;
use crate::net::types::{Registration, normalize_email};
use crate::state::context::use_session;

const MIN_PASSWORD_LEN: usize = 6;

/// Raw form fields as typed by the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct RegisterForm {
    pub email: String,
    pub username: String,
    pub display_name: String,
    pub password: String,
    pub confirm: String,
}

/// Validate the form and build the provider payload.
pub(crate) fn validate_registration(form: &RegisterForm) -> Result<Registration, &'static str> {
    let email = normalize_email(&form.email).ok_or("Enter a valid email address.")?;
    let username = form.username.trim();
    if username.is_empty() {
        return Err("Choose a username.");
    }
    if username.chars().any(char::is_whitespace) {
        return Err("Usernames cannot contain spaces.");
    }
    if form.password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Passwords need at least 6 characters.");
    }
    if form.password != form.confirm {
        return Err("Passwords do not match.");
    }
    let display_name = Some(form.display_name.trim())
        .filter(|name| !name.is_empty())
        .map(str::to_owned);
    Ok(Registration {
        email,
        password: form.password.clone(),
        username: username.to_owned(),
        display_name,
    })
}

/// Guest-only sign-up form.
#[component]
pub fn RegisterPage() -> impl IntoView {
    let store = StoredValue::new(use_session().store);
    let form = RwSignal::new(RegisterForm::default());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let registration = match validate_registration(&form.get()) {
            Ok(registration) => registration,
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
                if let Err(e) = store.register(registration).await {
                    let _ = info.try_set(e.to_string());
                }
                let _ = busy.try_set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (store, registration);
        }
    };

    view! {
        <RouteGuard require_auth=false>
            <div class="login-page">
                <div class="login-card">
                    <h1>"Create account"</h1>
                    <form class="login-form" on:submit=on_submit>
                        <input
                            class="login-input"
                            type="email"
                            placeholder="you@example.com"
                            prop:value=move || form.get().email
                            on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                        />
                        <input
                            class="login-input"
                            type="text"
                            placeholder="Username"
                            prop:value=move || form.get().username
                            on:input=move |ev| form.update(|f| f.username = event_target_value(&ev))
                        />
                        <input
                            class="login-input"
                            type="text"
                            placeholder="Display name (optional)"
                            prop:value=move || form.get().display_name
                            on:input=move |ev| form.update(|f| f.display_name = event_target_value(&ev))
                        />
                        <input
                            class="login-input"
                            type="password"
                            placeholder="Password"
                            prop:value=move || form.get().password
                            on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                        />
                        <input
                            class="login-input"
                            type="password"
                            placeholder="Confirm password"
                            prop:value=move || form.get().confirm
                            on:input=move |ev| form.update(|f| f.confirm = event_target_value(&ev))
                        />
                        <button class="login-button" type="submit" disabled=move || busy.get()>
                            "Create Account"
                        </button>
                    </form>
                    <Show when=move || !info.get().is_empty()>
                        <p class="login-message" role="alert">{move || info.get()}</p>
                    </Show>
                    <div class="login-divider"></div>
                    <a href=LOGIN_PATH class="login-link">"Already have an account? Sign in"</a>
                </div>
            </div>
        </RouteGuard>
    }
}
