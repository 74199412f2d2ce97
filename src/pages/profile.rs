//! Profile page for editing the signed-in user's display name and avatar.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use leptos::prelude::*;

use crate::components::route_guard::RouteGuard;
use crate::components::user_menu::UserMenu;
use crate::config::DASHBOARD_PATH;
use crate::net::types::{Identity, ProfileUpdate};
use crate::state::context::use_session;

/// Diff the form against `current`, keeping only fields that changed.
pub(crate) fn build_profile_update(
    current: &Identity,
    display_name: &str,
    avatar_url: &str,
) -> Result<ProfileUpdate, &'static str> {
    let display_name = display_name.trim();
    let avatar_url = avatar_url.trim();
    let is_web_url = avatar_url.starts_with("https://") || avatar_url.starts_with("http://");
    if !avatar_url.is_empty() && !is_web_url {
        return Err("Avatar URL must start with http:// or https://.");
    }

    let mut update = ProfileUpdate::default();
    if !display_name.is_empty() && current.display_name.as_deref() != Some(display_name) {
        update.display_name = Some(display_name.to_owned());
    }
    if !avatar_url.is_empty() && current.avatar_url.as_deref() != Some(avatar_url) {
        update.avatar_url = Some(avatar_url.to_owned());
    }
    if update.is_empty() {
        return Err("Nothing to update.");
    }
    Ok(update)
}

/// Signed-in-only profile editor.
#[component]
pub fn ProfilePage() -> impl IntoView {
    let ctx = use_session();
    let session = ctx.session;
    let store = StoredValue::new(ctx.store);
    let current = session.get_untracked().user;
    let display_name = RwSignal::new(
        current
            .as_ref()
            .and_then(|u| u.display_name.clone())
            .unwrap_or_default(),
    );
    let avatar_url = RwSignal::new(
        current
            .as_ref()
            .and_then(|u| u.avatar_url.clone())
            .unwrap_or_default(),
    );
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let Some(user) = session.get_untracked().user else {
            info.set("You need to be signed in to do that.".to_owned());
            return;
        };
        let update = match build_profile_update(&user, &display_name.get(), &avatar_url.get()) {
            Ok(update) => update,
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
                let message = match store.update_profile(update).await {
                    Ok(_) => "Profile saved.".to_owned(),
                    Err(e) => e.to_string(),
                };
                let _ = info.try_set(message);
                let _ = busy.try_set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (store, update);
        }
    };

    let email = move || session.get().user.map(|u| u.email).unwrap_or_default();
    let username = move || session.get().user.map(|u| u.username).unwrap_or_default();

    view! {
        <RouteGuard require_auth=true>
            <div class="profile-page">
                <header class="dashboard-page__header toolbar">
                    <a href=DASHBOARD_PATH class="toolbar__back" title="Back to dashboard">"←"</a>
                    <span class="toolbar__title">"Profile"</span>
                    <span class="toolbar__spacer"></span>
                    <UserMenu/>
                </header>
                <div class="dialog dialog--profile">
                    <div class="dialog__profile-row">
                        <span class="dialog__profile-label">"Email"</span>
                        <span class="dialog__profile-value">{email}</span>
                    </div>
                    <div class="dialog__profile-row">
                        <span class="dialog__profile-label">"Username"</span>
                        <span class="dialog__profile-value">{username}</span>
                    </div>
                    <form class="login-form" on:submit=on_submit>
                        <input
                            class="login-input"
                            type="text"
                            placeholder="Display name"
                            prop:value=move || display_name.get()
                            on:input=move |ev| display_name.set(event_target_value(&ev))
                        />
                        <input
                            class="login-input"
                            type="url"
                            placeholder="https://example.com/avatar.png"
                            prop:value=move || avatar_url.get()
                            on:input=move |ev| avatar_url.set(event_target_value(&ev))
                        />
                        <button class="login-button" type="submit" disabled=move || busy.get()>
                            "Save"
                        </button>
                    </form>
                    <Show when=move || !info.get().is_empty()>
                        <p class="login-message" role="status">{move || info.get()}</p>
                    </Show>
                </div>
            </div>
        </RouteGuard>
    }
}
