//! Signed-in user chip with profile link and sign-out.

use leptos::prelude::*;

use crate::config::PROFILE_PATH;
use crate::state::context::use_session;

#[component]
pub fn UserMenu() -> impl IntoView {
    let ctx = use_session();
    let session = ctx.session;
    let store = StoredValue::new(ctx.store);

    let label = move || {
        session
            .get()
            .user
            .map_or_else(|| "—".to_owned(), |u| u.label().to_owned())
    };
    let unverified = move || session.get().user.is_some_and(|u| !u.verified);

    let on_logout = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let store = store.get_value();
            leptos::task::spawn_local(async move { store.logout().await });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = store;
        }
    };

    view! {
        <div class="user-menu">
            <a href=PROFILE_PATH class="user-menu__name" title="Profile">{label}</a>
            <Show when=unverified>
                <span class="user-menu__badge">"unverified"</span>
            </Show>
            <button
                class="btn user-menu__logout"
                on:click=on_logout
                disabled=move || session.get().is_loading
            >
                "Sign out"
            </button>
        </div>
    }
}
