//! Guard wrapper for signed-in-only and guest-only views.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages wrap their body in `RouteGuard`. The guard kicks off session
//! initialization on mount (the store makes repeat calls no-ops), recomputes
//! a [`GuardDecision`] whenever the session or path changes, and issues a
//! history-replacing navigation only when the decision newly becomes a
//! redirect.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::config::AppConfig;
use crate::state::context::use_session;
use crate::util::guard::{GuardConfig, GuardDecision, decide, redirect_on_transition};

#[component]
pub fn RouteGuard(
    /// `true` renders children only for signed-in users; `false` only for guests.
    require_auth: bool,
    /// Overrides the configured login (or dashboard) redirect target.
    #[prop(optional, into)]
    redirect_to: Option<String>,
    children: ChildrenFn,
) -> impl IntoView {
    let ctx = use_session();
    let app_config = expect_context::<AppConfig>();
    let config = match redirect_to {
        Some(redirect_target) => GuardConfig { require_auth, redirect_target },
        None if require_auth => GuardConfig::protected(app_config.login_path),
        None => GuardConfig::guest_only(app_config.dashboard_path),
    };
    let session = ctx.session;
    let location = use_location();
    let navigate = use_navigate();

    #[cfg(feature = "hydrate")]
    {
        let store = ctx.store.clone();
        leptos::task::spawn_local(async move { store.initialize().await });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = &ctx.store;
    }

    let decision = Memo::new(move |_| location.pathname.with(|path| session.with(|s| decide(s, path, &config))));

    Effect::new(move |previous: Option<GuardDecision>| {
        let next = decision.get();
        if let Some(target) = redirect_on_transition(previous.as_ref(), &next) {
            log::debug!("route guard redirecting to {target}");
            navigate(target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
        next
    });

    move || match decision.get() {
        GuardDecision::Render => children().into_any(),
        GuardDecision::Wait | GuardDecision::RedirectTo(_) => view! {
            <div class="route-guard route-guard--loading" role="status" aria-live="polite">
                <span class="route-guard__spinner" aria-hidden="true"></span>
                <span class="route-guard__label">"Loading..."</span>
            </div>
        }
        .into_any(),
    }
}
