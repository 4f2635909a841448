use contracts::system::access::RoutePolicy;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::navigator::{use_navigator, Navigator};
use crate::layout::left::sidebar::Sidebar;
use crate::layout::Shell;
use crate::system::auth::api;
use crate::system::auth::context::use_auth;
use crate::system::pages::home::HomePage;
use crate::system::pages::login::LoginPage;
use crate::system::pages::page_view::PageView;

#[component]
fn MainLayout() -> impl IntoView {
    let navigator = use_navigator();

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=move || view! { <PageView path=navigator.path.get() /> }.into_any()
        />
    }
}

/// Top-level router: picks the public root, the login page or the dashboard
/// shell for whatever path the gate last allowed.
#[component]
pub fn AppRoutes() -> impl IntoView {
    let auth_state = use_auth();
    let navigator = Navigator::new(auth_state);
    provide_context(navigator);

    // The gateway already checked the first load; this keeps the client in
    // step with a policy it may not have seen yet.
    navigator.refresh();
    spawn_local(async move {
        match api::fetch_policy().await {
            Ok(config) => match RoutePolicy::from_config(config) {
                Ok(policy) => navigator.install_policy(policy),
                Err(e) => log::error!("Gateway published an invalid policy: {}", e),
            },
            Err(e) => log::warn!("Using the built-in policy: {}", e),
        }
        match api::fetch_session_settings().await {
            Ok(settings) => auth_state.update(|state| state.settings = settings),
            Err(e) => log::warn!("Using the default session lifetime: {}", e),
        }
    });

    let _popstate = window_event_listener(leptos::ev::popstate, move |_| navigator.refresh());

    let screen = move || {
        let path = navigator.path.get();
        let gate = navigator.gate.get();
        let policy = gate.policy();
        if path == policy.public_root() {
            view! { <HomePage /> }.into_any()
        } else if policy.is_login(&path) {
            view! { <LoginPage /> }.into_any()
        } else {
            view! { <MainLayout /> }.into_any()
        }
    };

    view! { {screen} }
}
