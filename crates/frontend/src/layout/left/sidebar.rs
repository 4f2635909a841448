//! Sidebar generated from the route policy.
//!
//! There is no per-role markup here: the sections come from the navigation
//! projector, which asks the gate about every catalog page. A link is shown
//! exactly when following it would be allowed.

use contracts::system::access::{NavEntry, NavigationProjector};
use leptos::prelude::*;

use crate::routes::navigator::use_navigator;
use crate::system::auth::context::{do_logout, use_auth};

#[component]
fn NavLink(entry: NavEntry) -> impl IntoView {
    let navigator = use_navigator();
    let path = entry.path.clone();
    let href = entry.path.clone();
    let is_active = move || navigator.path.get() == entry.path;

    view! {
        <a
            href=href
            class="app-sidebar__item"
            class:app-sidebar__item--active=is_active
            on:click=move |ev: leptos::ev::MouseEvent| {
                ev.prevent_default();
                navigator.navigate(&path);
            }
        >
            {entry.label}
        </a>
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let navigator = use_navigator();
    let auth_state = use_auth();

    let sections = move || {
        let projector = NavigationProjector::new(navigator.gate.get());
        projector.sections_for(auth_state.get().role())
    };

    let role_name = move || {
        auth_state
            .get()
            .role()
            .map(|role| role.display_name())
            .unwrap_or("Guest")
    };

    let on_logout = move |_: leptos::ev::MouseEvent| {
        do_logout(auth_state);
        let home = navigator.gate.with_untracked(|gate| gate.home_for(None).to_string());
        navigator.navigate(&home);
    };

    view! {
        <div class="app-sidebar__content">
            <div class="app-sidebar__brand">"ManufacturePro"</div>
            {move || sections().into_iter().map(|section| view! {
                <div class="app-sidebar__group">
                    <div class="app-sidebar__group-title">{section.title}</div>
                    {section.entries.into_iter().map(|entry| view! { <NavLink entry=entry /> }).collect_view()}
                </div>
            }).collect_view()}
            <div class="app-sidebar__footer">
                <span class="app-sidebar__role">{role_name}</span>
                <button class="btn-secondary" on:click=on_logout>"Logout"</button>
            </div>
        </div>
    }
}
