use leptos::prelude::*;

use crate::routes::navigator::use_navigator;

/// Публичная главная страница
#[component]
pub fn HomePage() -> impl IntoView {
    let navigator = use_navigator();
    let login_path = navigator
        .gate
        .with_untracked(|gate| gate.policy().login_path().to_string());
    let href = login_path.clone();

    view! {
        <div class="home">
            <header class="home__header">
                <span class="home__brand">"ManufacturePro"</span>
                <a
                    href=href
                    on:click=move |ev: leptos::ev::MouseEvent| {
                        ev.prevent_default();
                        navigator.navigate(&login_path);
                    }
                >
                    "Login"
                </a>
            </header>
            <h1>"Streamline Your Manufacturing Operations"</h1>
            <p>
                "Production tracking, warehouse distribution and order fulfillment in one place."
            </p>
        </div>
    }
}
