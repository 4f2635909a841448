use contracts::system::access::navigation::find_page;
use leptos::prelude::*;

/// Content area for a dashboard page. Page bodies (tables, charts, forms)
/// live with the REST API screens; this only frames them.
#[component]
pub fn PageView(path: String) -> impl IntoView {
    match find_page(&path) {
        Some(page) => view! {
            <section class="page" data-path=page.path>
                <p class="page__section">{page.section}</p>
                <h2 class="page__title">{page.label}</h2>
            </section>
        }
        .into_any(),
        None => view! {
            <section class="page page--missing">
                <h2 class="page__title">"Page not found"</h2>
                <p>{path}</p>
            </section>
        }
        .into_any(),
    }
}
