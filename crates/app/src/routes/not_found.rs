use dioxus::prelude::*;

use crate::routes::Route;

/// Unknown paths land on the dashboard.
#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    use_effect(move || {
        tracing::debug!(path = %route.join("/"), "unknown route, redirecting");
        navigator().replace(Route::Dashboard {});
    });

    rsx! {
        div { class: "auth-guard-loading",
            p { "Redirecting..." }
        }
    }
}
