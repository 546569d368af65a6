use dioxus::prelude::*;

/// Page title row with an optional subtitle and action buttons.
#[component]
pub fn PageHeader(
    title: String,
    subtitle: Option<String>,
    actions: Option<Element>,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "page-header",
            div { class: "page-heading",
                h1 { class: "page-title", "{title}" }
                if let Some(subtitle) = subtitle {
                    p { class: "page-subtitle", "{subtitle}" }
                }
            }
            if let Some(actions) = actions {
                div { class: "page-actions", {actions} }
            }
        }
    }
}
