use dioxus::prelude::*;

/// Headline number on a dashboard.
#[component]
pub fn StatCard(
    label: String,
    value: String,
    #[props(default)] hint: Option<String>,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "stat-card",
            span { class: "stat-label", "{label}" }
            span { class: "stat-value", "{value}" }
            if let Some(hint) = hint {
                span { class: "stat-hint", "{hint}" }
            }
        }
    }
}

/// Responsive grid of [`StatCard`]s.
#[component]
pub fn StatGrid(children: Element) -> Element {
    rsx! {
        div { class: "stat-grid", {children} }
    }
}
