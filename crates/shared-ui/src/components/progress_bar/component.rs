use dioxus::prelude::*;

/// Horizontal bar for a 0-100 percentage.
#[component]
pub fn ProgressBar(value: u8) -> Element {
    let pct = value.min(100);
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            class: "progress-bar",
            role: "progressbar",
            "aria-valuemin": "0",
            "aria-valuemax": "100",
            "aria-valuenow": "{pct}",
            div { class: "progress-bar-fill", style: "width: {pct}%" }
        }
    }
}
