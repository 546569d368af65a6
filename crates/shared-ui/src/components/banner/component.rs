use dioxus::prelude::*;

/// Tone of a [`Banner`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BannerTone {
    #[default]
    Info,
    Warning,
    Error,
}

impl BannerTone {
    fn class(&self) -> &'static str {
        match self {
            BannerTone::Info => "info",
            BannerTone::Warning => "warning",
            BannerTone::Error => "error",
        }
    }
}

/// Full-width message strip above page content.
#[component]
pub fn Banner(
    #[props(default)] tone: BannerTone,
    #[props(default)] title: Option<String>,
    message: String,
    /// Shows a "Retry" button when set.
    #[props(default)]
    on_retry: Option<EventHandler<()>>,
    #[props(default)] on_dismiss: Option<EventHandler<()>>,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            class: "banner",
            "data-tone": tone.class(),
            role: if tone == BannerTone::Error { "alert" } else { "status" },
            div { class: "banner-text",
                if let Some(title) = title {
                    strong { class: "banner-title", "{title}" }
                }
                span { class: "banner-message", "{message}" }
            }
            div { class: "banner-actions",
                if let Some(retry) = on_retry {
                    button {
                        class: "banner-button",
                        r#type: "button",
                        onclick: move |_| retry.call(()),
                        "Retry"
                    }
                }
                if let Some(dismiss) = on_dismiss {
                    button {
                        class: "banner-dismiss",
                        r#type: "button",
                        "aria-label": "Dismiss",
                        onclick: move |_| dismiss.call(()),
                        "\u{2715}"
                    }
                }
            }
        }
    }
}
