use dioxus::prelude::*;

/// Width preset of a [`Modal`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ModalSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl ModalSize {
    fn class(&self) -> &'static str {
        match self {
            ModalSize::Small => "sm",
            ModalSize::Medium => "md",
            ModalSize::Large => "lg",
        }
    }
}

/// Centered dialog over a dimmed backdrop. Clicking the backdrop or the
/// close button calls `on_close`; nothing renders while `open` is false.
#[component]
pub fn Modal(
    open: bool,
    title: String,
    on_close: EventHandler<()>,
    #[props(default)] size: ModalSize,
    footer: Option<Element>,
    children: Element,
) -> Element {
    if !open {
        return rsx! {};
    }

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            class: "modal-backdrop",
            onclick: move |_| on_close.call(()),
            div {
                class: "modal-panel",
                role: "dialog",
                "aria-modal": "true",
                "data-size": size.class(),
                onclick: move |evt| evt.stop_propagation(),
                div { class: "modal-header",
                    h2 { class: "modal-title", "{title}" }
                    button {
                        class: "modal-close",
                        r#type: "button",
                        "aria-label": "Close",
                        onclick: move |_| on_close.call(()),
                        "\u{2715}"
                    }
                }
                div { class: "modal-body", {children} }
                if let Some(footer) = footer {
                    div { class: "modal-footer", {footer} }
                }
            }
        }
    }
}
