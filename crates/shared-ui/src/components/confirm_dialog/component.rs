use dioxus::prelude::*;

use crate::{Button, ButtonVariant, Modal, ModalSize};

/// Yes/no confirmation used before destructive actions.
#[component]
pub fn ConfirmDialog(
    open: bool,
    title: String,
    message: String,
    #[props(default = "Delete".to_string())] confirm_label: String,
    #[props(default = false)] busy: bool,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        Modal {
            open,
            title,
            size: ModalSize::Small,
            on_close: move |_| on_cancel.call(()),
            footer: rsx! {
                Button {
                    variant: ButtonVariant::Outline,
                    disabled: busy,
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
                Button {
                    variant: ButtonVariant::Destructive,
                    loading: busy,
                    onclick: move |_| on_confirm.call(()),
                    "{confirm_label}"
                }
            },
            p { class: "confirm-message", "{message}" }
        }
    }
}
