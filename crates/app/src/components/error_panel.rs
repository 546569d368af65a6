use api::ApiClient;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdLock;
use dioxus_free_icons::Icon;
use shared_types::{AppError, ErrorDisposition};
use shared_ui::{Banner, BannerTone, Button, ButtonVariant};

use crate::auth::{sign_out, use_auth};

/// Inline "access denied" view used by guards and forbidden responses.
#[component]
pub fn AccessDenied(#[props(default)] message: Option<String>) -> Element {
    let message = message
        .unwrap_or_else(|| "You do not have permission to view this page.".to_string());

    rsx! {
        div { class: "access-denied",
            Icon::<LdLock> { icon: LdLock, width: 32, height: 32 }
            h2 { "Access denied" }
            p { "{message}" }
        }
    }
}

/// Renders a failed fetch the way its disposition asks for.
#[component]
pub fn ErrorPanel(error: AppError, on_retry: EventHandler<()>) -> Element {
    let client = use_context::<ApiClient>();
    let auth = use_auth();

    match error.disposition() {
        ErrorDisposition::ReLogin => rsx! {
            div { class: "error-panel",
                Banner {
                    tone: BannerTone::Warning,
                    title: "Session expired".to_string(),
                    message: error.message.clone(),
                }
                Button {
                    variant: ButtonVariant::Primary,
                    onclick: move |_| {
                        let client = client.clone();
                        spawn(sign_out(client, auth));
                    },
                    "Sign in again"
                }
            }
        },
        ErrorDisposition::AccessDenied => rsx! {
            AccessDenied { message: error.message.clone() }
        },
        ErrorDisposition::Inline => rsx! {
            Banner {
                tone: BannerTone::Warning,
                message: error.message.clone(),
                on_retry: move |_| on_retry.call(()),
            }
        },
        ErrorDisposition::Retry => rsx! {
            Banner {
                tone: BannerTone::Error,
                title: "Could not load data".to_string(),
                message: error.message.clone(),
                on_retry: move |_| on_retry.call(()),
            }
        },
    }
}
