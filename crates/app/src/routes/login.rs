use std::collections::HashMap;

use api::ApiClient;
use dioxus::prelude::*;
use shared_types::{LoginRequest, ValidateRequest};
use shared_ui::{
    Button, ButtonVariant, Card, CardContent, CardDescription, CardHeader, CardTitle, Form, Input,
};

use crate::auth::use_auth;
use crate::hooks::field_error;
use crate::routes::Route;
use crate::storage;

/// Email/password sign-in. Tokens are persisted so a reload keeps the session.
#[component]
pub fn Login() -> Element {
    let mut auth = use_auth();
    let client = use_context::<ApiClient>();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut loading = use_signal(|| false);

    // Redirect to dashboard if already authenticated
    if auth.is_authenticated() {
        navigator().replace(Route::Dashboard {});
    }

    let handle_login = move |_: FormEvent| {
        let request = LoginRequest {
            email: email().trim().to_string(),
            password: password(),
        };
        error_msg.set(None);
        if let Err(err) = request.validate_request() {
            field_errors.set(err.field_errors);
            return;
        }
        field_errors.set(HashMap::new());

        let client = client.clone();
        spawn(async move {
            loading.set(true);
            match api::auth::login(&client, &request).await {
                Ok((tokens, user)) => {
                    storage::save_tokens(&tokens);
                    auth.set_user(user);
                    navigator().replace(Route::Dashboard {});
                }
                Err(err) => {
                    tracing::info!(%err, "sign-in rejected");
                    field_errors.set(err.field_errors.clone());
                    error_msg.set(Some(err.message));
                }
            }
            loading.set(false);
        });
    };

    let errors = field_errors.read().clone();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./login.css") }

        div { class: "auth-page",
            Card {
                class: "auth-card",

                CardHeader {
                    CardTitle { "HR Pilot" }
                    CardDescription { "Sign in with your work email" }
                }

                CardContent {
                    if let Some(err) = error_msg() {
                        div { class: "auth-error", role: "alert", "{err}" }
                    }

                    Form { onsubmit: handle_login,
                        Input {
                            label: "Email".to_string(),
                            input_type: "email".to_string(),
                            value: email(),
                            required: true,
                            placeholder: "you@company.com".to_string(),
                            error: field_error(&errors, "email"),
                            on_input: move |evt: FormEvent| email.set(evt.value()),
                        }
                        Input {
                            label: "Password".to_string(),
                            input_type: "password".to_string(),
                            value: password(),
                            required: true,
                            error: field_error(&errors, "password"),
                            on_input: move |evt: FormEvent| password.set(evt.value()),
                        }
                        Button {
                            variant: ButtonVariant::Primary,
                            button_type: "submit".to_string(),
                            loading: loading(),
                            disabled: loading(),
                            if loading() { "Signing in..." } else { "Sign In" }
                        }
                    }
                }
            }
        }
    }
}
