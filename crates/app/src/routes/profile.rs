use std::collections::HashMap;

use api::ApiClient;
use dioxus::prelude::*;
use shared_types::{ChangePasswordRequest, UpdateProfileRequest, User, ValidateRequest};
use shared_ui::{
    use_toast, Badge, BadgeVariant, Button, Card, CardContent, CardDescription, CardHeader,
    CardTitle, Form, FormRow, Input, PageHeader, SkeletonRows, StatusBadge, ToastOptions,
};

use crate::auth::use_auth;
use crate::components::ErrorPanel;
use crate::format_helpers::{blank_to_none, opt_number, opt_text};
use crate::hooks::{field_error, use_action_failures};

#[derive(Debug, Clone, Default, PartialEq)]
struct ProfileForm {
    first_name: String,
    last_name: String,
    phone: String,
}

impl ProfileForm {
    fn from_user(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone: user.phone.clone().unwrap_or_default(),
        }
    }

    fn to_request(&self) -> UpdateProfileRequest {
        UpdateProfileRequest {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            phone: blank_to_none(&self.phone),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct PasswordForm {
    current_password: String,
    new_password: String,
    confirm_password: String,
}

impl PasswordForm {
    fn to_request(&self) -> Result<ChangePasswordRequest, HashMap<String, String>> {
        let request = ChangePasswordRequest {
            current_password: self.current_password.clone(),
            new_password: self.new_password.clone(),
        };
        let mut errors = request
            .validate_request()
            .err()
            .map(|err| err.field_errors)
            .unwrap_or_default();
        if self.new_password != self.confirm_password {
            errors.insert("confirm_password".to_string(), "Passwords do not match".to_string());
        }
        if errors.is_empty() {
            Ok(request)
        } else {
            Err(errors)
        }
    }
}

/// The signed-in user's own account details and password.
#[component]
pub fn Profile() -> Element {
    let client = use_context::<ApiClient>();

    let me_client = client.clone();
    let mut me = use_resource(move || {
        let client = me_client.clone();
        async move { api::auth::me(&client).await }
    });

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./profile.css") }

        div { class: "profile-page",
            PageHeader {
                title: "Profile".to_string(),
                subtitle: Some("Your account details".to_string()),
            }

            match &*me.read() {
                None => rsx! { SkeletonRows {} },
                Some(Err(err)) => rsx! {
                    ErrorPanel { error: err.clone(), on_retry: move |_| me.restart() }
                },
                Some(Ok(user)) => rsx! {
                    div { class: "profile-grid",
                        AccountSummary { user: user.clone() }
                        ProfileDetails { user: user.clone() }
                        PasswordChange {}
                    }
                },
            }
        }
    }
}

#[component]
fn AccountSummary(user: User) -> Element {
    rsx! {
        Card { class: "profile-summary",
            CardHeader {
                div { class: "profile-identity",
                    span { class: "profile-avatar", "{user.initials()}" }
                    div {
                        CardTitle { "{user.full_name()}" }
                        CardDescription { "{user.email}" }
                    }
                }
            }
            CardContent {
                dl { class: "profile-facts",
                    dt { "Role" }
                    dd { Badge { variant: BadgeVariant::Info, "{user.role_label()}" } }
                    dt { "Status" }
                    dd {
                        StatusBadge {
                            status: user.status.as_str().to_string(),
                            label: user.status.label().to_string(),
                        }
                    }
                    dt { "Organization" }
                    dd { {opt_number(user.organization_id)} }
                    dt { "Department" }
                    dd { {opt_number(user.department_id)} }
                    dt { "Phone" }
                    dd { {opt_text(user.phone.as_deref())} }
                }
            }
        }
    }
}

#[component]
fn ProfileDetails(user: User) -> Element {
    let mut auth = use_auth();
    let client = use_context::<ApiClient>();
    let toast = use_toast();
    let failures = use_action_failures();
    let mut form = use_signal(|| ProfileForm::from_user(&user));
    let mut errors = use_signal(HashMap::<String, String>::new);
    let mut saving = use_signal(|| false);

    let handle_save = move |_: FormEvent| {
        let request = form.read().to_request();
        if let Err(err) = request.validate_request() {
            errors.set(err.field_errors);
            return;
        }
        errors.set(HashMap::new());
        let client = client.clone();
        spawn(async move {
            saving.set(true);
            match api::auth::update_profile(&client, &request).await {
                Ok(updated) => {
                    form.set(ProfileForm::from_user(&updated));
                    auth.set_user(updated);
                    toast.success("Profile updated".to_string(), ToastOptions::new());
                }
                Err(err) => {
                    errors.set(err.field_errors.clone());
                    failures.report(err);
                }
            }
            saving.set(false);
        });
    };

    let errs = errors.read().clone();
    let draft = form.read().clone();

    rsx! {
        Card { class: "profile-details",
            CardHeader { CardTitle { "Personal details" } }
            CardContent {
                Form { onsubmit: handle_save,
                    FormRow {
                        Input {
                            label: "First name".to_string(),
                            value: draft.first_name.clone(),
                            required: true,
                            error: field_error(&errs, "first_name"),
                            on_input: move |evt: FormEvent| form.write().first_name = evt.value(),
                        }
                        Input {
                            label: "Last name".to_string(),
                            value: draft.last_name.clone(),
                            required: true,
                            error: field_error(&errs, "last_name"),
                            on_input: move |evt: FormEvent| form.write().last_name = evt.value(),
                        }
                    }
                    Input {
                        label: "Phone".to_string(),
                        input_type: "tel".to_string(),
                        value: draft.phone.clone(),
                        on_input: move |evt: FormEvent| form.write().phone = evt.value(),
                    }
                    div { class: "form-actions",
                        Button {
                            button_type: "submit".to_string(),
                            loading: saving(),
                            disabled: saving(),
                            "Save Profile"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn PasswordChange() -> Element {
    let client = use_context::<ApiClient>();
    let toast = use_toast();
    let failures = use_action_failures();
    let mut form = use_signal(PasswordForm::default);
    let mut errors = use_signal(HashMap::<String, String>::new);
    let mut saving = use_signal(|| false);

    let handle_save = move |_: FormEvent| {
        let request = match form.read().to_request() {
            Ok(request) => request,
            Err(errs) => {
                errors.set(errs);
                return;
            }
        };
        errors.set(HashMap::new());
        let client = client.clone();
        spawn(async move {
            saving.set(true);
            match api::auth::change_password(&client, &request).await {
                Ok(response) => {
                    form.set(PasswordForm::default());
                    let msg = if response.message.is_empty() {
                        "Password changed".to_string()
                    } else {
                        response.message
                    };
                    toast.success(msg, ToastOptions::new());
                }
                Err(err) => {
                    errors.set(err.field_errors.clone());
                    failures.report(err);
                }
            }
            saving.set(false);
        });
    };

    let errs = errors.read().clone();
    let draft = form.read().clone();

    rsx! {
        Card { class: "profile-password",
            CardHeader { CardTitle { "Change password" } }
            CardContent {
                Form { onsubmit: handle_save,
                    Input {
                        label: "Current password".to_string(),
                        input_type: "password".to_string(),
                        value: draft.current_password.clone(),
                        required: true,
                        error: field_error(&errs, "current_password"),
                        on_input: move |evt: FormEvent| form.write().current_password = evt.value(),
                    }
                    Input {
                        label: "New password".to_string(),
                        input_type: "password".to_string(),
                        value: draft.new_password.clone(),
                        required: true,
                        error: field_error(&errs, "new_password"),
                        on_input: move |evt: FormEvent| form.write().new_password = evt.value(),
                    }
                    Input {
                        label: "Confirm new password".to_string(),
                        input_type: "password".to_string(),
                        value: draft.confirm_password.clone(),
                        required: true,
                        error: field_error(&errs, "confirm_password"),
                        on_input: move |evt: FormEvent| form.write().confirm_password = evt.value(),
                    }
                    div { class: "form-actions",
                        Button {
                            button_type: "submit".to_string(),
                            loading: saving(),
                            disabled: saving(),
                            "Change Password"
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn profile_form_trims_and_drops_blank_phone() {
        let form = ProfileForm {
            first_name: "  Ama ".into(),
            last_name: "Owusu".into(),
            phone: "   ".into(),
        };
        assert_eq!(
            form.to_request(),
            UpdateProfileRequest {
                first_name: "Ama".into(),
                last_name: "Owusu".into(),
                phone: None,
            }
        );
    }

    #[test]
    fn password_change_requires_matching_confirmation() {
        let mut form = PasswordForm {
            current_password: "old-secret".into(),
            new_password: "new-secret-1".into(),
            confirm_password: "new-secret-2".into(),
        };
        let errs = form.to_request().unwrap_err();
        assert_eq!(errs.len(), 1);
        assert!(errs.contains_key("confirm_password"));

        form.confirm_password = form.new_password.clone();
        assert!(form.to_request().is_ok());

        form.new_password = "short".into();
        form.confirm_password = "short".into();
        assert!(form.to_request().unwrap_err().contains_key("new_password"));
    }
}
