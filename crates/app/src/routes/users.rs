use std::collections::HashMap;

use api::ApiClient;
use dioxus::prelude::*;
use shared_types::{
    AppError, CreateUserRequest, Domain, Role, UpdateUserRequest, User, UserFilter, UserStatus,
    ValidateRequest,
};
use shared_ui::{
    use_toast, Badge, BadgeVariant, Button, ButtonVariant, ConfirmDialog, DataTable, DataTableBody,
    DataTableCell, DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow, Form, FormRow,
    FormSelect, Input, Modal, PageHeader, SearchBar, SearchInput, SkeletonRows, StatusBadge, TabBar,
    TabItem, ToastOptions,
};

use crate::auth::use_auth;
use crate::components::ErrorPanel;
use crate::format_helpers::{blank_to_none, opt_number, opt_text, parse_opt_i64};
use crate::hooks::{field_error, use_action_failures, use_debounced_search};

/// Editable copy of a user record. Every field is kept as typed text until save.
#[derive(Debug, Clone, Default, PartialEq)]
struct UserForm {
    email: String,
    password: String,
    first_name: String,
    last_name: String,
    role: String,
    status: String,
    organization_id: String,
    department_id: String,
    phone: String,
}

impl UserForm {
    fn blank(organization_id: Option<i64>) -> Self {
        Self {
            role: Role::Employee.as_str().to_string(),
            status: UserStatus::Active.as_str().to_string(),
            organization_id: opt_number(organization_id),
            ..Default::default()
        }
    }

    fn from_record(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            password: String::new(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role().unwrap_or_default().as_str().to_string(),
            status: user.status.as_str().to_string(),
            organization_id: opt_number(user.organization_id),
            department_id: opt_number(user.department_id),
            phone: user.phone.clone().unwrap_or_default(),
        }
    }

    fn role(&self) -> Role {
        Role::parse(&self.role).unwrap_or_default()
    }

    fn to_create(&self) -> CreateUserRequest {
        CreateUserRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            role: self.role(),
            organization_id: parse_opt_i64(&self.organization_id),
            department_id: parse_opt_i64(&self.department_id),
            phone: blank_to_none(&self.phone),
        }
    }

    fn to_update(&self) -> UpdateUserRequest {
        UpdateUserRequest {
            email: self.email.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            role: self.role(),
            status: UserStatus::parse(&self.status).unwrap_or(UserStatus::Active),
            organization_id: parse_opt_i64(&self.organization_id),
            department_id: parse_opt_i64(&self.department_id),
            phone: blank_to_none(&self.phone),
        }
    }
}

/// Roles an administrator may hand out. Only super admins mint other super admins.
fn assignable_roles(actor: Option<Role>) -> Vec<Role> {
    Role::ALL
        .iter()
        .copied()
        .filter(|r| actor == Some(Role::SuperAdmin) || *r != Role::SuperAdmin)
        .collect()
}

/// User accounts with role filter, search and CRUD for administrators.
#[component]
pub fn Users() -> Element {
    let auth = use_auth();
    let client = use_context::<ApiClient>();
    let toast = use_toast();
    let failures = use_action_failures();
    let mut search = use_debounced_search();
    let mut role_tab = use_signal(|| "all".to_string());

    let list_client = client.clone();
    let mut users = use_resource(move || {
        let client = list_client.clone();
        let filter = UserFilter {
            search: blank_to_none(&search.query.read()),
            role: Role::parse(&role_tab.read()),
            ..Default::default()
        };
        async move { api::users::list_users(&client, &filter).await }
    });

    let can_manage = auth.can_manage(Domain::Users);
    let actor_role = auth.role();
    let own_org = auth.current_user.read().as_ref().and_then(|u| u.organization_id);

    let mut show_form = use_signal(|| false);
    let mut editing: Signal<Option<i64>> = use_signal(|| None);
    let mut form = use_signal(UserForm::default);
    let mut errors = use_signal(HashMap::<String, String>::new);
    let mut saving = use_signal(|| false);
    let mut deleting: Signal<Option<User>> = use_signal(|| None);
    let mut busy = use_signal(|| false);

    let finish = use_callback(move |result: Result<&'static str, AppError>| {
        saving.set(false);
        match result {
            Ok(msg) => {
                toast.success(msg.to_string(), ToastOptions::new());
                show_form.set(false);
                editing.set(None);
                users.restart();
            }
            Err(err) => {
                errors.set(err.field_errors.clone());
                failures.report(err);
            }
        }
    });

    let save_client = client.clone();
    let handle_save = move |_: FormEvent| {
        let draft = form.read().clone();
        let client = save_client.clone();
        let outcome = match editing() {
            Some(id) => {
                let request = draft.to_update();
                request.validate_request().map(|_| {
                    spawn(async move {
                        let result = api::users::update_user(&client, id, &request).await;
                        finish.call(result.map(|_| "User updated"));
                    });
                })
            }
            None => {
                let request = draft.to_create();
                request.validate_request().map(|_| {
                    spawn(async move {
                        let result = api::users::create_user(&client, &request).await;
                        finish.call(result.map(|_| "User created"));
                    });
                })
            }
        };
        match outcome {
            Ok(_) => {
                errors.set(HashMap::new());
                saving.set(true);
            }
            Err(err) => errors.set(err.field_errors),
        }
    };

    let delete_client = client.clone();
    let handle_delete = move |_| {
        let Some(user) = deleting() else { return };
        let client = delete_client.clone();
        spawn(async move {
            busy.set(true);
            match api::users::delete_user(&client, user.id).await {
                Ok(()) => {
                    toast.success(format!("{} removed", user.full_name()), ToastOptions::new());
                    users.restart();
                }
                Err(err) => failures.report(err),
            }
            busy.set(false);
            deleting.set(None);
        });
    };

    let open_edit = use_callback(move |user: User| {
        form.set(UserForm::from_record(&user));
        editing.set(Some(user.id));
        errors.set(HashMap::new());
        show_form.set(true);
    });

    let mut tabs = vec![TabItem::new("all", "All")];
    tabs.extend(Role::ALL.iter().map(|r| TabItem::new(r.as_str(), r.label())));

    let errs = errors.read().clone();
    let draft = form.read().clone();
    let is_edit = editing().is_some();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./users.css") }

        div { class: "users-page",
            PageHeader {
                title: "Users".to_string(),
                subtitle: Some("Accounts that can sign in to HR Pilot".to_string()),
                actions: can_manage.then(|| rsx! {
                    Button {
                        onclick: move |_| {
                            form.set(UserForm::blank(own_org));
                            editing.set(None);
                            errors.set(HashMap::new());
                            show_form.set(true);
                        },
                        "Add User"
                    }
                }),
            }

            SearchBar {
                SearchInput {
                    value: search.input.read().clone(),
                    placeholder: "Search by name or email".to_string(),
                    on_input: move |value: String| search.on_input(value),
                }
            }

            TabBar {
                tabs,
                active: role_tab.read().clone(),
                on_select: move |value: String| role_tab.set(value),
            }

            match &*users.read() {
                None => rsx! { SkeletonRows {} },
                Some(Err(err)) => rsx! {
                    ErrorPanel { error: err.clone(), on_retry: move |_| users.restart() }
                },
                Some(Ok(list)) => rsx! {
                    DataTable {
                        DataTableHeader {
                            DataTableColumn { "Name" }
                            DataTableColumn { "Email" }
                            DataTableColumn { "Role" }
                            DataTableColumn { "Status" }
                            DataTableColumn { "Phone" }
                            if can_manage {
                                DataTableColumn { "" }
                            }
                        }
                        DataTableBody {
                            if list.is_empty() {
                                DataTableEmpty { colspan: 6, message: "No users match the current filters.".to_string() }
                            }
                            for user in list.iter().cloned() {
                                DataTableRow { key: "{user.id}",
                                    DataTableCell {
                                        span { class: "user-avatar", "{user.initials()}" }
                                        "{user.full_name()}"
                                    }
                                    DataTableCell { "{user.email}" }
                                    DataTableCell {
                                        Badge { variant: BadgeVariant::Info, "{user.role_label()}" }
                                    }
                                    DataTableCell {
                                        StatusBadge {
                                            status: user.status.as_str().to_string(),
                                            label: user.status.label().to_string(),
                                        }
                                    }
                                    DataTableCell { {opt_text(user.phone.as_deref())} }
                                    if can_manage {
                                        DataTableCell {
                                            div { class: "row-actions",
                                                Button {
                                                    variant: ButtonVariant::Ghost,
                                                    onclick: {
                                                        let user = user.clone();
                                                        move |_| open_edit.call(user.clone())
                                                    },
                                                    "Edit"
                                                }
                                                Button {
                                                    variant: ButtonVariant::Ghost,
                                                    onclick: {
                                                        let user = user.clone();
                                                        move |_| deleting.set(Some(user.clone()))
                                                    },
                                                    "Delete"
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
            }

            Modal {
                open: show_form(),
                title: if is_edit { "Edit User".to_string() } else { "Add User".to_string() },
                on_close: move |_| show_form.set(false),

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
                        label: "Email".to_string(),
                        input_type: "email".to_string(),
                        value: draft.email.clone(),
                        required: true,
                        error: field_error(&errs, "email"),
                        on_input: move |evt: FormEvent| form.write().email = evt.value(),
                    }
                    if !is_edit {
                        Input {
                            label: "Password".to_string(),
                            input_type: "password".to_string(),
                            value: draft.password.clone(),
                            required: true,
                            error: field_error(&errs, "password"),
                            on_input: move |evt: FormEvent| form.write().password = evt.value(),
                        }
                    }
                    FormRow {
                        FormSelect {
                            label: "Role".to_string(),
                            value: draft.role.clone(),
                            onchange: move |evt: Event<FormData>| form.write().role = evt.value(),
                            for role in assignable_roles(actor_role) {
                                option { key: "{role.as_str()}", value: role.as_str(), "{role.label()}" }
                            }
                        }
                        if is_edit {
                            FormSelect {
                                label: "Status".to_string(),
                                value: draft.status.clone(),
                                onchange: move |evt: Event<FormData>| form.write().status = evt.value(),
                                for status in UserStatus::ALL {
                                    option { key: "{status.as_str()}", value: status.as_str(), "{status.label()}" }
                                }
                            }
                        }
                    }
                    FormRow {
                        Input {
                            label: "Organization ID".to_string(),
                            input_type: "number".to_string(),
                            value: draft.organization_id.clone(),
                            disabled: actor_role != Some(Role::SuperAdmin),
                            on_input: move |evt: FormEvent| form.write().organization_id = evt.value(),
                        }
                        Input {
                            label: "Department ID".to_string(),
                            input_type: "number".to_string(),
                            value: draft.department_id.clone(),
                            on_input: move |evt: FormEvent| form.write().department_id = evt.value(),
                        }
                    }
                    Input {
                        label: "Phone".to_string(),
                        value: draft.phone.clone(),
                        on_input: move |evt: FormEvent| form.write().phone = evt.value(),
                    }
                    div { class: "form-actions",
                        Button {
                            variant: ButtonVariant::Outline,
                            onclick: move |_| show_form.set(false),
                            "Cancel"
                        }
                        Button {
                            button_type: "submit".to_string(),
                            loading: saving(),
                            disabled: saving(),
                            if is_edit { "Save Changes" } else { "Create User" }
                        }
                    }
                }
            }

            ConfirmDialog {
                open: deleting.read().is_some(),
                title: "Delete user".to_string(),
                message: deleting
                    .read()
                    .as_ref()
                    .map(|u| format!("Delete {}? They will no longer be able to sign in.", u.full_name()))
                    .unwrap_or_default(),
                busy: busy(),
                on_confirm: handle_delete,
                on_cancel: move |_| deleting.set(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn user() -> User {
        User {
            id: 7,
            email: "ama@acme.test".into(),
            first_name: "Ama".into(),
            last_name: "Owusu".into(),
            role_name: "MANAGER".into(),
            status: UserStatus::Suspended,
            organization_id: Some(3),
            department_id: None,
            phone: None,
            avatar: None,
            created_at: None,
        }
    }

    #[test]
    fn edit_form_round_trips_to_the_same_update() {
        let u = user();
        assert_eq!(UserForm::from_record(&u).to_update(), UpdateUserRequest::from(&u));
    }

    #[test]
    fn create_form_trims_and_parses() {
        let mut form = UserForm::blank(Some(3));
        form.email = " kofi@acme.test ".into();
        form.first_name = "Kofi".into();
        form.last_name = "Mensah".into();
        form.password = "longenough".into();
        form.department_id = "12".into();
        let req = form.to_create();
        assert_eq!(req.email, "kofi@acme.test");
        assert_eq!(req.role, Role::Employee);
        assert_eq!(req.organization_id, Some(3));
        assert_eq!(req.department_id, Some(12));
        assert_eq!(req.phone, None);
        assert!(req.validate_request().is_ok());
    }

    #[test]
    fn short_password_is_rejected_before_sending() {
        let mut form = UserForm::blank(None);
        form.email = "kofi@acme.test".into();
        form.first_name = "Kofi".into();
        form.last_name = "Mensah".into();
        form.password = "short".into();
        let err = form.to_create().validate_request().unwrap_err();
        assert!(err.field_errors.contains_key("password"));
    }

    #[test]
    fn only_super_admins_assign_super_admin() {
        assert!(assignable_roles(Some(Role::SuperAdmin)).contains(&Role::SuperAdmin));
        assert!(!assignable_roles(Some(Role::OrgAdmin)).contains(&Role::SuperAdmin));
        assert_eq!(assignable_roles(Some(Role::OrgAdmin)).len(), Role::ALL.len() - 1);
    }
}
