use std::collections::HashMap;

use api::ApiClient;
use dioxus::prelude::*;
use shared_types::{
    filter_by_query, AppError, Domain, Module, ModuleToggles, Organization, OrganizationRequest,
    ValidateRequest,
};
use shared_ui::{
    use_toast, Badge, BadgeVariant, Button, ButtonVariant, CheckboxField, ConfirmDialog, DataTable,
    DataTableBody, DataTableCell, DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow,
    Form, FormRow, Input, Modal, ModalSize, PageHeader, SearchBar, SearchInput, SkeletonRows,
    ToastOptions,
};

use crate::auth::use_auth;
use crate::components::ErrorPanel;
use crate::format_helpers::{blank_to_none, opt_text};
use crate::hooks::{field_error, use_action_failures, use_debounced_search};

#[derive(Debug, Clone, PartialEq)]
struct OrganizationForm {
    name: String,
    code: String,
    email: String,
    phone: String,
    address: String,
    website: String,
    is_active: bool,
    modules: ModuleToggles,
}

impl Default for OrganizationForm {
    fn default() -> Self {
        Self::from_request(&OrganizationRequest::default())
    }
}

impl OrganizationForm {
    fn from_request(req: &OrganizationRequest) -> Self {
        Self {
            name: req.name.clone(),
            code: req.code.clone(),
            email: req.email.clone().unwrap_or_default(),
            phone: req.phone.clone().unwrap_or_default(),
            address: req.address.clone().unwrap_or_default(),
            website: req.website.clone().unwrap_or_default(),
            is_active: req.is_active,
            modules: req.modules,
        }
    }

    fn to_request(&self) -> OrganizationRequest {
        OrganizationRequest {
            name: self.name.trim().to_string(),
            code: self.code.trim().to_uppercase(),
            email: blank_to_none(&self.email),
            phone: blank_to_none(&self.phone),
            address: blank_to_none(&self.address),
            website: blank_to_none(&self.website),
            is_active: self.is_active,
            modules: self.modules,
        }
    }
}

fn enabled_modules(toggles: &ModuleToggles) -> String {
    let names: Vec<&str> = Module::ALL
        .iter()
        .filter(|m| toggles.is_enabled(**m))
        .map(|m| m.label())
        .collect();
    if names.is_empty() {
        "None".to_string()
    } else {
        names.join(", ")
    }
}

/// Tenant administration: organizations and the modules each one has switched on.
#[component]
pub fn Organizations() -> Element {
    let auth = use_auth();
    let client = use_context::<ApiClient>();
    let toast = use_toast();
    let failures = use_action_failures();
    let mut search = use_debounced_search();

    let list_client = client.clone();
    let mut organizations = use_resource(move || {
        let client = list_client.clone();
        async move { api::organizations::list_organizations(&client).await }
    });

    let can_manage = auth.can_manage(Domain::Organizations);

    let mut show_form = use_signal(|| false);
    let mut editing: Signal<Option<i64>> = use_signal(|| None);
    let mut form = use_signal(OrganizationForm::default);
    let mut errors = use_signal(HashMap::<String, String>::new);
    let mut saving = use_signal(|| false);
    let mut deleting: Signal<Option<Organization>> = use_signal(|| None);
    let mut busy = use_signal(|| false);

    let finish = use_callback(move |result: Result<&'static str, AppError>| {
        saving.set(false);
        match result {
            Ok(msg) => {
                toast.success(msg.to_string(), ToastOptions::new());
                show_form.set(false);
                organizations.restart();
            }
            Err(err) => {
                errors.set(err.field_errors.clone());
                failures.report(err);
            }
        }
    });

    let save_client = client.clone();
    let handle_save = move |_: FormEvent| {
        let request = form.read().to_request();
        if let Err(err) = request.validate_request() {
            errors.set(err.field_errors);
            return;
        }
        errors.set(HashMap::new());
        saving.set(true);
        let client = save_client.clone();
        let id = editing();
        spawn(async move {
            let result = match id {
                Some(id) => api::organizations::update_organization(&client, id, &request)
                    .await
                    .map(|_| "Organization updated"),
                None => api::organizations::create_organization(&client, &request)
                    .await
                    .map(|_| "Organization created"),
            };
            finish.call(result);
        });
    };

    let delete_client = client.clone();
    let handle_delete = move |_| {
        let Some(org) = deleting() else { return };
        let client = delete_client.clone();
        spawn(async move {
            busy.set(true);
            match api::organizations::delete_organization(&client, org.id).await {
                Ok(()) => {
                    toast.success(format!("{} deleted", org.name), ToastOptions::new());
                    organizations.restart();
                }
                Err(err) => failures.report(err),
            }
            busy.set(false);
            deleting.set(None);
        });
    };

    let open_edit = use_callback(move |org: Organization| {
        form.set(OrganizationForm::from_request(&OrganizationRequest::from(&org)));
        editing.set(Some(org.id));
        errors.set(HashMap::new());
        show_form.set(true);
    });

    let errs = errors.read().clone();
    let draft = form.read().clone();
    let is_edit = editing().is_some();
    let query = search.query.read().clone();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./organizations.css") }

        div { class: "organizations-page",
            PageHeader {
                title: "Organizations".to_string(),
                subtitle: Some("Tenants and their enabled modules".to_string()),
                actions: can_manage.then(|| rsx! {
                    Button {
                        onclick: move |_| {
                            form.set(OrganizationForm::default());
                            editing.set(None);
                            errors.set(HashMap::new());
                            show_form.set(true);
                        },
                        "Add Organization"
                    }
                }),
            }

            SearchBar {
                SearchInput {
                    value: search.input.read().clone(),
                    placeholder: "Search by name, code or email".to_string(),
                    on_input: move |value: String| search.on_input(value),
                }
            }

            match &*organizations.read() {
                None => rsx! { SkeletonRows {} },
                Some(Err(err)) => rsx! {
                    ErrorPanel { error: err.clone(), on_retry: move |_| organizations.restart() }
                },
                Some(Ok(list)) => {
                    let visible = filter_by_query(list, &query);
                    rsx! {
                        DataTable {
                            DataTableHeader {
                                DataTableColumn { "Name" }
                                DataTableColumn { "Code" }
                                DataTableColumn { "Email" }
                                DataTableColumn { "Status" }
                                DataTableColumn { "Modules" }
                                if can_manage {
                                    DataTableColumn { "" }
                                }
                            }
                            DataTableBody {
                                if visible.is_empty() {
                                    DataTableEmpty { colspan: 6, message: "No organizations found.".to_string() }
                                }
                                for org in visible.into_iter().cloned() {
                                    DataTableRow { key: "{org.id}",
                                        DataTableCell { "{org.name}" }
                                        DataTableCell { code { "{org.code}" } }
                                        DataTableCell { {opt_text(org.email.as_deref())} }
                                        DataTableCell {
                                            if org.is_active {
                                                Badge { variant: BadgeVariant::Success, "Active" }
                                            } else {
                                                Badge { variant: BadgeVariant::Neutral, "Inactive" }
                                            }
                                        }
                                        DataTableCell { span { class: "org-modules", {enabled_modules(&org.modules)} } }
                                        if can_manage {
                                            DataTableCell {
                                                div { class: "row-actions",
                                                    Button {
                                                        variant: ButtonVariant::Ghost,
                                                        onclick: {
                                                            let org = org.clone();
                                                            move |_| open_edit.call(org.clone())
                                                        },
                                                        "Edit"
                                                    }
                                                    Button {
                                                        variant: ButtonVariant::Ghost,
                                                        onclick: {
                                                            let org = org.clone();
                                                            move |_| deleting.set(Some(org.clone()))
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
                    }
                }
            }

            Modal {
                open: show_form(),
                title: if is_edit { "Edit Organization".to_string() } else { "Add Organization".to_string() },
                size: ModalSize::Large,
                on_close: move |_| show_form.set(false),

                Form { onsubmit: handle_save,
                    FormRow {
                        Input {
                            label: "Name".to_string(),
                            value: draft.name.clone(),
                            required: true,
                            error: field_error(&errs, "name"),
                            on_input: move |evt: FormEvent| form.write().name = evt.value(),
                        }
                        Input {
                            label: "Code".to_string(),
                            value: draft.code.clone(),
                            required: true,
                            error: field_error(&errs, "code"),
                            on_input: move |evt: FormEvent| form.write().code = evt.value(),
                        }
                    }
                    FormRow {
                        Input {
                            label: "Email".to_string(),
                            input_type: "email".to_string(),
                            value: draft.email.clone(),
                            error: field_error(&errs, "email"),
                            on_input: move |evt: FormEvent| form.write().email = evt.value(),
                        }
                        Input {
                            label: "Phone".to_string(),
                            value: draft.phone.clone(),
                            on_input: move |evt: FormEvent| form.write().phone = evt.value(),
                        }
                    }
                    Input {
                        label: "Address".to_string(),
                        value: draft.address.clone(),
                        on_input: move |evt: FormEvent| form.write().address = evt.value(),
                    }
                    Input {
                        label: "Website".to_string(),
                        value: draft.website.clone(),
                        placeholder: "https://".to_string(),
                        on_input: move |evt: FormEvent| form.write().website = evt.value(),
                    }
                    CheckboxField {
                        label: "Organization is active".to_string(),
                        checked: draft.is_active,
                        on_change: move |on: bool| form.write().is_active = on,
                    }

                    fieldset { class: "org-module-toggles",
                        legend { "Enabled modules" }
                        for module in Module::ALL.iter().copied() {
                            CheckboxField {
                                key: "{module.label()}",
                                label: module.label().to_string(),
                                checked: draft.modules.is_enabled(module),
                                on_change: move |on: bool| form.write().modules.set(module, on),
                            }
                        }
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
                            if is_edit { "Save Changes" } else { "Create Organization" }
                        }
                    }
                }
            }

            ConfirmDialog {
                open: deleting.read().is_some(),
                title: "Delete organization".to_string(),
                message: deleting
                    .read()
                    .as_ref()
                    .map(|o| format!("Delete {} and all of its data?", o.name))
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

    #[test]
    fn form_normalizes_code_and_blanks() {
        let form = OrganizationForm {
            name: " Acme ".into(),
            code: "acme".into(),
            email: "  ".into(),
            ..Default::default()
        };
        let req = form.to_request();
        assert_eq!(req.name, "Acme");
        assert_eq!(req.code, "ACME");
        assert_eq!(req.email, None);
        assert!(req.is_active);
    }

    #[test]
    fn toggles_survive_the_form() {
        let mut req = OrganizationRequest {
            name: "Acme".into(),
            code: "ACME".into(),
            ..Default::default()
        };
        req.modules.set(Module::Payroll, false);
        assert_eq!(OrganizationForm::from_request(&req).to_request(), req);
    }

    #[test]
    fn module_summary_lists_enabled_labels() {
        let mut toggles = ModuleToggles::default();
        for m in Module::ALL {
            toggles.set(*m, false);
        }
        assert_eq!(enabled_modules(&toggles), "None");
        toggles.set(Module::Leave, true);
        toggles.set(Module::Training, true);
        assert_eq!(enabled_modules(&toggles), "Leave, Training");
    }
}
