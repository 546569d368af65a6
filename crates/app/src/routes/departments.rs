use std::collections::HashMap;

use api::ApiClient;
use dioxus::prelude::*;
use shared_types::{
    filter_by_query, parent_name, AppError, Department, DepartmentRequest, Domain, ValidateRequest,
};
use shared_ui::{
    use_toast, Badge, BadgeVariant, Button, ButtonVariant, CheckboxField, ConfirmDialog, DataTable,
    DataTableBody, DataTableCell, DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow,
    Form, FormRow, FormSelect, Input, Modal, ModalSize, PageHeader, SearchBar, SearchInput,
    SkeletonRows, Textarea, ToastOptions,
};

use crate::auth::use_auth;
use crate::components::ErrorPanel;
use crate::format_helpers::{blank_to_none, format_money, opt_number, parse_opt_f64, parse_opt_i64};
use crate::hooks::{field_error, use_action_failures, use_debounced_search};

#[derive(Debug, Clone, PartialEq)]
struct DepartmentForm {
    name: String,
    code: String,
    description: String,
    organization_id: Option<i64>,
    parent_id: String,
    manager_id: String,
    budget: String,
    max_headcount: String,
    working_hours_start: String,
    working_hours_end: String,
    is_active: bool,
}

impl DepartmentForm {
    fn blank(organization_id: Option<i64>) -> Self {
        Self::from_request(&DepartmentRequest {
            organization_id,
            is_active: true,
            ..Default::default()
        })
    }

    fn from_request(req: &DepartmentRequest) -> Self {
        Self {
            name: req.name.clone(),
            code: req.code.clone(),
            description: req.description.clone().unwrap_or_default(),
            organization_id: req.organization_id,
            parent_id: opt_number(req.parent_id),
            manager_id: opt_number(req.manager_id),
            budget: opt_number(req.budget),
            max_headcount: opt_number(req.max_headcount),
            working_hours_start: req.working_hours_start.clone().unwrap_or_default(),
            working_hours_end: req.working_hours_end.clone().unwrap_or_default(),
            is_active: req.is_active,
        }
    }

    fn to_request(&self) -> DepartmentRequest {
        DepartmentRequest {
            name: self.name.trim().to_string(),
            code: self.code.trim().to_uppercase(),
            description: blank_to_none(&self.description),
            organization_id: self.organization_id,
            parent_id: parse_opt_i64(&self.parent_id),
            manager_id: parse_opt_i64(&self.manager_id),
            budget: parse_opt_f64(&self.budget),
            max_headcount: self.max_headcount.trim().parse().ok(),
            working_hours_start: blank_to_none(&self.working_hours_start),
            working_hours_end: blank_to_none(&self.working_hours_end),
            is_active: self.is_active,
        }
    }
}

fn hours(dept: &Department) -> String {
    match (&dept.working_hours_start, &dept.working_hours_end) {
        (Some(start), Some(end)) => format!("{start} - {end}"),
        _ => "-".to_string(),
    }
}

/// Department tree with headcount, budget and working hours.
#[component]
pub fn Departments() -> Element {
    let auth = use_auth();
    let client = use_context::<ApiClient>();
    let toast = use_toast();
    let failures = use_action_failures();
    let mut search = use_debounced_search();

    let list_client = client.clone();
    let mut departments = use_resource(move || {
        let client = list_client.clone();
        async move { api::departments::list_departments(&client).await }
    });

    let can_manage = auth.can_manage(Domain::Departments);
    let own_org = auth.current_user.read().as_ref().and_then(|u| u.organization_id);

    let mut show_form = use_signal(|| false);
    let mut editing: Signal<Option<i64>> = use_signal(|| None);
    let mut form = use_signal(|| DepartmentForm::blank(None));
    let mut errors = use_signal(HashMap::<String, String>::new);
    let mut saving = use_signal(|| false);
    let mut deleting: Signal<Option<Department>> = use_signal(|| None);
    let mut busy = use_signal(|| false);

    let finish = use_callback(move |result: Result<&'static str, AppError>| {
        saving.set(false);
        match result {
            Ok(msg) => {
                toast.success(msg.to_string(), ToastOptions::new());
                show_form.set(false);
                departments.restart();
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
                Some(id) => api::departments::update_department(&client, id, &request)
                    .await
                    .map(|_| "Department updated"),
                None => api::departments::create_department(&client, &request)
                    .await
                    .map(|_| "Department created"),
            };
            finish.call(result);
        });
    };

    let delete_client = client.clone();
    let handle_delete = move |_| {
        let Some(dept) = deleting() else { return };
        let client = delete_client.clone();
        spawn(async move {
            busy.set(true);
            match api::departments::delete_department(&client, dept.id).await {
                Ok(()) => {
                    toast.success(format!("{} deleted", dept.name), ToastOptions::new());
                    departments.restart();
                }
                Err(err) => failures.report(err),
            }
            busy.set(false);
            deleting.set(None);
        });
    };

    let open_edit = use_callback(move |dept: Department| {
        form.set(DepartmentForm::from_request(&DepartmentRequest::from(&dept)));
        editing.set(Some(dept.id));
        errors.set(HashMap::new());
        show_form.set(true);
    });

    let all: Vec<Department> = departments
        .read()
        .as_ref()
        .and_then(|r| r.as_ref().ok())
        .cloned()
        .unwrap_or_default();
    let errs = errors.read().clone();
    let draft = form.read().clone();
    let is_edit = editing().is_some();
    let editing_id = editing();
    let query = search.query.read().clone();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./departments.css") }

        div { class: "departments-page",
            PageHeader {
                title: "Departments".to_string(),
                actions: can_manage.then(|| rsx! {
                    Button {
                        onclick: move |_| {
                            form.set(DepartmentForm::blank(own_org));
                            editing.set(None);
                            errors.set(HashMap::new());
                            show_form.set(true);
                        },
                        "Add Department"
                    }
                }),
            }

            SearchBar {
                SearchInput {
                    value: search.input.read().clone(),
                    placeholder: "Search by name, code or description".to_string(),
                    on_input: move |value: String| search.on_input(value),
                }
            }

            match &*departments.read() {
                None => rsx! { SkeletonRows {} },
                Some(Err(err)) => rsx! {
                    ErrorPanel { error: err.clone(), on_retry: move |_| departments.restart() }
                },
                Some(Ok(list)) => {
                    let visible = filter_by_query(list, &query);
                    rsx! {
                        DataTable {
                            DataTableHeader {
                                DataTableColumn { "Name" }
                                DataTableColumn { "Code" }
                                DataTableColumn { "Parent" }
                                DataTableColumn { "Headcount" }
                                DataTableColumn { "Budget" }
                                DataTableColumn { "Hours" }
                                DataTableColumn { "Status" }
                                if can_manage {
                                    DataTableColumn { "" }
                                }
                            }
                            DataTableBody {
                                if visible.is_empty() {
                                    DataTableEmpty { colspan: 8, message: "No departments found.".to_string() }
                                }
                                for dept in visible.into_iter().cloned() {
                                    DataTableRow { key: "{dept.id}",
                                        DataTableCell { "{dept.name}" }
                                        DataTableCell { code { "{dept.code}" } }
                                        DataTableCell { {parent_name(&dept, list).unwrap_or("-").to_string()} }
                                        DataTableCell {
                                            {
                                                match (dept.employee_count, dept.max_headcount) {
                                                    (Some(n), Some(max)) => format!("{n} / {max}"),
                                                    (Some(n), None) => n.to_string(),
                                                    (None, Some(max)) => format!("- / {max}"),
                                                    (None, None) => "-".to_string(),
                                                }
                                            }
                                        }
                                        DataTableCell { {dept.budget.map(format_money).unwrap_or_else(|| "-".to_string())} }
                                        DataTableCell { {hours(&dept)} }
                                        DataTableCell {
                                            if dept.is_active {
                                                Badge { variant: BadgeVariant::Success, "Active" }
                                            } else {
                                                Badge { variant: BadgeVariant::Neutral, "Inactive" }
                                            }
                                        }
                                        if can_manage {
                                            DataTableCell {
                                                div { class: "row-actions",
                                                    Button {
                                                        variant: ButtonVariant::Ghost,
                                                        onclick: {
                                                            let dept = dept.clone();
                                                            move |_| open_edit.call(dept.clone())
                                                        },
                                                        "Edit"
                                                    }
                                                    Button {
                                                        variant: ButtonVariant::Ghost,
                                                        onclick: {
                                                            let dept = dept.clone();
                                                            move |_| deleting.set(Some(dept.clone()))
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
                title: if is_edit { "Edit Department".to_string() } else { "Add Department".to_string() },
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
                    Textarea {
                        label: "Description".to_string(),
                        value: draft.description.clone(),
                        on_input: move |evt: FormEvent| form.write().description = evt.value(),
                    }
                    FormRow {
                        FormSelect {
                            label: "Parent department".to_string(),
                            value: draft.parent_id.clone(),
                            onchange: move |evt: Event<FormData>| form.write().parent_id = evt.value(),
                            option { value: "", "None" }
                            for dept in all.iter().filter(|d| Some(d.id) != editing_id) {
                                option { key: "{dept.id}", value: "{dept.id}", "{dept.name}" }
                            }
                        }
                        Input {
                            label: "Manager user ID".to_string(),
                            input_type: "number".to_string(),
                            value: draft.manager_id.clone(),
                            on_input: move |evt: FormEvent| form.write().manager_id = evt.value(),
                        }
                    }
                    FormRow {
                        Input {
                            label: "Budget".to_string(),
                            input_type: "number".to_string(),
                            value: draft.budget.clone(),
                            error: field_error(&errs, "budget"),
                            on_input: move |evt: FormEvent| form.write().budget = evt.value(),
                        }
                        Input {
                            label: "Max headcount".to_string(),
                            input_type: "number".to_string(),
                            value: draft.max_headcount.clone(),
                            error: field_error(&errs, "max_headcount"),
                            on_input: move |evt: FormEvent| form.write().max_headcount = evt.value(),
                        }
                    }
                    FormRow {
                        Input {
                            label: "Working hours start".to_string(),
                            input_type: "time".to_string(),
                            value: draft.working_hours_start.clone(),
                            on_input: move |evt: FormEvent| form.write().working_hours_start = evt.value(),
                        }
                        Input {
                            label: "Working hours end".to_string(),
                            input_type: "time".to_string(),
                            value: draft.working_hours_end.clone(),
                            on_input: move |evt: FormEvent| form.write().working_hours_end = evt.value(),
                        }
                    }
                    CheckboxField {
                        label: "Department is active".to_string(),
                        checked: draft.is_active,
                        on_change: move |on: bool| form.write().is_active = on,
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
                            if is_edit { "Save Changes" } else { "Create Department" }
                        }
                    }
                }
            }

            ConfirmDialog {
                open: deleting.read().is_some(),
                title: "Delete department".to_string(),
                message: deleting
                    .read()
                    .as_ref()
                    .map(|d| format!("Delete {}? Employees keep their records but lose the assignment.", d.name))
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
    fn new_departments_start_active_in_the_callers_org() {
        let req = DepartmentForm::blank(Some(5)).to_request();
        assert!(req.is_active);
        assert_eq!(req.organization_id, Some(5));
    }

    #[test]
    fn numeric_fields_parse_or_drop() {
        let mut form = DepartmentForm::blank(None);
        form.name = "Ops".into();
        form.code = "ops".into();
        form.budget = "12,000".into();
        form.max_headcount = "x".into();
        form.parent_id = "2".into();
        let req = form.to_request();
        assert_eq!(req.code, "OPS");
        assert_eq!(req.budget, Some(12000.0));
        assert_eq!(req.max_headcount, None);
        assert_eq!(req.parent_id, Some(2));
    }

    #[test]
    fn negative_headcount_is_rejected() {
        let mut form = DepartmentForm::blank(None);
        form.name = "Ops".into();
        form.code = "OPS".into();
        form.max_headcount = "-3".into();
        let err = form.to_request().validate_request().unwrap_err();
        assert!(err.field_errors.contains_key("max_headcount"));
    }
}
