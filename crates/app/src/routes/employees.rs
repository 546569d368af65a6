use std::collections::HashMap;

use api::ApiClient;
use dioxus::prelude::*;
use shared_types::{
    AppError, Department, Domain, Employee, EmployeeFilter, EmployeeRequest, EmployeeStatus,
    EmploymentType, ValidateRequest,
};
use shared_ui::{
    use_toast, Button, ButtonVariant, ConfirmDialog, DataTable, DataTableBody, DataTableCell,
    DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow, Form, FormRow, FormSelect,
    Input, Modal, ModalSize, PageHeader, SearchBar, SearchInput, SkeletonRows, StatusBadge, TabBar,
    TabItem, ToastOptions,
};

use crate::auth::use_auth;
use crate::components::ErrorPanel;
use crate::format_helpers::{
    blank_to_none, date_input_value, format_opt_date, opt_number, opt_text, parse_date,
    parse_opt_f64, parse_opt_i64,
};
use crate::hooks::{field_error, use_action_failures, use_debounced_search};

#[derive(Debug, Clone, Default, PartialEq)]
struct EmployeeForm {
    employee_number: String,
    first_name: String,
    last_name: String,
    email: String,
    department_id: String,
    job_title: String,
    hire_date: String,
    salary: String,
    status: String,
    employment_type: String,
}

impl EmployeeForm {
    fn from_request(req: &EmployeeRequest) -> Self {
        Self {
            employee_number: req.employee_number.clone(),
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            email: req.email.clone(),
            department_id: opt_number(req.department_id),
            job_title: req.job_title.clone().unwrap_or_default(),
            hire_date: date_input_value(req.hire_date),
            salary: opt_number(req.salary),
            status: req.status.as_str().to_string(),
            employment_type: req.employment_type.as_str().to_string(),
        }
    }

    fn to_request(&self) -> EmployeeRequest {
        EmployeeRequest {
            employee_number: self.employee_number.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            department_id: parse_opt_i64(&self.department_id),
            job_title: blank_to_none(&self.job_title),
            hire_date: parse_date(&self.hire_date),
            salary: parse_opt_f64(&self.salary),
            status: EmployeeStatus::parse(&self.status).unwrap_or(EmployeeStatus::Active),
            employment_type: EmploymentType::parse(&self.employment_type)
                .unwrap_or(EmploymentType::FullTime),
        }
    }
}

fn department_name(departments: &[Department], id: Option<i64>) -> String {
    id.and_then(|id| departments.iter().find(|d| d.id == id))
        .map(|d| d.name.clone())
        .unwrap_or_else(|| "-".to_string())
}

/// Employee directory. Search, department and status filters are applied by the API.
#[component]
pub fn Employees() -> Element {
    let auth = use_auth();
    let client = use_context::<ApiClient>();
    let toast = use_toast();
    let failures = use_action_failures();
    let mut search = use_debounced_search();
    let mut status_tab = use_signal(|| "all".to_string());
    let mut department_filter = use_signal(String::new);

    let list_client = client.clone();
    let mut employees = use_resource(move || {
        let client = list_client.clone();
        let filter = EmployeeFilter::new(
            &search.query.read(),
            parse_opt_i64(&department_filter.read()),
            EmployeeStatus::parse(&status_tab.read()),
        );
        async move { api::employees::list_employees(&client, &filter).await }
    });

    let dept_client = client.clone();
    let departments = use_resource(move || {
        let client = dept_client.clone();
        async move { api::departments::list_departments(&client).await }
    });

    let can_manage = auth.can_manage(Domain::Employees);

    let mut show_form = use_signal(|| false);
    let mut editing: Signal<Option<i64>> = use_signal(|| None);
    let mut form = use_signal(EmployeeForm::default);
    let mut errors = use_signal(HashMap::<String, String>::new);
    let mut saving = use_signal(|| false);
    let mut deleting: Signal<Option<Employee>> = use_signal(|| None);
    let mut busy = use_signal(|| false);

    let finish = use_callback(move |result: Result<&'static str, AppError>| {
        saving.set(false);
        match result {
            Ok(msg) => {
                toast.success(msg.to_string(), ToastOptions::new());
                show_form.set(false);
                employees.restart();
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
                Some(id) => api::employees::update_employee(&client, id, &request)
                    .await
                    .map(|_| "Employee updated"),
                None => api::employees::create_employee(&client, &request)
                    .await
                    .map(|_| "Employee created"),
            };
            finish.call(result);
        });
    };

    let delete_client = client.clone();
    let handle_delete = move |_| {
        let Some(employee) = deleting() else { return };
        let client = delete_client.clone();
        spawn(async move {
            busy.set(true);
            match api::employees::delete_employee(&client, employee.id).await {
                Ok(()) => {
                    toast.success(format!("{} removed", employee.full_name()), ToastOptions::new());
                    employees.restart();
                }
                Err(err) => failures.report(err),
            }
            busy.set(false);
            deleting.set(None);
        });
    };

    let open_edit = use_callback(move |employee: Employee| {
        form.set(EmployeeForm::from_request(&EmployeeRequest::from(&employee)));
        editing.set(Some(employee.id));
        errors.set(HashMap::new());
        show_form.set(true);
    });

    let dept_list: Vec<Department> = departments
        .read()
        .as_ref()
        .and_then(|r| r.as_ref().ok())
        .cloned()
        .unwrap_or_default();

    let mut tabs = vec![TabItem::new("all", "All")];
    tabs.extend(EmployeeStatus::ALL.iter().map(|s| TabItem::new(s.as_str(), s.label())));

    let errs = errors.read().clone();
    let draft = form.read().clone();
    let is_edit = editing().is_some();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./employees.css") }

        div { class: "employees-page",
            PageHeader {
                title: "Employees".to_string(),
                actions: can_manage.then(|| rsx! {
                    Button {
                        onclick: move |_| {
                            form.set(EmployeeForm::from_request(&EmployeeRequest::default()));
                            editing.set(None);
                            errors.set(HashMap::new());
                            show_form.set(true);
                        },
                        "Add Employee"
                    }
                }),
            }

            SearchBar {
                SearchInput {
                    value: search.input.read().clone(),
                    placeholder: "Search name, email, number or title".to_string(),
                    on_input: move |value: String| search.on_input(value),
                }
                FormSelect {
                    value: department_filter.read().clone(),
                    onchange: move |evt: Event<FormData>| department_filter.set(evt.value()),
                    option { value: "", "All departments" }
                    for dept in dept_list.iter() {
                        option { key: "{dept.id}", value: "{dept.id}", "{dept.name}" }
                    }
                }
            }

            TabBar {
                tabs,
                active: status_tab.read().clone(),
                on_select: move |value: String| status_tab.set(value),
            }

            match &*employees.read() {
                None => rsx! { SkeletonRows {} },
                Some(Err(err)) => rsx! {
                    ErrorPanel { error: err.clone(), on_retry: move |_| employees.restart() }
                },
                Some(Ok(list)) => rsx! {
                    DataTable {
                        DataTableHeader {
                            DataTableColumn { "Number" }
                            DataTableColumn { "Name" }
                            DataTableColumn { "Job Title" }
                            DataTableColumn { "Department" }
                            DataTableColumn { "Type" }
                            DataTableColumn { "Hired" }
                            DataTableColumn { "Status" }
                            if can_manage {
                                DataTableColumn { "" }
                            }
                        }
                        DataTableBody {
                            if list.is_empty() {
                                DataTableEmpty { colspan: 8, message: "No employees match the current filters.".to_string() }
                            }
                            for employee in list.iter().cloned() {
                                DataTableRow { key: "{employee.id}",
                                    DataTableCell { code { "{employee.employee_number}" } }
                                    DataTableCell {
                                        div { class: "employee-name",
                                            span { "{employee.full_name()}" }
                                            span { class: "employee-email", "{employee.email}" }
                                        }
                                    }
                                    DataTableCell { {opt_text(employee.job_title.as_deref())} }
                                    DataTableCell { {department_name(&dept_list, employee.department_id)} }
                                    DataTableCell { "{employee.employment_type.label()}" }
                                    DataTableCell { {format_opt_date(employee.hire_date)} }
                                    DataTableCell {
                                        StatusBadge {
                                            status: employee.status.as_str().to_string(),
                                            label: employee.status.label().to_string(),
                                        }
                                    }
                                    if can_manage {
                                        DataTableCell {
                                            div { class: "row-actions",
                                                Button {
                                                    variant: ButtonVariant::Ghost,
                                                    onclick: {
                                                        let employee = employee.clone();
                                                        move |_| open_edit.call(employee.clone())
                                                    },
                                                    "Edit"
                                                }
                                                Button {
                                                    variant: ButtonVariant::Ghost,
                                                    onclick: {
                                                        let employee = employee.clone();
                                                        move |_| deleting.set(Some(employee.clone()))
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
                title: if is_edit { "Edit Employee".to_string() } else { "Add Employee".to_string() },
                size: ModalSize::Large,
                on_close: move |_| show_form.set(false),

                Form { onsubmit: handle_save,
                    FormRow {
                        Input {
                            label: "Employee number".to_string(),
                            value: draft.employee_number.clone(),
                            required: true,
                            error: field_error(&errs, "employee_number"),
                            on_input: move |evt: FormEvent| form.write().employee_number = evt.value(),
                        }
                        Input {
                            label: "Email".to_string(),
                            input_type: "email".to_string(),
                            value: draft.email.clone(),
                            required: true,
                            error: field_error(&errs, "email"),
                            on_input: move |evt: FormEvent| form.write().email = evt.value(),
                        }
                    }
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
                    FormRow {
                        Input {
                            label: "Job title".to_string(),
                            value: draft.job_title.clone(),
                            on_input: move |evt: FormEvent| form.write().job_title = evt.value(),
                        }
                        FormSelect {
                            label: "Department".to_string(),
                            value: draft.department_id.clone(),
                            onchange: move |evt: Event<FormData>| form.write().department_id = evt.value(),
                            option { value: "", "Unassigned" }
                            for dept in dept_list.iter() {
                                option { key: "{dept.id}", value: "{dept.id}", "{dept.name}" }
                            }
                        }
                    }
                    FormRow {
                        Input {
                            label: "Hire date".to_string(),
                            input_type: "date".to_string(),
                            value: draft.hire_date.clone(),
                            on_input: move |evt: FormEvent| form.write().hire_date = evt.value(),
                        }
                        Input {
                            label: "Salary".to_string(),
                            input_type: "number".to_string(),
                            value: draft.salary.clone(),
                            error: field_error(&errs, "salary"),
                            on_input: move |evt: FormEvent| form.write().salary = evt.value(),
                        }
                    }
                    FormRow {
                        FormSelect {
                            label: "Employment type".to_string(),
                            value: draft.employment_type.clone(),
                            onchange: move |evt: Event<FormData>| form.write().employment_type = evt.value(),
                            for kind in EmploymentType::ALL {
                                option { key: "{kind.as_str()}", value: kind.as_str(), "{kind.label()}" }
                            }
                        }
                        FormSelect {
                            label: "Status".to_string(),
                            value: draft.status.clone(),
                            onchange: move |evt: Event<FormData>| form.write().status = evt.value(),
                            for status in EmployeeStatus::ALL {
                                option { key: "{status.as_str()}", value: status.as_str(), "{status.label()}" }
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
                            if is_edit { "Save Changes" } else { "Create Employee" }
                        }
                    }
                }
            }

            ConfirmDialog {
                open: deleting.read().is_some(),
                title: "Delete employee".to_string(),
                message: deleting
                    .read()
                    .as_ref()
                    .map(|e| format!("Delete the record for {}?", e.full_name()))
                    .unwrap_or_default(),
                busy: busy(),
                on_confirm: handle_delete,
                on_cancel: move |_| deleting.set(None),
            }
        }
    }
}
