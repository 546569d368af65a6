use std::collections::HashMap;

use api::ApiClient;
use dioxus::prelude::*;
use shared_types::{
    flatten_payroll_error, parse_amount, AppError, DateRange, Domain, Employee, EmployeeFilter,
    Module, PayrollAmounts, PayrollField, PayrollRecord, PayrollRequest, PayrollStatus,
};
use shared_ui::{
    use_toast, Banner, BannerTone, Button, ButtonVariant, ConfirmDialog, DataTable, DataTableBody,
    DataTableCell, DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow, Form, FormRow,
    FormSelect, Input, Modal, ModalSize, PageHeader, SkeletonRows, StatCard, StatGrid, StatusBadge,
    ToastOptions,
};

use crate::auth::use_auth;
use crate::components::{ErrorPanel, ModuleGate};
use crate::format_helpers::{
    date_input_value, format_date, format_money, format_opt_date, opt_text, parse_date,
    parse_opt_i64, today,
};
use crate::hooks::use_action_failures;

const ALL_FIELDS: [PayrollField; 10] = [
    PayrollField::BasicSalary,
    PayrollField::HousingAllowance,
    PayrollField::TransportAllowance,
    PayrollField::MealAllowance,
    PayrollField::OtherAllowances,
    PayrollField::Tax,
    PayrollField::Pension,
    PayrollField::HealthInsurance,
    PayrollField::LoanDeduction,
    PayrollField::OtherDeductions,
];

/// Payroll form state. Money inputs stay as typed so the preview can follow
/// every keystroke without rewriting what the user sees.
#[derive(Debug, Clone, PartialEq)]
struct PayrollForm {
    employee_id: String,
    period_start: String,
    period_end: String,
    status: String,
    payment_date: String,
    raw: HashMap<&'static str, String>,
}

impl PayrollForm {
    fn blank() -> Self {
        let month = DateRange::month_of(today());
        Self {
            employee_id: String::new(),
            period_start: date_input_value(Some(month.start_date)),
            period_end: date_input_value(Some(month.end_date)),
            status: PayrollStatus::Draft.as_str().to_string(),
            payment_date: String::new(),
            raw: HashMap::new(),
        }
    }

    fn from_record(record: &PayrollRecord) -> Self {
        let raw = ALL_FIELDS
            .iter()
            .map(|f| (f.key(), format!("{:.2}", record.amounts.get(*f))))
            .collect();
        Self {
            employee_id: record.employee_id.to_string(),
            period_start: date_input_value(Some(record.period_start)),
            period_end: date_input_value(Some(record.period_end)),
            status: record.status.as_str().to_string(),
            payment_date: date_input_value(record.payment_date),
            raw,
        }
    }

    /// Store what was typed for `field`. A negative amount is replaced by
    /// 0 so the box shows the value the preview and request use.
    fn set_raw(&mut self, field: PayrollField, value: String) {
        let value = if value.trim_start().starts_with('-') {
            "0".to_string()
        } else {
            value
        };
        self.raw.insert(field.key(), value);
    }

    fn raw(&self, field: PayrollField) -> String {
        self.raw.get(field.key()).cloned().unwrap_or_default()
    }

    /// Amounts as they would be sent, negatives and junk already at 0.
    fn amounts(&self) -> PayrollAmounts {
        let mut amounts = PayrollAmounts::default();
        for field in ALL_FIELDS {
            amounts.set(field, parse_amount(&self.raw(field)));
        }
        amounts
    }

    fn to_request(&self) -> Result<PayrollRequest, HashMap<String, String>> {
        let mut errors = HashMap::new();
        let employee_id = parse_opt_i64(&self.employee_id);
        let start = parse_date(&self.period_start);
        let end = parse_date(&self.period_end);
        if employee_id.is_none() {
            errors.insert("employee_id".to_string(), "Select an employee".to_string());
        }
        if start.is_none() {
            errors.insert("period_start".to_string(), "Period start is required".to_string());
        }
        if end.is_none() {
            errors.insert("period_end".to_string(), "Period end is required".to_string());
        }
        match (employee_id, start, end) {
            (Some(employee_id), Some(period_start), Some(period_end)) if period_start <= period_end => {
                Ok(PayrollRequest {
                    employee_id,
                    period_start,
                    period_end,
                    amounts: self.amounts(),
                    status: PayrollStatus::parse(&self.status).unwrap_or(PayrollStatus::Draft),
                    payment_date: parse_date(&self.payment_date),
                })
            }
            (_, Some(_), Some(_)) if errors.is_empty() => {
                errors.insert(
                    "period_end".to_string(),
                    "Period end must not be before its start".to_string(),
                );
                Err(errors)
            }
            _ => Err(errors),
        }
    }
}

fn employee_label(employees: &[Employee], id: i64) -> String {
    employees
        .iter()
        .find(|e| e.id == id)
        .map(|e| format!("{} ({})", e.full_name(), e.employee_number))
        .unwrap_or_else(|| format!("Employee #{id}"))
}

/// Payroll runs per period with a live net salary preview.
#[component]
pub fn Payroll() -> Element {
    rsx! {
        ModuleGate { module: Module::Payroll,
            PayrollBoard {}
        }
    }
}

#[component]
fn PayrollBoard() -> Element {
    let auth = use_auth();
    let client = use_context::<ApiClient>();
    let toast = use_toast();
    let failures = use_action_failures();
    // "YYYY-MM", blank for every period.
    let mut period = use_signal(|| today().format("%Y-%m").to_string());

    let list_client = client.clone();
    let mut records = use_resource(move || {
        let client = list_client.clone();
        let range = parse_date(&format!("{}-01", &*period.read())).map(DateRange::month_of);
        async move { api::payroll::list_payroll(&client, range.as_ref()).await }
    });

    let emp_client = client.clone();
    let employees = use_resource(move || {
        let client = emp_client.clone();
        async move { api::employees::list_employees(&client, &EmployeeFilter::default()).await }
    });

    let can_manage = auth.can_manage(Domain::Payroll);

    let mut show_form = use_signal(|| false);
    let mut editing: Signal<Option<i64>> = use_signal(|| None);
    let mut form = use_signal(PayrollForm::blank);
    let mut errors = use_signal(HashMap::<String, String>::new);
    let mut form_error: Signal<Option<String>> = use_signal(|| None);
    let mut saving = use_signal(|| false);
    let mut deleting: Signal<Option<PayrollRecord>> = use_signal(|| None);
    let mut busy = use_signal(|| false);

    let save_client = client.clone();
    let handle_save = move |_: FormEvent| {
        let request = match form.read().to_request() {
            Ok(request) => request,
            Err(field_errors) => {
                errors.set(field_errors);
                return;
            }
        };
        errors.set(HashMap::new());
        form_error.set(None);
        let client = save_client.clone();
        let id = editing();
        spawn(async move {
            saving.set(true);
            let result = match id {
                Some(id) => api::payroll::update_payroll(&client, id, &request).await,
                None => api::payroll::create_payroll(&client, &request).await,
            };
            match result.map_err(flatten_payroll_error) {
                Ok(saved) => {
                    let msg = format!("Payroll saved, net {}", format_money(saved.net_salary));
                    toast.success(msg, ToastOptions::new());
                    show_form.set(false);
                    records.restart();
                }
                Err(err) => {
                    errors.set(err.field_errors.clone());
                    form_error.set(Some(err.message));
                }
            }
            saving.set(false);
        });
    };

    let delete_client = client.clone();
    let handle_delete = move |_| {
        let Some(record) = deleting() else { return };
        let client = delete_client.clone();
        spawn(async move {
            busy.set(true);
            match api::payroll::delete_payroll(&client, record.id).await {
                Ok(()) => {
                    toast.success("Payroll record deleted".to_string(), ToastOptions::new());
                    records.restart();
                }
                Err(err) => failures.report(err),
            }
            busy.set(false);
            deleting.set(None);
        });
    };

    let open_form = use_callback(move |record: Option<PayrollRecord>| {
        match &record {
            Some(r) => form.set(PayrollForm::from_record(r)),
            None => form.set(PayrollForm::blank()),
        }
        editing.set(record.map(|r| r.id));
        errors.set(HashMap::new());
        form_error.set(None);
        show_form.set(true);
    });

    let staff: Vec<Employee> = employees
        .read()
        .as_ref()
        .and_then(|r: &Result<Vec<Employee>, AppError>| r.as_ref().ok())
        .cloned()
        .unwrap_or_default();
    let errs = errors.read().clone();
    let draft = form.read().clone();
    let preview = draft.amounts();
    let is_edit = editing().is_some();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./payroll.css") }

        div { class: "payroll-page",
            PageHeader {
                title: "Payroll".to_string(),
                actions: rsx! {
                    div { class: "payroll-actions",
                        Input {
                            input_type: "month".to_string(),
                            value: period.read().clone(),
                            on_input: move |evt: FormEvent| period.set(evt.value()),
                        }
                        if can_manage {
                            Button { onclick: move |_| open_form.call(None), "New Payroll" }
                        }
                    }
                },
            }

            match &*records.read() {
                None => rsx! { SkeletonRows {} },
                Some(Err(err)) => rsx! {
                    ErrorPanel { error: err.clone(), on_retry: move |_| records.restart() }
                },
                Some(Ok(list)) => {
                    let total_net: f64 = list.iter().map(|r| r.net_salary).sum();
                    let unpaid = list.iter().filter(|r| r.status != PayrollStatus::Paid).count();
                    rsx! {
                        StatGrid {
                            StatCard { label: "Records".to_string(), value: list.len().to_string() }
                            StatCard { label: "Total Net".to_string(), value: format_money(total_net) }
                            StatCard { label: "Awaiting Payment".to_string(), value: unpaid.to_string() }
                        }

                        DataTable {
                            DataTableHeader {
                                DataTableColumn { "Employee" }
                                DataTableColumn { "Period" }
                                DataTableColumn { "Gross" }
                                DataTableColumn { "Deductions" }
                                DataTableColumn { "Net" }
                                DataTableColumn { "Paid On" }
                                DataTableColumn { "Status" }
                                if can_manage {
                                    DataTableColumn { "" }
                                }
                            }
                            DataTableBody {
                                if list.is_empty() {
                                    DataTableEmpty { colspan: 8, message: "No payroll records for this period.".to_string() }
                                }
                                for record in list.iter().cloned() {
                                    DataTableRow { key: "{record.id}",
                                        DataTableCell {
                                            {record.employee_name.clone().unwrap_or_else(|| employee_label(&staff, record.employee_id))}
                                        }
                                        DataTableCell {
                                            {format!("{} - {}", format_date(record.period_start), format_date(record.period_end))}
                                        }
                                        DataTableCell { {format_money(record.amounts.gross())} }
                                        DataTableCell { {format_money(record.amounts.total_deductions())} }
                                        DataTableCell { strong { {format_money(record.net_salary)} } }
                                        DataTableCell { {format_opt_date(record.payment_date)} }
                                        DataTableCell {
                                            StatusBadge {
                                                status: record.status.as_str().to_string(),
                                                label: record.status.label().to_string(),
                                            }
                                        }
                                        if can_manage {
                                            DataTableCell {
                                                div { class: "row-actions",
                                                    Button {
                                                        variant: ButtonVariant::Ghost,
                                                        onclick: {
                                                            let record = record.clone();
                                                            move |_| open_form.call(Some(record.clone()))
                                                        },
                                                        "Edit"
                                                    }
                                                    Button {
                                                        variant: ButtonVariant::Ghost,
                                                        onclick: {
                                                            let record = record.clone();
                                                            move |_| deleting.set(Some(record.clone()))
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
                title: if is_edit { "Edit Payroll".to_string() } else { "New Payroll".to_string() },
                size: ModalSize::Large,
                on_close: move |_| show_form.set(false),

                Form { onsubmit: handle_save,
                    if let Some(msg) = form_error() {
                        Banner { tone: BannerTone::Error, message: msg }
                    }
                    FormRow {
                        FormSelect {
                            label: "Employee".to_string(),
                            value: draft.employee_id.clone(),
                            disabled: is_edit,
                            onchange: move |evt: Event<FormData>| form.write().employee_id = evt.value(),
                            option { value: "", "Select employee" }
                            for e in staff.iter() {
                                option { key: "{e.id}", value: "{e.id}", {format!("{} ({})", e.full_name(), e.employee_number)} }
                            }
                        }
                        FormSelect {
                            label: "Status".to_string(),
                            value: draft.status.clone(),
                            onchange: move |evt: Event<FormData>| form.write().status = evt.value(),
                            for status in PayrollStatus::ALL {
                                option { key: "{status.as_str()}", value: status.as_str(), "{status.label()}" }
                            }
                        }
                    }
                    if let Some(msg) = errs.get("employee_id") {
                        p { class: "field-error", "{msg}" }
                    }
                    FormRow {
                        Input {
                            label: "Period start".to_string(),
                            input_type: "date".to_string(),
                            value: draft.period_start.clone(),
                            error: errs.get("period_start").cloned(),
                            on_input: move |evt: FormEvent| form.write().period_start = evt.value(),
                        }
                        Input {
                            label: "Period end".to_string(),
                            input_type: "date".to_string(),
                            value: draft.period_end.clone(),
                            error: errs.get("period_end").cloned(),
                            on_input: move |evt: FormEvent| form.write().period_end = evt.value(),
                        }
                        Input {
                            label: "Payment date".to_string(),
                            input_type: "date".to_string(),
                            value: draft.payment_date.clone(),
                            on_input: move |evt: FormEvent| form.write().payment_date = evt.value(),
                        }
                    }

                    div { class: "payroll-amounts",
                        div { class: "payroll-column",
                            h3 { "Earnings" }
                            for field in std::iter::once(PayrollField::BasicSalary).chain(PayrollField::ALLOWANCES.iter().copied()) {
                                Input {
                                    key: "{field.key()}",
                                    label: field.label().to_string(),
                                    input_type: "number".to_string(),
                                    value: draft.raw(field),
                                    placeholder: "0.00".to_string(),
                                    min: "0".to_string(),
                                    error: errs.get(field.key()).cloned(),
                                    on_input: move |evt: FormEvent| form.write().set_raw(field, evt.value()),
                                }
                            }
                        }
                        div { class: "payroll-column",
                            h3 { "Deductions" }
                            for field in PayrollField::DEDUCTIONS.iter().copied() {
                                Input {
                                    key: "{field.key()}",
                                    label: field.label().to_string(),
                                    input_type: "number".to_string(),
                                    value: draft.raw(field),
                                    placeholder: "0.00".to_string(),
                                    min: "0".to_string(),
                                    error: errs.get(field.key()).cloned(),
                                    on_input: move |evt: FormEvent| form.write().set_raw(field, evt.value()),
                                }
                            }
                        }
                    }

                    dl { class: "payroll-preview", "aria-live": "polite",
                        dt { "Gross" }
                        dd { {format_money(preview.gross())} }
                        dt { "Deductions" }
                        dd { {format_money(preview.total_deductions())} }
                        dt { "Net salary" }
                        dd { class: "payroll-net", {format_money(preview.net())} }
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
                            "Save Payroll"
                        }
                    }
                }
            }

            ConfirmDialog {
                open: deleting.read().is_some(),
                title: "Delete payroll record".to_string(),
                message: deleting
                    .read()
                    .as_ref()
                    .map(|r| {
                        format!(
                            "Delete the payroll for {} covering {}?",
                            opt_text(r.employee_name.as_deref()),
                            format_date(r.period_start),
                        )
                    })
                    .unwrap_or_default(),
                busy: busy(),
                on_confirm: handle_delete,
                on_cancel: move |_| deleting.set(None),
            }
        }
    }
}
