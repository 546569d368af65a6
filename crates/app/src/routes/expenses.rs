use std::collections::HashMap;

use api::ApiClient;
use dioxus::prelude::*;
use shared_types::{
    apply_filters, partition, samples, AppError, Domain, ExpenseCategory, ExpenseDecision,
    ExpenseItem, ExpenseReport, ExpenseReportRequest, ExpenseStatus, FetchOutcome, Module,
    TabFilter, ValidateRequest,
};
use shared_ui::{
    use_toast, Banner, BannerTone, Button, ButtonVariant, ConfirmDialog, DataTable, DataTableBody,
    DataTableCell, DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow, Form, FormSelect,
    Input, Modal, ModalSize, PageHeader, SearchBar, SearchInput, SkeletonRows, StatusBadge, TabBar,
    TabItem, Textarea, ToastOptions,
};

use crate::auth::use_auth;
use crate::components::{ErrorPanel, FallbackNotice, ModuleGate};
use crate::format_helpers::{
    blank_to_none, date_input_value, format_date, format_money, opt_text, parse_date, today,
};
use crate::hooks::{field_error, outcome, use_action_failures, use_debounced_search, use_fallback_policy};

#[derive(Debug, Clone, PartialEq)]
struct ItemRow {
    id: Option<i64>,
    description: String,
    category: String,
    amount: String,
    date: String,
}

impl ItemRow {
    fn blank() -> Self {
        Self {
            id: None,
            description: String::new(),
            category: ExpenseCategory::Travel.as_str().to_string(),
            amount: String::new(),
            date: date_input_value(Some(today())),
        }
    }

    fn from_item(item: &ExpenseItem) -> Self {
        Self {
            id: item.id,
            description: item.description.clone(),
            category: item.category.as_str().to_string(),
            amount: item.amount.to_string(),
            date: date_input_value(Some(item.date)),
        }
    }

    /// Amount as typed, or 0 while the field is blank or malformed.
    fn amount_value(&self) -> f64 {
        self.amount.trim().parse::<f64>().unwrap_or(0.0).max(0.0)
    }

    fn to_item(&self) -> Result<ExpenseItem, &'static str> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err("Every item needs a description");
        }
        let amount = self
            .amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|a| *a >= 0.0)
            .ok_or("Item amounts must be non-negative numbers")?;
        let date = parse_date(&self.date).ok_or("Every item needs a date")?;
        Ok(ExpenseItem {
            id: self.id,
            description: description.to_string(),
            category: ExpenseCategory::parse(&self.category).unwrap_or(ExpenseCategory::Other),
            amount,
            date,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ExpenseForm {
    title: String,
    description: String,
    items: Vec<ItemRow>,
}

impl ExpenseForm {
    fn blank() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            items: vec![ItemRow::blank()],
        }
    }

    fn from_report(report: &ExpenseReport) -> Self {
        let items = report.items.iter().map(ItemRow::from_item).collect::<Vec<_>>();
        Self {
            title: report.title.clone(),
            description: report.description.clone().unwrap_or_default(),
            items: if items.is_empty() { vec![ItemRow::blank()] } else { items },
        }
    }

    fn running_total(&self) -> f64 {
        self.items.iter().map(ItemRow::amount_value).sum()
    }

    fn to_request(&self) -> Result<ExpenseReportRequest, HashMap<String, String>> {
        let mut errors = HashMap::new();
        let items = self
            .items
            .iter()
            .map(ItemRow::to_item)
            .collect::<Result<Vec<_>, _>>()
            .unwrap_or_else(|msg| {
                errors.insert("items".to_string(), msg.to_string());
                Vec::new()
            });
        if errors.is_empty() && items.is_empty() {
            errors.insert("items".to_string(), "Add at least one item".to_string());
        }
        let request = ExpenseReportRequest {
            title: self.title.trim().to_string(),
            description: blank_to_none(&self.description),
            items,
        };
        if let Err(err) = request.validate_request() {
            for (field, msg) in err.field_errors {
                errors.entry(field).or_insert(msg);
            }
        }
        if errors.is_empty() {
            Ok(request)
        } else {
            Err(errors)
        }
    }
}

fn report_total(report: &ExpenseReport) -> f64 {
    if report.total_amount > 0.0 {
        report.total_amount
    } else {
        report.items_total()
    }
}

fn status_filter(tab: &str) -> TabFilter<ExpenseStatus> {
    ExpenseStatus::parse(tab).map(TabFilter::Only).unwrap_or_default()
}

/// Expense reports with item editing, submission and review.
#[component]
pub fn Expenses() -> Element {
    rsx! {
        ModuleGate { module: Module::Expenses,
            ExpenseReports {}
        }
    }
}

#[component]
fn ExpenseReports() -> Element {
    let auth = use_auth();
    let client = use_context::<ApiClient>();
    let toast = use_toast();
    let failures = use_action_failures();
    let policy = use_fallback_policy();
    let mut search = use_debounced_search();
    let mut status_tab = use_signal(|| "all".to_string());

    let list_client = client.clone();
    let mut reports = use_resource(move || {
        let client = list_client.clone();
        async move {
            let result = api::expenses::list_expense_reports(&client).await;
            outcome(result, policy, samples::sample_expense_reports)
        }
    });

    let reviewer = auth.can_manage(Domain::Expenses);

    let mut show_form = use_signal(|| false);
    let mut editing: Signal<Option<i64>> = use_signal(|| None);
    let mut form = use_signal(ExpenseForm::blank);
    let mut errors = use_signal(HashMap::<String, String>::new);
    let mut saving = use_signal(|| false);
    let mut viewing: Signal<Option<ExpenseReport>> = use_signal(|| None);
    let mut rejecting: Signal<Option<ExpenseReport>> = use_signal(|| None);
    let mut reason = use_signal(String::new);
    let mut deleting: Signal<Option<ExpenseReport>> = use_signal(|| None);
    let mut busy = use_signal(|| false);

    let finish = use_callback(move |result: Result<&'static str, AppError>| {
        saving.set(false);
        match result {
            Ok(msg) => {
                toast.success(msg.to_string(), ToastOptions::new());
                show_form.set(false);
                reports.restart();
            }
            Err(err) => {
                errors.set(err.field_errors.clone());
                failures.report(err);
            }
        }
    });

    let finish_action = use_callback(move |(result, msg): (Result<ExpenseReport, AppError>, &'static str)| {
        busy.set(false);
        match result {
            Ok(report) => {
                tracing::info!(id = report.id, status = report.status.as_str(), "expense report updated");
                toast.success(msg.to_string(), ToastOptions::new());
                rejecting.set(None);
                reason.set(String::new());
                reports.restart();
            }
            Err(err) => failures.report(err),
        }
    });

    let save_client = client.clone();
    let handle_save = move |_: FormEvent| {
        let request = match form.read().to_request() {
            Ok(request) => request,
            Err(errs) => {
                errors.set(errs);
                return;
            }
        };
        errors.set(HashMap::new());
        saving.set(true);
        let client = save_client.clone();
        let target = editing();
        spawn(async move {
            let result = match target {
                Some(id) => api::expenses::update_expense_report(&client, id, &request)
                    .await
                    .map(|_| "Expense report updated"),
                None => api::expenses::create_expense_report(&client, &request)
                    .await
                    .map(|_| "Expense report saved as draft"),
            };
            finish.call(result);
        });
    };

    let submit_client = client.clone();
    let submit = use_callback(move |id: i64| {
        let client = submit_client.clone();
        busy.set(true);
        spawn(async move {
            let result = api::expenses::submit_expense_report(&client, id).await;
            finish_action.call((result, "Submitted for approval"));
        });
    });

    let approve_client = client.clone();
    let approve = use_callback(move |id: i64| {
        let client = approve_client.clone();
        busy.set(true);
        spawn(async move {
            let result = api::expenses::approve_expense_report(&client, id).await;
            finish_action.call((result, "Expense report approved"));
        });
    });

    let reject_client = client.clone();
    let confirm_reject = move |_| {
        let Some(report) = rejecting() else { return };
        let decision = ExpenseDecision {
            reason: blank_to_none(&reason.read()),
        };
        let client = reject_client.clone();
        busy.set(true);
        spawn(async move {
            let result = api::expenses::reject_expense_report(&client, report.id, &decision).await;
            finish_action.call((result, "Expense report rejected"));
        });
    };

    let delete_client = client.clone();
    let handle_delete = move |_| {
        let Some(report) = deleting() else { return };
        let client = delete_client.clone();
        spawn(async move {
            busy.set(true);
            match api::expenses::delete_expense_report(&client, report.id).await {
                Ok(()) => {
                    toast.success(format!("{} deleted", report.title), ToastOptions::new());
                    reports.restart();
                }
                Err(err) => failures.report(err),
            }
            busy.set(false);
            deleting.set(None);
        });
    };

    let open_edit = use_callback(move |report: ExpenseReport| {
        form.set(ExpenseForm::from_report(&report));
        editing.set(Some(report.id));
        errors.set(HashMap::new());
        show_form.set(true);
    });

    let errs = errors.read().clone();
    let draft = form.read().clone();
    let is_edit = editing().is_some();
    let query = search.query.read().clone();
    let active_tab = status_tab.read().clone();
    let total_preview = format_money(draft.running_total());

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./expenses.css") }

        div { class: "expenses-page",
            PageHeader {
                title: "Expenses".to_string(),
                subtitle: Some("Claims, receipts and reimbursements".to_string()),
                actions: rsx! {
                    Button {
                        onclick: move |_| {
                            form.set(ExpenseForm::blank());
                            editing.set(None);
                            errors.set(HashMap::new());
                            show_form.set(true);
                        },
                        "New Report"
                    }
                },
            }

            SearchBar {
                SearchInput {
                    value: search.input.read().clone(),
                    placeholder: "Search title or description".to_string(),
                    on_input: move |value: String| search.on_input(value),
                }
            }

            match &*reports.read() {
                None => rsx! { SkeletonRows {} },
                Some(FetchOutcome::Failed(err)) => rsx! {
                    ErrorPanel { error: err.clone(), on_retry: move |_| reports.restart() }
                },
                Some(result) => {
                    let all = result.data().cloned().unwrap_or_default();
                    let sampled = result.is_fallback();
                    let groups = partition(&all, |r| r.status.as_str());
                    let mut tabs = vec![TabItem::new("all", "All").with_count(all.len())];
                    tabs.extend(ExpenseStatus::ALL.iter().map(|s| {
                        let count = groups.get(s.as_str()).map(|g| g.len()).unwrap_or(0);
                        TabItem::new(s.as_str(), s.label()).with_count(count)
                    }));
                    let visible: Vec<ExpenseReport> = apply_filters(&all, &query, &status_filter(&active_tab), |r| r.status)
                        .into_iter()
                        .cloned()
                        .collect();
                    rsx! {
                        if let Some(err) = result.error().filter(|_| sampled) {
                            FallbackNotice { error: err.clone() }
                        }

                        TabBar {
                            tabs,
                            active: active_tab.clone(),
                            on_select: move |value: String| status_tab.set(value),
                        }

                        DataTable {
                            DataTableHeader {
                                DataTableColumn { "Title" }
                                DataTableColumn { "Submitted by" }
                                DataTableColumn { "Items" }
                                DataTableColumn { "Total" }
                                DataTableColumn { "Status" }
                                DataTableColumn { "" }
                            }
                            DataTableBody {
                                if visible.is_empty() {
                                    DataTableEmpty { colspan: 6, message: "No expense reports match.".to_string() }
                                }
                                for report in visible.into_iter() {
                                    DataTableRow { key: "{report.id}",
                                        DataTableCell { "{report.title}" }
                                        DataTableCell { {opt_text(report.submitted_by_name.as_deref())} }
                                        DataTableCell { "{report.items.len()}" }
                                        DataTableCell { {format_money(report_total(&report))} }
                                        DataTableCell {
                                            StatusBadge {
                                                status: report.status.as_str().to_string(),
                                                label: report.status.label().to_string(),
                                            }
                                        }
                                        DataTableCell {
                                            div { class: "row-actions",
                                                Button {
                                                    variant: ButtonVariant::Ghost,
                                                    onclick: {
                                                        let report = report.clone();
                                                        move |_| viewing.set(Some(report.clone()))
                                                    },
                                                    "View"
                                                }
                                                if report.is_editable() && !sampled {
                                                    Button {
                                                        variant: ButtonVariant::Ghost,
                                                        onclick: {
                                                            let report = report.clone();
                                                            move |_| open_edit.call(report.clone())
                                                        },
                                                        "Edit"
                                                    }
                                                    Button {
                                                        variant: ButtonVariant::Secondary,
                                                        disabled: busy(),
                                                        onclick: {
                                                            let id = report.id;
                                                            move |_| submit.call(id)
                                                        },
                                                        "Submit"
                                                    }
                                                    Button {
                                                        variant: ButtonVariant::Ghost,
                                                        onclick: {
                                                            let report = report.clone();
                                                            move |_| deleting.set(Some(report.clone()))
                                                        },
                                                        "Delete"
                                                    }
                                                }
                                                if report.awaits_review() && reviewer && !sampled {
                                                    Button {
                                                        variant: ButtonVariant::Secondary,
                                                        disabled: busy(),
                                                        onclick: {
                                                            let id = report.id;
                                                            move |_| approve.call(id)
                                                        },
                                                        "Approve"
                                                    }
                                                    Button {
                                                        variant: ButtonVariant::Destructive,
                                                        disabled: busy(),
                                                        onclick: {
                                                            let report = report.clone();
                                                            move |_| {
                                                                reason.set(String::new());
                                                                rejecting.set(Some(report.clone()));
                                                            }
                                                        },
                                                        "Reject"
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
                title: if is_edit { "Edit Expense Report".to_string() } else { "New Expense Report".to_string() },
                size: ModalSize::Large,
                on_close: move |_| show_form.set(false),

                Form { onsubmit: handle_save,
                    Input {
                        label: "Title".to_string(),
                        value: draft.title.clone(),
                        required: true,
                        error: field_error(&errs, "title"),
                        on_input: move |evt: FormEvent| form.write().title = evt.value(),
                    }
                    Textarea {
                        label: "Description".to_string(),
                        value: draft.description.clone(),
                        on_input: move |evt: FormEvent| form.write().description = evt.value(),
                    }

                    fieldset { class: "expense-items",
                        legend { "Items" }
                        if let Some(msg) = field_error(&errs, "items") {
                            Banner { tone: BannerTone::Error, message: msg }
                        }
                        for (idx, row) in draft.items.iter().enumerate() {
                            div { key: "{idx}", class: "expense-item-row",
                                Input {
                                    placeholder: "Description".to_string(),
                                    value: row.description.clone(),
                                    on_input: move |evt: FormEvent| form.write().items[idx].description = evt.value(),
                                }
                                FormSelect {
                                    value: row.category.clone(),
                                    onchange: move |evt: Event<FormData>| form.write().items[idx].category = evt.value(),
                                    for category in ExpenseCategory::ALL {
                                        option { key: "{category.as_str()}", value: category.as_str(), "{category.label()}" }
                                    }
                                }
                                Input {
                                    input_type: "number".to_string(),
                                    placeholder: "Amount".to_string(),
                                    value: row.amount.clone(),
                                    on_input: move |evt: FormEvent| form.write().items[idx].amount = evt.value(),
                                }
                                Input {
                                    input_type: "date".to_string(),
                                    value: row.date.clone(),
                                    on_input: move |evt: FormEvent| form.write().items[idx].date = evt.value(),
                                }
                                Button {
                                    variant: ButtonVariant::Ghost,
                                    disabled: draft.items.len() == 1,
                                    onclick: move |_| {
                                        form.write().items.remove(idx);
                                    },
                                    "Remove"
                                }
                            }
                        }
                        div { class: "expense-items-footer",
                            Button {
                                variant: ButtonVariant::Outline,
                                onclick: move |_| form.write().items.push(ItemRow::blank()),
                                "Add Item"
                            }
                            span { class: "expense-total", "Total: {total_preview}" }
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
                            if is_edit { "Save Changes" } else { "Save Draft" }
                        }
                    }
                }
            }

            if let Some(report) = viewing.read().clone() {
                Modal {
                    open: true,
                    title: report.title.clone(),
                    size: ModalSize::Large,
                    on_close: move |_| viewing.set(None),

                    p { class: "expense-description", {opt_text(report.description.as_deref())} }
                    DataTable {
                        DataTableHeader {
                            DataTableColumn { "Date" }
                            DataTableColumn { "Description" }
                            DataTableColumn { "Category" }
                            DataTableColumn { "Amount" }
                        }
                        DataTableBody {
                            if report.items.is_empty() {
                                DataTableEmpty { colspan: 4, message: "No items.".to_string() }
                            }
                            for (idx, item) in report.items.iter().enumerate() {
                                DataTableRow { key: "{idx}",
                                    DataTableCell { {format_date(item.date)} }
                                    DataTableCell { "{item.description}" }
                                    DataTableCell { "{item.category.label()}" }
                                    DataTableCell { {format_money(item.amount)} }
                                }
                            }
                        }
                    }
                    p { class: "expense-total", "Total: " {format_money(report_total(&report))} }
                }
            }

            Modal {
                open: rejecting.read().is_some(),
                title: "Reject expense report".to_string(),
                on_close: move |_| rejecting.set(None),
                footer: rsx! {
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| rejecting.set(None),
                        "Cancel"
                    }
                    Button {
                        variant: ButtonVariant::Destructive,
                        loading: busy(),
                        disabled: busy(),
                        onclick: confirm_reject,
                        "Reject"
                    }
                },

                Textarea {
                    label: "Reason".to_string(),
                    placeholder: "Optional note for the submitter".to_string(),
                    value: reason.read().clone(),
                    on_input: move |evt: FormEvent| reason.set(evt.value()),
                }
            }

            ConfirmDialog {
                open: deleting.read().is_some(),
                title: "Delete expense report".to_string(),
                message: deleting
                    .read()
                    .as_ref()
                    .map(|r| format!("Delete draft \"{}\"?", r.title))
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
    fn status_tabs_partition_without_overlap() {
        let reports = samples::sample_expense_reports();
        let total: usize = ExpenseStatus::ALL
            .iter()
            .map(|s| apply_filters(&reports, "", &status_filter(s.as_str()), |r| r.status).len())
            .sum();
        assert_eq!(total, reports.len());
        let drafts = apply_filters(&reports, "", &status_filter("draft"), |r| r.status);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].title, "Office supplies");
    }

    #[test]
    fn search_matches_description_case_insensitively() {
        let reports = samples::sample_expense_reports();
        let hits = apply_filters(&reports, "QUARTERLY", &TabFilter::All, |r| r.status);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);
    }

    #[test]
    fn form_round_trips_a_report() {
        let report = &samples::sample_expense_reports()[0];
        let request = ExpenseForm::from_report(report).to_request().unwrap();
        assert_eq!(request, ExpenseReportRequest::from(report));
    }

    #[test]
    fn running_total_ignores_unfinished_amounts() {
        let mut form = ExpenseForm::blank();
        form.items[0].amount = "12.5".into();
        form.items.push(ItemRow { amount: "abc".into(), ..ItemRow::blank() });
        form.items.push(ItemRow { amount: "-4".into(), ..ItemRow::blank() });
        assert_eq!(form.running_total(), 12.5);
    }

    #[test]
    fn invalid_items_are_reported_under_items() {
        let mut form = ExpenseForm::blank();
        form.title = "Trip".into();
        form.items[0].amount = "20".into();
        let errs = form.to_request().unwrap_err();
        assert_eq!(errs.get("items").map(String::as_str), Some("Every item needs a description"));

        form.items[0].description = "Taxi".into();
        assert!(form.to_request().is_ok());
        form.title.clear();
        assert!(form.to_request().unwrap_err().contains_key("title"));
    }
}
