use std::collections::HashMap;

use api::ApiClient;
use dioxus::prelude::*;
use shared_types::{
    filter_by_query, AppError, CreateLeaveRequest, Domain, Employee, EmployeeFilter, LeaveDecision,
    LeaveRequest, LeaveStatus, LeaveType, Module, User, ValidateRequest,
};
use shared_ui::{
    use_toast, Button, ButtonVariant, DataTable, DataTableBody, DataTableCell, DataTableColumn,
    DataTableEmpty, DataTableHeader, DataTableRow, Form, FormRow, FormSelect, Input, Modal,
    PageHeader, SearchBar, SearchInput, SkeletonRows, StatusBadge, TabBar, TabItem, Textarea,
    ToastOptions,
};

use crate::auth::use_auth;
use crate::components::{ErrorPanel, ModuleGate, RequireRoles};
use crate::format_helpers::{blank_to_none, format_date, opt_text, parse_date};
use crate::hooks::{field_error, use_action_failures, use_debounced_search};

#[derive(Debug, Clone, PartialEq)]
struct LeaveForm {
    leave_type: String,
    start_date: String,
    end_date: String,
    reason: String,
}

impl Default for LeaveForm {
    fn default() -> Self {
        Self {
            leave_type: LeaveType::Annual.as_str().to_string(),
            start_date: String::new(),
            end_date: String::new(),
            reason: String::new(),
        }
    }
}

impl LeaveForm {
    /// Build the request, or the per-field messages that stop it.
    fn to_request(&self) -> Result<CreateLeaveRequest, HashMap<String, String>> {
        let mut errors = HashMap::new();
        let start = parse_date(&self.start_date);
        let end = parse_date(&self.end_date);
        if start.is_none() {
            errors.insert("start_date".to_string(), "Start date is required".to_string());
        }
        if end.is_none() {
            errors.insert("end_date".to_string(), "End date is required".to_string());
        }
        let (Some(start_date), Some(end_date)) = (start, end) else {
            return Err(errors);
        };
        if end_date < start_date {
            errors.insert(
                "end_date".to_string(),
                "End date must be on or after the start date".to_string(),
            );
            return Err(errors);
        }
        let request = CreateLeaveRequest {
            leave_type: LeaveType::parse(&self.leave_type).unwrap_or(LeaveType::Annual),
            start_date,
            end_date,
            reason: blank_to_none(&self.reason),
        };
        request.validate_request().map_err(|err| err.field_errors)?;
        Ok(request)
    }
}

/// Employee record belonging to the signed-in account, matched on the
/// linked user id first and the email second.
fn own_employee_id(user: &User, employees: &[Employee]) -> Option<i64> {
    employees
        .iter()
        .find(|e| e.user_id == Some(user.id))
        .or_else(|| employees.iter().find(|e| e.email.eq_ignore_ascii_case(&user.email)))
        .map(|e| e.id)
}

/// Non-reviewers are only ever listed their own requests. Reviewers see
/// everyone's and may cancel only the ones filed under their employee id.
fn may_cancel(request: &LeaveRequest, reviewer: bool, own_employee_id: Option<i64>) -> bool {
    !reviewer || own_employee_id == Some(request.employee_id)
}

/// Pending review opened from a row.
#[derive(Debug, Clone, PartialEq)]
struct Review {
    request: LeaveRequest,
    comment: String,
}

/// Leave requests: everyone files their own, reviewers approve or reject.
#[component]
pub fn Leave() -> Element {
    rsx! {
        ModuleGate { module: Module::Leave,
            LeaveRequests {}
        }
    }
}

#[component]
fn LeaveRequests() -> Element {
    let auth = use_auth();
    let client = use_context::<ApiClient>();
    let toast = use_toast();
    let failures = use_action_failures();
    let mut search = use_debounced_search();
    let mut status_tab = use_signal(|| LeaveStatus::Pending.as_str().to_string());

    let list_client = client.clone();
    let mut requests = use_resource(move || {
        let client = list_client.clone();
        let status = LeaveStatus::parse(&status_tab.read());
        async move { api::leave::list_leave_requests(&client, status).await }
    });

    let reviewer = auth.can_manage(Domain::Leave);

    let own_client = client.clone();
    let own_employee = use_resource(move || {
        let client = own_client.clone();
        let user = auth
            .current_user
            .read()
            .clone()
            .filter(|_| auth.can_manage(Domain::Leave));
        async move {
            let user = user?;
            let filter = EmployeeFilter::new(&user.email, None, None);
            match api::employees::list_employees(&client, &filter).await {
                Ok(employees) => own_employee_id(&user, &employees),
                Err(err) => {
                    tracing::debug!(%err, "own employee record unavailable");
                    None
                }
            }
        }
    });
    let own_id = (*own_employee.read()).flatten();

    let mut show_form = use_signal(|| false);
    let mut form = use_signal(LeaveForm::default);
    let mut errors = use_signal(HashMap::<String, String>::new);
    let mut saving = use_signal(|| false);
    let mut review: Signal<Option<Review>> = use_signal(|| None);
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
        let client = save_client.clone();
        spawn(async move {
            saving.set(true);
            match api::leave::create_leave_request(&client, &request).await {
                Ok(created) => {
                    toast.success(
                        format!("{} day(s) of {} leave requested", created.days(), created.leave_type.label()),
                        ToastOptions::new(),
                    );
                    show_form.set(false);
                    requests.restart();
                }
                Err(err) => {
                    errors.set(err.field_errors.clone());
                    failures.report(err);
                }
            }
            saving.set(false);
        });
    };

    // Shared tail of approve/reject/cancel.
    let finish_action = use_callback(
        move |(result, msg): (Result<LeaveRequest, AppError>, &'static str)| match result {
            Ok(_) => {
                toast.success(msg.to_string(), ToastOptions::new());
                requests.restart();
            }
            Err(err) => failures.report(err),
        },
    );

    let decide_client = client.clone();
    let decide = use_callback(move |approve: bool| {
        let Some(current) = review() else { return };
        let client = decide_client.clone();
        let decision = LeaveDecision {
            comment: blank_to_none(&current.comment),
        };
        spawn(async move {
            busy.set(true);
            let id = current.request.id;
            let result = if approve {
                api::leave::approve_leave(&client, id, &decision).await
            } else {
                api::leave::reject_leave(&client, id, &decision).await
            };
            finish_action.call((result, if approve { "Leave approved" } else { "Leave rejected" }));
            busy.set(false);
            review.set(None);
        });
    });

    let cancel_client = client.clone();
    let cancel = use_callback(move |id: i64| {
        let client = cancel_client.clone();
        spawn(async move {
            let result = api::leave::cancel_leave(&client, id).await;
            finish_action.call((result, "Leave request cancelled"));
        });
    });

    let mut tabs = vec![TabItem::new("all", "All")];
    tabs.extend(LeaveStatus::ALL.iter().map(|s| TabItem::new(s.as_str(), s.label())));

    let errs = errors.read().clone();
    let draft = form.read().clone();
    let query = search.query.read().clone();
    let reviewing = review.read().clone();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./leave.css") }

        div { class: "leave-page",
            PageHeader {
                title: "Leave".to_string(),
                actions: rsx! {
                    Button {
                        onclick: move |_| {
                            form.set(LeaveForm::default());
                            errors.set(HashMap::new());
                            show_form.set(true);
                        },
                        "Request Leave"
                    }
                },
            }

            SearchBar {
                SearchInput {
                    value: search.input.read().clone(),
                    placeholder: "Search by employee, type or reason".to_string(),
                    on_input: move |value: String| search.on_input(value),
                }
            }

            TabBar {
                tabs,
                active: status_tab.read().clone(),
                on_select: move |value: String| status_tab.set(value),
            }

            match &*requests.read() {
                None => rsx! { SkeletonRows {} },
                Some(Err(err)) => rsx! {
                    ErrorPanel { error: err.clone(), on_retry: move |_| requests.restart() }
                },
                Some(Ok(list)) => {
                    let visible = filter_by_query(list, &query);
                    rsx! {
                        DataTable {
                            DataTableHeader {
                                DataTableColumn { "Employee" }
                                DataTableColumn { "Type" }
                                DataTableColumn { "From" }
                                DataTableColumn { "To" }
                                DataTableColumn { "Days" }
                                DataTableColumn { "Reason" }
                                DataTableColumn { "Status" }
                                DataTableColumn { "" }
                            }
                            DataTableBody {
                                if visible.is_empty() {
                                    DataTableEmpty { colspan: 8, message: "No leave requests.".to_string() }
                                }
                                for request in visible.into_iter().cloned() {
                                    DataTableRow { key: "{request.id}",
                                        DataTableCell { {opt_text(request.employee_name.as_deref())} }
                                        DataTableCell { "{request.leave_type.label()}" }
                                        DataTableCell { {format_date(request.start_date)} }
                                        DataTableCell { {format_date(request.end_date)} }
                                        DataTableCell { "{request.days()}" }
                                        DataTableCell { {opt_text(request.reason.as_deref())} }
                                        DataTableCell {
                                            StatusBadge {
                                                status: request.status.as_str().to_string(),
                                                label: request.status.label().to_string(),
                                            }
                                        }
                                        DataTableCell {
                                            if request.is_pending() {
                                                div { class: "row-actions",
                                                    RequireRoles {
                                                        roles: Domain::Leave.managers().to_vec(),
                                                        fallback: rsx! {},
                                                        Button {
                                                            variant: ButtonVariant::Ghost,
                                                            onclick: {
                                                                let request = request.clone();
                                                                move |_| review.set(Some(Review { request: request.clone(), comment: String::new() }))
                                                            },
                                                            "Review"
                                                        }
                                                    }
                                                    if may_cancel(request, reviewer, own_id) {
                                                        Button {
                                                            variant: ButtonVariant::Ghost,
                                                            onclick: {
                                                                let id = request.id;
                                                                move |_| cancel.call(id)
                                                            },
                                                            "Cancel"
                                                        }
                                                    }
                                                }
                                            } else if let Some(comment) = request.reviewer_comment.clone() {
                                                span { class: "leave-comment", title: "{comment}", "{comment}" }
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
                title: "Request Leave".to_string(),
                on_close: move |_| show_form.set(false),

                Form { onsubmit: handle_save,
                    FormSelect {
                        label: "Leave type".to_string(),
                        value: draft.leave_type.clone(),
                        onchange: move |evt: Event<FormData>| form.write().leave_type = evt.value(),
                        for kind in LeaveType::ALL {
                            option { key: "{kind.as_str()}", value: kind.as_str(), "{kind.label()}" }
                        }
                    }
                    FormRow {
                        Input {
                            label: "Start date".to_string(),
                            input_type: "date".to_string(),
                            value: draft.start_date.clone(),
                            required: true,
                            error: field_error(&errs, "start_date"),
                            on_input: move |evt: FormEvent| form.write().start_date = evt.value(),
                        }
                        Input {
                            label: "End date".to_string(),
                            input_type: "date".to_string(),
                            value: draft.end_date.clone(),
                            required: true,
                            error: field_error(&errs, "end_date"),
                            on_input: move |evt: FormEvent| form.write().end_date = evt.value(),
                        }
                    }
                    Textarea {
                        label: "Reason".to_string(),
                        value: draft.reason.clone(),
                        on_input: move |evt: FormEvent| form.write().reason = evt.value(),
                    }
                    if let Some(msg) = field_error(&errs, "reason") {
                        p { class: "field-error", "{msg}" }
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
                            "Submit Request"
                        }
                    }
                }
            }

            if let Some(current) = reviewing {
                Modal {
                    open: true,
                    title: "Review leave request".to_string(),
                    on_close: move |_| review.set(None),
                    footer: rsx! {
                        Button {
                            variant: ButtonVariant::Destructive,
                            disabled: busy(),
                            onclick: move |_| decide.call(false),
                            "Reject"
                        }
                        Button {
                            loading: busy(),
                            disabled: busy(),
                            onclick: move |_| decide.call(true),
                            "Approve"
                        }
                    },

                    p { class: "leave-review-summary",
                        {format!(
                            "{} requests {} day(s) of {} leave, {} to {}.",
                            opt_text(current.request.employee_name.as_deref()),
                            current.request.days(),
                            current.request.leave_type.label(),
                            format_date(current.request.start_date),
                            format_date(current.request.end_date),
                        )}
                    }
                    Textarea {
                        label: "Comment".to_string(),
                        value: current.comment.clone(),
                        on_input: move |evt: FormEvent| {
                            if let Some(r) = review.write().as_mut() {
                                r.comment = evt.value();
                            }
                        },
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn form(start: &str, end: &str) -> LeaveForm {
        LeaveForm {
            start_date: start.into(),
            end_date: end.into(),
            ..Default::default()
        }
    }

    #[test]
    fn valid_range_builds_request() {
        let req = form("2026-07-01", "2026-07-03").to_request().unwrap();
        assert_eq!(req.leave_type, LeaveType::Annual);
        assert_eq!(req.start_date, NaiveDate::from_ymd_opt(2026, 7, 1).unwrap());
        assert_eq!(req.reason, None);
    }

    #[test]
    fn reversed_range_is_rejected() {
        let errors = form("2026-07-03", "2026-07-01").to_request().unwrap_err();
        assert!(errors.contains_key("end_date"));
    }

    #[test]
    fn missing_dates_are_reported_per_field() {
        let errors = form("", "").to_request().unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn overlong_reason_fails_validation() {
        let mut f = form("2026-07-01", "2026-07-01");
        f.reason = "x".repeat(501);
        assert!(f.to_request().unwrap_err().contains_key("reason"));
    }

    fn account() -> User {
        serde_json::from_value(serde_json::json!({
            "id": 21,
            "email": "Abena.Osei@acme.test",
            "first_name": "Abena",
            "last_name": "Osei",
            "role": "MANAGER",
            "status": "ACTIVE"
        }))
        .unwrap()
    }

    fn employee(id: i64, user_id: Option<i64>, email: &str) -> Employee {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "user_id": user_id,
            "organization_id": 1,
            "employee_number": format!("EMP-{id:03}"),
            "first_name": "Abena",
            "last_name": "Osei",
            "email": email,
            "status": "ACTIVE",
            "employment_type": "FULL_TIME"
        }))
        .unwrap()
    }

    fn pending(employee_id: i64) -> LeaveRequest {
        serde_json::from_value(serde_json::json!({
            "id": 5,
            "employee_id": employee_id,
            "employee_name": "Abena Osei",
            "leave_type": "ANNUAL",
            "start_date": "2026-07-01",
            "end_date": "2026-07-03",
            "status": "PENDING"
        }))
        .unwrap()
    }

    #[test]
    fn own_record_prefers_linked_user_over_email() {
        let user = account();
        let namesakes = [
            employee(40, None, "abena.osei@acme.test"),
            employee(41, Some(21), "a.osei@acme.test"),
        ];
        assert_eq!(own_employee_id(&user, &namesakes), Some(41));
        assert_eq!(own_employee_id(&user, &namesakes[..1]), Some(40));
        assert_eq!(own_employee_id(&user, &[employee(42, Some(9), "other@acme.test")]), None);
    }

    #[test]
    fn reviewers_cancel_only_their_own_requests() {
        // Same display name, different employee.
        assert!(!may_cancel(&pending(40), true, Some(41)));
        assert!(may_cancel(&pending(41), true, Some(41)));
        assert!(!may_cancel(&pending(41), true, None));
        assert!(may_cancel(&pending(40), false, None));
    }
}
