use api::ApiClient;
use chrono::{Datelike, Months, NaiveDate};
use dioxus::prelude::*;
use shared_types::{
    open_record_for, partition, AttendanceRecord, AttendanceStatus, CheckRequest, DateRange, Module,
    Role,
};
use shared_ui::{
    use_toast, Button, ButtonVariant, Card, CardContent, CardHeader, CardTitle, DataTable,
    DataTableBody, DataTableCell, DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow,
    Input, PageHeader, SkeletonRows, StatCard, StatGrid, StatusBadge, ToastOptions,
};

use crate::auth::use_auth;
use crate::components::{ErrorPanel, ModuleGate};
use crate::format_helpers::{blank_to_none, format_date, format_opt_time, opt_text, today};
use crate::hooks::use_action_failures;

/// Which employee record belongs to the signed-in user. Self-service roles
/// only ever receive their own rows; everyone else is identified by the
/// record returned from their last check-in.
fn own_employee_id(role: Option<Role>, records: &[AttendanceRecord], last_seen: Option<i64>) -> Option<i64> {
    last_seen.or_else(|| match role {
        Some(Role::Employee) => records.first().map(|r| r.employee_id),
        _ => None,
    })
}

fn shift_month(range: DateRange, forward: bool) -> DateRange {
    let months = Months::new(1);
    let anchor = if forward {
        range.start_date.checked_add_months(months)
    } else {
        range.start_date.checked_sub_months(months)
    };
    DateRange::month_of(anchor.unwrap_or(range.start_date))
}

fn month_label(day: NaiveDate) -> String {
    format!("{} {}", day.format("%B"), day.year())
}

/// Monthly attendance log with a check-in / check-out panel for today.
#[component]
pub fn Attendance() -> Element {
    rsx! {
        ModuleGate { module: Module::Attendance,
            AttendanceLog {}
        }
    }
}

#[component]
fn AttendanceLog() -> Element {
    let auth = use_auth();
    let client = use_context::<ApiClient>();
    let toast = use_toast();
    let failures = use_action_failures();
    let mut range = use_signal(|| DateRange::month_of(today()));
    let mut notes = use_signal(String::new);
    let mut busy = use_signal(|| false);
    let mut last_seen: Signal<Option<i64>> = use_signal(|| None);

    let list_client = client.clone();
    let mut records = use_resource(move || {
        let client = list_client.clone();
        let range = range();
        async move { api::attendance::list_attendance(&client, &range).await }
    });

    let check_client = client.clone();
    let record_check = use_callback(move |check_in: bool| {
        let client = check_client.clone();
        let request = CheckRequest {
            notes: blank_to_none(&notes.read()),
        };
        spawn(async move {
            busy.set(true);
            let result = if check_in {
                api::attendance::check_in(&client, &request).await
            } else {
                api::attendance::check_out(&client, &request).await
            };
            match result {
                Ok(record) => {
                    last_seen.set(Some(record.employee_id));
                    notes.set(String::new());
                    let msg = if check_in { "Checked in" } else { "Checked out" };
                    toast.success(msg.to_string(), ToastOptions::new());
                    records.restart();
                }
                Err(err) => failures.report(err),
            }
            busy.set(false);
        });
    });

    let current = range();
    let is_current_month = current.contains(today());

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./attendance.css") }

        div { class: "attendance-page",
            PageHeader {
                title: "Attendance".to_string(),
                subtitle: Some(month_label(current.start_date)),
                actions: rsx! {
                    div { class: "month-nav",
                        Button {
                            variant: ButtonVariant::Outline,
                            onclick: move |_| range.set(shift_month(range(), false)),
                            "Previous"
                        }
                        Button {
                            variant: ButtonVariant::Outline,
                            disabled: is_current_month,
                            onclick: move |_| range.set(DateRange::month_of(today())),
                            "This month"
                        }
                        Button {
                            variant: ButtonVariant::Outline,
                            onclick: move |_| range.set(shift_month(range(), true)),
                            "Next"
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
                    let mine = own_employee_id(auth.role(), list, last_seen());
                    let open = mine.and_then(|id| open_record_for(list, id, today())).is_some();
                    let by_status = partition(list, |r| r.status.as_str());
                    let count = |status: AttendanceStatus| {
                        by_status.get(status.as_str()).map(|v| v.len()).unwrap_or(0).to_string()
                    };
                    rsx! {
                        Card { class: "attendance-check",
                            CardHeader { CardTitle { {format_date(today())} } }
                            CardContent {
                                div { class: "attendance-check-row",
                                    Input {
                                        placeholder: "Notes (optional)".to_string(),
                                        value: notes.read().clone(),
                                        on_input: move |evt: FormEvent| notes.set(evt.value()),
                                    }
                                    if open {
                                        Button {
                                            variant: ButtonVariant::Secondary,
                                            loading: busy(),
                                            disabled: busy(),
                                            onclick: move |_| record_check.call(false),
                                            "Check Out"
                                        }
                                    } else {
                                        Button {
                                            loading: busy(),
                                            disabled: busy(),
                                            onclick: move |_| record_check.call(true),
                                            "Check In"
                                        }
                                    }
                                }
                            }
                        }

                        StatGrid {
                            StatCard { label: "Present".to_string(), value: count(AttendanceStatus::Present) }
                            StatCard { label: "Late".to_string(), value: count(AttendanceStatus::Late) }
                            StatCard { label: "Remote".to_string(), value: count(AttendanceStatus::Remote) }
                            StatCard { label: "Absent".to_string(), value: count(AttendanceStatus::Absent) }
                        }

                        DataTable {
                            DataTableHeader {
                                DataTableColumn { "Date" }
                                DataTableColumn { "Employee" }
                                DataTableColumn { "Check In" }
                                DataTableColumn { "Check Out" }
                                DataTableColumn { "Hours" }
                                DataTableColumn { "Status" }
                                DataTableColumn { "Notes" }
                            }
                            DataTableBody {
                                if list.is_empty() {
                                    DataTableEmpty { colspan: 7, message: "No attendance recorded this month.".to_string() }
                                }
                                for record in list.iter() {
                                    DataTableRow { key: "{record.id}",
                                        DataTableCell { {format_date(record.date)} }
                                        DataTableCell { {opt_text(record.employee_name.as_deref())} }
                                        DataTableCell { {format_opt_time(record.check_in)} }
                                        DataTableCell { {format_opt_time(record.check_out)} }
                                        DataTableCell {
                                            {record.hours().map(|h| format!("{h:.1}")).unwrap_or_else(|| "-".to_string())}
                                        }
                                        DataTableCell {
                                            StatusBadge {
                                                status: record.status.as_str().to_string(),
                                                label: record.status.label().to_string(),
                                            }
                                        }
                                        DataTableCell { {opt_text(record.notes.as_deref())} }
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
