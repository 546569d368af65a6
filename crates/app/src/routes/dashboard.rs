use api::ApiClient;
use dioxus::prelude::*;
use shared_types::{DashboardKind, DashboardSummary};
use shared_ui::{Card, CardContent, CardHeader, CardTitle, PageHeader, SkeletonRows, StatCard, StatGrid};

use crate::auth::use_auth;
use crate::components::ErrorPanel;
use crate::format_helpers::format_money;
use crate::routes::Route;

fn count(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn money(value: Option<f64>) -> String {
    value.map(format_money).unwrap_or_else(|| "-".to_string())
}

/// One stat card per counter the dashboard kind cares about.
fn stats_for(kind: DashboardKind, s: &DashboardSummary) -> Vec<(&'static str, String)> {
    match kind {
        DashboardKind::Platform => vec![
            ("Organizations", count(s.total_organizations)),
            ("Users", count(s.total_users)),
            ("Employees", count(s.total_employees)),
        ],
        DashboardKind::Organization => vec![
            ("Users", count(s.total_users)),
            ("Employees", count(s.total_employees)),
            ("Departments", count(s.total_departments)),
            ("Pending Leave", count(s.pending_leave_requests)),
        ],
        DashboardKind::Hr => vec![
            ("Employees", count(s.total_employees)),
            ("Present Today", count(s.present_today)),
            ("Pending Leave", count(s.pending_leave_requests)),
            ("Active Courses", count(s.active_courses)),
        ],
        DashboardKind::Manager => vec![
            ("Team Members", count(s.total_employees)),
            ("Present Today", count(s.present_today)),
            ("Pending Leave", count(s.pending_leave_requests)),
            ("Open Expenses", count(s.open_expense_reports)),
        ],
        DashboardKind::Director => vec![
            ("Employees", count(s.total_employees)),
            ("Departments", count(s.total_departments)),
            ("Pending Leave", count(s.pending_leave_requests)),
            ("Open Expenses", count(s.open_expense_reports)),
        ],
        DashboardKind::Payroll => vec![
            ("Payroll Total", money(s.payroll_total)),
            ("Pending Payslips", count(s.payroll_pending)),
            ("Open Expenses", count(s.open_expense_reports)),
        ],
        DashboardKind::Employee => vec![
            ("Leave Balance (days)", s.leave_balance_days.map(|d| format!("{d:.1}")).unwrap_or_else(|| "-".to_string())),
            ("Pending Leave", count(s.pending_leave_requests)),
            ("Open Expenses", count(s.open_expense_reports)),
        ],
    }
}

/// Shortcuts shown under the counters, limited to pages the role can open.
fn quick_links(kind: DashboardKind) -> Vec<(Route, &'static str)> {
    match kind {
        DashboardKind::Platform => vec![
            (Route::Organizations {}, "Manage organizations"),
            (Route::Users {}, "Manage users"),
            (Route::Reports {}, "View reports"),
        ],
        DashboardKind::Organization => vec![
            (Route::Users {}, "Manage users"),
            (Route::Employees {}, "Employees"),
            (Route::Departments {}, "Departments"),
        ],
        DashboardKind::Hr => vec![
            (Route::Employees {}, "Employees"),
            (Route::Leave {}, "Review leave"),
            (Route::Training {}, "Training"),
        ],
        DashboardKind::Manager => vec![
            (Route::Leave {}, "Review leave"),
            (Route::Attendance {}, "Team attendance"),
            (Route::Expenses {}, "Expense reports"),
        ],
        DashboardKind::Director => vec![
            (Route::Departments {}, "Departments"),
            (Route::Reports {}, "View reports"),
            (Route::Expenses {}, "Expense reports"),
        ],
        DashboardKind::Payroll => vec![
            (Route::Payroll {}, "Run payroll"),
            (Route::Expenses {}, "Expense reports"),
            (Route::Reports {}, "View reports"),
        ],
        DashboardKind::Employee => vec![
            (Route::Attendance {}, "Check in / out"),
            (Route::Leave {}, "Request leave"),
            (Route::Training {}, "My courses"),
        ],
    }
}

/// Landing page. The role picks which counters and shortcuts appear.
#[component]
pub fn Dashboard() -> Element {
    let auth = use_auth();
    let client = use_context::<ApiClient>();

    let mut summary = use_resource(move || {
        let client = client.clone();
        async move { api::dashboard::dashboard_summary(&client).await }
    });

    let user = auth.current_user.read().clone();
    let kind = user
        .as_ref()
        .map(|u| DashboardKind::for_role_name(&u.role_name))
        .unwrap_or(DashboardKind::Employee);
    let greeting = user.map(|u| format!("Welcome back, {}", u.first_name));

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./dashboard.css") }

        div { class: "dashboard-page",
            PageHeader { title: kind.title().to_string(), subtitle: greeting }

            match &*summary.read() {
                Some(Ok(data)) => rsx! {
                    StatGrid {
                        for (label, value) in stats_for(kind, data) {
                            StatCard { key: "{label}", label: label.to_string(), value }
                        }
                    }
                },
                Some(Err(err)) => rsx! {
                    ErrorPanel { error: err.clone(), on_retry: move |_| summary.restart() }
                },
                None => rsx! { SkeletonRows { rows: 2 } },
            }

            Card { class: "dashboard-links",
                CardHeader { CardTitle { "Quick links" } }
                CardContent {
                    ul { class: "dashboard-link-list",
                        for (route, label) in quick_links(kind) {
                            li { key: "{label}",
                                Link { to: route, "{label}" }
                            }
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
    use shared_types::{can_access_route, Role};

    #[test]
    fn quick_links_stay_within_the_role_table() {
        for role in Role::ALL {
            let kind = DashboardKind::for_role(*role);
            for (route, label) in quick_links(kind) {
                assert!(
                    can_access_route(&route.to_string(), *role),
                    "{label} is not reachable for {role:?}"
                );
            }
        }
    }

    #[test]
    fn missing_counters_render_as_dash() {
        let summary = DashboardSummary {
            total_employees: Some(12),
            ..Default::default()
        };
        let stats = stats_for(DashboardKind::Platform, &summary);
        assert_eq!(stats[0], ("Organizations", "-".to_string()));
        assert_eq!(stats[2], ("Employees", "12".to_string()));
    }

    #[test]
    fn payroll_dashboard_formats_money() {
        let summary = DashboardSummary {
            payroll_total: Some(12500.0),
            ..Default::default()
        };
        assert_eq!(stats_for(DashboardKind::Payroll, &summary)[0].1, "12,500.00");
    }
}
