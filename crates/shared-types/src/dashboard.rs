use serde::{Deserialize, Serialize};

use crate::Role;

/// Which landing dashboard a user sees after login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardKind {
    Platform,
    Organization,
    Hr,
    Manager,
    Director,
    Payroll,
    Employee,
}

impl DashboardKind {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::SuperAdmin => DashboardKind::Platform,
            Role::OrgAdmin => DashboardKind::Organization,
            Role::Hr => DashboardKind::Hr,
            Role::Manager => DashboardKind::Manager,
            Role::Director => DashboardKind::Director,
            Role::Payroll => DashboardKind::Payroll,
            Role::Employee => DashboardKind::Employee,
        }
    }

    /// Dispatch on a raw role string. Anything unrecognized gets the
    /// least-privileged dashboard.
    pub fn for_role_name(name: &str) -> Self {
        Role::parse(name)
            .map(Self::for_role)
            .unwrap_or(DashboardKind::Employee)
    }

    pub fn title(&self) -> &'static str {
        match self {
            DashboardKind::Platform => "Platform Overview",
            DashboardKind::Organization => "Organization Overview",
            DashboardKind::Hr => "HR Dashboard",
            DashboardKind::Manager => "Team Dashboard",
            DashboardKind::Director => "Department Overview",
            DashboardKind::Payroll => "Payroll Dashboard",
            DashboardKind::Employee => "My Dashboard",
        }
    }
}

/// Counters returned by `GET /dashboard/summary`. The backend fills only the
/// ones relevant to the caller's role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    #[serde(default)]
    pub total_organizations: Option<i64>,
    #[serde(default)]
    pub total_users: Option<i64>,
    #[serde(default)]
    pub total_employees: Option<i64>,
    #[serde(default)]
    pub total_departments: Option<i64>,
    #[serde(default)]
    pub present_today: Option<i64>,
    #[serde(default)]
    pub pending_leave_requests: Option<i64>,
    #[serde(default)]
    pub payroll_total: Option<f64>,
    #[serde(default)]
    pub payroll_pending: Option<i64>,
    #[serde(default)]
    pub open_expense_reports: Option<i64>,
    #[serde(default)]
    pub active_courses: Option<i64>,
    #[serde(default)]
    pub leave_balance_days: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_is_total_over_roles() {
        let kinds: Vec<DashboardKind> = Role::ALL.iter().map(|r| DashboardKind::for_role(*r)).collect();
        assert_eq!(
            kinds,
            vec![
                DashboardKind::Platform,
                DashboardKind::Organization,
                DashboardKind::Hr,
                DashboardKind::Manager,
                DashboardKind::Director,
                DashboardKind::Payroll,
                DashboardKind::Employee,
            ]
        );
    }

    #[test]
    fn unknown_role_names_get_employee_dashboard() {
        assert_eq!(DashboardKind::for_role_name("INTERN"), DashboardKind::Employee);
        assert_eq!(DashboardKind::for_role_name(""), DashboardKind::Employee);
        assert_eq!(DashboardKind::for_role_name("director"), DashboardKind::Director);
    }

    #[test]
    fn summary_tolerates_missing_counters() {
        let summary: DashboardSummary = serde_json::from_str(r#"{"total_employees": 12}"#).unwrap();
        assert_eq!(summary.total_employees, Some(12));
        assert_eq!(summary.pending_leave_requests, None);
    }
}
