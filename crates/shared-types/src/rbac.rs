//! Route authorization and menu filtering.
//!
//! [`NAV_ITEMS`] is the only place that says which roles may open which
//! route. The router guard, the sidebar and the page-level write checks all
//! read from it.

use crate::{Role, User};

use Role::{Director as DI, Employee as EM, Hr as HR, Manager as MG, OrgAdmin as OA, Payroll as PY, SuperAdmin as SA};

const EVERYONE: &[Role] = &[SA, OA, HR, MG, DI, PY, EM];

/// Where a signed-in user lands. The only route open to a user whose role
/// string is not recognized.
pub const LANDING_PATH: &str = "/dashboard";

/// A navigable application section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    /// Absolute route path, e.g. `/employees`.
    pub path: &'static str,
    pub label: &'static str,
    /// Key the app maps to an icon.
    pub icon: &'static str,
    /// Roles allowed to see and open this route.
    pub roles: &'static [Role],
}

impl NavItem {
    pub fn allows(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Authoritative route → roles table, in menu order.
pub const NAV_ITEMS: &[NavItem] = &[
    NavItem { path: "/dashboard", label: "Dashboard", icon: "dashboard", roles: EVERYONE },
    NavItem { path: "/users", label: "Users", icon: "users", roles: &[SA, OA] },
    NavItem { path: "/organizations", label: "Organizations", icon: "building", roles: &[SA] },
    NavItem { path: "/employees", label: "Employees", icon: "id-card", roles: &[SA, OA, HR, MG, DI] },
    NavItem { path: "/departments", label: "Departments", icon: "network", roles: &[SA, OA, HR, DI] },
    NavItem { path: "/attendance", label: "Attendance", icon: "clock", roles: &[OA, HR, MG, DI, EM] },
    NavItem { path: "/leave", label: "Leave", icon: "calendar", roles: &[OA, HR, MG, DI, EM] },
    NavItem { path: "/payroll", label: "Payroll", icon: "wallet", roles: &[OA, HR, PY] },
    NavItem { path: "/documents", label: "Documents", icon: "folder", roles: EVERYONE },
    NavItem { path: "/training", label: "Training", icon: "graduation", roles: &[OA, HR, MG, DI, EM] },
    NavItem { path: "/expenses", label: "Expenses", icon: "receipt", roles: &[OA, HR, MG, DI, PY, EM] },
    NavItem { path: "/reports", label: "Reports", icon: "chart", roles: &[SA, OA, HR, DI, PY] },
    NavItem { path: "/ai-tools", label: "AI Tools", icon: "sparkles", roles: EVERYONE },
    NavItem { path: "/profile", label: "Profile", icon: "user", roles: EVERYONE },
];

/// Strip query string, fragment and trailing slash so lookups are exact.
pub fn normalize_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}

/// Look up the table entry for a path.
pub fn nav_item(path: &str) -> Option<&'static NavItem> {
    let path = normalize_path(path);
    NAV_ITEMS.iter().find(|item| item.path == path)
}

/// Roles allowed on a path. Empty for paths missing from the table.
pub fn allowed_roles(path: &str) -> &'static [Role] {
    nav_item(path).map(|item| item.roles).unwrap_or(&[])
}

/// Whether `role` may open `path`. Unknown paths are denied.
pub fn can_access_route(path: &str, role: Role) -> bool {
    allowed_roles(path).contains(&role)
}

/// Menu entries visible to `role`, in table order. An unrecognized role
/// (`None`) sees the landing entry only.
pub fn visible_items(role: Option<Role>) -> Vec<&'static NavItem> {
    NAV_ITEMS
        .iter()
        .filter(|item| match role {
            Some(role) => item.allows(role),
            None => item.path == LANDING_PATH,
        })
        .collect()
}

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
    Deny,
}

/// Decide whether the current user may render a route.
///
/// A non-empty `required` list takes precedence over the table; an empty one
/// defers to [`can_access_route`] for `path`. A user whose role is not
/// recognized is denied everything except [`LANDING_PATH`].
pub fn guard_decision(user: Option<&User>, required: &[Role], path: &str) -> GuardDecision {
    let Some(user) = user else {
        return GuardDecision::RedirectToLogin;
    };

    let permitted = match user.role() {
        Some(role) if required.is_empty() => can_access_route(path, role),
        Some(role) => required.contains(&role),
        None => required.is_empty() && normalize_path(path) == LANDING_PATH,
    };
    if permitted {
        GuardDecision::Allow
    } else {
        GuardDecision::Deny
    }
}

/// Data areas with create/update/delete affordances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Users,
    Organizations,
    Employees,
    Departments,
    Attendance,
    Leave,
    Payroll,
    Documents,
    Training,
    Expenses,
}

impl Domain {
    /// Roles that may create, edit or delete records in this area.
    pub fn managers(&self) -> &'static [Role] {
        match self {
            Domain::Users => &[SA, OA],
            Domain::Organizations => &[SA],
            Domain::Employees => &[SA, OA, HR],
            Domain::Departments => &[SA, OA, HR],
            Domain::Attendance => &[OA, HR],
            Domain::Leave => &[OA, HR, MG, DI],
            Domain::Payroll => &[OA, HR, PY],
            Domain::Documents => &[SA, OA, HR],
            Domain::Training => &[OA, HR],
            Domain::Expenses => &[OA, HR, MG, DI, PY],
        }
    }
}

/// Whether `role` gets write affordances in `domain`.
pub fn can_manage(domain: Domain, role: Role) -> bool {
    domain.managers().contains(&role)
}
