pub mod ai_tools;
pub mod attendance;
pub mod dashboard;
pub mod departments;
pub mod documents;
pub mod employees;
pub mod expenses;
pub mod leave;
pub mod login;
pub mod not_found;
pub mod organizations;
pub mod payroll;
pub mod profile;
pub mod reports;
pub mod training;
pub mod users;

use api::ApiClient;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{
    LdBookOpen, LdBriefcase, LdBuilding, LdCalendar, LdClock, LdFileText, LdFolder,
    LdLayoutDashboard, LdLogOut, LdReceipt, LdSparkles, LdUser, LdUserCheck, LdUsers, LdWallet,
};
use dioxus_free_icons::Icon;
use shared_types::{guard_decision, nav_item, normalize_path, visible_items, GuardDecision, ModuleToggles};
use shared_ui::{
    Badge, BadgeVariant, Sidebar, SidebarContent, SidebarFooter, SidebarHeader, SidebarInset,
    SidebarMenu, SidebarMenuItem, SidebarProvider, SidebarTrigger,
};

use crate::auth::{restore_session, sign_out, use_auth};
use crate::components::{AccessDenied, OrgModules};

use ai_tools::AiTools;
use attendance::Attendance;
use dashboard::Dashboard;
use departments::Departments;
use documents::Documents;
use employees::Employees;
use expenses::Expenses;
use leave::Leave;
use login::Login;
use not_found::NotFound;
use organizations::Organizations;
use payroll::Payroll;
use profile::Profile;
use reports::Reports;
use training::Training;
use users::Users;

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/login")]
    Login {},
    #[redirect("/", || Route::Dashboard {})]
    #[layout(AuthGuard)]
    #[layout(AppLayout)]
    #[layout(RoleGate)]
    #[route("/dashboard")]
    Dashboard {},
    #[route("/users")]
    Users {},
    #[route("/organizations")]
    Organizations {},
    #[route("/employees")]
    Employees {},
    #[route("/departments")]
    Departments {},
    #[route("/attendance")]
    Attendance {},
    #[route("/leave")]
    Leave {},
    #[route("/payroll")]
    Payroll {},
    #[route("/documents")]
    Documents {},
    #[route("/training")]
    Training {},
    #[route("/expenses")]
    Expenses {},
    #[route("/reports")]
    Reports {},
    #[route("/ai-tools")]
    AiTools {},
    #[route("/profile")]
    Profile {},
    #[end_layout]
    #[end_layout]
    #[end_layout]
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

/// Auth guard layout. Restores the session from browser storage once, then
/// either renders the protected page or sends the visitor to `/login`.
#[component]
fn AuthGuard() -> Element {
    let auth = use_auth();
    let client = use_context::<ApiClient>();

    let restore = use_resource(move || {
        let client = client.clone();
        let mut auth = auth;
        async move {
            if auth.current_user.peek().is_some() {
                return;
            }
            if let Some(user) = restore_session(&client).await {
                auth.set_user(user);
            }
        }
    });

    if auth.is_authenticated() {
        return rsx! { Outlet::<Route> {} };
    }

    if restore.read().is_some() {
        navigator().replace(Route::Login {});
        rsx! {
            div { class: "auth-guard-loading",
                p { "Redirecting to login..." }
            }
        }
    } else {
        rsx! {
            div { class: "auth-guard-loading",
                p { "Loading..." }
            }
        }
    }
}

/// Route table check for every protected page.
#[component]
fn RoleGate() -> Element {
    let auth = use_auth();
    let route: Route = use_route();

    match guard_decision(auth.current_user.read().as_ref(), &[], &route.to_string()) {
        GuardDecision::Allow => rsx! { Outlet::<Route> {} },
        GuardDecision::RedirectToLogin => {
            navigator().replace(Route::Login {});
            rsx! {}
        }
        GuardDecision::Deny => {
            tracing::debug!(path = %route, "route denied by role");
            rsx! { AccessDenied {} }
        }
    }
}

/// Header title for a path, taken from the navigation table.
pub fn page_title(path: &str) -> &'static str {
    nav_item(path).map(|item| item.label).unwrap_or("HR Pilot")
}

fn nav_icon(key: &str) -> Element {
    match key {
        "dashboard" => rsx! { Icon::<LdLayoutDashboard> { icon: LdLayoutDashboard, width: 18, height: 18 } },
        "users" => rsx! { Icon::<LdUsers> { icon: LdUsers, width: 18, height: 18 } },
        "building" => rsx! { Icon::<LdBuilding> { icon: LdBuilding, width: 18, height: 18 } },
        "id-card" => rsx! { Icon::<LdUserCheck> { icon: LdUserCheck, width: 18, height: 18 } },
        "network" => rsx! { Icon::<LdBriefcase> { icon: LdBriefcase, width: 18, height: 18 } },
        "clock" => rsx! { Icon::<LdClock> { icon: LdClock, width: 18, height: 18 } },
        "calendar" => rsx! { Icon::<LdCalendar> { icon: LdCalendar, width: 18, height: 18 } },
        "wallet" => rsx! { Icon::<LdWallet> { icon: LdWallet, width: 18, height: 18 } },
        "folder" => rsx! { Icon::<LdFolder> { icon: LdFolder, width: 18, height: 18 } },
        "graduation" => rsx! { Icon::<LdBookOpen> { icon: LdBookOpen, width: 18, height: 18 } },
        "receipt" => rsx! { Icon::<LdReceipt> { icon: LdReceipt, width: 18, height: 18 } },
        "chart" => rsx! { Icon::<LdFileText> { icon: LdFileText, width: 18, height: 18 } },
        "sparkles" => rsx! { Icon::<LdSparkles> { icon: LdSparkles, width: 18, height: 18 } },
        _ => rsx! { Icon::<LdUser> { icon: LdUser, width: 18, height: 18 } },
    }
}

/// Main app layout: role-filtered sidebar, top bar and page outlet.
#[component]
fn AppLayout() -> Element {
    let route: Route = use_route();
    let auth = use_auth();
    let client = use_context::<ApiClient>();

    let mut modules = use_context_provider(|| OrgModules(Signal::new(ModuleToggles::default())));
    let org_client = client.clone();
    let _org = use_resource(move || {
        let client = org_client.clone();
        let org_id = auth.current_user.read().as_ref().and_then(|u| u.organization_id);
        async move {
            let toggles = match org_id {
                Some(id) => match api::organizations::get_organization(&client, id).await {
                    Ok(org) => org.modules,
                    Err(err) => {
                        tracing::debug!(%err, "organization modules unavailable");
                        ModuleToggles::default()
                    }
                },
                None => ModuleToggles::default(),
            };
            modules.0.set(toggles);
        }
    });

    let user = auth.current_user.read().clone();
    let Some(user) = user else {
        return rsx! {};
    };

    let path = route.to_string();
    let current = normalize_path(&path).to_string();
    let title = page_title(&current);
    let items = visible_items(user.role());
    let full_name = user.full_name();
    let role_label = user.role_label().to_string();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./layout.css") }

        SidebarProvider { default_open: true,
            Sidebar {
                SidebarHeader {
                    div { class: "sidebar-brand",
                        span { class: "sidebar-brand-name", "HR Pilot" }
                    }
                }

                SidebarContent {
                    SidebarMenu {
                        for item in items {
                            SidebarMenuItem { key: "{item.path}", active: current == item.path,
                                Link { to: item.path.to_string(),
                                    span { class: "sidebar-link",
                                        {nav_icon(item.icon)}
                                        span { "{item.label}" }
                                    }
                                }
                            }
                        }
                    }
                }

                SidebarFooter {
                    div { class: "sidebar-user",
                        span { class: "sidebar-user-name", "{full_name}" }
                        Badge { variant: BadgeVariant::Info, "{role_label}" }
                    }
                    button {
                        class: "sidebar-logout",
                        r#type: "button",
                        onclick: move |_| {
                            let client = client.clone();
                            spawn(sign_out(client, auth));
                        },
                        Icon::<LdLogOut> { icon: LdLogOut, width: 16, height: 16 }
                        "Sign out"
                    }
                }
            }

            SidebarInset {
                header { class: "app-topbar",
                    SidebarTrigger {}
                    h1 { class: "app-topbar-title", "{title}" }
                }
                div { class: "app-content",
                    Outlet::<Route> {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn route_paths_match_the_navigation_table() {
        let routes = [
            Route::Dashboard {},
            Route::Users {},
            Route::Organizations {},
            Route::Employees {},
            Route::Departments {},
            Route::Attendance {},
            Route::Leave {},
            Route::Payroll {},
            Route::Documents {},
            Route::Training {},
            Route::Expenses {},
            Route::Reports {},
            Route::AiTools {},
            Route::Profile {},
        ];
        let paths: Vec<String> = routes.iter().map(|r| r.to_string()).collect();
        let table: Vec<&str> = shared_types::NAV_ITEMS.iter().map(|item| item.path).collect();
        assert_eq!(paths, table);
    }

    #[test]
    fn titles_come_from_the_table() {
        assert_eq!(page_title("/ai-tools"), "AI Tools");
        assert_eq!(page_title("/payroll/"), "Payroll");
        assert_eq!(page_title("/login"), "HR Pilot");
    }

    #[test]
    fn login_route_is_outside_the_guarded_set() {
        assert_eq!(Route::Login {}.to_string(), "/login");
        assert!(shared_types::nav_item("/login").is_none());
    }
}
