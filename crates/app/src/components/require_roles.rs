use dioxus::prelude::*;
use shared_types::{guard_decision, GuardDecision, Role};

use super::AccessDenied;
use crate::auth::use_auth;
use crate::routes::Route;

/// Guard for a section that needs an explicit role list instead of the
/// route table. Denied users see `fallback`, or the access denied view.
#[component]
pub fn RequireRoles(
    roles: Vec<Role>,
    #[props(default)] fallback: Option<Element>,
    children: Element,
) -> Element {
    let auth = use_auth();
    let route: Route = use_route();

    match guard_decision(auth.current_user.read().as_ref(), &roles, &route.to_string()) {
        GuardDecision::Allow => children,
        GuardDecision::RedirectToLogin => {
            navigator().replace(Route::Login {});
            rsx! {}
        }
        GuardDecision::Deny => match fallback {
            Some(fallback) => fallback,
            None => rsx! { AccessDenied {} },
        },
    }
}
