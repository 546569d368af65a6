use dioxus::prelude::*;
use shared_types::{Module, ModuleToggles};

/// Module switches of the signed-in user's organization. Provided by the
/// app layout; every module counts as enabled until the organization loads.
#[derive(Clone, Copy, PartialEq)]
pub struct OrgModules(pub Signal<ModuleToggles>);

/// Renders `children` only while `module` is enabled for the organization.
#[component]
pub fn ModuleGate(module: Module, children: Element) -> Element {
    let OrgModules(toggles) = use_context::<OrgModules>();

    if toggles.read().is_enabled(module) {
        return children;
    }

    let label = module.label();
    rsx! {
        div { class: "module-disabled",
            h2 { "{label} is turned off" }
            p { "Your organization has disabled the {label} module. Ask an administrator to enable it." }
        }
    }
}
