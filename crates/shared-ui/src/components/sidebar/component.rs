use dioxus::prelude::*;

/// Open/closed state of the navigation sidebar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SidebarState {
    pub open: bool,
}

/// Provides [`SidebarState`] to the shell and its children.
#[component]
pub fn SidebarProvider(#[props(default = true)] default_open: bool, children: Element) -> Element {
    let state = use_signal(|| SidebarState { open: default_open });
    use_context_provider(|| state);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            class: "sidebar-provider",
            "data-sidebar-open": if state().open { "true" } else { "false" },
            {children}
        }
    }
}

fn use_sidebar() -> Signal<SidebarState> {
    use_context::<Signal<SidebarState>>()
}

/// Collapsible navigation column. On narrow screens a backdrop closes it.
#[component]
pub fn Sidebar(children: Element) -> Element {
    let mut state = use_sidebar();
    let is_open = state().open;

    rsx! {
        if is_open {
            div {
                class: "sidebar-backdrop",
                onclick: move |_| state.set(SidebarState { open: false }),
            }
        }
        aside {
            class: "sidebar",
            "data-state": if is_open { "open" } else { "closed" },
            {children}
        }
    }
}

#[component]
pub fn SidebarHeader(children: Element) -> Element {
    rsx! {
        div { class: "sidebar-header", {children} }
    }
}

#[component]
pub fn SidebarContent(children: Element) -> Element {
    rsx! {
        nav { class: "sidebar-content", {children} }
    }
}

#[component]
pub fn SidebarFooter(children: Element) -> Element {
    rsx! {
        div { class: "sidebar-footer", {children} }
    }
}

#[component]
pub fn SidebarMenu(children: Element) -> Element {
    rsx! {
        ul { class: "sidebar-menu", {children} }
    }
}

/// Menu entry; `active` highlights the current route.
#[component]
pub fn SidebarMenuItem(#[props(default = false)] active: bool, children: Element) -> Element {
    rsx! {
        li {
            class: "sidebar-menu-item",
            "data-active": if active { "true" } else { "false" },
            {children}
        }
    }
}

/// Hamburger button toggling the sidebar.
#[component]
pub fn SidebarTrigger() -> Element {
    let mut state = use_sidebar();

    rsx! {
        button {
            class: "sidebar-trigger",
            r#type: "button",
            "aria-label": "Toggle navigation",
            onclick: move |_| {
                let open = state().open;
                state.set(SidebarState { open: !open });
            },
            "\u{2630}"
        }
    }
}

/// Main content column next to the sidebar.
#[component]
pub fn SidebarInset(children: Element) -> Element {
    rsx! {
        main { class: "sidebar-inset", {children} }
    }
}
