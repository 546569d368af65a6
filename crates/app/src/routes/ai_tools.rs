use dioxus::prelude::*;
use shared_types::{can_access_route, filter_tools, nav_item, AiTool, AiToolCategory, Role, TabFilter};
use shared_ui::{
    Badge, BadgeVariant, Card, CardContent, CardDescription, CardFooter, CardHeader, CardTitle,
    PageHeader, SearchBar, SearchInput, TabBar, TabItem,
};

use crate::auth::use_auth;
use crate::hooks::use_debounced_search;

fn category_filter(tab: &str) -> TabFilter<AiToolCategory> {
    AiToolCategory::ALL
        .iter()
        .find(|c| c.label() == tab)
        .copied()
        .map(TabFilter::Only)
        .unwrap_or_default()
}

/// The section a tool works on, when the signed-in role may open it.
fn reachable_section(tool: &AiTool, role: Option<Role>) -> Option<&'static str> {
    let role = role?;
    if !can_access_route(tool.route_hint, role) {
        return None;
    }
    nav_item(tool.route_hint).map(|item| item.label)
}

#[component]
pub fn AiTools() -> Element {
    let auth = use_auth();
    let mut search = use_debounced_search();
    let mut category_tab = use_signal(|| "all".to_string());

    let active = category_tab.read().clone();
    let tools = filter_tools(&search.query.read(), category_filter(&active));
    let role = auth.role();

    let mut tabs = vec![TabItem::new("all", "All")];
    tabs.extend(AiToolCategory::ALL.iter().map(|c| TabItem::new(c.label(), c.label())));

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./ai_tools.css") }

        div { class: "ai-tools-page",
            PageHeader {
                title: "AI Tools".to_string(),
                subtitle: Some("Assistants for common HR tasks".to_string()),
            }

            SearchBar {
                SearchInput {
                    value: search.input.read().clone(),
                    placeholder: "Search tools".to_string(),
                    on_input: move |value: String| search.on_input(value),
                }
            }

            TabBar {
                tabs,
                active: active.clone(),
                on_select: move |value: String| category_tab.set(value),
            }

            if tools.is_empty() {
                p { class: "ai-tools-empty", "No tools match your search." }
            }

            div { class: "ai-tools-grid",
                for tool in tools {
                    Card { key: "{tool.id}", class: "ai-tool-card",
                        CardHeader {
                            CardTitle { "{tool.name}" }
                            CardDescription { "{tool.description}" }
                        }
                        CardContent {
                            Badge { variant: BadgeVariant::Info, "{tool.category.label()}" }
                        }
                        CardFooter {
                            match reachable_section(tool, role) {
                                Some(section) => rsx! {
                                    span { class: "ai-tool-link",
                                        Link { to: tool.route_hint, "Open {section}" }
                                    }
                                },
                                None => rsx! {
                                    span { class: "ai-tool-unavailable", "Not available for your role" }
                                },
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
    use shared_types::AI_TOOLS;

    #[test]
    fn tab_values_map_back_to_categories() {
        assert_eq!(category_filter("all"), TabFilter::All);
        assert_eq!(category_filter("Analytics"), TabFilter::Only(AiToolCategory::Analytics));
        assert_eq!(category_filter("unknown"), TabFilter::All);
    }

    #[test]
    fn sections_follow_route_access() {
        let payroll = AI_TOOLS.iter().find(|t| t.route_hint == "/payroll").unwrap();
        assert_eq!(reachable_section(payroll, Some(Role::Payroll)), Some("Payroll"));
        assert_eq!(reachable_section(payroll, Some(Role::Employee)), None);
        assert_eq!(reachable_section(payroll, None), None);
    }
}
