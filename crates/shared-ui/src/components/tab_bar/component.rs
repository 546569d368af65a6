use dioxus::prelude::*;

/// One entry of a [`TabBar`].
#[derive(Debug, Clone, PartialEq)]
pub struct TabItem {
    pub value: String,
    pub label: String,
    pub count: Option<usize>,
}

impl TabItem {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            count: None,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

/// Horizontal tab strip for category and status filters.
#[component]
pub fn TabBar(tabs: Vec<TabItem>, active: String, on_select: EventHandler<String>) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "tab-bar", role: "tablist",
            for tab in tabs {
                button {
                    key: "{tab.value}",
                    class: "tab-bar-item",
                    r#type: "button",
                    role: "tab",
                    "aria-selected": if tab.value == active { "true" } else { "false" },
                    onclick: {
                        let value = tab.value.clone();
                        move |_| on_select.call(value.clone())
                    },
                    "{tab.label}"
                    if let Some(count) = tab.count {
                        span { class: "tab-bar-count", "{count}" }
                    }
                }
            }
        }
    }
}
