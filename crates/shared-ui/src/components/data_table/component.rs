use dioxus::prelude::*;

/// Scrollable table wrapper.
#[component]
pub fn DataTable(children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "data-table",
            table {
                {children}
            }
        }
    }
}

/// Wraps `DataTableColumn`s in a `thead > tr`.
#[component]
pub fn DataTableHeader(children: Element) -> Element {
    rsx! {
        thead {
            tr { {children} }
        }
    }
}

#[component]
pub fn DataTableBody(children: Element) -> Element {
    rsx! {
        tbody { {children} }
    }
}

#[component]
pub fn DataTableColumn(children: Element) -> Element {
    rsx! {
        th { {children} }
    }
}

#[component]
pub fn DataTableRow(
    #[props(default)] onclick: Option<EventHandler<MouseEvent>>,
    children: Element,
) -> Element {
    let has_click = onclick.is_some();
    rsx! {
        tr {
            class: if has_click { "data-table-row clickable" } else { "data-table-row" },
            onclick: move |evt| {
                if let Some(handler) = &onclick {
                    handler.call(evt);
                }
            },
            {children}
        }
    }
}

#[component]
pub fn DataTableCell(children: Element) -> Element {
    rsx! {
        td { {children} }
    }
}

/// Single full-width row shown when a list has no entries.
#[component]
pub fn DataTableEmpty(colspan: usize, message: String) -> Element {
    rsx! {
        tr { class: "data-table-empty",
            td { colspan: "{colspan}", "{message}" }
        }
    }
}
