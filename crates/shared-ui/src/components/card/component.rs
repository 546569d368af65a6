use dioxus::prelude::*;

/// Bordered surface grouping related content.
#[component]
pub fn Card(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let base = vec![Attribute::new("class", "card", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            ..merged,
            {children}
        }
    }
}

#[component]
pub fn CardHeader(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let base = vec![Attribute::new("class", "card-header", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        div {
            ..merged,
            {children}
        }
    }
}

#[component]
pub fn CardTitle(children: Element) -> Element {
    rsx! {
        h3 { class: "card-title", {children} }
    }
}

#[component]
pub fn CardDescription(children: Element) -> Element {
    rsx! {
        p { class: "card-description", {children} }
    }
}

#[component]
pub fn CardContent(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let base = vec![Attribute::new("class", "card-content", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        div {
            ..merged,
            {children}
        }
    }
}

#[component]
pub fn CardFooter(children: Element) -> Element {
    rsx! {
        div { class: "card-footer", {children} }
    }
}
