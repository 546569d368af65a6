use dioxus::prelude::*;

/// Pulsing placeholder shown while data loads.
#[component]
pub fn Skeleton(#[props(extends = GlobalAttributes)] attributes: Vec<Attribute>) -> Element {
    let base = vec![Attribute::new("class", "skeleton", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            ..merged,
        }
    }
}

/// A stack of line placeholders for table-shaped content.
#[component]
pub fn SkeletonRows(#[props(default = 5)] rows: usize) -> Element {
    rsx! {
        div { class: "skeleton-rows", "aria-busy": "true",
            for i in 0..rows {
                Skeleton { key: "{i}", class: "skeleton-line" }
            }
        }
    }
}
