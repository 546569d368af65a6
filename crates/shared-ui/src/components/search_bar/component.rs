use dioxus::prelude::*;

/// Flex row holding a search box, filters and buttons.
#[component]
pub fn SearchBar(children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "search-bar",
            {children}
        }
    }
}

/// Search box that reports every keystroke; callers debounce.
#[component]
pub fn SearchInput(
    value: String,
    on_input: EventHandler<String>,
    #[props(default = "Search...".to_string())] placeholder: String,
) -> Element {
    rsx! {
        input {
            class: "search-input",
            r#type: "search",
            value: value,
            placeholder: placeholder,
            oninput: move |evt| on_input.call(evt.value()),
        }
    }
}
