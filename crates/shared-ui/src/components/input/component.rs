use dioxus::prelude::*;

/// Labelled single-line input with an optional error line.
#[component]
pub fn Input(
    #[props(default)] value: String,
    #[props(default)] on_input: EventHandler<FormEvent>,
    #[props(default)] placeholder: String,
    #[props(default)] label: String,
    #[props(default = "text".to_string())] input_type: String,
    #[props(default = false)] disabled: bool,
    #[props(default = false)] required: bool,
    #[props(default)] error: Option<String>,
    /// Lower bound for number and date inputs.
    #[props(default)] min: Option<String>,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
) -> Element {
    let invalid = error.as_deref().is_some_and(|e| !e.is_empty());
    let base = vec![
        Attribute::new("class", "input", None, false),
        Attribute::new("aria-invalid", if invalid { "true" } else { "false" }, None, false),
    ];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "input-wrapper",
            if !label.is_empty() {
                label { class: "input-label",
                    "{label}"
                    if required {
                        span { class: "input-required", " *" }
                    }
                }
            }
            input {
                r#type: "{input_type}",
                value: value,
                placeholder: placeholder,
                disabled: disabled,
                required: required,
                min: min,
                oninput: move |evt| on_input.call(evt),
                ..merged,
            }
            if let Some(error) = error.filter(|e| !e.is_empty()) {
                p { class: "input-error", "{error}" }
            }
        }
    }
}

/// Multi-line variant of [`Input`].
#[component]
pub fn Textarea(
    #[props(default)] value: String,
    #[props(default)] on_input: EventHandler<FormEvent>,
    #[props(default)] placeholder: String,
    #[props(default)] label: String,
    #[props(default = 3)] rows: u32,
    #[props(default = false)] disabled: bool,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "input-wrapper",
            if !label.is_empty() {
                label { class: "input-label", "{label}" }
            }
            textarea {
                class: "input textarea",
                rows: "{rows}",
                value: value,
                placeholder: placeholder,
                disabled: disabled,
                oninput: move |evt| on_input.call(evt),
            }
        }
    }
}
