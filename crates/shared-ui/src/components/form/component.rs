use dioxus::prelude::*;

/// Form wrapper that suppresses the browser's default submission.
#[component]
pub fn Form(
    #[props(default)] onsubmit: EventHandler<FormEvent>,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let base = vec![Attribute::new("class", "form", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        form {
            onsubmit: move |evt| {
                evt.prevent_default();
                onsubmit.call(evt);
            },
            ..merged,
            {children}
        }
    }
}

/// Two-column grid for short fields.
#[component]
pub fn FormRow(children: Element) -> Element {
    rsx! {
        div { class: "form-row", {children} }
    }
}

/// Message under a field the server or validator rejected.
#[component]
pub fn FieldError(#[props(default)] message: Option<String>) -> Element {
    match message {
        Some(message) if !message.is_empty() => rsx! {
            p { class: "field-error", role: "alert", "{message}" }
        },
        _ => rsx! {},
    }
}

/// Labelled checkbox reporting its new state.
#[component]
pub fn CheckboxField(
    label: String,
    checked: bool,
    #[props(default)] on_change: EventHandler<bool>,
    #[props(default = false)] disabled: bool,
) -> Element {
    rsx! {
        label { class: "checkbox-field",
            input {
                r#type: "checkbox",
                checked: checked,
                disabled: disabled,
                onchange: move |evt| on_change.call(evt.checked()),
            }
            span { "{label}" }
        }
    }
}
