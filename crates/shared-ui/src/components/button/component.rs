use dioxus::prelude::*;

/// Visual variant for buttons.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Destructive,
    Outline,
    Ghost,
}

impl ButtonVariant {
    fn class(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => "primary",
            ButtonVariant::Secondary => "secondary",
            ButtonVariant::Destructive => "destructive",
            ButtonVariant::Outline => "outline",
            ButtonVariant::Ghost => "ghost",
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct ButtonProps {
    #[props(default)]
    pub variant: ButtonVariant,
    #[props(default = false)]
    pub disabled: bool,
    /// Shows a busy state and blocks clicks.
    #[props(default = false)]
    pub loading: bool,
    /// `button` or `submit`.
    #[props(default = "button".to_string())]
    pub button_type: String,
    #[props(default)]
    pub onclick: Option<EventHandler<MouseEvent>>,
    #[props(extends = GlobalAttributes)]
    pub attributes: Vec<Attribute>,
    pub children: Element,
}

#[component]
pub fn Button(props: ButtonProps) -> Element {
    let base = vec![
        Attribute::new("class", "button", None, false),
        Attribute::new("data-style", props.variant.class(), None, false),
    ];
    let merged = dioxus_primitives::merge_attributes(vec![base, props.attributes]);
    let blocked = props.disabled || props.loading;

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        button {
            r#type: "{props.button_type}",
            disabled: blocked,
            "aria-busy": if props.loading { "true" } else { "false" },
            onclick: move |evt| {
                if blocked {
                    return;
                }
                if let Some(handler) = &props.onclick {
                    handler.call(evt);
                }
            },
            ..merged,
            {props.children}
        }
    }
}
