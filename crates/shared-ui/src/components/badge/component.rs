use dioxus::prelude::*;

/// Visual variant for badges.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BadgeVariant {
    #[default]
    Neutral,
    Info,
    Success,
    Warning,
    Danger,
}

impl BadgeVariant {
    fn class(&self) -> &'static str {
        match self {
            BadgeVariant::Neutral => "neutral",
            BadgeVariant::Info => "info",
            BadgeVariant::Success => "success",
            BadgeVariant::Warning => "warning",
            BadgeVariant::Danger => "danger",
        }
    }

    /// Pick a variant for a wire status such as `APPROVED` or `ON_LEAVE`.
    pub fn for_status(status: &str) -> Self {
        match status {
            "ACTIVE" | "APPROVED" | "PAID" | "COMPLETED" | "PUBLISHED" | "PRESENT" | "REIMBURSED" => {
                BadgeVariant::Success
            }
            "PENDING" | "SUBMITTED" | "DRAFT" | "PROBATION" | "LATE" | "HALF_DAY" | "IN_PROGRESS"
            | "ENROLLED" | "PROCESSED" => BadgeVariant::Warning,
            "REJECTED" | "SUSPENDED" | "TERMINATED" | "ABSENT" | "DROPPED" | "CANCELLED" => {
                BadgeVariant::Danger
            }
            "ON_LEAVE" | "REMOTE" => BadgeVariant::Info,
            _ => BadgeVariant::Neutral,
        }
    }
}

/// Inline label for statuses and categories.
#[component]
pub fn Badge(
    #[props(default)] variant: BadgeVariant,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let base = vec![
        Attribute::new("class", "badge", None, false),
        Attribute::new("data-style", variant.class(), None, false),
    ];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        span {
            ..merged,
            {children}
        }
    }
}

/// Badge whose colour follows a wire status; shows `label`.
#[component]
pub fn StatusBadge(status: String, label: String) -> Element {
    rsx! {
        Badge { variant: BadgeVariant::for_status(&status), "{label}" }
    }
}
