use dioxus::prelude::*;
use pretty_assertions::assert_eq;
use shared_ui::*;

fn render(element: Element) -> String {
    dioxus_ssr::render_element(element)
}

#[test]
fn badge_picks_variant_from_status() {
    assert_eq!(BadgeVariant::for_status("APPROVED"), BadgeVariant::Success);
    assert_eq!(BadgeVariant::for_status("PENDING"), BadgeVariant::Warning);
    assert_eq!(BadgeVariant::for_status("REJECTED"), BadgeVariant::Danger);
    assert_eq!(BadgeVariant::for_status("ON_LEAVE"), BadgeVariant::Info);
    assert_eq!(BadgeVariant::for_status("SOMETHING_ELSE"), BadgeVariant::Neutral);

    let html = render(rsx! {
        StatusBadge { status: "APPROVED".to_string(), label: "Approved".to_string() }
    });
    assert!(html.contains("data-style=\"success\""), "{html}");
    assert!(html.contains(">Approved<"), "{html}");
}

#[test]
fn closed_modal_renders_nothing() {
    let html = render(rsx! {
        Modal { open: false, title: "Edit".to_string(), on_close: move |_| {}, p { "body" } }
    });
    assert!(!html.contains("modal-panel"));
    assert!(!html.contains("body"));
}

#[test]
fn open_modal_renders_title_body_and_footer() {
    let html = render(rsx! {
        Modal {
            open: true,
            title: "New Employee".to_string(),
            on_close: move |_| {},
            footer: rsx! { button { "Save" } },
            p { "form goes here" }
        }
    });
    assert!(html.contains("New Employee"));
    assert!(html.contains("form goes here"));
    assert!(html.contains("modal-footer"));
    assert!(html.contains("aria-modal=\"true\""));
}

#[test]
fn banner_shows_retry_only_with_handler() {
    let without = render(rsx! {
        Banner { tone: BannerTone::Error, message: "Network error".to_string() }
    });
    assert!(without.contains("Network error"));
    assert!(!without.contains("Retry"));

    let with = render(rsx! {
        Banner { tone: BannerTone::Error, message: "Network error".to_string(), on_retry: move |_| {} }
    });
    assert!(with.contains("Retry"));
    assert!(with.contains("data-tone=\"error\""));
}

#[test]
fn tab_bar_marks_active_tab_and_counts() {
    let tabs = vec![
        TabItem::new("", "All").with_count(4),
        TabItem::new("POLICY", "Policy").with_count(2),
    ];
    let html = render(rsx! {
        TabBar { tabs, active: "POLICY".to_string(), on_select: move |_| {} }
    });
    assert_eq!(html.matches("aria-selected=\"true\"").count(), 1);
    assert_eq!(html.matches("aria-selected=\"false\"").count(), 1);
    assert!(html.contains("tab-bar-count"));
}

#[test]
fn input_surfaces_error_message() {
    let html = render(rsx! {
        Input { label: "Email".to_string(), value: "x".to_string(), required: true, error: "Valid email is required".to_string() }
    });
    assert!(html.contains("aria-invalid=\"true\""));
    assert!(html.contains("Valid email is required"));
    assert!(html.contains("input-required"));
}

#[test]
fn field_error_hidden_when_empty() {
    let html = render(rsx! { FieldError {} });
    assert!(!html.contains("field-error"));
    let html = render(rsx! { FieldError { message: "Too short".to_string() } });
    assert!(html.contains("Too short"));
}

#[test]
fn progress_bar_clamps_to_hundred() {
    let html = render(rsx! { ProgressBar { value: 250 } });
    assert!(html.contains("aria-valuenow=\"100\""));
    assert!(html.contains("width: 100%"));
}

#[test]
fn empty_table_row_spans_columns() {
    let html = render(rsx! {
        DataTable {
            DataTableBody {
                DataTableEmpty { colspan: 5, message: "No employees found".to_string() }
            }
        }
    });
    assert!(html.contains("colspan=\"5\""));
    assert!(html.contains("No employees found"));
}

#[test]
fn stat_card_renders_value_and_hint() {
    let html = render(rsx! {
        StatCard { label: "Employees".to_string(), value: "42".to_string(), hint: "3 on leave".to_string() }
    });
    assert!(html.contains("42"));
    assert!(html.contains("3 on leave"));
}

#[test]
fn skeleton_rows_render_requested_count() {
    let html = render(rsx! { SkeletonRows { rows: 3 } });
    assert_eq!(html.matches("skeleton-line").count(), 3);
}
