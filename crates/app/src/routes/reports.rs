use api::ApiClient;
use chrono::{Datelike, NaiveDate};
use dioxus::prelude::*;
use shared_types::{cell_text, resolve, samples, DateRange, FetchOutcome, Report, ReportKind};
use shared_ui::{
    use_toast, Button, ButtonVariant, Card, CardContent, CardHeader, CardTitle, DataTable,
    DataTableBody, DataTableCell, DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow,
    Input, PageHeader, SkeletonRows, StatCard, StatGrid, TabBar, TabItem, ToastOptions,
};

use crate::components::{ErrorPanel, FallbackNotice};
use crate::download::save_file;
use crate::format_helpers::{date_input_value, parse_date, today};
use crate::hooks::use_fallback_policy;

/// January 1st through `day`.
fn year_to_date(day: NaiveDate) -> DateRange {
    let start = NaiveDate::from_ymd_opt(day.year(), 1, 1).unwrap_or(day);
    DateRange::new(start, day)
}

/// Replace one end of `range` from a date input. Unparseable input keeps
/// the current range.
fn with_bound(range: DateRange, raw: &str, start: bool) -> DateRange {
    match parse_date(raw) {
        Some(day) if start => DateRange::new(day, range.end_date),
        Some(day) => DateRange::new(range.start_date, day),
        None => range,
    }
}

/// Tabular HR reports over a date range, exportable as CSV.
#[component]
pub fn Reports() -> Element {
    let client = use_context::<ApiClient>();
    let toast = use_toast();
    let policy = use_fallback_policy();
    let mut kind = use_signal(|| ReportKind::Headcount);
    let mut range = use_signal(|| year_to_date(today()));

    let report_client = client.clone();
    let mut report = use_resource(move || {
        let client = report_client.clone();
        let kind = kind();
        let range = range();
        async move {
            let result = api::reports::get_report(&client, kind, &range).await;
            let resolved = resolve(result, policy, Some(&|| samples::sample_report(kind)));
            if let FetchOutcome::Fallback { error, .. } = &resolved {
                tracing::warn!(%error, kind = kind.as_str(), "showing sample report");
            }
            resolved
        }
    });

    let export = move |report: &Report| {
        let csv = report.to_csv();
        tracing::info!(kind = report.kind.as_str(), rows = report.rows.len(), "exporting report");
        save_file(&report.file_name(), Some("text/csv"), csv.as_bytes());
        toast.success(format!("Exported {}", report.file_name()), ToastOptions::new());
    };

    let tabs: Vec<TabItem> = ReportKind::ALL
        .iter()
        .map(|k| TabItem::new(k.as_str(), k.label()))
        .collect();
    let current = range();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./reports.css") }

        div { class: "reports-page",
            PageHeader {
                title: "Reports".to_string(),
                subtitle: Some("Organization-wide figures for the selected period".to_string()),
            }

            TabBar {
                tabs,
                active: kind().as_str().to_string(),
                on_select: move |value: String| {
                    if let Some(next) = ReportKind::parse(&value) {
                        kind.set(next);
                    }
                },
            }

            div { class: "reports-range",
                Input {
                    label: "From".to_string(),
                    input_type: "date".to_string(),
                    value: date_input_value(Some(current.start_date)),
                    on_input: move |evt: FormEvent| range.set(with_bound(range(), &evt.value(), true)),
                }
                Input {
                    label: "To".to_string(),
                    input_type: "date".to_string(),
                    value: date_input_value(Some(current.end_date)),
                    on_input: move |evt: FormEvent| range.set(with_bound(range(), &evt.value(), false)),
                }
                Button {
                    variant: ButtonVariant::Ghost,
                    onclick: move |_| range.set(year_to_date(today())),
                    "Year to date"
                }
            }

            match &*report.read() {
                None => rsx! { SkeletonRows {} },
                Some(FetchOutcome::Failed(err)) => rsx! {
                    ErrorPanel { error: err.clone(), on_retry: move |_| report.restart() }
                },
                Some(result) => rsx! {
                    if let Some(err) = result.error().filter(|_| result.is_fallback()) {
                        FallbackNotice { error: err.clone() }
                    }
                    if let Some(data) = result.data() {
                        ReportView {
                            report: data.clone(),
                            on_export: move |data: Report| export(&data),
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn ReportView(report: Report, on_export: EventHandler<Report>) -> Element {
    let columns = report.columns.len().max(1);

    rsx! {
        if !report.summary.is_empty() {
            StatGrid {
                for metric in report.summary.iter() {
                    StatCard {
                        key: "{metric.label}",
                        label: metric.label.clone(),
                        value: cell_text(&metric.value),
                    }
                }
            }
        }

        Card { class: "report-card",
            CardHeader {
                div { class: "report-card-header",
                    CardTitle { "{report.title}" }
                    Button {
                        variant: ButtonVariant::Outline,
                        disabled: report.rows.is_empty(),
                        onclick: {
                            let report = report.clone();
                            move |_| on_export.call(report.clone())
                        },
                        "Export CSV"
                    }
                }
            }
            CardContent {
                DataTable {
                    DataTableHeader {
                        for column in report.columns.iter() {
                            DataTableColumn { key: "{column}", "{column}" }
                        }
                    }
                    DataTableBody {
                        if report.rows.is_empty() {
                            DataTableEmpty { colspan: columns, message: "No data for this period.".to_string() }
                        }
                        for (idx, row) in report.rows.iter().enumerate() {
                            DataTableRow { key: "{idx}",
                                for (col, cell) in row.iter().enumerate() {
                                    DataTableCell { key: "{col}", {cell_text(cell)} }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
