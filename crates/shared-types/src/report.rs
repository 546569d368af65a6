//! Tabular reports and CSV export.

use serde::{Deserialize, Serialize};
use serde_json::Value;

wire_enum! {
    pub enum ReportKind {
        Headcount => ("headcount", "Headcount"),
        Attendance => ("attendance", "Attendance"),
        Leave => ("leave", "Leave"),
        Payroll => ("payroll", "Payroll"),
        Expenses => ("expenses", "Expenses"),
        Training => ("training", "Training"),
    }
}

/// A headline number shown above a report table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetric {
    pub label: String,
    pub value: Value,
}

/// A report as returned by `GET /reports/{kind}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub kind: ReportKind,
    pub title: String,
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
    #[serde(default)]
    pub summary: Vec<ReportMetric>,
}

/// Render a JSON cell as plain text.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn csv_line<'a>(fields: impl Iterator<Item = &'a str>) -> String {
    fields.map(csv_field).collect::<Vec<_>>().join(",")
}

impl Report {
    /// RFC 4180 CSV: header row first, CRLF line endings.
    pub fn to_csv(&self) -> String {
        let mut out = csv_line(self.columns.iter().map(String::as_str));
        out.push_str("\r\n");
        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(cell_text).collect();
            out.push_str(&csv_line(cells.iter().map(String::as_str)));
            out.push_str("\r\n");
        }
        out
    }

    /// Download name such as `payroll-report.csv`.
    pub fn file_name(&self) -> String {
        format!("{}-report.csv", self.kind.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn report(rows: Vec<Vec<Value>>) -> Report {
        Report {
            kind: ReportKind::Expenses,
            title: "Expenses".into(),
            columns: vec!["Title".into(), "Amount".into()],
            rows,
            summary: vec![],
        }
    }

    #[test]
    fn plain_fields_are_unquoted() {
        let csv = report(vec![vec![json!("Taxi"), json!(35.5)]]).to_csv();
        assert_eq!(csv, "Title,Amount\r\nTaxi,35.5\r\n");
    }

    #[test]
    fn special_characters_are_quoted_and_quotes_doubled() {
        let csv = report(vec![
            vec![json!("Lunch, team"), json!(12)],
            vec![json!("The \"big\" trip"), Value::Null],
            vec![json!("line\nbreak"), json!(true)],
        ])
        .to_csv();
        assert_eq!(
            csv,
            "Title,Amount\r\n\"Lunch, team\",12\r\n\"The \"\"big\"\" trip\",\r\n\"line\nbreak\",true\r\n"
        );
    }

    #[test]
    fn kind_uses_lowercase_wire_names() {
        assert_eq!(ReportKind::parse("PAYROLL"), Some(ReportKind::Payroll));
        assert_eq!(report(vec![]).file_name(), "expenses-report.csv");
    }
}
