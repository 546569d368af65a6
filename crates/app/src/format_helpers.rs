//! Display and form-parsing helpers shared by the pages.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun",
    "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// "Jan 20, 2026".
pub fn format_date(date: NaiveDate) -> String {
    let month = MONTH_NAMES[date.month0() as usize];
    format!("{} {}, {}", month, date.day(), date.year())
}

pub fn format_opt_date(date: Option<NaiveDate>) -> String {
    date.map(format_date).unwrap_or_else(|| "-".to_string())
}

/// "9:35 PM" in UTC.
pub fn format_time(ts: DateTime<Utc>) -> String {
    ts.format("%-I:%M %p").to_string()
}

pub fn format_opt_time(ts: Option<DateTime<Utc>>) -> String {
    ts.map(format_time).unwrap_or_else(|| "-".to_string())
}

/// Two decimals with thousands separators, e.g. `1,250.00`.
pub fn format_money(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}{}.{:02}", if negative { "-" } else { "" }, grouped, cents % 100)
}

pub fn opt_text(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

/// Blank form values become `None`.
pub fn blank_to_none(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub fn parse_opt_i64(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

pub fn parse_opt_f64(raw: &str) -> Option<f64> {
    raw.trim().replace(',', "").parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse an `<input type="date">` value.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

pub fn date_input_value(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

pub fn opt_number(value: Option<impl ToString>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn money_groups_thousands() {
        assert_eq!(format_money(1250.0), "1,250.00");
        assert_eq!(format_money(0.5), "0.50");
        assert_eq!(format_money(1234567.891), "1,234,567.89");
        assert_eq!(format_money(-42.0), "-42.00");
    }

    #[test]
    fn dates_render_human_readable() {
        let d = NaiveDate::from_ymd_opt(2026, 1, 20).unwrap();
        assert_eq!(format_date(d), "Jan 20, 2026");
        assert_eq!(format_opt_date(None), "-");
        assert_eq!(date_input_value(Some(d)), "2026-01-20");
        assert_eq!(parse_date("2026-01-20"), Some(d));
        assert_eq!(parse_date("20/01/2026"), None);
    }

    #[test]
    fn form_values_parse_leniently() {
        assert_eq!(blank_to_none("  "), None);
        assert_eq!(blank_to_none(" Ops "), Some("Ops".to_string()));
        assert_eq!(parse_opt_i64("12"), Some(12));
        assert_eq!(parse_opt_i64(""), None);
        assert_eq!(parse_opt_f64("1,500.5"), Some(1500.5));
        assert_eq!(parse_opt_f64("abc"), None);
    }
}
