use serde::{Deserialize, Serialize};

/// Paginated list envelope returned by some list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total: Option<i64>,
}

/// A list endpoint body. Endpoints answer with either a bare array or a
/// `{items, total}` page; both decode to the same rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListBody<T> {
    Bare(Vec<T>),
    Paged(Page<T>),
}

impl<T> ListBody<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListBody::Bare(items) => items,
            ListBody::Paged(page) => page.items,
        }
    }
}

/// Acknowledgement body used by action endpoints such as approve or logout.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Inclusive calendar date range used by attendance and report queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
}

impl DateRange {
    pub fn new(start_date: chrono::NaiveDate, end_date: chrono::NaiveDate) -> Self {
        if start_date <= end_date {
            Self { start_date, end_date }
        } else {
            Self {
                start_date: end_date,
                end_date: start_date,
            }
        }
    }

    /// The calendar month containing `day`.
    pub fn month_of(day: chrono::NaiveDate) -> Self {
        use chrono::Datelike;
        let start = day.with_day(1).unwrap_or(day);
        let next_month = if start.month() == 12 {
            chrono::NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
        } else {
            chrono::NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
        };
        let end = next_month.and_then(|d| d.pred_opt()).unwrap_or(day);
        Self::new(start, end)
    }

    pub fn contains(&self, day: chrono::NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }

    /// Query pairs in the backend's expected names.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("start_date", self.start_date.to_string()),
            ("end_date", self.end_date.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[derive(Debug, PartialEq, Deserialize, Serialize)]
    struct Row {
        id: i64,
    }

    #[test]
    fn list_body_decodes_bare_array() {
        let body: ListBody<Row> = serde_json::from_str(r#"[{"id":1},{"id":2}]"#).unwrap();
        assert_eq!(body.into_items(), vec![Row { id: 1 }, Row { id: 2 }]);
    }

    #[test]
    fn list_body_decodes_page() {
        let body: ListBody<Row> = serde_json::from_str(r#"{"items":[{"id":7}],"total":40}"#).unwrap();
        assert!(matches!(&body, ListBody::Paged(Page { total: Some(40), .. })));
        assert_eq!(body.into_items(), vec![Row { id: 7 }]);
    }

    #[test]
    fn date_range_orders_bounds() {
        let a = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let b = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let range = DateRange::new(a, b);
        assert_eq!(range.start_date, b);
        assert_eq!(range.end_date, a);
        assert!(range.contains(NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()));
    }

    #[test]
    fn month_of_covers_whole_month() {
        let range = DateRange::month_of(NaiveDate::from_ymd_opt(2024, 2, 14).unwrap());
        assert_eq!(range.start_date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(range.end_date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let dec = DateRange::month_of(NaiveDate::from_ymd_opt(2025, 12, 3).unwrap());
        assert_eq!(dec.end_date, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    }
}
