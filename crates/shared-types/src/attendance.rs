use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

wire_enum! {
    pub enum AttendanceStatus {
        Present => ("PRESENT", "Present"),
        Absent => ("ABSENT", "Absent"),
        Late => ("LATE", "Late"),
        HalfDay => ("HALF_DAY", "Half Day"),
        Remote => ("REMOTE", "Remote"),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: i64,
    pub employee_id: i64,
    #[serde(default)]
    pub employee_name: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub check_in: Option<DateTime<Utc>>,
    #[serde(default)]
    pub check_out: Option<DateTime<Utc>>,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub hours_worked: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl AttendanceRecord {
    /// Worked hours, from the server if present, else from the timestamps.
    pub fn hours(&self) -> Option<f64> {
        if let Some(h) = self.hours_worked {
            return Some(h);
        }
        let (start, end) = (self.check_in?, self.check_out?);
        let minutes = (end - start).num_minutes();
        (minutes >= 0).then(|| minutes as f64 / 60.0)
    }

    pub fn is_open(&self) -> bool {
        self.check_in.is_some() && self.check_out.is_none()
    }
}

/// Body for `POST /attendance/check-in` and `/attendance/check-out`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Today's open record for the signed-in employee, if any.
pub fn open_record_for(records: &[AttendanceRecord], employee_id: i64, today: NaiveDate) -> Option<&AttendanceRecord> {
    records
        .iter()
        .find(|r| r.employee_id == employee_id && r.date == today && r.is_open())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(check_in: Option<DateTime<Utc>>, check_out: Option<DateTime<Utc>>) -> AttendanceRecord {
        AttendanceRecord {
            id: 1,
            employee_id: 5,
            employee_name: None,
            date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            check_in,
            check_out,
            status: AttendanceStatus::Present,
            hours_worked: None,
            notes: None,
        }
    }

    #[test]
    fn hours_computed_from_timestamps() {
        let start = Utc.with_ymd_and_hms(2025, 6, 2, 8, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 2, 16, 30, 0).unwrap();
        assert_eq!(record(Some(start), Some(end)).hours(), Some(8.5));
        assert_eq!(record(Some(start), None).hours(), None);
    }

    #[test]
    fn open_record_is_found_for_today_only() {
        let start = Utc.with_ymd_and_hms(2025, 6, 2, 8, 0, 0).unwrap();
        let records = vec![record(Some(start), None)];
        let today = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        assert!(open_record_for(&records, 5, today).is_some());
        assert!(open_record_for(&records, 6, today).is_none());
        assert!(open_record_for(&records, 5, today.succ_opt().unwrap()).is_none());
    }
}
