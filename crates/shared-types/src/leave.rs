use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

use crate::Searchable;

wire_enum! {
    pub enum LeaveType {
        Annual => ("ANNUAL", "Annual"),
        Sick => ("SICK", "Sick"),
        Personal => ("PERSONAL", "Personal"),
        Maternity => ("MATERNITY", "Maternity"),
        Paternity => ("PATERNITY", "Paternity"),
        Unpaid => ("UNPAID", "Unpaid"),
    }
}

wire_enum! {
    pub enum LeaveStatus {
        Pending => ("PENDING", "Pending"),
        Approved => ("APPROVED", "Approved"),
        Rejected => ("REJECTED", "Rejected"),
        Cancelled => ("CANCELLED", "Cancelled"),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: i64,
    pub employee_id: i64,
    #[serde(default)]
    pub employee_name: Option<String>,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub reason: Option<String>,
    pub status: LeaveStatus,
    #[serde(default)]
    pub reviewer_comment: Option<String>,
}

impl LeaveRequest {
    /// Calendar days covered, inclusive of both ends.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days().max(0) + 1
    }

    pub fn is_pending(&self) -> bool {
        self.status == LeaveStatus::Pending
    }
}

impl Searchable for LeaveRequest {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.leave_type.label()];
        if let Some(name) = &self.employee_name {
            fields.push(name);
        }
        if let Some(reason) = &self.reason {
            fields.push(reason);
        }
        fields
    }
}

/// Request DTO for `POST /leave`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct CreateLeaveRequest {
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[cfg_attr(
        feature = "validation",
        validate(length(max = 500, message = "Reason must be at most 500 characters"))
    )]
    pub reason: Option<String>,
}

/// Body for approve/reject actions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeaveDecision {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_is_inclusive() {
        let req: LeaveRequest = serde_json::from_str(
            r#"{"id":1,"employee_id":2,"leave_type":"ANNUAL","start_date":"2025-07-01",
                "end_date":"2025-07-03","status":"PENDING"}"#,
        )
        .unwrap();
        assert_eq!(req.days(), 3);
        assert!(req.is_pending());
    }

    #[test]
    fn leave_search_covers_type_label() {
        let req: LeaveRequest = serde_json::from_str(
            r#"{"id":1,"employee_id":2,"leave_type":"SICK","start_date":"2025-07-01",
                "end_date":"2025-07-01","status":"APPROVED","employee_name":"Efua"}"#,
        )
        .unwrap();
        assert!(crate::matches_query(&req.search_fields(), "sick"));
        assert!(crate::matches_query(&req.search_fields(), "EFUA"));
    }
}
