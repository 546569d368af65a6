use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

use crate::Searchable;

wire_enum! {
    pub enum ExpenseStatus {
        Draft => ("DRAFT", "Draft"),
        Submitted => ("SUBMITTED", "Submitted"),
        Approved => ("APPROVED", "Approved"),
        Rejected => ("REJECTED", "Rejected"),
        Reimbursed => ("REIMBURSED", "Reimbursed"),
    }
}

wire_enum! {
    pub enum ExpenseCategory {
        Travel => ("TRAVEL", "Travel"),
        Meals => ("MEALS", "Meals"),
        Accommodation => ("ACCOMMODATION", "Accommodation"),
        Supplies => ("SUPPLIES", "Supplies"),
        Equipment => ("EQUIPMENT", "Equipment"),
        Other => ("OTHER", "Other"),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct ExpenseItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Item description is required"))
    )]
    pub description: String,
    pub category: ExpenseCategory,
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 0.0, message = "Amount must be non-negative"))
    )]
    pub amount: f64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseReport {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: ExpenseStatus,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub submitted_by: Option<i64>,
    #[serde(default)]
    pub submitted_by_name: Option<String>,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items: Vec<ExpenseItem>,
}

impl ExpenseReport {
    /// Sum of item amounts; used when the server total is absent.
    pub fn items_total(&self) -> f64 {
        self.items.iter().map(|i| i.amount).sum()
    }

    /// Only drafts may be edited, deleted or submitted.
    pub fn is_editable(&self) -> bool {
        self.status == ExpenseStatus::Draft
    }

    pub fn awaits_review(&self) -> bool {
        self.status == ExpenseStatus::Submitted
    }
}

impl Searchable for ExpenseReport {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.description.as_deref().unwrap_or_default(),
        ]
    }
}

/// Request DTO for creating or replacing an expense report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct ExpenseReportRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Title is required"))
    )]
    pub title: String,
    pub description: Option<String>,
    #[cfg_attr(feature = "validation", validate(nested))]
    pub items: Vec<ExpenseItem>,
}

impl From<&ExpenseReport> for ExpenseReportRequest {
    fn from(r: &ExpenseReport) -> Self {
        Self {
            title: r.title.clone(),
            description: r.description.clone(),
            items: r.items.clone(),
        }
    }
}

/// Body for reject actions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseDecision {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
