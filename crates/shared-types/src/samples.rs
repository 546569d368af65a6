//! Bundled sample rows used when the fallback policy is `sample`.

use chrono::NaiveDate;
use serde_json::json;

use crate::{
    Course, CourseCategory, CourseStatus, Document, DocumentCategory, DocumentStatus, Enrollment,
    EnrollmentStatus, ExpenseCategory, ExpenseItem, ExpenseReport, ExpenseStatus, Report,
    ReportKind, ReportMetric,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub fn sample_documents() -> Vec<Document> {
    let doc = |id, title: &str, description: &str, category, file_name: &str, size| Document {
        id,
        title: title.to_string(),
        description: Some(description.to_string()),
        category,
        file_name: file_name.to_string(),
        content_type: Some("application/pdf".to_string()),
        file_size: Some(size),
        owner_id: None,
        owner_name: Some("HR Team".to_string()),
        uploaded_at: None,
        status: DocumentStatus::Active,
    };
    vec![
        doc(1, "Employee Handbook", "Company policies and code of conduct", DocumentCategory::Policy, "handbook.pdf", 842_000),
        doc(2, "Leave Policy", "Annual, sick and parental leave rules", DocumentCategory::Policy, "leave-policy.pdf", 215_000),
        doc(3, "Employment Contract Template", "Standard full-time contract", DocumentCategory::Contract, "contract.pdf", 98_000),
        doc(4, "Payslip January", "Monthly payslip", DocumentCategory::Payslip, "payslip-jan.pdf", 41_000),
        doc(5, "First Aid Certificate", "Workplace first aid training", DocumentCategory::Certificate, "first-aid.pdf", 120_000),
    ]
}

pub fn sample_courses() -> Vec<Course> {
    let course = |id, title: &str, description: &str, category, hours, instructor: &str, status| Course {
        id,
        title: title.to_string(),
        description: Some(description.to_string()),
        category,
        duration_hours: Some(hours),
        instructor: Some(instructor.to_string()),
        status,
    };
    vec![
        course(1, "Company Onboarding", "Tools, teams and how we work", CourseCategory::Onboarding, 4.0, "People Ops", CourseStatus::Published),
        course(2, "Data Protection Basics", "Handling personal data safely", CourseCategory::Compliance, 2.0, "Legal", CourseStatus::Published),
        course(3, "Leading Small Teams", "Feedback, delegation and 1:1s", CourseCategory::Leadership, 8.0, "Ama Owusu", CourseStatus::Published),
        course(4, "Effective Communication", "Writing and presenting clearly", CourseCategory::SoftSkills, 3.0, "Kwame Asante", CourseStatus::Draft),
    ]
}

pub fn sample_enrollments() -> Vec<Enrollment> {
    vec![
        Enrollment {
            id: 1,
            course_id: 1,
            employee_id: 1,
            course_title: Some("Company Onboarding".to_string()),
            progress: 100.0,
            status: EnrollmentStatus::Completed,
            enrolled_at: None,
        },
        Enrollment {
            id: 2,
            course_id: 2,
            employee_id: 1,
            course_title: Some("Data Protection Basics".to_string()),
            progress: 40.0,
            status: EnrollmentStatus::InProgress,
            enrolled_at: None,
        },
    ]
}

pub fn sample_expense_reports() -> Vec<ExpenseReport> {
    let item = |description: &str, category, amount, day| ExpenseItem {
        id: None,
        description: description.to_string(),
        category,
        amount,
        date: date(2025, 3, day),
    };
    let report = |id, title: &str, description: &str, status, items: Vec<ExpenseItem>| {
        let total_amount = items.iter().map(|i| i.amount).sum();
        ExpenseReport {
            id,
            title: title.to_string(),
            description: Some(description.to_string()),
            status,
            total_amount,
            submitted_by: None,
            submitted_by_name: Some("Sample Employee".to_string()),
            submitted_at: None,
            items,
        }
    };
    vec![
        report(
            1,
            "Client visit Kumasi",
            "Travel to meet a client",
            ExpenseStatus::Submitted,
            vec![
                item("Bus fare", ExpenseCategory::Travel, 45.0, 4),
                item("Hotel", ExpenseCategory::Accommodation, 320.0, 4),
            ],
        ),
        report(
            2,
            "Team lunch",
            "Quarterly celebration",
            ExpenseStatus::Approved,
            vec![item("Lunch", ExpenseCategory::Meals, 180.0, 12)],
        ),
        report(
            3,
            "Office supplies",
            "Notebooks and pens",
            ExpenseStatus::Draft,
            vec![item("Stationery", ExpenseCategory::Supplies, 62.5, 20)],
        ),
    ]
}

pub fn sample_report(kind: ReportKind) -> Report {
    let (columns, rows, summary): (Vec<&str>, Vec<serde_json::Value>, Vec<(&str, serde_json::Value)>) = match kind {
        ReportKind::Headcount => (
            vec!["Department", "Employees", "Open Positions"],
            vec![json!(["Engineering", 24, 3]), json!(["Finance", 8, 0]), json!(["Operations", 15, 2])],
            vec![("Total Employees", json!(47))],
        ),
        ReportKind::Attendance => (
            vec!["Department", "Present %", "Late Arrivals"],
            vec![json!(["Engineering", 96.5, 4]), json!(["Operations", 92.0, 9])],
            vec![("Average Attendance", json!("94.3%"))],
        ),
        ReportKind::Leave => (
            vec!["Leave Type", "Requests", "Days"],
            vec![json!(["Annual", 18, 74]), json!(["Sick", 9, 15])],
            vec![("Pending Requests", json!(5))],
        ),
        ReportKind::Payroll => (
            vec!["Period", "Gross", "Deductions", "Net"],
            vec![json!(["2025-01", 152000, 31000, 121000]), json!(["2025-02", 153500, 31200, 122300])],
            vec![("Employees Paid", json!(47))],
        ),
        ReportKind::Expenses => (
            vec!["Category", "Reports", "Amount"],
            vec![json!(["Travel", 6, 2140.0]), json!(["Meals", 11, 930.5])],
            vec![("Awaiting Approval", json!(3))],
        ),
        ReportKind::Training => (
            vec!["Course", "Enrolled", "Completed"],
            vec![json!(["Company Onboarding", 12, 12]), json!(["Data Protection Basics", 40, 22])],
            vec![("Completion Rate", json!("65%"))],
        ),
    };

    Report {
        kind,
        title: format!("{} Report", kind.label()),
        columns: columns.into_iter().map(String::from).collect(),
        rows: rows
            .into_iter()
            .map(|row| row.as_array().cloned().unwrap_or_default())
            .collect(),
        summary: summary
            .into_iter()
            .map(|(label, value)| ReportMetric {
                label: label.to_string(),
                value,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_report_kind_has_rectangular_sample() {
        for kind in ReportKind::ALL {
            let report = sample_report(*kind);
            assert_eq!(report.kind, *kind);
            assert!(!report.rows.is_empty());
            for row in &report.rows {
                assert_eq!(row.len(), report.columns.len(), "{kind:?}");
            }
        }
    }

    #[test]
    fn sample_expense_totals_match_items() {
        for report in sample_expense_reports() {
            assert_eq!(report.total_amount, report.items_total());
        }
    }
}
