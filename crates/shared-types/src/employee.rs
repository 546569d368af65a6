use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

use crate::Searchable;

wire_enum! {
    pub enum EmployeeStatus {
        Active => ("ACTIVE", "Active"),
        Inactive => ("INACTIVE", "Inactive"),
        Terminated => ("TERMINATED", "Terminated"),
        OnLeave => ("ON_LEAVE", "On Leave"),
        Probation => ("PROBATION", "Probation"),
    }
}

wire_enum! {
    pub enum EmploymentType {
        FullTime => ("FULL_TIME", "Full Time"),
        PartTime => ("PART_TIME", "Part Time"),
        Contract => ("CONTRACT", "Contract"),
        Intern => ("INTERN", "Intern"),
        Temporary => ("TEMPORARY", "Temporary"),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub organization_id: i64,
    #[serde(default)]
    pub department_id: Option<i64>,
    pub employee_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    #[serde(default)]
    pub salary: Option<f64>,
    pub status: EmployeeStatus,
    pub employment_type: EmploymentType,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

impl Searchable for Employee {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.email.as_str(),
            self.employee_number.as_str(),
        ];
        if let Some(title) = &self.job_title {
            fields.push(title);
        }
        fields
    }
}

/// Query parameters for `GET /employees`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EmployeeFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EmployeeStatus>,
}

impl EmployeeFilter {
    /// Build from raw form values; blank search becomes `None`.
    pub fn new(search: &str, department_id: Option<i64>, status: Option<EmployeeStatus>) -> Self {
        let search = search.trim();
        Self {
            search: (!search.is_empty()).then(|| search.to_string()),
            department_id,
            status,
        }
    }
}

/// Request DTO for creating or replacing an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct EmployeeRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Employee number is required"))
    )]
    pub employee_number: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "First name is required"))
    )]
    pub first_name: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Last name is required"))
    )]
    pub last_name: String,
    #[cfg_attr(feature = "validation", validate(email(message = "Valid email is required")))]
    pub email: String,
    pub department_id: Option<i64>,
    pub job_title: Option<String>,
    pub hire_date: Option<NaiveDate>,
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 0.0, message = "Salary must be non-negative"))
    )]
    pub salary: Option<f64>,
    pub status: EmployeeStatus,
    pub employment_type: EmploymentType,
}

impl Default for EmployeeRequest {
    fn default() -> Self {
        Self {
            employee_number: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            department_id: None,
            job_title: None,
            hire_date: None,
            salary: None,
            status: EmployeeStatus::Active,
            employment_type: EmploymentType::FullTime,
        }
    }
}

impl From<&Employee> for EmployeeRequest {
    fn from(e: &Employee) -> Self {
        Self {
            employee_number: e.employee_number.clone(),
            first_name: e.first_name.clone(),
            last_name: e.last_name.clone(),
            email: e.email.clone(),
            department_id: e.department_id,
            job_title: e.job_title.clone(),
            hire_date: e.hire_date,
            salary: e.salary,
            status: e.status,
            employment_type: e.employment_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_use_screaming_snake_case() {
        assert_eq!(serde_json::to_string(&EmployeeStatus::OnLeave).unwrap(), "\"ON_LEAVE\"");
        assert_eq!(serde_json::to_string(&EmploymentType::FullTime).unwrap(), "\"FULL_TIME\"");
        assert!(serde_json::from_str::<EmployeeStatus>("\"RETIRED\"").is_err());
    }

    #[test]
    fn filter_drops_blank_search() {
        let f = EmployeeFilter::new("   ", Some(4), None);
        assert_eq!(f.search, None);
        assert_eq!(f.department_id, Some(4));
        let f = EmployeeFilter::new(" kofi ", None, Some(EmployeeStatus::Probation));
        assert_eq!(f.search.as_deref(), Some("kofi"));
    }

    #[test]
    fn employee_decodes_dates() {
        let e: Employee = serde_json::from_str(
            r#"{"id":9,"organization_id":1,"employee_number":"E-009","first_name":"Kofi",
                "last_name":"Boateng","email":"kofi@acme.test","hire_date":"2023-04-01",
                "status":"PROBATION","employment_type":"CONTRACT"}"#,
        )
        .unwrap();
        assert_eq!(e.hire_date, NaiveDate::from_ymd_opt(2023, 4, 1));
        assert_eq!(e.full_name(), "Kofi Boateng");
        assert_eq!(e.employment_type, EmploymentType::Contract);
    }
}
