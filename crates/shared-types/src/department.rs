use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

use crate::Searchable;

/// A unit inside an organization. `parent_id` forms a tree the backend does
/// not enforce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub organization_id: i64,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub manager_id: Option<i64>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub max_headcount: Option<i32>,
    #[serde(default)]
    pub working_hours_start: Option<String>,
    #[serde(default)]
    pub working_hours_end: Option<String>,
    #[serde(default = "active")]
    pub is_active: bool,
    #[serde(default)]
    pub employee_count: Option<i64>,
}

fn active() -> bool {
    true
}

impl Searchable for Department {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.code.as_str()];
        if let Some(d) = &self.description {
            fields.push(d);
        }
        fields
    }
}

/// Name of the parent department, if it is present in `all`.
pub fn parent_name<'a>(dept: &Department, all: &'a [Department]) -> Option<&'a str> {
    let parent = dept.parent_id?;
    all.iter().find(|d| d.id == parent).map(|d| d.name.as_str())
}

/// Request DTO for creating or replacing a department.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct DepartmentRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Department name is required"))
    )]
    pub name: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Department code is required"))
    )]
    pub code: String,
    pub description: Option<String>,
    pub organization_id: Option<i64>,
    pub parent_id: Option<i64>,
    pub manager_id: Option<i64>,
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 0.0, message = "Budget must be non-negative"))
    )]
    pub budget: Option<f64>,
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 0, message = "Headcount must be non-negative"))
    )]
    pub max_headcount: Option<i32>,
    pub working_hours_start: Option<String>,
    pub working_hours_end: Option<String>,
    pub is_active: bool,
}

impl From<&Department> for DepartmentRequest {
    fn from(d: &Department) -> Self {
        Self {
            name: d.name.clone(),
            code: d.code.clone(),
            description: d.description.clone(),
            organization_id: Some(d.organization_id),
            parent_id: d.parent_id,
            manager_id: d.manager_id,
            budget: d.budget,
            max_headcount: d.max_headcount,
            working_hours_start: d.working_hours_start.clone(),
            working_hours_end: d.working_hours_end.clone(),
            is_active: d.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dept(id: i64, name: &str, parent_id: Option<i64>) -> Department {
        Department {
            id,
            organization_id: 1,
            name: name.into(),
            code: name.to_uppercase(),
            description: None,
            parent_id,
            manager_id: None,
            budget: None,
            max_headcount: None,
            working_hours_start: None,
            working_hours_end: None,
            is_active: true,
            employee_count: None,
        }
    }

    #[test]
    fn parent_name_resolves_within_list() {
        let all = vec![dept(1, "Engineering", None), dept(2, "Platform", Some(1)), dept(3, "Orphan", Some(99))];
        assert_eq!(parent_name(&all[1], &all), Some("Engineering"));
        assert_eq!(parent_name(&all[0], &all), None);
        assert_eq!(parent_name(&all[2], &all), None);
    }
}
