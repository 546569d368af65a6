use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

use crate::Searchable;

wire_enum! {
    pub enum CourseCategory {
        Technical => ("TECHNICAL", "Technical"),
        Compliance => ("COMPLIANCE", "Compliance"),
        Leadership => ("LEADERSHIP", "Leadership"),
        SoftSkills => ("SOFT_SKILLS", "Soft Skills"),
        Onboarding => ("ONBOARDING", "Onboarding"),
    }
}

wire_enum! {
    pub enum CourseStatus {
        Draft => ("DRAFT", "Draft"),
        Published => ("PUBLISHED", "Published"),
        Archived => ("ARCHIVED", "Archived"),
    }
}

wire_enum! {
    pub enum EnrollmentStatus {
        Enrolled => ("ENROLLED", "Enrolled"),
        InProgress => ("IN_PROGRESS", "In Progress"),
        Completed => ("COMPLETED", "Completed"),
        Dropped => ("DROPPED", "Dropped"),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: CourseCategory,
    /// Length in hours.
    #[serde(default)]
    pub duration_hours: Option<f64>,
    #[serde(default)]
    pub instructor: Option<String>,
    pub status: CourseStatus,
}

impl Searchable for Course {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.description.as_deref().unwrap_or_default(),
            self.instructor.as_deref().unwrap_or_default(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    pub course_id: i64,
    pub employee_id: i64,
    #[serde(default)]
    pub course_title: Option<String>,
    /// Percent complete, 0-100.
    #[serde(default)]
    pub progress: f64,
    pub status: EnrollmentStatus,
    #[serde(default)]
    pub enrolled_at: Option<DateTime<Utc>>,
}

impl Enrollment {
    pub fn progress_percent(&self) -> u8 {
        self.progress.clamp(0.0, 100.0).round() as u8
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub passing_score: f64,
    #[serde(default)]
    pub score: Option<f64>,
}

impl Assessment {
    /// `None` until a score exists.
    pub fn passed(&self) -> Option<bool> {
        self.score.map(|s| s >= self.passing_score)
    }
}

/// Request DTO for creating or replacing a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct CourseRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Course title is required"))
    )]
    pub title: String,
    pub description: Option<String>,
    pub category: CourseCategory,
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 0.0, message = "Duration must be non-negative"))
    )]
    pub duration_hours: Option<f64>,
    pub instructor: Option<String>,
    pub status: CourseStatus,
}

impl Default for CourseRequest {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: None,
            category: CourseCategory::Technical,
            duration_hours: None,
            instructor: None,
            status: CourseStatus::Draft,
        }
    }
}

impl From<&Course> for CourseRequest {
    fn from(c: &Course) -> Self {
        Self {
            title: c.title.clone(),
            description: c.description.clone(),
            category: c.category,
            duration_hours: c.duration_hours,
            instructor: c.instructor.clone(),
            status: c.status,
        }
    }
}

/// Body for `POST /training/enrollments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollRequest {
    pub course_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<i64>,
}

/// Body for `POST /training/assessments/{id}/submit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSubmission {
    pub answers: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assessment_pass_state() {
        let mut a = Assessment {
            id: 1,
            course_id: 2,
            title: "Final".into(),
            passing_score: 70.0,
            score: None,
        };
        assert_eq!(a.passed(), None);
        a.score = Some(70.0);
        assert_eq!(a.passed(), Some(true));
        a.score = Some(69.5);
        assert_eq!(a.passed(), Some(false));
    }

    #[test]
    fn progress_is_clamped() {
        let e: Enrollment = serde_json::from_str(
            r#"{"id":1,"course_id":2,"employee_id":3,"progress":140,"status":"IN_PROGRESS"}"#,
        )
        .unwrap();
        assert_eq!(e.progress_percent(), 100);
    }
}
