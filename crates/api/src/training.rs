use shared_types::{
    AppError, Assessment, AssessmentSubmission, Course, CourseRequest, EnrollRequest, Enrollment,
};

use crate::{
    client::{with_id, NO_QUERY},
    ApiClient,
};

const COURSES: &str = "/training/courses";
const ENROLLMENTS: &str = "/training/enrollments";
const ASSESSMENTS: &str = "/training/assessments";

// ── Courses ────────────────────────────────────────────

pub async fn list_courses(client: &ApiClient) -> Result<Vec<Course>, AppError> {
    client.get_list(COURSES, NO_QUERY).await
}

pub async fn create_course(client: &ApiClient, request: &CourseRequest) -> Result<Course, AppError> {
    client.post(COURSES, request).await
}

pub async fn update_course(client: &ApiClient, id: i64, request: &CourseRequest) -> Result<Course, AppError> {
    client.put(&with_id(COURSES, id), request).await
}

pub async fn delete_course(client: &ApiClient, id: i64) -> Result<(), AppError> {
    client.delete(&with_id(COURSES, id)).await
}

// ── Enrollments ────────────────────────────────────────

pub async fn list_enrollments(client: &ApiClient) -> Result<Vec<Enrollment>, AppError> {
    client.get_list(ENROLLMENTS, NO_QUERY).await
}

pub async fn enroll(client: &ApiClient, request: &EnrollRequest) -> Result<Enrollment, AppError> {
    client.post(ENROLLMENTS, request).await
}

// ── Assessments ────────────────────────────────────────

pub async fn list_assessments(client: &ApiClient) -> Result<Vec<Assessment>, AppError> {
    client.get_list(ASSESSMENTS, NO_QUERY).await
}

pub async fn submit_assessment(
    client: &ApiClient,
    id: i64,
    submission: &AssessmentSubmission,
) -> Result<Assessment, AppError> {
    client.post(&format!("{ASSESSMENTS}/{id}/submit"), submission).await
}
