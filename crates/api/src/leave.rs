use shared_types::{AppError, CreateLeaveRequest, LeaveDecision, LeaveRequest, LeaveStatus};

use crate::ApiClient;

const BASE: &str = "/leave";

/// List leave requests, optionally narrowed to one status.
pub async fn list_leave_requests(
    client: &ApiClient,
    status: Option<LeaveStatus>,
) -> Result<Vec<LeaveRequest>, AppError> {
    let query: Vec<(&str, &str)> = status.iter().map(|s| ("status", s.as_str())).collect();
    client.get_list(BASE, &query).await
}

pub async fn create_leave_request(
    client: &ApiClient,
    request: &CreateLeaveRequest,
) -> Result<LeaveRequest, AppError> {
    client.post(BASE, request).await
}

pub async fn approve_leave(client: &ApiClient, id: i64, decision: &LeaveDecision) -> Result<LeaveRequest, AppError> {
    client.post(&format!("{BASE}/{id}/approve"), decision).await
}

pub async fn reject_leave(client: &ApiClient, id: i64, decision: &LeaveDecision) -> Result<LeaveRequest, AppError> {
    client.post(&format!("{BASE}/{id}/reject"), decision).await
}

pub async fn cancel_leave(client: &ApiClient, id: i64) -> Result<LeaveRequest, AppError> {
    client.post_action(&format!("{BASE}/{id}/cancel")).await
}
