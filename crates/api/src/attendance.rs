use shared_types::{AppError, AttendanceRecord, CheckRequest, DateRange};

use crate::ApiClient;

pub async fn list_attendance(client: &ApiClient, range: &DateRange) -> Result<Vec<AttendanceRecord>, AppError> {
    client.get_list("/attendance", &range.query()).await
}

pub async fn check_in(client: &ApiClient, request: &CheckRequest) -> Result<AttendanceRecord, AppError> {
    client.post("/attendance/check-in", request).await
}

pub async fn check_out(client: &ApiClient, request: &CheckRequest) -> Result<AttendanceRecord, AppError> {
    client.post("/attendance/check-out", request).await
}
