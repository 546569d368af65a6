use shared_types::{flatten_payroll_error, AppError, DateRange, PayrollRecord, PayrollRequest};

use crate::{client::with_id, ApiClient};

const BASE: &str = "/payroll";

/// List payroll records, optionally limited to one pay period.
pub async fn list_payroll(client: &ApiClient, period: Option<&DateRange>) -> Result<Vec<PayrollRecord>, AppError> {
    let query = period.map(DateRange::query).unwrap_or_default();
    client.get_list(BASE, &query).await
}

pub async fn create_payroll(client: &ApiClient, request: &PayrollRequest) -> Result<PayrollRecord, AppError> {
    client.post(BASE, request).await.map_err(flatten_payroll_error)
}

pub async fn update_payroll(
    client: &ApiClient,
    id: i64,
    request: &PayrollRequest,
) -> Result<PayrollRecord, AppError> {
    client
        .put(&with_id(BASE, id), request)
        .await
        .map_err(flatten_payroll_error)
}

pub async fn delete_payroll(client: &ApiClient, id: i64) -> Result<(), AppError> {
    client.delete(&with_id(BASE, id)).await
}
