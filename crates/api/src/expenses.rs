use shared_types::{AppError, ExpenseDecision, ExpenseReport, ExpenseReportRequest};

use crate::{
    client::{with_id, NO_QUERY},
    ApiClient,
};

const BASE: &str = "/expenses";

pub async fn list_expense_reports(client: &ApiClient) -> Result<Vec<ExpenseReport>, AppError> {
    client.get_list(BASE, NO_QUERY).await
}

pub async fn create_expense_report(
    client: &ApiClient,
    request: &ExpenseReportRequest,
) -> Result<ExpenseReport, AppError> {
    client.post(BASE, request).await
}

pub async fn update_expense_report(
    client: &ApiClient,
    id: i64,
    request: &ExpenseReportRequest,
) -> Result<ExpenseReport, AppError> {
    client.put(&with_id(BASE, id), request).await
}

pub async fn delete_expense_report(client: &ApiClient, id: i64) -> Result<(), AppError> {
    client.delete(&with_id(BASE, id)).await
}

/// Move a draft report into review.
pub async fn submit_expense_report(client: &ApiClient, id: i64) -> Result<ExpenseReport, AppError> {
    client.post_action(&format!("{BASE}/{id}/submit")).await
}

pub async fn approve_expense_report(client: &ApiClient, id: i64) -> Result<ExpenseReport, AppError> {
    client
        .post(&format!("{BASE}/{id}/approve"), &ExpenseDecision::default())
        .await
}

pub async fn reject_expense_report(
    client: &ApiClient,
    id: i64,
    decision: &ExpenseDecision,
) -> Result<ExpenseReport, AppError> {
    client.post(&format!("{BASE}/{id}/reject"), decision).await
}
