use shared_types::{AppError, DashboardSummary};

use crate::ApiClient;

/// Counters for the signed-in user's dashboard. The backend scopes them to
/// the caller's role and organization.
pub async fn dashboard_summary(client: &ApiClient) -> Result<DashboardSummary, AppError> {
    client.get("/dashboard/summary").await
}
