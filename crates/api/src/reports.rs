use shared_types::{AppError, DateRange, Report, ReportKind};

use crate::ApiClient;

pub async fn get_report(client: &ApiClient, kind: ReportKind, range: &DateRange) -> Result<Report, AppError> {
    client
        .get_query(&format!("/reports/{}", kind.as_str()), &range.query())
        .await
}
