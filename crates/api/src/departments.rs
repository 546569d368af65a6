use shared_types::{AppError, Department, DepartmentRequest};

use crate::{
    client::{with_id, NO_QUERY},
    ApiClient,
};

const BASE: &str = "/departments";

pub async fn list_departments(client: &ApiClient) -> Result<Vec<Department>, AppError> {
    client.get_list(BASE, NO_QUERY).await
}

pub async fn create_department(client: &ApiClient, request: &DepartmentRequest) -> Result<Department, AppError> {
    client.post(BASE, request).await
}

pub async fn update_department(
    client: &ApiClient,
    id: i64,
    request: &DepartmentRequest,
) -> Result<Department, AppError> {
    client.put(&with_id(BASE, id), request).await
}

pub async fn delete_department(client: &ApiClient, id: i64) -> Result<(), AppError> {
    client.delete(&with_id(BASE, id)).await
}
