use shared_types::{AppError, Employee, EmployeeFilter, EmployeeRequest};

use crate::{client::with_id, ApiClient};

const BASE: &str = "/employees";

pub async fn list_employees(client: &ApiClient, filter: &EmployeeFilter) -> Result<Vec<Employee>, AppError> {
    client.get_list(BASE, filter).await
}

pub async fn get_employee(client: &ApiClient, id: i64) -> Result<Employee, AppError> {
    client.get(&with_id(BASE, id)).await
}

pub async fn create_employee(client: &ApiClient, request: &EmployeeRequest) -> Result<Employee, AppError> {
    client.post(BASE, request).await
}

pub async fn update_employee(
    client: &ApiClient,
    id: i64,
    request: &EmployeeRequest,
) -> Result<Employee, AppError> {
    client.put(&with_id(BASE, id), request).await
}

pub async fn delete_employee(client: &ApiClient, id: i64) -> Result<(), AppError> {
    client.delete(&with_id(BASE, id)).await
}
