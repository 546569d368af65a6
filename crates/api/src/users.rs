use shared_types::{AppError, CreateUserRequest, UpdateUserRequest, User, UserFilter};

use crate::{client::with_id, ApiClient};

const BASE: &str = "/users";

pub async fn list_users(client: &ApiClient, filter: &UserFilter) -> Result<Vec<User>, AppError> {
    client.get_list(BASE, filter).await
}

pub async fn get_user(client: &ApiClient, id: i64) -> Result<User, AppError> {
    client.get(&with_id(BASE, id)).await
}

pub async fn create_user(client: &ApiClient, request: &CreateUserRequest) -> Result<User, AppError> {
    client.post(BASE, request).await
}

pub async fn update_user(client: &ApiClient, id: i64, request: &UpdateUserRequest) -> Result<User, AppError> {
    client.put(&with_id(BASE, id), request).await
}

pub async fn delete_user(client: &ApiClient, id: i64) -> Result<(), AppError> {
    client.delete(&with_id(BASE, id)).await
}
