use shared_types::{AppError, Organization, OrganizationRequest};

use crate::{
    client::{with_id, NO_QUERY},
    ApiClient,
};

const BASE: &str = "/organizations";

pub async fn list_organizations(client: &ApiClient) -> Result<Vec<Organization>, AppError> {
    client.get_list(BASE, NO_QUERY).await
}

pub async fn get_organization(client: &ApiClient, id: i64) -> Result<Organization, AppError> {
    client.get(&with_id(BASE, id)).await
}

pub async fn create_organization(
    client: &ApiClient,
    request: &OrganizationRequest,
) -> Result<Organization, AppError> {
    client.post(BASE, request).await
}

/// Replace all mutable fields, module toggles included.
pub async fn update_organization(
    client: &ApiClient,
    id: i64,
    request: &OrganizationRequest,
) -> Result<Organization, AppError> {
    client.put(&with_id(BASE, id), request).await
}

pub async fn delete_organization(client: &ApiClient, id: i64) -> Result<(), AppError> {
    client.delete(&with_id(BASE, id)).await
}
