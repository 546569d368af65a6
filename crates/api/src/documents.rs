use reqwest::multipart::{Form, Part};
use shared_types::{AppError, Document, FilePayload, UpdateDocumentRequest, UploadDocumentRequest};

use crate::{
    client::{with_id, NO_QUERY},
    ApiClient,
};

const BASE: &str = "/documents";

pub async fn list_documents(client: &ApiClient) -> Result<Vec<Document>, AppError> {
    client.get_list(BASE, NO_QUERY).await
}

/// Upload a file with its metadata as a multipart form.
pub async fn upload_document(
    client: &ApiClient,
    request: &UploadDocumentRequest,
    file: FilePayload,
) -> Result<Document, AppError> {
    client.multipart(&format!("{BASE}/upload"), upload_form(request, file)?).await
}

fn upload_form(request: &UploadDocumentRequest, file: FilePayload) -> Result<Form, AppError> {
    let mut part = Part::bytes(file.bytes).file_name(file.file_name);
    if let Some(content_type) = file.content_type.as_deref() {
        part = part
            .mime_str(content_type)
            .map_err(|e| AppError::bad_request(format!("Unsupported file type: {e}")))?;
    }

    let mut form = Form::new()
        .text("title", request.title.clone())
        .text("category", request.category.as_str());
    if let Some(description) = request.description.as_ref().filter(|d| !d.trim().is_empty()) {
        form = form.text("description", description.clone());
    }
    Ok(form.part("file", part))
}

/// Fetch the raw file. The caller hands the bytes to the browser.
pub async fn download_document(client: &ApiClient, id: i64) -> Result<Vec<u8>, AppError> {
    client.bytes(&format!("{BASE}/{id}/download")).await
}

pub async fn update_document(
    client: &ApiClient,
    id: i64,
    request: &UpdateDocumentRequest,
) -> Result<Document, AppError> {
    client.put(&with_id(BASE, id), request).await
}

pub async fn delete_document(client: &ApiClient, id: i64) -> Result<(), AppError> {
    client.delete(&with_id(BASE, id)).await
}
