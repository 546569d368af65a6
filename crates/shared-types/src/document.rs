use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

use crate::Searchable;

wire_enum! {
    pub enum DocumentCategory {
        Policy => ("POLICY", "Policy"),
        Contract => ("CONTRACT", "Contract"),
        Payslip => ("PAYSLIP", "Payslip"),
        Certificate => ("CERTIFICATE", "Certificate"),
        Identification => ("IDENTIFICATION", "Identification"),
        Other => ("OTHER", "Other"),
    }
}

wire_enum! {
    pub enum DocumentStatus {
        Active => ("ACTIVE", "Active"),
        Archived => ("ARCHIVED", "Archived"),
    }
}

/// Metadata of a stored file. The bytes are fetched separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: DocumentCategory,
    pub file_name: String,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub owner_id: Option<i64>,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
    pub status: DocumentStatus,
}

impl Searchable for Document {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.description.as_deref().unwrap_or_default(),
        ]
    }
}

/// Form fields sent alongside the file in a multipart upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct UploadDocumentRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Title is required"))
    )]
    pub title: String,
    pub description: Option<String>,
    pub category: DocumentCategory,
}

/// Request DTO for `PUT /documents/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct UpdateDocumentRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Title is required"))
    )]
    pub title: String,
    pub description: Option<String>,
    pub category: DocumentCategory,
    pub status: DocumentStatus,
}

impl From<&Document> for UpdateDocumentRequest {
    fn from(d: &Document) -> Self {
        Self {
            title: d.title.clone(),
            description: d.description.clone(),
            category: d.category,
            status: d.status,
        }
    }
}

/// A file picked in the browser, ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePayload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Format a byte count for display, e.g. `1.5 MB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.1} {}", UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_sizes_are_human_readable() {
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.0 MB");
    }

    #[test]
    fn search_fields_cover_missing_description() {
        let doc: Document = serde_json::from_str(
            r#"{"id":1,"title":"Handbook","category":"POLICY","file_name":"h.pdf","status":"ACTIVE"}"#,
        )
        .unwrap();
        assert_eq!(doc.search_fields(), vec!["Handbook", ""]);
    }
}
