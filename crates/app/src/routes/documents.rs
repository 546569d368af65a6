use std::collections::HashMap;

use api::ApiClient;
use dioxus::prelude::*;
use shared_types::{
    apply_filters, format_file_size, partition, samples, AppError, Document, DocumentCategory,
    DocumentStatus, Domain, FetchOutcome, FilePayload, Module, TabFilter, UpdateDocumentRequest,
    UploadDocumentRequest, ValidateRequest,
};
use shared_ui::{
    use_toast, Button, ButtonVariant, ConfirmDialog, DataTable, DataTableBody, DataTableCell,
    DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow, Form, FormSelect, Input, Modal,
    PageHeader, SearchBar, SearchInput, SkeletonRows, StatusBadge, TabBar, TabItem, Textarea,
    ToastOptions,
};

use crate::auth::use_auth;
use crate::components::{ErrorPanel, FallbackNotice, ModuleGate};
use crate::download::save_file;
use crate::format_helpers::{blank_to_none, opt_text};
use crate::hooks::{field_error, outcome, use_action_failures, use_debounced_search, use_fallback_policy};

#[derive(Debug, Clone, PartialEq)]
struct DocumentForm {
    title: String,
    description: String,
    category: String,
    status: String,
}

impl Default for DocumentForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category: DocumentCategory::Policy.as_str().to_string(),
            status: DocumentStatus::Active.as_str().to_string(),
        }
    }
}

impl DocumentForm {
    fn from_document(doc: &Document) -> Self {
        Self {
            title: doc.title.clone(),
            description: doc.description.clone().unwrap_or_default(),
            category: doc.category.as_str().to_string(),
            status: doc.status.as_str().to_string(),
        }
    }

    fn category(&self) -> DocumentCategory {
        DocumentCategory::parse(&self.category).unwrap_or(DocumentCategory::Other)
    }

    fn to_upload(&self) -> UploadDocumentRequest {
        UploadDocumentRequest {
            title: self.title.trim().to_string(),
            description: blank_to_none(&self.description),
            category: self.category(),
        }
    }

    fn to_update(&self) -> UpdateDocumentRequest {
        UpdateDocumentRequest {
            title: self.title.trim().to_string(),
            description: blank_to_none(&self.description),
            category: self.category(),
            status: DocumentStatus::parse(&self.status).unwrap_or(DocumentStatus::Active),
        }
    }
}

/// Tab value for a category filter; `"all"` admits everything.
fn category_filter(tab: &str) -> TabFilter<DocumentCategory> {
    DocumentCategory::parse(tab).map(TabFilter::Only).unwrap_or_default()
}

/// Company and personal documents, grouped by category.
#[component]
pub fn Documents() -> Element {
    rsx! {
        ModuleGate { module: Module::Documents,
            DocumentLibrary {}
        }
    }
}

#[component]
fn DocumentLibrary() -> Element {
    let auth = use_auth();
    let client = use_context::<ApiClient>();
    let toast = use_toast();
    let failures = use_action_failures();
    let policy = use_fallback_policy();
    let mut search = use_debounced_search();
    let mut category_tab = use_signal(|| "all".to_string());

    let list_client = client.clone();
    let mut documents = use_resource(move || {
        let client = list_client.clone();
        async move {
            let result = api::documents::list_documents(&client).await;
            outcome(result, policy, samples::sample_documents)
        }
    });

    let can_manage = auth.can_manage(Domain::Documents);

    let mut show_form = use_signal(|| false);
    let mut editing: Signal<Option<i64>> = use_signal(|| None);
    let mut form = use_signal(DocumentForm::default);
    let mut picked: Signal<Option<FilePayload>> = use_signal(|| None);
    let mut errors = use_signal(HashMap::<String, String>::new);
    let mut saving = use_signal(|| false);
    let mut deleting: Signal<Option<Document>> = use_signal(|| None);
    let mut busy = use_signal(|| false);

    let finish = use_callback(move |result: Result<&'static str, AppError>| {
        saving.set(false);
        match result {
            Ok(msg) => {
                toast.success(msg.to_string(), ToastOptions::new());
                show_form.set(false);
                picked.set(None);
                documents.restart();
            }
            Err(err) => {
                errors.set(err.field_errors.clone());
                failures.report(err);
            }
        }
    });

    let handle_file = move |evt: FormEvent| async move {
        let files = evt.files();
        if let Some(f) = files.first() {
            let file_name = f.name();
            let content_type = f.content_type();
            match f.read_bytes().await {
                Ok(bytes) => {
                    if form.read().title.trim().is_empty() {
                        let stem = file_name.rsplit_once('.').map(|(s, _)| s).unwrap_or(&file_name);
                        form.write().title = stem.to_string();
                    }
                    picked.set(Some(FilePayload {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    }));
                }
                Err(err) => {
                    tracing::warn!(%err, "could not read picked file");
                    toast.error("Failed to read file.".to_string(), ToastOptions::new());
                }
            }
        }
    };

    let save_client = client.clone();
    let handle_save = move |_: FormEvent| {
        let draft = form.read().clone();
        let client = save_client.clone();
        match editing() {
            Some(id) => {
                let request = draft.to_update();
                if let Err(err) = request.validate_request() {
                    errors.set(err.field_errors);
                    return;
                }
                saving.set(true);
                spawn(async move {
                    let result = api::documents::update_document(&client, id, &request).await;
                    finish.call(result.map(|_| "Document updated"));
                });
            }
            None => {
                let request = draft.to_upload();
                if let Err(err) = request.validate_request() {
                    errors.set(err.field_errors);
                    return;
                }
                let Some(file) = picked() else {
                    errors.set(HashMap::from([("file".to_string(), "Choose a file to upload".to_string())]));
                    return;
                };
                saving.set(true);
                spawn(async move {
                    let result = api::documents::upload_document(&client, &request, file).await;
                    finish.call(result.map(|_| "Document uploaded"));
                });
            }
        }
        errors.set(HashMap::new());
    };

    let download_client = client.clone();
    let download = use_callback(move |doc: Document| {
        let client = download_client.clone();
        spawn(async move {
            match api::documents::download_document(&client, doc.id).await {
                Ok(bytes) => {
                    tracing::info!(id = doc.id, size = bytes.len(), "document downloaded");
                    save_file(&doc.file_name, doc.content_type.as_deref(), &bytes);
                }
                Err(err) => failures.report(err),
            }
        });
    });

    let delete_client = client.clone();
    let handle_delete = move |_| {
        let Some(doc) = deleting() else { return };
        let client = delete_client.clone();
        spawn(async move {
            busy.set(true);
            match api::documents::delete_document(&client, doc.id).await {
                Ok(()) => {
                    toast.success(format!("{} deleted", doc.title), ToastOptions::new());
                    documents.restart();
                }
                Err(err) => failures.report(err),
            }
            busy.set(false);
            deleting.set(None);
        });
    };

    let open_edit = use_callback(move |doc: Document| {
        form.set(DocumentForm::from_document(&doc));
        editing.set(Some(doc.id));
        picked.set(None);
        errors.set(HashMap::new());
        show_form.set(true);
    });

    let errs = errors.read().clone();
    let draft = form.read().clone();
    let is_edit = editing().is_some();
    let query = search.query.read().clone();
    let active_tab = category_tab.read().clone();
    let picked_label = picked
        .read()
        .as_ref()
        .map(|f| format!("{} ({})", f.file_name, format_file_size(f.bytes.len() as u64)));

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./documents.css") }

        div { class: "documents-page",
            PageHeader {
                title: "Documents".to_string(),
                actions: can_manage.then(|| rsx! {
                    Button {
                        onclick: move |_| {
                            form.set(DocumentForm::default());
                            editing.set(None);
                            picked.set(None);
                            errors.set(HashMap::new());
                            show_form.set(true);
                        },
                        "Upload Document"
                    }
                }),
            }

            SearchBar {
                SearchInput {
                    value: search.input.read().clone(),
                    placeholder: "Search title or description".to_string(),
                    on_input: move |value: String| search.on_input(value),
                }
            }

            match &*documents.read() {
                None => rsx! { SkeletonRows {} },
                Some(FetchOutcome::Failed(err)) => rsx! {
                    ErrorPanel { error: err.clone(), on_retry: move |_| documents.restart() }
                },
                Some(result) => {
                    let all = result.data().cloned().unwrap_or_default();
                    let sampled = result.is_fallback();
                    let writable = can_manage && !sampled;
                    let groups = partition(&all, |d| d.category.as_str());
                    let mut tabs = vec![TabItem::new("all", "All").with_count(all.len())];
                    tabs.extend(DocumentCategory::ALL.iter().map(|c| {
                        let count = groups.get(c.as_str()).map(|g| g.len()).unwrap_or(0);
                        TabItem::new(c.as_str(), c.label()).with_count(count)
                    }));
                    let visible: Vec<Document> = apply_filters(&all, &query, &category_filter(&active_tab), |d| d.category)
                        .into_iter()
                        .cloned()
                        .collect();
                    rsx! {
                        if let Some(err) = result.error().filter(|_| sampled) {
                            FallbackNotice { error: err.clone() }
                        }

                        TabBar {
                            tabs,
                            active: active_tab.clone(),
                            on_select: move |value: String| category_tab.set(value),
                        }

                        DataTable {
                            DataTableHeader {
                                DataTableColumn { "Title" }
                                DataTableColumn { "Category" }
                                DataTableColumn { "File" }
                                DataTableColumn { "Size" }
                                DataTableColumn { "Owner" }
                                DataTableColumn { "Status" }
                                DataTableColumn { "" }
                            }
                            DataTableBody {
                                if visible.is_empty() {
                                    DataTableEmpty { colspan: 7, message: "No documents match.".to_string() }
                                }
                                for doc in visible.into_iter() {
                                    DataTableRow { key: "{doc.id}",
                                        DataTableCell {
                                            div { class: "document-title",
                                                span { "{doc.title}" }
                                                if let Some(description) = doc.description.as_ref() {
                                                    span { class: "document-description", "{description}" }
                                                }
                                            }
                                        }
                                        DataTableCell { "{doc.category.label()}" }
                                        DataTableCell { code { "{doc.file_name}" } }
                                        DataTableCell { {doc.file_size.map(format_file_size).unwrap_or_else(|| "-".to_string())} }
                                        DataTableCell { {opt_text(doc.owner_name.as_deref())} }
                                        DataTableCell {
                                            StatusBadge {
                                                status: doc.status.as_str().to_string(),
                                                label: doc.status.label().to_string(),
                                            }
                                        }
                                        DataTableCell {
                                            div { class: "row-actions",
                                                Button {
                                                    variant: ButtonVariant::Ghost,
                                                    disabled: sampled,
                                                    onclick: {
                                                        let doc = doc.clone();
                                                        move |_| download.call(doc.clone())
                                                    },
                                                    "Download"
                                                }
                                                if writable {
                                                    Button {
                                                        variant: ButtonVariant::Ghost,
                                                        onclick: {
                                                            let doc = doc.clone();
                                                            move |_| open_edit.call(doc.clone())
                                                        },
                                                        "Edit"
                                                    }
                                                    Button {
                                                        variant: ButtonVariant::Ghost,
                                                        onclick: {
                                                            let doc = doc.clone();
                                                            move |_| deleting.set(Some(doc.clone()))
                                                        },
                                                        "Delete"
                                                    }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            Modal {
                open: show_form(),
                title: if is_edit { "Edit Document".to_string() } else { "Upload Document".to_string() },
                on_close: move |_| show_form.set(false),

                Form { onsubmit: handle_save,
                    if !is_edit {
                        div { class: "document-file-picker",
                            label { class: "input-label", "File" }
                            input {
                                r#type: "file",
                                class: "document-file-input",
                                onchange: handle_file,
                            }
                            if let Some(label) = picked_label.clone() {
                                span { class: "document-file-name", "{label}" }
                            }
                            if let Some(msg) = field_error(&errs, "file") {
                                p { class: "field-error", "{msg}" }
                            }
                        }
                    }
                    Input {
                        label: "Title".to_string(),
                        value: draft.title.clone(),
                        required: true,
                        error: field_error(&errs, "title"),
                        on_input: move |evt: FormEvent| form.write().title = evt.value(),
                    }
                    Textarea {
                        label: "Description".to_string(),
                        value: draft.description.clone(),
                        on_input: move |evt: FormEvent| form.write().description = evt.value(),
                    }
                    FormSelect {
                        label: "Category".to_string(),
                        value: draft.category.clone(),
                        onchange: move |evt: Event<FormData>| form.write().category = evt.value(),
                        for category in DocumentCategory::ALL {
                            option { key: "{category.as_str()}", value: category.as_str(), "{category.label()}" }
                        }
                    }
                    if is_edit {
                        FormSelect {
                            label: "Status".to_string(),
                            value: draft.status.clone(),
                            onchange: move |evt: Event<FormData>| form.write().status = evt.value(),
                            for status in DocumentStatus::ALL {
                                option { key: "{status.as_str()}", value: status.as_str(), "{status.label()}" }
                            }
                        }
                    }
                    div { class: "form-actions",
                        Button {
                            variant: ButtonVariant::Outline,
                            onclick: move |_| show_form.set(false),
                            "Cancel"
                        }
                        Button {
                            button_type: "submit".to_string(),
                            loading: saving(),
                            disabled: saving(),
                            if is_edit { "Save Changes" } else { "Upload" }
                        }
                    }
                }
            }

            ConfirmDialog {
                open: deleting.read().is_some(),
                title: "Delete document".to_string(),
                message: deleting
                    .read()
                    .as_ref()
                    .map(|d| format!("Delete \"{}\"? The file cannot be recovered.", d.title))
                    .unwrap_or_default(),
                busy: busy(),
                on_confirm: handle_delete,
                on_cancel: move |_| deleting.set(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn category_tabs_partition_without_overlap() {
        let docs = samples::sample_documents();
        let mut seen = 0;
        for category in DocumentCategory::ALL {
            let filtered = apply_filters(&docs, "", &category_filter(category.as_str()), |d| d.category);
            assert!(filtered.iter().all(|d| d.category == *category));
            seen += filtered.len();
        }
        assert_eq!(seen, docs.len());
        assert_eq!(apply_filters(&docs, "", &category_filter("all"), |d| d.category).len(), docs.len());
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_description() {
        let docs = samples::sample_documents();
        let hits = apply_filters(&docs, "PARENTAL", &TabFilter::All, |d| d.category);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Leave Policy");
        let hits = apply_filters(&docs, "handbook", &category_filter("POLICY"), |d| d.category);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn edit_form_reproduces_the_document() {
        let doc = &samples::sample_documents()[2];
        assert_eq!(DocumentForm::from_document(doc).to_update(), UpdateDocumentRequest::from(doc));
    }

    #[test]
    fn upload_requires_a_title() {
        let form = DocumentForm::default();
        let err = form.to_upload().validate_request().unwrap_err();
        assert!(err.field_errors.contains_key("title"));
    }
}
