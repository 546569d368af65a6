//! Browser "save as" for bytes fetched from the API.

use base64::Engine as _;
use dioxus::prelude::*;

fn download_script(file_name: &str, content_type: &str, bytes: &[u8]) -> String {
    let data = base64::engine::general_purpose::STANDARD.encode(bytes);
    let name = serde_json::to_string(file_name).unwrap_or_else(|_| "\"download\"".to_string());
    let mime = serde_json::to_string(content_type)
        .unwrap_or_else(|_| "\"application/octet-stream\"".to_string());
    format!(
        r#"
        (function() {{
            var raw = atob("{data}");
            var buf = new Uint8Array(raw.length);
            for (var i = 0; i < raw.length; i++) {{ buf[i] = raw.charCodeAt(i); }}
            var url = URL.createObjectURL(new Blob([buf], {{ type: {mime} }}));
            var a = document.createElement('a');
            a.href = url;
            a.download = {name};
            document.body.appendChild(a);
            a.click();
            a.remove();
            setTimeout(function() {{ URL.revokeObjectURL(url); }}, 1000);
        }})();
        "#
    )
}

/// Hand `bytes` to the browser as a file download through an anchor click.
pub fn save_file(file_name: &str, content_type: Option<&str>, bytes: &[u8]) {
    let content_type = content_type.unwrap_or("application/octet-stream");
    tracing::debug!(file_name, size = bytes.len(), "saving download");
    document::eval(&download_script(file_name, content_type, bytes));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_embeds_base64_payload_and_quoted_name() {
        let script = download_script("Q1 \"final\".csv", "text/csv", b"a,b\r\n");
        assert!(script.contains("atob(\"YSxiDQo=\")"));
        assert!(script.contains(r#"a.download = "Q1 \"final\".csv";"#));
        assert!(script.contains(r#"type: "text/csv""#));
    }
}
