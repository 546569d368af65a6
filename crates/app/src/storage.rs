//! Access and refresh tokens in `localStorage`.

use dioxus::prelude::*;
use serde::Deserialize;
use shared_types::TokenPair;

const ACCESS_KEY: &str = "access_token";
const REFRESH_KEY: &str = "refresh_token";

#[derive(Debug, Deserialize)]
struct StoredTokens {
    access_token: Option<String>,
    refresh_token: Option<String>,
}

/// Quote a value as a JS string literal.
fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

fn save_script(tokens: &TokenPair) -> String {
    let refresh = match &tokens.refresh_token {
        Some(token) => format!("localStorage.setItem('{REFRESH_KEY}', {});", js_string(token)),
        None => format!("localStorage.removeItem('{REFRESH_KEY}');"),
    };
    format!(
        "localStorage.setItem('{ACCESS_KEY}', {});\n{refresh}",
        js_string(&tokens.access_token)
    )
}

pub fn save_tokens(tokens: &TokenPair) {
    document::eval(&save_script(tokens));
}

pub fn clear_tokens() {
    document::eval(&format!(
        "localStorage.removeItem('{ACCESS_KEY}');\nlocalStorage.removeItem('{REFRESH_KEY}');"
    ));
}

pub async fn load_tokens() -> Option<TokenPair> {
    let stored = document::eval(&format!(
        "return {{ access_token: localStorage.getItem('{ACCESS_KEY}'), refresh_token: localStorage.getItem('{REFRESH_KEY}') }};"
    ))
    .join::<StoredTokens>()
    .await
    .map_err(|err| tracing::debug!(?err, "token storage unavailable"))
    .ok()?;

    let access_token = stored.access_token.filter(|t| !t.is_empty())?;
    Some(TokenPair {
        access_token,
        refresh_token: stored.refresh_token.filter(|t| !t.is_empty()),
        token_type: "bearer".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(refresh: Option<&str>) -> TokenPair {
        TokenPair {
            access_token: "acc\"ess".to_string(),
            refresh_token: refresh.map(String::from),
            token_type: "bearer".to_string(),
        }
    }

    #[test]
    fn save_script_escapes_token_values() {
        let script = save_script(&pair(Some("r1")));
        assert!(script.contains(r#"localStorage.setItem('access_token', "acc\"ess");"#));
        assert!(script.contains(r#"localStorage.setItem('refresh_token', "r1");"#));
    }

    #[test]
    fn save_script_drops_stale_refresh_token() {
        let script = save_script(&pair(None));
        assert!(script.contains("localStorage.removeItem('refresh_token');"));
    }
}
