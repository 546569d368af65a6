use reqwest::{multipart::Form, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use shared_types::{ApiSettings, AppError, ListBody};
use tracing::{debug, warn};

use crate::Session;

/// Thin wrapper over `reqwest` that knows the backend base URL, attaches
/// the bearer token and turns non-2xx responses into [`AppError`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    settings: ApiSettings,
    session: Session,
}

impl ApiClient {
    pub fn new(settings: ApiSettings) -> Self {
        Self::with_session(settings, Session::default())
    }

    pub fn with_session(settings: ApiSettings, session: Session) -> Self {
        Self {
            http: build_http(&settings),
            settings,
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.settings.url(path));
        match self.session.access_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, AppError> {
        let response = builder
            .send()
            .await
            .map_err(|e| AppError::network(format!("Could not reach the server: {e}")))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), %body, "request failed");
        let err = AppError::from_response(status.as_u16(), &body);
        if err.is_unauthorized() {
            self.session.clear();
        }
        Err(err)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        debug!("GET");
        let response = self.send(self.request(Method::GET, path)).await?;
        decode(response).await
    }

    #[tracing::instrument(skip(self, query))]
    pub async fn get_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        debug!("GET");
        let response = self.send(self.request(Method::GET, path).query(query)).await?;
        decode(response).await
    }

    /// GET a list endpoint. Accepts a bare array or an `{items, total}` page.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_list<T, Q>(&self, path: &str, query: &Q) -> Result<Vec<T>, AppError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        debug!("GET list");
        let response = self.send(self.request(Method::GET, path).query(query)).await?;
        let body: ListBody<T> = decode(response).await?;
        Ok(body.into_items())
    }

    #[tracing::instrument(skip(self, body))]
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!("POST");
        let response = self.send(self.request(Method::POST, path).json(body)).await?;
        decode(response).await
    }

    /// POST with no request body, for action endpoints like submit or cancel.
    #[tracing::instrument(skip(self))]
    pub async fn post_action<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        debug!("POST action");
        let response = self.send(self.request(Method::POST, path)).await?;
        decode(response).await
    }

    #[tracing::instrument(skip(self, body))]
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!("PUT");
        let response = self.send(self.request(Method::PUT, path).json(body)).await?;
        decode(response).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<(), AppError> {
        debug!("DELETE");
        self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self, form))]
    pub async fn multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T, AppError> {
        debug!("POST multipart");
        let response = self.send(self.request(Method::POST, path).multipart(form)).await?;
        decode(response).await
    }

    /// GET raw bytes, e.g. a document download.
    #[tracing::instrument(skip(self))]
    pub async fn bytes(&self, path: &str) -> Result<Vec<u8>, AppError> {
        debug!("GET bytes");
        let response = self.send(self.request(Method::GET, path)).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::network(format!("Download interrupted: {e}")))?;
        Ok(bytes.to_vec())
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let text = response
        .text()
        .await
        .map_err(|e| AppError::network(format!("Could not read the response: {e}")))?;
    // Empty 2xx bodies decode as JSON null so `()` and `Option<_>` targets work.
    let text = if text.trim().is_empty() { "null" } else { text.as_str() };
    serde_json::from_str(text)
        .map_err(|e| AppError::internal(format!("Unexpected response from server: {e}")))
}

#[cfg(not(target_arch = "wasm32"))]
fn build_http(settings: &ApiSettings) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(settings.timeout_secs))
        .build()
        .unwrap_or_default()
}

#[cfg(target_arch = "wasm32")]
fn build_http(_settings: &ApiSettings) -> reqwest::Client {
    reqwest::Client::new()
}

/// Path with a trailing numeric id, e.g. `with_id("/employees", 4)`.
pub(crate) fn with_id(base: &str, id: i64) -> String {
    format!("{base}/{id}")
}

/// Empty query for list endpoints without filters.
pub(crate) const NO_QUERY: &[(&str, &str)] = &[];
