use api::ApiClient;
use dioxus::prelude::*;
use shared_types::{can_manage, Domain, Role, User};

use crate::routes::Route;
use crate::storage;

/// Global authentication state. Login and logout are the only writers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AuthState {
    pub current_user: Signal<Option<User>>,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            current_user: Signal::new(None),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.read().is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.current_user.read().as_ref().and_then(|u| u.role())
    }

    /// Whether the signed-in user gets write affordances in `domain`.
    pub fn can_manage(&self, domain: Domain) -> bool {
        self.role().is_some_and(|role| can_manage(domain, role))
    }

    pub fn set_user(&mut self, user: User) {
        self.current_user.set(Some(user));
    }

    pub fn clear_auth(&mut self) {
        self.current_user.set(None);
    }
}

/// Hook to access auth state.
pub fn use_auth() -> AuthState {
    use_context::<AuthState>()
}

/// Rebuild the session from persisted tokens. An expired access token is
/// exchanged once through the refresh endpoint.
#[cfg(not(feature = "server"))]
pub async fn restore_session(client: &ApiClient) -> Option<User> {
    let tokens = storage::load_tokens().await?;
    client.session().set(tokens);

    match api::auth::me(client).await {
        Ok(user) => Some(user),
        Err(err) if err.is_unauthorized() => {
            // The failed call already dropped the access token; put the
            // refresh token back so it can be exchanged.
            if let Some(tokens) = storage::load_tokens().await {
                client.session().set(tokens);
            }
            match api::auth::refresh(client).await {
                Ok(tokens) => {
                    storage::save_tokens(&tokens);
                    api::auth::me(client).await.ok()
                }
                Err(err) => {
                    tracing::info!(%err, "stored session expired");
                    storage::clear_tokens();
                    None
                }
            }
        }
        Err(err) => {
            tracing::warn!(%err, "could not restore session");
            None
        }
    }
}

/// Tokens live in browser storage, so the host never resolves a session.
/// The guard keeps showing its loading state until the client hydrates.
#[cfg(feature = "server")]
pub async fn restore_session(_client: &ApiClient) -> Option<User> {
    std::future::pending().await
}

/// End the session everywhere: backend, browser storage and auth context.
pub async fn sign_out(client: ApiClient, mut auth: AuthState) {
    api::auth::logout(&client).await;
    storage::clear_tokens();
    auth.clear_auth();
    tracing::info!("signed out");
    navigator().replace(Route::Login {});
}
