use serde::Serialize;
use shared_types::{
    AppError, ChangePasswordRequest, LoginRequest, LoginResponse, MessageResponse, TokenPair,
    UpdateProfileRequest, User,
};

use crate::ApiClient;

#[derive(Serialize)]
struct RefreshBody<'a> {
    refresh_token: &'a str,
}

/// Sign in and store the issued tokens in the client session. When the
/// backend omits the user from the login body it is fetched from `/auth/me`.
pub async fn login(client: &ApiClient, request: &LoginRequest) -> Result<(TokenPair, User), AppError> {
    let response: LoginResponse = client.post("/auth/login", request).await?;
    client.session().set(response.tokens.clone());
    let user = match response.user {
        Some(user) => user,
        None => me(client).await?,
    };
    tracing::info!(user_id = user.id, role = %user.role_name, "signed in");
    Ok((response.tokens, user))
}

/// Tell the backend the session ended. The local session is cleared even
/// when the call fails.
pub async fn logout(client: &ApiClient) {
    if client.session().is_authenticated() {
        let result: Result<MessageResponse, AppError> = client.post_action("/auth/logout").await;
        if let Err(err) = result {
            tracing::debug!(%err, "logout call failed");
        }
    }
    client.session().clear();
}

/// Exchange the refresh token for a new pair.
pub async fn refresh(client: &ApiClient) -> Result<TokenPair, AppError> {
    let refresh_token = client
        .session()
        .refresh_token()
        .ok_or_else(|| AppError::unauthorized("Your session has expired. Please sign in again."))?;
    let mut tokens: TokenPair = client
        .post("/auth/refresh", &RefreshBody { refresh_token: &refresh_token })
        .await?;
    if tokens.refresh_token.is_none() {
        tokens.refresh_token = Some(refresh_token);
    }
    client.session().set(tokens.clone());
    Ok(tokens)
}

pub async fn me(client: &ApiClient) -> Result<User, AppError> {
    client.get("/auth/me").await
}

pub async fn update_profile(client: &ApiClient, request: &UpdateProfileRequest) -> Result<User, AppError> {
    client.put("/auth/me", request).await
}

pub async fn change_password(
    client: &ApiClient,
    request: &ChangePasswordRequest,
) -> Result<MessageResponse, AppError> {
    client.post("/auth/change-password", request).await
}
