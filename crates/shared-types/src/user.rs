use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

use crate::{Role, Searchable};

wire_enum! {
    pub enum UserStatus {
        Active => ("ACTIVE", "Active"),
        Inactive => ("INACTIVE", "Inactive"),
        Suspended => ("SUSPENDED", "Suspended"),
    }
}

/// A login account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Role exactly as the backend sent it. See [`User::role`].
    #[serde(rename = "role")]
    pub role_name: String,
    pub status: UserStatus,
    #[serde(default)]
    pub organization_id: Option<i64>,
    #[serde(default)]
    pub department_id: Option<i64>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Parsed role, or `None` for a role this client does not know. Such a
    /// user can sign in but only reaches the landing dashboard.
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role_name)
    }

    pub fn role_label(&self) -> &str {
        self.role().map_or(self.role_name.as_str(), |role| role.label())
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .take(1)
            .chain(self.last_name.chars().take(1))
            .collect::<String>()
            .to_uppercase()
    }
}

impl Searchable for User {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.first_name, &self.last_name, &self.email]
    }
}

/// Query parameters for `GET /users`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<i64>,
}

/// Request DTO for creating a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct CreateUserRequest {
    #[cfg_attr(feature = "validation", validate(email(message = "Valid email is required")))]
    pub email: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 8, message = "Password must be at least 8 characters"))
    )]
    pub password: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "First name is required"))
    )]
    pub first_name: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Last name is required"))
    )]
    pub last_name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Request DTO for updating a user. Replaces every mutable field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct UpdateUserRequest {
    #[cfg_attr(feature = "validation", validate(email(message = "Valid email is required")))]
    pub email: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "First name is required"))
    )]
    pub first_name: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Last name is required"))
    )]
    pub last_name: String,
    pub role: Role,
    pub status: UserStatus,
    pub organization_id: Option<i64>,
    pub department_id: Option<i64>,
    pub phone: Option<String>,
}

impl From<&User> for UpdateUserRequest {
    fn from(u: &User) -> Self {
        Self {
            email: u.email.clone(),
            first_name: u.first_name.clone(),
            last_name: u.last_name.clone(),
            role: u.role().unwrap_or_default(),
            status: u.status,
            organization_id: u.organization_id,
            department_id: u.department_id,
            phone: u.phone.clone(),
        }
    }
}

/// Request DTO for updating the signed-in user's own profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct UpdateProfileRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "First name is required"))
    )]
    pub first_name: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Last name is required"))
    )]
    pub last_name: String,
    pub phone: Option<String>,
}

/// Request DTO for `POST /auth/change-password`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct ChangePasswordRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Current password is required"))
    )]
    pub current_password: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 8, message = "Password must be at least 8 characters"))
    )]
    pub new_password: String,
}

/// Request DTO for `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct LoginRequest {
    #[cfg_attr(feature = "validation", validate(email(message = "Valid email is required")))]
    pub email: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Password is required"))
    )]
    pub password: String,
}

/// Access/refresh token pair issued by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Body returned by `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub tokens: TokenPair,
    #[serde(default)]
    pub user: Option<User>,
}
