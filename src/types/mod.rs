use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============= Authentication Types =============

/// Body of `POST /user/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response: the bearer token issued by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Registration payload. Sent as multipart form data because an avatar
/// file may ride along with the text fields.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub avatar: Option<FileUpload>,
}

/// An in-memory file destined for a multipart upload.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Generic `{"detail": "..."}` acknowledgement the server returns for
/// registration, deletions, and similar one-shot operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detail {
    pub detail: String,
}

// ============= JWT Claims =============

/// Claims decoded from the payload segment of a session token.
///
/// Every field is optional: the client never assumes a shape, it checks
/// presence explicitly. `exp` is kept as raw JSON so a token carrying a
/// non-numeric expiry still decodes; [`Claims::expires_at`] then reports
/// no usable expiry and the session guard fails closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject claim, opaque to this client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Role claim, `"user"` or `"admin"` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Expiry in seconds since the Unix epoch, if the issuer set one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<serde_json::Value>,
    /// Any claims this client does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Claims {
    /// The `exp` claim as a Unix timestamp, or `None` when it is absent
    /// or not numeric.
    pub fn expires_at(&self) -> Option<i64> {
        self.exp.as_ref().and_then(|v| v.as_i64())
    }
}

// ============= User Types =============

/// Account role as assigned by the server. Client-side role checks are
/// advisory UX only; the server enforces authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }
}

/// The authenticated user's own profile, from `GET /user/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub active_avatar_url: Option<String>,
    #[serde(default)]
    pub public_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A user as seen by the admin listing, which additionally exposes the
/// role and confirmation state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default)]
    pub active_avatar_url: Option<String>,
    #[serde(default)]
    pub public_key: Option<String>,
    #[serde(default)]
    pub account_confirmed: Option<bool>,
    pub created_at: DateTime<Utc>,
}

/// A profile image record. The binary data lives in object storage and is
/// fetched separately via the image-data endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileImage {
    pub id: Uuid,
    pub user_id: Uuid,
    pub image_key: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Body of `PUT /user/public-key`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicKeyUpdate {
    pub public_key: String,
}

/// Response of `GET /user/public-key/{user_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicKeyResponse {
    #[serde(default)]
    pub public_key: Option<String>,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::InvalidResponse(err.to_string())
        } else {
            AppError::Network(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
