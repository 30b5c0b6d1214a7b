//! Typed endpoints of the Murmur user service.

use crate::api::client::ApiClient;
use crate::types::{
    AdminUser, Detail, FileUpload, LoginRequest, NewUser, ProfileImage, PublicKeyResponse,
    PublicKeyUpdate, Result, TokenResponse, UserProfile, UserRole,
};
use reqwest::multipart::{Form, Part};
use uuid::Uuid;

/// Thin typed wrapper over the `/user` routes.
///
/// Authentication, 401 handling, and error mapping all live in
/// [`ApiClient`]; these methods only shape requests and responses.
#[derive(Clone)]
pub struct UserApi {
    client: ApiClient,
}

fn file_part(upload: FileUpload) -> Result<Part> {
    let part = Part::bytes(upload.bytes)
        .file_name(upload.file_name)
        .mime_str(&upload.content_type)
        .map_err(|e| crate::types::AppError::InvalidInput(format!("bad content type: {}", e)))?;
    Ok(part)
}

impl UserApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// The underlying client, for endpoints outside the user service.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    // ============= Authentication =============

    /// `POST /user/login`. On success the server hands back the bearer
    /// token; storing it is the caller's decision (the login page stores,
    /// a credentials check might not).
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.client.post_json("/user/login", &body).await
    }

    /// `POST /user/register`, multipart so an avatar can ride along.
    pub async fn register(&self, new_user: NewUser) -> Result<Detail> {
        let mut form = Form::new()
            .text("username", new_user.username)
            .text("email", new_user.email)
            .text("password", new_user.password);
        if let Some(avatar) = new_user.avatar {
            form = form.part("file", file_part(avatar)?);
        }
        self.client.post_multipart("/user/register", form).await
    }

    /// `GET /user/confirm-account?token=`: account activation from the
    /// emailed link.
    pub async fn confirm_account(&self, token: &str) -> Result<Detail> {
        self.client
            .get_json(&format!("/user/confirm-account?token={}", token))
            .await
    }

    /// `POST /user/request-password-reset`.
    pub async fn request_password_reset(&self, email: &str) -> Result<Detail> {
        self.client
            .post_json(
                "/user/request-password-reset",
                &serde_json::json!({ "email": email }),
            )
            .await
    }

    /// `POST /user/reset-password`.
    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<Detail> {
        self.client
            .post_json(
                "/user/reset-password",
                &serde_json::json!({
                    "token": token,
                    "new_password": new_password,
                    "confirm_password": confirm_password,
                }),
            )
            .await
    }

    // ============= Profile =============

    /// `GET /user/me`.
    pub async fn me(&self) -> Result<UserProfile> {
        self.client.get_json("/user/me").await
    }

    /// `DELETE /user/delete`: the authenticated user removes their own
    /// account.
    pub async fn delete_account(&self) -> Result<Detail> {
        self.client.delete_json("/user/delete").await
    }

    /// `PUT /user/public-key`: publish this client's encryption public key.
    pub async fn update_public_key(&self, public_key: &str) -> Result<Detail> {
        let body = PublicKeyUpdate {
            public_key: public_key.to_string(),
        };
        self.client.put_json("/user/public-key", &body).await
    }

    /// `GET /user/public-key/{user_id}`: another user's public key, for
    /// encrypting messages to them.
    pub async fn public_key(&self, user_id: Uuid) -> Result<PublicKeyResponse> {
        self.client
            .get_json(&format!("/user/public-key/{}", user_id))
            .await
    }

    // ============= Profile images =============

    /// `GET /user/profile-images`.
    pub async fn profile_images(&self) -> Result<Vec<ProfileImage>> {
        self.client.get_json("/user/profile-images").await
    }

    /// `POST /user/profile-images` (multipart upload).
    pub async fn upload_profile_image(&self, upload: FileUpload) -> Result<ProfileImage> {
        let form = Form::new().part("file", file_part(upload)?);
        self.client.post_multipart("/user/profile-images", form).await
    }

    /// `GET /user/profile-images/{id}/data`: the raw image bytes.
    pub async fn profile_image_data(&self, image_id: Uuid) -> Result<Vec<u8>> {
        self.client
            .get_bytes(&format!("/user/profile-images/{}/data", image_id))
            .await
    }

    /// `DELETE /user/profile-images/{id}`.
    pub async fn delete_profile_image(&self, image_id: Uuid) -> Result<Detail> {
        self.client
            .delete_json(&format!("/user/profile-images/{}", image_id))
            .await
    }

    /// `PUT /user/profile-images/{id}/set-active`.
    pub async fn set_active_profile_image(&self, image_id: Uuid) -> Result<ProfileImage> {
        self.client
            .put_empty(&format!("/user/profile-images/{}/set-active", image_id))
            .await
    }

    // ============= Admin =============
    //
    // Admin-ness is enforced server-side; these calls simply fail with 401
    // or 403 for a non-admin session.

    /// `GET /user/all`: every account, with roles.
    pub async fn all_users(&self) -> Result<Vec<AdminUser>> {
        self.client.get_json("/user/all").await
    }

    /// `DELETE /user/admin/delete/{user_id}`.
    pub async fn admin_delete_user(&self, user_id: Uuid) -> Result<Detail> {
        self.client
            .delete_json(&format!("/user/admin/delete/{}", user_id))
            .await
    }

    /// `PUT /user/admin/edit?user_id=`: edit role, confirmation state,
    /// and optionally replace the avatar. Multipart, all fields optional.
    pub async fn admin_edit_user(
        &self,
        user_id: Uuid,
        role: Option<UserRole>,
        account_confirmed: Option<bool>,
        avatar: Option<FileUpload>,
    ) -> Result<AdminUser> {
        let mut form = Form::new();
        if let Some(role) = role {
            form = form.text("role", role.as_str());
        }
        if let Some(confirmed) = account_confirmed {
            form = form.text("account_confirmed", confirmed.to_string());
        }
        if let Some(avatar) = avatar {
            form = form.part("file", file_part(avatar)?);
        }
        self.client
            .put_multipart(&format!("/user/admin/edit?user_id={}", user_id), form)
            .await
    }

    /// `GET /admin/users/{user_id}/profile-images`.
    pub async fn admin_profile_images(&self, user_id: Uuid) -> Result<Vec<ProfileImage>> {
        self.client
            .get_json(&format!("/admin/users/{}/profile-images", user_id))
            .await
    }

    /// `GET /admin/users/{user_id}/profile-images/{id}/data`.
    pub async fn admin_profile_image_data(&self, user_id: Uuid, image_id: Uuid) -> Result<Vec<u8>> {
        self.client
            .get_bytes(&format!(
                "/admin/users/{}/profile-images/{}/data",
                user_id, image_id
            ))
            .await
    }
}
