//! Generic authenticated HTTP client for the Murmur backend.

use crate::auth::store::TokenStore;
use crate::types::{AppError, Result};
use crate::utils::config::Config;
use reqwest::multipart;
use reqwest::{RequestBuilder, Response, StatusCode};
use std::sync::Arc;

/// HTTP request wrapper over the Murmur REST backend.
///
/// Every outgoing request carries `Authorization: Bearer <token>` when the
/// shared [`TokenStore`] holds a token; otherwise it goes out
/// unauthenticated. A 401 response clears the store before the error
/// reaches the caller, so the next guard evaluation observes the logout.
/// Redirecting after that is the caller's job, not this client's.
///
/// One attempt per call: no retry, no backoff.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Creates a client against `base_url` sharing `store` with the
    /// session guard.
    pub fn new(base_url: impl Into<String>, store: Arc<dyn TokenStore>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            store,
        }
    }

    /// Creates a client from environment configuration.
    pub fn from_config(config: &Config, store: Arc<dyn TokenStore>) -> Self {
        Self::new(config.api_base_url.clone(), store)
    }

    /// The backend base URL this client targets.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_auth(&self, req: RequestBuilder) -> RequestBuilder {
        match self.store.get() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Maps a non-success response to an error, purging the token slot on
    /// authentication failure.
    async fn error_for(&self, resp: Response) -> AppError {
        let status = resp.status();
        let message = match resp.text().await {
            Ok(body) => extract_error_message(&body)
                .unwrap_or_else(|| format!("Request failed with status {}", status)),
            Err(_) => format!("Request failed with status {}", status),
        };

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("Received 401, clearing stored session token");
            self.store.remove();
            AppError::Unauthorized(message)
        } else {
            AppError::Api {
                status: status.as_u16(),
                message,
            }
        }
    }

    async fn run(&self, req: RequestBuilder) -> Result<Response> {
        let resp = self.with_auth(req).send().await?;
        if resp.status().is_success() {
            Ok(resp)
        } else {
            Err(self.error_for(resp).await)
        }
    }

    /// GET `path` and deserialize the JSON response.
    pub async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self.run(self.http.get(self.url(path))).await?;
        resp.json::<T>()
            .await
            .map_err(|e| AppError::InvalidResponse(e.to_string()))
    }

    /// GET `path` and return the raw response body (image data and the like).
    pub async fn get_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let resp = self.run(self.http.get(self.url(path))).await?;
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| AppError::InvalidResponse(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    /// POST a JSON body to `path` and deserialize the JSON response.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: serde::Serialize,
        T: serde::de::DeserializeOwned,
    {
        let resp = self.run(self.http.post(self.url(path)).json(body)).await?;
        resp.json::<T>()
            .await
            .map_err(|e| AppError::InvalidResponse(e.to_string()))
    }

    /// POST a multipart form to `path` and deserialize the JSON response.
    pub async fn post_multipart<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        form: multipart::Form,
    ) -> Result<T> {
        let resp = self
            .run(self.http.post(self.url(path)).multipart(form))
            .await?;
        resp.json::<T>()
            .await
            .map_err(|e| AppError::InvalidResponse(e.to_string()))
    }

    /// PUT a JSON body to `path` and deserialize the JSON response.
    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: serde::Serialize,
        T: serde::de::DeserializeOwned,
    {
        let resp = self.run(self.http.put(self.url(path)).json(body)).await?;
        resp.json::<T>()
            .await
            .map_err(|e| AppError::InvalidResponse(e.to_string()))
    }

    /// PUT with no body, deserializing the JSON response.
    pub async fn put_empty<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self.run(self.http.put(self.url(path))).await?;
        resp.json::<T>()
            .await
            .map_err(|e| AppError::InvalidResponse(e.to_string()))
    }

    /// PUT a multipart form to `path` and deserialize the JSON response.
    pub async fn put_multipart<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        form: multipart::Form,
    ) -> Result<T> {
        let resp = self
            .run(self.http.put(self.url(path)).multipart(form))
            .await?;
        resp.json::<T>()
            .await
            .map_err(|e| AppError::InvalidResponse(e.to_string()))
    }

    /// DELETE `path` and deserialize the JSON response.
    pub async fn delete_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self.run(self.http.delete(self.url(path))).await?;
        resp.json::<T>()
            .await
            .map_err(|e| AppError::InvalidResponse(e.to_string()))
    }
}

/// Pulls a human-readable message out of an error body. The backend sends
/// `{"detail": "..."}`; `{"error": "..."}` is accepted for good measure.
fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let message = value.get("detail").or_else(|| value.get("error"))?;
    match message {
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
