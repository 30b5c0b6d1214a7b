use std::env;
use std::path::PathBuf;

/// Externally supplied configuration for the client core.
///
/// Nothing here is computed: the backend and object-storage locations come
/// from the deployment environment, the way the original read them from
/// its build-time env layer.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Murmur REST backend.
    pub api_base_url: String,
    /// Base URL of the object-storage host serving uploaded images, when
    /// one is configured.
    pub object_storage_base_url: Option<String>,
    /// Where the file-backed token store keeps its token. `None` means the
    /// caller wires up in-memory storage instead.
    pub token_path: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from the environment (and a `.env` file when
    /// present).
    ///
    /// `API_BASE_URL` defaults to the local development backend; a missing
    /// `OBJECT_STORAGE_BASE_URL` is only warned about since image serving
    /// is optional.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let object_storage_base_url = env::var("OBJECT_STORAGE_BASE_URL").ok();
        if object_storage_base_url.is_none() {
            tracing::warn!("OBJECT_STORAGE_BASE_URL is not defined; avatar URLs will be relative");
        }

        Config {
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            object_storage_base_url,
            token_path: env::var("TOKEN_PATH").ok().map(PathBuf::from),
        }
    }

    /// Absolute URL for an object-storage key, when a storage host is
    /// configured.
    pub fn object_url(&self, key: &str) -> Option<String> {
        self.object_storage_base_url
            .as_ref()
            .map(|base| format!("{}/{}", base.trim_end_matches('/'), key))
    }
}
