//! Single-slot bearer token storage.
//!
//! The browser original kept the token in `localStorage` under one fixed
//! key. Here the slot is an injected service instance so the guard and the
//! API client share state explicitly instead of through a global.

use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};

/// Storage key / file name the token lives under.
pub const TOKEN_STORAGE_KEY: &str = "jwt_token";

/// A holder for at most one bearer token.
///
/// Setting a new token silently replaces the previous one: there is a
/// single active session per client instance. `remove` is idempotent.
/// Implementations swallow storage I/O failures after logging them, the
/// way the original ignored `localStorage` errors.
pub trait TokenStore: Send + Sync {
    /// Persist `token`, replacing any existing value. No validation is
    /// performed; arbitrary strings are accepted.
    fn set(&self, token: &str);

    /// The currently persisted token, if any.
    fn get(&self) -> Option<String>;

    /// Clear the stored token. Safe to call when nothing is stored.
    fn remove(&self);
}

/// In-process token slot. This is also the reset hook for tests: a fresh
/// instance starts with no session.
#[derive(Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn set(&self, token: &str) {
        *self.slot.lock() = Some(token.to_string());
    }

    fn get(&self) -> Option<String> {
        self.slot.lock().clone()
    }

    fn remove(&self) {
        *self.slot.lock() = None;
    }
}

/// Token slot persisted as a single file, surviving process restarts the
/// way `localStorage` survives page reloads.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store the token in `dir/jwt_token`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(TOKEN_STORAGE_KEY),
        }
    }

    /// Store the token at an explicit file path.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn set(&self, token: &str) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::warn!("Failed to create token directory: {}", e);
                return;
            }
        }
        if let Err(e) = fs::write(&self.path, token) {
            tracing::warn!("Failed to persist token: {}", e);
        }
    }

    fn get(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(token) => Some(token),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("Failed to read stored token: {}", e);
                None
            }
        }
    }

    fn remove(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to remove stored token: {}", e),
        }
    }
}
