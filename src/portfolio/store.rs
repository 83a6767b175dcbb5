//! Portfolio persistence.
//!
//! A store holds one serialized portfolio. [`FileStore`] keeps it in a JSON
//! file on disk; [`MemoryStore`] keeps the JSON text in memory, the way the
//! browser editor keeps its last document in local storage.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::StoreError;

use super::model::Portfolio;

/// Default file name for saved portfolios.
pub const DEFAULT_PORTFOLIO_FILE: &str = "Portfolio.json";

// =============================================================================
// PortfolioStore Trait
// =============================================================================

/// Trait for loading and saving a portfolio document.
#[async_trait]
pub trait PortfolioStore: Send + Sync {
    /// Load the stored portfolio.
    ///
    /// Returns `Ok(None)` if nothing has been stored yet.
    async fn load(&self) -> Result<Option<Portfolio>, StoreError>;

    /// Replace the stored portfolio.
    async fn save(&self, portfolio: &Portfolio) -> Result<(), StoreError>;

    /// Identifier for logging (a path, a key, ...).
    fn identifier(&self) -> &str;
}

// =============================================================================
// FileStore
// =============================================================================

/// A portfolio stored as a JSON file.
///
/// Saves write a sibling temporary file and rename it over the target, so a
/// failed save leaves the previous document intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    identifier: String,
}

impl FileStore {
    /// Create a store for the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let identifier = path.display().to_string();
        Self { path, identifier }
    }

    /// Path of the JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| DEFAULT_PORTFOLIO_FILE.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, path: &Path, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

#[async_trait]
impl PortfolioStore for FileStore {
    async fn load(&self) -> Result<Option<Portfolio>, StoreError> {
        let json = match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.identifier, "No stored portfolio");
                return Ok(None);
            }
            Err(e) => return Err(self.io_error(&self.path, e)),
        };

        let portfolio = Portfolio::from_json(&json)?;
        debug!(path = %self.identifier, pages = portfolio.pages.len(), "Loaded portfolio");
        Ok(Some(portfolio))
    }

    async fn save(&self, portfolio: &Portfolio) -> Result<(), StoreError> {
        let json = portfolio.to_json()?;
        let temp = self.temp_path();

        tokio::fs::write(&temp, json.as_bytes())
            .await
            .map_err(|e| self.io_error(&temp, e))?;
        if let Err(e) = tokio::fs::rename(&temp, &self.path).await {
            if let Err(cleanup) = tokio::fs::remove_file(&temp).await {
                warn!(path = %temp.display(), error = %cleanup, "Failed to remove temporary file");
            }
            return Err(self.io_error(&self.path, e));
        }

        debug!(path = %self.identifier, bytes = json.len(), "Saved portfolio");
        Ok(())
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }
}

// =============================================================================
// MemoryStore
// =============================================================================

/// A portfolio stored as JSON text in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    json: RwLock<Option<String>>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with serialized JSON.
    pub fn with_json(json: impl Into<String>) -> Self {
        Self {
            json: RwLock::new(Some(json.into())),
        }
    }

    /// The stored JSON text, if any.
    pub async fn json(&self) -> Option<String> {
        self.json.read().await.clone()
    }
}

#[async_trait]
impl PortfolioStore for MemoryStore {
    async fn load(&self) -> Result<Option<Portfolio>, StoreError> {
        match self.json.read().await.as_deref() {
            Some(json) => Ok(Some(Portfolio::from_json(json)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, portfolio: &Portfolio) -> Result<(), StoreError> {
        let json = portfolio.to_json()?;
        *self.json.write().await = Some(json);
        Ok(())
    }

    fn identifier(&self) -> &str {
        "memory"
    }
}

// =============================================================================
// Tests
// =============================================================================
