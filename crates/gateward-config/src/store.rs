//! Load/save of the whitelist document.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::{ConfigError, GateDoc};

/// Owns the path of one whitelist document and moves it to and from
/// disk.
///
/// A save is a full rewrite of the file; the document is small and a
/// rewrite is atomic enough for this use case. The store holds no
/// in-memory state beyond the path, so it is freely shareable.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// A store backed by the given file path. Nothing is touched on
    /// disk until the first load or save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the document, never failing.
    ///
    /// - Missing file: the default document (enabled, `"en"`, one seed
    ///   name) is written out and returned.
    /// - Read or parse failure: logged, and the fail-open document
    ///   (default flags, empty permanent set) is returned. The process
    ///   keeps serving decisions; nobody extra gets in.
    pub async fn load(&self) -> GateDoc {
        match self.load_or_seed().await {
            Ok(doc) => doc,
            Err(error) => {
                tracing::error!(path = %self.path.display(), %error, "failed to load config, whitelist starts empty");
                GateDoc::fail_open()
            }
        }
    }

    /// Loads the document, seeding a missing file with the defaults but
    /// surfacing read and parse failures to the caller.
    ///
    /// This is the reload path's entry point: on failure the caller
    /// keeps whatever flags it already holds and decides for itself
    /// what to do with the player set.
    ///
    /// # Errors
    /// [`ConfigError::Io`] on read failure, [`ConfigError::Parse`] on a
    /// malformed document.
    pub async fn load_or_seed(&self) -> Result<GateDoc, ConfigError> {
        match fs::try_exists(&self.path).await {
            Ok(false) => {
                tracing::info!(path = %self.path.display(), "no config file, seeding defaults");
                let doc = GateDoc::default();
                self.save(&doc).await;
                Ok(doc)
            }
            Ok(true) => self.try_load().await,
            Err(error) => Err(error.into()),
        }
    }

    /// Saves the document, never failing. A write error is logged and
    /// swallowed; persistence trouble must not reach the allow/deny
    /// path.
    pub async fn save(&self, doc: &GateDoc) {
        if let Err(error) = self.try_save(doc).await {
            tracing::error!(path = %self.path.display(), %error, "failed to save config");
        }
    }

    /// Reads and decodes the document, surfacing the error.
    ///
    /// # Errors
    /// [`ConfigError::Io`] on read failure, [`ConfigError::Parse`] on a
    /// malformed document.
    pub async fn try_load(&self) -> Result<GateDoc, ConfigError> {
        let raw = fs::read_to_string(&self.path).await?;
        let mut doc: GateDoc = serde_json::from_str(&raw)?;
        doc.normalize();
        tracing::debug!(
            path = %self.path.display(),
            entries = doc.whitelisted.len(),
            "config loaded"
        );
        Ok(doc)
    }

    /// Encodes and writes the document, surfacing the error.
    ///
    /// # Errors
    /// [`ConfigError::Io`] on write failure.
    pub async fn try_save(&self, doc: &GateDoc) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let raw = serde_json::to_string_pretty(doc)?;
        fs::write(&self.path, raw).await?;
        tracing::debug!(
            path = %self.path.display(),
            entries = doc.whitelisted.len(),
            "config saved"
        );
        Ok(())
    }
}
