//! Error types for the persistence bridge.

/// Why a config file operation failed.
///
/// Callers on the decision path never see these; the fail-open
/// `load`/`save` pair logs and recovers. They surface only through the
/// `try_*` variants.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading or writing the file failed.
    #[error("config file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The file exists but is not a valid document.
    #[error("config file parse failed: {0}")]
    Parse(#[from] serde_json::Error),
}
