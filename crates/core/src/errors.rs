use thiserror::Error;

/// Unified error type for the entire spending-stats-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Request validation ──────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),

    // ── Access ──────────────────────────────────────────────────────
    #[error("{0}")]
    AccessDenied(String),

    #[error("Can`t fetch over {0} friends sub-queries")]
    DepthLimitExceeded(usize),

    // ── Lookup ──────────────────────────────────────────────────────
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    // ── Rates ───────────────────────────────────────────────────────
    #[error("Rate not available for {0}")]
    RateNotAvailable(String),

    #[error("Rate provider error ({provider}): {message}")]
    RateProvider {
        provider: String,
        message: String,
    },

    // ── Storage / File ──────────────────────────────────────────────
    #[error("Invalid file format: {0}")]
    InvalidFileFormat(String),

    #[error("Unsupported file version: {0}")]
    UnsupportedVersion(u16),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("File I/O error: {0}")]
    FileIO(String),
}

/// Message returned when a caller asks for someone else's categories.
pub const FOREIGN_CATEGORIES_MESSAGE: &str = "Can`t query categories for another user";

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
