/// Convenience result type used across the crate.
pub type SvgaResult<T> = Result<T, SvgaError>;

/// Error taxonomy for decoding and playback.
///
/// Decode failures are terminal for the call that produced them; nothing in this
/// crate retries. Lifecycle misuse (`NoSceneMounted`) is reported synchronously.
#[derive(thiserror::Error, Debug)]
pub enum SvgaError {
    /// Missing or empty input buffer.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Input carries the legacy 1.x (zip) container signature.
    #[error("unsupported version: legacy 1.x containers are not supported")]
    UnsupportedVersion,

    /// No decode facility is available (never created, or already destroyed).
    #[error("worker unavailable: {0}")]
    WorkerUnavailable(String),

    /// Decompression, schema decoding or asset post-processing failed.
    #[error("corrupt data: {0}")]
    CorruptData(String),

    /// A playback lifecycle call was made before any scene was mounted.
    #[error("no scene mounted")]
    NoSceneMounted,

    /// The player was constructed without a usable drawing surface.
    #[error("invalid container: {0}")]
    InvalidContainer(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SvgaError {
    /// Build a [`SvgaError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build a [`SvgaError::WorkerUnavailable`] value.
    pub fn worker_unavailable(msg: impl Into<String>) -> Self {
        Self::WorkerUnavailable(msg.into())
    }

    /// Build a [`SvgaError::CorruptData`] value.
    pub fn corrupt(msg: impl Into<String>) -> Self {
        Self::CorruptData(msg.into())
    }

    /// Build a [`SvgaError::InvalidContainer`] value.
    pub fn invalid_container(msg: impl Into<String>) -> Self {
        Self::InvalidContainer(msg.into())
    }

    /// True for errors produced by the decode side (parser or worker).
    pub fn is_decode_failure(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_)
                | Self::UnsupportedVersion
                | Self::WorkerUnavailable(_)
                | Self::CorruptData(_)
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
