use std::path::PathBuf;

/// Errors reported by the instance grid and its host.
///
/// None of these are fatal to the host: a rejected click or a missing texture
/// leaves the published batch exactly as it was.
#[derive(Debug, thiserror::Error)]
pub enum InstancingError {
    /// A highlight toggle addressed an instance that is not in the current batch.
    #[error("instance index {index} out of range (batch holds {len} instances)")]
    OutOfRange { index: usize, len: usize },
    /// A material texture could not be opened or decoded.
    #[error("resource unavailable: {}: {reason}", path.display())]
    ResourceUnavailable { path: PathBuf, reason: String },
    /// The animator configuration cannot drive a grid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
