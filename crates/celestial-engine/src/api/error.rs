//! Error types for engine construction and the drawable-provider seam.

/// Errors that stop an engine from being constructed or reconfigured.
///
/// Per-entity problems (unknown catalog names, placement exhaustion, failed
/// drawables) are never reported through this type; they degrade the scene
/// instead.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The host could not supply a drawing surface. Nothing can render.
    #[error("drawing surface not found: {0}")]
    SurfaceMissing(String),

    /// A configuration value failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A catalog or option bag was not valid JSON of the expected shape.
    #[error("failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors a drawable provider may return when asked for a generated texture.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssetError {
    /// The provider has no way to produce this kind of drawable.
    #[error("drawable kind not supported by this provider")]
    Unsupported,

    /// The texture generator raised an error.
    #[error("texture generator failed: {0}")]
    Generator(String),
}
