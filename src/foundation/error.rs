/// Convenience result type used across Glimmer.
pub type GlimmerResult<T> = Result<T, GlimmerError>;

/// Top-level error taxonomy used by pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum GlimmerError {
    /// A drawing surface could not be acquired. Fatal before any frame is generated.
    #[error("setup error: {0}")]
    Setup(String),

    /// Source bitmap or sprite glyph could not be decoded.
    #[error("asset error: {0}")]
    Asset(String),

    /// A drawing pass could not complete.
    #[error("render error: {0}")]
    Render(String),

    /// The animation encoder reported a failure; no artifact was produced.
    #[error("export error: {0}")]
    Export(String),

    /// Configuration could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlimmerError {
    /// Build a [`GlimmerError::Setup`] value.
    pub fn setup(msg: impl Into<String>) -> Self {
        Self::Setup(msg.into())
    }

    /// Build a [`GlimmerError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`GlimmerError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`GlimmerError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`GlimmerError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
