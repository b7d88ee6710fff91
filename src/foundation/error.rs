/// Result alias used across the crate.
pub type RenderResult<T> = Result<T, RenderError>;

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("model not found: {0}")]
    ModelNotFound(String),

    #[error("texture not found: {0}")]
    TextureNotFound(String),

    #[error("malformed frame: {0}")]
    MalformedFrame(String),

    #[error("archive entry not found: {0}")]
    EntryNotFound(String),

    #[error("parent cycle: {0}")]
    ParentCycle(String),

    #[error("texture variable cycle: {0}")]
    TextureCycle(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RenderError {
    pub fn malformed_frame(msg: impl Into<String>) -> Self {
        Self::MalformedFrame(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for misses that surface from the archive or resolver as "nothing there".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ModelNotFound(_) | Self::TextureNotFound(_) | Self::EntryNotFound(_)
        )
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
