/// Convenience result type used across stardrift.
pub type StardriftResult<T> = Result<T, StardriftError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Per-frame advance/plan paths are infallible: everything that can fail is
/// validated at construction or at the event boundary.
#[derive(thiserror::Error, Debug)]
pub enum StardriftError {
    /// Invalid user-provided configuration or host input data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A required host target (surface or sprite) is absent.
    #[error("missing target: {0}")]
    MissingTarget(String),

    /// Errors while executing a frame plan against a backend.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StardriftError {
    /// Build a [`StardriftError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StardriftError::MissingTarget`] value.
    pub fn missing_target(msg: impl Into<String>) -> Self {
        Self::MissingTarget(msg.into())
    }

    /// Build a [`StardriftError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`StardriftError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_taxonomy_prefix() {
        assert_eq!(
            StardriftError::validation("bad viewport").to_string(),
            "validation error: bad viewport"
        );
        assert_eq!(
            StardriftError::missing_target("surface").to_string(),
            "missing target: surface"
        );
        assert_eq!(
            StardriftError::render("surface too small").to_string(),
            "render error: surface too small"
        );
    }

    #[test]
    fn other_is_transparent() {
        let err = StardriftError::from(anyhow::anyhow!("io broke"));
        assert_eq!(err.to_string(), "io broke");
    }
}
