pub type GlitchResult<T> = Result<T, GlitchError>;

#[derive(thiserror::Error, Debug)]
pub enum GlitchError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("buffer error: {0}")]
    Buffer(String),

    #[error("dimension mismatch: {0}")]
    Dimension(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlitchError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn buffer(msg: impl Into<String>) -> Self {
        Self::Buffer(msg.into())
    }

    pub fn dimension(msg: impl Into<String>) -> Self {
        Self::Dimension(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            GlitchError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(GlitchError::buffer("x").to_string().contains("buffer error:"));
        assert!(
            GlitchError::dimension("x")
                .to_string()
                .contains("dimension mismatch:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = GlitchError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
