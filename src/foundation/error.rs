pub type AvakitResult<T> = Result<T, AvakitError>;

#[derive(thiserror::Error, Debug)]
pub enum AvakitError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("animation error: {0}")]
    Animation(String),

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AvakitError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            AvakitError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            AvakitError::animation("x")
                .to_string()
                .contains("animation error:")
        );
        assert!(
            AvakitError::config("x")
                .to_string()
                .contains("config error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = AvakitError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
