use thiserror::Error;

/// Errors raised while bringing a service up.
///
/// Request-level failures are modelled by each service; this type only covers
/// configuration and process startup.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl AppError {
    pub fn config(msg: impl std::fmt::Display) -> Self {
        AppError::ConfigError(anyhow::anyhow!("{}", msg))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_become_internal_errors() {
        let err: AppError = std::io::Error::other("address in use").into();
        assert!(matches!(err, AppError::InternalError(_)));
        assert!(err.to_string().contains("address in use"));
    }

    #[test]
    fn config_helper_formats_message() {
        let err = AppError::config("GEMINI_API_KEY is required but not set");
        assert_eq!(
            err.to_string(),
            "Configuration error: GEMINI_API_KEY is required but not set"
        );
    }
}
