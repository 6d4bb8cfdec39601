use std::any::Any;

use glyphlog_error::{ErrorExt, StatusCode};
use thiserror::Error;

use crate::logging::config::FileLoggingMode;

/// Результат операций логгера, которые пробрасывают ошибки наружу.
pub type LogResult<T> = glyphlog_error::GlyphResult<T>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // ==== Загрузка ====
    #[error("Failed to load logger configuration: {0}")]
    Load(#[from] config::ConfigError),

    // ==== Значения ====
    #[error("Invalid verbosity mask: {0}")]
    InvalidVerbosity(String),

    #[error("Invalid single log file name '{name}': {reason}")]
    InvalidFileName { name: String, reason: String },

    #[error("File logging mode {0:?} requires logs_directory_path")]
    MissingDirectory(FileLoggingMode),

    // ==== Жизненный цикл ====
    #[error("Global logger is already initialized")]
    AlreadyInitialized,
}

impl ErrorExt for ConfigError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Load(_) => StatusCode::InvalidConfig,
            Self::InvalidVerbosity(_) => StatusCode::InvalidValue,
            Self::InvalidFileName { .. } => StatusCode::InvalidPath,
            Self::MissingDirectory(_) => StatusCode::InvalidConfig,
            Self::AlreadyInitialized => StatusCode::Unsupported,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use glyphlog_error::StackError;

    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ConfigError::InvalidVerbosity("x".into()).status_code(),
            StatusCode::InvalidValue
        );
        assert_eq!(
            ConfigError::MissingDirectory(FileLoggingMode::SingleFile).status_code(),
            StatusCode::InvalidConfig
        );
    }

    #[test]
    fn test_converts_into_stack_error() {
        let stack: StackError = ConfigError::AlreadyInitialized.into();
        assert_eq!(stack.status_code(), StatusCode::Unsupported);
        assert!(stack.downcast_ref::<ConfigError>().is_some());
    }
}
