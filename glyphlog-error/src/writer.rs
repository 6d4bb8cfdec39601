use std::{any::Any, io, path::Path, path::PathBuf};

use thiserror::Error;

use crate::{ErrorExt, StatusCode};

pub type WriterResult<T> = Result<T, WriterError>;

/// Ошибки файловых целей логгера.
#[derive(Debug, Clone, Error)]
pub enum WriterError {
    /// Директория не задана или не создана
    #[error("Logs directory not available{}: {reason}", at_path(.path))]
    DirectoryUnavailable { path: PathBuf, reason: String },

    #[error("Invalid log file path '{candidate}': {reason}")]
    InvalidPath { candidate: String, reason: String },

    /// Создание файла или дозапись строки
    #[error("Failed to write log file {}: {message}", .path.display())]
    WriteFailure {
        path: PathBuf,
        kind: io::ErrorKind,
        message: String,
    },

    /// Удаление файла при ротации
    #[error("Failed to remove log file {}: {message}", .path.display())]
    RemoveFailure {
        path: PathBuf,
        kind: io::ErrorKind,
        message: String,
    },
}

fn at_path(path: &Path) -> String {
    if path.as_os_str().is_empty() {
        String::new()
    } else {
        format!(" at {}", path.display())
    }
}

impl WriterError {
    pub fn directory_unavailable(
        path: impl Into<PathBuf>,
        reason: impl Into<String>,
    ) -> Self {
        Self::DirectoryUnavailable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_path(
        candidate: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidPath {
            candidate: candidate.into(),
            reason: reason.into(),
        }
    }

    pub fn write_failure(
        path: impl Into<PathBuf>,
        err: &io::Error,
    ) -> Self {
        Self::WriteFailure {
            path: path.into(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    pub fn remove_failure(
        path: impl Into<PathBuf>,
        err: &io::Error,
    ) -> Self {
        Self::RemoveFailure {
            path: path.into(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    /// Код исходной ошибки файловой системы, если она есть.
    pub fn io_status(&self) -> Option<StatusCode> {
        match self {
            Self::WriteFailure { kind, .. } | Self::RemoveFailure { kind, .. } => {
                Some(StatusCode::from_io_kind(*kind))
            }
            _ => None,
        }
    }
}

impl ErrorExt for WriterError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::DirectoryUnavailable { .. } => StatusCode::DirectoryUnavailable,
            Self::InvalidPath { .. } => StatusCode::InvalidPath,
            Self::WriteFailure { .. } => StatusCode::WriteFailed,
            Self::RemoveFailure { .. } => StatusCode::RemoveFailed,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
