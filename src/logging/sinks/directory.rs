use std::path::{Path, PathBuf};

use glyphlog_error::{WriterError, WriterResult};

use super::paths;

/// Состояние директории логов у файловой цели.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    /// Путь не задан
    Unconfigured,
    /// Путь задан, но директорию создать не удалось
    Configuring,
    /// Директория существует, запись разрешена
    Ready,
}

/// Директория логов с однократной проверкой существования.
///
/// Смена пути на другой сбрасывает флаг и повторяет создание; повторная
/// установка того же пути ничего не делает.
#[derive(Debug, Default)]
pub struct LogsDirectory {
    path: PathBuf,
    did_create: bool,
}

impl LogsDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Запоминает путь и создаёт директорию, если её ещё нет.
    pub fn set_path(
        &mut self,
        path: &Path,
    ) -> WriterResult<()> {
        if self.path != path {
            self.did_create = false;
            self.path = path.to_path_buf();
        }

        if self.path.as_os_str().is_empty() || self.did_create {
            return Ok(());
        }

        match paths::ensure_directory(&self.path) {
            Ok(()) => {
                self.did_create = true;
                tracing::debug!(path = %self.path.display(), "Logs directory ready");
                Ok(())
            }
            Err(err) => Err(WriterError::directory_unavailable(
                self.path.clone(),
                err.to_string(),
            )),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn did_create(&self) -> bool {
        self.did_create
    }

    pub fn state(&self) -> WriterState {
        if self.did_create {
            WriterState::Ready
        } else if self.path.as_os_str().is_empty() {
            WriterState::Unconfigured
        } else {
            WriterState::Configuring
        }
    }

    /// Путь директории, если в неё можно писать.
    pub fn require_ready(&self) -> WriterResult<&Path> {
        match self.state() {
            WriterState::Ready => Ok(&self.path),
            WriterState::Unconfigured => Err(WriterError::directory_unavailable(
                PathBuf::new(),
                "logs directory is not configured",
            )),
            WriterState::Configuring => Err(WriterError::directory_unavailable(
                self.path.clone(),
                "logs directory was not created",
            )),
        }
    }
}
