use std::path::{Path, PathBuf};

use glyphlog_error::{WriterError, WriterResult};

use super::{
    directory::{LogsDirectory, WriterState},
    paths,
};
use crate::logging::metrics::{WriterMetrics, WriterStats};

/// Имя файла по умолчанию.
pub const DEFAULT_LOG_FILE_NAME: &str = "logfile.log";
/// Порог ротации по умолчанию (10 MiB).
pub const DEFAULT_MAX_SIZE_BYTES: i64 = 10 * 1024 * 1024;

/// Запись в один файл с ротацией удалением.
///
/// После каждой записи размер файла сравнивается с `max_size_bytes`; при
/// превышении файл удаляется целиком, следующая запись создаёт его заново.
/// Значение `<= 0` отключает ротацию.
#[derive(Debug)]
pub struct SingleFileWriter {
    directory: LogsDirectory,
    file_name: String,
    max_size_bytes: i64,
    metrics: WriterMetrics,
}

impl SingleFileWriter {
    pub fn new() -> Self {
        Self {
            directory: LogsDirectory::new(),
            file_name: DEFAULT_LOG_FILE_NAME.to_string(),
            max_size_bytes: DEFAULT_MAX_SIZE_BYTES,
            metrics: WriterMetrics::new(),
        }
    }

    /// Задаёт директорию логов и создаёт её при необходимости.
    pub fn set_directory(
        &mut self,
        path: &Path,
    ) -> WriterResult<()> {
        self.directory.set_path(path)
    }

    pub fn set_file_name(
        &mut self,
        name: impl Into<String>,
    ) {
        self.file_name = name.into();
    }

    pub fn set_max_size_bytes(
        &mut self,
        max_size_bytes: i64,
    ) {
        self.max_size_bytes = max_size_bytes;
    }

    pub fn directory(&self) -> &Path {
        self.directory.path()
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn max_size_bytes(&self) -> i64 {
        self.max_size_bytes
    }

    pub fn state(&self) -> WriterState {
        self.directory.state()
    }

    pub fn stats(&self) -> WriterStats {
        self.metrics.get_stats()
    }

    /// Полный путь к файлу лога.
    pub fn file_path(&self) -> WriterResult<PathBuf> {
        let dir = self.directory.require_ready()?;
        paths::validate_file_name(&self.file_name)?;
        Ok(dir.join(&self.file_name))
    }

    /// Дописывает строку и при необходимости выполняет ротацию.
    pub fn write(
        &self,
        line: &str,
    ) -> WriterResult<()> {
        let path = self.file_path()?;

        paths::append_line(&path, line).map_err(|e| WriterError::write_failure(&path, &e))?;
        self.metrics.record_line(line.len() as u64 + 1);

        self.rotate_if_needed(&path)?;
        Ok(())
    }

    /// Удаляет файл, если он больше порога. Возвращает `true`, если файл был
    /// удалён.
    fn rotate_if_needed(
        &self,
        path: &Path,
    ) -> WriterResult<bool> {
        if self.max_size_bytes <= 0 {
            return Ok(false);
        }

        let size = paths::file_size(path);
        if size <= self.max_size_bytes as u64 {
            return Ok(false);
        }

        paths::remove_file(path).map_err(|e| WriterError::remove_failure(path, &e))?;
        self.metrics.record_rotation();

        tracing::debug!(
            path = %path.display(),
            size,
            max_size = self.max_size_bytes,
            "Log file rotated"
        );
        Ok(true)
    }
}

impl Default for SingleFileWriter {
    fn default() -> Self {
        Self::new()
    }
}
