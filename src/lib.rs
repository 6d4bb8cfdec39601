//! Категорийный логгер: фильтр по битовой маске, emoji/ascii-префиксы,
//! консоль и файловые цели (один файл с ротацией удалением или файл на
//! каждый scope).

/// Ошибки конфигурации и результат операций логгера.
pub mod error;
/// Категории, форматирование, писатели и фасад [`Logger`](logging::Logger).
pub mod logging;

pub use error::{ConfigError, LogResult};
pub use glyphlog_error::{StackError, StatusCode, WriterError};
pub use logging::{
    global, init, install, Category, FileLoggingMode, LogHandle, LogOptions, Logger,
    LoggerConfig, PrefixStyle, SourceLocation, Verbosity,
};
