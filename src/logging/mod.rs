pub mod bridge;
pub mod category;
pub mod config;
pub mod filters;
pub mod formatter;
pub mod handle;
pub mod location;
pub mod logger;
pub mod metrics;
pub mod sinks;

use once_cell::sync::OnceCell;

pub use self::config::{ConsoleTarget, FileLoggingMode, LoggerConfig};
pub use bridge::CategoryLayer;
pub use category::{Category, PrefixStyle, Verbosity};
pub use formatter::{DebugFormatter, PrettyFormatter, ValueFormat, ValueFormatter};
pub use handle::LogHandle;
pub use location::SourceLocation;
pub use logger::{LogOptions, Logger};
pub use metrics::{LoggerStats, WriterStats};
pub use sinks::{ConsoleSink, MemorySink};

use crate::error::{ConfigError, LogResult};

static GLOBAL: OnceCell<Logger> = OnceCell::new();

/// Общий логгер процесса. Если [`init`] / [`install`] не вызывались,
/// создаётся с [`LoggerConfig::default`] (только консоль).
pub fn global() -> &'static Logger {
    GLOBAL.get_or_init(Logger::default)
}

/// Проверяет конфигурацию и устанавливает общий логгер.
pub fn init(config: LoggerConfig) -> LogResult<&'static Logger> {
    install(Logger::try_new(config)?)
}

/// Устанавливает готовый логгер как общий. Повторный вызов (или вызов после
/// первого обращения к [`global`]) возвращает `AlreadyInitialized`.
pub fn install(logger: Logger) -> LogResult<&'static Logger> {
    GLOBAL
        .set(logger)
        .map_err(|_| ConfigError::AlreadyInitialized)?;

    tracing::debug!("Global logger installed");
    Ok(global())
}

/// Сообщение с текущим файлом, функцией и строкой.
///
/// ```
/// use glyphlog::{log_message, logging::{Category, Logger, LoggerConfig}};
///
/// let logger = Logger::new(LoggerConfig::default());
/// log_message!(logger: logger, Category::Success, "saved {} rows", 3);
/// log_message!(logger: logger, Category::Network, scope: "sync", "peer {}", "a");
/// ```
///
/// Без `logger:` пишет в [`global`]. Возвращает [`LogHandle`].
#[macro_export]
macro_rules! log_message {
    (logger: $logger:expr, $category:expr, scope: $scope:expr, $($arg:tt)+) => {
        $logger.log_message(
            $category,
            ::std::option::Option::Some(::std::format!($($arg)+).as_str()),
            $crate::source_location!(),
            &$crate::logging::LogOptions::scoped($scope),
        )
    };
    (logger: $logger:expr, $category:expr, $($arg:tt)+) => {
        $logger.log_message(
            $category,
            ::std::option::Option::Some(::std::format!($($arg)+).as_str()),
            $crate::source_location!(),
            &$crate::logging::LogOptions::default(),
        )
    };
    ($category:expr, scope: $scope:expr, $($arg:tt)+) => {
        $crate::log_message!(logger: $crate::logging::global(), $category, scope: $scope, $($arg)+)
    };
    ($category:expr, $($arg:tt)+) => {
        $crate::log_message!(logger: $crate::logging::global(), $category, $($arg)+)
    };
}

/// Значение (`Debug`) с текущим файлом для multi-file режима.
#[macro_export]
macro_rules! log_value {
    (logger: $logger:expr, $category:expr, scope: $scope:expr, $value:expr) => {
        $logger.log_value(
            $category,
            ::std::option::Option::Some(&$value as &dyn ::std::fmt::Debug),
            $crate::source_location!(),
            &$crate::logging::LogOptions::scoped($scope),
        )
    };
    (logger: $logger:expr, $category:expr, $value:expr) => {
        $logger.log_value(
            $category,
            ::std::option::Option::Some(&$value as &dyn ::std::fmt::Debug),
            $crate::source_location!(),
            &$crate::logging::LogOptions::default(),
        )
    };
    ($category:expr, scope: $scope:expr, $value:expr) => {
        $crate::log_value!(logger: $crate::logging::global(), $category, scope: $scope, $value)
    };
    ($category:expr, $value:expr) => {
        $crate::log_value!(logger: $crate::logging::global(), $category, $value)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macros_capture_location() {
        let sink = MemorySink::new();
        let logger = Logger::new(LoggerConfig::default()).with_console(sink.clone());

        let handle = log_message!(logger: logger, Category::Debug, "n={}", 5);
        log_value!(logger: logger, Category::Debug, vec!["a"]);

        assert_eq!(handle.category(), Category::Debug);
        let lines = sink.lines();
        assert!(lines[0].contains("» mod.rs » test_macros_capture_location » "));
        assert!(lines[0].ends_with("» n=5"));
        assert_eq!(lines[1], "[\"a\"]");
    }

    #[test]
    fn test_scoped_macro_chains() {
        let sink = MemorySink::new();
        let logger = Logger::new(LoggerConfig::default()).with_console(sink.clone());

        log_message!(logger: logger, Category::Cache, scope: "jobs", "hit").value(&1);

        assert_eq!(sink.len(), 2);
    }
}
