use std::{fmt, path::Path};

use chrono::{DateTime, Local};
use glyphlog_error::{StackError, WriterError};
use once_cell::unsync::OnceCell;
use parking_lot::{Mutex, RwLock};

use crate::{
    error::LogResult,
    logging::{
        category::{Category, PrefixStyle, Verbosity},
        config::{ConsoleTarget, FileLoggingMode, LoggerConfig},
        filters,
        formatter::{self, ValueFormatter, NULL_MARKER},
        handle::LogHandle,
        location::SourceLocation,
        metrics::{LoggerMetrics, LoggerStats, WriterStats},
        sinks::{ConsoleSink, MultiFileWriter, SingleFileWriter, StderrSink, StdoutSink},
    },
};

/// Параметры одного вызова.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogOptions<'a> {
    /// `false`: только консоль
    pub write_to_file: bool,
    /// Имя файла в multi-file режиме вместо имени исходника
    pub scope: Option<&'a str>,
}

impl<'a> LogOptions<'a> {
    pub fn scoped(scope: &'a str) -> Self {
        Self {
            write_to_file: true,
            scope: Some(scope),
        }
    }

    pub fn console_only() -> Self {
        Self {
            write_to_file: false,
            scope: None,
        }
    }
}

impl Default for LogOptions<'_> {
    fn default() -> Self {
        Self {
            write_to_file: true,
            scope: None,
        }
    }
}

/// Логгер: фильтр по категориям, форматирование, консоль и файловые цели.
///
/// Все методы принимают `&self`; настройки и писатели защищены
/// `parking_lot`-блокировками, поэтому один экземпляр можно разделять между
/// потоками. Порядок строк из разных потоков не согласуется.
pub struct Logger {
    config: RwLock<LoggerConfig>,
    single: Mutex<SingleFileWriter>,
    multi: Mutex<MultiFileWriter>,
    console: Box<dyn ConsoleSink>,
    value_formatter: Box<dyn ValueFormatter>,
    metrics: LoggerMetrics,
}

/// Готовые строки для консоли и файла.
struct RenderedLine {
    console: String,
    file: Option<String>,
    mode: FileLoggingMode,
}

impl Logger {
    /// Создаёт логгер. Ошибка создания директории не фатальна: она
    /// уходит в `tracing::warn!`, а запись в файл будет возвращать
    /// `DirectoryUnavailable`.
    pub fn new(config: LoggerConfig) -> Self {
        let logger = Self::unconfigured(config);
        if let Err(e) = logger.apply_directory() {
            tracing::warn!(error = %e, "Logs directory is not available");
        }
        logger
    }

    /// Как [`Logger::new`], но проверяет конфигурацию и пробрасывает ошибку
    /// создания директории.
    pub fn try_new(config: LoggerConfig) -> LogResult<Self> {
        config.validate()?;
        let logger = Self::unconfigured(config);
        logger.apply_directory()?;
        Ok(logger)
    }

    fn unconfigured(config: LoggerConfig) -> Self {
        let console: Box<dyn ConsoleSink> = match config.console {
            ConsoleTarget::Stdout => Box::new(StdoutSink),
            ConsoleTarget::Stderr => Box::new(StderrSink),
        };

        let mut single = SingleFileWriter::new();
        single.set_file_name(config.single_log_file_name.clone());
        single.set_max_size_bytes(config.single_log_file_max_size_bytes);

        Self {
            value_formatter: config.value_format.formatter(),
            config: RwLock::new(config),
            single: Mutex::new(single),
            multi: Mutex::new(MultiFileWriter::new()),
            console,
            metrics: LoggerMetrics::new(),
        }
    }

    fn apply_directory(&self) -> LogResult<()> {
        let path = self.config.read().logs_directory_path.clone();
        self.set_writer_directories(&path)
    }

    /// Заменяет консольную цель.
    pub fn with_console(
        mut self,
        sink: impl ConsoleSink + 'static,
    ) -> Self {
        self.console = Box::new(sink);
        self
    }

    /// Заменяет форматтер значений для `log_value`.
    pub fn with_value_formatter(
        mut self,
        formatter: impl ValueFormatter + 'static,
    ) -> Self {
        self.value_formatter = Box::new(formatter);
        self
    }

    ////////////////////////////////////////////////////////////////////////////////
    // Настройки
    ////////////////////////////////////////////////////////////////////////////////

    pub fn set_verbosity(
        &self,
        verbosity: Verbosity,
    ) {
        self.config.write().verbosity = verbosity;
    }

    pub fn set_delimiter(
        &self,
        delimiter: impl Into<String>,
    ) {
        self.config.write().delimiter = delimiter.into();
    }

    pub fn set_prefix_style(
        &self,
        style: PrefixStyle,
    ) {
        self.config.write().prefix_style = style;
    }

    pub fn set_log_source_location(
        &self,
        enabled: bool,
    ) {
        self.config.write().log_source_location = enabled;
    }

    pub fn set_file_logging_mode(
        &self,
        mode: FileLoggingMode,
    ) {
        self.config.write().file_logging_mode = mode;
    }

    /// Задаёт общую директорию обоих писателей. Новый путь заново проверяется
    /// и создаётся; пустой путь отключает файловые цели.
    pub fn set_logs_directory_path(
        &self,
        path: impl AsRef<Path>,
    ) -> LogResult<()> {
        let path = path.as_ref();
        self.config.write().logs_directory_path = path.to_path_buf();
        self.set_writer_directories(path)
    }

    pub fn set_single_log_file_name(
        &self,
        name: impl Into<String>,
    ) {
        let name = name.into();
        self.single.lock().set_file_name(name.clone());
        self.config.write().single_log_file_name = name;
    }

    pub fn set_single_log_file_max_size_bytes(
        &self,
        max_size_bytes: i64,
    ) {
        self.single.lock().set_max_size_bytes(max_size_bytes);
        self.config.write().single_log_file_max_size_bytes = max_size_bytes;
    }

    fn set_writer_directories(
        &self,
        path: &Path,
    ) -> LogResult<()> {
        let single = self.single.lock().set_directory(path);
        let multi = self.multi.lock().set_directory(path);
        single?;
        multi?;
        Ok(())
    }

    ////////////////////////////////////////////////////////////////////////////////
    // Состояние
    ////////////////////////////////////////////////////////////////////////////////

    /// Снимок текущих настроек.
    pub fn config(&self) -> LoggerConfig {
        self.config.read().clone()
    }

    pub fn should_emit(
        &self,
        category: Category,
    ) -> bool {
        filters::should_emit(category, self.config.read().verbosity)
    }

    /// Handle для цепочки вызовов одной категории.
    pub fn category(
        &self,
        category: Category,
    ) -> LogHandle<'_> {
        LogHandle::new(self, category)
    }

    pub fn stats(&self) -> LoggerStats {
        self.metrics.get_stats()
    }

    pub fn single_file_stats(&self) -> WriterStats {
        self.single.lock().stats()
    }

    pub fn multi_file_stats(&self) -> WriterStats {
        self.multi.lock().stats()
    }

    ////////////////////////////////////////////////////////////////////////////////
    // Запись
    ////////////////////////////////////////////////////////////////////////////////

    /// Пишет сообщение. Ошибка файловой цели не возвращается: она
    /// учитывается в метриках и уходит в `tracing::warn!`.
    pub fn log_message(
        &self,
        category: Category,
        text: Option<&str>,
        location: SourceLocation,
        options: &LogOptions<'_>,
    ) -> LogHandle<'_> {
        self.try_log_message(category, text, location, options)
            .unwrap_or_else(|e| self.report_failure(category, e))
    }

    /// Пишет сообщение и пробрасывает ошибку файловой цели.
    ///
    /// Консольная строка: `<глиф> [<время>] [<d> <файл> <d> <функция> <d>
    /// <строка>] <d> <текст>`. Файловая строка отличается только меткой
    /// времени (с датой).
    pub fn try_log_message(
        &self,
        category: Category,
        text: Option<&str>,
        location: SourceLocation,
        options: &LogOptions<'_>,
    ) -> LogResult<LogHandle<'_>> {
        let now = Local::now();
        let line = |cfg: &LoggerConfig, prefix: &str| {
            let location = cfg
                .log_source_location
                .then(|| formatter::location_prefix(&cfg.delimiter, &location));
            formatter::message_line(prefix, location.as_deref(), &cfg.delimiter, text)
        };
        let Some(rendered) = self.render(category, options, &now, line, line) else {
            return Ok(self.category(category));
        };

        self.dispatch(rendered, &now, options.scope, location.file)?;
        Ok(self.category(category))
    }

    /// Пишет значение (или `<null>`). В консоль попадает только само
    /// значение, в файл строка `<глиф> [<время>] <d> <значение>`, всегда
    /// однострочная. Место в
    /// исходнике нужно лишь для имени файла в multi-file режиме.
    pub fn log_value(
        &self,
        category: Category,
        value: Option<&dyn fmt::Debug>,
        location: SourceLocation,
        options: &LogOptions<'_>,
    ) -> LogHandle<'_> {
        self.try_log_value(category, value, location, options)
            .unwrap_or_else(|e| self.report_failure(category, e))
    }

    pub fn try_log_value(
        &self,
        category: Category,
        value: Option<&dyn fmt::Debug>,
        location: SourceLocation,
        options: &LogOptions<'_>,
    ) -> LogResult<LogHandle<'_>> {
        let now = Local::now();
        // Форматируется только после фильтра.
        let formatted = OnceCell::new();
        let payload = || {
            formatted
                .get_or_init(|| match value {
                    Some(value) => self.value_formatter.format(value),
                    None => NULL_MARKER.to_string(),
                })
                .as_str()
        };

        let Some(rendered) = self.render(
            category,
            options,
            &now,
            |_, _| payload().to_string(),
            |cfg, prefix| {
                formatter::value_line(prefix, &cfg.delimiter, &formatter::single_line(payload()))
            },
        ) else {
            return Ok(self.category(category));
        };

        self.dispatch(rendered, &now, options.scope, location.file)?;
        Ok(self.category(category))
    }

    /// Фильтр + форматирование под read-блокировкой. `None`, если категория
    /// отключена. Оба замыкания получают настройки и префикс
    /// `<глиф> [<время>]` своей метки времени.
    fn render<C, F>(
        &self,
        category: Category,
        options: &LogOptions<'_>,
        now: &DateTime<Local>,
        console_line: C,
        file_line: F,
    ) -> Option<RenderedLine>
    where
        C: FnOnce(&LoggerConfig, &str) -> String,
        F: FnOnce(&LoggerConfig, &str) -> String,
    {
        let cfg = self.config.read();
        if !filters::should_emit(category, cfg.verbosity) {
            self.metrics.record_suppressed();
            return None;
        }
        self.metrics.record_emitted();

        let console_prefix =
            formatter::prefix(category, cfg.prefix_style, &formatter::console_timestamp(now));
        let console = console_line(&*cfg, &console_prefix);

        let mode = cfg.file_logging_mode;
        let file = (options.write_to_file && mode != FileLoggingMode::None).then(|| {
            let file_prefix =
                formatter::prefix(category, cfg.prefix_style, &formatter::file_timestamp(now));
            file_line(&*cfg, &file_prefix)
        });

        Some(RenderedLine {
            console,
            file,
            mode,
        })
    }

    /// Консоль всегда, затем файловая цель текущего режима.
    fn dispatch(
        &self,
        rendered: RenderedLine,
        now: &DateTime<Local>,
        scope: Option<&str>,
        source_file: &str,
    ) -> LogResult<()> {
        self.console.write_line(&rendered.console);

        let Some(line) = rendered.file else {
            return Ok(());
        };

        let result: Result<(), WriterError> = match rendered.mode {
            FileLoggingMode::None => return Ok(()),
            FileLoggingMode::SingleFile => self.single.lock().write(&line),
            FileLoggingMode::MultipleFiles => {
                let base_name = formatter::multi_file_base_name(
                    &formatter::date_stamp(now),
                    scope,
                    source_file,
                );
                self.multi.lock().write(&line, &base_name)
            }
        };

        match result {
            Ok(()) => {
                self.metrics.record_file_write();
                Ok(())
            }
            Err(e) => {
                self.metrics.record_write_failure();
                Err(StackError::from(e).context(format!("{:?} log write", rendered.mode)))
            }
        }
    }

    fn report_failure(
        &self,
        category: Category,
        error: StackError,
    ) -> LogHandle<'_> {
        tracing::warn!(
            category = %category,
            status = %error.status_code(),
            error = %error,
            "Failed to write log line to file"
        );
        self.category(category)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LoggerConfig::default())
    }
}

impl fmt::Debug for Logger {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Logger")
            .field("config", &*self.config.read())
            .field("stats", &self.metrics.get_stats())
            .finish_non_exhaustive()
    }
}
