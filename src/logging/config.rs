use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::{
    error::ConfigError,
    logging::{
        category::{PrefixStyle, Verbosity},
        formatter::ValueFormat,
        sinks::{paths, DEFAULT_LOG_FILE_NAME, DEFAULT_MAX_SIZE_BYTES},
    },
};

/// Куда, кроме консоли, пишутся записи.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileLoggingMode {
    /// Только консоль
    #[default]
    None,
    /// Один файл с ротацией
    SingleFile,
    /// Файл на каждый scope / исходник
    MultipleFiles,
}

/// Консольный поток.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsoleTarget {
    #[default]
    Stdout,
    Stderr,
}

/// Настройки логгера.
///
/// Значения по умолчанию: все категории включены, разделитель `»`,
/// emoji-префиксы, место в исходнике выводится, запись в файлы выключена.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Маска включённых категорий
    pub verbosity: Verbosity,
    /// Разделитель между частями префикса
    pub delimiter: String,
    pub prefix_style: PrefixStyle,
    /// Выводить `файл » функция » строка`
    pub log_source_location: bool,
    pub file_logging_mode: FileLoggingMode,
    /// Общая директория для файловых целей; пустой путь значит «не задана»
    pub logs_directory_path: PathBuf,
    pub single_log_file_name: String,
    /// Порог ротации single-file режима; `<= 0` отключает ротацию
    pub single_log_file_max_size_bytes: i64,
    pub console: ConsoleTarget,
    pub value_format: ValueFormat,
}

impl LoggerConfig {
    /// Префикс переменных окружения: `GLYPHLOG_FILE_LOGGING_MODE=single_file`.
    pub const ENV_PREFIX: &'static str = "GLYPHLOG";

    /// Значения по умолчанию + переменные окружения.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Значения по умолчанию, затем файл (toml/yaml/json по расширению), затем
    /// переменные окружения.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let cfg = builder
            .add_source(Environment::with_prefix(Self::ENV_PREFIX))
            .build()?;

        let parsed: Self = cfg.try_deserialize()?;
        parsed.validate()?;
        Ok(parsed)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        paths::validate_file_name(&self.single_log_file_name).map_err(|e| {
            ConfigError::InvalidFileName {
                name: self.single_log_file_name.clone(),
                reason: e.to_string(),
            }
        })?;

        if self.file_logging_mode != FileLoggingMode::None
            && self.logs_directory_path.as_os_str().is_empty()
        {
            return Err(ConfigError::MissingDirectory(self.file_logging_mode));
        }

        Ok(())
    }

    pub fn with_verbosity(
        mut self,
        verbosity: Verbosity,
    ) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_prefix_style(
        mut self,
        style: PrefixStyle,
    ) -> Self {
        self.prefix_style = style;
        self
    }

    pub fn with_delimiter(
        mut self,
        delimiter: impl Into<String>,
    ) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn with_source_location(
        mut self,
        enabled: bool,
    ) -> Self {
        self.log_source_location = enabled;
        self
    }

    /// Включает запись в файлы в заданной директории.
    pub fn with_file_logging(
        mut self,
        mode: FileLoggingMode,
        directory: impl Into<PathBuf>,
    ) -> Self {
        self.file_logging_mode = mode;
        self.logs_directory_path = directory.into();
        self
    }

    pub fn with_single_log_file(
        mut self,
        name: impl Into<String>,
        max_size_bytes: i64,
    ) -> Self {
        self.single_log_file_name = name.into();
        self.single_log_file_max_size_bytes = max_size_bytes;
        self
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::ALL,
            delimiter: "»".to_string(),
            prefix_style: PrefixStyle::Emoji,
            log_source_location: true,
            file_logging_mode: FileLoggingMode::None,
            logs_directory_path: PathBuf::new(),
            single_log_file_name: DEFAULT_LOG_FILE_NAME.to_string(),
            single_log_file_max_size_bytes: DEFAULT_MAX_SIZE_BYTES,
            console: ConsoleTarget::Stdout,
            value_format: ValueFormat::Debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs};

    use serial_test::serial;
    use tempfile::TempDir;

    use super::*;

    const ENV_KEYS: &[&str] = &[
        "GLYPHLOG_VERBOSITY",
        "GLYPHLOG_DELIMITER",
        "GLYPHLOG_PREFIX_STYLE",
        "GLYPHLOG_LOG_SOURCE_LOCATION",
        "GLYPHLOG_FILE_LOGGING_MODE",
        "GLYPHLOG_LOGS_DIRECTORY_PATH",
        "GLYPHLOG_SINGLE_LOG_FILE_MAX_SIZE_BYTES",
    ];

    fn clear_env() {
        for key in ENV_KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_defaults() {
        let cfg = LoggerConfig::default();
        assert_eq!(cfg.verbosity, Verbosity::ALL);
        assert_eq!(cfg.delimiter, "»");
        assert_eq!(cfg.prefix_style, PrefixStyle::Emoji);
        assert!(cfg.log_source_location);
        assert_eq!(cfg.file_logging_mode, FileLoggingMode::None);
        assert_eq!(cfg.single_log_file_name, "logfile.log");
        assert_eq!(cfg.single_log_file_max_size_bytes, 10 * 1024 * 1024);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_load_without_sources_gives_defaults() {
        clear_env();
        let cfg = LoggerConfig::load().unwrap();
        assert_eq!(cfg, LoggerConfig::default());
    }

    #[test]
    #[serial]
    fn test_load_env_overrides() {
        clear_env();
        let tmp = TempDir::new().unwrap();
        env::set_var("GLYPHLOG_VERBOSITY", "error|fatal");
        env::set_var("GLYPHLOG_PREFIX_STYLE", "ascii");
        env::set_var("GLYPHLOG_LOG_SOURCE_LOCATION", "false");
        env::set_var("GLYPHLOG_FILE_LOGGING_MODE", "single_file");
        env::set_var("GLYPHLOG_LOGS_DIRECTORY_PATH", tmp.path());
        env::set_var("GLYPHLOG_SINGLE_LOG_FILE_MAX_SIZE_BYTES", "2048");

        let cfg = LoggerConfig::load();
        clear_env();
        let cfg = cfg.unwrap();

        assert_eq!(cfg.verbosity, Verbosity::ERROR | Verbosity::FATAL);
        assert_eq!(cfg.prefix_style, PrefixStyle::Ascii);
        assert!(!cfg.log_source_location);
        assert_eq!(cfg.file_logging_mode, FileLoggingMode::SingleFile);
        assert_eq!(cfg.logs_directory_path, tmp.path());
        assert_eq!(cfg.single_log_file_max_size_bytes, 2048);
    }

    #[test]
    #[serial]
    fn test_load_from_toml_file() {
        clear_env();
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("glyphlog.toml");
        fs::write(
            &path,
            r#"
verbosity = 48
delimiter = "|"
file_logging_mode = "multiple_files"
logs_directory_path = "/tmp/glyphlog-test"
value_format = "pretty"
"#,
        )
        .unwrap();

        let cfg = LoggerConfig::load_from(Some(&path)).unwrap();

        assert_eq!(cfg.verbosity, Verbosity::ERROR | Verbosity::FATAL);
        assert_eq!(cfg.delimiter, "|");
        assert_eq!(cfg.file_logging_mode, FileLoggingMode::MultipleFiles);
        assert_eq!(cfg.value_format, ValueFormat::Pretty);
        assert_eq!(cfg.prefix_style, PrefixStyle::Emoji);
    }

    #[test]
    #[serial]
    fn test_load_rejects_bad_verbosity() {
        clear_env();
        env::set_var("GLYPHLOG_VERBOSITY", "loud");
        let res = LoggerConfig::load();
        clear_env();
        assert!(matches!(res, Err(ConfigError::Load(_))));
    }

    #[test]
    fn test_validate_missing_directory() {
        let cfg = LoggerConfig {
            file_logging_mode: FileLoggingMode::SingleFile,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::MissingDirectory(FileLoggingMode::SingleFile))
        ));
    }

    #[test]
    fn test_validate_file_name() {
        let cfg = LoggerConfig::default().with_single_log_file("nested/app.log", 0);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidFileName { .. })
        ));
    }
}
