use std::fmt;

use crate::logging::{
    category::Category,
    location::SourceLocation,
    logger::{LogOptions, Logger},
};

/// Результат `log_message` / `log_value`: логгер и категория, больше ничего.
///
/// Позволяет писать несколько записей одной категории подряд:
///
/// ```
/// use glyphlog::logging::{Category, Logger, LoggerConfig};
///
/// let logger = Logger::new(LoggerConfig::default());
/// logger
///     .category(Category::Network)
///     .message("connected")
///     .value(&("127.0.0.1", 6174));
/// ```
#[derive(Clone, Copy)]
pub struct LogHandle<'a> {
    logger: &'a Logger,
    category: Category,
}

impl<'a> LogHandle<'a> {
    pub(crate) fn new(
        logger: &'a Logger,
        category: Category,
    ) -> Self {
        Self { logger, category }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn logger(&self) -> &'a Logger {
        self.logger
    }

    /// Сообщение с местом вызова (без имени функции, см.
    /// [`SourceLocation::caller`]).
    #[track_caller]
    pub fn message(
        self,
        text: &str,
    ) -> Self {
        self.message_at(text, SourceLocation::caller(), &LogOptions::default())
    }

    #[track_caller]
    pub fn message_with(
        self,
        text: &str,
        options: &LogOptions<'_>,
    ) -> Self {
        self.message_at(text, SourceLocation::caller(), options)
    }

    /// Сообщение с явным местом, например из `source_location!()`.
    pub fn message_at(
        self,
        text: &str,
        location: SourceLocation,
        options: &LogOptions<'_>,
    ) -> Self {
        self.logger
            .log_message(self.category, Some(text), location, options)
    }

    #[track_caller]
    pub fn value<T>(
        self,
        value: &T,
    ) -> Self
    where
        T: fmt::Debug + ?Sized,
    {
        self.logger.log_value(
            self.category,
            Some(&value as &dyn fmt::Debug),
            SourceLocation::caller(),
            &LogOptions::default(),
        )
    }

    #[track_caller]
    pub fn value_with<T>(
        self,
        value: &T,
        options: &LogOptions<'_>,
    ) -> Self
    where
        T: fmt::Debug + ?Sized,
    {
        self.logger.log_value(
            self.category,
            Some(&value as &dyn fmt::Debug),
            SourceLocation::caller(),
            options,
        )
    }

    /// Отсутствующее значение: `<null>`.
    #[track_caller]
    pub fn null(self) -> Self {
        self.logger.log_value(
            self.category,
            None,
            SourceLocation::caller(),
            &LogOptions::default(),
        )
    }
}

impl fmt::Debug for LogHandle<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("LogHandle")
            .field("category", &self.category)
            .finish()
    }
}
