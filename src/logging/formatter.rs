use std::fmt;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::logging::{
    category::{Category, PrefixStyle},
    location::SourceLocation,
    sinks::paths,
};

/// Время суток с миллисекундами, для консоли.
pub const CONSOLE_TIMESTAMP_FORMAT: &str = "%H:%M:%S%.3f";
/// Дата и время с миллисекундами, для файлов. Строки сортируются
/// лексикографически по времени.
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";
/// Префикс имени файла в multi-file режиме.
pub const DATE_STAMP_FORMAT: &str = "%Y-%m-%d";
/// Представление отсутствующего значения.
pub const NULL_MARKER: &str = "<null>";

/// Превращает значение в строку для `log_value`.
pub trait ValueFormatter: Send + Sync {
    fn format(
        &self,
        value: &dyn fmt::Debug,
    ) -> String;
}

/// Однострочный `{:?}`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DebugFormatter;

/// Многострочный `{:#?}`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrettyFormatter;

/// Выбор форматтера значений в конфигурации.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormat {
    #[default]
    Debug,
    Pretty,
}

impl ValueFormatter for DebugFormatter {
    fn format(
        &self,
        value: &dyn fmt::Debug,
    ) -> String {
        format!("{value:?}")
    }
}

impl ValueFormatter for PrettyFormatter {
    fn format(
        &self,
        value: &dyn fmt::Debug,
    ) -> String {
        format!("{value:#?}")
    }
}

impl ValueFormat {
    pub fn formatter(self) -> Box<dyn ValueFormatter> {
        match self {
            ValueFormat::Debug => Box::new(DebugFormatter),
            ValueFormat::Pretty => Box::new(PrettyFormatter),
        }
    }
}

pub fn console_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    at.format(CONSOLE_TIMESTAMP_FORMAT).to_string()
}

pub fn file_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    at.format(FILE_TIMESTAMP_FORMAT).to_string()
}

pub fn date_stamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    at.format(DATE_STAMP_FORMAT).to_string()
}

/// `<глиф> [<время>]`
pub fn prefix(
    category: Category,
    style: PrefixStyle,
    timestamp: &str,
) -> String {
    format!("{} [{}]", category.glyph(style), timestamp)
}

/// `<d> <файл> <d> <функция> <d> <строка>`
pub fn location_prefix(
    delimiter: &str,
    location: &SourceLocation,
) -> String {
    format!(
        "{d} {} {d} {} {d} {}",
        paths::file_base_name(location.file),
        location.function,
        location.line,
        d = delimiter,
    )
}

/// Строка сообщения: `<prefix> [<location>] <d> <text>`.
pub fn message_line(
    prefix: &str,
    location: Option<&str>,
    delimiter: &str,
    text: Option<&str>,
) -> String {
    let text = text.unwrap_or("");
    match location {
        Some(location) => format!("{prefix} {location} {delimiter} {text}"),
        None => format!("{prefix} {delimiter} {text}"),
    }
}

/// Строка значения для файла: `<prefix> <d> <value>`.
pub fn value_line(
    prefix: &str,
    delimiter: &str,
    value: &str,
) -> String {
    format!("{prefix} {delimiter} {value}")
}

/// Сворачивает многострочное значение в одну строку: строки обрезаются и
/// склеиваются через пробел. В файле одна запись занимает одну строку.
pub fn single_line(value: &str) -> String {
    if !value.contains(['\n', '\r']) {
        return value.to_string();
    }
    value
        .lines()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Имя файла (без `.log`) в multi-file режиме: `<дата>-<scope>` или
/// `<дата>-<имя исходника без расширения>`.
pub fn multi_file_base_name(
    date_stamp: &str,
    scope: Option<&str>,
    source_file: &str,
) -> String {
    let name = match scope {
        Some(scope) => scope,
        None => paths::file_stem(source_file),
    };
    format!("{date_stamp}-{name}")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::{NaiveDate, Utc};

    use super::*;
    use crate::logging::location::UNKNOWN_FILE;

    fn fixed() -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_milli_opt(7, 5, 3, 42)
            .unwrap()
            .and_utc()
    }

    #[test]
    fn test_timestamps() {
        let at = fixed();
        assert_eq!(console_timestamp(&at), "07:05:03.042");
        assert_eq!(file_timestamp(&at), "2024-03-09 07:05:03.042");
        assert_eq!(date_stamp(&at), "2024-03-09");
    }

    /// Файловые метки времени сортируются так же, как сами моменты.
    #[test]
    fn test_file_timestamps_sort_lexicographically() {
        let earlier = fixed();
        let later = earlier + chrono::TimeDelta::try_hours(30).unwrap();
        assert!(file_timestamp(&earlier) < file_timestamp(&later));
    }

    #[test]
    fn test_prefix_styles() {
        assert_eq!(
            prefix(Category::Error, PrefixStyle::Emoji, "07:05:03.042"),
            "❌ [07:05:03.042]"
        );
        assert_eq!(
            prefix(Category::Error, PrefixStyle::Ascii, "07:05:03.042"),
            "ERROR [07:05:03.042]"
        );
    }

    #[test]
    fn test_location_prefix_uses_base_name() {
        let loc = SourceLocation::new("src/jobs/runner.rs", "run", 42);
        assert_eq!(location_prefix("»", &loc), "» runner.rs » run » 42");
    }

    #[test]
    fn test_message_line_with_and_without_location() {
        assert_eq!(
            message_line("✅ [t]", Some("» a.rs » f » 1"), "»", Some("done")),
            "✅ [t] » a.rs » f » 1 » done"
        );
        assert_eq!(message_line("✅ [t]", None, "»", Some("done")), "✅ [t] » done");
        assert_eq!(message_line("✅ [t]", None, "|", None), "✅ [t] | ");
    }

    #[test]
    fn test_value_line() {
        assert_eq!(value_line("🔧 [t]", "»", NULL_MARKER), "🔧 [t] » <null>");
    }

    #[test]
    fn test_single_line_collapses_pretty_output() {
        #[derive(Debug)]
        #[allow(dead_code)]
        struct Pair {
            a: i32,
            b: i32,
        }

        let pretty = PrettyFormatter.format(&Pair { a: 1, b: 2 });
        assert_eq!(single_line(&pretty), "Pair { a: 1, b: 2, }");
        assert_eq!(single_line("a\r\nb"), "a b");
        assert_eq!(single_line("[1, 2]"), "[1, 2]");
    }

    #[test]
    fn test_multi_file_base_name() {
        assert_eq!(
            multi_file_base_name("2024-03-09", Some("jobs"), "src/main.rs"),
            "2024-03-09-jobs"
        );
        assert_eq!(
            multi_file_base_name("2024-03-09", None, "src/main.rs"),
            "2024-03-09-main"
        );
        let unknown = multi_file_base_name("2024-03-09", None, UNKNOWN_FILE);
        assert_eq!(unknown, "2024-03-09-unknown");
        assert!(paths::validate_file_name(&format!("{unknown}.log")).is_ok());
        assert!(!unknown.contains(['<', '>']));
    }

    #[test]
    fn test_value_formatters() {
        let mut map = BTreeMap::new();
        map.insert("key_0", "value_0");

        assert_eq!(DebugFormatter.format(&map), r#"{"key_0": "value_0"}"#);
        assert_eq!(DebugFormatter.format(&vec![0, 1, 2]), "[0, 1, 2]");
        assert!(PrettyFormatter.format(&vec![0, 1]).contains('\n'));
        assert_eq!(ValueFormat::Debug.formatter().format(&3), "3");
    }
}
