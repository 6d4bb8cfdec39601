use std::panic::Location;

/// Имя функции, если оно неизвестно (вызов через `#[track_caller]`).
pub const UNKNOWN_FUNCTION: &str = "<unknown>";
/// Имя исходника, если событие его не несёт. Годится как часть имени файла.
pub const UNKNOWN_FILE: &str = "unknown";

/// Место в исходном коде, откуда пришла запись.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: &'static str,
    pub function: &'static str,
    pub line: u32,
}

impl SourceLocation {
    pub const fn new(
        file: &'static str,
        function: &'static str,
        line: u32,
    ) -> Self {
        Self {
            file,
            function,
            line,
        }
    }

    /// Место вызова без имени функции.
    #[track_caller]
    pub fn caller() -> Self {
        let loc = Location::caller();
        Self::new(loc.file(), UNKNOWN_FUNCTION, loc.line())
    }
}

/// Имя текущей функции (без пути модуля).
///
/// Замыкания пропускаются: внутри `fn run() { || function_name!() }` вернёт
/// `run`.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = __type_name_of(__here);
        let name = name.strip_suffix("::__here").unwrap_or(name);
        name.rsplit("::")
            .find(|segment| *segment != "{{closure}}")
            .unwrap_or(name)
    }};
}

/// [`SourceLocation`] текущего места: файл, функция, строка.
#[macro_export]
macro_rules! source_location {
    () => {
        $crate::logging::SourceLocation::new(file!(), $crate::function_name!(), line!())
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_name_macro() {
        assert_eq!(crate::function_name!(), "test_function_name_macro");
    }

    #[test]
    fn test_function_name_skips_closures() {
        let name = (|| crate::function_name!())();
        assert_eq!(name, "test_function_name_skips_closures");
    }

    #[test]
    fn test_source_location_macro() {
        let loc = crate::source_location!();
        assert!(loc.file.ends_with("location.rs"));
        assert_eq!(loc.function, "test_source_location_macro");
        assert!(loc.line > 0);
    }

    #[test]
    fn test_caller_has_unknown_function() {
        let loc = SourceLocation::caller();
        assert!(loc.file.ends_with("location.rs"));
        assert_eq!(loc.function, UNKNOWN_FUNCTION);
    }
}
