use std::{fmt, io};

use num_enum::TryFromPrimitive;
#[cfg(feature = "strum")]
use strum_macros::AsRefStr;

/// Коды статуса ошибок логгера.
///
/// # Диапазоны:
/// - 0xxx: Успех
/// - 1xxx: Внутренние ошибки
/// - 2xxx: Конфигурация
/// - 3xxx: Файловые цели
/// - 4xxx: Файловая система
#[cfg_attr(feature = "strum", derive(AsRefStr))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[repr(u32)]
#[non_exhaustive]
pub enum StatusCode {
    Success = 0,

    // === 1xxx ===
    Internal = 1000,
    Unsupported = 1001,

    // === 2xxx ===
    InvalidConfig = 2000,
    InvalidValue = 2001,
    InvalidPath = 2002,

    // === 3xxx ===
    DirectoryUnavailable = 3000,
    WriteFailed = 3001,
    RemoveFailed = 3002,

    // === 4xxx ===
    PermissionDenied = 4000,
    NotFound = 4001,
    Io = 4002,
}

impl StatusCode {
    pub const fn code(self) -> u32 {
        self as u32
    }

    pub fn from_u32(v: u32) -> Option<Self> {
        Self::try_from(v).ok()
    }

    /// Код для ошибки файловой системы по её виду.
    pub fn from_io_kind(kind: io::ErrorKind) -> Self {
        match kind {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            io::ErrorKind::NotFound => Self::NotFound,
            _ => Self::Io,
        }
    }

    /// Может ли повторная запись пройти без изменения настроек.
    ///
    /// Логгер сам ничего не повторяет.
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::WriteFailed | Self::RemoveFailed | Self::Io)
    }

    /// Ошибка в настройках (путь, имя файла, значение), а не в состоянии
    /// файловой системы.
    pub fn is_config_error(self) -> bool {
        matches!(self.code(), 2000..=2999)
    }

    pub fn is_io_error(self) -> bool {
        matches!(self.code(), 3000..=4999)
    }
}

impl From<StatusCode> for u32 {
    fn from(c: StatusCode) -> Self {
        c.code()
    }
}

impl fmt::Display for StatusCode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        #[cfg(feature = "strum")]
        {
            write!(f, "{} ({})", self.as_ref(), self.code())
        }
        #[cfg(not(feature = "strum"))]
        {
            write!(f, "{:?} ({})", self, self.code())
        }
    }
}
