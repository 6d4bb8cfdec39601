use std::{fmt, str::FromStr};

use bitflags::bitflags;
use strum_macros::{AsRefStr, EnumIter, EnumString};

use crate::error::ConfigError;

/// Категория лог-записи.
///
/// Порядок вариантов совпадает с номером бита в [`Verbosity`]: `General` это
/// бит 0, `Cache` бит 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[repr(u8)]
pub enum Category {
    // info
    General = 0,
    Debug = 1,
    // status
    Success = 2,
    Warning = 3,
    Error = 4,
    Fatal = 5,
    // data
    Network = 6,
    Cache = 7,
}

/// Стиль префикса категории в строке лога.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrefixStyle {
    /// `ERROR`, `WARNING`, ...
    Ascii,
    /// `❌`, `⚠️`, ...
    #[default]
    Emoji,
}

/// Статическое описание категории.
#[derive(Debug, Clone, Copy)]
pub struct CategoryInfo {
    pub bit: Verbosity,
    pub emoji: &'static str,
    pub ascii: &'static str,
}

/// Таблица категорий, индексируется дискриминантом [`Category`].
pub const CATEGORY_TABLE: [CategoryInfo; 8] = [
    CategoryInfo {
        bit: Verbosity::GENERAL,
        emoji: "ℹ️",
        ascii: "GENERAL",
    },
    CategoryInfo {
        bit: Verbosity::DEBUG,
        emoji: "🔧",
        ascii: "DEBUG",
    },
    CategoryInfo {
        bit: Verbosity::SUCCESS,
        emoji: "✅",
        ascii: "SUCCESS",
    },
    CategoryInfo {
        bit: Verbosity::WARNING,
        emoji: "⚠️",
        ascii: "WARNING",
    },
    CategoryInfo {
        bit: Verbosity::ERROR,
        emoji: "❌",
        ascii: "ERROR",
    },
    CategoryInfo {
        bit: Verbosity::FATAL,
        emoji: "💀",
        ascii: "FATAL",
    },
    CategoryInfo {
        bit: Verbosity::NETWORK,
        emoji: "🌎",
        ascii: "NETWORK",
    },
    CategoryInfo {
        bit: Verbosity::CACHE,
        emoji: "📀",
        ascii: "CACHE",
    },
];

bitflags! {
    /// Маска включённых категорий: бит `i` разрешает категорию с
    /// дискриминантом `i`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Verbosity: u32 {
        const GENERAL = 0x0000_0001;
        const DEBUG = 0x0000_0002;
        const SUCCESS = 0x0000_0004;
        const WARNING = 0x0000_0008;
        const ERROR = 0x0000_0010;
        const FATAL = 0x0000_0020;
        const NETWORK = 0x0000_0040;
        const CACHE = 0x0000_0080;

        /// general + debug
        const INFO = Self::GENERAL.bits() | Self::DEBUG.bits();
        /// success + warning + error + fatal
        const STATUS = Self::SUCCESS.bits()
            | Self::WARNING.bits()
            | Self::ERROR.bits()
            | Self::FATAL.bits();
        /// network + cache
        const DATA = Self::NETWORK.bits() | Self::CACHE.bits();

        const ALL = 0xFF;
    }
}

impl Category {
    pub fn info(self) -> &'static CategoryInfo {
        &CATEGORY_TABLE[self as usize]
    }

    /// Бит категории в маске.
    pub fn bit(self) -> Verbosity {
        self.info().bit
    }

    pub fn emoji(self) -> &'static str {
        self.info().emoji
    }

    pub fn ascii(self) -> &'static str {
        self.info().ascii
    }

    /// Глиф префикса для выбранного стиля.
    pub fn glyph(
        self,
        style: PrefixStyle,
    ) -> &'static str {
        match style {
            PrefixStyle::Ascii => self.ascii(),
            PrefixStyle::Emoji => self.emoji(),
        }
    }

    /// Итератор по всем категориям в порядке битов.
    pub fn iter() -> CategoryIter {
        <Self as strum::IntoEnumIterator>::iter()
    }
}

impl fmt::Display for Category {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl Verbosity {
    /// Все категории выключены.
    pub const NONE: Self = Self::empty();

    /// Маска из «сырого» значения; неизвестные биты сохраняются.
    pub const fn from_raw(bits: u32) -> Self {
        Self::from_bits_retain(bits)
    }

    pub fn allows(
        self,
        category: Category,
    ) -> bool {
        self.intersects(category.bit())
    }

    /// Разбирает маску из строки.
    ///
    /// Понимает `all`, `none`, группы `info`/`status`/`data`, имена категорий
    /// и числа (`48`, `0x30`), объединённые через `|` или `,`.
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let mut mask = Self::NONE;
        let mut seen = false;

        for token in input.split(['|', ',']).map(str::trim) {
            if token.is_empty() {
                continue;
            }
            seen = true;
            mask |= Self::parse_token(token)?;
        }

        if !seen {
            return Err(ConfigError::InvalidVerbosity(input.to_string()));
        }
        Ok(mask)
    }

    fn parse_token(token: &str) -> Result<Self, ConfigError> {
        let lower = token.to_ascii_lowercase();
        match lower.as_str() {
            "all" => return Ok(Self::ALL),
            "none" => return Ok(Self::NONE),
            "info" => return Ok(Self::INFO),
            "status" => return Ok(Self::STATUS),
            "data" => return Ok(Self::DATA),
            _ => {}
        }

        if let Some(hex) = lower.strip_prefix("0x") {
            return u32::from_str_radix(&hex.replace('_', ""), 16)
                .map(Self::from_raw)
                .map_err(|_| ConfigError::InvalidVerbosity(token.to_string()));
        }
        if let Ok(raw) = lower.parse::<u32>() {
            return Ok(Self::from_raw(raw));
        }

        Category::from_str(token)
            .map(Category::bit)
            .map_err(|_| ConfigError::InvalidVerbosity(token.to_string()))
    }
}

impl Default for Verbosity {
    fn default() -> Self {
        Self::ALL
    }
}

impl From<Category> for Verbosity {
    fn from(category: Category) -> Self {
        category.bit()
    }
}

impl FromStr for Verbosity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> serde::Deserialize<'de> for Verbosity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Bits(u32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Bits(bits) => Ok(Self::from_raw(bits)),
            Raw::Text(text) => Self::parse(&text).map_err(serde::de::Error::custom),
        }
    }
}

impl serde::Serialize for Verbosity {
    fn serialize<S>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u32(self.bits())
    }
}
