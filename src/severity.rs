//! Severity levels
//!
//! A single ordered enum serves both as the tag carried by a message and as
//! the minimum-level threshold of a logger.

use crate::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log message, also used as a filter threshold
///
/// `Disabled` is only meaningful as a threshold: a logger configured with it
/// drops everything, and a message tagged with it is never dispatched.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Severity {
    #[default]
    Trace = 0,
    Debug = 1,
    #[serde(alias = "info")]
    Information = 2,
    #[serde(alias = "warn")]
    Warning = 3,
    Error = 4,
    Fatal = 5,
    #[serde(alias = "off")]
    Disabled = 6,
}

impl Severity {
    /// Every severity a message can carry, lowest first
    pub const MESSAGE_LEVELS: [Severity; 6] = [
        Severity::Trace,
        Severity::Debug,
        Severity::Information,
        Severity::Warning,
        Severity::Error,
        Severity::Fatal,
    ];

    /// Lowercase name, as used in config files
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Trace => "trace",
            Severity::Debug => "debug",
            Severity::Information => "information",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
            Severity::Disabled => "disabled",
        }
    }

    /// Fixed-width prefix written before a message by console and file sinks
    pub fn prefix(self) -> &'static str {
        match self {
            Severity::Trace => " TRACE : ",
            Severity::Debug => " DEBUG : ",
            Severity::Information => "  INF  : ",
            Severity::Warning => "  WRN  : ",
            Severity::Error => " ERROR : ",
            Severity::Fatal => " FATAL : ",
            Severity::Disabled => "  UNK  : ",
        }
    }

    /// 14-character prefix used on serial lines
    pub fn wide_prefix(self) -> &'static str {
        match self {
            Severity::Trace => "   TRACE   :  ",
            Severity::Debug => "   DEBUG   :  ",
            Severity::Information => "    INF    :  ",
            Severity::Warning => "    WRN    :  ",
            Severity::Error => "   ERROR   :  ",
            Severity::Fatal => "   FATAL   :  ",
            Severity::Disabled => "    UNK    :  ",
        }
    }

    /// Inverse of `self as u8`; out-of-range values map to `Disabled`
    #[inline]
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => Severity::Trace,
            1 => Severity::Debug,
            2 => Severity::Information,
            3 => Severity::Warning,
            4 => Severity::Error,
            5 => Severity::Fatal,
            _ => Severity::Disabled,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Severity::Trace),
            "debug" => Ok(Severity::Debug),
            "information" | "info" => Ok(Severity::Information),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            "fatal" => Ok(Severity::Fatal),
            "disabled" | "off" => Ok(Severity::Disabled),
            _ => Err(LoggerError::InvalidSeverity {
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_order() {
        assert!(Severity::Trace < Severity::Debug);
        assert!(Severity::Debug < Severity::Information);
        assert!(Severity::Information < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
        assert!(Severity::Fatal < Severity::Disabled);
    }

    #[test]
    fn test_u8_conversion() {
        for level in Severity::MESSAGE_LEVELS {
            assert_eq!(Severity::from_u8(level as u8), level);
        }
        assert_eq!(Severity::from_u8(Severity::Disabled as u8), Severity::Disabled);
        assert_eq!(Severity::from_u8(200), Severity::Disabled);
    }

    #[test]
    fn test_prefixes() {
        assert_eq!(Severity::Error.prefix(), " ERROR : ");
        assert_eq!(Severity::Information.prefix(), "  INF  : ");
        for level in Severity::MESSAGE_LEVELS {
            assert_eq!(level.prefix().len(), 9);
            assert_eq!(level.wide_prefix().len(), 14);
        }
    }

    #[test]
    fn test_from_str_aliases() {
        assert_eq!("warn".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("Info".parse::<Severity>().unwrap(), Severity::Information);
        assert_eq!(" off ".parse::<Severity>().unwrap(), Severity::Disabled);
        assert!("verbose".parse::<Severity>().is_err());
    }

    #[test]
    fn test_toml_names() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            level: Severity,
        }

        let text = toml::to_string(&Wrapper {
            level: Severity::Warning,
        })
        .unwrap();
        assert!(text.contains("level = \"warning\""));

        let parsed: Wrapper = toml::from_str("level = \"warn\"").unwrap();
        assert_eq!(parsed.level, Severity::Warning);
    }
}
