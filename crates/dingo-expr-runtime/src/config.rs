//! Evaluation configuration
//!
//! `ExprConfig` carries the evaluation parameters (time zone, locale) threaded
//! through operator evaluation. Type-level dispatch never looks at it.

use chrono::{FixedOffset, Offset, Utc};

use crate::error::{ExprError, ExprResult};

/// Evaluation parameters for bound operators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprConfig {
    /// Zone used to interpret timestamps
    pub time_zone: FixedOffset,
    /// Locale tag, e.g. "en-US"
    pub locale: String,
}

impl Default for ExprConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ExprConfig {
    /// Create a UTC, "en-US" configuration
    pub fn new() -> Self {
        Self {
            time_zone: utc(),
            locale: "en-US".to_string(),
        }
    }

    /// Create a builder
    pub fn builder() -> ExprConfigBuilder {
        ExprConfigBuilder::default()
    }
}

fn utc() -> FixedOffset {
    Utc.fix()
}

/// Builder for [`ExprConfig`]
#[derive(Debug, Default)]
pub struct ExprConfigBuilder {
    time_zone: Option<FixedOffset>,
    locale: Option<String>,
}

impl ExprConfigBuilder {
    /// Set the time zone
    pub fn time_zone(mut self, zone: FixedOffset) -> Self {
        self.time_zone = Some(zone);
        self
    }

    /// Set the time zone from an offset string such as `+08:00`, `-0530` or `Z`
    pub fn time_zone_str(self, zone: &str) -> ExprResult<Self> {
        Ok(self.time_zone(parse_offset(zone)?))
    }

    /// Set the locale tag
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> ExprConfig {
        let defaults = ExprConfig::new();
        ExprConfig {
            time_zone: self.time_zone.unwrap_or(defaults.time_zone),
            locale: self.locale.unwrap_or(defaults.locale),
        }
    }
}

/// Parse a UTC offset: `Z`, `UTC`, `+HH`, `+HH:MM` or `+HHMM`
///
/// The layout is checked here and the normalized `+HH:MM` form is handed to
/// chrono's `FixedOffset` parser, which range-checks hours and minutes.
pub fn parse_offset(zone: &str) -> ExprResult<FixedOffset> {
    let invalid = || ExprError::InvalidTimeZone {
        zone: zone.to_string(),
    };
    let trimmed = zone.trim();
    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return Ok(utc());
    }

    let digits = |bytes: &[u8]| bytes.iter().all(u8::is_ascii_digit);
    let normalized = match trimmed.as_bytes() {
        [b'+' | b'-', hours @ ..] if hours.len() == 2 && digits(hours) => format!("{trimmed}:00"),
        [b'+' | b'-', h1, h2, b':', m1, m2] if digits(&[*h1, *h2, *m1, *m2]) => trimmed.to_string(),
        [b'+' | b'-', rest @ ..] if rest.len() == 4 && digits(rest) => {
            format!("{}:{}", &trimmed[..3], &trimmed[3..])
        }
        _ => return Err(invalid()),
    };
    normalized.parse::<FixedOffset>().map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExprConfig::default();
        assert_eq!(config.time_zone.local_minus_utc(), 0);
        assert_eq!(config.locale, "en-US");
    }

    #[test]
    fn test_builder() {
        let config = ExprConfig::builder()
            .time_zone_str("+08:00")
            .unwrap()
            .locale("zh-CN")
            .build();
        assert_eq!(config.time_zone.local_minus_utc(), 8 * 3600);
        assert_eq!(config.locale, "zh-CN");
    }

    #[test]
    fn test_parse_offset() {
        assert_eq!(parse_offset("Z").unwrap().local_minus_utc(), 0);
        assert_eq!(parse_offset("-0530").unwrap().local_minus_utc(), -(5 * 3600 + 30 * 60));
        assert_eq!(parse_offset("+09").unwrap().local_minus_utc(), 9 * 3600);

        assert_eq!(parse_offset(" +08:00 ").unwrap().local_minus_utc(), 8 * 3600);

        for bad in [
            "",
            "08:00",
            "+8",
            "+08:75",
            "+25:00",
            "Asia/Shanghai",
            "+:0800",
            "+08:0:0",
            "+0:800",
            "+08::00",
            "+08 00",
            "+08:00:00",
        ] {
            assert_eq!(
                parse_offset(bad),
                Err(ExprError::InvalidTimeZone { zone: bad.to_string() }),
                "{bad}"
            );
        }
    }
}
