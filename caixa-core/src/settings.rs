//! User display settings, persisted server-side as a JSON object.
//!
//! Keys missing from a stored object take their defaults, and keys this
//! client doesn't know about are kept so saving never drops them.

use chrono::{DateTime, Locale, NaiveDate, NaiveTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::ValidationError;

/// Display language. Unknown tags are preserved on the wire but render
/// like `pt-BR`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Language {
    #[default]
    PtBr,
    EnUs,
    EsEs,
    Other(String),
}

impl Language {
    pub fn tag(&self) -> &str {
        match self {
            Language::PtBr => "pt-BR",
            Language::EnUs => "en-US",
            Language::EsEs => "es-ES",
            Language::Other(tag) => tag,
        }
    }

    /// The supported language used for labels and dates.
    pub fn effective(&self) -> Language {
        match self {
            Language::Other(_) => Language::PtBr,
            known => known.clone(),
        }
    }

    /// Short numeric date as the language writes it.
    pub fn format_date(&self, date: NaiveDate) -> String {
        let pattern = match self.effective() {
            Language::EnUs => "%-m/%-d/%Y",
            Language::EsEs => "%-d/%-m/%Y",
            _ => "%d/%m/%Y",
        };
        date.format(pattern).to_string()
    }

    /// Weekday, day, month and year spelled out, as in the dashboard header.
    pub fn format_long_date(&self, date: NaiveDate) -> String {
        let (pattern, locale) = match self.effective() {
            Language::EnUs => ("%A, %B %-d, %Y", Locale::en_US),
            Language::EsEs => ("%A, %-d de %B de %Y", Locale::es_ES),
            _ => ("%A, %-d de %B de %Y", Locale::pt_BR),
        };
        DateTime::<Utc>::from_naive_utc_and_offset(date.and_time(NaiveTime::MIN), Utc)
            .format_localized(pattern, locale)
            .to_string()
    }
}

impl From<String> for Language {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "pt-BR" => Language::PtBr,
            "en-US" => Language::EnUs,
            "es-ES" => Language::EsEs,
            _ => Language::Other(tag),
        }
    }
}

impl From<Language> for String {
    fn from(lang: Language) -> Self {
        lang.tag().to_string()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Strict parse used for user input: only supported tags are accepted.
impl FromStr for Language {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Language::from(s.trim().to_string()) {
            Language::Other(tag) => Err(ValidationError::Malformed {
                field: "language",
                value: tag,
            }),
            known => Ok(known),
        }
    }
}

/// ISO 4217 currency code, upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self("BRL".to_string())
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        match iso_currency::Currency::from_code(&code) {
            Some(_) => Ok(Self(code)),
            None => Err(ValidationError::Malformed {
                field: "currency",
                value: s.to_string(),
            }),
        }
    }
}

/// Side the navigation bar sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NavPosition {
    #[serde(rename = "row")]
    #[default]
    Row,
    #[serde(rename = "row-reverse")]
    RowReverse,
}

impl FromStr for NavPosition {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "row" | "left" => Ok(NavPosition::Row),
            "row-reverse" | "right" => Ok(NavPosition::RowReverse),
            other => Err(ValidationError::Malformed {
                field: "navPos",
                value: other.to_string(),
            }),
        }
    }
}

fn default_theme() -> String {
    "dark".to_string()
}

fn default_primary_color() -> String {
    "#6366f1".to_string()
}

fn default_font_size() -> String {
    "16px".to_string()
}

fn default_font_family() -> String {
    "'Outfit', sans-serif".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySettings {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_primary_color")]
    pub primary_color: String,
    #[serde(default = "default_font_size")]
    pub font_size: String,
    #[serde(default)]
    pub currency: CurrencyCode,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub nav_pos: NavPosition,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    /// Keys written by other clients
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            primary_color: default_primary_color(),
            font_size: default_font_size(),
            currency: CurrencyCode::default(),
            language: Language::default(),
            nav_pos: NavPosition::default(),
            font_family: default_font_family(),
            extra: BTreeMap::new(),
        }
    }
}

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("hardcoded regex should be valid"));

static CSS_LENGTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+(\.\d+)?(px|rem|em)$").expect("hardcoded regex should be valid")
});

impl DisplaySettings {
    /// Reject values the dashboard can't apply.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !HEX_COLOR.is_match(&self.primary_color) {
            return Err(ValidationError::Malformed {
                field: "primaryColor",
                value: self.primary_color.clone(),
            });
        }
        if !CSS_LENGTH.is_match(&self.font_size) {
            return Err(ValidationError::Malformed {
                field: "fontSize",
                value: self.font_size.clone(),
            });
        }
        if self.theme.trim().is_empty() {
            return Err(ValidationError::Missing { field: "theme" });
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_take_defaults() {
        let s: DisplaySettings =
            serde_json::from_str(r#"{"currency": "USD", "language": "en-US"}"#).unwrap();
        assert_eq!(s.currency.as_str(), "USD");
        assert_eq!(s.language, Language::EnUs);
        assert_eq!(s.primary_color, "#6366f1");
        assert_eq!(s.nav_pos, NavPosition::Row);
        assert_eq!(s.font_family, "'Outfit', sans-serif");
        assert!(s.extra.is_empty());
    }

    #[test]
    fn test_unknown_language_and_keys_round_trip() {
        let raw = r#"{"language": "fr-FR", "compact": true, "navPos": "row-reverse"}"#;
        let s: DisplaySettings = serde_json::from_str(raw).unwrap();
        assert_eq!(s.language, Language::Other("fr-FR".to_string()));
        assert_eq!(s.language.effective(), Language::PtBr);
        assert_eq!(s.nav_pos, NavPosition::RowReverse);

        let back = serde_json::to_value(&s).unwrap();
        assert_eq!(back["language"], "fr-FR");
        assert_eq!(back["compact"], true);
        assert_eq!(back["primaryColor"], "#6366f1");
    }

    #[test]
    fn test_validate() {
        let mut s = DisplaySettings::default();
        assert!(s.validate().is_ok());

        s.primary_color = "indigo".to_string();
        assert!(s.validate().is_err());

        s.primary_color = "#10B981".to_string();
        s.font_size = "1.1rem".to_string();
        assert!(s.validate().is_ok());

        s.font_size = "huge".to_string();
        assert!(matches!(
            s.validate(),
            Err(ValidationError::Malformed { field: "fontSize", .. })
        ));
    }

    #[test]
    fn test_patterns_are_anchored() {
        assert!(HEX_COLOR.is_match("#3b82f6"));
        assert!(!HEX_COLOR.is_match("#3b82f6ff"));
        assert!(!HEX_COLOR.is_match("x#3b82f6"));
        assert!(CSS_LENGTH.is_match("16px"));
        assert!(CSS_LENGTH.is_match("0.875em"));
        assert!(!CSS_LENGTH.is_match("16 px"));
        assert!(!CSS_LENGTH.is_match("16pt"));
    }

    #[test]
    fn test_strict_parsers() {
        assert_eq!("es-ES".parse::<Language>(), Ok(Language::EsEs));
        assert!("klingon".parse::<Language>().is_err());
        assert_eq!("usd".parse::<CurrencyCode>().unwrap().as_str(), "USD");
        assert!("XYZ1".parse::<CurrencyCode>().is_err());
        assert_eq!("right".parse::<NavPosition>(), Ok(NavPosition::RowReverse));
    }

    #[test]
    fn test_format_date_per_language() {
        let d = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(Language::PtBr.format_date(d), "05/01/2026");
        assert_eq!(Language::EnUs.format_date(d), "1/5/2026");
        assert_eq!(Language::EsEs.format_date(d), "5/1/2026");
        assert_eq!(Language::Other("it-IT".into()).format_date(d), "05/01/2026");
    }

    #[test]
    fn test_long_date_per_language() {
        let d = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(Language::EnUs.format_long_date(d), "Saturday, March 7, 2026");
        assert_eq!(Language::PtBr.format_long_date(d), "sábado, 7 de março de 2026");
        assert_eq!(Language::EsEs.format_long_date(d), "sábado, 7 de marzo de 2026");
    }
}
