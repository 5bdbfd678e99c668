//! Money formatting for the active display settings.

use iso_currency::Currency;
use num_format::{Locale, ToFormattedString as _};

use crate::settings::{CurrencyCode, DisplaySettings, Language};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// `$1,234.56`
    Prefix,
    /// `R$ 1.234,56`
    PrefixSpaced,
    /// `1.234,56 €`
    SuffixSpaced,
}

/// The locale a currency is conventionally shown in; other currencies use
/// the display language's locale.
fn style_for(currency: &CurrencyCode, language: &Language) -> (Locale, Placement) {
    match currency.as_str() {
        "BRL" => (Locale::pt, Placement::PrefixSpaced),
        "USD" => (Locale::en, Placement::Prefix),
        "EUR" => (Locale::de, Placement::SuffixSpaced),
        "GBP" => (Locale::en_GB, Placement::Prefix),
        "JPY" => (Locale::ja, Placement::Prefix),
        _ => match language.effective() {
            Language::EnUs => (Locale::en, Placement::Prefix),
            Language::EsEs => (Locale::es, Placement::SuffixSpaced),
            _ => (Locale::pt, Placement::PrefixSpaced),
        },
    }
}

/// Format `value` in the settings' currency.
pub fn format_currency(value: f64, settings: &DisplaySettings) -> String {
    format_money(value, &settings.currency, &settings.language)
}

pub fn format_money(value: f64, currency: &CurrencyCode, language: &Language) -> String {
    let (digits, symbol) = match Currency::from_code(currency.as_str()) {
        Some(c) => (u32::from(c.exponent().unwrap_or(0)), c.symbol().to_string()),
        None => (2, currency.to_string()),
    };
    let (locale, placement) = style_for(currency, language);

    let scale = 10_i64.pow(digits);
    let minor = (value.abs() * scale as f64).round() as i64;
    let whole = (minor / scale).to_formatted_string(&locale);
    let number = if digits == 0 {
        whole
    } else {
        format!(
            "{}{}{:0width$}",
            whole,
            locale.decimal(),
            minor % scale,
            width = digits as usize
        )
    };
    let sign = if value < 0.0 && minor != 0 {
        locale.minus_sign()
    } else {
        ""
    };

    match placement {
        Placement::Prefix => format!("{sign}{symbol}{number}"),
        Placement::PrefixSpaced => format!("{sign}{symbol} {number}"),
        Placement::SuffixSpaced => format!("{sign}{number} {symbol}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(c: &str) -> CurrencyCode {
        c.parse().unwrap()
    }

    #[test]
    fn test_brl_uses_brazilian_marks() {
        assert_eq!(format_money(1234.56, &code("BRL"), &Language::EnUs), "R$ 1.234,56");
        assert_eq!(format_money(0.0, &code("BRL"), &Language::PtBr), "R$ 0,00");
    }

    #[test]
    fn test_usd() {
        assert_eq!(format_money(1234.5, &code("USD"), &Language::PtBr), "$1,234.50");
        assert_eq!(format_money(-20.0, &code("USD"), &Language::PtBr), "-$20.00");
    }

    #[test]
    fn test_jpy_has_no_minor_units() {
        let s = format_money(1234.6, &code("JPY"), &Language::EnUs);
        assert!(s.ends_with("1,235"), "got {s}");
    }

    #[test]
    fn test_rounding_carries_into_whole_part() {
        assert_eq!(format_money(9.999, &code("USD"), &Language::EnUs), "$10.00");
    }

    #[test]
    fn test_settings_entry_point() {
        let settings = DisplaySettings::default();
        assert_eq!(format_currency(50.0, &settings), "R$ 50,00");
    }
}
