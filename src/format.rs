// Presentation formatting for amounts and dates

use crate::config::Settings;
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date_format '{0}'")]
pub struct InvalidDateFormat(pub String);

/// Reject strftime strings chrono cannot render
pub fn check_date_format(date_format: &str) -> Result<(), InvalidDateFormat> {
    if StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error)) {
        return Err(InvalidDateFormat(date_format.to_string()));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatter {
    currency_symbol: String,
    date_format: String,
}

impl Formatter {
    pub fn new(
        currency_symbol: impl Into<String>,
        date_format: impl Into<String>,
    ) -> Result<Self, InvalidDateFormat> {
        let date_format = date_format.into();
        check_date_format(&date_format)?;
        Ok(Formatter {
            currency_symbol: currency_symbol.into(),
            date_format,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, InvalidDateFormat> {
        Self::new(settings.currency_symbol.clone(), settings.date_format.clone())
    }

    /// Symbol followed by exactly two decimals, e.g. `₹250.00`
    ///
    /// Halfway values round away from zero (`1.125` → `1.13`); an overflowed
    /// total renders as `∞`.
    pub fn money(&self, amount: f64) -> String {
        if !amount.is_finite() {
            let sign = if amount < 0.0 { "-" } else { "" };
            return format!("{}{}∞", self.currency_symbol, sign);
        }
        format!("{}{:.2}", self.currency_symbol, round_half_away(amount))
    }

    /// `01 May 2024` with the default format
    pub fn date(&self, date: NaiveDate) -> String {
        date.format(&self.date_format).to_string()
    }
}

impl Default for Formatter {
    fn default() -> Self {
        let settings = Settings::default();
        Formatter {
            currency_symbol: settings.currency_symbol,
            date_format: settings.date_format,
        }
    }
}

/// `{:.2}` breaks exact ties toward the even digit; push them outward instead
fn round_half_away(amount: f64) -> f64 {
    // A double sits exactly between two cents only when it is an odd
    // multiple of 1/8; scaling by 8 is exact.
    let eighths = amount * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        (amount * 100.0).round() / 100.0
    } else {
        amount
    }
}
