// 📐 Input Validation - Raw form values → typed expense values
//
// The form collaborator hands over strings exactly as the user typed them.
// Presence and positivity checks happen here, before anything reaches the
// ledger. The ledger re-checks the invariants it owns (see ledger.rs).

use crate::category::Category;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Message shown when any required field is blank
pub const MSG_FILL_ALL_FIELDS: &str = "Please fill in all fields";

/// Message shown when the amount is zero or negative
pub const MSG_AMOUNT_POSITIVE: &str = "Amount must be greater than 0";

/// ISO calendar date, as produced by an `<input type="date">`
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// VALIDATION ERROR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field}: required field is empty")]
    MissingField { field: &'static str },

    #[error("amount: '{raw}' is not a finite number")]
    InvalidAmount { raw: String },

    #[error("amount: must be greater than 0, got {amount}")]
    NonPositiveAmount { amount: f64 },

    #[error("category: unknown category '{value}'")]
    UnknownCategory { value: String },

    #[error("date: '{value}' is not a valid calendar date (expected YYYY-MM-DD)")]
    InvalidDate { value: String },
}

impl ValidationError {
    /// Name of the offending form field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField { field } => *field,
            ValidationError::InvalidAmount { .. } | ValidationError::NonPositiveAmount { .. } => {
                "amount"
            }
            ValidationError::UnknownCategory { .. } => "category",
            ValidationError::InvalidDate { .. } => "date",
        }
    }

    /// Short message suitable for a blocking notification
    pub fn user_message(&self) -> String {
        match self {
            ValidationError::MissingField { .. } | ValidationError::InvalidAmount { .. } => {
                MSG_FILL_ALL_FIELDS.to_string()
            }
            ValidationError::NonPositiveAmount { .. } => MSG_AMOUNT_POSITIVE.to_string(),
            ValidationError::UnknownCategory { value } => format!("Unknown category: {}", value),
            ValidationError::InvalidDate { value } => format!("Invalid date: {}", value),
        }
    }
}

// ============================================================================
// EXPENSE FORM
// ============================================================================

/// Raw values of the add-expense form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseForm {
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "amount_text")]
    pub amount: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub date: String,
}

/// JSON clients may send the amount as a number or as the typed text
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Text(String),
    Number(f64),
}

fn amount_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawAmount::deserialize(deserializer)? {
        RawAmount::Text(text) => text,
        RawAmount::Number(n) => n.to_string(),
    })
}

/// Typed values ready for `Ledger::add`
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub description: String,
    pub amount: f64,
    pub category: Category,
    pub date: NaiveDate,
}

impl ExpenseForm {
    /// Blank form with the date preset to `today`
    pub fn with_date(today: NaiveDate) -> Self {
        ExpenseForm {
            date: today.format(DATE_INPUT_FORMAT).to_string(),
            ..Default::default()
        }
    }

    /// Clear every field and preset the date again
    pub fn reset(&mut self, today: NaiveDate) {
        *self = ExpenseForm::with_date(today);
    }

    /// Check presence of every field, then parse and check positivity
    pub fn parse(&self) -> Result<NewExpense, ValidationError> {
        let description = self.description.trim();
        let amount_raw = self.amount.trim();
        let category_raw = self.category.trim();
        let date_raw = self.date.trim();

        // Presence first, in form order
        for (field, value) in [
            ("description", description),
            ("amount", amount_raw),
            ("category", category_raw),
            ("date", date_raw),
        ] {
            if value.is_empty() {
                return Err(ValidationError::MissingField { field });
            }
        }

        let amount = parse_amount(amount_raw)?;

        let category = category_raw
            .parse::<Category>()
            .map_err(|e| ValidationError::UnknownCategory { value: e.0 })?;

        let date = NaiveDate::parse_from_str(date_raw, DATE_INPUT_FORMAT).map_err(|_| {
            ValidationError::InvalidDate {
                value: date_raw.to_string(),
            }
        })?;

        Ok(NewExpense {
            description: description.to_string(),
            amount,
            category,
            date,
        })
    }
}

fn parse_amount(raw: &str) -> Result<f64, ValidationError> {
    let amount: f64 = raw.parse().map_err(|_| ValidationError::InvalidAmount {
        raw: raw.to_string(),
    })?;
    check_amount(amount)?;
    Ok(amount)
}

/// Amount must be finite and strictly positive
pub fn check_amount(amount: f64) -> Result<(), ValidationError> {
    if !amount.is_finite() {
        return Err(ValidationError::InvalidAmount {
            raw: amount.to_string(),
        });
    }
    if amount <= 0.0 {
        return Err(ValidationError::NonPositiveAmount { amount });
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn form(description: &str, amount: &str, category: &str, date: &str) -> ExpenseForm {
        ExpenseForm {
            description: description.to_string(),
            amount: amount.to_string(),
            category: category.to_string(),
            date: date.to_string(),
        }
    }

    #[test]
    fn test_parse_valid_form() {
        let parsed = form("  Lunch  ", "250", "Food", "2024-05-01").parse().unwrap();

        assert_eq!(parsed.description, "Lunch");
        assert_eq!(parsed.amount, 250.0);
        assert_eq!(parsed.category, Category::Food);
        assert_eq!(parsed.date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    }

    #[test]
    fn test_parse_keeps_full_precision() {
        let parsed = form("Tea", "12.345", "Food", "2024-05-01").parse().unwrap();
        assert_eq!(parsed.amount, 12.345);
    }

    #[test]
    fn test_blank_description_is_missing() {
        let err = form("   ", "10", "Food", "2024-05-01").parse().unwrap_err();
        assert_eq!(err, ValidationError::MissingField { field: "description" });
        assert_eq!(err.user_message(), MSG_FILL_ALL_FIELDS);
    }

    #[test]
    fn test_each_missing_field_is_reported() {
        let cases = [
            (form("Lunch", "", "Food", "2024-05-01"), "amount"),
            (form("Lunch", "10", "", "2024-05-01"), "category"),
            (form("Lunch", "10", "Food", ""), "date"),
        ];

        for (f, field) in cases {
            let err = f.parse().unwrap_err();
            assert_eq!(err.field(), field);
            assert_eq!(err.user_message(), MSG_FILL_ALL_FIELDS);
        }
    }

    #[test]
    fn test_negative_amount_rejected() {
        let err = form("Refund", "-5", "Other", "2024-05-01").parse().unwrap_err();
        assert_eq!(err, ValidationError::NonPositiveAmount { amount: -5.0 });
        assert_eq!(err.user_message(), MSG_AMOUNT_POSITIVE);
    }

    #[test]
    fn test_zero_amount_rejected() {
        let err = form("Nothing", "0", "Other", "2024-05-01").parse().unwrap_err();
        assert!(matches!(err, ValidationError::NonPositiveAmount { .. }));
    }

    #[test]
    fn test_non_numeric_amount_rejected() {
        for raw in ["abc", "NaN", "inf"] {
            let err = form("X", raw, "Other", "2024-05-01").parse().unwrap_err();
            assert!(
                matches!(err, ValidationError::InvalidAmount { .. }),
                "{} should be invalid, got {:?}",
                raw,
                err
            );
        }
    }

    #[test]
    fn test_unknown_category_rejected() {
        let err = form("Flight", "900", "Travel", "2024-05-01").parse().unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownCategory {
                value: "Travel".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_date_rejected() {
        for raw in ["2024-02-30", "01/05/2024", "yesterday"] {
            let err = form("X", "1", "Other", raw).parse().unwrap_err();
            assert_eq!(err.field(), "date");
        }
    }

    #[test]
    fn test_amount_accepts_json_number_or_text() {
        let numeric: ExpenseForm = serde_json::from_str(
            r#"{"description":"Lunch","amount":250,"category":"Food","date":"2024-05-01"}"#,
        )
        .unwrap();
        let text: ExpenseForm = serde_json::from_str(
            r#"{"description":"Lunch","amount":"250","category":"Food","date":"2024-05-01"}"#,
        )
        .unwrap();

        assert_eq!(numeric.parse().unwrap(), text.parse().unwrap());
        assert_eq!(
            serde_json::from_str::<ExpenseForm>(r#"{"amount":12.5}"#).unwrap().amount,
            "12.5"
        );
    }

    #[test]
    fn test_with_date_presets_today() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let f = ExpenseForm::with_date(today);

        assert_eq!(f.date, "2024-05-01");
        assert!(f.description.is_empty());
        assert!(f.amount.is_empty());
    }

    #[test]
    fn test_reset_clears_fields() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        let mut f = form("Lunch", "250", "Food", "2024-05-01");
        f.reset(today);

        assert_eq!(f, ExpenseForm::with_date(today));
    }
}
