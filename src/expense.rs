// 💸 Expense Record - One recorded expense
//
// Records are created only by the ledger and never change afterwards.
// Fields are private so nothing outside the crate can build a record that
// skipped validation or edit one in place.

use crate::category::Category;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a record, derived from its creation timestamp (ms)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(pub u64);

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseRecord {
    id: ExpenseId,
    description: String,
    amount: f64,
    category: Category,
    date: NaiveDate,
}

impl ExpenseRecord {
    /// Only the ledger creates records, after checking the invariants
    pub(crate) fn new(
        id: ExpenseId,
        description: String,
        amount: f64,
        category: Category,
        date: NaiveDate,
    ) -> Self {
        ExpenseRecord {
            id,
            description,
            amount,
            category,
            date,
        }
    }

    pub fn id(&self) -> ExpenseId {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Always the current glyph for the record's category
    pub fn emoji(&self) -> &'static str {
        self.category.emoji()
    }
}
