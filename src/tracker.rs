// 🧭 Expense Tracker - Composition root for one session
//
// Owns the ledger and the formatter, turns UI events into ledger calls and
// hands back a fresh view after each one. Front ends (TUI, web server) hold
// exactly one of these.

use crate::config::Settings;
use crate::expense::{ExpenseId, ExpenseRecord};
use crate::format::{Formatter, InvalidDateFormat};
use crate::ledger::{Ledger, Snapshot};
use crate::validation::{ExpenseForm, NewExpense, ValidationError};
use crate::view::ViewModel;
use tracing::{info, warn};

pub const CLEAR_CONFIRM_PROMPT: &str =
    "Are you sure you want to delete all expenses? This action cannot be undone.";
pub const NOTHING_TO_CLEAR_MESSAGE: &str = "No expenses to clear";

// ============================================================================
// CONFIRMATION
// ============================================================================

/// Asks the user before a destructive action
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// Ledger emptied; number of records removed
    Cleared(usize),
    /// User said no; nothing changed
    Declined,
    /// Ledger was already empty; the user was not asked
    NothingToClear,
}

impl ClearOutcome {
    /// Notification to show, if any
    pub fn message(&self) -> Option<&'static str> {
        match self {
            ClearOutcome::NothingToClear => Some(NOTHING_TO_CLEAR_MESSAGE),
            _ => None,
        }
    }
}

// ============================================================================
// TRACKER
// ============================================================================

#[derive(Debug, Default)]
pub struct ExpenseTracker {
    ledger: Ledger,
    formatter: Formatter,
}

impl ExpenseTracker {
    pub fn new(formatter: Formatter) -> Self {
        ExpenseTracker {
            ledger: Ledger::new(),
            formatter,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, InvalidDateFormat> {
        Ok(Self::new(Formatter::from_settings(settings)?))
    }

    /// Validate a submitted form and record it
    pub fn submit(&mut self, form: &ExpenseForm) -> Result<ExpenseRecord, ValidationError> {
        let parsed = form.parse().map_err(|e| {
            warn!(field = e.field(), error = %e, "expense form rejected");
            e
        })?;
        self.add(parsed)
    }

    pub fn add(&mut self, expense: NewExpense) -> Result<ExpenseRecord, ValidationError> {
        let record = self.ledger.add(
            &expense.description,
            expense.amount,
            expense.category,
            expense.date,
        )?;
        info!(id = %record.id(), count = self.ledger.len(), "expense recorded");
        Ok(record)
    }

    /// Delete one expense; `false` when the id is unknown
    pub fn delete(&mut self, id: ExpenseId) -> bool {
        let removed = self.ledger.remove_by_id(id);
        if removed {
            info!(id = %id, count = self.ledger.len(), "expense deleted");
        }
        removed
    }

    /// Clear everything after confirmation; never prompts when already empty
    pub fn clear_all<C: Confirm + ?Sized>(&mut self, confirm: &mut C) -> ClearOutcome {
        if self.ledger.is_empty() {
            return ClearOutcome::NothingToClear;
        }
        if !confirm.confirm(CLEAR_CONFIRM_PROMPT) {
            return ClearOutcome::Declined;
        }
        let removed = self.ledger.clear();
        info!(removed, "all expenses cleared");
        ClearOutcome::Cleared(removed)
    }

    /// Recompute every derived view from the current contents
    pub fn view(&self) -> ViewModel {
        ViewModel::build(&self.ledger.snapshot(), &self.formatter)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.ledger.snapshot()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }
}

// ============================================================================
// TESTS
// ============================================================================
