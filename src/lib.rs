// Expense Tracker - Core Library
// Exposes all modules for use in the TUI, the web server, and tests

pub mod category;
pub mod config;
pub mod expense;
pub mod format;
pub mod ledger;
pub mod projector;
pub mod tracker;
pub mod validation;
pub mod view;

// Re-export commonly used types
pub use category::{Category, UnknownCategory};
pub use config::{load_settings, Settings};
pub use expense::{ExpenseId, ExpenseRecord};
pub use format::{Formatter, InvalidDateFormat};
pub use ledger::{Ledger, Snapshot};
pub use projector::{
    compute_category_breakdown, compute_display_list, compute_summary,
    CategoryBreakdown, Summary,
};
pub use tracker::{ClearOutcome, Confirm, ExpenseTracker};
pub use validation::{ExpenseForm, NewExpense, ValidationError};
pub use view::{render_text, CategoryCard, ExpenseItem, SummaryView, ViewModel};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
