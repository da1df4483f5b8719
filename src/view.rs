// 🖼️ View Model - Render-ready projection of a snapshot
//
// Combines the three projector outputs with presentation formatting.
// Renderers (TUI, browser page, text report) consume this and nothing else.

use crate::expense::{ExpenseId, ExpenseRecord};
use crate::format::Formatter;
use crate::projector::{compute_category_breakdown, compute_display_list, compute_summary};
use serde::Serialize;
use std::fmt::Write;

pub const EMPTY_BREAKDOWN_MESSAGE: &str = "No expenses yet. Add one to get started!";
pub const EMPTY_LIST_MESSAGE: &str = "No expenses recorded yet";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryView {
    pub total: String,
    pub count: usize,
    pub average: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCard {
    pub category: String,
    pub emoji: String,
    pub total: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseItem {
    pub id: ExpenseId,
    pub emoji: String,
    pub description: String,
    pub category: String,
    pub date: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub summary: SummaryView,
    /// Only categories with a non-zero total
    pub categories: Vec<CategoryCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories_empty_message: Option<String>,
    /// Newest first
    pub expenses: Vec<ExpenseItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expenses_empty_message: Option<String>,
}

impl ViewModel {
    /// Full recomputation from `records` (insertion order)
    pub fn build(records: &[ExpenseRecord], fmt: &Formatter) -> Self {
        let summary = compute_summary(records);
        let breakdown = compute_category_breakdown(records);
        let display = compute_display_list(records);

        let categories = breakdown
            .non_zero()
            .into_iter()
            .map(|(category, total)| CategoryCard {
                category: category.as_str().to_string(),
                emoji: category.emoji().to_string(),
                total: fmt.money(total),
            })
            .collect();

        let expenses = display
            .iter()
            .map(|r| ExpenseItem {
                id: r.id(),
                emoji: r.emoji().to_string(),
                description: r.description().to_string(),
                category: r.category().as_str().to_string(),
                date: fmt.date(r.date()),
                amount: fmt.money(r.amount()),
            })
            .collect();

        let empty = records.is_empty();

        ViewModel {
            summary: SummaryView {
                total: fmt.money(summary.total),
                count: summary.count,
                average: fmt.money(summary.average),
            },
            categories,
            categories_empty_message: empty.then(|| EMPTY_BREAKDOWN_MESSAGE.to_string()),
            expenses,
            expenses_empty_message: empty.then(|| EMPTY_LIST_MESSAGE.to_string()),
        }
    }
}

/// Plain-text report of a view, used by the `demo` command
pub fn render_text(view: &ViewModel) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Total: {}  |  Expenses: {}  |  Average: {}",
        view.summary.total, view.summary.count, view.summary.average
    );

    out.push_str("\nBy category\n");
    match &view.categories_empty_message {
        Some(msg) => {
            let _ = writeln!(out, "  {}", msg);
        }
        None => {
            for card in &view.categories {
                let _ = writeln!(out, "  {} {:<14} {:>12}", card.emoji, card.category, card.total);
            }
        }
    }

    out.push_str("\nExpenses\n");
    match &view.expenses_empty_message {
        Some(msg) => {
            let _ = writeln!(out, "  {}", msg);
        }
        None => {
            for item in &view.expenses {
                let _ = writeln!(
                    out,
                    "  [{}] {} {} ({} • {}) {}",
                    item.id, item.emoji, item.description, item.category, item.date, item.amount
                );
            }
        }
    }

    out
}

// ============================================================================
// TESTS
// ============================================================================
