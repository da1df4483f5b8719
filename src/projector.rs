// 📊 View Projector - Pure derivations over a ledger snapshot
//
// Three views, each recomputed from scratch on every change:
// 1. Summary: total, count, average
// 2. Category breakdown: one total per category (all eight, zeros included)
// 3. Display list: newest date first
//
// Nothing here mutates its input or keeps state between calls.

use crate::category::Category;
use crate::expense::ExpenseRecord;
use serde::Serialize;

// ============================================================================
// SUMMARY
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total: f64,
    pub count: usize,
    pub average: f64,
}

pub fn compute_summary(records: &[ExpenseRecord]) -> Summary {
    let total: f64 = records.iter().map(|r| r.amount()).sum();
    let count = records.len();
    let average = if count > 0 { total / count as f64 } else { 0.0 };

    Summary {
        total,
        count,
        average,
    }
}

// ============================================================================
// CATEGORY BREAKDOWN
// ============================================================================

/// Total per category, indexed in `Category::ALL` order
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CategoryBreakdown {
    totals: [f64; 8],
}

impl CategoryBreakdown {
    pub fn get(&self, category: Category) -> f64 {
        self.totals[category.index()]
    }

    /// Every category with its total, zeros included
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.iter().map(move |c| (*c, self.get(*c)))
    }

    /// Presentation filter: only categories that have spending
    pub fn non_zero(&self) -> Vec<(Category, f64)> {
        self.iter().filter(|(_, total)| *total > 0.0).collect()
    }
}

pub fn compute_category_breakdown(records: &[ExpenseRecord]) -> CategoryBreakdown {
    let mut breakdown = CategoryBreakdown::default();
    for record in records {
        breakdown.totals[record.category().index()] += record.amount();
    }
    breakdown
}

// ============================================================================
// DISPLAY LIST
// ============================================================================

/// Newest date first; records sharing a date keep insertion order
pub fn compute_display_list(records: &[ExpenseRecord]) -> Vec<ExpenseRecord> {
    let mut sorted = records.to_vec();
    // sort_by is stable
    sorted.sort_by(|a, b| b.date().cmp(&a.date()));
    sorted
}

// ============================================================================
// TESTS
// ============================================================================
