// 🏷️ Category - The closed set of expense categories
//
// Every expense belongs to exactly one of eight categories. The glyph shown
// next to a category is a pure function of the category, so it can never
// drift out of sync with the record that carries it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// CATEGORY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Entertainment,
    Shopping,
    Utilities,
    Health,
    Education,
    Other,
}

impl Category {
    /// All categories, in display order
    pub const ALL: [Category; 8] = [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Shopping,
        Category::Utilities,
        Category::Health,
        Category::Education,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Utilities => "Utilities",
            Category::Health => "Health",
            Category::Education => "Education",
            Category::Other => "Other",
        }
    }

    /// Display glyph for the category
    pub fn emoji(&self) -> &'static str {
        match self {
            Category::Food => "🍔",
            Category::Transport => "🚗",
            Category::Entertainment => "🎬",
            Category::Shopping => "🛍️",
            Category::Utilities => "💡",
            Category::Health => "💊",
            Category::Education => "📚",
            Category::Other => "📦",
        }
    }

    /// Position in `Category::ALL`
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Next category, wrapping around (used by the TUI picker)
    pub fn next(&self) -> Self {
        Category::ALL[(self.index() + 1) % Category::ALL.len()]
    }

    /// Previous category, wrapping around
    pub fn previous(&self) -> Self {
        let len = Category::ALL.len();
        Category::ALL[(self.index() + len - 1) % len]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category '{}'", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Case-insensitive match on the category label
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_has_eight_distinct_categories() {
        let unique: HashSet<Category> = Category::ALL.iter().copied().collect();
        assert_eq!(unique.len(), 8);
    }

    #[test]
    fn test_index_matches_position_in_all() {
        for (i, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }

    #[test]
    fn test_every_category_has_a_glyph() {
        for category in Category::ALL {
            assert!(!category.emoji().is_empty(), "{} has no glyph", category);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("food".parse::<Category>().unwrap(), Category::Food);
        assert_eq!(" Transport ".parse::<Category>().unwrap(), Category::Transport);
        assert_eq!("EDUCATION".parse::<Category>().unwrap(), Category::Education);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "Travel".parse::<Category>().unwrap_err();
        assert_eq!(err, UnknownCategory("Travel".to_string()));
    }

    #[test]
    fn test_next_and_previous_wrap() {
        assert_eq!(Category::Other.next(), Category::Food);
        assert_eq!(Category::Food.previous(), Category::Other);
        assert_eq!(Category::Food.next().previous(), Category::Food);
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(Category::Health.to_string(), "Health");
    }
}
