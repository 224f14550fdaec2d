// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The one place category names are enumerated.
//!
//! The submission form and the trends filter both read from here. The
//! aggregator never does: it compares categories as opaque strings.

use crate::models::TransactionType;
use serde::{Serialize, Serializer};
use std::fmt;

/// Sentinel accepted wherever a category filter is parsed.
pub const ALL: &str = "All";

const EXPENSE_CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Shopping",
    "Bills",
    "Entertainment",
    "Health",
    "Other",
];

const INCOME_CATEGORIES: &[&str] = &["Salary", "Freelance", "Investments", "Gifts", "Other"];

/// Ordered category names offered for a transaction type.
pub fn categories_by_type(kind: TransactionType) -> &'static [&'static str] {
    match kind {
        TransactionType::Expense => EXPENSE_CATEGORIES,
        TransactionType::Income => INCOME_CATEGORIES,
    }
}

/// Filter choices for a type: the `All` sentinel followed by its categories.
pub fn filter_choices(kind: TransactionType) -> Vec<CategoryFilter> {
    std::iter::once(CategoryFilter::All)
        .chain(
            categories_by_type(kind)
                .iter()
                .map(|c| CategoryFilter::Only((*c).to_string())),
        )
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Parse user input; blank input and any casing of `All` select everything.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(ALL) {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(s.to_string())
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => c == category,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL),
            CategoryFilter::Only(c) => f.write_str(c),
        }
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumeration_is_ordered_per_type() {
        assert_eq!(categories_by_type(TransactionType::Expense)[0], "Food");
        assert_eq!(categories_by_type(TransactionType::Expense).len(), 7);
        assert_eq!(
            categories_by_type(TransactionType::Income),
            &["Salary", "Freelance", "Investments", "Gifts", "Other"]
        );
    }

    #[test]
    fn filter_choices_lead_with_all() {
        let choices = filter_choices(TransactionType::Expense);
        assert_eq!(choices[0], CategoryFilter::All);
        assert_eq!(choices.len(), 8);
        assert_eq!(choices[1].to_string(), "Food");
    }

    #[test]
    fn parse_treats_all_and_blank_as_sentinel() {
        assert!(CategoryFilter::parse("All").is_all());
        assert!(CategoryFilter::parse("all").is_all());
        assert!(CategoryFilter::parse("  ").is_all());
        assert_eq!(
            CategoryFilter::parse(" Food "),
            CategoryFilter::Only("Food".into())
        );
    }

    #[test]
    fn only_matches_exact_category() {
        let f = CategoryFilter::Only("Food".into());
        assert!(f.matches("Food"));
        assert!(!f.matches("food"));
        assert!(CategoryFilter::All.matches("anything"));
    }
}
