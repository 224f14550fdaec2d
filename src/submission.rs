// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Turning user input into a [`NewTransaction`].

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::DraftError;
use crate::models::{NewTransaction, TransactionType};

/// Raw form input for a new transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    pub amount: String,
    pub kind: TransactionType,
    pub category: String,
    /// `YYYY-MM-DD`; today when absent.
    pub date: Option<String>,
    pub notes: String,
}

impl TransactionDraft {
    pub fn new(kind: TransactionType) -> Self {
        Self {
            amount: String::new(),
            kind,
            category: String::new(),
            date: None,
            notes: String::new(),
        }
    }

    pub fn validate(&self, today: NaiveDate) -> Result<NewTransaction, DraftError> {
        let amount_raw = self.amount.trim();
        if amount_raw.is_empty() {
            return Err(DraftError::MissingAmount);
        }
        let category = self.category.trim();
        if category.is_empty() {
            return Err(DraftError::MissingCategory);
        }
        let amount = amount_raw
            .parse::<Decimal>()
            .map_err(|_| DraftError::InvalidAmount(amount_raw.to_string()))?;
        if amount.is_sign_negative() {
            return Err(DraftError::InvalidAmount(amount_raw.to_string()));
        }
        let date = match self.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
                .map_err(|_| DraftError::InvalidDate(d.to_string()))?,
            None => today,
        };
        let notes = self.notes.trim();
        Ok(NewTransaction {
            amount,
            kind: self.kind,
            category: category.to_string(),
            date: date.to_string(),
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        })
    }
}

/// Keep only digits and decimal points, as the amount field does while typing.
pub fn sanitize_amount_input(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn draft(amount: &str, category: &str) -> TransactionDraft {
        TransactionDraft {
            amount: amount.into(),
            category: category.into(),
            ..TransactionDraft::new(TransactionType::Expense)
        }
    }

    #[test]
    fn amount_and_category_are_required() {
        assert_eq!(draft("", "Food").validate(today()), Err(DraftError::MissingAmount));
        assert_eq!(draft("12", " ").validate(today()), Err(DraftError::MissingCategory));
    }

    #[test]
    fn defaults_date_and_drops_blank_notes() {
        let tx = draft("12.50", "Food").validate(today()).unwrap();
        assert_eq!(tx.date, "2024-03-15");
        assert_eq!(tx.amount, Decimal::new(1250, 2));
        assert_eq!(tx.notes, None);
    }

    #[test]
    fn explicit_date_and_notes_are_kept() {
        let mut d = draft("40", "Salary");
        d.kind = TransactionType::Income;
        d.date = Some("2024-02-29".into());
        d.notes = "  bonus ".into();
        let tx = d.validate(today()).unwrap();
        assert_eq!(tx.date, "2024-02-29");
        assert_eq!(tx.notes.as_deref(), Some("bonus"));
        assert_eq!(tx.kind, TransactionType::Income);
    }

    #[test]
    fn unparseable_input_is_rejected() {
        assert_eq!(
            draft("1.2.3", "Food").validate(today()),
            Err(DraftError::InvalidAmount("1.2.3".into()))
        );
        let mut d = draft("5", "Food");
        d.date = Some("2023-02-29".into());
        assert_eq!(d.validate(today()), Err(DraftError::InvalidDate("2023-02-29".into())));
    }

    #[test]
    fn sanitize_strips_everything_but_digits_and_dots() {
        assert_eq!(sanitize_amount_input("₹1,234.50"), "1234.50");
        assert_eq!(sanitize_amount_input("-12a"), "12");
    }
}
