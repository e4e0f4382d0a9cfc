//! Category summary model
//!
//! Aggregates the expenses of one category within a single commit batch.
//! Summaries from different batches are separate history entries even when
//! they share a category; history is append-only and never merged.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use super::expense::FinalizedExpense;
use super::money::Money;
use super::participant::Participant;

/// Aggregate of all expenses sharing a category within one commit batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    /// The shared category
    pub category: String,

    /// Sum of the member expenses' totals
    pub total_amount: Money,

    /// Member expenses, in the order they were committed
    pub expenses: Vec<FinalizedExpense>,

    /// Per-person subtotal across the member expenses
    pub money_due: BTreeMap<Participant, Money>,

    /// When the batch containing this summary was committed
    pub committed_at: DateTime<Utc>,
}

impl CategorySummary {
    /// Create an empty summary for a category
    pub(crate) fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            total_amount: Money::zero(),
            expenses: Vec::new(),
            money_due: BTreeMap::new(),
            committed_at: Utc::now(),
        }
    }

    /// Fold one expense into the summary
    pub(crate) fn push(&mut self, expense: FinalizedExpense) {
        self.total_amount += expense.total_amount();
        for (participant, share) in expense.shares() {
            *self
                .money_due
                .entry(participant.clone())
                .or_insert_with(Money::zero) += *share;
        }
        self.expenses.push(expense);
    }
}
