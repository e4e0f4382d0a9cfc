//! Category consolidator
//!
//! Groups the finalized expenses of one commit batch into per-category
//! summaries. Scoped to a single batch: prior history is never consulted,
//! so a category recurring across batches yields separate history entries.

use crate::models::{CategorySummary, FinalizedExpense};

/// Group a batch of finalized expenses by category
///
/// Output order is the order categories are first seen in the batch. Each
/// summary carries the member expenses in their original order, the summed
/// total, and the per-person subtotal within the category.
pub fn consolidate(finalized: &[FinalizedExpense]) -> Vec<CategorySummary> {
    let mut summaries: Vec<CategorySummary> = Vec::new();

    for expense in finalized {
        let position = summaries
            .iter()
            .position(|s| s.category == expense.category())
            .unwrap_or_else(|| {
                summaries.push(CategorySummary::new(expense.category()));
                summaries.len() - 1
            });
        summaries[position].push(expense.clone());
    }

    summaries
}
