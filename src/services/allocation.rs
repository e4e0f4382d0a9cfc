//! Allocation engine
//!
//! Turns a pending expense draft into a finalized expense with validated
//! per-person shares, or rejects it with the first violated precondition.

use std::collections::BTreeMap;

use crate::error::ValidationError;
use crate::models::{
    FinalizedExpense, ManualEntryState, Money, Participant, PendingExpense, SplitMode,
};

/// Allocate a pending expense into per-person shares
///
/// Preconditions are checked in order and the first failure is returned:
/// the expense needs a name, a positive total, and at least one selected
/// participant. In equal mode the total is divided across the selection,
/// with leftover cents going to the earliest-selected people. In manual
/// mode the confirmed amounts are taken as-is; they must cover every
/// selected participant and add up to the total exactly.
pub fn allocate(pending: &PendingExpense) -> Result<FinalizedExpense, ValidationError> {
    if pending.name.trim().is_empty()
        || !pending.total_amount.is_positive()
        || pending.selected().is_empty()
    {
        return Err(ValidationError::IncompleteExpense);
    }

    let shares = match pending.split_mode() {
        SplitMode::Equal => split_equally(pending),
        SplitMode::Manual => confirmed_manual_shares(pending)?,
    };

    Ok(FinalizedExpense::new(
        pending.name.clone(),
        pending.category.clone(),
        pending.total_amount,
        pending.selected().to_vec(),
        shares,
    ))
}

fn split_equally(pending: &PendingExpense) -> BTreeMap<Participant, Money> {
    let shares = pending.total_amount.split_even(pending.selected().len());
    pending
        .selected()
        .iter()
        .cloned()
        .zip(shares)
        .collect()
}

fn confirmed_manual_shares(
    pending: &PendingExpense,
) -> Result<BTreeMap<Participant, Money>, ValidationError> {
    if pending.manual_entry() == ManualEntryState::Open {
        return Err(ValidationError::ManualEntryPending);
    }

    // A missing amount is never treated as zero; the split simply has not
    // been entered yet.
    let amounts = pending.manual_amounts();
    if pending.selected().iter().any(|p| !amounts.contains_key(p)) {
        return Err(ValidationError::ManualEntryPending);
    }

    let entered: Money = amounts.values().copied().sum();
    if entered != pending.total_amount {
        return Err(ValidationError::ManualSumMismatch {
            entered,
            expected: pending.total_amount,
        });
    }

    Ok(amounts.clone())
}
