//! Custom error types for split-ledger
//!
//! This module defines the error hierarchy for the engine using thiserror
//! for ergonomic error definitions. All errors are recoverable-by-user
//! validation failures; nothing here is fatal to the process.

use thiserror::Error;

use crate::models::{ManualEntryError, Money};

/// Why a single pending expense failed validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Missing name, non-positive total, or no selected participants
    #[error("Please enter all expense details, select people, and assign an amount")]
    IncompleteExpense,

    /// Manual amounts do not add up to the expense total
    #[error("Total entered amount ({entered}) does not match the total expense amount ({expected})")]
    ManualSumMismatch { entered: Money, expected: Money },

    /// The manual split has not been confirmed for every selected person
    #[error("Please complete manual entry before adding expenses")]
    ManualEntryPending,
}

/// The main error type for split-ledger operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SplitError {
    /// A pending expense failed validation during a batch commit
    #[error("Expense {index}: {reason}")]
    Expense {
        /// Position of the failing expense in the pending list
        index: usize,
        /// Why it failed
        reason: ValidationError,
    },

    /// No pending expense exists at the given index
    #[error("No pending expense at index {0}")]
    PendingNotFound(usize),

    /// A selection named someone outside the participant registry
    #[error("Unknown participant: {0}")]
    UnknownParticipant(String),

    /// A manual-entry dialog operation was rejected
    #[error("Expense {index}: {reason}")]
    ManualEntry {
        /// Position of the expense in the pending list
        index: usize,
        /// Why the dialog operation failed
        reason: ManualEntryError,
    },
}

impl SplitError {
    /// Wrap a per-expense validation failure with its pending-list index
    pub(crate) fn expense(index: usize, reason: ValidationError) -> Self {
        Self::Expense { index, reason }
    }

    /// Check if this is a validation error for a specific expense
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Expense { .. })
    }
}

/// Result type alias for split-ledger operations
pub type SplitResult<T> = Result<T, SplitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_expense_display() {
        let err = ValidationError::IncompleteExpense;
        assert_eq!(
            err.to_string(),
            "Please enter all expense details, select people, and assign an amount"
        );
    }

    #[test]
    fn test_manual_sum_mismatch_display() {
        let err = ValidationError::ManualSumMismatch {
            entered: Money::from_cents(2000),
            expected: Money::from_cents(4000),
        };
        assert_eq!(
            err.to_string(),
            "Total entered amount ($20.00) does not match the total expense amount ($40.00)"
        );
    }

    #[test]
    fn test_expense_error_carries_index() {
        let err = SplitError::expense(2, ValidationError::ManualEntryPending);
        assert_eq!(
            err.to_string(),
            "Expense 2: Please complete manual entry before adding expenses"
        );
        assert!(err.is_validation());
        assert!(!SplitError::PendingNotFound(0).is_validation());
    }
}
