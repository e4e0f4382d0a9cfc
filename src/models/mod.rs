//! Core data models for split-ledger
//!
//! This module contains the data structures that represent the expense
//! splitting domain: participants, pending and finalized expenses, money,
//! and category summaries.

pub mod expense;
pub mod money;
pub mod participant;
pub mod summary;

pub use expense::{
    FinalizedExpense, ManualEntryError, ManualEntryState, PendingExpense, SplitMode,
};
pub use money::Money;
pub use participant::{Participant, ParticipantRegistry};
pub use summary::CategorySummary;
