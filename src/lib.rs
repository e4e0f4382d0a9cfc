//! split-ledger - Shared-expense splitting and balance tracking engine
//!
//! This library lets a fixed group of people record shared expenses, split
//! each expense's cost among a chosen subset of participants (evenly or by
//! manually entered per-person amounts), and track running balances plus a
//! history of committed expenses grouped by category.
//!
//! Presentation, persistence, and transport are external collaborators: the
//! entry form edits pending drafts through [`services::ExpenseTracker`], and
//! the engine hands back read-only snapshots of committed state.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `error`: Custom error types
//! - `models`: Core data models (participants, expenses, money, summaries)
//! - `services`: Business logic layer (allocation, consolidation, ledger,
//!   commit coordination)
//!
//! # Example
//!
//! ```
//! use split_ledger::models::{Money, Participant, ParticipantRegistry};
//! use split_ledger::services::{ExpenseTracker, PendingPatch};
//!
//! let registry = ParticipantRegistry::new(["Ana", "Ben", "Cal"]);
//! let mut tracker = ExpenseTracker::new(registry);
//!
//! tracker.update_pending(0, PendingPatch::Name("Dinner".into()))?;
//! tracker.update_pending(0, PendingPatch::Category("Food".into()))?;
//! tracker.update_pending(0, PendingPatch::TotalAmount(Money::from_cents(3000)))?;
//! tracker.update_pending(0, PendingPatch::SelectAll)?;
//! tracker.commit_batch()?;
//!
//! let ana = Participant::new("Ana");
//! assert_eq!(tracker.ledger().balance_for(&ana), Money::from_cents(1000));
//! # Ok::<(), split_ledger::SplitError>(())
//! ```

pub mod error;
pub mod models;
pub mod services;

pub use error::{SplitError, SplitResult, ValidationError};
