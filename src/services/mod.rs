//! Service layer for split-ledger
//!
//! The service layer provides the engine's business logic on top of the
//! models: allocating drafts into per-person shares, consolidating batches
//! by category, accumulating balances, and coordinating atomic commits.

pub mod allocation;
pub mod consolidation;
pub mod ledger;
pub mod tracker;

pub use allocation::allocate;
pub use consolidation::consolidate;
pub use ledger::BalanceLedger;
pub use tracker::{ExpenseTracker, PendingPatch};
