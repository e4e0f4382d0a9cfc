//! Expense tracker
//!
//! The facade the presentation layer talks to. Owns the pending drafts, the
//! balance ledger, and the category history, and coordinates batch commits:
//! every draft is validated before anything is applied, so a batch either
//! fully commits or leaves all committed state untouched.

use std::collections::BTreeMap;

use crate::error::{SplitError, SplitResult, ValidationError};
use crate::models::{
    CategorySummary, Money, Participant, ParticipantRegistry, PendingExpense, SplitMode,
};
use crate::services::allocation::allocate;
use crate::services::consolidation::consolidate;
use crate::services::ledger::BalanceLedger;

/// A single-field update to one pending expense
#[derive(Debug, Clone, PartialEq)]
pub enum PendingPatch {
    /// Set the expense name
    Name(String),
    /// Set the expense category
    Category(String),
    /// Set the total amount
    TotalAmount(Money),
    /// Select or deselect one registered participant
    ToggleParticipant(Participant),
    /// Select everyone, or deselect everyone if all are selected
    SelectAll,
    /// Deselect everyone
    ClearSelection,
    /// Switch between equal and manual splitting
    SplitMode(SplitMode),
}

/// Records shared expenses for a fixed group and tracks who owes what
///
/// Single-threaded by construction: every mutation takes `&mut self`, so a
/// commit can never observe a draft mid-edit.
#[derive(Debug, Clone)]
pub struct ExpenseTracker {
    registry: ParticipantRegistry,
    pending: Vec<PendingExpense>,
    ledger: BalanceLedger,
    history: Vec<CategorySummary>,
}

impl ExpenseTracker {
    /// Create a tracker for a fixed group of participants
    ///
    /// Starts with one empty pending expense, an empty ledger, and empty
    /// history.
    pub fn new(registry: ParticipantRegistry) -> Self {
        Self {
            registry,
            pending: vec![PendingExpense::new()],
            ledger: BalanceLedger::new(),
            history: Vec::new(),
        }
    }

    /// The fixed participant registry
    pub fn registry(&self) -> &ParticipantRegistry {
        &self.registry
    }

    /// The pending expense drafts, for rendering entry forms
    pub fn pending(&self) -> &[PendingExpense] {
        &self.pending
    }

    /// Append a new empty pending expense
    pub fn add_pending_slot(&mut self) -> &PendingExpense {
        self.pending.push(PendingExpense::new());
        self.pending.last().expect("just pushed")
    }

    /// Apply a single-field update to one pending expense
    pub fn update_pending(
        &mut self,
        index: usize,
        patch: PendingPatch,
    ) -> SplitResult<&PendingExpense> {
        if let PendingPatch::ToggleParticipant(ref participant) = patch {
            if !self.registry.contains(participant) {
                return Err(SplitError::UnknownParticipant(
                    participant.name().to_string(),
                ));
            }
        }

        let registry = &self.registry;
        let draft = self
            .pending
            .get_mut(index)
            .ok_or(SplitError::PendingNotFound(index))?;

        match patch {
            PendingPatch::Name(name) => draft.name = name,
            PendingPatch::Category(category) => draft.category = category,
            PendingPatch::TotalAmount(amount) => draft.total_amount = amount,
            PendingPatch::ToggleParticipant(participant) => draft.toggle_participant(participant),
            PendingPatch::SelectAll => draft.select_all(registry),
            PendingPatch::ClearSelection => draft.clear_selection(),
            PendingPatch::SplitMode(mode) => draft.set_split_mode(mode),
        }

        Ok(&self.pending[index])
    }

    /// Open the manual-entry dialog for one pending expense
    pub fn open_manual_entry(&mut self, index: usize) -> SplitResult<()> {
        let draft = self
            .pending
            .get_mut(index)
            .ok_or(SplitError::PendingNotFound(index))?;
        draft
            .open_manual_entry()
            .map_err(|reason| SplitError::ManualEntry { index, reason })
    }

    /// Validate and save manual amounts for one pending expense
    pub fn confirm_manual_entry(
        &mut self,
        index: usize,
        amounts: BTreeMap<Participant, Money>,
    ) -> SplitResult<()> {
        let draft = self
            .pending
            .get_mut(index)
            .ok_or(SplitError::PendingNotFound(index))?;
        draft
            .confirm_manual_entry(amounts)
            .map_err(|reason| SplitError::ManualEntry { index, reason })
    }

    /// Close the manual-entry dialog for one pending expense, discarding edits
    pub fn cancel_manual_entry(&mut self, index: usize) -> SplitResult<()> {
        let draft = self
            .pending
            .get_mut(index)
            .ok_or(SplitError::PendingNotFound(index))?;
        draft
            .cancel_manual_entry()
            .map_err(|reason| SplitError::ManualEntry { index, reason })
    }

    /// Commit every pending expense as one all-or-nothing batch
    ///
    /// All drafts are allocated into a staging buffer first; the ledger and
    /// history are only touched once the whole batch has validated. On any
    /// failure the error names the offending draft and the pending list is
    /// left as-is for correction. On success the pending list resets to a
    /// single empty draft and the number of committed expenses is returned.
    pub fn commit_batch(&mut self) -> SplitResult<usize> {
        // An open dialog anywhere blocks the whole batch
        if let Some(index) = self.pending.iter().position(|d| d.manual_entry_open()) {
            return Err(SplitError::expense(index, ValidationError::ManualEntryPending));
        }

        let finalized = self
            .pending
            .iter()
            .enumerate()
            .map(|(index, draft)| {
                allocate(draft).map_err(|reason| SplitError::expense(index, reason))
            })
            .collect::<SplitResult<Vec<_>>>()?;

        let committed = finalized.len();
        self.history.extend(consolidate(&finalized));
        self.ledger.apply_all(&finalized);
        self.pending = vec![PendingExpense::new()];

        Ok(committed)
    }

    /// The running balances, reflecting only committed expenses
    pub fn ledger(&self) -> &BalanceLedger {
        &self.ledger
    }

    /// The committed category summaries, oldest batch first
    pub fn history(&self) -> &[CategorySummary] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ManualEntryError;

    fn test_tracker() -> ExpenseTracker {
        ExpenseTracker::new(ParticipantRegistry::new(["A", "B", "C"]))
    }

    fn p(name: &str) -> Participant {
        Participant::new(name)
    }

    fn fill_equal(tracker: &mut ExpenseTracker, index: usize, name: &str, category: &str, cents: i64, people: &[&str]) {
        tracker
            .update_pending(index, PendingPatch::Name(name.to_string()))
            .unwrap();
        tracker
            .update_pending(index, PendingPatch::Category(category.to_string()))
            .unwrap();
        tracker
            .update_pending(index, PendingPatch::TotalAmount(Money::from_cents(cents)))
            .unwrap();
        for person in people {
            tracker
                .update_pending(index, PendingPatch::ToggleParticipant(p(person)))
                .unwrap();
        }
    }

    fn fill_manual(
        tracker: &mut ExpenseTracker,
        index: usize,
        name: &str,
        category: &str,
        cents: i64,
        amounts: &[(&str, i64)],
    ) {
        fill_equal(
            tracker,
            index,
            name,
            category,
            cents,
            &amounts.iter().map(|(n, _)| *n).collect::<Vec<_>>(),
        );
        tracker
            .update_pending(index, PendingPatch::SplitMode(SplitMode::Manual))
            .unwrap();
        tracker.open_manual_entry(index).unwrap();
        tracker
            .confirm_manual_entry(
                index,
                amounts
                    .iter()
                    .map(|(n, c)| (p(n), Money::from_cents(*c)))
                    .collect(),
            )
            .unwrap();
    }

    #[test]
    fn test_starts_with_one_empty_draft() {
        let tracker = test_tracker();
        assert_eq!(tracker.pending().len(), 1);
        assert!(tracker.pending()[0].name.is_empty());
        assert!(tracker.ledger().is_empty());
        assert!(tracker.history().is_empty());
    }

    #[test]
    fn test_equal_dinner_scenario() {
        // "Dinner", Food, $30.00, {A, B, C}, equal split
        let mut tracker = test_tracker();
        fill_equal(&mut tracker, 0, "Dinner", "Food", 3000, &["A", "B", "C"]);

        assert_eq!(tracker.commit_batch(), Ok(1));

        for person in ["A", "B", "C"] {
            assert_eq!(
                tracker.ledger().balance_for(&p(person)),
                Money::from_cents(1000)
            );
        }
        assert_eq!(tracker.history().len(), 1);
        assert_eq!(tracker.history()[0].category, "Food");
    }

    #[test]
    fn test_manual_cab_scenario() {
        // "Cab", Travel, $50.00, manual {A: 20, B: 30}
        let mut tracker = test_tracker();
        fill_manual(&mut tracker, 0, "Cab", "Travel", 5000, &[("A", 2000), ("B", 3000)]);

        assert_eq!(tracker.commit_batch(), Ok(1));
        assert_eq!(tracker.ledger().balance_for(&p("A")), Money::from_cents(2000));
        assert_eq!(tracker.ledger().balance_for(&p("B")), Money::from_cents(3000));
        assert_eq!(tracker.ledger().balance_for(&p("C")), Money::zero());
    }

    #[test]
    fn test_manual_mismatch_blocks_commit_and_leaves_ledger_unchanged() {
        // $40.00 total but only $20.00 entered: amounts were confirmed for an
        // earlier total, then the total was edited upwards
        let mut tracker = test_tracker();
        fill_manual(&mut tracker, 0, "Cab", "Travel", 2000, &[("A", 1000), ("B", 1000)]);
        tracker
            .update_pending(0, PendingPatch::TotalAmount(Money::from_cents(4000)))
            .unwrap();

        let result = tracker.commit_batch();
        assert_eq!(
            result,
            Err(SplitError::Expense {
                index: 0,
                reason: ValidationError::ManualSumMismatch {
                    entered: Money::from_cents(2000),
                    expected: Money::from_cents(4000),
                },
            })
        );
        assert!(tracker.ledger().is_empty());
        assert!(tracker.history().is_empty());
        // Pending list is untouched for correction
        assert_eq!(tracker.pending()[0].name, "Cab");
    }

    #[test]
    fn test_same_category_in_one_batch_consolidates() {
        // One equal expense and one confirmed manual expense, both Food
        let mut tracker = test_tracker();
        fill_equal(&mut tracker, 0, "Lunch", "Food", 1000, &["A"]);
        tracker.add_pending_slot();
        fill_manual(&mut tracker, 1, "Snacks", "Food", 2000, &[("B", 2000)]);

        assert_eq!(tracker.commit_batch(), Ok(2));

        assert_eq!(tracker.history().len(), 1);
        let food = &tracker.history()[0];
        assert_eq!(food.total_amount, Money::from_cents(3000));
        assert_eq!(food.expenses.len(), 2);
        assert_eq!(food.money_due.get(&p("A")).copied(), Some(Money::from_cents(1000)));
        assert_eq!(food.money_due.get(&p("B")).copied(), Some(Money::from_cents(2000)));
    }

    #[test]
    fn test_batch_atomicity_one_bad_expense_aborts_all() {
        let mut tracker = test_tracker();
        fill_equal(&mut tracker, 0, "Lunch", "Food", 1000, &["A"]);
        tracker.add_pending_slot();
        // Second draft has no name
        fill_equal(&mut tracker, 1, "", "Food", 2000, &["B"]);

        let before_ledger = tracker.ledger().clone();
        let result = tracker.commit_batch();

        assert_eq!(
            result,
            Err(SplitError::Expense {
                index: 1,
                reason: ValidationError::IncompleteExpense,
            })
        );
        assert_eq!(tracker.ledger(), &before_ledger);
        assert!(tracker.history().is_empty());
        assert_eq!(tracker.pending().len(), 2);
    }

    #[test]
    fn test_open_dialog_blocks_whole_batch() {
        let mut tracker = test_tracker();
        fill_equal(&mut tracker, 0, "Lunch", "Food", 1000, &["A"]);
        tracker.add_pending_slot();
        fill_equal(&mut tracker, 1, "Cab", "Travel", 2000, &["B"]);
        tracker
            .update_pending(1, PendingPatch::SplitMode(SplitMode::Manual))
            .unwrap();
        tracker.open_manual_entry(1).unwrap();

        assert_eq!(
            tracker.commit_batch(),
            Err(SplitError::Expense {
                index: 1,
                reason: ValidationError::ManualEntryPending,
            })
        );
        assert!(tracker.ledger().is_empty());
    }

    #[test]
    fn test_commit_resets_pending_to_single_empty_draft() {
        let mut tracker = test_tracker();
        fill_equal(&mut tracker, 0, "Lunch", "Food", 1000, &["A"]);
        tracker.add_pending_slot();
        fill_equal(&mut tracker, 1, "Cab", "Travel", 2000, &["B"]);

        tracker.commit_batch().unwrap();

        assert_eq!(tracker.pending().len(), 1);
        let draft = &tracker.pending()[0];
        assert!(draft.name.is_empty());
        assert!(draft.category.is_empty());
        assert!(draft.total_amount.is_zero());
        assert!(draft.selected().is_empty());
    }

    #[test]
    fn test_same_category_across_batches_stays_separate_in_history() {
        let mut tracker = test_tracker();
        fill_equal(&mut tracker, 0, "Lunch", "Food", 1000, &["A"]);
        tracker.commit_batch().unwrap();

        fill_equal(&mut tracker, 0, "Dinner", "Food", 2000, &["A"]);
        tracker.commit_batch().unwrap();

        // Two separate Food entries, never merged
        assert_eq!(tracker.history().len(), 2);
        assert_eq!(tracker.history()[0].total_amount, Money::from_cents(1000));
        assert_eq!(tracker.history()[1].total_amount, Money::from_cents(2000));
        assert_eq!(tracker.ledger().balance_for(&p("A")), Money::from_cents(3000));
    }

    #[test]
    fn test_snapshots_are_idempotent() {
        let mut tracker = test_tracker();
        fill_equal(&mut tracker, 0, "Lunch", "Food", 1000, &["A"]);
        tracker.commit_batch().unwrap();

        let first = tracker.ledger().clone();
        let second = tracker.ledger().clone();
        assert_eq!(first, second);
        assert_eq!(tracker.history(), tracker.history());
    }

    #[test]
    fn test_unknown_participant_is_rejected() {
        let mut tracker = test_tracker();
        let result = tracker.update_pending(0, PendingPatch::ToggleParticipant(p("Nobody")));
        assert_eq!(
            result.err(),
            Some(SplitError::UnknownParticipant("Nobody".to_string()))
        );
    }

    #[test]
    fn test_missing_pending_index_is_rejected() {
        let mut tracker = test_tracker();
        assert_eq!(
            tracker
                .update_pending(5, PendingPatch::Name("x".to_string()))
                .err(),
            Some(SplitError::PendingNotFound(5))
        );
        assert_eq!(
            tracker.open_manual_entry(5).err(),
            Some(SplitError::PendingNotFound(5))
        );
    }

    #[test]
    fn test_manual_entry_errors_carry_index() {
        let mut tracker = test_tracker();
        // Equal mode: the dialog cannot be opened
        assert_eq!(
            tracker.open_manual_entry(0).err(),
            Some(SplitError::ManualEntry {
                index: 0,
                reason: ManualEntryError::NotManualMode,
            })
        );
        assert_eq!(
            tracker.cancel_manual_entry(0).err(),
            Some(SplitError::ManualEntry {
                index: 0,
                reason: ManualEntryError::NotOpen,
            })
        );
    }

    #[test]
    fn test_select_all_patch() {
        let mut tracker = test_tracker();
        tracker.update_pending(0, PendingPatch::SelectAll).unwrap();
        assert_eq!(tracker.pending()[0].selected().len(), 3);

        tracker
            .update_pending(0, PendingPatch::ClearSelection)
            .unwrap();
        assert!(tracker.pending()[0].selected().is_empty());
    }
}
