//! Pending and finalized expense models
//!
//! A `PendingExpense` is the mutable draft the entry form edits; a
//! `FinalizedExpense` is the immutable result of allocating one. Keeping them
//! as distinct types means an incomplete draft can never reach the ledger.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::money::Money;
use super::participant::{Participant, ParticipantRegistry};

/// How an expense's total is divided among the selected participants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    /// Every selected participant owes an equal share
    #[default]
    Equal,
    /// Per-person amounts are entered by hand and must sum to the total
    Manual,
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal => write!(f, "Equally"),
            Self::Manual => write!(f, "Manually"),
        }
    }
}

/// State of the manual-amount entry dialog for one pending expense
///
/// Each draft carries its own state, so editing one expense's amounts can
/// never leak into another. A batch commit refuses to run while any dialog
/// is `Open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ManualEntryState {
    /// No manual entry in progress
    #[default]
    Closed,
    /// The dialog is open and amounts are being edited
    Open,
    /// Amounts were validated and saved
    Confirmed,
}

/// Errors from driving the manual-entry dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManualEntryError {
    /// Manual entry only applies to expenses in manual split mode
    NotManualMode,
    /// Confirm or cancel was requested without an open dialog
    NotOpen,
    /// The entered amounts do not cover exactly the selected participants
    IncompleteAmounts,
    /// The entered amounts do not add up to the expense total
    SumMismatch { entered: Money, expected: Money },
}

impl fmt::Display for ManualEntryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotManualMode => {
                write!(f, "Manual amounts can only be entered in manual split mode")
            }
            Self::NotOpen => write!(f, "No manual entry is in progress"),
            Self::IncompleteAmounts => {
                write!(f, "An amount must be entered for every selected person")
            }
            Self::SumMismatch { entered, expected } => write!(
                f,
                "Total entered amount ({}) does not match the total expense amount ({})",
                entered, expected
            ),
        }
    }
}

impl std::error::Error for ManualEntryError {}

/// An in-progress expense draft, edited field-by-field by the entry form
///
/// The selection and manual amounts are kept behind methods so the invariant
/// "manual amounts are keyed by selected participants only" always holds:
/// deselecting a person drops their amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PendingExpense {
    /// Expense name, as typed into the form
    #[serde(default)]
    pub name: String,

    /// Expense category, as typed into the form
    #[serde(default)]
    pub category: String,

    /// Total amount of the expense; must be positive to commit
    #[serde(default)]
    pub total_amount: Money,

    /// Selected participants, in selection order
    selected: Vec<Participant>,

    /// Split mode; equal by default
    split_mode: SplitMode,

    /// Confirmed per-person amounts; only populated in manual mode
    manual_amounts: BTreeMap<Participant, Money>,

    /// Manual-entry dialog state
    manual_entry: ManualEntryState,
}

impl PendingExpense {
    /// Create a new empty draft
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected participants, in selection order
    pub fn selected(&self) -> &[Participant] {
        &self.selected
    }

    /// Check whether a participant is currently selected
    pub fn is_selected(&self, participant: &Participant) -> bool {
        self.selected.contains(participant)
    }

    /// Toggle a participant in or out of the selection
    ///
    /// Deselecting removes the participant's manual amount, if any.
    pub fn toggle_participant(&mut self, participant: Participant) {
        if let Some(pos) = self.selected.iter().position(|p| *p == participant) {
            self.selected.remove(pos);
            self.manual_amounts.remove(&participant);
        } else {
            self.selected.push(participant);
        }
    }

    /// Select every registered participant, or deselect everyone if all are
    /// already selected (the "Select All" button toggles)
    pub fn select_all(&mut self, registry: &ParticipantRegistry) {
        if self.selected.len() == registry.len() {
            self.clear_selection();
        } else {
            self.selected = registry.iter().cloned().collect();
        }
    }

    /// Deselect everyone and drop all manual amounts
    pub fn clear_selection(&mut self) {
        self.selected.clear();
        self.manual_amounts.clear();
    }

    /// The current split mode
    pub fn split_mode(&self) -> SplitMode {
        self.split_mode
    }

    /// Change the split mode
    ///
    /// Switching back to equal split discards confirmed manual amounts and
    /// closes the dialog; they have no meaning outside manual mode.
    pub fn set_split_mode(&mut self, mode: SplitMode) {
        if self.split_mode == SplitMode::Manual && mode == SplitMode::Equal {
            self.manual_amounts.clear();
            self.manual_entry = ManualEntryState::Closed;
        }
        self.split_mode = mode;
    }

    /// Confirmed per-person manual amounts
    pub fn manual_amounts(&self) -> &BTreeMap<Participant, Money> {
        &self.manual_amounts
    }

    /// Current state of the manual-entry dialog
    pub fn manual_entry(&self) -> ManualEntryState {
        self.manual_entry
    }

    /// Check whether the manual-entry dialog is open
    pub fn manual_entry_open(&self) -> bool {
        self.manual_entry == ManualEntryState::Open
    }

    /// Open the manual-entry dialog
    pub fn open_manual_entry(&mut self) -> Result<(), ManualEntryError> {
        if self.split_mode != SplitMode::Manual {
            return Err(ManualEntryError::NotManualMode);
        }
        self.manual_entry = ManualEntryState::Open;
        Ok(())
    }

    /// Validate and save the amounts edited in the open dialog
    ///
    /// The amounts must cover exactly the selected participants and add up
    /// to the expense total. On failure nothing is saved and the dialog
    /// stays open so the user can correct the entries.
    pub fn confirm_manual_entry(
        &mut self,
        amounts: BTreeMap<Participant, Money>,
    ) -> Result<(), ManualEntryError> {
        if self.manual_entry != ManualEntryState::Open {
            return Err(ManualEntryError::NotOpen);
        }

        let covers_selection = self.selected.iter().all(|p| amounts.contains_key(p));
        if !covers_selection || amounts.len() != self.selected.len() {
            return Err(ManualEntryError::IncompleteAmounts);
        }

        let entered: Money = amounts.values().copied().sum();
        if entered != self.total_amount {
            return Err(ManualEntryError::SumMismatch {
                entered,
                expected: self.total_amount,
            });
        }

        self.manual_amounts = amounts;
        self.manual_entry = ManualEntryState::Confirmed;
        Ok(())
    }

    /// Close the dialog, discarding any edits
    ///
    /// The previously confirmed amounts, if any, remain in place.
    pub fn cancel_manual_entry(&mut self) -> Result<(), ManualEntryError> {
        if self.manual_entry != ManualEntryState::Open {
            return Err(ManualEntryError::NotOpen);
        }
        self.manual_entry = if self.manual_amounts.is_empty() {
            ManualEntryState::Closed
        } else {
            ManualEntryState::Confirmed
        };
        Ok(())
    }
}

/// An expense whose per-person shares have been computed and validated
///
/// Created only by the allocation engine, so every instance satisfies the
/// invariant that its shares cover exactly the selected participants and sum
/// to the total. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalizedExpense {
    name: String,
    category: String,
    total_amount: Money,
    participants: Vec<Participant>,
    shares: BTreeMap<Participant, Money>,
}

impl FinalizedExpense {
    pub(crate) fn new(
        name: String,
        category: String,
        total_amount: Money,
        participants: Vec<Participant>,
        shares: BTreeMap<Participant, Money>,
    ) -> Self {
        debug_assert_eq!(
            shares.values().copied().sum::<Money>(),
            total_amount,
            "shares must sum to the expense total"
        );
        debug_assert_eq!(shares.len(), participants.len());
        Self {
            name,
            category,
            total_amount,
            participants,
            shares,
        }
    }

    /// Expense name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Expense category
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Total amount of the expense
    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    /// Charged participants, in selection order
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Per-person shares
    pub fn shares(&self) -> &BTreeMap<Participant, Money> {
        &self.shares
    }

    /// The share owed by one participant, if they were charged
    pub fn share_for(&self, participant: &Participant) -> Option<Money> {
        self.shares.get(participant).copied()
    }
}

impl fmt::Display for FinalizedExpense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} across {} people",
            self.name,
            self.total_amount,
            self.participants.len()
        )
    }
}
