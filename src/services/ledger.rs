//! Balance ledger
//!
//! Tracks the cumulative amount each participant owes across all committed
//! expenses. Balances only ever accumulate: the engine tracks gross amounts
//! owed, not pairwise debts, and offers no settlement operation.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{FinalizedExpense, Money, Participant};

/// Cumulative per-participant amount owed
///
/// A participant with no committed expenses owes zero; they simply have no
/// entry yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BalanceLedger {
    balances: BTreeMap<Participant, Money>,
}

impl BalanceLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one finalized expense's shares to the running balances
    pub fn apply(&mut self, expense: &FinalizedExpense) {
        for (participant, share) in expense.shares() {
            *self
                .balances
                .entry(participant.clone())
                .or_insert_with(Money::zero) += *share;
        }
    }

    /// Add a whole batch of finalized expenses
    pub fn apply_all(&mut self, expenses: &[FinalizedExpense]) {
        for expense in expenses {
            self.apply(expense);
        }
    }

    /// The amount a participant currently owes (zero if never charged)
    pub fn balance_for(&self, participant: &Participant) -> Money {
        self.balances
            .get(participant)
            .copied()
            .unwrap_or_else(Money::zero)
    }

    /// Iterate over all non-absent balances
    pub fn balances(&self) -> impl Iterator<Item = (&Participant, Money)> {
        self.balances.iter().map(|(p, m)| (p, *m))
    }

    /// Check whether anything has been committed yet
    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn expense(people: &[(&str, i64)]) -> FinalizedExpense {
        let participants: Vec<Participant> =
            people.iter().map(|(n, _)| Participant::new(*n)).collect();
        let shares: BTreeMap<Participant, Money> = people
            .iter()
            .map(|(n, c)| (Participant::new(*n), Money::from_cents(*c)))
            .collect();
        let total: Money = shares.values().copied().sum();
        FinalizedExpense::new(
            "Dinner".to_string(),
            "Food".to_string(),
            total,
            participants,
            shares,
        )
    }

    #[test]
    fn test_new_ledger_is_empty() {
        let ledger = BalanceLedger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.balance_for(&Participant::new("A")), Money::zero());
    }

    #[test]
    fn test_apply_accumulates_across_expenses() {
        let mut ledger = BalanceLedger::new();
        ledger.apply(&expense(&[("A", 1000), ("B", 2000)]));
        ledger.apply(&expense(&[("A", 500)]));

        assert_eq!(
            ledger.balance_for(&Participant::new("A")),
            Money::from_cents(1500)
        );
        assert_eq!(
            ledger.balance_for(&Participant::new("B")),
            Money::from_cents(2000)
        );
    }

    #[test]
    fn test_apply_all() {
        let mut ledger = BalanceLedger::new();
        ledger.apply_all(&[
            expense(&[("A", 1000)]),
            expense(&[("A", 1000), ("C", 3000)]),
        ]);

        assert_eq!(
            ledger.balance_for(&Participant::new("A")),
            Money::from_cents(2000)
        );
        assert_eq!(
            ledger.balance_for(&Participant::new("C")),
            Money::from_cents(3000)
        );
    }

    #[test]
    fn test_balances_iterates_in_stable_order() {
        let mut ledger = BalanceLedger::new();
        ledger.apply(&expense(&[("B", 100), ("A", 200)]));

        let names: Vec<&str> = ledger.balances().map(|(p, _)| p.name()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }
}
