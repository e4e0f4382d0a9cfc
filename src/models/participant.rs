//! Participant and participant registry
//!
//! A participant is a person eligible to be charged for an expense. The
//! registry is the fixed, ordered set of known people for a deployment;
//! everything else in the crate selects participants out of it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A person eligible to be charged for an expense, identified by name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Participant(String);

impl Participant {
    /// Create a participant from a name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the participant's name
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Participant {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Participant {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// The fixed, ordered set of people eligible to be charged
///
/// Built once at construction and read-only afterwards. Iteration order is
/// the order the names were given in; duplicate names collapse to the first
/// occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRegistry {
    participants: Vec<Participant>,
}

impl ParticipantRegistry {
    /// Create a registry from an ordered list of names
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut participants: Vec<Participant> = Vec::new();
        for name in names {
            let participant = Participant::new(name);
            if !participants.contains(&participant) {
                participants.push(participant);
            }
        }
        Self { participants }
    }

    /// Check whether a participant belongs to the registry
    pub fn contains(&self, participant: &Participant) -> bool {
        self.participants.contains(participant)
    }

    /// Iterate over participants in registry order
    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    /// Number of registered participants
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}
