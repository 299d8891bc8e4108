// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The pick selection buffer.
//!
//! The buffer is the client's working set of candidate picks before
//! submission. It is keyed by `(event_id, bet_type)` so a card can never hold
//! two picks on the same market, and it enforces the pick ceiling counting
//! any locked picks already on the card.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::pick::{PickKey, PickSelection};
use crate::types::CardRules;

/// The effect of a `select` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectOutcome {
    /// A new key was added.
    Added,
    /// An existing key now holds a different pick.
    Replaced,
    /// The identical pick was already present.
    Unchanged,
}

/// The effect of a `toggle` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleOutcome {
    /// A new key was added.
    Added,
    /// An existing key now holds a different pick.
    Replaced,
    /// The identical pick was present and has been removed.
    Removed,
}

/// Candidate picks keyed by event and bet type.
///
/// Serializes as a JSON array of picks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<PickSelection>", into = "Vec<PickSelection>")]
pub struct SelectionBuffer {
    picks: BTreeMap<PickKey, PickSelection>,
}

impl SelectionBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            picks: BTreeMap::new(),
        }
    }

    /// Places a pick in the buffer.
    ///
    /// # Arguments
    ///
    /// * `pick` - The candidate pick
    /// * `locked_count` - Number of locked picks already on the card
    /// * `rules` - The card rules in force
    ///
    /// # Returns
    ///
    /// * `Unchanged` if the identical pick is already held
    /// * `Replaced` if the key held a different pick
    /// * `Added` if the key was new
    ///
    /// # Errors
    ///
    /// Returns `PickLimitExceeded` if the key is new and the buffer plus the
    /// locked picks already fill the card. The buffer is left unchanged.
    pub fn select(
        &mut self,
        pick: PickSelection,
        locked_count: usize,
        rules: &CardRules,
    ) -> Result<SelectOutcome, DomainError> {
        let key: PickKey = pick.key();

        if let Some(existing) = self.picks.get_mut(&key) {
            if *existing == pick {
                return Ok(SelectOutcome::Unchanged);
            }
            *existing = pick;
            return Ok(SelectOutcome::Replaced);
        }

        let occupied: usize = self.picks.len().saturating_add(locked_count);
        if occupied >= rules.max_picks() {
            return Err(DomainError::PickLimitExceeded {
                max_picks: rules.max_picks(),
                requested: occupied.saturating_add(1),
            });
        }

        self.picks.insert(key, pick);
        Ok(SelectOutcome::Added)
    }

    /// Selects a pick, or removes it if the identical pick is already held.
    ///
    /// # Errors
    ///
    /// Returns `PickLimitExceeded` under the same conditions as `select`.
    pub fn toggle(
        &mut self,
        pick: PickSelection,
        locked_count: usize,
        rules: &CardRules,
    ) -> Result<ToggleOutcome, DomainError> {
        let key: PickKey = pick.key();
        if self.picks.get(&key) == Some(&pick) {
            self.picks.remove(&key);
            return Ok(ToggleOutcome::Removed);
        }

        match self.select(pick, locked_count, rules)? {
            SelectOutcome::Added => Ok(ToggleOutcome::Added),
            SelectOutcome::Replaced | SelectOutcome::Unchanged => Ok(ToggleOutcome::Replaced),
        }
    }

    /// Removes the pick at `key`, if any.
    pub fn remove(&mut self, key: &PickKey) -> Option<PickSelection> {
        self.picks.remove(key)
    }

    /// Returns the number of picks held.
    #[must_use]
    pub fn count(&self) -> usize {
        self.picks.len()
    }

    /// Returns whether the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    /// Returns the pick at `key`, if any.
    #[must_use]
    pub fn get(&self, key: &PickKey) -> Option<&PickSelection> {
        self.picks.get(key)
    }

    /// Returns whether a pick is held at `key`.
    #[must_use]
    pub fn contains(&self, key: &PickKey) -> bool {
        self.picks.contains_key(key)
    }

    /// Iterates the held picks in key order.
    pub fn picks(&self) -> impl Iterator<Item = &PickSelection> {
        self.picks.values()
    }
}

impl From<Vec<PickSelection>> for SelectionBuffer {
    fn from(picks: Vec<PickSelection>) -> Self {
        Self {
            picks: picks.into_iter().map(|pick| (pick.key(), pick)).collect(),
        }
    }
}

impl From<SelectionBuffer> for Vec<PickSelection> {
    fn from(buffer: SelectionBuffer) -> Self {
        buffer.picks.into_values().collect()
    }
}
