// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::buffer::SelectionBuffer;
use crate::pick::{Pick, PickKey};
use crate::types::EventId;

/// Stored picks partitioned by lock state.
///
/// Lock state is never stored. It is derived here from the live set of
/// upcoming events every time a card is read or written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reconciliation {
    locked: Vec<Pick>,
    editable: Vec<Pick>,
}

impl Reconciliation {
    /// Returns picks whose event has started.
    #[must_use]
    pub fn locked(&self) -> &[Pick] {
        &self.locked
    }

    /// Returns picks whose event is still upcoming.
    #[must_use]
    pub fn editable(&self) -> &[Pick] {
        &self.editable
    }

    /// Returns the number of locked picks.
    #[must_use]
    pub const fn locked_count(&self) -> usize {
        self.locked.len()
    }

    /// Returns the total number of stored picks.
    #[must_use]
    pub const fn total_count(&self) -> usize {
        self.locked.len() + self.editable.len()
    }

    /// Returns the keys of the editable picks.
    #[must_use]
    pub fn editable_keys(&self) -> BTreeSet<PickKey> {
        self.editable.iter().map(Pick::key).collect()
    }

    /// Returns the event ids of the editable picks.
    #[must_use]
    pub fn editable_event_ids(&self) -> BTreeSet<EventId> {
        self.editable
            .iter()
            .map(|pick| pick.event_id().clone())
            .collect()
    }

    /// Returns the event ids of the locked picks.
    #[must_use]
    pub fn locked_event_ids(&self) -> BTreeSet<EventId> {
        self.locked
            .iter()
            .map(|pick| pick.event_id().clone())
            .collect()
    }

    /// Builds an edit-mode buffer holding only the editable picks.
    #[must_use]
    pub fn seed_buffer(&self) -> SelectionBuffer {
        self.editable
            .iter()
            .map(|pick| pick.selection().clone())
            .collect::<Vec<_>>()
            .into()
    }
}

/// Partitions stored picks into locked and editable.
///
/// A pick is locked iff its event id is absent from `upcoming_event_ids`.
///
/// # Arguments
///
/// * `stored_picks` - Every pick currently on the card
/// * `upcoming_event_ids` - Ids of events still open
#[must_use]
pub fn reconcile(
    stored_picks: Vec<Pick>,
    upcoming_event_ids: &BTreeSet<EventId>,
) -> Reconciliation {
    let (editable, locked): (Vec<Pick>, Vec<Pick>) = stored_picks
        .into_iter()
        .partition(|pick| upcoming_event_ids.contains(pick.event_id()));

    Reconciliation { locked, editable }
}

/// What a member's card looks like for the active week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    /// No picks yet and events remain open.
    NotSubmitted,
    /// Picks exist and events remain open.
    Editable,
    /// Picks exist and every event has started.
    Closed,
    /// No picks and every event has started.
    Missed,
}

impl CardStatus {
    /// Derives the status from the stored pick count and the open event count.
    #[must_use]
    pub const fn evaluate(stored_pick_count: usize, upcoming_event_count: usize) -> Self {
        match (stored_pick_count, upcoming_event_count) {
            (0, 0) => Self::Missed,
            (0, _) => Self::NotSubmitted,
            (_, 0) => Self::Closed,
            (_, _) => Self::Editable,
        }
    }

    /// Returns whether the member may still add or change picks.
    #[must_use]
    pub const fn can_make_picks(&self) -> bool {
        matches!(self, Self::NotSubmitted | Self::Editable)
    }

    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotSubmitted => "not_submitted",
            Self::Editable => "editable",
            Self::Closed => "closed",
            Self::Missed => "missed",
        }
    }
}

impl std::fmt::Display for CardStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
