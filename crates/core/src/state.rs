// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeSet;

use betbuddies_audit::AuditEvent;
use betbuddies_domain::{
    CardRules, CardScope, EventId, Pick, PickSelection, Reconciliation, SelectOutcome,
    SelectionBuffer, ToggleOutcome,
};

/// The working state of a member editing a card.
///
/// Only editable picks live in the buffer. Locked picks are represented by
/// their count, which consumes capacity but can never be changed here.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    /// Candidate picks.
    pub buffer: SelectionBuffer,
    /// Number of locked picks already on the card.
    pub locked_count: usize,
    /// The card rules in force.
    pub rules: CardRules,
}

impl EditSession {
    /// Creates an empty session for a card with no locked picks.
    #[must_use]
    pub const fn new(rules: CardRules) -> Self {
        Self {
            buffer: SelectionBuffer::new(),
            locked_count: 0,
            rules,
        }
    }

    /// Restores a session from client-held working state.
    ///
    /// # Arguments
    ///
    /// * `buffer` - The buffer as last returned to the client
    /// * `locked_count` - Locked picks on the card at the client's last read
    /// * `rules` - The card rules in force
    #[must_use]
    pub const fn from_buffer(buffer: SelectionBuffer, locked_count: usize, rules: CardRules) -> Self {
        Self {
            buffer,
            locked_count,
            rules,
        }
    }

    /// Enters edit mode for a stored card, seeding the buffer with its
    /// editable picks.
    #[must_use]
    pub fn resume(reconciliation: &Reconciliation, rules: CardRules) -> Self {
        Self {
            buffer: reconciliation.seed_buffer(),
            locked_count: reconciliation.locked_count(),
            rules,
        }
    }

    /// Returns the number of picks the card would hold if submitted now.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.buffer.count().saturating_add(self.locked_count)
    }

    /// Returns how many more picks can be added.
    #[must_use]
    pub fn remaining_capacity(&self) -> usize {
        self.rules.max_picks().saturating_sub(self.total_count())
    }
}

/// What a buffer transition did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferOutcome {
    /// Result of a select.
    Selected(SelectOutcome),
    /// Result of a toggle.
    Toggled(ToggleOutcome),
    /// Result of a remove; `true` if a pick was removed.
    Removed(bool),
}

/// The result of a successful edit-session transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The new session after the transition.
    pub new_session: EditSession,
    /// What the transition did.
    pub outcome: BufferOutcome,
}

/// Everything the caller read before submitting.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRequest {
    /// The card's natural key for the active week.
    pub scope: CardScope,
    /// The card id from the caller's last read, if a card existed.
    pub existing_card_id: Option<i64>,
    /// Locked picks on the card at the caller's last read.
    pub locked_picks: Vec<Pick>,
    /// The picks to write in place of the card's editable picks.
    pub picks: Vec<PickSelection>,
}

/// Where a submission writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardTarget {
    /// Reuse the card the caller read.
    Existing(i64),
    /// Insert a new card; a uniqueness violation means another submission won.
    Create(CardScope),
}

/// A validated, storage-ready description of one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionPlan {
    /// Where the picks go.
    pub target: CardTarget,
    /// The card's natural key.
    pub scope: CardScope,
    /// Event ids whose picks must survive the delete.
    pub protected_event_ids: BTreeSet<EventId>,
    /// Number of locked picks the plan was validated with.
    pub locked_count: usize,
    /// Picks to insert, with prices exactly as held in the buffer.
    pub picks: Vec<PickSelection>,
    /// The card rules the plan was validated against.
    pub rules: CardRules,
    /// The activity record for this submission.
    pub audit_event: AuditEvent,
}
