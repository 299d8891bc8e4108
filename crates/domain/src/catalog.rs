// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::types::EventId;

/// The set of events still open at a given instant.
///
/// This view is the only authority on whether an event is open. It must be
/// rebuilt for every load and every submission and never reused across time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventCatalog {
    evaluated_at: DateTime<Utc>,
    events: Vec<Event>,
}

impl EventCatalog {
    /// Builds the catalog of events starting strictly after `now`.
    ///
    /// Events are ordered by start time, ties broken by event id.
    ///
    /// # Arguments
    ///
    /// * `events` - All known events
    /// * `now` - The evaluation instant
    #[must_use]
    pub fn upcoming<I>(events: I, now: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = Event>,
    {
        let mut upcoming: Vec<Event> = events
            .into_iter()
            .filter(|event| event.is_upcoming(now))
            .collect();
        upcoming.sort_by(|a, b| {
            a.starts_at()
                .cmp(&b.starts_at())
                .then_with(|| a.event_id().cmp(b.event_id()))
        });

        Self {
            evaluated_at: now,
            events: upcoming,
        }
    }

    /// Returns the instant this view was evaluated at.
    #[must_use]
    pub const fn evaluated_at(&self) -> DateTime<Utc> {
        self.evaluated_at
    }

    /// Returns the upcoming events in start order.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Returns whether the event is still open.
    #[must_use]
    pub fn is_open(&self, event_id: &EventId) -> bool {
        self.events.iter().any(|event| event.event_id() == event_id)
    }

    /// Looks up an open event by id.
    #[must_use]
    pub fn get(&self, event_id: &EventId) -> Option<&Event> {
        self.events.iter().find(|event| event.event_id() == event_id)
    }

    /// Returns the ids of all open events.
    #[must_use]
    pub fn upcoming_ids(&self) -> BTreeSet<EventId> {
        self.events
            .iter()
            .map(|event| event.event_id().clone())
            .collect()
    }

    /// Returns the number of open events.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns whether no events remain open.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
