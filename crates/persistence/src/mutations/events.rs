// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event feed upserts.
//!
//! The feed is the sole source of truth for event start times and prices.
//! Re-ingesting an event overwrites every column, including removing a
//! market the feed no longer offers.

use betbuddies_domain::Event;
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::diesel_schema::events;
use crate::error::PersistenceError;
use crate::queries::events::EventRow;

/// Inserts or replaces a batch of events in one transaction.
///
/// # Returns
///
/// The number of events written.
///
/// # Errors
///
/// Returns an error if any write fails. No event is written in that case.
pub fn upsert_events(
    conn: &mut SqliteConnection,
    batch: &[Event],
) -> Result<usize, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        for event in batch {
            let row: EventRow = EventRow::from_event(event);
            diesel::insert_into(events::table)
                .values(&row)
                .on_conflict(events::event_id)
                .do_update()
                .set(&row)
                .execute(conn)?;
            debug!(event_id = %event.event_id(), starts_at = %event.starts_at(), "Upserted event");
        }
        Ok(batch.len())
    })
}
