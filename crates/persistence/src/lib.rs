// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for `BetBuddies` pick cards.
//!
//! This crate stores leagues, the event feed, cards with their picks, and
//! the league activity log. It is built on Diesel over `SQLite`.
//!
//! ## Storage Rules
//!
//! - At most one card exists per member, league, week and season. A unique
//!   index enforces this, so two concurrent first submissions cannot both
//!   create a card.
//! - At most one pick exists per card, event and bet type.
//! - Lock state is never stored. It is derived from event start times every
//!   time a card is read or written.
//! - A card submission is a single transaction.
//!
//! ## Testing
//!
//! `Persistence::new_in_memory` gives every caller its own shared-cache
//! in-memory database, with migrations applied and foreign keys enforced.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use betbuddies::SubmissionPlan;
use betbuddies_audit::AuditEvent;
use betbuddies_domain::{Card, CardScope, Event, EventCatalog, League, Pick};
use chrono::{DateTime, Utc};
use diesel::SqliteConnection;
use tracing::info;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use backend::PersistenceBackend;
pub use data_models::SubmissionOutcome;
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for cards, events and league activity.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError(String::from("Invalid database path"))
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        info!(path = path_str, "Opened database file");
        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled on the connection.
    ///
    /// # Errors
    ///
    /// Returns `ForeignKeyEnforcementNotEnabled` if it is not.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    /// Creates a league.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_league(&mut self, league: &League) -> Result<League, PersistenceError> {
        mutations::leagues::create_league(&mut self.conn, league)
    }

    /// Retrieves a league by ID.
    ///
    /// # Errors
    ///
    /// Returns `LeagueNotFound` if the league does not exist.
    pub fn get_league(&mut self, league_id: i64) -> Result<League, PersistenceError> {
        queries::leagues::get_league(&mut self.conn, league_id)
    }

    /// Inserts or replaces a batch of feed events.
    ///
    /// # Errors
    ///
    /// Returns an error if any write fails; nothing is written in that case.
    pub fn upsert_events(&mut self, events: &[Event]) -> Result<usize, PersistenceError> {
        mutations::events::upsert_events(&mut self.conn, events)
    }

    /// Builds the catalog of events starting strictly after `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn load_catalog(&mut self, now: DateTime<Utc>) -> Result<EventCatalog, PersistenceError> {
        queries::events::load_catalog(&mut self.conn, now)
    }

    /// Looks up the card for a scope.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_card(&mut self, scope: &CardScope) -> Result<Option<Card>, PersistenceError> {
        queries::cards::find_card(&mut self.conn, scope)
    }

    /// Lists the stored picks on a card.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_picks_for_card(&mut self, card_id: i64) -> Result<Vec<Pick>, PersistenceError> {
        queries::cards::list_picks_for_card(&mut self.conn, card_id)
    }

    /// Executes a card submission in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `CardNotFound` or `DuplicateCard` if the plan's card target is
    /// stale, `SubmissionRejected` if re-validation against the live catalog
    /// fails, or a database error. Nothing is written on error.
    pub fn submit_card(
        &mut self,
        plan: &SubmissionPlan,
        now: DateTime<Utc>,
    ) -> Result<SubmissionOutcome, PersistenceError> {
        mutations::submission::submit_card(&mut self.conn, plan, now)
    }

    /// Retrieves one activity record.
    ///
    /// # Errors
    ///
    /// Returns `AuditEventNotFound` if no record has this ID.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::audit::get_audit_event(&mut self.conn, event_id)
    }

    /// Retrieves the newest activity for a league.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_recent_activity(
        &mut self,
        league_id: i64,
        limit: usize,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::audit::get_recent_activity(&mut self.conn, league_id, limit)
    }
}
