// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use betbuddies_domain::League;
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::format_timestamp;
use crate::diesel_schema::leagues;
use crate::error::PersistenceError;

/// Inserts a league and returns it with its assigned ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_league(
    conn: &mut SqliteConnection,
    league: &League,
) -> Result<League, PersistenceError> {
    diesel::insert_into(leagues::table)
        .values((
            leagues::name.eq(league.name()),
            leagues::created_at.eq(format_timestamp(league.created_at())),
        ))
        .execute(conn)?;

    let league_id: i64 = conn.get_last_insert_rowid()?;
    info!(league_id, name = league.name(), "Created league");

    Ok(League::with_id(league_id, league.name(), league.created_at()))
}
