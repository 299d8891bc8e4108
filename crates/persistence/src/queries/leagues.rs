// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use betbuddies_domain::League;
use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::parse_timestamp;
use crate::diesel_schema::leagues;
use crate::error::PersistenceError;

/// Diesel Queryable struct for league rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = leagues)]
struct LeagueRow {
    league_id: i64,
    name: String,
    created_at: String,
}

/// Retrieves a league by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `league_id` - The league to load
///
/// # Errors
///
/// Returns `LeagueNotFound` if no league has this ID.
pub fn get_league(conn: &mut SqliteConnection, league_id: i64) -> Result<League, PersistenceError> {
    let row: LeagueRow = leagues::table
        .filter(leagues::league_id.eq(league_id))
        .select(LeagueRow::as_select())
        .first::<LeagueRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_league: {e}")))?
        .ok_or(PersistenceError::LeagueNotFound(league_id))?;

    Ok(League::with_id(
        row.league_id,
        &row.name,
        parse_timestamp(&row.created_at)?,
    ))
}
