// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use betbuddies_domain::{
    Event, EventCatalog, EventId, MoneylineOdds, SpreadMarket, TeamId, TotalMarket,
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::instant_from_millis;
use crate::diesel_schema::events;
use crate::error::PersistenceError;

/// Diesel row for the `events` table, used for reads and upserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = events, primary_key(event_id), treat_none_as_null = true)]
pub struct EventRow {
    pub event_id: String,
    pub home_team_id: String,
    pub away_team_id: String,
    pub home_moneyline: i32,
    pub away_moneyline: i32,
    pub spread_home_line: Option<f64>,
    pub spread_home_odds: Option<i32>,
    pub spread_away_odds: Option<i32>,
    pub total_points: Option<f64>,
    pub total_over_odds: Option<i32>,
    pub total_under_odds: Option<i32>,
    pub starts_at: i64,
}

impl EventRow {
    /// Flattens a domain event into a row.
    pub fn from_event(event: &Event) -> Self {
        let moneyline: MoneylineOdds = event.moneyline();
        let spread: Option<SpreadMarket> = event.spread();
        let total: Option<TotalMarket> = event.total();

        Self {
            event_id: event.event_id().to_string(),
            home_team_id: event.home_team_id().to_string(),
            away_team_id: event.away_team_id().to_string(),
            home_moneyline: moneyline.home,
            away_moneyline: moneyline.away,
            spread_home_line: spread.map(|s| s.home_line),
            spread_home_odds: spread.map(|s| s.home_odds),
            spread_away_odds: spread.map(|s| s.away_odds),
            total_points: total.map(|t| t.points),
            total_over_odds: total.map(|t| t.over_odds),
            total_under_odds: total.map(|t| t.under_odds),
            starts_at: event.starts_at().timestamp_millis(),
        }
    }

    /// Rebuilds the domain event.
    ///
    /// A market is present only when all of its columns are set.
    fn into_event(self) -> Result<Event, PersistenceError> {
        let mut event: Event = Event::new(
            EventId::new(&self.event_id),
            TeamId::new(&self.home_team_id),
            TeamId::new(&self.away_team_id),
            MoneylineOdds {
                home: self.home_moneyline,
                away: self.away_moneyline,
            },
            instant_from_millis(self.starts_at)?,
        );

        if let (Some(home_line), Some(home_odds), Some(away_odds)) = (
            self.spread_home_line,
            self.spread_home_odds,
            self.spread_away_odds,
        ) {
            event = event.with_spread(SpreadMarket {
                home_line,
                home_odds,
                away_odds,
            });
        }

        if let (Some(points), Some(over_odds), Some(under_odds)) = (
            self.total_points,
            self.total_over_odds,
            self.total_under_odds,
        ) {
            event = event.with_total(TotalMarket {
                points,
                over_odds,
                under_odds,
            });
        }

        Ok(event)
    }
}

/// Builds the catalog of events starting strictly after `now`.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `now` - The evaluation instant
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be rebuilt.
pub fn load_catalog(
    conn: &mut SqliteConnection,
    now: DateTime<Utc>,
) -> Result<EventCatalog, PersistenceError> {
    let rows: Vec<EventRow> = events::table
        .filter(events::starts_at.gt(now.timestamp_millis()))
        .order((events::starts_at.asc(), events::event_id.asc()))
        .select(EventRow::as_select())
        .load::<EventRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("load_catalog: {e}")))?;

    let upcoming: Vec<Event> = rows
        .into_iter()
        .map(EventRow::into_event)
        .collect::<Result<Vec<Event>, PersistenceError>>()?;

    debug!(count = upcoming.len(), %now, "Loaded event catalog");

    Ok(EventCatalog::upcoming(upcoming, now))
}
