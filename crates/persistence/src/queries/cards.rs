// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Card and pick reads.

use std::str::FromStr;

use betbuddies_domain::{
    BetType, Card, CardScope, EventId, MemberId, Pick, PickSelection, Selection, TeamId,
};
use diesel::prelude::*;
use diesel::SqliteConnection;
use num_traits::ToPrimitive;

use crate::diesel_schema::{cards, picks};
use crate::error::PersistenceError;

/// Diesel Queryable struct for card rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = cards)]
struct CardRow {
    card_id: i64,
    member_id: String,
    league_id: i64,
    week_number: i32,
    season_year: i32,
}

impl CardRow {
    fn into_card(self) -> Result<Card, PersistenceError> {
        let week_number: u32 = self.week_number.to_u32().ok_or_else(|| {
            PersistenceError::ReconstructionError(format!(
                "card {}: negative week number {}",
                self.card_id, self.week_number
            ))
        })?;

        Ok(Card::new(
            self.card_id,
            CardScope::new(
                MemberId::new(&self.member_id),
                self.league_id,
                week_number,
                self.season_year,
            ),
        ))
    }
}

/// Diesel Queryable struct for pick rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = picks)]
struct PickRow {
    pick_id: i64,
    card_id: i64,
    event_id: String,
    bet_type: String,
    selection: String,
    home_team_id: String,
    away_team_id: String,
    line: i32,
    spread_value: Option<f64>,
    total_value: Option<f64>,
}

impl PickRow {
    fn into_pick(self) -> Result<Pick, PersistenceError> {
        let bet_type: BetType = BetType::from_str(&self.bet_type).map_err(|e| {
            PersistenceError::ReconstructionError(format!("pick {}: {e}", self.pick_id))
        })?;
        let selection: Selection = Selection::parse(bet_type, &self.selection).map_err(|e| {
            PersistenceError::ReconstructionError(format!("pick {}: {e}", self.pick_id))
        })?;

        Ok(Pick::new(
            self.pick_id,
            self.card_id,
            PickSelection::restore(
                EventId::new(&self.event_id),
                bet_type,
                selection,
                TeamId::new(&self.home_team_id),
                TeamId::new(&self.away_team_id),
                self.line,
                self.spread_value,
                self.total_value,
            ),
        ))
    }
}

/// Converts a week number for a `week_number` column.
///
/// # Errors
///
/// Returns `QueryFailed` if the week number does not fit the column.
pub fn week_column(week_number: u32) -> Result<i32, PersistenceError> {
    week_number.to_i32().ok_or_else(|| {
        PersistenceError::QueryFailed(format!("week number {week_number} out of range"))
    })
}

/// Looks up the card for a scope, if one exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_card(
    conn: &mut SqliteConnection,
    scope: &CardScope,
) -> Result<Option<Card>, PersistenceError> {
    let row: Option<CardRow> = cards::table
        .filter(cards::member_id.eq(scope.member_id.as_str()))
        .filter(cards::league_id.eq(scope.league_id))
        .filter(cards::week_number.eq(week_column(scope.week_number)?))
        .filter(cards::season_year.eq(scope.season_year))
        .select(CardRow::as_select())
        .first::<CardRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("find_card: {e}")))?;

    row.map(CardRow::into_card).transpose()
}

/// Retrieves a card by ID and checks it belongs to `scope`.
///
/// # Errors
///
/// Returns `CardNotFound` if the card does not exist or belongs to a
/// different member, league or week.
pub fn get_card_in_scope(
    conn: &mut SqliteConnection,
    card_id: i64,
    scope: &CardScope,
) -> Result<Card, PersistenceError> {
    let card: Card = cards::table
        .filter(cards::card_id.eq(card_id))
        .select(CardRow::as_select())
        .first::<CardRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_card_in_scope: {e}")))?
        .ok_or(PersistenceError::CardNotFound(card_id))?
        .into_card()?;

    if card.scope() != scope {
        return Err(PersistenceError::CardNotFound(card_id));
    }
    Ok(card)
}

/// Lists every stored pick on a card, in insertion order.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be rebuilt.
pub fn list_picks_for_card(
    conn: &mut SqliteConnection,
    card_id: i64,
) -> Result<Vec<Pick>, PersistenceError> {
    let rows: Vec<PickRow> = picks::table
        .filter(picks::card_id.eq(card_id))
        .order(picks::pick_id.asc())
        .select(PickRow::as_select())
        .load::<PickRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_picks_for_card: {e}")))?;

    rows.into_iter().map(PickRow::into_pick).collect()
}
