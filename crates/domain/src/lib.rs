// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod buffer;
mod catalog;
mod display;
mod error;
mod event;
mod pick;
mod reconcile;
mod types;
mod validation;
mod week;

#[cfg(test)]
mod tests;

pub use buffer::{SelectOutcome, SelectionBuffer, ToggleOutcome};
pub use catalog::EventCatalog;
pub use display::{
    PickDisplay, bet_type_badge, format_odds, format_pick, format_spread, format_team_name,
    format_total, team_abbreviation,
};
pub use reconcile::{CardStatus, Reconciliation, reconcile};
pub use week::{DAYS_PER_WEEK, WeekContext, resolve_week, resolve_week_in};

// Re-export public types
pub use error::DomainError;
pub use event::{Event, MoneylineOdds, SpreadMarket, TotalMarket};
pub use pick::{Pick, PickKey, PickSelection};
pub use types::{
    BetType, Card, CardRules, CardScope, EventId, League, MAX_PICKS, MemberId, Selection, TeamId,
};
pub use validation::{
    MAX_LEAGUE_NAME_LEN, validate_betting_window, validate_event, validate_identifier,
    validate_league_name, validate_pick_count, validate_selections_match_markets,
    validate_selections_open, validate_submission,
};
