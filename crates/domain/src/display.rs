// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Display formatting for stored picks.
//!
//! Team ids follow the `CITY_NAME_LEAGUE` convention, e.g.
//! `DALLAS_COWBOYS_NFL`. Prices use American odds.

use serde::{Deserialize, Serialize};

use crate::pick::PickSelection;
use crate::types::{BetType, Selection};

/// Known team abbreviations.
const TEAM_ABBREVIATIONS: &[(&str, &str)] = &[
    ("DALLAS_COWBOYS_NFL", "DAL"),
    ("DETROIT_LIONS_NFL", "DET"),
    ("PITTSBURGH_STEELERS_NFL", "PIT"),
    ("BALTIMORE_RAVENS_NFL", "BAL"),
    ("WASHINGTON_COMMANDERS_NFL", "WAS"),
    ("MINNESOTA_VIKINGS_NFL", "MIN"),
    ("TENNESSEE_TITANS_NFL", "TEN"),
    ("CLEVELAND_BROWNS_NFL", "CLE"),
    ("NEW_ORLEANS_SAINTS_NFL", "NO"),
    ("TAMPA_BAY_BUCCANEERS_NFL", "TB"),
    ("LOS_ANGELES_RAMS_NFL", "LAR"),
    ("BUFFALO_BILLS_NFL", "BUF"),
    ("NEW_YORK_JETS_NFL", "NYJ"),
    ("MIAMI_DOLPHINS_NFL", "MIA"),
    ("NEW_ENGLAND_PATRIOTS_NFL", "NE"),
    ("KANSAS_CITY_CHIEFS_NFL", "KC"),
    ("LOS_ANGELES_CHARGERS_NFL", "LAC"),
    ("DENVER_BRONCOS_NFL", "DEN"),
    ("LAS_VEGAS_RAIDERS_NFL", "LV"),
    ("HOUSTON_TEXANS_NFL", "HOU"),
    ("INDIANAPOLIS_COLTS_NFL", "IND"),
    ("JACKSONVILLE_JAGUARS_NFL", "JAX"),
    ("CINCINNATI_BENGALS_NFL", "CIN"),
    ("PHILADELPHIA_EAGLES_NFL", "PHI"),
    ("NEW_YORK_GIANTS_NFL", "NYG"),
    ("GREEN_BAY_PACKERS_NFL", "GB"),
    ("CHICAGO_BEARS_NFL", "CHI"),
    ("ATLANTA_FALCONS_NFL", "ATL"),
    ("CAROLINA_PANTHERS_NFL", "CAR"),
    ("ARIZONA_CARDINALS_NFL", "ARI"),
    ("SAN_FRANCISCO_49ERS_NFL", "SF"),
    ("SEATTLE_SEAHAWKS_NFL", "SEA"),
];

/// Display strings for one pick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickDisplay {
    /// The main line, e.g. `Dallas Cowboys -3.5` or `OVER 47.5`.
    pub primary: String,
    /// The price, e.g. `-110`.
    pub secondary: String,
    /// Short bet type tag, e.g. `SPR`.
    pub badge: String,
}

/// Turns a team id into a readable name.
///
/// The trailing league suffix is dropped and each word is capitalized:
/// `NEW_YORK_GIANTS_NFL` becomes `New York Giants`. An id with no suffix is
/// formatted whole.
#[must_use]
pub fn format_team_name(team_id: &str) -> String {
    let mut parts: Vec<&str> = team_id.split('_').collect();
    if parts.len() > 1 {
        parts.pop();
    }
    parts
        .into_iter()
        .map(capitalize)
        .collect::<Vec<String>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        let mut out: String = first.to_string();
        out.push_str(&chars.as_str().to_lowercase());
        out
    })
}

/// Formats an American odds price with an explicit plus for positives.
#[must_use]
pub fn format_odds(odds: i32) -> String {
    if odds > 0 {
        format!("+{odds}")
    } else {
        odds.to_string()
    }
}

/// Formats a spread value with an explicit plus for positives.
#[must_use]
pub fn format_spread(value: f64) -> String {
    if value > 0.0 {
        format!("+{value}")
    } else {
        value.to_string()
    }
}

/// Formats a total-points value.
#[must_use]
pub fn format_total(value: f64) -> String {
    value.to_string()
}

/// Returns the short badge for a bet type.
#[must_use]
pub const fn bet_type_badge(bet_type: BetType) -> &'static str {
    match bet_type {
        BetType::Moneyline => "ML",
        BetType::Spread => "SPR",
        BetType::Total => "O/U",
    }
}

/// Returns the abbreviation for a team id.
///
/// Unknown teams fall back to the first three characters, uppercased.
#[must_use]
pub fn team_abbreviation(team_id: &str) -> String {
    TEAM_ABBREVIATIONS
        .iter()
        .find(|(id, _)| *id == team_id)
        .map_or_else(
            || team_id.chars().take(3).collect::<String>().to_uppercase(),
            |(_, abbreviation)| (*abbreviation).to_string(),
        )
}

/// Produces the display strings for a pick from its frozen fields.
#[must_use]
pub fn format_pick(pick: &PickSelection) -> PickDisplay {
    let primary: String = match (pick.bet_type(), pick.selection()) {
        (BetType::Moneyline, selection) => format_team_name(selection.as_str()),
        (BetType::Spread, selection) => format!(
            "{} {}",
            format_team_name(selection.as_str()),
            format_spread(pick.spread_value().unwrap_or(0.0))
        ),
        (BetType::Total, selection) => {
            let side: String = match selection {
                Selection::Over => String::from("OVER"),
                Selection::Under => String::from("UNDER"),
                Selection::Team(team_id) => team_id.as_str().to_uppercase(),
            };
            match pick.total_value() {
                Some(value) => format!("{side} {}", format_total(value)),
                None => side,
            }
        }
    };

    PickDisplay {
        primary,
        secondary: format_odds(pick.line()),
        badge: bet_type_badge(pick.bet_type()).to_string(),
    }
}
