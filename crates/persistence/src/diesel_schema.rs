// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

diesel::table! {
    audit_events (event_id) {
        event_id -> BigInt,
        league_id -> BigInt,
        week_number -> Integer,
        season_year -> Integer,
        actor_json -> Text,
        cause_json -> Text,
        action_json -> Text,
        before_snapshot_json -> Text,
        after_snapshot_json -> Text,
        created_at -> Text,
    }
}

diesel::table! {
    cards (card_id) {
        card_id -> BigInt,
        member_id -> Text,
        league_id -> BigInt,
        week_number -> Integer,
        season_year -> Integer,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    events (event_id) {
        event_id -> Text,
        home_team_id -> Text,
        away_team_id -> Text,
        home_moneyline -> Integer,
        away_moneyline -> Integer,
        spread_home_line -> Nullable<Double>,
        spread_home_odds -> Nullable<Integer>,
        spread_away_odds -> Nullable<Integer>,
        total_points -> Nullable<Double>,
        total_over_odds -> Nullable<Integer>,
        total_under_odds -> Nullable<Integer>,
        starts_at -> BigInt,
    }
}

diesel::table! {
    leagues (league_id) {
        league_id -> BigInt,
        name -> Text,
        created_at -> Text,
    }
}

diesel::table! {
    picks (pick_id) {
        pick_id -> BigInt,
        card_id -> BigInt,
        event_id -> Text,
        bet_type -> Text,
        selection -> Text,
        home_team_id -> Text,
        away_team_id -> Text,
        line -> Integer,
        spread_value -> Nullable<Double>,
        total_value -> Nullable<Double>,
        created_at -> Text,
    }
}

diesel::joinable!(audit_events -> leagues (league_id));
diesel::joinable!(cards -> leagues (league_id));
diesel::joinable!(picks -> cards (card_id));
diesel::joinable!(picks -> events (event_id));

diesel::allow_tables_to_appear_in_same_query!(audit_events, cards, events, leagues, picks,);
