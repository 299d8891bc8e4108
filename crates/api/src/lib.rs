// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for `BetBuddies` pick cards.
//!
//! This crate turns requests into domain commands, drives the core and
//! persistence layers, and maps their errors onto a single taxonomy. It has
//! no transport of its own; the server crate exposes it over HTTP.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_core_error, translate_domain_error, translate_persistence_error};
pub use handlers::{
    DEFAULT_ACTIVITY_LIMIT, MAX_ACTIVITY_LIMIT, create_league, format_pick, get_league,
    get_reconciled_state, get_recent_activity, get_week_context, ingest_events,
    list_upcoming_events, parse_member_id, parse_timezone, remove_pick, select_pick,
    submit_card, toggle_pick,
};
pub use request_response::{
    ActivityEntry, ActivityResponse, BufferPickRequest, BufferResponse, CreateLeagueRequest,
    EventInfo, EventInput, IngestEventsRequest, IngestEventsResponse, LeagueResponse, PickInfo,
    PickInput, ReconciledStateResponse, RemovePickRequest, SubmitCardRequest, SubmitCardResponse,
    UpcomingEventsResponse, WeekContextResponse,
};
