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
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod live;
mod session;

use axum::{
    Json, Router,
    extract::{FromRef, Path, Query, State as AxumState},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use betbuddies_api::{
    ActivityResponse, ApiError, BufferPickRequest, BufferResponse, CreateLeagueRequest,
    IngestEventsRequest, IngestEventsResponse, LeagueResponse, ReconciledStateResponse,
    RemovePickRequest, SubmitCardRequest, SubmitCardResponse, UpcomingEventsResponse,
    WeekContextResponse, create_league, get_league, get_reconciled_state, get_recent_activity,
    get_week_context, ingest_events, list_upcoming_events, parse_timezone, remove_pick,
    select_pick, submit_card, toggle_pick,
};
use betbuddies_audit::Cause;
use betbuddies_domain::{CardRules, EventCatalog, MemberId};
use betbuddies_persistence::{Persistence, PersistenceError};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::live::{LiveEvent, LiveEventBroadcaster, live_events_handler};
use crate::session::SessionMember;

/// Header carrying the caller's request id, recorded as the activity cause.
const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// `BetBuddies` Server - HTTP server for weekly pick cards
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Maximum number of picks on a card
    #[arg(long, default_value_t = 5)]
    max_picks: usize,

    /// IANA timezone used for week date-range labels
    #[arg(long, default_value = "UTC")]
    timezone: String,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer. Each request holds the lock for its store work.
    persistence: Arc<Mutex<Persistence>>,
    /// The card pick ceiling.
    rules: CardRules,
    /// Timezone for week labels.
    tz: Tz,
    /// Live change notices.
    broadcaster: Arc<LiveEventBroadcaster>,
}

impl FromRef<AppState> for Arc<LiveEventBroadcaster> {
    fn from_ref(app_state: &AppState) -> Self {
        Arc::clone(&app_state.broadcaster)
    }
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
    /// Machine-readable code for conflicts the client must handle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
    /// Optional machine-readable code.
    code: Option<&'static str>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
            code: self.code.map(String::from),
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let (status, code): (StatusCode, Option<&'static str>) = match &err {
            ApiError::InvalidInput { .. } => (StatusCode::BAD_REQUEST, None),
            ApiError::DomainRuleViolation { .. } => (StatusCode::UNPROCESSABLE_ENTITY, None),
            ApiError::BettingWindowClosed => (StatusCode::CONFLICT, Some("betting_window_closed")),
            ApiError::DuplicateCardConflict { .. } => (StatusCode::CONFLICT, Some("duplicate_card")),
            ApiError::ResourceNotFound { .. } => (StatusCode::NOT_FOUND, None),
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, None)
            }
        };
        Self {
            status,
            message: err.to_string(),
            code,
        }
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        ApiError::from(err).into()
    }
}

/// Query parameters for the activity feed.
#[derive(Debug, Deserialize)]
struct ActivityQuery {
    /// Maximum entries to return.
    limit: Option<usize>,
}

/// Builds the activity cause for a card submission.
///
/// Uses the caller's request id when present.
fn submission_cause(headers: &HeaderMap, member_id: &MemberId, now: DateTime<Utc>) -> Cause {
    let id: String = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map_or_else(
            || format!("submit-{member_id}-{}", now.timestamp_millis()),
            String::from,
        );
    Cause::new(id, String::from("Card submission"))
}

/// Handler for POST `/leagues` endpoint.
async fn handle_create_league(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateLeagueRequest>,
) -> Result<Json<LeagueResponse>, HttpError> {
    info!(name = %req.name, "Handling create_league request");

    let mut persistence = app_state.persistence.lock().await;
    let response: LeagueResponse = create_league(&mut persistence, &req, Utc::now())?;
    drop(persistence);

    app_state.broadcaster.broadcast(&LiveEvent::LeagueCreated {
        league_id: response.league_id,
    });

    Ok(Json(response))
}

/// Handler for GET `/leagues/{league_id}` endpoint.
async fn handle_get_league(
    AxumState(app_state): AxumState<AppState>,
    Path(league_id): Path<i64>,
) -> Result<Json<LeagueResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: LeagueResponse = get_league(&mut persistence, league_id)?;
    Ok(Json(response))
}

/// Handler for GET `/leagues/{league_id}/week` endpoint.
async fn handle_get_week(
    AxumState(app_state): AxumState<AppState>,
    Path(league_id): Path<i64>,
) -> Result<Json<WeekContextResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: WeekContextResponse =
        get_week_context(&mut persistence, league_id, Utc::now(), &app_state.tz)?;
    Ok(Json(response))
}

/// Handler for GET `/leagues/{league_id}/card` endpoint.
///
/// Returns the member's card for the active week, split into locked and
/// editable picks against the live catalog.
async fn handle_get_card(
    AxumState(app_state): AxumState<AppState>,
    SessionMember(member_id): SessionMember,
    Path(league_id): Path<i64>,
) -> Result<Json<ReconciledStateResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ReconciledStateResponse = get_reconciled_state(
        &mut persistence,
        &member_id,
        league_id,
        &app_state.rules,
        Utc::now(),
        &app_state.tz,
    )?;
    Ok(Json(response))
}

/// Handler for POST `/leagues/{league_id}/card` endpoint.
///
/// Replaces the editable part of the member's card with the submitted buffer.
async fn handle_submit_card(
    AxumState(app_state): AxumState<AppState>,
    SessionMember(member_id): SessionMember,
    Path(league_id): Path<i64>,
    headers: HeaderMap,
    Json(req): Json<SubmitCardRequest>,
) -> Result<Json<SubmitCardResponse>, HttpError> {
    info!(
        %member_id,
        league_id,
        picks = req.buffer.count(),
        "Handling submit_card request"
    );

    let now: DateTime<Utc> = Utc::now();
    let cause: Cause = submission_cause(&headers, &member_id, now);

    let mut persistence = app_state.persistence.lock().await;
    let response: SubmitCardResponse = submit_card(
        &mut persistence,
        &member_id,
        league_id,
        req,
        &app_state.rules,
        cause,
        now,
        &app_state.tz,
    )?;
    drop(persistence);

    app_state.broadcaster.broadcast(&LiveEvent::CardSubmitted {
        league_id,
        member_id: member_id.to_string(),
        card_id: response.card_id,
        week_number: response.week_number,
        season_year: response.season_year,
    });

    Ok(Json(response))
}

/// Handler for GET `/leagues/{league_id}/activity` endpoint.
async fn handle_get_activity(
    AxumState(app_state): AxumState<AppState>,
    Path(league_id): Path<i64>,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<ActivityResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ActivityResponse = get_recent_activity(&mut persistence, league_id, query.limit)?;
    Ok(Json(response))
}

async fn current_catalog(app_state: &AppState) -> Result<EventCatalog, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let catalog: EventCatalog = persistence.load_catalog(Utc::now())?;
    Ok(catalog)
}

/// Handler for POST `/buffer/select` endpoint.
async fn handle_select_pick(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<BufferPickRequest>,
) -> Result<Json<BufferResponse>, HttpError> {
    let catalog: EventCatalog = current_catalog(&app_state).await?;
    Ok(Json(select_pick(&catalog, req, &app_state.rules)?))
}

/// Handler for POST `/buffer/toggle` endpoint.
async fn handle_toggle_pick(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<BufferPickRequest>,
) -> Result<Json<BufferResponse>, HttpError> {
    let catalog: EventCatalog = current_catalog(&app_state).await?;
    Ok(Json(toggle_pick(&catalog, req, &app_state.rules)?))
}

/// Handler for POST `/buffer/remove` endpoint.
async fn handle_remove_pick(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RemovePickRequest>,
) -> Result<Json<BufferResponse>, HttpError> {
    Ok(Json(remove_pick(req, &app_state.rules)?))
}

/// Handler for GET `/events/upcoming` endpoint.
async fn handle_list_upcoming_events(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<UpcomingEventsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: UpcomingEventsResponse = list_upcoming_events(&mut persistence, Utc::now())?;
    Ok(Json(response))
}

/// Handler for POST `/events` endpoint.
///
/// Inserts or replaces feed events.
async fn handle_ingest_events(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<IngestEventsRequest>,
) -> Result<Json<IngestEventsResponse>, HttpError> {
    info!(count = req.events.len(), "Handling ingest_events request");

    let mut persistence = app_state.persistence.lock().await;
    let response: IngestEventsResponse = ingest_events(&mut persistence, &req)?;
    drop(persistence);

    app_state.broadcaster.broadcast(&LiveEvent::EventsIngested {
        count: response.ingested,
    });

    Ok(Json(response))
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/leagues", post(handle_create_league))
        .route("/leagues/{league_id}", get(handle_get_league))
        .route("/leagues/{league_id}/week", get(handle_get_week))
        .route(
            "/leagues/{league_id}/card",
            get(handle_get_card).post(handle_submit_card),
        )
        .route("/leagues/{league_id}/activity", get(handle_get_activity))
        .route("/buffer/select", post(handle_select_pick))
        .route("/buffer/toggle", post(handle_toggle_pick))
        .route("/buffer/remove", post(handle_remove_pick))
        .route("/events", post(handle_ingest_events))
        .route("/events/upcoming", get(handle_list_upcoming_events))
        .route("/live", get(live_events_handler))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing BetBuddies Server");

    let rules: CardRules = CardRules::new(args.max_picks)?;
    let tz: Tz = parse_timezone(&args.timezone)?;

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        rules,
        tz,
        broadcaster: Arc::new(LiveEventBroadcaster::new()),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!(
        max_picks = args.max_picks,
        timezone = %tz,
        "Server listening on {}",
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use betbuddies_api::{EventInput, PickInput};
    use betbuddies_domain::{CardStatus, MoneylineOdds, SpreadMarket, TotalMarket};
    use chrono::TimeDelta;
    use tower::ServiceExt;

    const TEST_MEMBER: &str = "member-3";

    /// Helper to create test app state with in-memory persistence.
    fn create_test_app_state() -> AppState {
        let persistence: Persistence = Persistence::new_in_memory().unwrap();
        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
            rules: CardRules::default(),
            tz: Tz::UTC,
            broadcaster: Arc::new(LiveEventBroadcaster::new()),
        }
    }

    /// An event starting `hours` from now.
    fn create_test_event(event_id: &str, hours: i64) -> EventInput {
        EventInput {
            event_id: event_id.to_string(),
            home_team_id: String::from("KANSAS_CITY_CHIEFS_NFL"),
            away_team_id: String::from("BUFFALO_BILLS_NFL"),
            starts_at: Utc::now() + TimeDelta::hours(hours),
            moneyline: MoneylineOdds {
                home: -135,
                away: 115,
            },
            spread: Some(SpreadMarket {
                home_line: -2.5,
                home_odds: -110,
                away_odds: -110,
            }),
            total: Some(TotalMarket {
                points: 47.5,
                over_odds: -110,
                under_odds: -110,
            }),
        }
    }

    fn create_test_pick(event_id: &str) -> PickInput {
        PickInput {
            event_id: event_id.to_string(),
            bet_type: String::from("moneyline"),
            selection: String::from("KANSAS_CITY_CHIEFS_NFL"),
        }
    }

    fn json_request<T: Serialize>(method: &str, uri: &str, body: &T) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(body).unwrap()))
            .unwrap()
    }

    fn member_request<T: Serialize>(method: &str, uri: &str, body: Option<&T>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("X-Member-Id", TEST_MEMBER)
            .header("content-type", "application/json");
        match body {
            Some(body) => builder
                .body(Body::from(serde_json::to_string(body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    async fn create_test_league(app: &Router) -> i64 {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/leagues",
                &CreateLeagueRequest {
                    name: String::from("Sunday Crew"),
                },
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        let league: LeagueResponse = read_json(response).await;
        league.league_id
    }

    async fn seed_events(app: &Router, count: usize) {
        let events: Vec<EventInput> = (1..=count)
            .map(|i| create_test_event(&format!("game-{i}"), 24 + i64::try_from(i).unwrap()))
            .collect();
        let response = app
            .clone()
            .oneshot(json_request("POST", "/events", &IngestEventsRequest { events }))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
    }

    async fn select(app: &Router, buffer: BufferResponse, event_id: &str) -> Response {
        let req: BufferPickRequest = BufferPickRequest {
            buffer: buffer.buffer,
            locked_count: 0,
            pick: create_test_pick(event_id),
        };
        app.clone()
            .oneshot(json_request("POST", "/buffer/select", &req))
            .await
            .unwrap()
    }

    fn empty_buffer() -> BufferResponse {
        BufferResponse {
            buffer: betbuddies_domain::SelectionBuffer::default(),
            outcome: String::new(),
            count: 0,
            remaining_capacity: 5,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_league() {
        let app: Router = build_router(create_test_app_state());
        let league_id: i64 = create_test_league(&app).await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/leagues/{league_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let league: LeagueResponse = read_json(response).await;
        assert_eq!(league.name, "Sunday Crew");
    }

    #[tokio::test]
    async fn test_blank_league_name_is_bad_request() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(json_request(
                "POST",
                "/leagues",
                &CreateLeagueRequest {
                    name: String::from("   "),
                },
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
        let body: ErrorResponse = read_json(response).await;
        assert!(body.error);
        assert!(body.code.is_none());
    }

    #[tokio::test]
    async fn test_unknown_league_is_not_found() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/leagues/999/week")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_new_league_is_in_week_one() {
        let app: Router = build_router(create_test_app_state());
        let league_id: i64 = create_test_league(&app).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/leagues/{league_id}/week"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let week: WeekContextResponse = read_json(response).await;
        assert_eq!(week.week_number, 1);
        assert_eq!(week.ends_at - week.starts_at, TimeDelta::days(7));
    }

    #[tokio::test]
    async fn test_card_requires_member_header() {
        let app: Router = build_router(create_test_app_state());
        let league_id: i64 = create_test_league(&app).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/leagues/{league_id}/card"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_blank_member_header_is_bad_request() {
        let app: Router = build_router(create_test_app_state());
        let league_id: i64 = create_test_league(&app).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/leagues/{league_id}/card"))
                    .header("X-Member-Id", "  ")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_select_submit_reload() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state.clone());
        let league_id: i64 = create_test_league(&app).await;
        seed_events(&app, 3).await;

        let mut live = app_state.broadcaster.subscribe();

        let response = select(&app, empty_buffer(), "game-1").await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let first: BufferResponse = read_json(response).await;
        assert_eq!(first.outcome, "added");

        let response = select(&app, first, "game-2").await;
        let second: BufferResponse = read_json(response).await;
        assert_eq!(second.count, 2);
        assert_eq!(second.remaining_capacity, 3);

        let response = app
            .clone()
            .oneshot(member_request(
                "POST",
                &format!("/leagues/{league_id}/card"),
                Some(&SubmitCardRequest {
                    buffer: second.buffer,
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        let submitted: SubmitCardResponse = read_json(response).await;
        assert!(submitted.created);
        assert_eq!(submitted.submitted_picks, 2);
        assert_eq!(submitted.week_number, 1);

        assert_eq!(
            live.try_recv().ok(),
            Some(LiveEvent::CardSubmitted {
                league_id,
                member_id: String::from(TEST_MEMBER),
                card_id: submitted.card_id,
                week_number: 1,
                season_year: submitted.season_year,
            })
        );

        let response = app
            .clone()
            .oneshot(member_request::<()>(
                "GET",
                &format!("/leagues/{league_id}/card"),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        let state: ReconciledStateResponse = read_json(response).await;
        assert_eq!(state.card_id, Some(submitted.card_id));
        assert_eq!(state.status, CardStatus::Editable);
        assert!(state.can_make_picks);
        assert!(state.locked_picks.is_empty());
        assert_eq!(state.editable_event_ids, vec!["game-1", "game-2"]);
        assert_eq!(state.upcoming_events.len(), 3);
    }

    #[tokio::test]
    async fn test_resubmission_updates_same_card() {
        let app: Router = build_router(create_test_app_state());
        let league_id: i64 = create_test_league(&app).await;
        seed_events(&app, 2).await;

        let buffer: BufferResponse = read_json(select(&app, empty_buffer(), "game-1").await).await;
        let uri: String = format!("/leagues/{league_id}/card");
        let request: SubmitCardRequest = SubmitCardRequest {
            buffer: buffer.buffer,
        };

        let first: SubmitCardResponse = read_json(
            app.clone()
                .oneshot(member_request("POST", &uri, Some(&request)))
                .await
                .unwrap(),
        )
        .await;
        let second: SubmitCardResponse = read_json(
            app.clone()
                .oneshot(member_request("POST", &uri, Some(&request)))
                .await
                .unwrap(),
        )
        .await;

        assert!(first.created);
        assert!(!second.created);
        assert_eq!(first.card_id, second.card_id);

        let activity: ActivityResponse = read_json(
            app.oneshot(
                Request::builder()
                    .uri(format!("/leagues/{league_id}/activity?limit=1"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap(),
        )
        .await;
        assert_eq!(activity.entries.len(), 1);
        assert_eq!(activity.entries[0].activity_id, second.activity_id);
    }

    #[tokio::test]
    async fn test_sixth_pick_is_rule_violation() {
        let app: Router = build_router(create_test_app_state());
        create_test_league(&app).await;
        seed_events(&app, 6).await;

        let mut buffer: BufferResponse = empty_buffer();
        for i in 1..=5 {
            let response = select(&app, buffer, &format!("game-{i}")).await;
            assert_eq!(response.status(), HttpStatusCode::OK);
            buffer = read_json(response).await;
        }
        assert_eq!(buffer.remaining_capacity, 0);

        let response = select(&app, buffer, "game-6").await;

        assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_empty_card_is_rule_violation() {
        let app: Router = build_router(create_test_app_state());
        let league_id: i64 = create_test_league(&app).await;
        seed_events(&app, 1).await;

        let response = app
            .oneshot(member_request(
                "POST",
                &format!("/leagues/{league_id}/card"),
                Some(&SubmitCardRequest {
                    buffer: betbuddies_domain::SelectionBuffer::default(),
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_missed_card_without_events() {
        let app: Router = build_router(create_test_app_state());
        let league_id: i64 = create_test_league(&app).await;

        let state: ReconciledStateResponse = read_json(
            app.oneshot(member_request::<()>(
                "GET",
                &format!("/leagues/{league_id}/card"),
                None,
            ))
            .await
            .unwrap(),
        )
        .await;

        assert_eq!(state.status, CardStatus::Missed);
        assert!(!state.can_make_picks);
        assert_eq!(state.card_id, None);
    }

    #[tokio::test]
    async fn test_ingest_lists_upcoming_and_broadcasts() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state.clone());
        let mut live = app_state.broadcaster.subscribe();

        let mut started: EventInput = create_test_event("started", -1);
        started.spread = None;
        let request: IngestEventsRequest = IngestEventsRequest {
            events: vec![create_test_event("game-1", 3), started],
        };
        let ingested: IngestEventsResponse = read_json(
            app.clone()
                .oneshot(json_request("POST", "/events", &request))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(ingested.ingested, 2);
        assert_eq!(
            live.try_recv().ok(),
            Some(LiveEvent::EventsIngested { count: 2 })
        );

        let upcoming: UpcomingEventsResponse = read_json(
            app.oneshot(
                Request::builder()
                    .uri("/events/upcoming")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap(),
        )
        .await;
        assert_eq!(upcoming.events.len(), 1);
        assert_eq!(upcoming.events[0].event_id, "game-1");
        assert_eq!(upcoming.events[0].home_team_name, "Kansas City Chiefs");
    }

    #[tokio::test]
    async fn test_remove_pick_from_buffer() {
        let app: Router = build_router(create_test_app_state());
        seed_events(&app, 1).await;
        let buffer: BufferResponse = read_json(select(&app, empty_buffer(), "game-1").await).await;

        let request: RemovePickRequest = RemovePickRequest {
            buffer: buffer.buffer,
            locked_count: 0,
            event_id: String::from("game-1"),
            bet_type: String::from("moneyline"),
        };
        let response = app
            .oneshot(json_request("POST", "/buffer/remove", &request))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let removed: BufferResponse = read_json(response).await;
        assert_eq!(removed.outcome, "removed");
        assert_eq!(removed.count, 0);
    }

    #[test]
    fn test_conflicts_carry_codes() {
        let closed: HttpError = ApiError::BettingWindowClosed.into();
        assert_eq!(closed.status, StatusCode::CONFLICT);
        assert_eq!(closed.code, Some("betting_window_closed"));

        let duplicate: HttpError = ApiError::DuplicateCardConflict {
            message: String::from("card exists"),
        }
        .into();
        assert_eq!(duplicate.status, StatusCode::CONFLICT);
        assert_eq!(duplicate.code, Some("duplicate_card"));

        let internal: HttpError = ApiError::Internal {
            message: String::from("disk full"),
        }
        .into();
        assert_eq!(internal.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal.code, None);
    }

    #[tokio::test]
    async fn test_error_body_includes_code() {
        let response: Response = HttpError::from(ApiError::BettingWindowClosed).into_response();

        assert_eq!(response.status(), HttpStatusCode::CONFLICT);
        let body: ErrorResponse = read_json(response).await;
        assert!(body.error);
        assert_eq!(body.code.as_deref(), Some("betting_window_closed"));
    }

    #[test]
    fn test_submission_cause_prefers_request_id() {
        let mut headers: HeaderMap = HeaderMap::new();
        headers.insert("x-request-id", "req-77".parse().unwrap());
        let member: MemberId = MemberId::new(TEST_MEMBER);

        let cause: Cause = submission_cause(&headers, &member, Utc::now());
        assert_eq!(cause.id, "req-77");

        let fallback: Cause = submission_cause(&HeaderMap::new(), &member, Utc::now());
        assert!(fallback.id.starts_with("submit-member-3-"));
    }
}
