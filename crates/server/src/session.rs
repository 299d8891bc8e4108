// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Member identity extraction.
//!
//! Authentication happens in front of this service. The authenticating proxy
//! forwards the member's id in the `X-Member-Id` header, and card routes read
//! it from there.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use betbuddies_api::parse_member_id;
use betbuddies_domain::MemberId;
use tracing::{debug, warn};

/// Header carrying the authenticated member id.
pub const MEMBER_ID_HEADER: &str = "X-Member-Id";

/// Extractor for the acting member.
///
/// # Errors
///
/// Rejects with HTTP 401 if the header is missing, and HTTP 400 if it is not
/// a valid member id.
pub struct SessionMember(pub MemberId);

impl<S> FromRequestParts<S> for SessionMember
where
    S: Send + Sync,
{
    type Rejection = SessionError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value: &str = parts
            .headers
            .get(MEMBER_ID_HEADER)
            .ok_or_else(|| {
                debug!("Missing member id header");
                SessionError::MissingMemberHeader
            })?
            .to_str()
            .map_err(|_| {
                warn!("Invalid member id header encoding");
                SessionError::InvalidMemberHeader(String::from("header is not valid UTF-8"))
            })?;

        let member_id: MemberId = parse_member_id(value).map_err(|e| {
            warn!(error = %e, "Invalid member id header");
            SessionError::InvalidMemberHeader(e.to_string())
        })?;

        Ok(Self(member_id))
    }
}

/// Member extraction errors.
#[derive(Debug)]
pub enum SessionError {
    /// The member id header is missing.
    MissingMemberHeader,
    /// The member id header is malformed.
    InvalidMemberHeader(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        match self {
            Self::MissingMemberHeader => (
                StatusCode::UNAUTHORIZED,
                format!("Missing {MEMBER_ID_HEADER} header"),
            )
                .into_response(),
            Self::InvalidMemberHeader(reason) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid {MEMBER_ID_HEADER} header: {reason}"),
            )
                .into_response(),
        }
    }
}
