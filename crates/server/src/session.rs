// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session extraction for the server.
//!
//! This module provides Axum extractors that resolve an
//! `Authorization: Bearer <token>` header into an `Actor`.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use pillora_api::AuthenticationService;
use pillora_domain::Actor;
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::{AppState, ErrorResponse};

/// Extractor for authenticated vendors and customers.
///
/// # Errors
///
/// Rejects with HTTP 401 if the header is missing or malformed, or if the
/// session is unknown or expired.
pub struct SessionActor(pub Actor);

/// Extractor for routes that accept anonymous callers.
///
/// A missing header yields `None`; a header that is present but invalid is
/// still rejected with HTTP 401.
pub struct OptionalSessionActor(pub Option<Actor>);

impl FromRequestParts<AppState> for SessionActor {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token: &str = bearer_token(parts)?.ok_or_else(|| {
            debug!("Missing Authorization header");
            SessionError::MissingAuthorizationHeader
        })?;
        let actor: Actor = validate(state, token).await?;
        Ok(Self(actor))
    }
}

impl FromRequestParts<AppState> for OptionalSessionActor {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match bearer_token(parts)? {
            Some(token) => Ok(Self(Some(validate(state, token).await?))),
            None => Ok(Self(None)),
        }
    }
}

fn bearer_token(parts: &Parts) -> Result<Option<&str>, SessionError> {
    let Some(value) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let header: &str = value.to_str().map_err(|_| {
        warn!("Invalid Authorization header encoding");
        SessionError::InvalidAuthorizationHeader
    })?;

    header.strip_prefix("Bearer ").map(Some).ok_or_else(|| {
        warn!("Authorization header does not start with 'Bearer '");
        SessionError::InvalidAuthorizationHeader
    })
}

async fn validate(state: &AppState, token: &str) -> Result<Actor, SessionError> {
    let mut persistence = state.persistence.lock().await;
    let actor: Actor =
        AuthenticationService::validate_session(&mut persistence, token, OffsetDateTime::now_utc())
            .map_err(|e| {
                warn!(error = %e, "Session validation failed");
                SessionError::InvalidSession(e.to_string())
            })?;

    debug!(actor_kind = %actor.kind, actor_id = actor.id, "Session validated successfully");
    Ok(actor)
}

/// Session extraction errors.
#[derive(Debug)]
pub enum SessionError {
    /// Authorization header is missing.
    MissingAuthorizationHeader,
    /// Authorization header format is invalid.
    InvalidAuthorizationHeader,
    /// Session validation failed.
    InvalidSession(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::MissingAuthorizationHeader => String::from("Missing Authorization header"),
            Self::InvalidAuthorizationHeader => String::from(
                "Invalid Authorization header format. Expected: 'Bearer <token>'",
            ),
            Self::InvalidSession(reason) => format!("Session validation failed: {reason}"),
        };

        (
            StatusCode::UNAUTHORIZED,
            axum::Json(ErrorResponse {
                error: true,
                message,
            }),
        )
            .into_response()
    }
}
