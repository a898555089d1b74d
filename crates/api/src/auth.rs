// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session-token authentication.
//!
//! Login and password handling belong to an external identity service. This
//! module only resolves a bearer token into an `Actor` and issues tokens for
//! that service to hand out.

use pillora_domain::{
    Actor, ActorKind, CustomerId, VendorId, format_timestamp, parse_timestamp,
};
use pillora_persistence::{CustomerData, Persistence, PersistenceError, SessionData, VendorData};
use time::{Duration, OffsetDateTime};
use tracing::{debug, info};

use crate::error::AuthError;

/// Lifetime of a newly issued session.
pub const DEFAULT_SESSION_TTL: Duration = Duration::hours(24);

/// Resolves and issues bearer sessions.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Validates a session token and returns the actor it belongs to.
    ///
    /// The actor carries the display name and email of the current identity
    /// record, not a copy taken when the session was issued.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AuthenticationFailed` if the token is unknown,
    /// expired, or points at an identity record that no longer exists.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
        now: OffsetDateTime,
    ) -> Result<Actor, AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: OffsetDateTime =
            parse_timestamp(&session.expires_at).map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to parse session expiration: {e}"),
            })?;

        if now > expires_at {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let actor: Actor = match session.actor_kind {
            ActorKind::Vendor => {
                let vendor: VendorData = persistence
                    .get_vendor(VendorId::new(session.actor_id))
                    .map_err(Self::map_persistence_error)?
                    .ok_or_else(|| AuthError::AuthenticationFailed {
                        reason: String::from("Vendor not found"),
                    })?;
                Actor::vendor(vendor.vendor_id, &vendor.business_name, Some(vendor.email))
            }
            ActorKind::Customer => {
                let customer: CustomerData = persistence
                    .get_customer(CustomerId::new(session.actor_id))
                    .map_err(Self::map_persistence_error)?
                    .ok_or_else(|| AuthError::AuthenticationFailed {
                        reason: String::from("Customer not found"),
                    })?;
                Actor::customer(customer.customer_id, &customer.name, customer.email)
            }
        };

        debug!(actor_kind = %actor.kind, actor_id = actor.id, "Session validated");
        Ok(actor)
    }

    /// Issues a new session for an existing vendor or customer.
    ///
    /// # Returns
    ///
    /// The bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the identity record does not exist or the session
    /// cannot be stored.
    pub fn issue_session(
        persistence: &mut Persistence,
        actor_kind: ActorKind,
        actor_id: i64,
        now: OffsetDateTime,
        ttl: Duration,
    ) -> Result<String, AuthError> {
        let known: bool = match actor_kind {
            ActorKind::Vendor => persistence
                .get_vendor(VendorId::new(actor_id))
                .map_err(Self::map_persistence_error)?
                .is_some(),
            ActorKind::Customer => persistence
                .get_customer(CustomerId::new(actor_id))
                .map_err(Self::map_persistence_error)?
                .is_some(),
        };
        if !known {
            return Err(AuthError::AuthenticationFailed {
                reason: format!("Unknown {actor_kind} {actor_id}"),
            });
        }

        let token: String = Self::generate_session_token();
        let created_at: String = Self::timestamp(now)?;
        let expires_at: String = Self::timestamp(now + ttl)?;

        persistence
            .create_session(&token, actor_kind, actor_id, &created_at, &expires_at)
            .map_err(Self::map_persistence_error)?;

        info!(actor_kind = %actor_kind, actor_id, "Session issued");
        Ok(token)
    }

    /// Revokes a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session does not exist.
    pub fn revoke_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })
    }

    fn generate_session_token() -> String {
        format!(
            "pill_{:032x}{:032x}",
            rand::random::<u128>(),
            rand::random::<u128>()
        )
    }

    fn timestamp(at: OffsetDateTime) -> Result<String, AuthError> {
        format_timestamp(at).map_err(|e| AuthError::AuthenticationFailed {
            reason: format!("Failed to format session time: {e}"),
        })
    }

    fn map_persistence_error(err: PersistenceError) -> AuthError {
        match err {
            PersistenceError::SessionNotFound(msg) => AuthError::AuthenticationFailed { reason: msg },
            _ => AuthError::AuthenticationFailed {
                reason: format!("Database error: {err}"),
            },
        }
    }
}
