// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use pillora::CoreError;
use pillora_domain::DomainError;
use pillora_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The credential is missing, unknown, or expired.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The actor may not perform the action.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// Why the actor was refused.
        reason: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized { action, reason } => {
                write!(f, "Unauthorized: '{action}' refused: {reason}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// Why the actor was refused.
        reason: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized { action, reason } => {
                write!(f, "Unauthorized: '{action}' refused: {reason}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized { action, reason } => Self::Unauthorized { action, reason },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    let field: &str = match err {
        DomainError::EmptyItems | DomainError::InvalidItem { .. } => "items",
        DomainError::MissingShippingAddress => "shippingAddress",
        DomainError::MissingCustomerEmail | DomainError::InvalidEmail(_) => "customerEmail",
        DomainError::MissingCustomerName => "customerName",
        DomainError::InvalidAmount {
            field: "total_amount",
            ..
        } => "totalAmount",
        DomainError::InvalidAmount { field, .. } => field,
        DomainError::TotalMismatch { .. } => "totalAmount",
        DomainError::InvalidPaymentMethod(_) => "paymentMethod",
        DomainError::InvalidPaymentStatus(_) => "paymentStatus",
        DomainError::InvalidOrderStatus(_) => "status",
        DomainError::InvalidActorKind(_) => "actorKind",
        DomainError::InvalidOrderNumber(_) => "orderNumber",
        DomainError::InvalidStatusTransition { .. } => {
            return ApiError::DomainRuleViolation {
                rule: String::from("order_status_transition"),
                message,
            };
        }
        DomainError::InvalidTimestamp(_) => return ApiError::Internal { message },
    };

    ApiError::InvalidInput {
        field: field.to_string(),
        message,
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::UnknownProduct(product_id) => ApiError::InvalidInput {
            field: String::from("items"),
            message: format!("Product {product_id} does not exist"),
        },
        CoreError::Forbidden(reason) => ApiError::Unauthorized {
            action: String::from("update_order_status"),
            reason,
        },
        CoreError::Catalog(msg) => ApiError::Internal {
            message: format!("Catalog lookup failed: {msg}"),
        },
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::OrderNotFound(msg) => ApiError::ResourceNotFound {
            resource_type: String::from("Order"),
            message: msg,
        },
        PersistenceError::NotFound(msg) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message: msg,
        },
        PersistenceError::DuplicateOrderNumber(number) => ApiError::Internal {
            message: format!("Could not allocate a unique order number (last tried {number})"),
        },
        other => ApiError::Internal {
            message: format!("Store failure: {other}"),
        },
    }
}
