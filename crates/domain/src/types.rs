// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw database identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw database identifier.
            #[must_use]
            pub const fn value(&self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id!(
    /// Canonical identifier of a persisted order.
    OrderId
);
numeric_id!(
    /// Identifier of a catalog product.
    ProductId
);
numeric_id!(
    /// Identifier of a vendor identity record.
    VendorId
);
numeric_id!(
    /// Identifier of a customer identity record.
    CustomerId
);

/// A normalized email address.
///
/// Addresses are trimmed and lower-cased so that tenant scoping by email
/// is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parses and normalizes an email address.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidEmail` if the value is empty, contains
    /// whitespace, or does not have exactly one `@` with text on both sides.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let normalized: String = value.trim().to_lowercase();
        let mut parts = normalized.split('@');
        let local: &str = parts.next().unwrap_or_default();
        let domain: Option<&str> = parts.next();

        let well_formed: bool = !local.is_empty()
            && domain.is_some_and(|d| !d.is_empty())
            && parts.next().is_none()
            && !normalized.chars().any(char::is_whitespace);

        if well_formed {
            Ok(Self(normalized))
        } else {
            Err(DomainError::InvalidEmail(value.to_string()))
        }
    }

    /// Returns the normalized address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// The kind of an authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    /// A marketplace vendor fulfilling orders for its own products.
    Vendor,
    /// A customer placing orders.
    Customer,
}

impl ActorKind {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Vendor => "vendor",
            Self::Customer => "customer",
        }
    }
}

impl FromStr for ActorKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vendor" => Ok(Self::Vendor),
            "customer" => Ok(Self::Customer),
            _ => Err(DomainError::InvalidActorKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for ActorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated caller as resolved by the identity context.
///
/// Vendors and customers share an id space per kind only; a vendor id and a
/// customer id with the same number are unrelated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The identity record id within its kind.
    pub id: i64,
    /// Vendor or customer.
    pub kind: ActorKind,
    /// The registered email, when the identity record has one.
    pub email: Option<EmailAddress>,
    /// Display name from the identity record.
    pub name: String,
}

impl Actor {
    /// Creates a vendor actor.
    #[must_use]
    pub fn vendor(id: VendorId, name: &str, email: Option<EmailAddress>) -> Self {
        Self {
            id: id.value(),
            kind: ActorKind::Vendor,
            email,
            name: name.to_string(),
        }
    }

    /// Creates a customer actor.
    #[must_use]
    pub fn customer(id: CustomerId, name: &str, email: EmailAddress) -> Self {
        Self {
            id: id.value(),
            kind: ActorKind::Customer,
            email: Some(email),
            name: name.to_string(),
        }
    }

    /// Returns the vendor id when this actor is a vendor.
    #[must_use]
    pub const fn vendor_id(&self) -> Option<VendorId> {
        match self.kind {
            ActorKind::Vendor => Some(VendorId::new(self.id)),
            ActorKind::Customer => None,
        }
    }

    /// Returns the customer id when this actor is a customer.
    #[must_use]
    pub const fn customer_id(&self) -> Option<CustomerId> {
        match self.kind {
            ActorKind::Customer => Some(CustomerId::new(self.id)),
            ActorKind::Vendor => None,
        }
    }
}
