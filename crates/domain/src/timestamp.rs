// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Timestamp text form shared by persistence and the API.
//!
//! ISO 8601 with a fixed-width fractional part, so stored timestamps sort
//! lexically in chronological order.

use crate::error::DomainError;
use time::OffsetDateTime;
use time::format_description::well_known::Iso8601;

/// Formats a timestamp for storage.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimestamp` if the value cannot be formatted.
pub fn format_timestamp(at: OffsetDateTime) -> Result<String, DomainError> {
    at.format(&Iso8601::DEFAULT)
        .map_err(|e| DomainError::InvalidTimestamp(e.to_string()))
}

/// Parses a stored timestamp.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimestamp` if the text is not ISO 8601.
pub fn parse_timestamp(text: &str) -> Result<OffsetDateTime, DomainError> {
    OffsetDateTime::parse(text, &Iso8601::DEFAULT)
        .map_err(|e| DomainError::InvalidTimestamp(format!("'{text}': {e}")))
}
