// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Errors produced while rendering an invoice document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("order {0} has no items to invoice")]
    NoItems(String),
    #[error("stored total {stored} for order {order_number} does not match item subtotal {subtotal}")]
    TotalMismatch {
        order_number: String,
        stored: String,
        subtotal: String,
    },
    #[error("failed to format invoice date: {0}")]
    DateFormat(String),
    #[error("invoice total for order {0} is too large")]
    AmountOverflow(String),
}

/// Errors produced while writing, reading, or removing an artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to create artifact directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write artifact {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read artifact {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to remove artifact {path}: {source}")]
    Remove {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors reported by a mail transport.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("attachment {0} is missing")]
    MissingAttachment(String),
    #[error("mail transport rejected message to {to}: {reason}")]
    Rejected { to: String, reason: String },
    #[error("invalid email message: {0}")]
    InvalidMessage(String),
    #[error("invalid SMTP configuration: {0}")]
    Configuration(String),
}

/// Errors from the invoice pipeline as a whole.
#[derive(Debug, Error)]
pub enum InvoiceError {
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    #[error("invoice queue is full, dropping order {0}")]
    QueueFull(String),
    #[error("invoice queue is closed, dropping order {0}")]
    QueueClosed(String),
}

/// The pipeline step at which a job failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobStage {
    Queue,
    Render,
    Artifact,
    Dispatch,
}

impl JobStage {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Queue => "queue",
            Self::Render => "render",
            Self::Artifact => "artifact",
            Self::Dispatch => "dispatch",
        }
    }
}

impl std::fmt::Display for JobStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl InvoiceError {
    /// Returns the step that produced this error.
    #[must_use]
    pub const fn stage(&self) -> JobStage {
        match self {
            Self::Render(_) => JobStage::Render,
            Self::Artifact(_) => JobStage::Artifact,
            Self::Dispatch(_) => JobStage::Dispatch,
            Self::QueueFull(_) | Self::QueueClosed(_) => JobStage::Queue,
        }
    }
}
