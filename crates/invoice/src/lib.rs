// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Invoice rendering and notification for placed orders.
//!
//! `render` turns an order into a paginated text document, `artifact`
//! manages the short-lived file handed to the mail transport, and
//! `pipeline` runs the whole job off the request path with a bounded queue
//! and a dead-letter log. `smtp` delivers the resulting email through a
//! relay; without one, `TracingTransport` logs what would have been sent.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod artifact;
mod config;
mod dead_letter;
mod error;
mod mail;
mod pipeline;
mod render;
mod smtp;

#[cfg(test)]
mod tests;

pub use artifact::{ArtifactStore, InvoiceArtifact, attachment_filename};
pub use config::{DEFAULT_SMTP_PORT, InvoiceConfig, SmtpConfig, TaxMode};
pub use dead_letter::{DeadLetter, DeadLetterLog};
pub use error::{ArtifactError, DispatchError, InvoiceError, JobStage, RenderError};
pub use mail::{Attachment, MailMessage, MailTransport, TracingTransport, compose_invoice_email};
pub use pipeline::{InvoicePipeline, InvoiceService, RegeneratedInvoice};
pub use render::{
    InvoiceTotals, PAGE_BREAK, PAGE_WIDTH, RenderedInvoice, compute_totals, render_invoice,
};
pub use smtp::{SmtpTransport, build_mime_message};
