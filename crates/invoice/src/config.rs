// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use pillora_domain::TaxRate;
use std::path::PathBuf;

/// How the totals block of an invoice is computed.
///
/// One mode is chosen per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxMode {
    /// Print the stored order total as-is.
    PassThrough,
    /// Apply a tax rate to the item subtotal.
    Taxed(TaxRate),
}

/// Settings for rendering and dispatching invoices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceConfig {
    /// Name printed at the top of every page.
    pub issuer_name: String,
    /// Symbol prefixed to every amount.
    pub currency_symbol: String,
    pub tax_mode: TaxMode,
    /// Directory holding transient artifacts. Created on first use.
    pub artifact_dir: PathBuf,
    /// Number of pipeline workers.
    pub workers: usize,
    /// Jobs that may wait in the queue before submissions are dead-lettered.
    pub queue_capacity: usize,
    /// Sender address for notification emails.
    pub mail_from: String,
    /// Item rows per invoice page.
    pub lines_per_page: usize,
    /// Dead-letter entries kept in memory.
    pub dead_letter_capacity: usize,
}

impl Default for InvoiceConfig {
    fn default() -> Self {
        Self {
            issuer_name: String::from("Pillora"),
            currency_symbol: String::from("₹"),
            tax_mode: TaxMode::PassThrough,
            artifact_dir: std::env::temp_dir().join("pillora-invoices"),
            workers: 2,
            queue_capacity: 64,
            mail_from: String::from("\"Pillora Orders\" <orders@pillora.local>"),
            lines_per_page: 40,
            dead_letter_capacity: 256,
        }
    }
}

/// Default SMTP port for implicit TLS.
pub const DEFAULT_SMTP_PORT: u16 = 465;

/// Connection settings for the SMTP relay.
#[derive(Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    /// Login name. Authentication is used only when a password is also set.
    pub username: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
