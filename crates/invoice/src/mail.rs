// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Invoice notification emails.

use crate::config::InvoiceConfig;
use crate::error::DispatchError;
use crate::render::RenderedInvoice;
use async_trait::async_trait;
use pillora_domain::{EmailAddress, Order, format_money};
use std::fmt::Write;
use std::path::PathBuf;
use tracing::info;

/// A file attached to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Name shown to the recipient.
    pub filename: String,
    /// Where the transport reads the content from.
    pub path: PathBuf,
    pub content_type: &'static str,
}

/// An outbound email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub from: String,
    pub to: EmailAddress,
    pub subject: String,
    pub html_body: String,
    pub attachment: Option<Attachment>,
}

/// Delivers email. Implementations must read any attachment before
/// `send` returns; the file is removed right after.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Sends one message.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError` when the message could not be delivered.
    async fn send(&self, message: &MailMessage) -> Result<(), DispatchError>;
}

/// Transport that logs each message instead of delivering it. Used when no
/// SMTP relay is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTransport;

#[async_trait]
impl MailTransport for TracingTransport {
    async fn send(&self, message: &MailMessage) -> Result<(), DispatchError> {
        let attachment_bytes: Option<u64> = match &message.attachment {
            Some(attachment) => Some(
                tokio::fs::metadata(&attachment.path)
                    .await
                    .map_err(|_| DispatchError::MissingAttachment(attachment.filename.clone()))?
                    .len(),
            ),
            None => None,
        };

        info!(
            from = %message.from,
            to = %message.to,
            subject = %message.subject,
            attachment_bytes,
            "SMTP not configured; invoice email logged, not delivered"
        );
        Ok(())
    }
}

/// Builds the invoice email for an order.
#[must_use]
pub fn compose_invoice_email(
    order: &Order,
    rendered: &RenderedInvoice,
    config: &InvoiceConfig,
    attachment: Attachment,
) -> MailMessage {
    MailMessage {
        from: config.mail_from.clone(),
        to: order.customer().email.clone(),
        subject: format!("Your {} Order Invoice - {}", config.issuer_name, order.order_number()),
        html_body: html_body(order, rendered, &config.currency_symbol),
        attachment: Some(attachment),
    }
}

fn html_body(order: &Order, rendered: &RenderedInvoice, symbol: &str) -> String {
    let mut body: String = String::new();
    body.push_str("<h1>Thank you for your order!</h1>\n");
    let _ = writeln!(body, "<p>Dear {},</p>", escape_html(&order.customer().name));
    body.push_str("<p>Your order has been placed successfully. Please find your invoice attached.</p>\n");
    body.push_str("<h2>Order Details</h2>\n<ul>\n");
    let _ = writeln!(body, "<li>Order Number: {}</li>", order.order_number());
    let _ = writeln!(body, "<li>Invoice Number: {}</li>", rendered.invoice_number);
    let _ = writeln!(body, "<li>Payment Method: {}</li>", order.payment_method());
    let _ = writeln!(
        body,
        "<li>Shipping Address: {}</li>",
        escape_html(order.shipping_address())
    );
    body.push_str("</ul>\n<h2>Items</h2>\n<ul>\n");
    for item in order.items() {
        let _ = writeln!(
            body,
            "<li>{} &times; {} @ {symbol}{} each = {symbol}{}</li>",
            escape_html(&item.name),
            item.quantity,
            format_money(item.price),
            format_money(item.line_total()),
        );
    }
    body.push_str("</ul>\n");
    if let Some(tax) = rendered.totals.tax {
        let _ = writeln!(body, "<p>Tax: {symbol}{}</p>", format_money(tax));
    }
    let _ = writeln!(
        body,
        "<p><strong>Total Amount: {symbol}{}</strong></p>",
        format_money(rendered.totals.total)
    );
    body
}

fn escape_html(text: &str) -> String {
    let mut escaped: String = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
