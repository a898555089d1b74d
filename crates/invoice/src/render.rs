// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Plain-text invoice rendering.
//!
//! An invoice is a sequence of fixed-width text pages separated by form
//! feeds. Every page repeats the issuer, invoice number and page counter;
//! the first page carries the billing block and the last page carries the
//! totals. Item rows are split across pages at `lines_per_page`.

use crate::config::{InvoiceConfig, TaxMode};
use crate::error::RenderError;
use pillora_domain::{Order, OrderItem, format_money};
use rust_decimal::Decimal;
use time::macros::format_description;

/// Character width of a rendered page.
pub const PAGE_WIDTH: usize = 72;

/// Separator placed between pages.
pub const PAGE_BREAK: &str = "\u{000C}\n";

const NAME_WIDTH: usize = 32;
const QTY_WIDTH: usize = 6;
const AMOUNT_WIDTH: usize = 16;

/// The computed totals block of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    /// Present only when a tax rate was applied.
    pub tax: Option<Decimal>,
    pub total: Decimal,
}

/// A rendered invoice document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedInvoice {
    pub invoice_number: String,
    pub text: String,
    pub page_count: usize,
    pub totals: InvoiceTotals,
}

/// Computes the totals block for an order under a tax mode.
///
/// # Errors
///
/// Returns `RenderError::TotalMismatch` when passing the stored total
/// through and it disagrees with the item subtotal, or
/// `RenderError::AmountOverflow` when subtotal plus tax does not fit.
pub fn compute_totals(order: &Order, tax_mode: TaxMode) -> Result<InvoiceTotals, RenderError> {
    let subtotal: Decimal = order.items_subtotal();
    match tax_mode {
        TaxMode::PassThrough => {
            if order.total_amount() != subtotal {
                return Err(RenderError::TotalMismatch {
                    order_number: order.order_number().to_string(),
                    stored: format_money(order.total_amount()),
                    subtotal: format_money(subtotal),
                });
            }
            Ok(InvoiceTotals {
                subtotal,
                tax: None,
                total: order.total_amount(),
            })
        }
        TaxMode::Taxed(rate) => {
            let tax: Decimal = rate.tax_on(subtotal);
            let total: Decimal = subtotal
                .checked_add(tax)
                .ok_or_else(|| RenderError::AmountOverflow(order.order_number().to_string()))?;
            Ok(InvoiceTotals {
                subtotal,
                tax: Some(tax),
                total,
            })
        }
    }
}

/// Renders the invoice document for an order.
///
/// # Errors
///
/// Returns `RenderError::NoItems` for an order without items, and the
/// errors of `compute_totals`.
pub fn render_invoice(order: &Order, config: &InvoiceConfig) -> Result<RenderedInvoice, RenderError> {
    if order.items().is_empty() {
        return Err(RenderError::NoItems(order.order_number().to_string()));
    }

    let totals: InvoiceTotals = compute_totals(order, config.tax_mode)?;
    let invoice_number: String = order.order_number().invoice_number();
    let invoice_date: String = order
        .created_at()
        .date()
        .format(format_description!("[year]-[month]-[day]"))
        .map_err(|e| RenderError::DateFormat(e.to_string()))?;

    let chunks: Vec<&[OrderItem]> = order.items().chunks(config.lines_per_page.max(1)).collect();
    let page_count: usize = chunks.len();
    let symbol: &str = &config.currency_symbol;

    let mut pages: Vec<String> = Vec::with_capacity(page_count);
    for (index, chunk) in chunks.iter().enumerate() {
        let page_number: usize = index + 1;
        let mut lines: Vec<String> = Vec::new();

        let counter: String = format!("Page {page_number} of {page_count}");
        lines.push(config.issuer_name.clone());
        lines.push(format!(
            "{:<width$}{counter}",
            format!("Invoice Number: {invoice_number}"),
            width = PAGE_WIDTH.saturating_sub(counter.chars().count())
        ));
        lines.push(format!("Order Number: {}", order.order_number()));
        lines.push(format!("Date: {invoice_date}"));

        if page_number == 1 {
            lines.push(String::new());
            lines.push(format!("Customer Name: {}", order.customer().name));
            lines.push(format!("Customer Email: {}", order.customer().email));
            lines.push(format!("Shipping Address: {}", order.shipping_address()));
            lines.push(format!("Payment Method: {}", order.payment_method()));
        }

        lines.push(String::new());
        lines.push("Items:".to_string());
        lines.push(rule());
        lines.push(format!(
            "{:<NAME_WIDTH$}{:>QTY_WIDTH$}{:>AMOUNT_WIDTH$}{:>AMOUNT_WIDTH$}",
            "Item", "Qty", "Unit Price", "Line Total"
        ));
        lines.push(rule());
        for item in *chunk {
            lines.push(item_row(item, symbol));
        }
        lines.push(rule());

        if page_number == page_count {
            lines.push(totals_row("Subtotal:", symbol, totals.subtotal));
            if let (TaxMode::Taxed(rate), Some(tax)) = (config.tax_mode, totals.tax) {
                lines.push(totals_row(&format!("Tax ({rate}):"), symbol, tax));
            }
            lines.push(totals_row("Total Amount:", symbol, totals.total));
        }

        pages.push(lines.join("\n") + "\n");
    }

    Ok(RenderedInvoice {
        invoice_number,
        text: pages.join(PAGE_BREAK),
        page_count,
        totals,
    })
}

fn rule() -> String {
    "-".repeat(PAGE_WIDTH)
}

fn item_row(item: &OrderItem, symbol: &str) -> String {
    let name: String = item.name.chars().take(NAME_WIDTH - 1).collect();
    format!(
        "{name:<NAME_WIDTH$}{:>QTY_WIDTH$}{:>AMOUNT_WIDTH$}{:>AMOUNT_WIDTH$}",
        item.quantity,
        format!("{symbol}{}", format_money(item.price)),
        format!("{symbol}{}", format_money(item.line_total())),
    )
}

fn totals_row(label: &str, symbol: &str, amount: Decimal) -> String {
    let value: String = format!("{symbol}{}", format_money(amount));
    format!(
        "{label:>width$}{value:>AMOUNT_WIDTH$}",
        width = PAGE_WIDTH - AMOUNT_WIDTH
    )
}
