// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use crate::{DispatchError, InvoiceConfig, MailMessage, MailTransport};
use async_trait::async_trait;
use pillora_domain::{
    CustomerId, CustomerSnapshot, EmailAddress, Order, OrderId, OrderItem, OrderNumber,
    OrderRecord, OrderStatus, PaymentMethod, PaymentStatus, ProductId, VendorId,
};
use rust_decimal::Decimal;
use rust_decimal::dec;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use time::macros::datetime;

static DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A fresh artifact directory that does not exist yet.
pub fn scratch_dir() -> PathBuf {
    let id: u64 = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir().join(format!("pillora-invoice-test-{}-{id}", std::process::id()))
}

pub fn test_config(dir: PathBuf) -> InvoiceConfig {
    InvoiceConfig {
        artifact_dir: dir,
        mail_from: String::from("\"Pillora Orders\" <orders@test.local>"),
        ..InvoiceConfig::default()
    }
}

pub fn item(product_id: i64, name: &str, quantity: u32, price: Decimal) -> OrderItem {
    OrderItem {
        product_id: ProductId::new(product_id),
        name: name.to_string(),
        quantity,
        price,
    }
}

pub fn order_with(number: &str, items: Vec<OrderItem>, total_amount: Decimal) -> Order {
    Order::restore(OrderRecord {
        order_id: OrderId::new(1),
        order_number: OrderNumber::parse(number).unwrap(),
        customer: CustomerSnapshot {
            customer_id: Some(CustomerId::new(7)),
            name: String::from("Asha Rao"),
            email: EmailAddress::parse("asha@example.com").unwrap(),
        },
        items,
        total_amount,
        shipping_address: String::from("12 MG Road, Pune"),
        payment_method: PaymentMethod::Cod,
        payment_status: PaymentStatus::Pending,
        status: OrderStatus::Pending,
        vendor_id: Some(VendorId::new(1)),
        created_at: datetime!(2026-03-01 10:00 UTC),
        updated_at: datetime!(2026-03-01 10:00 UTC),
    })
}

/// One item, 2 x 10.00.
pub fn simple_order(number: &str) -> Order {
    order_with(number, vec![item(101, "Paracetamol", 2, dec!(10.00))], dec!(20.00))
}

pub fn count_files(dir: &Path) -> usize {
    std::fs::read_dir(dir).map_or(0, Iterator::count)
}

/// Records every message and the attachment content seen at send time.
#[derive(Default)]
pub struct RecordingTransport {
    pub sent: Mutex<Vec<(MailMessage, String)>>,
}

#[async_trait]
impl MailTransport for RecordingTransport {
    async fn send(&self, message: &MailMessage) -> Result<(), DispatchError> {
        let attachment = message
            .attachment
            .as_ref()
            .ok_or_else(|| DispatchError::MissingAttachment(String::from("none")))?;
        let content: String = tokio::fs::read_to_string(&attachment.path)
            .await
            .map_err(|_| DispatchError::MissingAttachment(attachment.filename.clone()))?;
        self.sent.lock().unwrap().push((message.clone(), content));
        Ok(())
    }
}

/// Rejects every message.
pub struct FailingTransport;

#[async_trait]
impl MailTransport for FailingTransport {
    async fn send(&self, message: &MailMessage) -> Result<(), DispatchError> {
        Err(DispatchError::Rejected {
            to: message.to.to_string(),
            reason: String::from("smtp unavailable"),
        })
    }
}

pub fn recording() -> Arc<RecordingTransport> {
    Arc::new(RecordingTransport::default())
}
