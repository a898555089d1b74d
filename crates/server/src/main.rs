// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod logging;
mod session;


use axum::{
    Json, Router,
    extract::{Path, State as AxumState, rejection::JsonRejection},
    http::{StatusCode, header},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, patch},
};
use clap::Parser;
use pillora_api::{
    ApiError, CreateOrderRequest, CreateOrderResult, HistoryEntryResponse, OrderResponse,
    UpdatePaymentStatusRequest, UpdateStatusRequest, create_order, get_order, list_orders,
    load_invoice_order, order_history, update_order_status, update_payment_status,
};
use pillora_domain::{DomainError, Order, TaxRate, format_timestamp};
use pillora_invoice::{
    DEFAULT_SMTP_PORT, DeadLetterLog, DispatchError, InvoiceConfig, InvoiceError, InvoicePipeline,
    InvoiceService, MailTransport, RegeneratedInvoice, SmtpConfig, SmtpTransport, TaxMode,
    TracingTransport,
};
use pillora_persistence::{Persistence, PersistenceError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use session::{OptionalSessionActor, SessionActor};

/// Pillora Server - HTTP server for the Pillora order service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "PILLORA_DATABASE")]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(long, env = "PILLORA_BIND", default_value = "127.0.0.1")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, env = "PILLORA_PORT", default_value_t = 3000)]
    port: u16,

    /// Issuer name printed on invoices and used in email subjects
    #[arg(long, env = "PILLORA_ISSUER_NAME", default_value = "Pillora")]
    issuer_name: String,

    /// Currency symbol prefixed to invoice amounts
    #[arg(long, env = "PILLORA_CURRENCY_SYMBOL", default_value = "₹")]
    currency_symbol: String,

    /// Tax rate in percent applied on invoices. Without it the stored total is printed as-is.
    #[arg(long, env = "PILLORA_TAX_RATE")]
    tax_rate: Option<Decimal>,

    /// Directory for transient invoice files
    #[arg(long, env = "PILLORA_ARTIFACT_DIR")]
    artifact_dir: Option<PathBuf>,

    /// Number of invoice pipeline workers
    #[arg(long, env = "PILLORA_INVOICE_WORKERS", default_value_t = 2)]
    invoice_workers: usize,

    /// Invoice jobs that may wait before new ones are dead-lettered
    #[arg(long, env = "PILLORA_INVOICE_QUEUE", default_value_t = 64)]
    invoice_queue: usize,

    /// Sender address for invoice emails
    #[arg(
        long,
        env = "PILLORA_MAIL_FROM",
        default_value = "\"Pillora Orders\" <orders@pillora.local>"
    )]
    mail_from: String,

    /// Item rows per invoice page
    #[arg(long, env = "PILLORA_LINES_PER_PAGE", default_value_t = 40)]
    lines_per_page: usize,

    /// SMTP relay host. Without it invoice emails are logged, not delivered.
    #[arg(long, env = "PILLORA_SMTP_HOST")]
    smtp_host: Option<String>,

    /// SMTP relay port (implicit TLS)
    #[arg(long, env = "PILLORA_SMTP_PORT", default_value_t = DEFAULT_SMTP_PORT)]
    smtp_port: u16,

    /// SMTP login name
    #[arg(long, env = "PILLORA_SMTP_USER")]
    smtp_user: Option<String>,

    /// SMTP password
    #[arg(long, env = "PILLORA_SMTP_PASS", hide_env_values = true)]
    smtp_pass: Option<String>,
}

impl Args {
    fn invoice_config(&self) -> Result<InvoiceConfig, DomainError> {
        let tax_mode: TaxMode = match self.tax_rate {
            Some(percent) => TaxMode::Taxed(TaxRate::from_percent(percent)?),
            None => TaxMode::PassThrough,
        };
        let defaults: InvoiceConfig = InvoiceConfig::default();

        Ok(InvoiceConfig {
            issuer_name: self.issuer_name.clone(),
            currency_symbol: self.currency_symbol.clone(),
            tax_mode,
            artifact_dir: self
                .artifact_dir
                .clone()
                .unwrap_or(defaults.artifact_dir),
            workers: self.invoice_workers,
            queue_capacity: self.invoice_queue,
            mail_from: self.mail_from.clone(),
            lines_per_page: self.lines_per_page,
            dead_letter_capacity: defaults.dead_letter_capacity,
        })
    }

    fn smtp_config(&self) -> Option<SmtpConfig> {
        self.smtp_host.as_ref().map(|host| SmtpConfig {
            host: host.clone(),
            port: self.smtp_port,
            username: self.smtp_user.clone(),
            password: self.smtp_pass.clone(),
        })
    }

    /// Picks the SMTP relay when a host is configured, else the logging transport.
    fn mail_transport(&self) -> Result<Arc<dyn MailTransport>, DispatchError> {
        match self.smtp_config() {
            Some(smtp) => Ok(Arc::new(SmtpTransport::new(&smtp)?)),
            None => {
                warn!("PILLORA_SMTP_HOST is not set; invoice emails will be logged, not delivered");
                Ok(Arc::new(TracingTransport))
            }
        }
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The order store, serialized behind a mutex.
    persistence: Arc<Mutex<Persistence>>,
    /// Renders invoices on demand.
    invoices: Arc<InvoiceService>,
    /// Background invoice delivery.
    pipeline: Arc<InvoicePipeline>,
}

impl AppState {
    /// Starts the invoice pipeline around an opened store.
    ///
    /// Must be called inside a Tokio runtime.
    fn new(
        persistence: Persistence,
        config: InvoiceConfig,
        transport: Arc<dyn MailTransport>,
    ) -> Self {
        let dead_letters: DeadLetterLog = DeadLetterLog::new(config.dead_letter_capacity);
        let invoices: Arc<InvoiceService> = Arc::new(InvoiceService::new(config, transport));
        let pipeline: Arc<InvoicePipeline> = Arc::new(InvoicePipeline::start(
            Arc::clone(&invoices),
            dead_letters,
        ));

        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            invoices,
            pipeline,
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: format!("Invalid request body: {}", rejection.body_text()),
        }
    }
}

impl From<InvoiceError> for HttpError {
    fn from(err: InvoiceError) -> Self {
        error!(error = %err, stage = %err.stage(), "Invoice generation failed");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Invoice generation failed: {err}"),
        }
    }
}

/// Handler for GET `/`.
async fn handle_health() -> &'static str {
    "Pillora API is running..."
}

/// Handler for POST `/orders`.
///
/// The order is stored before responding; the invoice is produced and
/// mailed in the background.
async fn handle_create_order(
    AxumState(app_state): AxumState<AppState>,
    OptionalSessionActor(actor): OptionalSessionActor,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderResponse>), HttpError> {
    let Json(req) = payload?;

    let result: CreateOrderResult = {
        let mut persistence = app_state.persistence.lock().await;
        create_order(
            &mut persistence,
            req,
            actor.as_ref(),
            OffsetDateTime::now_utc(),
        )?
    };

    let order_number: String = result.order.order_number().to_string();
    if let Err(e) = app_state.pipeline.submit(result.order) {
        warn!(order_number = %order_number, error = %e, "Invoice job not queued");
    }

    Ok((StatusCode::CREATED, Json(result.response)))
}

/// Handler for GET `/orders`.
async fn handle_list_orders(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
) -> Result<Json<Vec<OrderResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let orders: Vec<OrderResponse> = list_orders(&mut persistence, &actor)?;
    Ok(Json(orders))
}

/// Handler for GET `/orders/{order}`.
async fn handle_get_order(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(order_ref): Path<String>,
) -> Result<Json<OrderResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let order: OrderResponse = get_order(&mut persistence, &order_ref, &actor)?;
    Ok(Json(order))
}

/// Handler for PATCH `/orders/{order}/status`.
async fn handle_update_status(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(order_ref): Path<String>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<OrderResponse>, HttpError> {
    let Json(req) = payload?;
    let mut persistence = app_state.persistence.lock().await;
    let order: OrderResponse = update_order_status(
        &mut persistence,
        &order_ref,
        &req,
        &actor,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(order))
}

/// Handler for PATCH `/orders/{order}/payment-status`.
async fn handle_update_payment_status(
    AxumState(app_state): AxumState<AppState>,
    OptionalSessionActor(actor): OptionalSessionActor,
    Path(order_ref): Path<String>,
    payload: Result<Json<UpdatePaymentStatusRequest>, JsonRejection>,
) -> Result<Json<OrderResponse>, HttpError> {
    let Json(req) = payload?;
    let mut persistence = app_state.persistence.lock().await;
    let order: OrderResponse = update_payment_status(
        &mut persistence,
        &order_ref,
        &req,
        actor.as_ref(),
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(order))
}

/// Handler for GET `/orders/{order}/history`.
async fn handle_order_history(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(order_ref): Path<String>,
) -> Result<Json<Vec<HistoryEntryResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let history: Vec<HistoryEntryResponse> = order_history(&mut persistence, &order_ref, &actor)?;
    Ok(Json(history))
}

/// Handler for GET `/orders/{order}/invoice`.
///
/// Regenerates the invoice, streams it, and leaves nothing on disk.
async fn handle_invoice(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(order_ref): Path<String>,
) -> Result<Response, HttpError> {
    let order: Order = {
        let mut persistence = app_state.persistence.lock().await;
        load_invoice_order(&mut persistence, &order_ref, &actor)?
    };

    let invoice: RegeneratedInvoice = app_state.invoices.regenerate(&order).await?;
    info!(
        order_number = %order.order_number(),
        bytes = invoice.bytes.len(),
        "Invoice downloaded"
    );

    Ok((
        [
            (
                header::CONTENT_TYPE,
                String::from("text/plain; charset=utf-8"),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", invoice.filename),
            ),
        ],
        invoice.bytes,
    )
        .into_response())
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_health))
        .route("/orders", get(handle_list_orders).post(handle_create_order))
        .route("/orders/{order}", get(handle_get_order))
        .route("/orders/{order}/status", patch(handle_update_status))
        .route(
            "/orders/{order}/payment-status",
            patch(handle_update_payment_status),
        )
        .route("/orders/{order}/invoice", get(handle_invoice))
        .route("/orders/{order}/history", get(handle_order_history))
        .layer(middleware::from_fn(logging::log_requests))
        .with_state(app_state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}

fn open_persistence(args: &Args) -> Result<Persistence, PersistenceError> {
    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };
    persistence.verify_schema()?;

    let now: String = format_timestamp(OffsetDateTime::now_utc())?;
    let purged: usize = persistence.delete_expired_sessions(&now)?;
    if purged > 0 {
        info!(purged, "Removed expired sessions");
    }
    Ok(persistence)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Pillora Server");

    let persistence: Persistence = open_persistence(&args)?;
    let config: InvoiceConfig = args.invoice_config()?;
    info!(
        artifact_dir = %config.artifact_dir.display(),
        workers = config.workers,
        tax_mode = ?config.tax_mode,
        "Invoice pipeline configured"
    );

    let transport: Arc<dyn MailTransport> = args.mail_transport()?;
    let app_state: AppState = AppState::new(persistence, config, transport);
    let pipeline: Arc<InvoicePipeline> = Arc::clone(&app_state.pipeline);

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pipeline.shutdown().await;
    Ok(())
}
