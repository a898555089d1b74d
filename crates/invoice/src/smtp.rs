// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! SMTP delivery of invoice emails.

use crate::config::SmtpConfig;
use crate::error::DispatchError;
use crate::mail::{MailMessage, MailTransport};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment as MimeAttachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

/// Transport that relays messages through an SMTP server over implicit TLS.
#[derive(Clone)]
pub struct SmtpTransport {
    relay: AsyncSmtpTransport<Tokio1Executor>,
    host: String,
}

impl SmtpTransport {
    /// Creates a transport for the configured relay. No connection is made
    /// until the first message is sent.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::Configuration` if the host cannot be used as
    /// a TLS relay.
    pub fn new(config: &SmtpConfig) -> Result<Self, DispatchError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(|e| DispatchError::Configuration(e.to_string()))?
            .port(config.port);
        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }
        info!(host = %config.host, port = config.port, "SMTP relay configured");
        Ok(Self {
            relay: builder.build(),
            host: config.host.clone(),
        })
    }
}

impl std::fmt::Debug for SmtpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpTransport")
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl MailTransport for SmtpTransport {
    async fn send(&self, message: &MailMessage) -> Result<(), DispatchError> {
        let attachment_body: Option<Vec<u8>> = match &message.attachment {
            Some(attachment) => Some(
                tokio::fs::read(&attachment.path)
                    .await
                    .map_err(|_| DispatchError::MissingAttachment(attachment.filename.clone()))?,
            ),
            None => None,
        };
        let email: Message = build_mime_message(message, attachment_body)?;

        let response = AsyncTransport::send(&self.relay, email)
            .await
            .map_err(|e| DispatchError::Rejected {
                to: message.to.to_string(),
                reason: e.to_string(),
            })?;
        debug!(code = %response.code(), "SMTP relay accepted message");
        info!(to = %message.to, subject = %message.subject, "Invoice email sent");
        Ok(())
    }
}

/// Builds the MIME message for `message`: an HTML body, plus the attachment
/// when `attachment_body` holds its content.
///
/// # Errors
///
/// Returns `DispatchError::InvalidMessage` if an address or content type
/// cannot be parsed, or the message cannot be assembled.
pub fn build_mime_message(
    message: &MailMessage,
    attachment_body: Option<Vec<u8>>,
) -> Result<Message, DispatchError> {
    let from: Mailbox = message
        .from
        .parse()
        .map_err(|e| invalid(&format!("sender {}", message.from), &e))?;
    let to: Mailbox = message
        .to
        .as_str()
        .parse()
        .map_err(|e| invalid(&format!("recipient {}", message.to), &e))?;
    let builder = Message::builder()
        .from(from)
        .to(to)
        .subject(message.subject.clone());
    let html: SinglePart = SinglePart::html(message.html_body.clone());

    let built = match (&message.attachment, attachment_body) {
        (Some(attachment), Some(body)) => {
            let content_type: ContentType = ContentType::parse(attachment.content_type)
                .map_err(|e| invalid(attachment.content_type, &e))?;
            let part: SinglePart =
                MimeAttachment::new(attachment.filename.clone()).body(body, content_type);
            builder.multipart(MultiPart::mixed().singlepart(html).singlepart(part))
        }
        _ => builder.singlepart(html),
    };
    built.map_err(|e| invalid("message", &e))
}

fn invalid(what: &str, error: &dyn std::fmt::Display) -> DispatchError {
    DispatchError::InvalidMessage(format!("{what}: {error}"))
}
