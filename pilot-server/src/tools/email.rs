use super::{ToolError, ToolKind};
use crate::config::Config;
use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("could not build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("{0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Parameters as the planner writes them. The subject is accepted but the
/// configured one is always used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmailParams {
    #[serde(default)]
    pub recipient: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

impl EmailParams {
    pub fn from_value(params: Value) -> Result<Self, ToolError> {
        serde_json::from_value(params)
            .map_err(|e| ToolError::invalid_params(ToolKind::SendEmail, e))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;
}

/// Authenticated SMTP relay with a STARTTLS upgrade.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &Config) -> Result<Self, MailError> {
        let creds = Credentials::new(config.sender_email.clone(), config.sender_password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(creds)
            .build();

        Ok(Self {
            transport,
            from: config.sender_email.parse()?,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let message = build_message(&self.from, email)?;
        self.transport.send(message).await?;
        Ok(())
    }
}

/// Single HTML part inside a multipart/mixed envelope.
pub fn build_message(from: &Mailbox, email: &OutgoingEmail) -> Result<Message, MailError> {
    let message = Message::builder()
        .from(from.clone())
        .to(email.to.parse::<Mailbox>()?)
        .subject(email.subject.as_str())
        .multipart(MultiPart::mixed().singlepart(SinglePart::html(email.html_body.clone())))?;
    Ok(message)
}

pub async fn send_email(
    mailer: &dyn Mailer,
    subject: &str,
    params: &EmailParams,
) -> Result<String, ToolError> {
    let recipient = params.recipient.as_deref().filter(|r| !r.trim().is_empty());
    let body = params.body.as_deref().filter(|b| !b.trim().is_empty());
    let (Some(recipient), Some(body)) = (recipient, body) else {
        return Err(ToolError::MissingEmailFields);
    };

    let email = OutgoingEmail {
        to: recipient.trim().to_string(),
        subject: subject.to_string(),
        html_body: body.to_string(),
    };

    info!("Sending email to {}", email.to);
    mailer
        .send(&email)
        .await
        .map_err(|e| ToolError::Email(e.to_string()))?;

    Ok("Email sent successfully".to_string())
}
