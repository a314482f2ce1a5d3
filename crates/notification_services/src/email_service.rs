use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::types::{EmailConfig, NotificationError};

/// Trait for email service implementations
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Send an HTML email, returning a transport receipt
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
    ) -> Result<String, NotificationError>;
}

/// SMTP email service (STARTTLS relay with login credentials)
pub struct SmtpEmailService {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl SmtpEmailService {
    /// Create a new SMTP email service. No connection is opened until the first send.
    pub fn new(config: &EmailConfig) -> Result<Self, NotificationError> {
        let sender = parse_mailbox(&config.sender_email)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_server)
            .map_err(|e| NotificationError::Smtp(format!("Invalid SMTP relay: {}", e)))?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ))
            .build();

        Ok(Self { transport, sender })
    }

    /// Assemble an HTML message from the configured sender
    pub fn build_message(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
    ) -> Result<Message, NotificationError> {
        Message::builder()
            .from(self.sender.clone())
            .to(parse_mailbox(to)?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())
            .map_err(|e| NotificationError::MessageBuild(e.to_string()))
    }
}

#[async_trait]
impl EmailService for SmtpEmailService {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
    ) -> Result<String, NotificationError> {
        log::info!("📧 Sending email to {} with subject: {}", to, subject);

        let message = self.build_message(to, subject, html_body)?;

        let response = self.transport.send(message).await.map_err(|e| {
            log::error!("❌ SMTP error: {}", e);
            NotificationError::Smtp(e.to_string())
        })?;

        let receipt = response.code().to_string();
        log::info!("✅ Email successfully sent to {} ({})", to, receipt);

        Ok(receipt)
    }
}

/// Log-only email service for development and dry runs
pub struct MockEmailService;

#[async_trait]
impl EmailService for MockEmailService {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
    ) -> Result<String, NotificationError> {
        log::info!("📧 [MOCK EMAIL] To: {}", to);
        log::info!("📧 [MOCK EMAIL] Subject: {}", subject);
        log::debug!("📧 [MOCK EMAIL] Body:\n{}", html_body);

        let mock_id = format!("mock-email-{}", uuid::Uuid::new_v4());
        Ok(mock_id)
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, NotificationError> {
    address
        .parse()
        .map_err(|e| NotificationError::InvalidAddress(format!("{}: {}", address, e)))
}
