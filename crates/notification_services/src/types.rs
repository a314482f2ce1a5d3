/// Errors raised while sending emails.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    /// SMTP transport errors (connection, TLS, authentication, rejection).
    #[error("SMTP error: {0}")]
    Smtp(String),

    /// Invalid email address format.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// The message could not be assembled.
    #[error("Failed to build message: {0}")]
    MessageBuild(String),
}

/// Connection settings for the SMTP relay.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// Host name of the SMTP server.
    pub smtp_server: String,
    /// Port of the SMTP server (STARTTLS).
    pub smtp_port: u16,
    /// Login for the SMTP server.
    pub smtp_username: String,
    /// Password for the SMTP server.
    pub smtp_password: String,
    /// Address used in the `From` header.
    pub sender_email: String,
}
