//! Sign-in code delivery.
//!
//! [`SmtpMailer`] is used when `SMTP_HOST` is set. Otherwise the server runs
//! with [`LogMailer`], which prints codes to the log for local work.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::env_or;

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Email build error: {0}")]
    Build(String),
}

/// Delivers a sign-in code to an address.
#[async_trait]
pub trait OtpMailer: Send + Sync {
    async fn send_code(&self, to_email: &str, code: &str, ttl_mins: i64) -> Result<(), MailError>;
}

/// SMTP relay settings. Port 587 with STARTTLS unless `SMTP_PORT` says
/// otherwise; credentials are used only when both are present.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub from_address: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
}

impl MailConfig {
    /// `None` when `SMTP_HOST` is unset.
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: env_or("SMTP_PORT", 587),
            from_address: env_or("SMTP_FROM", "noreply@storefront.local".to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }

    fn credentials(&self) -> Option<Credentials> {
        match (&self.smtp_user, &self.smtp_password) {
            (Some(user), Some(password)) => Some(Credentials::new(user.clone(), password.clone())),
            _ => None,
        }
    }
}

/// Plain-text message carrying a code.
#[derive(Debug, PartialEq, Eq)]
pub struct CodeEmail {
    pub subject: &'static str,
    pub body: String,
}

impl CodeEmail {
    pub fn new(code: &str, ttl_mins: i64) -> Self {
        Self {
            subject: "Your sign-in code",
            body: format!(
                "Your sign-in code is {code}.\n\n\
                 It expires in {ttl_mins} minutes. If you did not ask for it, ignore this email."
            ),
        }
    }
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Fails on a bad sender address or an unusable relay host.
    pub fn new(config: MailConfig) -> Result<Self, MailError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port);
        if let Some(credentials) = config.credentials() {
            builder = builder.credentials(credentials);
        }

        Ok(Self {
            transport: builder.build(),
            from: config.from_address.parse()?,
        })
    }
}

#[async_trait]
impl OtpMailer for SmtpMailer {
    async fn send_code(&self, to_email: &str, code: &str, ttl_mins: i64) -> Result<(), MailError> {
        let email = CodeEmail::new(code, ttl_mins);
        let message = Message::builder()
            .from(self.from.clone())
            .to(to_email.parse()?)
            .subject(email.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(email.body)
            .map_err(|e| MailError::Build(e.to_string()))?;

        self.transport.send(message).await?;
        tracing::info!(to = to_email, "Sign-in code emailed");
        Ok(())
    }
}

/// Logs codes instead of sending them.
#[derive(Debug, Default)]
pub struct LogMailer;

#[async_trait]
impl OtpMailer for LogMailer {
    async fn send_code(&self, to_email: &str, code: &str, ttl_mins: i64) -> Result<(), MailError> {
        tracing::warn!(to = to_email, code, ttl_mins, "Sign-in code (not emailed)");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(from: &str) -> MailConfig {
        MailConfig {
            smtp_host: "smtp.shop.test".into(),
            smtp_port: 2525,
            from_address: from.into(),
            smtp_user: Some("mailer".into()),
            smtp_password: None,
        }
    }

    #[test]
    fn email_carries_code_and_lifetime() {
        let email = CodeEmail::new("482913", 10);
        assert_eq!(email.subject, "Your sign-in code");
        assert!(email.body.starts_with("Your sign-in code is 482913."));
        assert!(email.body.contains("10 minutes"));
    }

    #[test]
    fn half_configured_credentials_are_ignored() {
        assert!(config("shop@shop.test").credentials().is_none());
    }

    #[tokio::test]
    async fn bad_sender_address_is_rejected_up_front() {
        let result = SmtpMailer::new(config("not an address"));
        assert!(matches!(result, Err(MailError::Address(_))));
    }

    #[tokio::test]
    async fn log_mailer_never_fails() {
        assert!(LogMailer.send_code("a@shop.pk", "000000", 10).await.is_ok());
    }
}
