//! Mailer Implementations
//!
//! SMTP delivery via lettre, plus a logging mailer used when SMTP is
//! not configured (the reset URL goes to the log instead of a mailbox).

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::header::ContentType, transport::smtp::authentication::Credentials,
};

use crate::domain::mailer::ResetMailer;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// SMTP configuration
#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
    pub from_name: String,
}

impl SmtpConfig {
    /// Read SMTP settings from the environment.
    /// Returns None when the required variables are absent.
    pub fn from_env() -> Option<Self> {
        Some(Self {
            host: std::env::var("SMTP_HOST").ok()?,
            port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(587),
            username: std::env::var("SMTP_USERNAME").ok()?,
            password: std::env::var("SMTP_PASSWORD").ok()?,
            from_address: std::env::var("SMTP_FROM_ADDRESS").ok()?,
            from_name: std::env::var("SMTP_FROM_NAME")
                .unwrap_or_else(|_| "Auth Service".to_string()),
        })
    }
}

/// SMTP reset mailer
#[derive(Clone)]
pub struct SmtpResetMailer {
    config: SmtpConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpResetMailer {
    pub fn new(config: SmtpConfig) -> AuthResult<Self> {
        let creds = Credentials::new(config.username.clone(), config.password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| AuthError::Internal(format!("SMTP relay setup failed: {}", e)))?
            .port(config.port)
            .credentials(creds)
            .build();

        Ok(Self { config, transport })
    }

    fn reset_body(display_name: &str, reset_url: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
<body style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h1 style="color: #333;">Hello {display_name},</h1>
    <p>We received a request to reset your password. Click the button below to choose a new one:</p>
    <p style="text-align: center; margin: 30px 0;">
        <a href="{reset_url}" style="background-color: #4CAF50; color: white; padding: 14px 28px; text-decoration: none; border-radius: 4px; display: inline-block;">
            Reset Password
        </a>
    </p>
    <p>Or copy and paste this link into your browser:</p>
    <p style="word-break: break-all; color: #666;">{reset_url}</p>
    <p style="color: #999; font-size: 12px; margin-top: 30px;">
        This link will expire in 15 minutes. If you didn't request a reset, you can safely ignore this email.
    </p>
</body>
</html>"#
        )
    }
}

impl ResetMailer for SmtpResetMailer {
    async fn send_reset_link(
        &self,
        to: &Email,
        display_name: &str,
        reset_url: &str,
    ) -> AuthResult<()> {
        let from = format!("{} <{}>", self.config.from_name, self.config.from_address)
            .parse()
            .map_err(|e| AuthError::Internal(format!("Invalid from address: {}", e)))?;

        let to_mailbox = to
            .as_str()
            .parse()
            .map_err(|e| AuthError::Internal(format!("Invalid recipient address: {}", e)))?;

        let message = Message::builder()
            .from(from)
            .to(to_mailbox)
            .subject("Reset your password")
            .header(ContentType::TEXT_HTML)
            .body(Self::reset_body(display_name, reset_url))
            .map_err(|e| AuthError::Internal(format!("Mail build failed: {}", e)))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| AuthError::Internal(format!("Mail send failed: {}", e)))?;

        tracing::info!(to = %to, "Reset mail sent");

        Ok(())
    }
}

/// Logging mailer for environments without SMTP
#[derive(Clone, Default)]
pub struct LoggingResetMailer;

impl ResetMailer for LoggingResetMailer {
    async fn send_reset_link(
        &self,
        to: &Email,
        display_name: &str,
        reset_url: &str,
    ) -> AuthResult<()> {
        tracing::info!(
            to = %to,
            display_name = %display_name,
            reset_url = %reset_url,
            "SMTP not configured, logging reset link instead"
        );

        Ok(())
    }
}

/// Runtime-selected mailer
#[derive(Clone)]
pub enum AnyResetMailer {
    Smtp(SmtpResetMailer),
    Logging(LoggingResetMailer),
}

impl AnyResetMailer {
    /// Build from the environment: SMTP when configured, logging otherwise
    pub fn from_env() -> AuthResult<Self> {
        match SmtpConfig::from_env() {
            Some(config) => Ok(Self::Smtp(SmtpResetMailer::new(config)?)),
            None => Ok(Self::Logging(LoggingResetMailer)),
        }
    }
}

impl ResetMailer for AnyResetMailer {
    async fn send_reset_link(
        &self,
        to: &Email,
        display_name: &str,
        reset_url: &str,
    ) -> AuthResult<()> {
        match self {
            Self::Smtp(mailer) => mailer.send_reset_link(to, display_name, reset_url).await,
            Self::Logging(mailer) => mailer.send_reset_link(to, display_name, reset_url).await,
        }
    }
}
