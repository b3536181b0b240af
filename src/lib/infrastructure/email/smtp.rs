//! SMTP mail transport implementation

use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;
use lettre::{
    message::{MultiPart, SinglePart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    Message, SmtpTransport, Transport,
};

use crate::domain::{
    mailer::{EmailAddress, Mailer, MailerError},
    rendering::{MimeType, Part},
};

/// SMTP configuration
#[derive(Clone, Default, Debug, Parser)]
pub struct SMTPConfig {
    /// The SMTP host
    #[clap(long, env = "SMTP_HOST")]
    pub host: String,

    /// The SMTP port
    #[clap(long, env = "SMTP_PORT")]
    pub port: u16,

    /// The SMTP username
    #[clap(long, env = "SMTP_USER")]
    pub username: String,

    /// The SMTP password
    #[clap(long, env = "SMTP_PASSWORD")]
    pub password: String,

    /// The sender email address
    #[clap(long, env = "SMTP_SENDER")]
    pub sender: String,

    /// Verify the TLS certificate
    #[clap(long, env = "SMTP_VERIFY_TLS", default_value = "true")]
    pub verify_tls: bool,

    /// Enable STARTTLS (TLS upgrade on connection)
    #[clap(long, env = "SMTP_STARTTLS", default_value = "true")]
    pub starttls: bool,
}

/// SMTP mailer
#[derive(Debug, Default, Clone)]
pub struct SMTPMailer {
    config: SMTPConfig,
}

impl SMTPMailer {
    /// Create a new SMTP mailer
    pub fn new(config: SMTPConfig) -> Self {
        Self { config }
    }

    /// Builds the SMTP transport from the configuration
    pub fn mailer(&self) -> Result<SmtpTransport> {
        let creds = Credentials::new(self.config.username.clone(), self.config.password.clone());

        let relay = if self.config.starttls {
            SmtpTransport::starttls_relay(&self.config.host)?
        } else {
            SmtpTransport::relay(&self.config.host)?
        };

        Ok(relay
            .credentials(creds)
            .port(self.config.port)
            .tls(Tls::Opportunistic(
                TlsParameters::builder(self.config.host.to_string())
                    .dangerous_accept_invalid_certs(!self.config.verify_tls)
                    .build()?,
            ))
            .build())
    }
}

fn singlepart(part: &Part) -> SinglePart {
    match part.mime_type {
        MimeType::PlainText => SinglePart::plain(part.body.clone()),
        MimeType::Html => SinglePart::html(part.body.clone()),
    }
}

#[async_trait]
impl Mailer for SMTPMailer {
    async fn send_email(
        &self,
        to: &EmailAddress,
        subject: &str,
        parts: &[Part],
    ) -> Result<(), MailerError> {
        let mut iter = parts.iter();
        // A mail without at least a text part is not sendable.
        let first = iter.next().ok_or(MailerError::SendError)?;

        let mut multipart = MultiPart::alternative().singlepart(singlepart(first));
        for part in iter {
            multipart = multipart.singlepart(singlepart(part));
        }

        let email = Message::builder()
            .from(self.config.sender.parse()?)
            .to(to.to_string().parse()?)
            .subject(subject.to_string())
            .multipart(multipart)?;

        match self.mailer()?.send(&email) {
            Ok(_) => Ok(()),
            Err(e) => Err(MailerError::UnknownError(e.into())),
        }
    }
}
