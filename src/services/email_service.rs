//! services/email_service.rs
//! Notificación por SMTP (Gmail): el resumen de disponibilidad viaja en el
//! asunto, un mensaje por destinatario.

use anyhow::{Context, Result};
use lettre::{
    message::Mailbox,
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::time::Duration;

const SMTP_HOST: &str = "smtp.gmail.com";
const SMTP_PORT: u16 = 587;
/// Pausa entre envíos consecutivos; Gmail corta ráfagas muy seguidas
const PAUSE_BETWEEN_SENDS: Duration = Duration::from_secs(2);
const SEND_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct EmailService {
    sender: String,
    token: String,
    recipients: Vec<String>,
}

impl EmailService {
    pub fn new(sender: String, token: String, recipients: Vec<String>) -> Self {
        EmailService {
            sender,
            token,
            recipients,
        }
    }

    pub async fn send_summary(&self, summary: &str) -> Result<()> {
        let from: Mailbox = self
            .sender
            .parse()
            .context("Dirección de origen inválida")?;

        let tls_params = TlsParameters::new(SMTP_HOST.to_string())?;
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(SMTP_HOST)?
            .port(SMTP_PORT)
            .credentials(Credentials::new(self.sender.clone(), self.token.clone()))
            .tls(Tls::Required(tls_params))
            .build();

        for recipient in &self.recipients {
            let to: Mailbox = recipient
                .parse()
                .with_context(|| format!("Destinatario inválido: {}", recipient))?;
            let message = Message::builder()
                .from(from.clone())
                .to(to)
                .subject(summary)
                .body(String::new())?;

            tokio::time::timeout(SEND_TIMEOUT, mailer.send(message))
                .await
                .context("Timeout enviando el email")??;
            log::info!("Resumen enviado a {}", recipient);
            tokio::time::sleep(PAUSE_BETWEEN_SENDS).await;
        }
        Ok(())
    }
}
