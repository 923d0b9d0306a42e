//! services/watch_service.rs
//! Orquestación: reintentos por ubicación, escritura del log y
//! notificación condicional. Un ciclo recorre todas las ubicaciones en
//! orden, estrictamente secuencial.

use anyhow::{Context, Result};
use chrono::Local;
use std::path::PathBuf;

use crate::config::watch_config::WatchConfig;
use crate::models::status_model::{CheckOutcome, StatusRecord, StoreLocation, StoreStatus};
use crate::services::browser_service::BrowserService;
use crate::services::email_service::EmailService;
use crate::services::log_service::LogService;
use crate::services::scrape_service::ScrapeService;

/// Intentos por ubicación antes de registrar la corrida como fallida
const MAX_ATTEMPTS: u32 = 4;

pub struct WatchService {
    locations: Vec<StoreLocation>,
    chrome: PathBuf,
    scraper: ScrapeService,
    log: LogService,
    email: EmailService,
}

impl WatchService {
    pub fn new(config: WatchConfig) -> Result<Self> {
        let chrome = config.chrome_executable()?;
        log::info!("Usando Chrome en {:?}", chrome);

        let log_service = LogService::default_path()?;
        log::info!("Log en {:?}", log_service.path());

        Ok(WatchService {
            locations: config.locations.clone(),
            chrome,
            scraper: ScrapeService::new(config.username.clone(), config.password.clone()),
            log: log_service,
            email: EmailService::new(
                config.email_src.clone(),
                config.gmail_token.clone(),
                config.email_targets.as_vec(),
            ),
        })
    }

    /// Loop infinito: un ciclo tras otro. No hay pausa entre ciclos; los
    /// waits de UI dentro de cada scraping ya marcan el ritmo.
    pub async fn run_forever(&self) -> Result<()> {
        loop {
            let summary = self.run_cycle().await?;
            if summary.is_empty() {
                log::info!("Sin slots abiertos en este ciclo");
            } else {
                self.email
                    .send_summary(&summary)
                    .await
                    .context("Fallo enviando la notificación")?;
            }
        }
    }

    /// Un solo ciclo, resumen al log en vez de email (modo prueba).
    pub async fn run_once(&self) -> Result<()> {
        let summary = self.run_cycle().await?;
        if summary.is_empty() {
            log::info!("Sin slots abiertos");
        } else {
            log::info!("Resumen (no enviado): {}", summary);
        }
        Ok(())
    }

    /// Recorre las ubicaciones en orden, registra cada resultado en el log
    /// y devuelve el resumen acumulado del ciclo.
    async fn run_cycle(&self) -> Result<String> {
        let mut summary = String::new();
        for &location in &self.locations {
            let outcome = self.check_with_retry(location).await?;
            let record = StatusRecord::new(location, &outcome.status, Local::now());
            self.log
                .append(&record)
                .with_context(|| format!("No se pudo escribir el log para {}", location))?;
            summary.push_str(&outcome.summary_fragment());
        }
        Ok(summary)
    }

    /// Hasta MAX_ATTEMPTS intentos; entre intentos se descarta la sesión
    /// de browser completa y se lanza una nueva.
    async fn check_with_retry(&self, location: StoreLocation) -> Result<CheckOutcome> {
        for attempt in 1..=MAX_ATTEMPTS {
            let browser = BrowserService::launch(&self.chrome).await?;
            let result = self.check_once(&browser, location).await;
            browser.shutdown().await;

            match result {
                Ok(status) => {
                    log::info!(
                        "{}: pickup={} delivery={}",
                        location,
                        status.pickup.msg,
                        status.delivery.msg
                    );
                    return Ok(CheckOutcome {
                        location,
                        status,
                        success: true,
                    });
                }
                Err(e) => {
                    log::warn!(
                        "Intento {}/{} falló para {}: {}",
                        attempt,
                        MAX_ATTEMPTS,
                        location,
                        e
                    );
                }
            }
        }

        log::error!("{}: se agotaron los {} intentos", location, MAX_ATTEMPTS);
        Ok(CheckOutcome {
            location,
            status: StoreStatus::max_attempts(),
            success: false,
        })
    }

    async fn check_once(
        &self,
        browser: &BrowserService,
        location: StoreLocation,
    ) -> Result<StoreStatus> {
        let page = browser.new_page().await?;
        let status = self.scraper.check_location(&page, location).await?;
        let _ = page.close().await;
        Ok(status)
    }
}
