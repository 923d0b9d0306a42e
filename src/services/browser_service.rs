//! services/browser_service.rs
//! Sesión de Chromium headless vía chromiumoxide (CDP). Cada intento de
//! scraping usa una sesión fresca con su propio perfil temporal.

use anyhow::{anyhow, Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures_util::StreamExt;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Prefijo del perfil temporal de Chrome
const PROFILE_DIR_PREFIX: &str = "slot_watcher";

pub struct BrowserService {
    browser: Browser,
    handler_task: JoinHandle<()>,
    profile_dir: PathBuf,
}

impl BrowserService {
    /// Lanza una instancia headless con un user-data-dir único bajo el
    /// temp dir del sistema. Perfiles compartidos hacen que Chrome se
    /// niegue a arrancar cuando queda un lock de una corrida anterior.
    pub async fn launch(chrome: &Path) -> Result<Self> {
        let profile_dir =
            std::env::temp_dir().join(format!("{}_{}", PROFILE_DIR_PREFIX, Uuid::new_v4()));
        fs::create_dir_all(&profile_dir)
            .with_context(|| format!("No se pudo crear el perfil temporal {:?}", profile_dir))?;

        let config = BrowserConfig::builder()
            .chrome_executable(chrome)
            .args(vec![
                "--headless",
                "--no-sandbox",
                "--disable-setuid-sandbox",
                "--disable-gpu",
                "--disable-dev-shm-usage",
                "--no-first-run",
                "--no-default-browser-check",
                "--disable-background-networking",
                "--disable-extensions",
                "--disable-popup-blocking",
                "--disable-sync",
                &format!("--user-data-dir={}", profile_dir.display()),
            ])
            .build()
            .map_err(|e| anyhow!("BrowserConfig inválida: {}", e))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .context("No se pudo lanzar Chromium")?;

        // Los eventos CDP se consumen en un task aparte mientras viva la sesión
        let handler_task = tokio::spawn(async move {
            while let Some(_evt) = handler.next().await {}
        });

        Ok(BrowserService {
            browser,
            handler_task,
            profile_dir,
        })
    }

    pub async fn new_page(&self) -> Result<Page> {
        self.browser
            .new_page("about:blank")
            .await
            .context("No se pudo abrir una página nueva")
    }

    /// Cierra el browser, detiene el task de eventos y borra el perfil.
    pub async fn shutdown(mut self) {
        if let Err(e) = self.browser.close().await {
            log::warn!("Error cerrando Chromium: {}", e);
        }
        let _ = self.browser.wait().await;
        self.handler_task.abort();
        let _ = fs::remove_dir_all(&self.profile_dir);
    }
}
