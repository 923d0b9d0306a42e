//! config/watch_config.rs
//! Configuración global del watcher: credenciales SMTP, login de la tienda,
//! ubicaciones a revisar. Se carga una sola vez por proceso desde un JSON
//! (mismas claves que el deployment original).

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::models::status_model::StoreLocation;

/// Binarios de Chrome / Chromium que buscamos en PATH, en orden.
const CHROME_BINARIES: [&str; 4] = [
    "google-chrome",
    "google-chrome-stable",
    "chromium",
    "chromium-browser",
];

/// Destinatarios del email: el JSON acepta un string suelto o una lista.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EmailTargets {
    One(String),
    Many(Vec<String>),
}

impl EmailTargets {
    pub fn as_vec(&self) -> Vec<String> {
        match self {
            EmailTargets::One(addr) => vec![addr.clone()],
            EmailTargets::Many(addrs) => addrs.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WatchConfig {
    /// Cuenta desde la que se envía el resumen
    #[serde(rename = "EMAIL_SRC")]
    pub email_src: String,
    /// App password de Gmail para esa cuenta
    #[serde(rename = "GMAIL_TOKEN")]
    pub gmail_token: String,
    #[serde(rename = "EMAIL_TARGETS")]
    pub email_targets: EmailTargets,

    /// Login del sitio de la tienda
    #[serde(rename = "USERNAME")]
    pub username: String,
    #[serde(rename = "PASSWORD")]
    pub password: String,

    /// Ubicaciones a revisar; por defecto las tres tiendas del Bay Area
    #[serde(rename = "LOCATIONS", default = "default_locations")]
    pub locations: Vec<StoreLocation>,

    /// Ruta explícita al binario de Chrome (si no, se busca en PATH)
    #[serde(rename = "CHROME", default)]
    pub chrome: Option<PathBuf>,
}

fn default_locations() -> Vec<StoreLocation> {
    vec![
        StoreLocation::Fremont,
        StoreLocation::UnionCity,
        StoreLocation::Sunnyvale,
    ]
}

impl WatchConfig {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            bail!("Config file {:?} not found", path);
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Error leyendo {:?}", path))?;
        let config: WatchConfig =
            serde_json::from_str(&raw).with_context(|| format!("JSON inválido en {:?}", path))?;

        if config.locations.is_empty() {
            bail!("LOCATIONS no puede estar vacío");
        }
        Ok(config)
    }

    /// Resuelve el binario de Chrome: la clave CHROME manda; si falta,
    /// se prueba la lista habitual con `which`.
    pub fn chrome_executable(&self) -> Result<PathBuf> {
        if let Some(path) = &self.chrome {
            return Ok(path.clone());
        }
        for name in CHROME_BINARIES {
            if let Ok(found) = which::which(name) {
                return Ok(found);
            }
        }
        bail!("No se encontró Chrome/Chromium en el sistema (define la clave CHROME)")
    }
}
