//! services/log_service.rs
//! Sink append-only en CSV para el resultado de cada ubicación por ciclo.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use crate::models::status_model::StatusRecord;

#[derive(Debug, Clone)]
pub struct LogService {
    path: PathBuf,
}

impl LogService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        LogService { path: path.into() }
    }

    /// Ruta por defecto: ./log.csv en el directorio de trabajo
    pub fn default_path() -> Result<Self> {
        let cwd = std::env::current_dir().context("No se pudo obtener el current_dir")?;
        Ok(LogService::new(cwd.join("log.csv")))
    }

    /// Agrega un registro al final del log. El header se escribe sólo
    /// cuando el archivo se crea; las filas existentes nunca se tocan.
    pub fn append(&self, record: &StatusRecord) -> Result<()> {
        let write_header = !self.path.is_file();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("No se pudo abrir el log {:?}", self.path))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);
        writer
            .serialize(record)
            .context("Fallo serializando el registro a CSV")?;
        writer.flush().context("Fallo escribiendo el log")?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
