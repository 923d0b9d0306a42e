//! models/status_model.rs
//! Estado de pickup / delivery por tienda y la fila que va al log CSV.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Formato de fecha del log (día primero, hora local)
pub const DATE_TIME_FMT: &str = "%d/%m/%Y %H:%M:%S";

/// Ubicaciones de Bharat Bazar en el SF Bay Area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreLocation {
    #[serde(rename = "FREMONT")]
    Fremont,
    #[serde(rename = "UNION CITY")]
    UnionCity,
    #[serde(rename = "SUNNYVALE")]
    Sunnyvale,
}

impl StoreLocation {
    /// Texto tal como aparece en los <h4> de la página de selección
    pub fn page_label(&self) -> &'static str {
        match self {
            StoreLocation::Fremont => "FREMONT",
            StoreLocation::UnionCity => "UNION CITY",
            StoreLocation::Sunnyvale => "SUNNYVALE",
        }
    }

    /// Nombre de tienda que va al log: "Bharat_Bazar_<UBICACIÓN>"
    pub fn store_name(&self) -> String {
        format!("Bharat_Bazar_{}", self.page_label())
    }
}

impl fmt::Display for StoreLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.page_label())
    }
}

/// Estado de un canal (pickup o delivery): código 0/1 más mensaje legible
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotStatus {
    pub code: u8, // 0 = cerrado, 1 = abierto
    pub msg: String,
}

impl SlotStatus {
    pub fn open() -> Self {
        SlotStatus {
            code: 1,
            msg: "open".to_string(),
        }
    }

    pub fn closed() -> Self {
        SlotStatus::closed_with("closed")
    }

    pub fn closed_with(msg: &str) -> Self {
        SlotStatus {
            code: 0,
            msg: msg.to_string(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.code == 1
    }
}

/// Resultado del scraping de una ubicación
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStatus {
    pub pickup: SlotStatus,
    pub delivery: SlotStatus,
}

impl StoreStatus {
    /// Estado registrado cuando se agotan los reintentos
    pub fn max_attempts() -> Self {
        StoreStatus {
            pickup: SlotStatus::closed_with("Max attempts reached"),
            delivery: SlotStatus::closed_with("Max attempts reached"),
        }
    }
}

/// Fila del log CSV; inmutable una vez escrita
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusRecord {
    pub t: String,
    pub store: String,
    pub pickup_code: u8,
    pub delivery_code: u8,
    pub pickup_msg: String,
    pub delivery_msg: String,
}

impl StatusRecord {
    pub fn new(location: StoreLocation, status: &StoreStatus, at: DateTime<Local>) -> Self {
        StatusRecord {
            t: at.format(DATE_TIME_FMT).to_string(),
            store: location.store_name(),
            pickup_code: status.pickup.code,
            delivery_code: status.delivery.code,
            pickup_msg: status.pickup.msg.clone(),
            delivery_msg: status.delivery.msg.clone(),
        }
    }
}

/// Resultado de una ubicación dentro de un ciclo
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub location: StoreLocation,
    pub status: StoreStatus,
    /// false cuando el scraping agotó los reintentos
    pub success: bool,
}

impl CheckOutcome {
    /// Fragmento del asunto del email, p. ej.
    /// "BHARAT_BAZAR_FREMONT (pickup, delivery)   ".
    /// Vacío si no hay nada abierto o la corrida falló.
    pub fn summary_fragment(&self) -> String {
        if !self.success {
            return String::new();
        }

        let mut channels = String::new();
        if self.status.pickup.is_open() {
            channels.push_str("pickup");
        }
        if self.status.delivery.is_open() {
            if !channels.is_empty() {
                channels.push_str(", ");
            }
            channels.push_str("delivery");
        }

        if channels.is_empty() {
            return String::new();
        }
        format!(
            "{} ({})   ",
            self.location.store_name().to_uppercase(),
            channels
        )
    }
}
