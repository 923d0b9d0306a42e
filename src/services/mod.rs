//! services/mod.rs
//! Módulo que agrupa distintos "servicios" o "capas de negocio" de la app.

pub mod browser_service;
pub mod email_service;
pub mod log_service;
pub mod scrape_service;
pub mod watch_service;
