//! tests/config_tests.rs
//! Pruebas de la carga y el parseo de la configuración JSON.

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;
    use uuid::Uuid;

    use crate::config::watch_config::WatchConfig;
    use crate::models::status_model::StoreLocation;

    const FULL_CONFIG: &str = r#"{
        "EMAIL_SRC": "watcher@example.com",
        "GMAIL_TOKEN": "app-token",
        "EMAIL_TARGETS": ["a@example.com", "b@example.com"],
        "USERNAME": "user@example.com",
        "PASSWORD": "secreta",
        "LOCATIONS": ["FREMONT", "UNION CITY"]
    }"#;

    #[test]
    fn test_parse_full_config() {
        let config: WatchConfig = serde_json::from_str(FULL_CONFIG).unwrap();
        assert_eq!(config.email_src, "watcher@example.com");
        assert_eq!(config.username, "user@example.com");
        assert_eq!(
            config.email_targets.as_vec(),
            vec!["a@example.com", "b@example.com"]
        );
        assert_eq!(
            config.locations,
            vec![StoreLocation::Fremont, StoreLocation::UnionCity]
        );
        assert!(config.chrome.is_none());
    }

    #[test]
    fn test_targets_accept_bare_string() {
        let raw = r#"{
            "EMAIL_SRC": "watcher@example.com",
            "GMAIL_TOKEN": "app-token",
            "EMAIL_TARGETS": "solo@example.com",
            "USERNAME": "user@example.com",
            "PASSWORD": "secreta"
        }"#;
        let config: WatchConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.email_targets.as_vec(), vec!["solo@example.com"]);
    }

    #[test]
    fn test_locations_default_to_all_three() {
        let raw = r#"{
            "EMAIL_SRC": "watcher@example.com",
            "GMAIL_TOKEN": "app-token",
            "EMAIL_TARGETS": "solo@example.com",
            "USERNAME": "user@example.com",
            "PASSWORD": "secreta"
        }"#;
        let config: WatchConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(
            config.locations,
            vec![
                StoreLocation::Fremont,
                StoreLocation::UnionCity,
                StoreLocation::Sunnyvale
            ]
        );
    }

    #[test]
    fn test_unknown_location_is_rejected() {
        let raw = FULL_CONFIG.replace("UNION CITY", "SAN JOSE");
        let result = serde_json::from_str::<WatchConfig>(&raw);
        assert!(result.is_err(), "SAN JOSE no es una ubicación válida");
    }

    #[test]
    fn test_load_missing_file() {
        let result = WatchConfig::load(Path::new("/definitivamente/no/existe.json"));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("not found"), "Error inesperado: {}", err);
    }

    #[test]
    fn test_load_from_file() {
        let path =
            std::env::temp_dir().join(format!("slot_watcher_config_{}.json", Uuid::new_v4()));
        fs::write(&path, FULL_CONFIG).unwrap();

        let config = WatchConfig::load(&path).unwrap();
        assert_eq!(config.password, "secreta");
        assert_eq!(config.locations.len(), 2);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_empty_locations() {
        let raw = FULL_CONFIG.replace(r#"["FREMONT", "UNION CITY"]"#, "[]");
        let path =
            std::env::temp_dir().join(format!("slot_watcher_config_{}.json", Uuid::new_v4()));
        fs::write(&path, raw).unwrap();

        let result = WatchConfig::load(&path);
        assert!(result.is_err(), "LOCATIONS vacío debe fallar");

        let _ = fs::remove_file(&path);
    }
}
