//! tests/status_tests.rs
//! Pruebas del armado del resumen, la clasificación de delivery y la fila
//! que va al log.

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};

    use crate::models::status_model::{
        CheckOutcome, SlotStatus, StatusRecord, StoreLocation, StoreStatus,
    };
    use crate::services::scrape_service::{classify_delivery, DeliveryFacts};

    fn outcome(location: StoreLocation, pickup_open: bool, delivery_open: bool) -> CheckOutcome {
        CheckOutcome {
            location,
            status: StoreStatus {
                pickup: if pickup_open {
                    SlotStatus::open()
                } else {
                    SlotStatus::closed()
                },
                delivery: if delivery_open {
                    SlotStatus::open()
                } else {
                    SlotStatus::closed()
                },
            },
            success: true,
        }
    }

    #[test]
    fn test_summary_both_open() {
        let o = outcome(StoreLocation::Fremont, true, true);
        assert_eq!(
            o.summary_fragment(),
            "BHARAT_BAZAR_FREMONT (pickup, delivery)   "
        );
    }

    #[test]
    fn test_summary_pickup_only() {
        // La ubicación con espacio conserva el espacio en el asunto
        let o = outcome(StoreLocation::UnionCity, true, false);
        assert_eq!(o.summary_fragment(), "BHARAT_BAZAR_UNION CITY (pickup)   ");
    }

    #[test]
    fn test_summary_delivery_only() {
        let o = outcome(StoreLocation::Sunnyvale, false, true);
        assert_eq!(o.summary_fragment(), "BHARAT_BAZAR_SUNNYVALE (delivery)   ");
    }

    #[test]
    fn test_summary_nothing_open() {
        let o = outcome(StoreLocation::Fremont, false, false);
        assert_eq!(o.summary_fragment(), "", "Nada abierto debe dar vacío");
    }

    #[test]
    fn test_summary_failed_run_is_silent() {
        // Una corrida fallida jamás aporta al asunto, ni con códigos en 1
        let mut o = outcome(StoreLocation::Fremont, true, true);
        o.success = false;
        assert_eq!(o.summary_fragment(), "");
    }

    #[test]
    fn test_classify_delivery_open() {
        let status = classify_delivery(&DeliveryFacts::default());
        assert_eq!(status.code, 1);
        assert_eq!(status.msg, "open");
    }

    #[test]
    fn test_classify_delivery_windows_full() {
        let facts = DeliveryFacts {
            windows_full: true,
            ..Default::default()
        };
        let status = classify_delivery(&facts);
        assert_eq!(status.code, 0);
        assert_eq!(status.msg, "closed");
    }

    #[test]
    fn test_classify_delivery_min_order_takes_priority() {
        let facts = DeliveryFacts {
            min_order_notice: true,
            out_of_range_notice: true,
            windows_full: true,
        };
        let status = classify_delivery(&facts);
        assert_eq!(status.code, 0);
        assert_eq!(status.msg, "min $30 needed for delivery");
    }

    #[test]
    fn test_classify_delivery_out_of_range() {
        let facts = DeliveryFacts {
            out_of_range_notice: true,
            windows_full: true,
            ..Default::default()
        };
        let status = classify_delivery(&facts);
        assert_eq!(status.code, 0);
        assert_eq!(status.msg, "not within delivery distance");
    }

    #[test]
    fn test_record_format() {
        let at = Local.with_ymd_and_hms(2024, 4, 5, 13, 7, 9).unwrap();
        let status = StoreStatus {
            pickup: SlotStatus::open(),
            delivery: SlotStatus::closed(),
        };
        let record = StatusRecord::new(StoreLocation::Sunnyvale, &status, at);

        assert_eq!(record.t, "05/04/2024 13:07:09", "Formato día/mes/año");
        assert_eq!(record.store, "Bharat_Bazar_SUNNYVALE");
        assert_eq!(record.pickup_code, 1);
        assert_eq!(record.delivery_code, 0);
        assert_eq!(record.pickup_msg, "open");
        assert_eq!(record.delivery_msg, "closed");
    }

    #[test]
    fn test_max_attempts_status() {
        let status = StoreStatus::max_attempts();
        assert_eq!(status.pickup.code, 0);
        assert_eq!(status.delivery.code, 0);
        assert_eq!(status.pickup.msg, "Max attempts reached");
        assert_eq!(status.delivery.msg, "Max attempts reached");
    }
}
