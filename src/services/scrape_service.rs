//! services/scrape_service.rs
//! Recorrido fijo de UI sobre shopbharatbazar.com: login, selección de
//! ubicación, checkout, y lectura del estado de pickup / delivery.

use chromiumoxide::error::CdpError;
use chromiumoxide::{Element, Page};
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;

use crate::models::status_model::{SlotStatus, StoreLocation, StoreStatus};

const LOGIN_URL: &str = "https://www.shopbharatbazar.com/login";
const CHECKOUT_URL: &str = "https://www.shopbharatbazar.com/cart/checkout";

/// Pausa tras cada evento de UI (click o navegación); el sitio renderiza
/// el contenido de cada paso con un retardo visible.
const WAIT_AFTER_ACTION: Duration = Duration::from_secs(3);

const NO_PICKUP_TEXT: &str = "All pickup windows are full at the moment";
const NO_DELIVERY_TEXT: &str = "All delivery windows are full at the moment";
const MIN_ORDER_TEXT: &str = "All Delivery orders must be $30 or more";
const OUT_OF_RANGE_TEXT: &str = "Delivery is not available to the address";

/// Errores del scraping. Todos se tratan como transitorios: la página
/// pudo no terminar de cargar, o la sesión CDP quedó en mal estado.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("elemento no encontrado: {0}")]
    ElementNotFound(&'static str),
    #[error(transparent)]
    Cdp(#[from] CdpError),
}

/// Hechos extraídos de la pestaña Delivery del checkout
#[derive(Debug, Clone, Copy, Default)]
pub struct DeliveryFacts {
    pub min_order_notice: bool,
    pub out_of_range_notice: bool,
    pub windows_full: bool,
}

/// Clasifica el estado de delivery. El orden importa: los avisos de monto
/// mínimo y de distancia tapan el de ventanas llenas.
pub fn classify_delivery(facts: &DeliveryFacts) -> SlotStatus {
    if facts.min_order_notice {
        SlotStatus::closed_with("min $30 needed for delivery")
    } else if facts.out_of_range_notice {
        SlotStatus::closed_with("not within delivery distance")
    } else if facts.windows_full {
        SlotStatus::closed()
    } else {
        SlotStatus::open()
    }
}

#[derive(Debug, Clone)]
pub struct ScrapeService {
    username: String,
    password: String,
}

impl ScrapeService {
    pub fn new(username: String, password: String) -> Self {
        ScrapeService { username, password }
    }

    /// Ejecuta el flujo completo contra una ubicación y devuelve su estado.
    pub async fn check_location(
        &self,
        page: &Page,
        location: StoreLocation,
    ) -> Result<StoreStatus, ScrapeError> {
        self.login(page).await?;
        self.select_location(page, location).await?;
        self.select_groceries(page).await?;

        page.goto(CHECKOUT_URL).await?;
        sleep(WAIT_AFTER_ACTION).await;

        let pickup = self.check_pickup(page).await?;
        let delivery = self.check_delivery(page).await?;
        Ok(StoreStatus { pickup, delivery })
    }

    async fn login(&self, page: &Page) -> Result<(), ScrapeError> {
        page.goto(LOGIN_URL).await?;
        sleep(WAIT_AFTER_ACTION).await;

        page.find_element("#email")
            .await
            .map_err(|_| ScrapeError::ElementNotFound("#email"))?
            .type_str(&self.username)
            .await?;
        page.find_element("input[name='password']")
            .await
            .map_err(|_| ScrapeError::ElementNotFound("input[name='password']"))?
            .type_str(&self.password)
            .await?;

        let login_btn = find_by_text(page, "button[type='submit']", "Log In")
            .await?
            .ok_or(ScrapeError::ElementNotFound("botón Log In"))?;
        click_and_wait(&login_btn).await
    }

    async fn select_location(
        &self,
        page: &Page,
        location: StoreLocation,
    ) -> Result<(), ScrapeError> {
        let heading = find_by_text(page, "h4", location.page_label())
            .await?
            .ok_or(ScrapeError::ElementNotFound("h4 de la ubicación"))?;
        let link = heading
            .find_element("a")
            .await
            .map_err(|_| ScrapeError::ElementNotFound("link de la ubicación"))?;
        click_and_wait(&link).await
    }

    async fn select_groceries(&self, page: &Page) -> Result<(), ScrapeError> {
        // Acá el match es exacto: hay otros <h5> que contienen "Groceries"
        let groceries = find_where(page, "h5", |text| text == "Groceries")
            .await?
            .ok_or(ScrapeError::ElementNotFound("sección Groceries"))?;
        click_and_wait(&groceries).await
    }

    async fn check_pickup(&self, page: &Page) -> Result<SlotStatus, ScrapeError> {
        let tab = find_by_text(page, "h3", "Pick Up")
            .await?
            .ok_or(ScrapeError::ElementNotFound("pestaña Pick Up"))?;
        click_and_wait(&tab).await?;

        let windows_full = text_present(page, "h4", NO_PICKUP_TEXT).await?;
        Ok(if windows_full {
            SlotStatus::closed()
        } else {
            SlotStatus::open()
        })
    }

    async fn check_delivery(&self, page: &Page) -> Result<SlotStatus, ScrapeError> {
        let tab = find_by_text(page, "h3", "Delivery")
            .await?
            .ok_or(ScrapeError::ElementNotFound("pestaña Delivery"))?;
        click_and_wait(&tab).await?;

        let facts = DeliveryFacts {
            min_order_notice: text_present(page, "span", MIN_ORDER_TEXT).await?,
            out_of_range_notice: text_present(page, "span", OUT_OF_RANGE_TEXT).await?,
            windows_full: text_present(page, "h4", NO_DELIVERY_TEXT).await?,
        };
        Ok(classify_delivery(&facts))
    }
}

/// Primer elemento del selector cuyo texto cumple el predicado.
async fn find_where<F>(
    page: &Page,
    selector: &'static str,
    pred: F,
) -> Result<Option<Element>, ScrapeError>
where
    F: Fn(&str) -> bool,
{
    let elements = match page.find_elements(selector).await {
        Ok(els) => els,
        // Cero coincidencias no es un error: varios pasos preguntan
        // justamente por la ausencia de un aviso.
        Err(CdpError::NotFound) => Vec::new(),
        Err(e) => return Err(e.into()),
    };

    for el in elements {
        let text = el.inner_text().await?.unwrap_or_default();
        if pred(&text) {
            return Ok(Some(el));
        }
    }
    Ok(None)
}

async fn find_by_text(
    page: &Page,
    selector: &'static str,
    needle: &str,
) -> Result<Option<Element>, ScrapeError> {
    find_where(page, selector, |text| text.contains(needle)).await
}

async fn text_present(
    page: &Page,
    selector: &'static str,
    needle: &str,
) -> Result<bool, ScrapeError> {
    Ok(find_by_text(page, selector, needle).await?.is_some())
}

async fn click_and_wait(element: &Element) -> Result<(), ScrapeError> {
    element.click().await?;
    sleep(WAIT_AFTER_ACTION).await;
    Ok(())
}
