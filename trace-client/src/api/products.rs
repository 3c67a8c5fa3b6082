//! Product API: listing, creation, events, handover, trace, QR data

use shared::{
    CreateProductRequest, Event, EventType, HandoverRequest, LogEventRequest, Product,
    ProductTrace, QrCodeData,
};

use super::TraceClient;
use crate::error::ClientResult;
use crate::http::Auth;

/// Shown when a handover succeeds with an empty body
const HANDOVER_DONE: &str = "Product handed over successfully!";

impl TraceClient {
    /// Products owned by the authenticated user
    pub async fn get_all_products(&self) -> ClientResult<Vec<Product>> {
        self.http
            .get("/products", Auth::Session, "fetching products")
            .await
    }

    /// Create a product; the backend assigns the owner
    pub async fn create_product(
        &self,
        name: &str,
        origin: &str,
        initial_location: &str,
    ) -> ClientResult<Product> {
        let request = CreateProductRequest {
            name: name.to_string(),
            origin: origin.to_string(),
            initial_location: initial_location.to_string(),
        };
        let product: Product = self
            .http
            .post("/products", &request, Auth::Session, "creating product")
            .await?;
        tracing::info!(product_id = product.id, "Product created");
        Ok(product)
    }

    /// Append an event to a product's history
    ///
    /// The actor is never sent: the backend records the authenticated user.
    pub async fn log_event(
        &self,
        product_id: i64,
        event_type: EventType,
        description: &str,
        location: &str,
    ) -> ClientResult<Event> {
        let request = LogEventRequest {
            event_type,
            event_description: description.to_string(),
            location: location.to_string(),
        };
        let event: Event = self
            .http
            .post(
                &format!("/products/{product_id}/log-event"),
                &request,
                Auth::Session,
                "logging event",
            )
            .await?;
        tracing::info!(product_id, event_id = event.id, %event_type, "Event logged");
        Ok(event)
    }

    /// Transfer ownership to another user; returns the backend's message
    pub async fn handover_product(
        &self,
        product_id: i64,
        new_owner_user_id: i64,
        location: &str,
        description: &str,
    ) -> ClientResult<String> {
        let request = HandoverRequest {
            new_owner_user_id,
            handover_location: location.to_string(),
            handover_description: description.to_string(),
        };
        let message = self
            .http
            .post_message(
                &format!("/products/{product_id}/handover"),
                &request,
                Auth::Session,
                "during handover",
            )
            .await?;
        tracing::info!(product_id, new_owner_user_id, "Product handed over");
        if message.trim().is_empty() {
            return Ok(HANDOVER_DONE.to_string());
        }
        Ok(message)
    }

    /// Current state plus full event history, in backend order
    pub async fn get_product_trace(&self, product_id: i64) -> ClientResult<ProductTrace> {
        self.http
            .get(
                &format!("/products/{product_id}/trace"),
                Auth::Session,
                "fetching trace",
            )
            .await
    }

    /// QR payload for a product (the id as text)
    pub async fn get_qr_code_data(&self, product_id: i64) -> ClientResult<String> {
        let data: QrCodeData = self
            .http
            .get(
                &format!("/products/{product_id}/qrcode-data"),
                Auth::Session,
                "fetching QR code data",
            )
            .await?;
        Ok(data.qr_code_data)
    }
}
