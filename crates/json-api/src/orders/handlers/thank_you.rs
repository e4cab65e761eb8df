//! Thank You Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

const THANK_YOU: &str = "Спасибо за заказ! Наш менеджер свяжется с вами в ближайшее время.";

/// Thank You Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ThankYouResponse {
    pub message: String,
}

/// Thank You Handler
///
/// Where a successful checkout redirects to.
#[endpoint(tags("orders"), summary = "Order Placed")]
pub(crate) async fn handler() -> Json<ThankYouResponse> {
    Json(ThankYouResponse {
        message: THANK_YOU.to_string(),
    })
}
