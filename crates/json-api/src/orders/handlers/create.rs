//! Place Order Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use storefront_app::domain::orders::{OrdersServiceError, data::BuyerForm};

use crate::{
    extensions::*,
    forms::{ValidationErrorResponse, render_invalid},
    observability::record_order_placed,
    orders::into_status_error,
};

const THANK_YOU_PATH: &str = "/thank_you";

/// Place Order Request
///
/// Every field is optional on the wire; missing required fields come back as
/// field messages.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct PlaceOrderRequest {
    /// Buyer first name
    pub name: Option<String>,

    pub last_name: Option<String>,
    pub phone: Option<String>,

    /// `self` or `delivery`
    pub buying_type: Option<String>,

    /// Preferred date, `YYYY-MM-DD`
    pub date: Option<String>,

    /// Required for delivery
    pub address: Option<String>,

    pub comments: Option<String>,
}

impl From<PlaceOrderRequest> for BuyerForm {
    fn from(request: PlaceOrderRequest) -> Self {
        Self {
            name: request.name,
            last_name: request.last_name,
            phone: request.phone,
            buying_type: request.buying_type,
            date: request.date,
            address: request.address,
            comments: request.comments,
        }
    }
}

/// Place Order Handler
///
/// Turns the session's cart into an order and redirects to the thank-you page.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    responses(
        (status_code = StatusCode::SEE_OTHER, description = "Order placed; redirect to /thank_you"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid buyer details", body = ValidationErrorResponse),
        (status_code = StatusCode::CONFLICT, description = "Cart is empty"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.create",
    skip(json, depot, res),
    fields(session_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<PlaceOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<StatusCode, StatusError> {
    let state = depot.state_or_500()?;
    let session = depot.session_or_500()?;

    tracing::Span::current().record("session_uuid", tracing::field::display(session.uuid));

    let result = state
        .app
        .orders
        .place_order(session.uuid, session.user_uuid, json.into_inner().into())
        .await;

    match result {
        Ok(order) => {
            record_order_placed();

            info!(
                order_uuid = %order.uuid,
                number = order.number,
                total = order.total,
                "order placed"
            );

            res.render(Redirect::other(THANK_YOU_PATH));

            Ok(StatusCode::SEE_OTHER)
        }
        Err(OrdersServiceError::Invalid(errors)) => Ok(render_invalid(res, &errors)),
        Err(error) => Err(into_status_error(error)),
    }
}

#[cfg(test)]
mod tests {
    use salvo::{
        http::header::LOCATION,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use storefront_app::{domain::sessions::records::SessionRecord, validation::FieldErrors};

    use crate::test_helpers::{
        Mocks, TEST_SESSION_UUID, TEST_USER_UUID, anonymous_session, logged_in_session,
        make_cart, make_cart_item, make_order,
    };

    use super::*;

    fn make_service(mocks: Mocks, session: SessionRecord) -> Service {
        mocks.service(session, Router::with_path("order").post(handler))
    }

    fn pickup_request() -> PlaceOrderRequest {
        PlaceOrderRequest {
            name: Some("Ann".to_string()),
            last_name: Some("Lee".to_string()),
            phone: Some("+7 900 000 00 00".to_string()),
            buying_type: Some("self".to_string()),
            date: Some("2026-10-20".to_string()),
            ..PlaceOrderRequest::default()
        }
    }

    #[tokio::test]
    async fn successful_order_redirects_to_thank_you() -> TestResult {
        let mut mocks = Mocks::default();
        let order = make_order(1, &make_cart(vec![make_cart_item("kettle", 2, 1_500)]));

        mocks
            .orders
            .expect_place_order()
            .once()
            .withf(|session, user, form| {
                *session == TEST_SESSION_UUID
                    && user.is_none()
                    && form.name.as_deref() == Some("Ann")
                    && form.buying_type.as_deref() == Some("self")
            })
            .return_once(move |_, _, _| Ok(order));

        let res = TestClient::post("http://example.com/order")
            .json(&pickup_request())
            .send(&make_service(mocks, anonymous_session()))
            .await;

        let location = res
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::SEE_OTHER));
        assert_eq!(location, Some(THANK_YOU_PATH));

        Ok(())
    }

    #[tokio::test]
    async fn logged_in_order_is_attributed_to_user() -> TestResult {
        let mut mocks = Mocks::default();
        let order = make_order(2, &make_cart(vec![make_cart_item("kettle", 1, 1_500)]));

        mocks
            .orders
            .expect_place_order()
            .once()
            .withf(|_, user, _| *user == Some(TEST_USER_UUID))
            .return_once(move |_, _, _| Ok(order));

        let res = TestClient::post("http://example.com/order")
            .json(&pickup_request())
            .send(&make_service(mocks, logged_in_session()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SEE_OTHER));

        Ok(())
    }

    #[tokio::test]
    async fn invalid_details_return_422_with_messages() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_place_order()
            .once()
            .return_once(|_, _, _| {
                Err(OrdersServiceError::Invalid(FieldErrors::single(
                    "address",
                    "Для доставки укажите адрес.",
                )))
            });

        let mut res = TestClient::post("http://example.com/order")
            .json(&PlaceOrderRequest {
                buying_type: Some("delivery".to_string()),
                ..pickup_request()
            })
            .send(&make_service(mocks, anonymous_session()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));

        let body: ValidationErrorResponse = res.take_json().await?;

        assert_eq!(body.messages_for("address"), ["Для доставки укажите адрес."]);

        Ok(())
    }

    #[tokio::test]
    async fn empty_cart_returns_409() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_place_order()
            .once()
            .return_once(|_, _, _| Err(OrdersServiceError::EmptyCart));

        let res = TestClient::post("http://example.com/order")
            .json(&pickup_request())
            .send(&make_service(mocks, anonymous_session()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
