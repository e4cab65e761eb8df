//! Test helpers.
//!
//! Mocks built with `new()` panic on any call without a matching expectation,
//! so each test only sets up the service calls it expects.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use storefront_app::{
    context::AppContext,
    domain::{
        accounts::{
            MockAccountsService,
            records::{SignedIn, UserRecord, UserUuid},
        },
        carts::{
            MockCartsService,
            records::{CartItemRecord, CartItemUuid, CartRecord, CartUuid},
        },
        catalog::{
            MockCatalogService,
            records::{BrandUuid, CategoryRecord, CategoryUuid, ProductRecord, ProductUuid},
        },
        notifications::MockNotificationsService,
        orders::{
            MockOrdersService,
            records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid},
            status::{BuyingType, OrderStatus},
        },
        sessions::{
            DEFAULT_SESSION_TTL, MockSessionsService,
            records::{IssuedSession, SessionRecord, SessionUuid},
        },
    },
};

use crate::{sessions::SessionCookie, state::State};

pub(crate) const TEST_COOKIE_NAME: &str = "storefront_session";
pub(crate) const TEST_SESSION_UUID: SessionUuid = SessionUuid::from_uuid(Uuid::nil());
pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::from_u128(1));

/// One mock per service in [`AppContext`].
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) catalog: MockCatalogService,
    pub(crate) carts: MockCartsService,
    pub(crate) orders: MockOrdersService,
    pub(crate) sessions: MockSessionsService,
    pub(crate) accounts: MockAccountsService,
    pub(crate) notifications: MockNotificationsService,
}

impl Mocks {
    pub(crate) fn state(self) -> Arc<State> {
        let app = AppContext {
            catalog: Arc::new(self.catalog),
            carts: Arc::new(self.carts),
            orders: Arc::new(self.orders),
            sessions: Arc::new(self.sessions),
            accounts: Arc::new(self.accounts),
            notifications: Arc::new(self.notifications),
        };

        State::shared(app, SessionCookie::new(TEST_COOKIE_NAME, false, DEFAULT_SESSION_TTL))
    }

    /// Serve `route` with the mocks and `session` already in the depot, in
    /// place of the session middleware.
    pub(crate) fn service(self, session: SessionRecord, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.state()))
                .hoop(inject(session))
                .push(route),
        )
    }
}

pub(crate) fn anonymous_session() -> SessionRecord {
    SessionRecord {
        uuid: TEST_SESSION_UUID,
        cart_uuid: None,
        user_uuid: None,
        expires_at: Timestamp::UNIX_EPOCH,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn logged_in_session() -> SessionRecord {
    SessionRecord {
        user_uuid: Some(TEST_USER_UUID),
        ..anonymous_session()
    }
}

pub(crate) fn make_category(slug: &str) -> CategoryRecord {
    CategoryRecord {
        uuid: CategoryUuid::new(),
        name: format!("Category {slug}"),
        slug: slug.to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product(slug: &str, price: u64, available: bool) -> ProductRecord {
    ProductRecord {
        uuid: ProductUuid::new(),
        category_uuid: CategoryUuid::new(),
        brand_uuid: BrandUuid::new(),
        title: format!("Product {slug}"),
        slug: slug.to_string(),
        description: String::new(),
        image: None,
        price,
        available,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart_item(slug: &str, qty: u32, unit_price: u64) -> CartItemRecord {
    CartItemRecord {
        uuid: CartItemUuid::new(),
        product_uuid: ProductUuid::new(),
        product_slug: slug.to_string(),
        title: format!("Product {slug}"),
        qty,
        unit_price,
        item_total: u64::from(qty) * unit_price,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart(items: Vec<CartItemRecord>) -> CartRecord {
    CartRecord {
        uuid: CartUuid::new(),
        cart_total: items.iter().map(|item| item.item_total).sum(),
        items,
        checked_out_at: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_user(username: &str) -> UserRecord {
    UserRecord {
        uuid: TEST_USER_UUID,
        username: username.to_string(),
        email: format!("{username}@example.com"),
        first_name: "Ann".to_string(),
        last_name: "Lee".to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// The depot's session reissued under `token`.
pub(crate) fn reissued(token: &str, session: SessionRecord) -> IssuedSession {
    IssuedSession {
        token: token.to_string(),
        session,
    }
}

pub(crate) fn make_signed_in(username: &str, token: &str) -> SignedIn {
    SignedIn {
        user: make_user(username),
        session: reissued(
            token,
            SessionRecord {
                user_uuid: Some(TEST_USER_UUID),
                ..anonymous_session()
            },
        ),
    }
}

pub(crate) fn make_order(number: i64, cart: &CartRecord) -> OrderRecord {
    OrderRecord {
        uuid: OrderUuid::new(),
        number,
        user_uuid: Some(TEST_USER_UUID),
        cart_uuid: cart.uuid,
        total: cart.cart_total,
        first_name: "Ann".to_string(),
        last_name: "Lee".to_string(),
        phone: "+7 900 000 00 00".to_string(),
        address: String::new(),
        buying_type: BuyingType::SelfPickup,
        delivery_date: None,
        comments: String::new(),
        status: OrderStatus::Accepted,
        items: cart
            .items
            .iter()
            .map(|item| OrderItemRecord {
                uuid: OrderItemUuid::new(),
                product_uuid: item.product_uuid,
                title: item.title.clone(),
                qty: item.qty,
                unit_price: item.unit_price,
                item_total: item.item_total,
            })
            .collect(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
