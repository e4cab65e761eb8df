//! App Router

use salvo::Router;

use crate::{accounts, carts, catalog, notifications, orders, sessions};

/// Storefront routes. Every route runs behind the session middleware so a
/// cart can always be resolved.
pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(sessions::middleware::handler)
        .get(catalog::index::handler)
        .push(Router::with_path("category/{slug}").get(catalog::category::handler))
        .push(Router::with_path("product/{slug}").get(catalog::product::handler))
        .push(Router::with_path("cart").get(carts::get::handler))
        .push(Router::with_path("add_to_cart").get(carts::add::handler))
        .push(Router::with_path("remove_from_cart").get(carts::remove::handler))
        .push(Router::with_path("change_item_qty").get(carts::change_qty::handler))
        .push(Router::with_path("checkout").get(carts::checkout::handler))
        .push(
            Router::with_path("order")
                .get(orders::form::handler)
                .post(orders::create::handler),
        )
        .push(Router::with_path("thank_you").get(orders::thank_you::handler))
        .push(Router::with_path("registration").post(accounts::register::handler))
        .push(Router::with_path("login").post(accounts::login::handler))
        .push(Router::with_path("logout").post(accounts::logout::handler))
        .push(Router::with_path("account").get(accounts::account::handler))
        .push(Router::with_path("notify_me").post(notifications::notify_me::handler))
        .push(
            Router::with_path("notifications")
                .get(notifications::index::handler)
                .push(Router::with_path("read").post(notifications::read::handler)),
        )
}
