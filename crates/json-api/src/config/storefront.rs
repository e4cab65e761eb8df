//! Storefront Config

use clap::Args;
use jiff::SignedDuration;
use storefront_app::domain::carts::CartPricing;

/// Cart and session settings.
#[derive(Debug, Args)]
pub struct StorefrontConfig {
    /// Whether cart lines follow catalog prices (catalog) or keep the price
    /// they were added at (frozen)
    #[arg(long, env = "CART_PRICING", default_value = "catalog")]
    pub cart_pricing: CartPricing,

    /// Name of the cookie carrying the session token
    #[arg(long, env = "SESSION_COOKIE_NAME", default_value = "storefront_session")]
    pub session_cookie_name: String,

    /// Mark the session cookie `Secure`
    #[arg(long, env = "SESSION_COOKIE_SECURE", default_value_t = false)]
    pub session_cookie_secure: bool,

    /// Seconds a session token stays valid after it is issued (default two
    /// weeks)
    #[arg(
        long,
        env = "SESSION_TTL",
        default_value_t = 1_209_600,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub session_ttl: u32,
}

impl StorefrontConfig {
    /// Session lifetime applied to stored sessions and the cookie `Max-Age`.
    #[must_use]
    pub fn session_ttl(&self) -> SignedDuration {
        SignedDuration::from_secs(i64::from(self.session_ttl))
    }
}
