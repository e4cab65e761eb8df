//! Cart Pricing Policy

use std::{fmt, str::FromStr};

use thiserror::Error;

/// How line prices relate to catalog prices after a line is added.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CartPricing {
    /// Lines keep the price captured when they were added.
    Frozen,

    /// Every cart mutation refreshes line prices from the catalog.
    #[default]
    Catalog,
}

impl CartPricing {
    /// Name accepted by `CART_PRICING`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Frozen => "frozen",
            Self::Catalog => "catalog",
        }
    }
}

impl fmt::Display for CartPricing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pricing policy name that is neither `catalog` nor `frozen`.
#[derive(Debug, Error)]
#[error("unknown cart pricing policy `{0}`, expected `frozen` or `catalog`")]
pub struct UnknownCartPricing(String);

impl FromStr for CartPricing {
    type Err = UnknownCartPricing;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "frozen" => Ok(Self::Frozen),
            "catalog" => Ok(Self::Catalog),
            _ => Err(UnknownCartPricing(value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_follows_catalog() {
        assert_eq!(CartPricing::default(), CartPricing::Catalog);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Frozen".parse::<CartPricing>().ok(), Some(CartPricing::Frozen));
        assert_eq!(" catalog ".parse::<CartPricing>().ok(), Some(CartPricing::Catalog));
        assert!("floating".parse::<CartPricing>().is_err());
    }
}
