//! Order status and buying type.

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A stored or submitted value outside the known variants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown value: {0}")]
pub struct UnknownVariant(pub String);

/// Where the buyer receives the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuyingType {
    #[serde(rename = "self")]
    SelfPickup,

    #[serde(rename = "delivery")]
    Delivery,
}

impl BuyingType {
    pub const ALL: [Self; 2] = [Self::SelfPickup, Self::Delivery];

    /// Stored and submitted form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SelfPickup => "self",
            Self::Delivery => "delivery",
        }
    }

    /// Shopper-facing label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SelfPickup => "Самовывоз",
            Self::Delivery => "Доставка",
        }
    }
}

impl Display for BuyingType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuyingType {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "self" => Ok(Self::SelfPickup),
            "delivery" => Ok(Self::Delivery),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// Order lifecycle: `accepted -> in_progress -> paid`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Accepted,
    InProgress,
    Paid,
}

impl OrderStatus {
    /// Stored and submitted form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::InProgress => "in_progress",
            Self::Paid => "paid",
        }
    }

    /// Shopper-facing label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Accepted => "Принят в обработку",
            Self::InProgress => "Выполняется",
            Self::Paid => "Оплачен",
        }
    }

    /// The next status, or `None` once paid.
    #[must_use]
    pub const fn advance(self) -> Option<Self> {
        match self {
            Self::Accepted => Some(Self::InProgress),
            Self::InProgress => Some(Self::Paid),
            Self::Paid => None,
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "accepted" => Ok(Self::Accepted),
            "in_progress" => Ok(Self::InProgress),
            "paid" => Ok(Self::Paid),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_advances_to_paid_then_stops() {
        assert_eq!(OrderStatus::Accepted.advance(), Some(OrderStatus::InProgress));
        assert_eq!(OrderStatus::InProgress.advance(), Some(OrderStatus::Paid));
        assert_eq!(OrderStatus::Paid.advance(), None);
    }

    #[test]
    fn status_parses_stored_values() -> Result<(), UnknownVariant> {
        for status in [OrderStatus::Accepted, OrderStatus::InProgress, OrderStatus::Paid] {
            assert_eq!(status.as_str().parse::<OrderStatus>()?, status);
        }

        assert!("cancelled".parse::<OrderStatus>().is_err());

        Ok(())
    }

    #[test]
    fn buying_type_uses_form_values() {
        assert_eq!("self".parse(), Ok(BuyingType::SelfPickup));
        assert_eq!("delivery".parse(), Ok(BuyingType::Delivery));
        assert_eq!(
            "Самовывоз".parse::<BuyingType>(),
            Err(UnknownVariant("Самовывоз".to_string()))
        );
        assert_eq!(BuyingType::Delivery.label(), "Доставка");
    }
}
