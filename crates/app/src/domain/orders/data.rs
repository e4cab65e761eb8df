//! Order Data
//!
//! Checkout form input and its validation.

use jiff::civil::Date;
use serde::Deserialize;

use crate::{
    domain::orders::status::BuyingType,
    validation::{FieldErrors, non_blank},
};

pub(crate) const REQUIRED: &str = "Обязательное поле.";
pub(crate) const INVALID_CHOICE: &str = "Выберите корректный вариант.";
pub(crate) const INVALID_DATE: &str = "Введите правильную дату.";
pub(crate) const ADDRESS_REQUIRED: &str = "Для доставки укажите адрес.";

/// Checkout form input, as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuyerForm {
    pub name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub buying_type: Option<String>,

    /// `YYYY-MM-DD`
    pub date: Option<String>,

    pub address: Option<String>,
    pub comments: Option<String>,
}

/// Buyer details that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyerInfo {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub buying_type: BuyingType,
    pub delivery_date: Option<Date>,
    pub address: String,
    pub comments: String,
}

impl BuyerForm {
    /// # Errors
    ///
    /// Returns a message for every failing field. `address` is required
    /// only for delivery.
    pub fn validate(self) -> Result<BuyerInfo, FieldErrors> {
        let mut errors = FieldErrors::new();

        let first_name = non_blank(self.name);
        let phone = non_blank(self.phone);
        let address = non_blank(self.address);

        if first_name.is_none() {
            errors.push("name", REQUIRED);
        }

        if phone.is_none() {
            errors.push("phone", REQUIRED);
        }

        let buying_type = match non_blank(self.buying_type) {
            None => {
                errors.push("buying_type", REQUIRED);
                None
            }
            Some(value) => match value.parse::<BuyingType>() {
                Ok(buying_type) => Some(buying_type),
                Err(_) => {
                    errors.push("buying_type", INVALID_CHOICE);
                    None
                }
            },
        };

        if buying_type == Some(BuyingType::Delivery) && address.is_none() {
            errors.push("address", ADDRESS_REQUIRED);
        }

        let delivery_date = match non_blank(self.date) {
            None => None,
            Some(value) => match value.parse::<Date>() {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.push("date", INVALID_DATE);
                    None
                }
            },
        };

        let (Some(first_name), Some(phone), Some(buying_type)) = (first_name, phone, buying_type)
        else {
            return Err(errors);
        };

        errors.into_result(BuyerInfo {
            first_name,
            last_name: non_blank(self.last_name).unwrap_or_default(),
            phone,
            buying_type,
            delivery_date,
            address: address.unwrap_or_default(),
            comments: non_blank(self.comments).unwrap_or_default(),
        })
    }
}
