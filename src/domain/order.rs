use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};

use super::status::{tracking_enabled, OrderStatus};

#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub full_name: String,
    pub phone: Option<String>,
    pub address_line: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub image: String,
    pub unit_price: BigDecimal,
    pub quantity: u32,
}

impl Item {
    pub fn line_total(&self) -> BigDecimal {
        &self.unit_price * BigDecimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    pub placed_at: DateTime<Utc>,
    pub items: Vec<Item>,
    pub address: Address,
    pub status: OrderStatus,
    pub payment_method: String,
    pub subtotal: BigDecimal,
    pub delivery_charge: BigDecimal,
    pub total: BigDecimal,
    pub estimated_delivery: DateTime<Utc>,
    pub tracking_number: Option<String>,
}

impl Order {
    pub fn stage(&self) -> u8 {
        self.status.stage()
    }

    pub fn can_track(&self) -> bool {
        tracking_enabled(self.stage())
    }

    /// Tracking number to hand to the carrier, if the order is trackable.
    pub fn tracking_target(&self) -> Option<&str> {
        if !self.can_track() {
            return None;
        }
        self.tracking_number.as_deref()
    }
}
