use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::domain::errors::DomainError;
use crate::domain::order::{Address, Item, Order};
use crate::domain::status::OrderStatus;

// ── Stored shapes ────────────────────────────────────────────────────────────

/// Identifiers are written by the checkout flow as either strings or numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StoredId {
    Text(String),
    Number(serde_json::Number),
}

impl StoredId {
    fn into_text(self) -> String {
        match self {
            StoredId::Text(s) => s.trim().to_string(),
            StoredId::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAddress {
    pub full_name: String,
    #[serde(default)]
    pub phone: Option<StoredId>,
    #[serde(default, alias = "address")]
    pub address_line: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub pincode: Option<StoredId>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoredItem {
    pub id: StoredId,
    pub name: String,
    #[serde(default)]
    pub image: String,
    pub price: f64,
    pub quantity: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredOrder {
    pub id: StoredId,
    pub date: String,
    #[serde(default)]
    pub items: Vec<StoredItem>,
    pub address: StoredAddress,
    pub status: String,
    #[serde(default)]
    pub payment_method: String,
    pub subtotal: f64,
    #[serde(default)]
    pub delivery_charge: f64,
    pub total: f64,
    pub estimated_delivery: String,
    #[serde(default)]
    pub tracking_number: Option<String>,
}

// ── Validation ───────────────────────────────────────────────────────────────

fn invalid(field: &str, detail: impl std::fmt::Display) -> DomainError {
    DomainError::InvalidRecord(format!("{field}: {detail}"))
}

/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_timestamp(field: &str, raw: &str) -> Result<DateTime<Utc>, DomainError> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| invalid(field, format!("unrecognized timestamp '{raw}'")))
}

/// Converts a stored amount through its shortest decimal text so that `0.1`
/// stays `0.1` rather than its binary expansion.
pub fn parse_amount(field: &str, value: f64) -> Result<BigDecimal, DomainError> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(field, format!("amount {value} must be non-negative")));
    }
    BigDecimal::from_str(&value.to_string()).map_err(|e| invalid(field, e))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl TryFrom<StoredAddress> for Address {
    type Error = DomainError;

    fn try_from(stored: StoredAddress) -> Result<Self, Self::Error> {
        let full_name = stored.full_name.trim().to_string();
        if full_name.is_empty() {
            return Err(invalid("address.fullName", "must not be empty"));
        }
        Ok(Address {
            full_name,
            phone: non_blank(stored.phone.map(StoredId::into_text)),
            address_line: non_blank(stored.address_line),
            city: non_blank(stored.city),
            state: non_blank(stored.state),
            pincode: non_blank(stored.pincode.map(StoredId::into_text)),
        })
    }
}

impl TryFrom<StoredItem> for Item {
    type Error = DomainError;

    fn try_from(stored: StoredItem) -> Result<Self, Self::Error> {
        let quantity = u32::try_from(stored.quantity)
            .ok()
            .filter(|q| *q >= 1)
            .ok_or_else(|| invalid("item.quantity", format!("{} is not positive", stored.quantity)))?;
        Ok(Item {
            id: stored.id.into_text(),
            name: stored.name,
            image: stored.image,
            unit_price: parse_amount("item.price", stored.price)?,
            quantity,
        })
    }
}

impl TryFrom<StoredOrder> for Order {
    type Error = DomainError;

    fn try_from(stored: StoredOrder) -> Result<Self, Self::Error> {
        let id = stored.id.into_text();
        if id.is_empty() {
            return Err(invalid("id", "must not be empty"));
        }

        let status = match OrderStatus::from_str(&stored.status) {
            Ok(status) => status,
            Err(e) => {
                log::warn!("Order {}: {}; treating as {}", id, e, OrderStatus::OrderConfirmed);
                OrderStatus::OrderConfirmed
            }
        };

        let items = stored
            .items
            .into_iter()
            .map(Item::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Order {
            placed_at: parse_timestamp("date", &stored.date)?,
            items,
            address: stored.address.try_into()?,
            status,
            payment_method: stored.payment_method,
            subtotal: parse_amount("subtotal", stored.subtotal)?,
            delivery_charge: parse_amount("deliveryCharge", stored.delivery_charge)?,
            total: parse_amount("total", stored.total)?,
            estimated_delivery: parse_timestamp("estimatedDelivery", &stored.estimated_delivery)?,
            tracking_number: non_blank(stored.tracking_number),
            id,
        })
    }
}
