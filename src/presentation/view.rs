use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::order::{Item, Order};
use crate::domain::status::{progress_fraction, step_state, OrderStatus, TRACKING_STEPS};

use super::format::{format_date, format_inr};
use super::links::path_segment;

pub const PAGE_TITLE: &str = "My Orders";
pub const PAGE_SUBTITLE: &str = "Orders placed in past 3 months";

// ── Page model ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OrdersPage {
    Empty(EmptyState),
    History(OrderHistoryPage),
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Link {
    pub label: String,
    pub href: String,
}

impl Link {
    fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EmptyState {
    pub title: String,
    pub message: String,
    pub call_to_action: Link,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct OrderHistoryPage {
    pub title: String,
    pub subtitle: String,
    /// Trail ending at the current page, which carries no link.
    pub breadcrumb: Vec<Link>,
    pub orders: Vec<OrderCard>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    Blue,
    Purple,
    Green,
    Red,
    Neutral,
}

impl StatusTone {
    pub fn for_status(status: OrderStatus) -> Self {
        match status {
            OrderStatus::OrderConfirmed => StatusTone::Blue,
            OrderStatus::Shipped => StatusTone::Purple,
            OrderStatus::Delivered => StatusTone::Green,
            OrderStatus::Cancelled => StatusTone::Red,
            OrderStatus::Processing | OrderStatus::OutForDelivery => StatusTone::Neutral,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusTone::Blue => "blue",
            StatusTone::Purple => "purple",
            StatusTone::Green => "green",
            StatusTone::Red => "red",
            StatusTone::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TrackAction {
    pub enabled: bool,
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StepView {
    pub id: u8,
    pub label: String,
    pub active: bool,
    pub current: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrackingPanel {
    Cancelled,
    Progress { fill_percent: f64, steps: Vec<StepView> },
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ItemRow {
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub line_total: String,
    pub product_href: String,
    pub buy_again_href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct OrderCard {
    pub id: String,
    pub placed_on: String,
    pub total: String,
    pub ship_to: String,
    pub details_href: String,
    pub status: String,
    pub tone: StatusTone,
    pub headline: String,
    pub track: TrackAction,
    pub tracking: TrackingPanel,
    pub items: Vec<ItemRow>,
}

// ── Assembly ─────────────────────────────────────────────────────────────────

pub fn order_details_href(id: &str) -> String {
    format!("/orders/{}", path_segment(id))
}

pub fn track_href(id: &str) -> String {
    format!("/orders/{}/track", path_segment(id))
}

fn product_href(id: &str) -> String {
    format!("/product/{}", path_segment(id))
}

impl OrdersPage {
    pub fn build(orders: &[Order]) -> Self {
        if orders.is_empty() {
            return OrdersPage::Empty(EmptyState::default());
        }
        OrdersPage::History(OrderHistoryPage {
            title: PAGE_TITLE.to_string(),
            subtitle: PAGE_SUBTITLE.to_string(),
            breadcrumb: vec![Link::new("Home", "/"), Link::new(PAGE_TITLE, "")],
            orders: orders.iter().map(OrderCard::from_order).collect(),
        })
    }
}

impl Default for EmptyState {
    fn default() -> Self {
        Self {
            title: "No Orders Yet".to_string(),
            message: "Start shopping to see your orders here.".to_string(),
            call_to_action: Link::new("Start Shopping", "/products"),
        }
    }
}

impl TrackingPanel {
    pub fn for_stage(stage: u8) -> Self {
        let Some(fraction) = progress_fraction(stage) else {
            return TrackingPanel::Cancelled;
        };
        let steps = TRACKING_STEPS
            .iter()
            .zip(1u8..)
            .map(|(status, id)| {
                let state = step_state(id, stage);
                StepView {
                    id,
                    label: status.label().to_string(),
                    active: state.active,
                    current: state.current,
                }
            })
            .collect();
        TrackingPanel::Progress {
            fill_percent: fraction * 100.0,
            steps,
        }
    }
}

impl ItemRow {
    fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            image: item.image.clone(),
            quantity: item.quantity,
            line_total: format_inr(&item.line_total()),
            product_href: product_href(&item.id),
            buy_again_href: product_href(&item.id),
        }
    }
}

impl OrderCard {
    pub fn from_order(order: &Order) -> Self {
        let headline = match order.status {
            OrderStatus::OrderConfirmed => {
                format!("Arriving {}", format_date(order.estimated_delivery))
            }
            other => other.label().to_string(),
        };
        let enabled = order.can_track();

        Self {
            id: order.id.clone(),
            placed_on: format_date(order.placed_at),
            total: format_inr(&order.total),
            ship_to: order.address.full_name.clone(),
            details_href: order_details_href(&order.id),
            status: order.status.label().to_string(),
            tone: StatusTone::for_status(order.status),
            headline,
            track: TrackAction {
                enabled,
                href: enabled.then(|| track_href(&order.id)),
            },
            tracking: TrackingPanel::for_stage(order.stage()),
            items: order.items.iter().map(ItemRow::from_item).collect(),
        }
    }
}
