use std::fmt;
use std::str::FromStr;

/// Fulfillment lifecycle of an order, from confirmation to hand-over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    OrderConfirmed,
    Processing,
    Shipped,
    OutForDelivery,
    Delivered,
    Cancelled,
}

/// The five visual steps of the progress indicator, in order. A step's id is
/// its 1-based position in this array.
pub const TRACKING_STEPS: [OrderStatus; 5] = [
    OrderStatus::OrderConfirmed,
    OrderStatus::Processing,
    OrderStatus::Shipped,
    OrderStatus::OutForDelivery,
    OrderStatus::Delivered,
];

/// Stage reserved for cancelled orders.
pub const CANCELLED_STAGE: u8 = 0;

const ALL: [OrderStatus; 6] = [
    OrderStatus::OrderConfirmed,
    OrderStatus::Processing,
    OrderStatus::Shipped,
    OrderStatus::OutForDelivery,
    OrderStatus::Delivered,
    OrderStatus::Cancelled,
];

impl OrderStatus {
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::OrderConfirmed => "Order Confirmed",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::OutForDelivery => "Out for Delivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Lenient parse: unknown labels are treated as freshly confirmed.
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or(OrderStatus::OrderConfirmed)
    }

    /// Position in the fulfillment lifecycle; 0 for cancelled, 1..=5 otherwise.
    pub fn stage(self) -> u8 {
        match self {
            OrderStatus::Cancelled => CANCELLED_STAGE,
            OrderStatus::OrderConfirmed => 1,
            OrderStatus::Processing => 2,
            OrderStatus::Shipped => 3,
            OrderStatus::OutForDelivery => 4,
            OrderStatus::Delivered => 5,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    /// Strict, case-insensitive parse of the canonical labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ALL.into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Map a raw status label to its tracking stage. Total: anything unrecognized
/// resolves to stage 1.
pub fn resolve_stage(label: &str) -> u8 {
    OrderStatus::from_label(label).stage()
}

/// The tracking action is available once the order has shipped.
pub fn tracking_enabled(stage: u8) -> bool {
    stage >= 3
}

/// Fill fraction of the progress bar, or `None` for the cancelled branch.
pub fn progress_fraction(stage: u8) -> Option<f64> {
    if stage == CANCELLED_STAGE {
        return None;
    }
    let last = (TRACKING_STEPS.len() - 1) as f64;
    Some(f64::from(stage.min(TRACKING_STEPS.len() as u8) - 1) / last)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepState {
    pub active: bool,
    pub current: bool,
}

pub fn step_state(step_id: u8, stage: u8) -> StepState {
    StepState {
        active: step_id <= stage,
        current: step_id == stage,
    }
}
