use std::sync::Arc;

use crate::domain::errors::DomainError;
use crate::domain::ports::OrderRepository;
use crate::presentation::links::query_value;
use crate::presentation::view::{OrderCard, OrdersPage};

pub const LOGIN_PATH: &str = "/login";
pub const ORDERS_PATH: &str = "/orders";

/// Who is viewing, resolved once per request and passed in explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub logged_in: bool,
    /// Where to send the visitor back to after logging in.
    pub return_to: String,
}

impl SessionContext {
    pub fn login_redirect(&self) -> String {
        format!("{}?returnTo={}", LOGIN_PATH, query_value(&self.return_to))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    Redirect { location: String },
    Render(OrdersPage),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackOutcome {
    LoginRequired { location: String },
    External { url: String },
    /// Not trackable yet, no tracking number, or no such order.
    Unavailable,
}

pub struct OrderHistoryService {
    repo: Arc<dyn OrderRepository>,
    tracking_url: String,
}

impl OrderHistoryService {
    pub fn new(repo: Arc<dyn OrderRepository>, tracking_url: impl Into<String>) -> Self {
        Self {
            repo,
            tracking_url: tracking_url.into(),
        }
    }

    /// Resolve the session from the persisted login flag. An unreadable flag
    /// counts as logged out.
    pub fn session(&self, return_to: &str) -> SessionContext {
        let logged_in = self.repo.login_flag().unwrap_or_else(|e| {
            log::warn!("Could not read login flag, treating session as anonymous: {}", e);
            false
        });
        SessionContext {
            logged_in,
            return_to: return_to.to_string(),
        }
    }

    pub fn order_history(&self, session: &SessionContext) -> PageOutcome {
        if !session.logged_in {
            return PageOutcome::Redirect {
                location: session.login_redirect(),
            };
        }
        let orders = self.repo.list().unwrap_or_else(|e| {
            log::warn!("Could not load stored orders, showing none: {}", e);
            vec![]
        });
        log::debug!("Rendering {} order(s)", orders.len());
        PageOutcome::Render(OrdersPage::build(&orders))
    }

    /// Card for a single order. A malformed collection holds no orders, as on
    /// the page; an unreadable store is an error.
    pub fn order_card(&self, order_id: &str) -> Result<OrderCard, DomainError> {
        let found = match self.repo.find_by_id(order_id) {
            Err(DomainError::Malformed(msg)) => {
                log::warn!("Could not load stored orders, showing none: {}", msg);
                None
            }
            other => other?,
        };
        found
            .as_ref()
            .map(OrderCard::from_order)
            .ok_or(DomainError::NotFound)
    }

    pub fn track(&self, session: &SessionContext, order_id: &str) -> TrackOutcome {
        if !session.logged_in {
            return TrackOutcome::LoginRequired {
                location: session.login_redirect(),
            };
        }
        let order = match self.repo.find_by_id(order_id) {
            Ok(Some(order)) => order,
            Ok(None) => {
                log::info!("Tracking requested for unknown order {}", order_id);
                return TrackOutcome::Unavailable;
            }
            Err(e) => {
                log::warn!("Could not load order {} for tracking: {}", order_id, e);
                return TrackOutcome::Unavailable;
            }
        };
        match order.tracking_target() {
            Some(number) => {
                log::info!("Order {} handed to carrier tracking ({})", order.id, number);
                TrackOutcome::External {
                    url: self.tracking_url.clone(),
                }
            }
            None => TrackOutcome::Unavailable,
        }
    }
}
