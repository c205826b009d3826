use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Order not found")]
    NotFound,
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Malformed stored value: {0}")]
    Malformed(String),
    #[error("Invalid order record: {0}")]
    InvalidRecord(String),
}
