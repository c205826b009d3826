use super::errors::DomainError;
use super::order::Order;

/// Read-only access to the persisted order collection and session flag.
pub trait OrderRepository: Send + Sync + 'static {
    fn login_flag(&self) -> Result<bool, DomainError>;
    fn list(&self) -> Result<Vec<Order>, DomainError>;
    fn find_by_id(&self, id: &str) -> Result<Option<Order>, DomainError>;
}
