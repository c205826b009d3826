use serde_json::Value;

use crate::domain::errors::DomainError;
use crate::domain::order::Order;
use crate::domain::ports::OrderRepository;

use super::kv_store::{KeyValueStore, LOGIN_FLAG_KEY, ORDERS_KEY};
use super::records::StoredOrder;

// ── Repository ────────────────────────────────────────────────────────────────

/// Reads orders and the login flag out of a [`KeyValueStore`].
///
/// Records are validated one at a time: a record that fails to decode or
/// breaks an invariant is dropped with a warning and the rest are kept in
/// their stored order.
pub struct KeyValueOrderRepository<S> {
    store: S,
}

impl<S: KeyValueStore> KeyValueOrderRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

fn decode_order(value: Value) -> Result<Order, DomainError> {
    let stored: StoredOrder =
        serde_json::from_value(value).map_err(|e| DomainError::InvalidRecord(e.to_string()))?;
    Order::try_from(stored)
}

impl<S: KeyValueStore> OrderRepository for KeyValueOrderRepository<S> {
    fn login_flag(&self) -> Result<bool, DomainError> {
        Ok(self
            .store
            .get(LOGIN_FLAG_KEY)?
            .is_some_and(|flag| flag.trim() == "true"))
    }

    fn list(&self) -> Result<Vec<Order>, DomainError> {
        let Some(raw) = self.store.get(ORDERS_KEY)? else {
            return Ok(vec![]);
        };

        let entries: Vec<Value> = serde_json::from_str(&raw)
            .map_err(|e| DomainError::Malformed(format!("{ORDERS_KEY}: {e}")))?;

        Ok(entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match decode_order(entry) {
                Ok(order) => Some(order),
                Err(e) => {
                    log::warn!("Skipping stored order #{}: {}", index, e);
                    None
                }
            })
            .collect())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Order>, DomainError> {
        Ok(self.list()?.into_iter().find(|order| order.id == id))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::KeyValueOrderRepository;
    use crate::domain::errors::DomainError;
    use crate::domain::ports::OrderRepository;
    use crate::domain::status::OrderStatus;
    use crate::infrastructure::kv_store::{MemoryKeyValueStore, LOGIN_FLAG_KEY, ORDERS_KEY};

    fn order_json(id: &str, status: &str) -> serde_json::Value {
        json!({
            "id": id,
            "date": "2024-03-05T10:15:00Z",
            "items": [{"id": "p1", "name": "Kurta", "image": "/img/p1.jpg", "price": 799, "quantity": 1}],
            "address": {"fullName": "Ravi Kumar"},
            "status": status,
            "paymentMethod": "card",
            "subtotal": 799,
            "deliveryCharge": 50,
            "total": 849,
            "estimatedDelivery": "2024-03-10T00:00:00Z"
        })
    }

    fn repo_with(entries: &[(&str, String)]) -> KeyValueOrderRepository<MemoryKeyValueStore> {
        let store = MemoryKeyValueStore::with_entries(entries.iter().cloned());
        KeyValueOrderRepository::new(store)
    }

    #[test]
    fn login_flag_requires_literal_true() {
        assert!(repo_with(&[(LOGIN_FLAG_KEY, "true".into())]).login_flag().unwrap());
        assert!(!repo_with(&[(LOGIN_FLAG_KEY, "false".into())]).login_flag().unwrap());
        assert!(!repo_with(&[(LOGIN_FLAG_KEY, "yes".into())]).login_flag().unwrap());
        assert!(!repo_with(&[]).login_flag().unwrap());
    }

    #[test]
    fn list_returns_empty_when_no_orders_are_stored() {
        assert!(repo_with(&[]).list().expect("list failed").is_empty());
    }

    #[test]
    fn list_preserves_stored_order() {
        let orders = json!([order_json("A", "Delivered"), order_json("B", "processing")]);
        let repo = repo_with(&[(ORDERS_KEY, orders.to_string())]);

        let result = repo.list().expect("list failed");

        let ids: Vec<&str> = result.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, ["A", "B"]);
        assert_eq!(result[1].status, OrderStatus::Processing);
    }

    #[test]
    fn list_rejects_non_array_payloads() {
        for raw in ["{not json", "null", r#"{"id": "A"}"#] {
            let repo = repo_with(&[(ORDERS_KEY, raw.to_string())]);
            assert!(matches!(repo.list(), Err(DomainError::Malformed(_))), "raw {raw:?}");
        }
    }

    #[test]
    fn list_drops_invalid_records_and_keeps_the_rest() {
        let orders = json!([
            order_json("A", "Shipped"),
            {"id": "broken"},
            order_json("C", "Delivered"),
        ]);
        let repo = repo_with(&[(ORDERS_KEY, orders.to_string())]);

        let ids: Vec<String> = repo.list().unwrap().into_iter().map(|o| o.id).collect();
        assert_eq!(ids, ["A", "C"]);
    }

    #[test]
    fn find_by_id_returns_matching_order() {
        let orders = json!([order_json("A", "Shipped"), order_json("B", "Cancelled")]);
        let repo = repo_with(&[(ORDERS_KEY, orders.to_string())]);

        let found = repo.find_by_id("B").expect("find failed").expect("order should exist");
        assert_eq!(found.status, OrderStatus::Cancelled);
        assert!(repo.find_by_id("Z").expect("find failed").is_none());
    }
}
