pub mod kv_store;
pub mod order_repo;
pub mod records;
