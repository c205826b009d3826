pub mod order_history;
