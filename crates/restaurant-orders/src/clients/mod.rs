//! Typed clients over the generic actor clients.

pub mod inventory_client;
pub mod order_client;

pub use inventory_client::InventoryClient;
pub use order_client::OrderClient;
