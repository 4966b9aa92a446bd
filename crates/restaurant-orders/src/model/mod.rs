//! Plain data: orders, their state machine, menu items and inventory.

pub mod inventory;
pub mod menu;
pub mod order;
pub mod order_state;

pub use inventory::*;
pub use menu::*;
pub use order::*;
pub use order_state::*;
