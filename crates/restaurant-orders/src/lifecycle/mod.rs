//! System wiring and shutdown.
//!
//! [`OrderSystem`] builds the collaborators named in the configuration, starts the
//! actors, and hands out the clients and the HTTP router.

pub mod order_system;

pub use order_system::{OrderSystem, SystemError};
