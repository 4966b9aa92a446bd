//! # Observability & Tracing
//!
//! One subscriber for the whole process. Every actor logs with an `entity_type` field
//! (`Order`, `Inventory`), so module targets are switched off to keep lines short.
//!
//! ```bash
//! RUST_LOG=info cargo run      # lifecycle events: Created, Action ok, Shutdown
//! RUST_LOG=debug cargo run     # plus full request payloads
//! ```
//!
//! A confirm at `info` reads roughly:
//!
//! ```text
//! INFO Action ok entity_type="Inventory" id=inventory_1
//! INFO Action ok entity_type="Order" id=4d1c...
//! ```

/// Installs the global `fmt` subscriber filtered by `RUST_LOG`.
///
/// Calling it twice is harmless: the second install is ignored.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
