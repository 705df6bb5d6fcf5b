//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config / deploy / mint / explorer
//!     → tracing events (structured fields: tx_hash, address, confirmations)
//!     → logging.rs subscriber → stderr
//! ```

pub mod logging;

pub use logging::init_logging;
