//! Price oracle subsystem.
//!
//! # Data Flow
//! ```text
//! token symbol
//!     → alias table (symbol → oracle id)
//!     → cache.rs (fresh hit? return)
//!     → client.rs (HTTP fetch, JSON decode)
//!     → price / metadata to the handler
//! ```

pub mod cache;
pub mod client;

pub use client::{OracleError, PriceOracle, TokenMetadata};
