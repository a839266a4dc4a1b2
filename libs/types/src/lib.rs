//! Types library for the custodial exchange core
//!
//! This library provides the core type definitions shared by the exchange
//! contract logic, ensuring type safety and deterministic behavior.
//!
//! # Modules
//! - `ids`: Unique identifiers (AccountId, OrderId)
//! - `asset`: Asset identifiers with the reserved native sentinel
//! - `numeric`: Unsigned fixed-point amounts (18 decimals)
//! - `order`: Standing order records

// Public modules
pub mod asset;
pub mod ids;
pub mod numeric;
pub mod order;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::asset::*;
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::order::*;
}
