//! Abstract transaction types. Concrete implementations live in chain-specific crates.

/// Abstract transaction, input and output traits
pub mod tx;

pub use tx::*;
