//! Holds Zcash transparent transaction types and the ZIP-243 signature hash.

pub mod script;
pub mod sighash;
pub mod tx;
pub mod txin;
pub mod txout;

pub use script::*;
pub use sighash::*;
pub use tx::*;
pub use txin::*;
pub use txout::*;
