//! # Zcashes Core
//!
//! `zcashes-core` contains the serialization and hashing utilities used by
//! the `zcashes` crate.
//!
//! ## Crate Layout
//!
//! ### Ser trait
//!
//! The `ByteFormat` trait is a simple serialization API using
//! `std::io::{Read, Write}`. Implementers define the binary serialization
//! format of the type. It also provides the little-endian integer helpers and
//! the compact-size ("VarInt") length prefixes used throughout the protocol.
//!
//! `ByteFormat` has an associated `Error` type. Most basic types can simply
//! use the provided `SerError`. More complex types (e.g. transactions) will
//! want a custom error type that can be instantiated from a `SerError` or an
//! `std::io::Error`.
//!
//! ### Hashes
//!
//! The hashes module provides digest newtypes and `Write`-based hashers.
//! `Hash256` is Bitcoin-style double-sha2, used for transaction IDs.
//! `Blake2b256` is the personalized BLAKE2b used for signature hashes.
//! Hashers that accept a personalization implement `PersonalizedWriter`, so
//! signature hash code can be run against any implementation.
//!
//! ### Types
//!
//! Abstract `Transaction`, `Input` and `Output` traits, and the `TxBuilder`
//! trait for accumulating transaction contents.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(unused_extern_crates)]

#[macro_use]
pub mod macros;

pub mod builder;
pub mod hashes;
pub mod ser;
pub mod types;

pub use builder::*;
pub use hashes::*;
pub use ser::*;
pub use types::*;
