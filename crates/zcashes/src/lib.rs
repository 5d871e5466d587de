//! # Zcashes
//!
//! `zcashes` models transparent Zcash v4 (Sapling-format) transactions and computes their
//! ZIP-243 signature hashes.
//!
//! ## Crate Layout
//!
//! ### Consensus
//!
//! `consensus::BranchId` names the network upgrade a signature is made under. The branch id
//! keys the final BLAKE2b personalization, and fixes the version group id a transaction must
//! carry. The default branch is selected by feature flag and exposed as
//! `defaults::DEFAULT_BRANCH`.
//!
//! ### Types
//!
//! Inputs, outputs, scripts, sighash flags and the `ZcashTx` itself. `ZcashTx` implements the
//! core `Transaction` trait, and the `SignableTransaction` trait, which holds the component
//! hashers, the preimage assembler and `signature_hash`.
//!
//! ### Builder
//!
//! `ZcashTxBuilder` implements the core `TxBuilder` trait and adds the Zcash-specific
//! fields (expiry height, version group id, branch id).
//!
//! ## Example
//!
//! ```
//! use zcashes::prelude::*;
//!
//! let txid = TXID::from([1u8; 32]);
//! let tx = ZcashTxBuilder::new()
//!     .branch_id(BranchId::Sapling)
//!     .spend(Outpoint::new(txid, 0), 0xffff_ffff)
//!     .pay(1000, &ScriptPubkey::null())
//!     .expiry_height(499_999_999)
//!     .build();
//!
//! let args = tx.sighash_args(0, Sighash::All, Script::null(), 5000);
//! let digest = tx.signature_hash(&args).unwrap();
//! assert_ne!(digest, Blake2b256Digest::default());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(unused_extern_crates)]

#[macro_use]
extern crate zcashes_core;

pub mod builder;
pub mod consensus;
pub mod defaults;
pub mod hashes;
pub mod prelude;
pub mod types;

pub use zcashes_core::{builder::TxBuilder, ser::ByteFormat, types::tx::Transaction};
