//! Contains re-exports of the most commonly used types and traits.

pub use crate::{
    builder::ZcashTxBuilder,
    consensus::BranchId,
    defaults::DEFAULT_BRANCH,
    hashes::TXID,
    types::*,
};

pub use zcashes_core::{
    builder::TxBuilder,
    hashes::{Blake2b256Digest, Blake2b256Writer, MarkedDigest, PersonalizedWriter},
    ser::ByteFormat,
    types::tx::Transaction,
};
