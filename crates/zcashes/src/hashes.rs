//! This module holds `MarkedDigest` types used by Zcash transactions. Currently we represent
//! only `TXID`s.

use zcashes_core::hashes::Hash256Digest;

mark_32_byte_hash!(
    /// A marked Hash256Digest representing transaction IDs
    TXID,
    Hash256Digest
);
