//! Marker traits for digests, marked digests, and the `Write`-based hashers that produce them.

use std::io::Write;

use crate::ser::ByteFormat;

/// A 16-byte BLAKE2b personalization string.
pub type Personalization = [u8; 16];

/// A basic digest type. Digests are fixed-length byte arrays produced by a hash function.
pub trait Digest:
    Default
    + Copy
    + Eq
    + std::hash::Hash
    + std::fmt::Debug
    + AsRef<[u8; 32]>
    + AsMut<[u8; 32]>
    + ByteFormat
{
}

/// A marked digest is a newtype around a digest. The newtype marks what the digest is for, so
/// that a TXID can never be passed where a sighash is expected.
pub trait MarkedDigest: Default + Copy + Eq + ByteFormat {
    /// The underlying digest type
    type Digest: Digest;

    /// Wrap a digest of the appropriate type in the marker.
    fn new(hash: Self::Digest) -> Self;

    /// Return a copy of the internal digest.
    fn internal(&self) -> Self::Digest;

    /// Return a copy of the marked digest with its bytes reversed. Useful for converting between
    /// internal (LE) and explorer (BE) byte order.
    fn reversed(&self) -> Self {
        let mut digest = self.internal();
        digest.as_mut().reverse();
        Self::new(digest)
    }
}

/// An interface for a hasher that accepts data via `std::io::Write`, and produces a digest.
pub trait MarkedDigestWriter<T: Digest>: Default + Write {
    /// Consumes the hasher, calculates the digest from the written data.
    fn finish(self) -> T;

    /// Calls finish, and wraps the result in a `MarkedDigest` type.
    fn finish_marked<M: MarkedDigest<Digest = T>>(self) -> M {
        M::new(self.finish())
    }
}

/// A hasher keyed by a 16-byte personalization string. Signature hash code is written against
/// this trait so the hash function can be swapped out, e.g. for a recording fake in tests.
pub trait PersonalizedWriter<T: Digest>: MarkedDigestWriter<T> {
    /// Instantiate a new hasher with the given personalization.
    fn with_personalization(personalization: &Personalization) -> Self;
}
