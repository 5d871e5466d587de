use crate::{
    hashes::{Digest, MarkedDigest, MarkedDigestWriter},
    ser::ByteFormat,
};

/// A `TXOIdentifier` represents the network's unique identifier an output. In Zcash's
/// transparent pool this is an outpoint.
pub trait TXOIdentifier {}

/// An `Input` spends a specific TXO, and typically contains a `TXOIdentifier` for that TXO.
pub trait Input {
    /// An input must define what type contains the TXO ID it is spending.
    type TXOIdentifier: TXOIdentifier;
}

/// A RecipientIdentifier represents the network's identifier for a recipient. In Zcash's
/// transparent pool this is a script pubkey.
pub trait RecipientIdentifier {}

/// An Output represents a new TXO being created. It has an associated `RecipientIdentifier`.
pub trait Output {
    /// The denomination of the output value
    type Value;

    /// The associated `RecipientIdentifier` type that describes to whom the output is paid.
    type RecipientIdentifier: RecipientIdentifier;
}

/// Basic functionality for a Transaction
///
/// The transaction specifies which types it considers to be inputs and outputs, and which
/// digest types identify it. Signing is left to chain-specific capability traits, as the
/// signature hash of a chain is rarely just a hash of its serialization.
pub trait Transaction: ByteFormat {
    /// The Input type for the transaction
    type TxIn: Input + ByteFormat;
    /// The Output type for the transaction
    type TxOut: Output + ByteFormat;
    /// A Digest type that underlies the associated marked hash.
    type Digest: Digest;
    /// A marked hash (see crate::hashes::marked) to be used as the transaction ID type.
    type TXID: MarkedDigest<Digest = Self::Digest>;
    /// A type that implements `MarkedDigestWriter`. Used to generate the `TXID`.
    type HashWriter: MarkedDigestWriter<Self::Digest>;

    /// Returns the transaction version number
    fn version(&self) -> u32;

    /// Returns a reference to the transaction input vector
    fn inputs(&self) -> &[Self::TxIn];

    /// Returns a reference the the transaction output vector
    fn outputs(&self) -> &[Self::TxOut];

    /// Returns the transaction's nLocktime field
    fn locktime(&self) -> u32;

    /// Calculates and returns the transaction's ID. The default TXID is simply the digest of the
    /// serialized transaction.
    fn txid(&self) -> Self::TXID {
        let mut w = Self::HashWriter::default();
        self.write_to(&mut w)
            .expect("No IOError from hash functions");
        w.finish_marked()
    }
}
