//! The `builder` module defines an abstract `TxBuilder` trait. A concrete implementation for
//! Zcash can be found in the `zcashes` crate

use crate::{
    ser::ByteFormat,
    types::tx::{Input, Output, Transaction},
};
use std::io::Read;

/// Shortcut for the error type of a builder's transaction.
pub type BuilderError<T> = <<T as TxBuilder>::Transaction as ByteFormat>::Error;

/// A builder-pattern interface for constructing transactions. Implementations should accumulate
/// inputs, outputs, and other TX data, and then `build()` a Transaction object from the
/// accumulated data.
pub trait TxBuilder: std::marker::Sized {
    /// The Transaction type returned by `build()`
    type Transaction: Transaction;

    /// Instantiate a new builder
    fn new() -> Self;

    /// Instantiate a new builder from a transaction
    fn from_tx(tx: &Self::Transaction) -> Self;

    /// Instantiate a new builder from a `std::io::Read` that contains a serialized tx
    fn from_serialized_tx<R>(reader: &mut R) -> Result<Self, BuilderError<Self>>
    where
        R: Read,
    {
        let tx = Self::Transaction::read_from(reader, 0)?;
        Ok(Self::from_tx(&tx))
    }

    /// Instantiate a new builder from transaction hex
    fn from_hex_tx(hex_str: &str) -> Result<Self, BuilderError<Self>> {
        let tx = Self::Transaction::deserialize_hex(hex_str)?;
        Ok(Self::from_tx(&tx))
    }

    /// Set or overwrite the transaction version.
    fn version(self, version: u32) -> Self;

    /// Spend an outpoint. Adds an unsigned input spending the associated outpoint with the
    /// specified sequence number.
    fn spend<I>(self, prevout: I, sequence: u32) -> Self
    where
        I: Into<<<Self::Transaction as Transaction>::TxIn as Input>::TXOIdentifier>;

    /// Pay a recipient. Adds an output paying `value` to `recipient`.
    fn pay(
        self,
        value: <<Self::Transaction as Transaction>::TxOut as Output>::Value,
        recipient: &<<Self::Transaction as Transaction>::TxOut as Output>::RecipientIdentifier,
    ) -> Self;

    /// Insert an input at the specified index. Inputs after that are shifted to later indices.
    ///
    /// ## Note
    ///
    /// This may invalidate signatures made using ANYONECANPAY.
    fn insert_input(self, index: usize, input: <Self::Transaction as Transaction>::TxIn) -> Self;

    /// Add a set of inputs to the transaction.
    fn extend_inputs<I>(self, inputs: I) -> Self
    where
        I: IntoIterator<Item = <Self::Transaction as Transaction>::TxIn>;

    /// Insert an output at the specified index. Outputs after that are shifted to later indices.
    ///
    /// ## Note
    ///
    /// This may invalidate signatures made using SINGLE.
    fn insert_output(self, index: usize, output: <Self::Transaction as Transaction>::TxOut)
        -> Self;

    /// Add a set of outputs to the transaction.
    fn extend_outputs<I>(self, outputs: I) -> Self
    where
        I: IntoIterator<Item = <Self::Transaction as Transaction>::TxOut>;

    /// Set or overwrite the transaction locktime.
    fn locktime(self, locktime: u32) -> Self;

    /// Consume the builder and produce a transaction from the builder's current state.
    fn build(self) -> Self::Transaction;
}
