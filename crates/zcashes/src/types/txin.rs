//! Transparent inputs, and the outpoints they spend.

use std::io::{Read, Write};

use zcashes_core::{
    ser::{ByteFormat, SerError, SerResult},
    types::tx::{Input, TXOIdentifier},
};

use crate::{hashes::TXID, types::script::ScriptSig};

/// The transparent output being spent: the creating transaction's txid (internal byte order)
/// and the output's position in that transaction's vout.
///
/// Serializes to exactly 36 bytes. This is the unit `hash_prevouts` commits to for each input,
/// and the unit written into the preimage for the signed input.
#[derive(serde::Serialize, serde::Deserialize, Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Outpoint {
    /// The txid of the transaction that created the output.
    pub txid: TXID,
    /// The output's index in that transaction's vout.
    pub index: u32,
}

impl TXOIdentifier for Outpoint {}

impl Outpoint {
    /// Serialized length of every outpoint.
    pub const LENGTH: usize = 36;

    /// Reference output `index` of `txid`.
    pub fn new(txid: TXID, index: u32) -> Self {
        Self { txid, index }
    }
}

impl ByteFormat for Outpoint {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        Self::LENGTH
    }

    fn read_from<R>(reader: &mut R, _limit: usize) -> SerResult<Self>
    where
        R: Read,
        Self: std::marker::Sized,
    {
        let txid = TXID::read_from(reader, 0)?;
        let index = Self::read_u32_le(reader)?;
        Ok(Self { txid, index })
    }

    fn write_to<W>(&self, writer: &mut W) -> SerResult<usize>
    where
        W: Write,
    {
        let len = self.txid.write_to(writer)?;
        Ok(len + Self::write_u32_le(writer, self.index)?)
    }
}

/// A transparent input.
///
/// Only the outpoint and sequence are committed to by the signature hash. The `script_sig` is
/// where the signature over that hash ends up, so it is empty until the input is signed and
/// never enters any digest component.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Default, Eq, PartialEq)]
pub struct ZcashTxIn {
    /// The output being spent.
    pub outpoint: Outpoint,
    /// The unlocking script.
    pub script_sig: ScriptSig,
    /// The nSequence field. Committed to by `hash_sequence` under ALL.
    pub sequence: u32,
}

impl Input for ZcashTxIn {
    type TXOIdentifier = Outpoint;
}

impl ZcashTxIn {
    /// Instantiate a new input.
    pub fn new<T>(outpoint: Outpoint, script_sig: T, sequence: u32) -> Self
    where
        T: Into<ScriptSig>,
    {
        Self {
            outpoint,
            script_sig: script_sig.into(),
            sequence,
        }
    }
}

impl ByteFormat for ZcashTxIn {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        Outpoint::LENGTH + self.script_sig.serialized_length() + 4
    }

    fn read_from<R>(reader: &mut R, _limit: usize) -> SerResult<Self>
    where
        R: Read,
        Self: std::marker::Sized,
    {
        Ok(Self {
            outpoint: Outpoint::read_from(reader, 0)?,
            script_sig: ScriptSig::read_from(reader, 0)?,
            sequence: Self::read_u32_le(reader)?,
        })
    }

    fn write_to<W>(&self, writer: &mut W) -> SerResult<usize>
    where
        W: Write,
    {
        let mut len = self.outpoint.write_to(writer)?;
        len += self.script_sig.write_to(writer)?;
        len += Self::write_u32_le(writer, self.sequence)?;
        Ok(len)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn txid(last_byte: u8) -> TXID {
        let mut bytes = [0u8; 32];
        bytes[31] = last_byte;
        TXID::from(bytes)
    }

    #[test]
    fn it_encodes_outpoints_as_36_bytes() {
        let cases = [
            (
                Outpoint::new(txid(1), 0),
                format!("{}01{}", "00".repeat(31), "00000000"),
            ),
            (
                Outpoint::new(txid(0), 0xdead_beef),
                format!("{}{}", "00".repeat(32), "efbeadde"),
            ),
        ];
        for case in cases.iter() {
            assert_eq!(case.0.serialized_length(), Outpoint::LENGTH);
            assert_eq!(case.0.serialize_hex(), case.1);
            assert_eq!(Outpoint::deserialize_hex(&case.1).unwrap(), case.0);
        }
    }

    #[test]
    fn it_rejects_short_outpoints() {
        assert!(Outpoint::deserialize_hex(&"00".repeat(35)).is_err());
    }

    #[test]
    fn it_serializes_and_derializes_inputs() {
        let outpoint = format!("{}01{}", "00".repeat(31), "00000000");
        let cases = [
            (
                ZcashTxIn::new(Outpoint::new(txid(1), 0), vec![], 0xffff_ffff),
                format!("{}00ffffffff", outpoint),
            ),
            (
                ZcashTxIn::new(Outpoint::new(txid(1), 0), vec![0x51, 0x52], 0x1234_abcd),
                format!("{}025152cdab3412", outpoint),
            ),
        ];
        for case in cases.iter() {
            assert_eq!(ZcashTxIn::deserialize_hex(&case.1).unwrap(), case.0);
            assert_eq!(case.0.serialize_hex(), case.1);
            assert_eq!(case.0.serialized_length(), case.1.len() / 2);
        }
    }
}
