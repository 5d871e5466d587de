//! Transparent outputs.

use std::io::{Read, Write};

use zcashes_core::{
    ser::{ByteFormat, SerError, SerResult},
    types::tx::Output,
};

use crate::types::script::ScriptPubkey;

/// A transparent output: a value in zatoshis, locked by a script pubkey.
///
/// The encoding (8-byte LE value, then the prefixed script) is what `hash_outputs` commits to,
/// one output after another under ALL, or only the signed index's output under SINGLE.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Default, Eq, PartialEq)]
pub struct TxOut {
    /// The value in zatoshis
    pub value: u64,
    /// The locking script.
    pub script_pubkey: ScriptPubkey,
}

impl Output for TxOut {
    type Value = u64;
    type RecipientIdentifier = ScriptPubkey;
}

impl TxOut {
    /// Pay `value` zatoshis to `script_pubkey`.
    pub fn new<T>(value: u64, script_pubkey: T) -> Self
    where
        T: Into<ScriptPubkey>,
    {
        Self {
            value,
            script_pubkey: script_pubkey.into(),
        }
    }

    /// A zero-value OP_RETURN output carrying up to 75 bytes of `data`. Longer data is cut.
    pub fn op_return(data: &[u8]) -> Self {
        let data = &data[..data.len().min(75)];
        let mut script = Vec::with_capacity(data.len() + 2);
        script.push(0x6a);
        script.push(data.len() as u8);
        script.extend_from_slice(data);
        Self::new(0, script)
    }
}

impl ByteFormat for TxOut {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        8 + self.script_pubkey.serialized_length()
    }

    fn read_from<R>(reader: &mut R, _limit: usize) -> SerResult<Self>
    where
        R: Read,
        Self: std::marker::Sized,
    {
        let value = Self::read_u64_le(reader)?;
        let script_pubkey = ScriptPubkey::read_from(reader, 0)?;
        Ok(Self::new(value, script_pubkey))
    }

    fn write_to<W>(&self, writer: &mut W) -> SerResult<usize>
    where
        W: Write,
    {
        let len = Self::write_u64_le(writer, self.value)?;
        Ok(len + self.script_pubkey.write_to(writer)?)
    }
}
