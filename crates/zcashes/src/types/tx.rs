//! Zcash v4 transparent transactions, and the ZIP-243 signature hash.
//!
//! For ZIP-243 documentation, see here:
//!
//! - https://zips.z.cash/zip-0243

use std::io::{Error as IOError, Read, Write};
use thiserror::Error;

use zcashes_core::{
    hashes::{
        Blake2b256Digest, Blake2b256Writer, Hash256Digest, Hash256Writer, MarkedDigestWriter,
        PersonalizedWriter,
    },
    ser::{self, ByteFormat, SerError},
    types::tx::Transaction,
};

use crate::{
    consensus::{BranchId, OVERWINTERED_FLAG, SAPLING_TX_VERSION, SAPLING_VERSION_GROUP_ID},
    defaults::DEFAULT_BRANCH,
    hashes::TXID,
    types::{
        script::Script,
        sighash::{
            Sighash, OUTPUTS_PERSONALIZATION, PREVOUTS_PERSONALIZATION, SEQUENCE_PERSONALIZATION,
        },
        txin::ZcashTxIn,
        txout::TxOut,
    },
};

/// An Error type for transaction objects
#[derive(Debug, Error)]
pub enum TxError {
    /// Serialization-related errors
    #[error(transparent)]
    SerError(#[from] SerError),

    /// IOError bubbled up from a `Write` passed to a `ByteFormat::write_to` implementation.
    #[error(transparent)]
    IOError(#[from] IOError),

    /// An input index (or, under SINGLE, an output index) is past the end of its vector.
    #[error("Index {index} out of range for {vector} of length {len}")]
    IndexOutOfRange {
        /// Either "inputs" or "outputs"
        vector: &'static str,
        /// The requested index
        index: usize,
        /// The length of the vector
        len: usize,
    },

    /// The transaction's version group id does not belong to the branch being signed for.
    #[error("Branch {branch_id} expects version group {expected:#010x}. Got {got:#010x}")]
    InconsistentBranchId {
        /// The branch named in the sighash arguments
        branch_id: BranchId,
        /// The version group id that branch requires
        expected: u32,
        /// The version group id the transaction carries
        got: u32,
    },

    /// Caller provided an unknown sighash type to `Sighash::from_u8`
    #[error("Unknown Sighash: {}", .0)]
    UnknownSighash(u8),

    /// The transaction header does not have the overwintered flag set.
    #[error("Expected an overwintered header. Got {:#010x}", .0)]
    NotOverwintered(u32),

    /// Only v4 transactions are supported.
    #[error("Unsupported transaction version: {}", .0)]
    UnsupportedVersion(u32),

    /// Only the Sapling version group is supported.
    #[error("Unknown version group id: {:#010x}", .0)]
    UnknownVersionGroup(u32),

    /// The serialized transaction carries shielded spends, shielded outputs, joinsplits, or a
    /// non-zero value balance.
    #[error("Shielded transaction data is unsupported")]
    ShieldedDataUnsupported,
}

/// Type alias for result with TxError
pub type TxResult<T> = Result<T, TxError>;

/// Arguments required to serialize the transaction to create the ZIP-243 sighash digest.
///
/// SIGHASH_ALL commits to ALL inputs, and ALL outputs. SIGHASH_NONE commits to ALL inputs and
/// NO outputs. SIGHASH_SINGLE commits to ALL inputs and the ONE output at the same index as the
/// input being signed. ANYONECANPAY drops the commitment to every input other than the one being
/// signed.
///
/// If SINGLE is used and there is no output at the signed index, signing fails with
/// `IndexOutOfRange`.
///
/// # Note
///
/// After signing the digest, you MUST append the sighash indicator byte to the resulting
/// signature.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ZcashSighashArgs {
    /// The index of the input we'd like to sign
    pub index: usize,
    /// The sighash mode to use.
    pub sighash_flag: Sighash,
    /// The script code of the prevout being spent.
    pub prevout_script: Script,
    /// The value of the prevout in zatoshis.
    pub prevout_value: u64,
    /// The consensus branch to sign under.
    pub branch_id: BranchId,
}

/// A Zcash v4 (Sapling-format) transaction with an empty shielded part.
///
/// The consensus branch is not part of the serialization. It is the branch the transaction is
/// intended for, and is used as the default in `sighash_args`. Deserialized transactions get
/// `DEFAULT_BRANCH`.
///
/// Deserializing through serde applies the same header, version group and value balance checks
/// as `read_from`.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Eq, PartialEq)]
#[serde(try_from = "UncheckedZcashTx")]
pub struct ZcashTx {
    pub(crate) header: u32,
    pub(crate) version_group_id: u32,
    pub(crate) vin: Vec<ZcashTxIn>,
    pub(crate) vout: Vec<TxOut>,
    pub(crate) locktime: u32,
    pub(crate) expiry_height: u32,
    pub(crate) value_balance: i64,
    pub(crate) branch_id: BranchId,
}

/// Serde input for `ZcashTx`, before validation.
#[derive(serde::Deserialize)]
struct UncheckedZcashTx {
    header: u32,
    version_group_id: u32,
    vin: Vec<ZcashTxIn>,
    vout: Vec<TxOut>,
    locktime: u32,
    expiry_height: u32,
    value_balance: i64,
    branch_id: BranchId,
}

impl TryFrom<UncheckedZcashTx> for ZcashTx {
    type Error = TxError;

    fn try_from(tx: UncheckedZcashTx) -> TxResult<Self> {
        check_header(tx.header)?;
        check_version_group(tx.version_group_id)?;
        if tx.value_balance != 0 {
            return Err(TxError::ShieldedDataUnsupported);
        }
        Ok(Self {
            header: tx.header,
            version_group_id: tx.version_group_id,
            vin: tx.vin,
            vout: tx.vout,
            locktime: tx.locktime,
            expiry_height: tx.expiry_height,
            value_balance: tx.value_balance,
            branch_id: tx.branch_id,
        })
    }
}

/// The header must be overwintered and carry version 4.
fn check_header(header: u32) -> TxResult<()> {
    if header & OVERWINTERED_FLAG != OVERWINTERED_FLAG {
        return Err(TxError::NotOverwintered(header));
    }
    let version = header & !OVERWINTERED_FLAG;
    if version != SAPLING_TX_VERSION {
        return Err(TxError::UnsupportedVersion(version));
    }
    Ok(())
}

fn check_version_group(version_group_id: u32) -> TxResult<()> {
    if version_group_id != SAPLING_VERSION_GROUP_ID {
        return Err(TxError::UnknownVersionGroup(version_group_id));
    }
    Ok(())
}

impl ZcashTx {
    /// Instantiate a new transaction for a branch. The header and version group id are taken
    /// from the branch. The value balance is zero.
    pub fn new<I, O>(
        branch_id: BranchId,
        vin: I,
        vout: O,
        locktime: u32,
        expiry_height: u32,
    ) -> Self
    where
        I: Into<Vec<ZcashTxIn>>,
        O: Into<Vec<TxOut>>,
    {
        Self {
            header: branch_id.header(),
            version_group_id: branch_id.version_group_id(),
            vin: vin.into(),
            vout: vout.into(),
            locktime,
            expiry_height,
            value_balance: 0,
            branch_id,
        }
    }

    /// The 4-byte header: the version with the overwintered flag set.
    pub fn header(&self) -> u32 {
        self.header
    }

    /// True if the overwintered flag is set in the header.
    pub fn is_overwintered(&self) -> bool {
        self.header & OVERWINTERED_FLAG == OVERWINTERED_FLAG
    }

    /// The version group id.
    pub fn version_group_id(&self) -> u32 {
        self.version_group_id
    }

    /// The block height after which the transaction can no longer be mined.
    pub fn expiry_height(&self) -> u32 {
        self.expiry_height
    }

    /// The net value of shielded spends minus shielded outputs. Zero for transparent
    /// transactions.
    pub fn value_balance(&self) -> i64 {
        self.value_balance
    }

    /// The consensus branch this transaction is intended for.
    pub fn branch_id(&self) -> BranchId {
        self.branch_id
    }

    /// Return a copy of the transaction intended for another branch. The version group id is
    /// left untouched.
    pub fn with_branch_id(mut self, branch_id: BranchId) -> Self {
        self.branch_id = branch_id;
        self
    }

    /// True if the transaction has no inputs and no outputs.
    pub fn is_empty(&self) -> bool {
        self.vin.is_empty() && self.vout.is_empty()
    }

    /// Build sighash arguments for an input, signing under this transaction's branch.
    pub fn sighash_args<S>(
        &self,
        index: usize,
        sighash_flag: Sighash,
        prevout_script: S,
        prevout_value: u64,
    ) -> ZcashSighashArgs
    where
        S: Into<Script>,
    {
        ZcashSighashArgs {
            index,
            sighash_flag,
            prevout_script: prevout_script.into(),
            prevout_value,
            branch_id: self.branch_id,
        }
    }

    /// A digest is only produced for a transaction that is well-formed under `branch_id`.
    fn check_branch(&self, branch_id: BranchId) -> TxResult<()> {
        if !self.is_overwintered() {
            return Err(TxError::NotOverwintered(self.header));
        }
        let version = self.header & !OVERWINTERED_FLAG;
        if version != branch_id.tx_version() {
            return Err(TxError::UnsupportedVersion(version));
        }
        if self.value_balance != 0 {
            return Err(TxError::ShieldedDataUnsupported);
        }
        let expected = branch_id.version_group_id();
        if self.version_group_id != expected {
            return Err(TxError::InconsistentBranchId {
                branch_id,
                expected,
                got: self.version_group_id,
            });
        }
        Ok(())
    }
}

impl Transaction for ZcashTx {
    type TxIn = ZcashTxIn;
    type TxOut = TxOut;
    type Digest = Hash256Digest;
    type TXID = TXID;
    type HashWriter = Hash256Writer;

    fn version(&self) -> u32 {
        self.header & !OVERWINTERED_FLAG
    }

    fn inputs(&self) -> &[Self::TxIn] {
        &self.vin
    }

    fn outputs(&self) -> &[Self::TxOut] {
        &self.vout
    }

    fn locktime(&self) -> u32 {
        self.locktime
    }
}

/// The ZIP-243 signing interface. The component hashers and the preimage assembler are generic
/// over the `PersonalizedWriter` so that the hash function can be injected.
///
/// Every excluded or empty component commits to the all-zero digest.
pub trait SignableTransaction: Transaction {
    /// Commitment to all input outpoints. Empty under ANYONECANPAY.
    fn hash_prevouts<H>(&self, sighash_flag: Sighash) -> TxResult<Blake2b256Digest>
    where
        H: PersonalizedWriter<Blake2b256Digest>;

    /// Commitment to all input sequence numbers. Empty under ANYONECANPAY, SINGLE, or NONE.
    fn hash_sequence<H>(&self, sighash_flag: Sighash) -> TxResult<Blake2b256Digest>
    where
        H: PersonalizedWriter<Blake2b256Digest>;

    /// Commitment to the outputs. All of them under ALL, the one at `index` under SINGLE, and
    /// empty under NONE.
    fn hash_outputs<H>(&self, index: usize, sighash_flag: Sighash) -> TxResult<Blake2b256Digest>
    where
        H: PersonalizedWriter<Blake2b256Digest>;

    /// Commitment to the joinsplits. Always empty.
    fn hash_joinsplits(&self) -> Blake2b256Digest {
        Blake2b256Digest::default()
    }

    /// Commitment to the shielded spends. Always empty.
    fn hash_shielded_spends(&self) -> Blake2b256Digest {
        Blake2b256Digest::default()
    }

    /// Commitment to the shielded outputs. Always empty.
    fn hash_shielded_outputs(&self) -> Blake2b256Digest {
        Blake2b256Digest::default()
    }

    /// Write the ZIP-243 preimage to `writer`. Component hashes are computed with `H`.
    fn write_sighash_preimage<W, H>(&self, writer: &mut W, args: &ZcashSighashArgs) -> TxResult<()>
    where
        W: Write,
        H: PersonalizedWriter<Blake2b256Digest>;

    /// Calculate the signature hash using the provided hasher. The final digest is personalized
    /// with `"ZcashSigHash"` and the branch id.
    #[tracing::instrument(
        skip_all,
        err,
        fields(
            index = args.index,
            sighash_flag = ?args.sighash_flag,
            branch_id = %args.branch_id,
        )
    )]
    fn signature_hash_with<H>(&self, args: &ZcashSighashArgs) -> TxResult<Blake2b256Digest>
    where
        H: PersonalizedWriter<Blake2b256Digest>,
    {
        let mut w = H::with_personalization(&args.branch_id.sighash_personalization());
        self.write_sighash_preimage::<_, H>(&mut w, args)?;
        Ok(w.finish())
    }

    /// Calculate the ZIP-243 signature hash with BLAKE2b-256.
    fn signature_hash(&self, args: &ZcashSighashArgs) -> TxResult<Blake2b256Digest> {
        self.signature_hash_with::<Blake2b256Writer>(args)
    }
}

impl SignableTransaction for ZcashTx {
    fn hash_prevouts<H>(&self, sighash_flag: Sighash) -> TxResult<Blake2b256Digest>
    where
        H: PersonalizedWriter<Blake2b256Digest>,
    {
        if sighash_flag.anyone_can_pay() {
            Ok(Blake2b256Digest::default())
        } else {
            let mut w = H::with_personalization(PREVOUTS_PERSONALIZATION);
            for input in self.vin.iter() {
                input.outpoint.write_to(&mut w)?;
            }
            let digest = w.finish();
            tracing::trace!(?digest, "hash_prevouts");
            Ok(digest)
        }
    }

    fn hash_sequence<H>(&self, sighash_flag: Sighash) -> TxResult<Blake2b256Digest>
    where
        H: PersonalizedWriter<Blake2b256Digest>,
    {
        if sighash_flag.anyone_can_pay() || sighash_flag.is_single() || sighash_flag.is_none() {
            Ok(Blake2b256Digest::default())
        } else {
            let mut w = H::with_personalization(SEQUENCE_PERSONALIZATION);
            for input in self.vin.iter() {
                Self::write_u32_le(&mut w, input.sequence)?;
            }
            let digest = w.finish();
            tracing::trace!(?digest, "hash_sequence");
            Ok(digest)
        }
    }

    fn hash_outputs<H>(&self, index: usize, sighash_flag: Sighash) -> TxResult<Blake2b256Digest>
    where
        H: PersonalizedWriter<Blake2b256Digest>,
    {
        let digest = match sighash_flag {
            Sighash::All | Sighash::AllACP => {
                let mut w = H::with_personalization(OUTPUTS_PERSONALIZATION);
                for output in self.vout.iter() {
                    output.write_to(&mut w)?;
                }
                w.finish()
            }
            Sighash::Single | Sighash::SingleACP => {
                let output = self.vout.get(index).ok_or(TxError::IndexOutOfRange {
                    vector: "outputs",
                    index,
                    len: self.vout.len(),
                })?;
                let mut w = H::with_personalization(OUTPUTS_PERSONALIZATION);
                output.write_to(&mut w)?;
                w.finish()
            }
            Sighash::None | Sighash::NoneACP => return Ok(Blake2b256Digest::default()),
        };
        tracing::trace!(?digest, "hash_outputs");
        Ok(digest)
    }

    fn write_sighash_preimage<W, H>(&self, writer: &mut W, args: &ZcashSighashArgs) -> TxResult<()>
    where
        W: Write,
        H: PersonalizedWriter<Blake2b256Digest>,
    {
        self.check_branch(args.branch_id)?;

        let input = self.vin.get(args.index).ok_or(TxError::IndexOutOfRange {
            vector: "inputs",
            index: args.index,
            len: self.vin.len(),
        })?;

        Self::write_u32_le(writer, self.header)?;
        Self::write_u32_le(writer, self.version_group_id)?;
        self.hash_prevouts::<H>(args.sighash_flag)?
            .write_to(writer)?;
        self.hash_sequence::<H>(args.sighash_flag)?
            .write_to(writer)?;
        self.hash_outputs::<H>(args.index, args.sighash_flag)?
            .write_to(writer)?;
        self.hash_joinsplits().write_to(writer)?;
        self.hash_shielded_spends().write_to(writer)?;
        self.hash_shielded_outputs().write_to(writer)?;
        Self::write_u32_le(writer, self.locktime)?;
        Self::write_u32_le(writer, self.expiry_height)?;
        Self::write_i64_le(writer, self.value_balance)?;
        Self::write_u32_le(writer, args.sighash_flag as u32)?;
        input.outpoint.write_to(writer)?;
        args.prevout_script.write_to(writer)?;
        Self::write_u64_le(writer, args.prevout_value)?;
        Self::write_u32_le(writer, input.sequence)?;
        Ok(())
    }
}

impl ByteFormat for ZcashTx {
    type Error = TxError;

    fn serialized_length(&self) -> usize {
        let mut len = 4; // header
        len += 4; // version group id
        len += ser::prefix_byte_len(self.vin.len() as u64) as usize;
        len += self.vin.serialized_length();
        len += ser::prefix_byte_len(self.vout.len() as u64) as usize;
        len += self.vout.serialized_length();
        len += 4; // locktime
        len += 4; // expiry height
        len += 8; // value balance
        len += 3; // empty spends, outputs, and joinsplits
        len
    }

    fn read_from<R>(reader: &mut R, _limit: usize) -> TxResult<Self>
    where
        R: Read,
        Self: std::marker::Sized,
    {
        let header = Self::read_u32_le(reader)?;
        check_header(header)?;

        let version_group_id = Self::read_u32_le(reader)?;
        check_version_group(version_group_id)?;

        let vin = Self::read_prefix_vec::<_, SerError, ZcashTxIn>(reader)?;
        let vout = Self::read_prefix_vec::<_, SerError, TxOut>(reader)?;
        let locktime = Self::read_u32_le(reader)?;
        let expiry_height = Self::read_u32_le(reader)?;
        let value_balance = Self::read_i64_le(reader)?;

        let shielded_spends = ser::read_compact_int(reader)?;
        let shielded_outputs = ser::read_compact_int(reader)?;
        let joinsplits = ser::read_compact_int(reader)?;
        if value_balance != 0 || shielded_spends != 0 || shielded_outputs != 0 || joinsplits != 0
        {
            return Err(TxError::ShieldedDataUnsupported);
        }

        Ok(Self {
            header,
            version_group_id,
            vin,
            vout,
            locktime,
            expiry_height,
            value_balance,
            branch_id: DEFAULT_BRANCH,
        })
    }

    fn write_to<W>(&self, writer: &mut W) -> TxResult<usize>
    where
        W: Write,
    {
        let mut len = Self::write_u32_le(writer, self.header)?;
        len += Self::write_u32_le(writer, self.version_group_id)?;
        len += Self::write_prefix_vec::<_, SerError, ZcashTxIn>(writer, &self.vin)?;
        len += Self::write_prefix_vec::<_, SerError, TxOut>(writer, &self.vout)?;
        len += Self::write_u32_le(writer, self.locktime)?;
        len += Self::write_u32_le(writer, self.expiry_height)?;
        len += Self::write_i64_le(writer, self.value_balance)?;
        for _ in 0..3 {
            len += ser::write_compact_int(writer, 0)?;
        }
        Ok(len)
    }
}
