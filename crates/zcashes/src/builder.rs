//! An implementation of the `TxBuilder` for Zcash transparent transactions.
//!
//! The builder starts from `DEFAULT_BRANCH`. Setting a branch with `branch_id` also resets the
//! version and version group id to that branch's values. They may be overridden afterwards.

use zcashes_core::{builder::TxBuilder, types::tx::Transaction};

use crate::{
    consensus::{BranchId, OVERWINTERED_FLAG},
    defaults::DEFAULT_BRANCH,
    types::{
        script::{ScriptPubkey, ScriptSig},
        tx::ZcashTx,
        txin::{Outpoint, ZcashTxIn},
        txout::TxOut,
    },
};

/// A `TxBuilder` that builds `ZcashTx`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZcashTxBuilder {
    version: u32,
    version_group_id: u32,
    vin: Vec<ZcashTxIn>,
    vout: Vec<TxOut>,
    locktime: u32,
    expiry_height: u32,
    branch_id: BranchId,
}

impl ZcashTxBuilder {
    /// Set the consensus branch. Resets the version and version group id to the branch's.
    pub fn branch_id(mut self, branch_id: BranchId) -> Self {
        self.branch_id = branch_id;
        self.version = branch_id.tx_version();
        self.version_group_id = branch_id.version_group_id();
        self
    }

    /// Set or overwrite the version group id.
    pub fn version_group_id(mut self, version_group_id: u32) -> Self {
        self.version_group_id = version_group_id;
        self
    }

    /// Set or overwrite the expiry height.
    pub fn expiry_height(mut self, expiry_height: u32) -> Self {
        self.expiry_height = expiry_height;
        self
    }

    /// Add an OP_RETURN output carrying `message`.
    pub fn op_return(mut self, message: &[u8]) -> Self {
        self.vout.push(TxOut::op_return(message));
        self
    }

    /// Set the script sig of an input. A NOP if the input does not exist.
    pub fn set_script_sig(mut self, input_idx: usize, script_sig: ScriptSig) -> Self {
        if let Some(input) = self.vin.get_mut(input_idx) {
            input.script_sig = script_sig;
        }
        self
    }
}

impl Default for ZcashTxBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TxBuilder for ZcashTxBuilder {
    type Transaction = ZcashTx;

    fn new() -> Self {
        Self {
            version: DEFAULT_BRANCH.tx_version(),
            version_group_id: DEFAULT_BRANCH.version_group_id(),
            vin: vec![],
            vout: vec![],
            locktime: 0,
            expiry_height: 0,
            branch_id: DEFAULT_BRANCH,
        }
    }

    fn from_tx(tx: &Self::Transaction) -> Self {
        Self {
            version: tx.version(),
            version_group_id: tx.version_group_id(),
            vin: tx.inputs().to_vec(),
            vout: tx.outputs().to_vec(),
            locktime: tx.locktime(),
            expiry_height: tx.expiry_height(),
            branch_id: tx.branch_id(),
        }
    }

    fn version(mut self, version: u32) -> Self {
        self.version = version & !OVERWINTERED_FLAG;
        self
    }

    fn spend<I>(mut self, prevout: I, sequence: u32) -> Self
    where
        I: Into<Outpoint>,
    {
        self.vin
            .push(ZcashTxIn::new(prevout.into(), ScriptSig::default(), sequence));
        self
    }

    fn pay(mut self, value: u64, recipient: &ScriptPubkey) -> Self {
        self.vout.push(TxOut::new(value, recipient.clone()));
        self
    }

    fn insert_input(mut self, index: usize, input: ZcashTxIn) -> Self {
        let index = std::cmp::min(index, self.vin.len());
        self.vin.insert(index, input);
        self
    }

    fn extend_inputs<I>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = ZcashTxIn>,
    {
        self.vin.extend(inputs);
        self
    }

    fn insert_output(mut self, index: usize, output: TxOut) -> Self {
        let index = std::cmp::min(index, self.vout.len());
        self.vout.insert(index, output);
        self
    }

    fn extend_outputs<I>(mut self, outputs: I) -> Self
    where
        I: IntoIterator<Item = TxOut>,
    {
        self.vout.extend(outputs);
        self
    }

    fn locktime(mut self, locktime: u32) -> Self {
        self.locktime = locktime;
        self
    }

    fn build(self) -> Self::Transaction {
        ZcashTx {
            header: OVERWINTERED_FLAG | self.version,
            version_group_id: self.version_group_id,
            vin: self.vin,
            vout: self.vout,
            locktime: self.locktime,
            expiry_height: self.expiry_height,
            value_balance: 0,
            branch_id: self.branch_id,
        }
    }
}
