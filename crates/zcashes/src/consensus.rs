//! Consensus parameters for the network upgrades whose transactions use the v4 (Sapling)
//! format.

use zcashes_core::hashes::Personalization;

/// Set in the transaction header of every Overwinter-or-later transaction.
pub const OVERWINTERED_FLAG: u32 = 0x8000_0000;

/// The transaction version used by Sapling-format transactions.
pub const SAPLING_TX_VERSION: u32 = 4;

/// The version group id of Sapling-format transactions.
pub const SAPLING_VERSION_GROUP_ID: u32 = 0x892F_2085;

/// Prefix of the signature hash personalization. The 4-byte LE branch id completes it.
pub const SIGHASH_PERSONALIZATION_PREFIX: &[u8; 12] = b"ZcashSigHash";

/// A consensus branch. Signatures commit to the branch they were made under, so a signature
/// made for one network upgrade is invalid under any other.
#[derive(serde::Serialize, serde::Deserialize, Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BranchId {
    /// Sapling. Activated at block 419200 on mainnet.
    Sapling,
    /// Blossom. Activated at block 653600 on mainnet.
    Blossom,
}

impl BranchId {
    /// The 4-byte consensus branch id.
    pub const fn id(self) -> u32 {
        match self {
            BranchId::Sapling => 0x76b8_09bb,
            BranchId::Blossom => 0x2bb4_0e60,
        }
    }

    /// Look up a branch by its 4-byte consensus branch id.
    pub fn from_u32(id: u32) -> Option<BranchId> {
        match id {
            0x76b8_09bb => Some(BranchId::Sapling),
            0x2bb4_0e60 => Some(BranchId::Blossom),
            _ => None,
        }
    }

    /// The version group id transactions must carry under this branch.
    pub const fn version_group_id(self) -> u32 {
        match self {
            BranchId::Sapling | BranchId::Blossom => SAPLING_VERSION_GROUP_ID,
        }
    }

    /// The transaction version used under this branch.
    pub const fn tx_version(self) -> u32 {
        match self {
            BranchId::Sapling | BranchId::Blossom => SAPLING_TX_VERSION,
        }
    }

    /// The transaction header: the version with the overwintered flag set.
    pub const fn header(self) -> u32 {
        OVERWINTERED_FLAG | self.tx_version()
    }

    /// The personalization of the final signature hash: `"ZcashSigHash"` followed by the LE
    /// branch id.
    pub fn sighash_personalization(self) -> Personalization {
        let mut personalization = [0u8; 16];
        personalization[..12].copy_from_slice(SIGHASH_PERSONALIZATION_PREFIX);
        personalization[12..].copy_from_slice(&self.id().to_le_bytes());
        personalization
    }
}

impl std::fmt::Display for BranchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}({:#010x})", self, self.id())
    }
}
