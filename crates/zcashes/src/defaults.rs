//! Defaults selected by feature flag. The `blossom` feature is on by default. Build with
//! `--no-default-features --features sapling` to sign under Sapling instead.

use crate::consensus::BranchId;

/// The default consensus branch, selected by feature flag
#[cfg(feature = "blossom")]
pub const DEFAULT_BRANCH: BranchId = BranchId::Blossom;

/// The default consensus branch, selected by feature flag
#[cfg(all(feature = "sapling", not(feature = "blossom")))]
pub const DEFAULT_BRANCH: BranchId = BranchId::Sapling;

#[cfg(not(any(feature = "blossom", feature = "sapling")))]
compile_error!("one of the `blossom` or `sapling` features must be enabled");
