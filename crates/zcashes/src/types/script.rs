//! Simple types for transparent Script datastructures, each of which are treated as opaque,
//! wrapped `Vec<u8>` instance.
//!
//! We do not handle assembly, disassembly, or Script execution. Scripts are treated as opaque
//! bytes vectors with no semantics.
//!
//! Scripts can be freely converted between eachother using `From` and `Into`. This merely rewraps
//! the underlying `Vec<u8>` in the new type.

use zcashes_core::types::tx::RecipientIdentifier;

wrap_prefixed_byte_vector!(
    /// A Script is marked Vec<u8> for use as an opaque script code in `ZcashSighashArgs`
    /// structs.
    ///
    /// `Script::null()` and `Script::default()` return the empty byte vector with a 0
    /// prefix, which represents numerical 0, boolean `false`, or null bytestring.
    Script
);
wrap_prefixed_byte_vector!(
    /// A ScriptSig is a marked Vec<u8> for use in the script_sig.
    ///
    /// `ScriptSig::null()` and `ScriptSig::default()` return the empty byte vector with a 0
    /// prefix, which represents numerical 0, boolean `false`, or null bytestring.
    ScriptSig
);
wrap_prefixed_byte_vector!(
    /// A ScriptPubkey is a marked Vec<u8> for use as a `RecipientIdentifier` in
    /// Zcash TxOuts.
    ///
    /// `ScriptPubkey::null()` and `ScriptPubkey::default()` return the empty byte vector with a 0
    /// prefix, which represents numerical 0, boolean `false`, or null bytestring.
    ScriptPubkey
);

impl_script_conversion!(Script, ScriptPubkey);
impl_script_conversion!(Script, ScriptSig);
impl_script_conversion!(ScriptPubkey, ScriptSig);

impl RecipientIdentifier for ScriptPubkey {}

impl ScriptPubkey {
    /// Instantiate a standard pay-to-pubkeyhash script pubkey from a 20-byte pubkey hash.
    pub fn p2pkh(pubkey_hash: &[u8; 20]) -> Self {
        let mut v: Vec<u8> = vec![0x76, 0xa9, 0x14]; // DUP HASH160 PUSH_20
        v.extend(pubkey_hash);
        v.extend([0x88, 0xac]); // EQUALVERIFY CHECKSIG
        v.into()
    }

    /// Instantiate a standard pay-to-scripthash script pubkey from a 20-byte script hash.
    pub fn p2sh(script_hash: &[u8; 20]) -> Self {
        let mut v: Vec<u8> = vec![0xa9, 0x14]; // HASH160 PUSH_20
        v.extend(script_hash);
        v.push(0x87); // EQUAL
        v.into()
    }
}
