//! Sighash flags and the BLAKE2b personalizations of the ZIP-243 digest components.

use zcashes_core::hashes::Personalization;

use crate::types::tx::{TxError, TxResult};

/// Personalization of the hash of all input outpoints.
pub const PREVOUTS_PERSONALIZATION: &Personalization = b"ZcashPrevoutHash";

/// Personalization of the hash of all input sequence numbers.
pub const SEQUENCE_PERSONALIZATION: &Personalization = b"ZcashSequencHash";

/// Personalization of the hash of the committed outputs.
pub const OUTPUTS_PERSONALIZATION: &Personalization = b"ZcashOutputsHash";

/// The ANYONECANPAY modifier bit.
pub const ANYONECANPAY: u8 = 0x80;

#[repr(u8)]
#[derive(serde::Serialize, serde::Deserialize, Clone, Copy, Debug, Eq, PartialEq, Hash)]
/// All possible Sighash modes
pub enum Sighash {
    /// Sign ALL inputs and ALL outputs
    All = 0x01,
    /// Sign ALL inputs and NO outputs
    None = 0x02,
    /// Sign ALL inputs and ONE output
    Single = 0x3,
    /// Sign ONE inputs and ALL outputs
    AllACP = 0x81,
    /// Sign ONE inputs and NO outputs
    NoneACP = 0x82,
    /// Sign ONE inputs and ONE output
    SingleACP = 0x83,
}

impl Sighash {
    /// The flag byte, as appended to signatures.
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Convert a u8 into a Sighash flag or an error.
    pub fn from_u8(flag: u8) -> TxResult<Sighash> {
        match flag {
            0x01 => Ok(Sighash::All),
            0x02 => Ok(Sighash::None),
            0x3 => Ok(Sighash::Single),
            0x81 => Ok(Sighash::AllACP),
            0x82 => Ok(Sighash::NoneACP),
            0x83 => Ok(Sighash::SingleACP),
            _ => Err(TxError::UnknownSighash(flag)),
        }
    }

    /// True if the ANYONECANPAY modifier is set.
    pub fn anyone_can_pay(self) -> bool {
        self.to_u8() & ANYONECANPAY == ANYONECANPAY
    }

    /// True for NONE and NONE|ANYONECANPAY.
    pub fn is_none(self) -> bool {
        matches!(self, Sighash::None | Sighash::NoneACP)
    }

    /// True for SINGLE and SINGLE|ANYONECANPAY.
    pub fn is_single(self) -> bool {
        matches!(self, Sighash::Single | Sighash::SingleACP)
    }
}

impl TryFrom<u8> for Sighash {
    type Error = TxError;

    fn try_from(flag: u8) -> TxResult<Sighash> {
        Sighash::from_u8(flag)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_parses_sighash_flags() {
        let flags = [
            (0x01, Sighash::All, false),
            (0x02, Sighash::None, false),
            (0x03, Sighash::Single, false),
            (0x81, Sighash::AllACP, true),
            (0x82, Sighash::NoneACP, true),
            (0x83, Sighash::SingleACP, true),
        ];
        for (byte, flag, acp) in flags.iter() {
            assert_eq!(Sighash::from_u8(*byte).unwrap(), *flag);
            assert_eq!(flag.to_u8(), *byte);
            assert_eq!(flag.anyone_can_pay(), *acp);
        }
        assert!(Sighash::NoneACP.is_none());
        assert!(!Sighash::NoneACP.is_single());
        assert!(Sighash::SingleACP.is_single());
    }

    #[test]
    fn it_rejects_unknown_sighash_flags() {
        for byte in [0x00u8, 0x04, 0x80, 0x84, 0xff].iter() {
            match Sighash::try_from(*byte) {
                Err(TxError::UnknownSighash(b)) => assert_eq!(b, *byte),
                other => panic!("expected UnknownSighash, got {:?}", other),
            }
        }
    }

    #[test]
    fn it_uses_16_byte_personalizations() {
        let all = [
            PREVOUTS_PERSONALIZATION,
            SEQUENCE_PERSONALIZATION,
            OUTPUTS_PERSONALIZATION,
        ];
        for (i, p) in all.iter().enumerate() {
            assert_eq!(&p[..5], b"Zcash");
            for q in all.iter().skip(i + 1) {
                assert_ne!(p, q);
            }
        }
    }
}
