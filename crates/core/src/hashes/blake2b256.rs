use blake2b_simd::{Params, State};
use std::io::{Result as IOResult, Write};

use crate::hashes::marked::{MarkedDigestWriter, Personalization, PersonalizedWriter};

define_32_byte_digest!(
    /// A blake2b256 digest.
    Blake2b256Digest
);

/// A struct that exposes a personalized Blake2b256 `Write` interface.
///
/// ```
/// # use std::io::{Result};
/// use std::io::Write;
/// use zcashes_core::hashes::{Blake2b256Writer, MarkedDigestWriter, PersonalizedWriter};
///
/// # fn main() -> Result<()> {
/// let mut w = Blake2b256Writer::with_personalization(b"ZcashPrevoutHash");
/// # let data = [0u8; 36];
///
/// // Writing more than once will update the hasher.
/// w.write_all(&data)?;
///
/// // Call finish to consume the hasher and produce the digest.
/// let digest = w.finish();
/// # Ok(())
/// }
/// ```
pub struct Blake2b256Writer {
    internal: State,
}

impl Default for Blake2b256Writer {
    fn default() -> Blake2b256Writer {
        Blake2b256Writer {
            internal: Params::new().hash_length(32).to_state(),
        }
    }
}

impl Write for Blake2b256Writer {
    fn write(&mut self, buf: &[u8]) -> IOResult<usize> {
        self.internal.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> IOResult<()> {
        Ok(())
    }
}

impl MarkedDigestWriter<Blake2b256Digest> for Blake2b256Writer {
    fn finish(self) -> Blake2b256Digest {
        let mut digest = Blake2b256Digest::default();
        digest
            .as_mut()
            .copy_from_slice(self.internal.finalize().as_bytes());
        digest
    }
}

impl PersonalizedWriter<Blake2b256Digest> for Blake2b256Writer {
    fn with_personalization(personalization: &Personalization) -> Self {
        Blake2b256Writer {
            internal: Params::new()
                .hash_length(32)
                .personal(personalization)
                .to_state(),
        }
    }
}
