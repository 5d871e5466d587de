//! Useful macros for implementing new chains

#[macro_export]
/// Implement `serde::Serialize` and `serde::Deserialize` by passing through to the hex
macro_rules! impl_hex_serde {
    ($item:ty) => {
        impl serde::Serialize for $item {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                let s = $crate::ser::ByteFormat::serialize_hex(self);
                serializer.serialize_str(&s)
            }
        }

        impl<'de> serde::Deserialize<'de> for $item {
            fn deserialize<D>(deserializer: D) -> Result<$item, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s: String = serde::Deserialize::deserialize(deserializer)?;
                <$item as $crate::ser::ByteFormat>::deserialize_hex(&s)
                    .map_err(|e| serde::de::Error::custom(e.to_string()))
            }
        }
    };
}

#[macro_export]
/// Define a 32-byte digest newtype. It gets hex serde, `ByteFormat`, and the `Digest` marker.
macro_rules! define_32_byte_digest {
    (
        $(#[$outer:meta])*
        $digest_name:ident
    ) => {
        $(#[$outer])*
        #[derive(Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $digest_name([u8; 32]);

        $crate::impl_hex_serde!($digest_name);

        impl $crate::hashes::Digest for $digest_name {}

        impl $crate::ser::ByteFormat for $digest_name {
            type Error = $crate::ser::SerError;

            fn serialized_length(&self) -> usize {
                32
            }

            fn read_from<R>(reader: &mut R, _limit: usize) -> $crate::ser::SerResult<Self>
            where
                R: std::io::Read,
                Self: std::marker::Sized,
            {
                Ok(Self($crate::ser::read_array(reader)?))
            }

            fn write_to<W>(&self, writer: &mut W) -> $crate::ser::SerResult<usize>
            where
                W: std::io::Write,
            {
                writer.write_all(&self.0)?;
                Ok(32)
            }
        }

        impl core::fmt::Debug for $digest_name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}({})", stringify!($digest_name), hex::encode(self.0))
            }
        }

        impl From<[u8; 32]> for $digest_name {
            fn from(buf: [u8; 32]) -> Self {
                Self(buf)
            }
        }

        impl From<$digest_name> for [u8; 32] {
            fn from(digest: $digest_name) -> Self {
                digest.0
            }
        }

        impl AsRef<[u8; 32]> for $digest_name {
            fn as_ref(&self) -> &[u8; 32] {
                &self.0
            }
        }

        impl AsRef<[u8]> for $digest_name {
            fn as_ref(&self) -> &[u8] {
                &self.0[..]
            }
        }

        impl AsMut<[u8; 32]> for $digest_name {
            fn as_mut(&mut self) -> &mut [u8; 32] {
                &mut self.0
            }
        }
    };
}

#[macro_export]
/// Wrap a prefixed vector of bytes (`u8`) in a newtype, and implement convenience functions for
/// it.
macro_rules! wrap_prefixed_byte_vector {
    (
        $(#[$outer:meta])*
        $wrapper_name:ident
    ) => {
        $(#[$outer])*
        #[derive(Clone, Debug, Eq, PartialEq, Default, Hash, PartialOrd, Ord)]
        pub struct $wrapper_name(Vec<u8>);

        impl $crate::ser::ByteFormat for $wrapper_name {
            type Error = $crate::ser::SerError;

            fn serialized_length(&self) -> usize {
                self.len_prefix() as usize + self.len()
            }

            fn read_from<R>(reader: &mut R, _limit: usize) -> Result<Self, Self::Error>
            where
                R: std::io::Read,
            {
                use std::io::Read;

                let expected = $crate::ser::read_compact_int(reader)?;
                let mut buf = vec![];
                reader.by_ref().take(expected).read_to_end(&mut buf)?;
                if (buf.len() as u64) < expected {
                    return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
                }
                Ok(Self(buf))
            }

            fn write_to<W>(&self, writer: &mut W) -> Result<usize, Self::Error>
            where
                W: std::io::Write,
            {
                let written = $crate::ser::write_compact_int(writer, self.len() as u64)?;
                writer.write_all(&self.0)?;
                Ok(written + self.len())
            }
        }

        $crate::impl_hex_serde!($wrapper_name);

        impl std::convert::AsRef<[u8]> for $wrapper_name {
            fn as_ref(&self) -> &[u8] {
                &self.0[..]
            }
        }

        impl $wrapper_name {
            /// Instantate a new wrapped vector
            pub fn new(v: Vec<u8>) -> Self {
                Self(v)
            }

            /// Construct an empty wrapped vector instance.
            pub fn null() -> Self {
                Self(vec![])
            }

            /// Return a reference to the underlying bytes
            pub fn items(&self) -> &[u8] {
                &self.0
            }

            /// Return the length of the item vector.
            pub fn len(&self) -> usize {
                self.0.len()
            }

            /// Return true if the length of the item vector is 0.
            pub fn is_empty(&self) -> bool {
                self.len() == 0
            }

            /// Determine the byte-length of the vector length prefix
            pub fn len_prefix(&self) -> u8 {
                $crate::ser::prefix_byte_len(self.len() as u64)
            }
        }

        impl From<&[u8]> for $wrapper_name {
            fn from(v: &[u8]) -> Self {
                Self(v.to_vec())
            }
        }

        impl From<Vec<u8>> for $wrapper_name {
            fn from(v: Vec<u8>) -> Self {
                Self(v)
            }
        }

        impl From<$wrapper_name> for Vec<u8> {
            fn from(w: $wrapper_name) -> Self {
                w.0
            }
        }
    };
}

#[macro_export]
/// Implement conversion between script types by passing via `as_ref().into()`
macro_rules! impl_script_conversion {
    ($t1:ty, $t2:ty) => {
        impl From<&$t2> for $t1 {
            fn from(t: &$t2) -> $t1 {
                t.as_ref().into()
            }
        }
        impl From<&$t1> for $t2 {
            fn from(t: &$t1) -> $t2 {
                t.as_ref().into()
            }
        }
    };
}

#[macro_export]
/// Make a new marked digest wrapping a 32-byte base digest.
macro_rules! mark_32_byte_hash {
    (
        $(#[$outer:meta])*
        $hash_name:ident, $base_type:ty
    ) => {
        $(#[$outer])*
        #[derive(
            serde::Serialize, serde::Deserialize, Copy, Clone, Default, Debug, Eq, PartialEq, Hash,
        )]
        pub struct $hash_name(pub $base_type);

        impl $hash_name {
            /// Deserialize from BE hex, as displayed by block explorers
            pub fn from_be_hex(be: &str) -> $crate::ser::SerResult<Self> {
                use $crate::hashes::MarkedDigest;
                Ok(<Self as $crate::ser::ByteFormat>::deserialize_hex(be)?.reversed())
            }

            /// Convert to BE hex, as displayed by block explorers
            pub fn to_be_hex(&self) -> String {
                use $crate::hashes::MarkedDigest;
                $crate::ser::ByteFormat::serialize_hex(&self.reversed())
            }
        }

        impl From<[u8; 32]> for $hash_name {
            fn from(bytes: [u8; 32]) -> Self {
                Self(bytes.into())
            }
        }

        impl AsRef<[u8; 32]> for $hash_name {
            fn as_ref(&self) -> &[u8; 32] {
                AsRef::<[u8; 32]>::as_ref(&self.0)
            }
        }

        impl $crate::ser::ByteFormat for $hash_name {
            type Error = $crate::ser::SerError;

            fn serialized_length(&self) -> usize {
                32
            }

            fn read_from<R>(reader: &mut R, _limit: usize) -> $crate::ser::SerResult<Self>
            where
                R: std::io::Read,
                Self: std::marker::Sized,
            {
                Ok(Self(<$base_type as $crate::ser::ByteFormat>::read_from(reader, 0)?))
            }

            fn write_to<W>(&self, writer: &mut W) -> $crate::ser::SerResult<usize>
            where
                W: std::io::Write,
            {
                $crate::ser::ByteFormat::write_to(&self.0, writer)
            }
        }

        impl $crate::hashes::MarkedDigest for $hash_name {
            type Digest = $base_type;

            fn new(hash: $base_type) -> Self {
                Self(hash)
            }

            fn internal(&self) -> $base_type {
                self.0
            }
        }

        impl From<$base_type> for $hash_name {
            fn from(h: $base_type) -> Self {
                Self(h)
            }
        }

        impl From<$hash_name> for $base_type {
            fn from(h: $hash_name) -> Self {
                h.0
            }
        }
    };
}
