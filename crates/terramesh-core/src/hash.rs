//! Content hashing for exported mesh bodies

use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::io::{self, Write};

/// A SHA-256 hash of exported content.
///
/// Two exports of the same heightfield produce the same body hash, which
/// makes re-export comparisons cheap without diffing whole files.
#[derive(Clone, Copy, Hash, Eq, PartialEq)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Compute a hash from bytes
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Self(hasher.finalize().into())
    }

    /// Get the hash as a hex string
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// Get the hash as a prefixed hex string (e.g., "sha256:abcdef...")
    pub fn to_prefixed_hex(&self) -> String {
        format!("sha256:{}", self.to_hex())
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}

impl Serialize for ContentHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_prefixed_hex())
    }
}

/// A writer that hashes everything passing through it.
pub struct HashingWriter<W> {
    inner: W,
    hasher: Sha256,
}

impl<W: Write> HashingWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            hasher: Sha256::new(),
        }
    }

    /// Finish hashing, returning the inner writer and the hash of all bytes written
    pub fn finish(self) -> (W, ContentHash) {
        (self.inner, ContentHash(self.hasher.finalize().into()))
    }
}

impl<W: Write> Write for HashingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consistent_hashing() {
        let h1 = ContentHash::from_bytes(b"v 0 0 0\n");
        let h2 = ContentHash::from_bytes(b"v 0 0 0\n");
        assert_eq!(h1, h2);
    }

    #[test]
    fn test_different_content_different_hash() {
        let h1 = ContentHash::from_bytes(b"v 0 0 0\n");
        let h2 = ContentHash::from_bytes(b"v 0 0 1\n");
        assert_ne!(h1, h2);
    }

    #[test]
    fn test_prefixed_hex() {
        let h = ContentHash::from_bytes(b"mesh");
        let prefixed = h.to_prefixed_hex();
        assert!(prefixed.starts_with("sha256:"));
        assert_eq!(prefixed.len(), "sha256:".len() + 64);
    }

    #[test]
    fn test_hashing_writer_matches_direct_hash() {
        let mut writer = HashingWriter::new(Vec::new());
        writer.write_all(b"v 1 2 3\n").unwrap();
        writer.write_all(b"f 1/1/1 2/2/2 3/3/3\n").unwrap();
        let (bytes, hash) = writer.finish();

        assert_eq!(bytes, b"v 1 2 3\nf 1/1/1 2/2/2 3/3/3\n");
        assert_eq!(hash, ContentHash::from_bytes(&bytes));
    }
}
