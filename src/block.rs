use crate::hasher::{digest, BlockHash};

/// One link of the chain: a chunk of input plus its chained digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// The original chunk of input, unpadded.
    pub plaintext: Vec<u8>,
    /// Digest over `plaintext` and `previous_digest`.
    pub digest: BlockHash,
    /// Digest of the preceding block (empty for genesis).
    pub previous_digest: BlockHash,
}

impl Block {
    /// Create a block linked to `previous_digest`; the digest is computed automatically.
    pub fn new(plaintext: Vec<u8>, previous_digest: BlockHash) -> Self {
        let digest = digest(&plaintext, &previous_digest);
        Self {
            plaintext,
            digest,
            previous_digest,
        }
    }

    /// Check the stored digest against `plaintext` chained onto `previous`.
    pub fn verify_with(&self, previous: &str) -> bool {
        digest(&self.plaintext, previous) == self.digest
    }

    /// Check the stored digest against the block's own `previous_digest`.
    pub fn verify(&self) -> bool {
        self.verify_with(&self.previous_digest)
    }

    /// Plaintext as text, with invalid UTF-8 replaced.
    pub fn plaintext_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.plaintext)
    }
}
