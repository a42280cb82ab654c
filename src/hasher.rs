use sha2::{Digest, Sha256};

/// SHA-256 digest rendered as 64 lowercase hex characters.
pub type BlockHash = String;

/// Previous-digest value carried by the genesis block.
pub const GENESIS_PREVIOUS: &str = "";

/// Hash `block` followed by the hex text of `previous_digest`.
///
/// The previous digest is fed in its textual form, not as raw bytes.
pub fn digest(block: &[u8], previous_digest: &str) -> BlockHash {
    let mut hasher = Sha256::new();
    hasher.update(block);
    hasher.update(previous_digest.as_bytes());
    format!("{:x}", hasher.finalize())
}
