use crate::block::Block;
use crate::hasher::{BlockHash, GENESIS_PREVIOUS};
use std::fmt;
use tracing::debug;

/// How strictly the genesis block is checked during verification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VerifyMode {
    /// Genesis may carry any `previous_digest`, as long as its own digest matches it.
    #[default]
    Permissive,
    /// Genesis `previous_digest` must also be the empty sentinel.
    Strict,
}

/// Outcome of verifying a chain. Tampering is a result, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Tampered,
}

impl Verdict {
    pub fn is_valid(self) -> bool {
        self == Verdict::Valid
    }
}

impl From<bool> for Verdict {
    fn from(valid: bool) -> Self {
        if valid {
            Verdict::Valid
        } else {
            Verdict::Tampered
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Valid => write!(f, "Blockchain is valid!"),
            Verdict::Tampered => write!(f, "Blockchain has been tampered with!"),
        }
    }
}

/// An ordered sequence of hash-linked blocks. Index 0 is genesis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chain {
    blocks: Vec<Block>,
}

impl Chain {
    /// Link `chunks` in order, each onto the digest of the one before it.
    pub fn build<I, C>(chunks: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[u8]>,
    {
        let mut blocks = Vec::new();
        let mut previous: BlockHash = GENESIS_PREVIOUS.to_string();
        for chunk in chunks {
            let block = Block::new(chunk.as_ref().to_vec(), previous);
            debug!(index = blocks.len(), digest = %block.digest, "linked block");
            previous = block.digest.clone();
            blocks.push(block);
        }
        Self { blocks }
    }

    /// Wrap existing records without recomputing anything.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Permissive verification: link continuity plus every record's own digest.
    pub fn verify(&self) -> bool {
        self.verify_with(VerifyMode::Permissive)
    }

    /// Permissive checks plus an empty genesis link.
    pub fn verify_strict(&self) -> bool {
        self.verify_with(VerifyMode::Strict)
    }

    /// Scan in index order and stop at the first violation.
    pub fn verify_with(&self, mode: VerifyMode) -> bool {
        let Some(genesis) = self.blocks.first() else {
            return true;
        };
        if mode == VerifyMode::Strict && genesis.previous_digest != GENESIS_PREVIOUS {
            debug!("genesis previous digest is not empty");
            return false;
        }
        if !genesis.verify() {
            debug!(index = 0, "digest mismatch");
            return false;
        }
        for (i, pair) in self.blocks.windows(2).enumerate() {
            let (prev, current) = (&pair[0], &pair[1]);
            if current.previous_digest != prev.digest {
                debug!(index = i + 1, "broken link");
                return false;
            }
            if !current.verify_with(&prev.digest) {
                debug!(index = i + 1, "digest mismatch");
                return false;
            }
        }
        true
    }

    /// Concatenate every plaintext in order.
    pub fn reassemble(&self) -> Vec<u8> {
        self.blocks
            .iter()
            .flat_map(|b| b.plaintext.iter().copied())
            .collect()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl<'a> IntoIterator for &'a Chain {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
