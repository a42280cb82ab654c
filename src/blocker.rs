use crate::error::{ChainError, Result};

/// Split `input` into consecutive chunks of `block_size` bytes.
///
/// The last chunk holds the remainder. Empty input yields no chunks.
pub fn split(input: &[u8], block_size: usize) -> Result<Vec<&[u8]>> {
    if block_size == 0 {
        return Err(ChainError::InvalidConfiguration(
            "block size must be at least 1".into(),
        ));
    }
    Ok(input.chunks(block_size).collect())
}
