use crate::chain::VerifyMode;
use crate::error::{ChainError, Result};
use std::path::PathBuf;

/// Input file read when none is given.
pub const DEFAULT_INPUT: &str = "check.text";

/// Chunk size in bytes used when none is given.
pub const DEFAULT_BLOCK_SIZE: usize = 10;

/// How the report is written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Everything the driver needs for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input: PathBuf,
    pub block_size: usize,
    pub verify_mode: VerifyMode,
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            block_size: DEFAULT_BLOCK_SIZE,
            verify_mode: VerifyMode::default(),
            format: OutputFormat::default(),
        }
    }
}

impl Config {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            return Err(ChainError::InvalidConfiguration(
                "block size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
