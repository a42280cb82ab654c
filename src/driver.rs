use crate::blocker::split;
use crate::chain::{Chain, Verdict};
use crate::config::{Config, OutputFormat};
use crate::error::{ChainError, Result};
use crate::hasher::BlockHash;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Result of one pipeline run: the input, its chain, and the verdict.
#[derive(Debug, Clone)]
pub struct Report {
    pub content: Vec<u8>,
    pub chain: Chain,
    pub verdict: Verdict,
}

#[derive(Serialize)]
struct JsonBlock<'a> {
    index: usize,
    plaintext: String,
    digest: &'a BlockHash,
    previous_digest: &'a BlockHash,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    blocks: Vec<JsonBlock<'a>>,
    valid: bool,
}

/// Read the whole file. The handle is closed before this returns.
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| ChainError::InputUnavailable {
        path: path.to_path_buf(),
        source,
    })
}

/// Split, link and verify `content` according to `config`.
pub fn process(content: Vec<u8>, config: &Config) -> Result<Report> {
    let chain = Chain::build(split(&content, config.block_size)?);
    let verdict = Verdict::from(chain.verify_with(config.verify_mode));
    info!(
        blocks = chain.len(),
        block_size = config.block_size,
        ?verdict,
        "chain built and verified"
    );
    Ok(Report {
        content,
        chain,
        verdict,
    })
}

/// Human-readable report: file content, one section per block, verdict line.
///
/// Content and plaintexts are written as the raw bytes that were hashed.
pub fn render_text<W: Write>(report: &Report, out: &mut W) -> Result<()> {
    out.write_all(b"File Content: ")?;
    out.write_all(&report.content)?;
    writeln!(out)?;
    for (i, block) in report.chain.iter().enumerate() {
        writeln!(out, "Block {}:", i + 1)?;
        out.write_all(b"Plaintext: ")?;
        out.write_all(&block.plaintext)?;
        writeln!(out)?;
        writeln!(out, "Digest: {}", block.digest)?;
        writeln!(out, "PreviousHash: {}", block.previous_digest)?;
        writeln!(out)?;
    }
    writeln!(out, "{}", report.verdict)?;
    Ok(())
}

/// Structured report with the same content as [`render_text`], minus the raw file.
///
/// Plaintexts are lossy UTF-8 here since JSON strings cannot carry arbitrary bytes.
pub fn render_json<W: Write>(report: &Report, out: &mut W) -> Result<()> {
    let json = JsonReport {
        blocks: report
            .chain
            .iter()
            .enumerate()
            .map(|(index, b)| JsonBlock {
                index,
                plaintext: b.plaintext_lossy().into_owned(),
                digest: &b.digest,
                previous_digest: &b.previous_digest,
            })
            .collect(),
        valid: report.verdict.is_valid(),
    };
    serde_json::to_writer_pretty(&mut *out, &json)?;
    writeln!(out)?;
    Ok(())
}

/// Full run: read `config.input`, build and verify, write the report to `out`.
///
/// The configuration is validated before the input is touched.
pub fn run<W: Write>(config: &Config, out: &mut W) -> Result<Verdict> {
    config.validate()?;
    info!(path = %config.input.display(), "reading input");
    let content = read_input(&config.input)?;
    let report = process(content, config)?;
    match config.format {
        OutputFormat::Text => render_text(&report, out)?,
        OutputFormat::Json => render_json(&report, out)?,
    }
    Ok(report.verdict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::VerifyMode;
    use crate::hasher::digest;

    fn write_input(dir: &tempfile::TempDir, content: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join("check.text");
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(content).unwrap();
        path
    }

    #[test]
    fn text_report_for_worked_example() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_input(&tmp, b"HELLOWORLDFOO");

        let mut out = Vec::new();
        let verdict = run(&Config::new(&path), &mut out).unwrap();
        assert_eq!(verdict, Verdict::Valid);

        let d0 = digest(b"HELLOWORLD", "");
        let d1 = digest(b"FOO", &d0);
        let expected = format!(
            "File Content: HELLOWORLDFOO\n\
             Block 1:\nPlaintext: HELLOWORLD\nDigest: {d0}\nPreviousHash: \n\n\
             Block 2:\nPlaintext: FOO\nDigest: {d1}\nPreviousHash: {d0}\n\n\
             Blockchain is valid!\n"
        );
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn empty_file_reports_valid_with_no_blocks() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_input(&tmp, b"");

        let mut out = Vec::new();
        assert_eq!(run(&Config::new(&path), &mut out).unwrap(), Verdict::Valid);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "File Content: \nBlockchain is valid!\n"
        );
    }

    #[test]
    fn missing_file_names_the_path() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("absent.text");

        let mut out = Vec::new();
        let err = run(&Config::new(&path), &mut out).unwrap_err();
        assert!(matches!(err, ChainError::InputUnavailable { .. }));
        assert!(err.to_string().contains("absent.text"));
        assert!(out.is_empty());
    }

    #[test]
    fn zero_block_size_fails_before_reading() {
        let cfg = Config {
            block_size: 0,
            ..Config::new("does-not-matter")
        };
        let mut out = Vec::new();
        assert!(matches!(
            run(&cfg, &mut out),
            Err(ChainError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn process_respects_block_size_and_mode() {
        let cfg = Config {
            block_size: 4,
            verify_mode: VerifyMode::Strict,
            ..Config::default()
        };
        let report = process(b"abcdefghij".to_vec(), &cfg).unwrap();
        assert_eq!(report.chain.len(), 3);
        assert_eq!(report.chain.reassemble(), b"abcdefghij");
        assert!(report.verdict.is_valid());
    }

    #[test]
    fn text_report_keeps_split_multibyte_char() {
        // "é" is two bytes and straddles the block boundary
        let input = "aaaaaaaaaé".as_bytes().to_vec();
        let report = process(input.clone(), &Config::default()).unwrap();
        assert_eq!(report.chain.len(), 2);

        let mut out = Vec::new();
        render_text(&report, &mut out).unwrap();

        let mut expected_block1 = b"Plaintext: aaaaaaaaa".to_vec();
        expected_block1.push(input[9]);
        expected_block1.push(b'\n');
        let mut expected_block2 = b"Plaintext: ".to_vec();
        expected_block2.push(input[10]);
        expected_block2.push(b'\n');
        assert!(out.windows(expected_block1.len()).any(|w| w == expected_block1));
        assert!(out.windows(expected_block2.len()).any(|w| w == expected_block2));
        assert!(!String::from_utf8_lossy(&out).contains('\u{FFFD}'));
    }

    #[test]
    fn text_report_writes_non_utf8_bytes_verbatim() {
        let report = process(vec![0xFF, b'A'], &Config::default()).unwrap();
        let mut out = Vec::new();
        render_text(&report, &mut out).unwrap();

        assert!(out.starts_with(b"File Content: \xFFA\nBlock 1:\nPlaintext: \xFFA\n"));
        assert!(out.ends_with(b"Blockchain is valid!\n"));
    }

    #[test]
    fn process_rejects_zero_block_size() {
        let cfg = Config {
            block_size: 0,
            ..Config::default()
        };
        assert!(matches!(
            process(b"data".to_vec(), &cfg),
            Err(ChainError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn json_report_shape() {
        let report = process(b"HELLOWORLDFOO".to_vec(), &Config::default()).unwrap();
        let mut out = Vec::new();
        render_json(&report, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["valid"], true);
        let blocks = value["blocks"].as_array().unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0]["plaintext"], "HELLOWORLD");
        assert_eq!(blocks[0]["previous_digest"], "");
        assert_eq!(blocks[1]["previous_digest"], blocks[0]["digest"]);
    }

    #[test]
    fn tampered_report_renders_tamper_line() {
        let mut report = process(b"HELLOWORLDFOO".to_vec(), &Config::default()).unwrap();
        let mut blocks = report.chain.blocks().to_vec();
        blocks[0].plaintext[0] = b'J';
        report.chain = Chain::from_blocks(blocks);
        report.verdict = Verdict::from(report.chain.verify());

        let mut out = Vec::new();
        render_text(&report, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("Blockchain has been tampered with!\n"));
    }
}
