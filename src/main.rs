use clap::Parser;
use hashchain::chain::VerifyMode;
use hashchain::config::{Config, OutputFormat, DEFAULT_BLOCK_SIZE, DEFAULT_INPUT};
use hashchain::driver;
use hashchain::logging::init_logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "hashchain",
    version,
    about = "Split a file into hash-linked blocks and verify the chain"
)]
struct Cli {
    /// Input file
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Block size in bytes
    #[arg(short, long, default_value_t = DEFAULT_BLOCK_SIZE)]
    block_size: usize,

    /// Also require the genesis block to have an empty previous hash
    #[arg(long)]
    strict: bool,

    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            input: cli.input,
            block_size: cli.block_size,
            verify_mode: if cli.strict {
                VerifyMode::Strict
            } else {
                VerifyMode::Permissive
            },
            format: if cli.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
        }
    }
}

fn main() {
    init_logging("warn");
    let config = Config::from(Cli::parse());

    let stdout = std::io::stdout();
    if let Err(e) = driver::run(&config, &mut stdout.lock()) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
