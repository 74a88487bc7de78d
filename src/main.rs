//! VM Translator - Main Entry Point
//!
//! Translates a list of 16-bit virtual addresses through a TLB and a demand
//! paged page table, printing one trace line per address and a summary.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{info, LevelFilter};

use vm_translator::io::{read_virtual_addresses, write_summary};
use vm_translator::memory::BackingStore;
use vm_translator::{EngineConfig, PolicyKind, Result, TranslationEngine};
use vm_translator::{DEFAULT_ADDRESS_FILE, DEFAULT_BACKING_STORE};

#[derive(Parser)]
#[command(name = "vm-translator")]
#[command(about = "Translate virtual addresses through a TLB and demand-paged memory")]
#[command(version)]
struct Cli {
    /// File with one decimal virtual address per line
    #[arg(default_value = DEFAULT_ADDRESS_FILE)]
    addresses: PathBuf,

    /// Backing store file (256 pages of 256 bytes)
    #[arg(short, long, default_value = DEFAULT_BACKING_STORE)]
    backing_store: PathBuf,

    /// Page replacement policy: fifo or lru
    #[arg(short, long, default_value = "fifo")]
    policy: String,

    /// Write the trace and summary here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Keep TLB entries of evicted pages, as the classic simulator did
    #[arg(long)]
    keep_stale_tlb: bool,

    /// Log every fault and eviction
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

/// Main logic separated from main() for cleaner error handling
fn run(cli: &Cli) -> Result<()> {
    // Step 1: Resolve configuration before building any state
    let policy: PolicyKind = cli.policy.parse()?;
    let config = EngineConfig {
        policy,
        keep_stale_tlb: cli.keep_stale_tlb,
    };

    // Step 2: Read the whole address list up front
    let addresses = read_virtual_addresses(&cli.addresses)?;
    info!("read {} addresses from {}", addresses.len(), cli.addresses.display());

    // Step 3: Open the backing store for the duration of the run
    let store = BackingStore::open(&cli.backing_store)?;

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    // Step 4: Translate, streaming the trace
    let mut engine = TranslationEngine::new(config, store);
    let result = engine.run(&addresses, &mut out);
    // keep the trace lines written before a fatal error
    out.flush()?;
    let stats = result?;

    // Step 5: Summary
    write_summary(&mut out, &stats)?;
    out.flush()?;

    Ok(())
}
