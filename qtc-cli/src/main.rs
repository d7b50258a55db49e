//! QTC wallet CLI
//!
//! Generates post-quantum wallets, decodes `qtc1...` addresses and derives
//! individual HD children.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use qtc_core::types::{self as qtc_types, Address, Entropy, HdPath, Seed, WalletMethod};
use qtc_crypto::{child_entropy, witness_program, ProviderKind};
use qtc_wallet::{AssemblerConfig, WalletAssembler, WalletExport};

/// QTC - post-quantum wallet generator
#[derive(Parser)]
#[command(name = "qtc-wallet")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a wallet
    Generate {
        /// Derivation method: primary, pq-hd or hd-multi
        #[arg(short, long, default_value = "hd-multi")]
        method: WalletMethod,
        /// Number of addresses (hd-multi only)
        #[arg(short, long)]
        count: Option<u32>,
        /// Address count for multi-address methods when --count is absent
        #[arg(long, env = "QTC_ADDRESS_COUNT")]
        default_count: Option<u32>,
        /// Reuse an existing seed instead of drawing a fresh one
        #[arg(long)]
        seed_hex: Option<String>,
        /// Provider transport: native or process
        #[arg(long, env = "QTC_PROVIDER", default_value = "native")]
        provider: ProviderKind,
        /// Helper binary for the process provider
        #[arg(long, env = "QTC_PROVIDER_BIN")]
        provider_bin: Option<PathBuf>,
        /// Output file for the wallet (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Decode a qtc1... address
    Decode {
        /// Address to decode
        address: String,
    },

    /// Derive one child of a master entropy
    Derive {
        /// Master entropy (hex, 64 bytes)
        #[arg(long)]
        master_hex: String,
        /// Derivation path, e.g. m/44'/0'/0/0
        #[arg(long)]
        path: HdPath,
    },
}

fn main() -> ExitCode {
    // Load .env before clap reads QTC_* variables
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "qtc=debug,info"
    } else {
        "qtc=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match cli.command {
        Commands::Generate {
            method,
            count,
            default_count,
            seed_hex,
            provider,
            provider_bin,
            output,
        } => cmd_generate(GenerateOptions {
            method,
            count: count.or(default_count.filter(|_| method.spec().multi_address)),
            seed_hex,
            provider,
            provider_bin,
            output,
        }),
        Commands::Decode { address } => cmd_decode(&address),
        Commands::Derive { master_hex, path } => cmd_derive(&master_hex, path),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

struct GenerateOptions {
    method: WalletMethod,
    count: Option<u32>,
    seed_hex: Option<String>,
    provider: ProviderKind,
    provider_bin: Option<PathBuf>,
    output: Option<PathBuf>,
}

/// Generate a wallet
fn cmd_generate(options: GenerateOptions) -> Result<()> {
    eprintln!(
        "{} {} ({} provider)",
        "🔑 Generating wallet:".cyan().bold(),
        options.method,
        options.provider
    );

    let provider = options
        .provider
        .build(options.provider_bin)
        .context("Failed to set up provider")?;

    let mut config = AssemblerConfig::default();
    if let Some(count) = options.count {
        config = config.with_address_count(count);
    }
    let assembler = WalletAssembler::with_config(provider, config);

    let (seed, fresh) = match options.seed_hex {
        Some(hex) => (Seed::from_hex(&hex).context("Invalid --seed-hex")?, false),
        None => (Seed::generate(), true),
    };
    let wallet = assembler
        .assemble(options.method, &seed)
        .context("Wallet generation failed")?;

    let json = WalletExport::from(&wallet).to_json_pretty()?;

    if let Some(path) = options.output {
        std::fs::write(&path, &json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        eprintln!("{} {}", "✅ Wallet saved to:".green(), path.display());
    } else {
        println!("{json}");
    }

    for entry in wallet.addresses() {
        eprintln!("   {} {}", entry.path.to_string().dimmed(), entry.address);
    }

    if fresh {
        eprintln!("\n{} {}", "Seed:".yellow().bold(), seed.to_hex());
        eprintln!("{}", "⚠️  IMPORTANT: the seed and the exported secret keys must never be shared.".red().bold());
    }

    Ok(())
}

/// Decode an address
fn cmd_decode(address: &str) -> Result<()> {
    let (hrp, version, program) = qtc_types::decode(address).context("Invalid address")?;

    println!("{} {}", "HRP:".dimmed(), hrp);
    println!("{} {}", "Witness version:".dimmed(), version);
    println!("{} {}", "Program:".dimmed(), hex::encode(program));

    Ok(())
}

/// Derive one child node
fn cmd_derive(master_hex: &str, path: HdPath) -> Result<()> {
    let master = Entropy::from_hex(master_hex).context("Invalid --master-hex")?;
    let child = child_entropy(&master, &path).context("Child derivation failed")?;

    let version = WalletMethod::HdMulti.spec().witness_version;
    let address = Address::new(version, witness_program(child.as_bytes()))?;

    println!("{} {}", "Path:".dimmed(), path);
    println!("{} {}", "Child entropy:".dimmed(), child.to_hex());
    println!("{} {}", "Address:".dimmed(), address);

    Ok(())
}
