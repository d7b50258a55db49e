//! QTC provider helper
//!
//! Out-of-process key generation for the `process` provider:
//!
//! ```text
//! qtc-provider <gen_kyber_from_seed|kem_self_from_seed|gen_dilithium_from_seed> <seed_hex>
//! ```
//!
//! Prints one JSON object on stdout. Exit codes: 1 usage, 2 bad seed,
//! 3 provider failure.

use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use qtc_core::traits::CryptoProvider;
use qtc_crypto::provider::protocol::{
    ProviderCommand, ProviderResponse, EXIT_BAD_SEED, EXIT_PROVIDER, EXIT_USAGE,
};
use qtc_crypto::NativeProvider;

const USAGE: &str = "usage: qtc-provider <command> <seed_hex>";

struct Failure {
    code: i32,
    message: String,
}

impl Failure {
    fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "qtc=warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    match run(&args) {
        Ok(line) => {
            println!("{line}");
            ExitCode::SUCCESS
        }
        Err(failure) => {
            eprintln!("{}", failure.message);
            ExitCode::from(u8::try_from(failure.code).unwrap_or(1))
        }
    }
}

fn run(args: &[String]) -> Result<String, Failure> {
    let [command, seed_hex] = args else {
        return Err(Failure::new(EXIT_USAGE, USAGE));
    };

    let command: ProviderCommand = command
        .parse()
        .map_err(|e| Failure::new(EXIT_USAGE, format!("{e}\n{USAGE}")))?;

    let seed = hex::decode(seed_hex.trim())
        .map_err(|e| Failure::new(EXIT_BAD_SEED, format!("invalid seed hex: {e}")))?;
    if seed.is_empty() {
        return Err(Failure::new(EXIT_BAD_SEED, "seed must not be empty"));
    }

    let provider = NativeProvider::new();
    let response = match command {
        ProviderCommand::KemKeygen => provider.kem_keygen(&seed).map(|k| ProviderResponse::kem(&k)),
        ProviderCommand::KemSelfEncapsulate => provider
            .kem_self_encapsulate(&seed)
            .map(|e| ProviderResponse::kem_self(&e)),
        ProviderCommand::SigKeygen => provider.sig_keygen(&seed).map(|k| ProviderResponse::sig(&k)),
    }
    .map_err(|e| Failure::new(EXIT_PROVIDER, format!("{command} failed: {e}")))?;

    serde_json::to_string(&response)
        .map_err(|e| Failure::new(EXIT_PROVIDER, format!("failed to encode response: {e}")))
}
