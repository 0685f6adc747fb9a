//! Hashchain demo - build, tamper with and verify a short chain
//!
//! Usage:
//!     hashchain-demo
//!     hashchain-demo --tamper-index 0 --forged-payload "mallory to bob"
//!     hashchain-demo --json --literal "hello"
//!
//! Always exits with status 0; verification failure is reported, not fatal.

use clap::Parser;
use hashchain_core::demo::{self, DemoOptions};
use hashchain_core::ChainConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "hashchain-demo")]
#[command(about = "Demonstrate hash chain tamper detection")]
#[command(version)]
struct Args {
    /// Index of the record whose payload gets rewritten
    #[arg(long, default_value_t = 1)]
    tamper_index: usize,

    /// Payload written into the tampered record
    #[arg(long, default_value = "forged")]
    forged_payload: String,

    /// String hashed independently at the end of the run
    #[arg(long, default_value = "hello world")]
    literal: String,

    /// Output as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "hashchain_core=debug"
    } else {
        "hashchain_core=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ChainConfig::from_env().unwrap_or_else(|e| {
        tracing::warn!("Ignoring environment configuration: {}", e);
        ChainConfig::default()
    });

    let options = DemoOptions {
        tamper_index: args.tamper_index,
        forged_payload: args.forged_payload,
        literal: args.literal,
    };
    let report = demo::run(config, &options);

    if args.json {
        match report.render_json() {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::error!("Failed to render JSON: {}", e),
        }
    } else {
        print!("{}", report.render_text());
    }
}
