//! cdsmodel - Command-line interface for the ISDA CDS standard model.
//!
//! # Usage
//!
//! ```bash
//! # Build a discount curve from zero rates
//! cdsmodel curve build --reference-date 2025-01-15 --tenors 0.25,1,5,10 --rates 3.0,3.2,3.5,3.8
//!
//! # Bootstrap a credit curve from par CDS quotes
//! cdsmodel credit bootstrap --reference-date 2025-01-15 \
//!     --tenors 2027-01-15,2030-01-15,2035-01-15 --spreads 100,150,200
//!
//! # Price a CDS
//! cdsmodel cds price --coupon 100 --maturity 2030-01-15 --reference-date 2025-01-15 ...
//!
//! # Convert a par spread into upfront points
//! cdsmodel cds convert --coupon 100 --spread 175 --maturity 2030-01-15 ...
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = cli.format;

    match cli.command {
        Commands::Curve(args) => commands::curve::execute(args, format)?,
        Commands::Credit(args) => commands::credit::execute(args, format)?,
        Commands::Cds(args) => commands::cds::execute(args, format)?,
        Commands::Config(args) => commands::config::execute(args, format)?,
    }

    Ok(())
}
