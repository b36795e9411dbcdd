//! Credit command implementation.
//!
//! Bootstraps a credit curve from a term structure of par CDS quotes.

use anyhow::Result;
use clap::{Args, Subcommand};
use tabled::Tabled;

use cds_credit::{CdsQuote, CreditCurveBuilder};
use cds_curves::bootstrap::{build_discount_curve, ZeroCurveConventions};

use crate::cli::OutputFormat;
use crate::commands::{
    parse_dates, parse_spreads_bps, parse_zero_curve_instruments, resolve_calendar, today,
    validate_recovery,
};
use crate::output::print_header;

/// Arguments for the credit command.
#[derive(Args, Debug)]
pub struct CreditArgs {
    #[command(subcommand)]
    pub command: CreditCommand,
}

/// Credit subcommands.
#[derive(Subcommand, Debug)]
pub enum CreditCommand {
    /// Bootstrap a survival-probability curve from par CDS quotes
    Bootstrap(BootstrapArgs),
}

/// Arguments for bootstrapping a credit curve.
#[derive(Args, Debug)]
pub struct BootstrapArgs {
    /// Reference (valuation) date (YYYY-MM-DD). Defaults to today.
    #[arg(short, long)]
    pub reference_date: Option<String>,

    /// Quote maturity dates (comma-separated, YYYY-MM-DD)
    #[arg(short, long)]
    pub tenors: String,

    /// Par spreads in basis points (comma-separated, matching --tenors)
    #[arg(short = 's', long)]
    pub spreads: String,

    /// Recovery rate assumption, in [0, 1)
    #[arg(long, default_value = "0.40")]
    pub recovery: f64,

    /// Discount curve instrument list: comma-separated `LETTER:DATE:RATE`
    /// entries (see `curve build --instruments`) used to bootstrap the
    /// underlying discount curve.
    #[arg(long)]
    pub discount_instruments: String,

    /// Holiday calendar name used for both the discount curve spot date and
    /// the credit curve schedule generation.
    #[arg(long, default_value = "weekend")]
    pub calendar: String,
}

/// Executes the credit command.
pub fn execute(args: CreditArgs, format: OutputFormat) -> Result<()> {
    match args.command {
        CreditCommand::Bootstrap(bootstrap_args) => execute_bootstrap(bootstrap_args, format),
    }
}

fn execute_bootstrap(args: BootstrapArgs, format: OutputFormat) -> Result<()> {
    let reference_date = match &args.reference_date {
        Some(s) => crate::commands::parse_date(s).map_err(|e| anyhow::anyhow!("{}", e))?,
        None => today().map_err(|e| anyhow::anyhow!("{}", e))?,
    };

    let maturities = parse_dates(&args.tenors)?;
    let spreads = parse_spreads_bps(&args.spreads)?;
    if maturities.len() != spreads.len() {
        return Err(anyhow::anyhow!(
            "Number of tenors ({}) must match number of spreads ({})",
            maturities.len(),
            spreads.len()
        ));
    }
    let recovery = validate_recovery(args.recovery)?;

    let discount_instruments = parse_zero_curve_instruments(&args.discount_instruments)?;
    let calendar = resolve_calendar(&args.calendar)?;
    let discount_curve = build_discount_curve(
        reference_date,
        &discount_instruments,
        &calendar,
        ZeroCurveConventions::default(),
    )
    .map_err(|e| anyhow::anyhow!("{}", e))?;

    let mut builder = CreditCurveBuilder::new(
        reference_date,
        reference_date,
        reference_date,
        &discount_curve,
        &calendar,
        recovery,
    );
    for (maturity, spread) in maturities.iter().zip(spreads.iter()) {
        builder = builder.with_quote(CdsQuote::new(*maturity, *spread));
    }

    let curve = builder.build().map_err(|e| anyhow::anyhow!("{}", e))?;

    #[derive(Tabled, serde::Serialize)]
    struct Pillar {
        #[tabled(rename = "Tenor (Y)")]
        tenor: String,
        #[tabled(rename = "Survival Probability")]
        survival: String,
        #[tabled(rename = "Hazard Rate (bps)")]
        hazard: String,
    }

    let tenors = curve.inner().tenors();
    let values = curve.inner().values();
    let mut pillars = Vec::new();
    for i in 1..tenors.len() {
        let (t0, t1) = (tenors[i - 1], tenors[i]);
        let (s0, s1) = (values[i - 1], values[i]);
        let hazard = -(s1 / s0).ln() / (t1 - t0);
        pillars.push(Pillar {
            tenor: format!("{:.2}", t1),
            survival: format!("{:.6}", s1),
            hazard: format!("{:.2}", hazard * 10_000.0),
        });
    }

    match format {
        OutputFormat::Table => {
            print_header("Bootstrapped Credit Curve");
            println!("Reference Date: {}", reference_date);
            println!("Recovery Rate: {:.2}%", recovery * 100.0);
            println!();
            crate::output::print_output(&pillars, format)?;
        }
        OutputFormat::Json | OutputFormat::Csv | OutputFormat::Minimal => {
            crate::output::print_output(&pillars, format)?;
        }
    }

    Ok(())
}
