//! Curve command implementation.
//!
//! Builds and queries discount curves.

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use tabled::Tabled;

use cds_core::daycounts::DayCountConvention;
use cds_core::types::{Date, Frequency};
use cds_curves::bootstrap::{build_zero_curve, ZeroCurveConventions};
use cds_curves::curves::DiscountCurveBuilder;
use cds_curves::interpolation::InterpolationMethod;
use cds_curves::traits::Curve;

use crate::cli::OutputFormat;
use crate::commands::{
    parse_bdc, parse_frequency, parse_rates_pct, parse_tenors, parse_zero_curve_instruments,
    resolve_calendar, today,
};
use crate::output::print_header;

/// Arguments for the curve command.
#[derive(Args, Debug)]
pub struct CurveArgs {
    #[command(subcommand)]
    pub command: CurveCommand,
}

/// Curve subcommands.
#[derive(Subcommand, Debug)]
pub enum CurveCommand {
    /// Build a discount curve from zero rates
    Build(BuildArgs),

    /// Query a discount factor or zero rate at a given tenor
    Discount(DiscountArgs),
}

/// Arguments for building a zero curve from money-market and swap
/// instruments.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Value date (YYYY-MM-DD). Defaults to today. Advanced 2 business days
    /// (modified-following) to the spot date all instruments are quoted from.
    #[arg(short, long)]
    pub value_date: Option<String>,

    /// Instrument list: comma-separated `LETTER:DATE:RATE` entries, e.g.
    /// "M:2025-04-08:5.25,M:2025-07-08:5.40,S:2027-01-08:4.50", where the
    /// letter is `M` (money market) or `S` (par swap), DATE is YYYY-MM-DD,
    /// and RATE is in percent. Must be strictly ascending by date.
    #[arg(short, long)]
    pub instruments: String,

    /// Money-market day count convention (e.g. "ACT/360")
    #[arg(long, default_value = "ACT/360")]
    pub mm_day_count: String,

    /// Fixed leg payment frequency for swap instruments
    #[arg(long, default_value = "SemiAnnual")]
    pub fixed_frequency: String,

    /// Fixed leg day count convention for swap instruments
    #[arg(long, default_value = "30/360 US")]
    pub fixed_day_count: String,

    /// Float leg payment frequency for swap instruments
    #[arg(long, default_value = "Quarterly")]
    pub float_frequency: String,

    /// Business day convention used to roll the value date to the spot date
    #[arg(long, default_value = "M")]
    pub bdc: String,

    /// Holiday calendar name
    #[arg(long, default_value = "weekend")]
    pub calendar: String,
}

/// Arguments for querying a curve.
#[derive(Args, Debug)]
pub struct DiscountArgs {
    /// Reference date (YYYY-MM-DD). Defaults to today.
    #[arg(short, long)]
    pub reference_date: Option<String>,

    /// Tenors for the input curve (comma-separated)
    #[arg(short, long)]
    pub tenors: String,

    /// Zero rates for the input curve (comma-separated, in percent)
    #[arg(short = 'z', long)]
    pub rates: String,

    /// Tenor to query (in years)
    #[arg(short = 'q', long)]
    pub query_tenor: f64,

    /// Interpolation method
    #[arg(short, long, value_enum, default_value = "log-linear")]
    pub interpolation: InterpolationChoice,
}

/// Interpolation method choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InterpolationChoice {
    /// Linear interpolation
    #[value(name = "linear")]
    Linear,
    /// Log-linear interpolation (standard model default)
    #[value(name = "log-linear")]
    LogLinear,
    /// Cubic spline
    #[value(name = "cubic")]
    Cubic,
    /// Monotone convex
    #[value(name = "monotone-convex")]
    MonotoneConvex,
}

impl From<InterpolationChoice> for InterpolationMethod {
    fn from(choice: InterpolationChoice) -> Self {
        match choice {
            InterpolationChoice::Linear => InterpolationMethod::Linear,
            InterpolationChoice::LogLinear => InterpolationMethod::LogLinear,
            InterpolationChoice::Cubic => InterpolationMethod::CubicSpline,
            InterpolationChoice::MonotoneConvex => InterpolationMethod::MonotoneConvex,
        }
    }
}

/// Executes the curve command.
pub fn execute(args: CurveArgs, format: OutputFormat) -> Result<()> {
    match args.command {
        CurveCommand::Build(build_args) => execute_build(build_args, format),
        CurveCommand::Discount(discount_args) => execute_discount(discount_args, format),
    }
}

fn execute_build(args: BuildArgs, format: OutputFormat) -> Result<()> {
    let value_date = get_reference_date(&args.value_date)?;
    let instruments = parse_zero_curve_instruments(&args.instruments)?;
    let calendar = resolve_calendar(&args.calendar)?;

    let conventions = ZeroCurveConventions {
        mm_day_count: args
            .mm_day_count
            .parse::<DayCountConvention>()
            .map_err(|e| anyhow::anyhow!("Invalid money-market day count: {}", e))?,
        fixed_frequency: parse_frequency(&args.fixed_frequency)?,
        fixed_day_count: args
            .fixed_day_count
            .parse::<DayCountConvention>()
            .map_err(|e| anyhow::anyhow!("Invalid fixed leg day count: {}", e))?,
        float_frequency: parse_frequency(&args.float_frequency)?,
        business_day_convention: parse_bdc(&args.bdc)?,
    };

    let curve = build_zero_curve(value_date, &instruments, &calendar, conventions)
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    #[derive(Tabled, serde::Serialize)]
    struct CurvePoint {
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Zero Rate (%)")]
        zero_rate: String,
        #[tabled(rename = "Discount Factor")]
        discount_factor: String,
    }

    let points: Vec<CurvePoint> = curve
        .dates()
        .iter()
        .zip(curve.rates().iter())
        .map(|(&date, &rate)| {
            let df = curve.discount_factor_at(date).unwrap_or(f64::NAN);
            CurvePoint {
                date: date.to_string(),
                zero_rate: format!("{:.4}", rate * 100.0),
                discount_factor: format!("{:.8}", df),
            }
        })
        .collect();

    match format {
        OutputFormat::Table => {
            print_header("Zero Curve");
            println!("Value Date: {}", value_date);
            println!();
            crate::output::print_output(&points, format)?;
        }
        OutputFormat::Json | OutputFormat::Csv | OutputFormat::Minimal => {
            crate::output::print_output(&points, format)?;
        }
    }

    Ok(())
}

fn execute_discount(args: DiscountArgs, format: OutputFormat) -> Result<()> {
    let reference_date = get_reference_date(&args.reference_date)?;
    let tenors = parse_tenors(&args.tenors)?;
    let rates = parse_rates_pct(&args.rates)?;
    let curve = build_curve(reference_date, &tenors, &rates, args.interpolation.into())?;

    let df = curve.discount_factor(args.query_tenor)?;
    let zero = if args.query_tenor > 0.0 {
        -df.ln() / args.query_tenor
    } else {
        0.0
    };

    match format {
        OutputFormat::Table => {
            print_header("Discount Curve Query");
            println!("Tenor: {:.2}Y", args.query_tenor);
            println!("Discount Factor: {:.8}", df);
            println!("Zero Rate: {:.4}%", zero * 100.0);
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "tenor": args.query_tenor,
                "discount_factor": df,
                "zero_rate": zero,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Csv => {
            println!("tenor,discount_factor,zero_rate");
            println!("{},{},{}", args.query_tenor, df, zero);
        }
        OutputFormat::Minimal => {
            println!("{}", df);
        }
    }

    Ok(())
}

/// Builds a discount curve from zero rates quoted in decimal form.
fn build_curve(
    reference_date: Date,
    tenors: &[f64],
    rates: &[f64],
    interpolation: InterpolationMethod,
) -> Result<cds_curves::curves::DiscountCurve> {
    if tenors.len() != rates.len() {
        return Err(anyhow::anyhow!(
            "Number of tenors ({}) must match number of rates ({})",
            tenors.len(),
            rates.len()
        ));
    }

    let mut builder = DiscountCurveBuilder::new(reference_date).with_interpolation(interpolation);
    for (&t, &r) in tenors.iter().zip(rates.iter()) {
        builder = builder.add_zero_rate(t, r);
    }
    builder
        .with_extrapolation()
        .build()
        .map_err(|e| anyhow::anyhow!("{}", e))
}

/// Gets the reference date from an optional string, defaulting to today.
fn get_reference_date(date_str: &Option<String>) -> Result<Date> {
    match date_str {
        Some(s) => crate::commands::parse_date(s).map_err(|e| anyhow::anyhow!("{}", e)),
        None => today().map_err(|e| anyhow::anyhow!("{}", e)),
    }
}
