//! CDS command implementation.
//!
//! Prices a CDS, computes its par spread, and converts between running
//! spread and upfront points.

use anyhow::Result;
use clap::{Args, Subcommand};

use cds_core::calendars::{BusinessDayConvention, WeekendCalendar};
use cds_core::daycounts::DayCountConvention;
use cds_core::schedule::generate_schedule;
use cds_core::types::{Date, Frequency, StubMethod};
use cds_credit::conversion::ConversionConventions;
use cds_credit::{par_spread, price_cds, spread_to_upfront, upfront_to_spread, CdsQuote, CreditCurveBuilder};
use cds_curves::bootstrap::{build_discount_curve as bootstrap_discount_curve, ZeroCurveConventions};

use crate::cli::OutputFormat;
use crate::commands::{
    parse_date, parse_zero_curve_instruments, resolve_calendar, today, validate_recovery,
    validate_spread_bps,
};
use crate::output::{print_header, KeyValue};

/// Arguments for the cds command.
#[derive(Args, Debug)]
pub struct CdsArgs {
    #[command(subcommand)]
    pub command: CdsCommand,
}

/// CDS subcommands.
#[derive(Subcommand, Debug)]
pub enum CdsCommand {
    /// Price a CDS at a given running coupon
    Price(PriceArgs),

    /// Compute the break-even (par) running spread for a CDS
    ParSpread(ParSpreadArgs),

    /// Convert between a quoted running spread and upfront points
    Convert(ConvertArgs),
}

/// Shared deal parameters for pricing and par-spread commands.
#[derive(Args, Debug)]
pub struct DealArgs {
    /// Reference (valuation) date (YYYY-MM-DD). Defaults to today.
    #[arg(short, long)]
    pub reference_date: Option<String>,

    /// CDS maturity date (YYYY-MM-DD)
    #[arg(short, long)]
    pub maturity: String,

    /// Discount curve instrument list: comma-separated `LETTER:DATE:RATE`
    /// entries (see `curve build --instruments`)
    #[arg(long)]
    pub discount_instruments: String,

    /// Holiday calendar name
    #[arg(long, default_value = "weekend")]
    pub calendar: String,

    /// Par CDS quote maturities used to bootstrap the credit curve
    /// (comma-separated, YYYY-MM-DD)
    #[arg(long)]
    pub quote_tenors: String,

    /// Par CDS quote spreads, in basis points (comma-separated)
    #[arg(long)]
    pub quote_spreads: String,

    /// Recovery rate assumption, in [0, 1)
    #[arg(long, default_value = "0.40")]
    pub recovery: f64,

    /// Whether accrued premium is paid on default
    #[arg(long, default_value = "true")]
    pub pay_accrued_on_default: bool,
}

/// Arguments for pricing a CDS.
#[derive(Args, Debug)]
pub struct PriceArgs {
    #[command(flatten)]
    pub deal: DealArgs,

    /// Contractual running coupon, in basis points
    #[arg(short, long)]
    pub coupon: f64,
}

/// Arguments for computing a par spread.
#[derive(Args, Debug)]
pub struct ParSpreadArgs {
    #[command(flatten)]
    pub deal: DealArgs,
}

/// Arguments for converting between spread and upfront.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Reference (valuation) date (YYYY-MM-DD). Defaults to today.
    #[arg(short, long)]
    pub reference_date: Option<String>,

    /// CDS maturity date (YYYY-MM-DD)
    #[arg(short, long)]
    pub maturity: String,

    /// Contractual running coupon, in basis points
    #[arg(short, long)]
    pub coupon: f64,

    /// Quoted running spread, in basis points. Mutually exclusive with
    /// `--upfront`.
    #[arg(long)]
    pub spread: Option<f64>,

    /// Quoted upfront points, as a fraction of notional (e.g. `0.02` for
    /// 2 points). Mutually exclusive with `--spread`.
    #[arg(long)]
    pub upfront: Option<f64>,

    /// Discount curve instrument list: comma-separated `LETTER:DATE:RATE`
    /// entries (see `curve build --instruments`)
    #[arg(long)]
    pub discount_instruments: String,

    /// Holiday calendar name
    #[arg(long, default_value = "weekend")]
    pub calendar: String,

    /// Recovery rate assumption, in [0, 1)
    #[arg(long, default_value = "0.40")]
    pub recovery: f64,
}

/// Executes the cds command.
pub fn execute(args: CdsArgs, format: OutputFormat) -> Result<()> {
    match args.command {
        CdsCommand::Price(price_args) => execute_price(price_args, format),
        CdsCommand::ParSpread(par_spread_args) => execute_par_spread(par_spread_args, format),
        CdsCommand::Convert(convert_args) => execute_convert(convert_args, format),
    }
}

fn get_reference_date(date_str: &Option<String>) -> Result<Date> {
    match date_str {
        Some(s) => parse_date(s).map_err(|e| anyhow::anyhow!("{}", e)),
        None => today().map_err(|e| anyhow::anyhow!("{}", e)),
    }
}

fn build_discount_curve(
    reference_date: Date,
    instruments_str: &str,
    calendar: &WeekendCalendar,
) -> Result<cds_curves::curves::DiscountCurve> {
    let instruments = parse_zero_curve_instruments(instruments_str)?;
    bootstrap_discount_curve(
        reference_date,
        &instruments,
        calendar,
        ZeroCurveConventions::default(),
    )
    .map_err(|e| anyhow::anyhow!("{}", e))
}

fn bootstrap_credit_curve<'a>(
    deal: &DealArgs,
    reference_date: Date,
    discount_curve: &'a cds_curves::curves::DiscountCurve,
    calendar: &'a WeekendCalendar,
) -> Result<cds_curves::wrappers::CreditCurve<cds_curves::curves::DiscreteCurve>> {
    let maturities = crate::commands::parse_dates(&deal.quote_tenors)?;
    let spreads = crate::commands::parse_spreads_bps(&deal.quote_spreads)?;
    if maturities.len() != spreads.len() {
        return Err(anyhow::anyhow!(
            "Number of quote tenors ({}) must match number of quote spreads ({})",
            maturities.len(),
            spreads.len()
        ));
    }
    let recovery = validate_recovery(deal.recovery)?;

    let mut builder = CreditCurveBuilder::new(
        reference_date,
        reference_date,
        reference_date,
        discount_curve,
        calendar,
        recovery,
    )
    .pay_accrued_on_default(deal.pay_accrued_on_default);
    for (maturity, spread) in maturities.iter().zip(spreads.iter()) {
        builder = builder.with_quote(CdsQuote::new(*maturity, *spread));
    }

    builder.build().map_err(|e| anyhow::anyhow!("{}", e))
}

fn execute_price(args: PriceArgs, format: OutputFormat) -> Result<()> {
    let deal = &args.deal;
    let reference_date = get_reference_date(&deal.reference_date)?;
    let maturity = parse_date(&deal.maturity).map_err(|e| anyhow::anyhow!("{}", e))?;
    let coupon = validate_spread_bps(args.coupon)? / 10_000.0;

    let calendar = resolve_calendar(&deal.calendar)?;
    let discount_curve = build_discount_curve(reference_date, &deal.discount_instruments, &calendar)?;
    let credit_curve = bootstrap_credit_curve(deal, reference_date, &discount_curve, &calendar)?;

    let dcc = DayCountConvention::Act360.to_day_count();
    let schedule = generate_schedule(
        reference_date,
        maturity,
        Frequency::Quarterly,
        StubMethod::ShortBack,
        &calendar,
        BusinessDayConvention::ModifiedFollowing,
        dcc.as_ref(),
    )
    .map_err(|e| anyhow::anyhow!("{}", e))?;

    let result = price_cds(
        coupon,
        reference_date,
        reference_date,
        &schedule,
        &discount_curve,
        &credit_curve,
        dcc.as_ref(),
        deal.pay_accrued_on_default,
    )
    .map_err(|e| anyhow::anyhow!("{}", e))?;

    let rows = vec![
        KeyValue::from_f64("Protection Leg PV", result.protection_pv, 8),
        KeyValue::from_f64("Premium Leg PV", result.premium_pv, 8),
        KeyValue::from_f64("Dirty Price", result.dirty_price, 8),
        KeyValue::from_f64("Accrued", result.accrued, 8),
        KeyValue::from_f64("Clean Price", result.clean_price, 8),
        KeyValue::from_bps("Par Spread", result.par_spread),
    ];

    output_rows(&rows, "CDS Price", format)
}

fn execute_par_spread(args: ParSpreadArgs, format: OutputFormat) -> Result<()> {
    let deal = &args.deal;
    let reference_date = get_reference_date(&deal.reference_date)?;
    let maturity = parse_date(&deal.maturity).map_err(|e| anyhow::anyhow!("{}", e))?;

    let calendar = resolve_calendar(&deal.calendar)?;
    let discount_curve = build_discount_curve(reference_date, &deal.discount_instruments, &calendar)?;
    let credit_curve = bootstrap_credit_curve(deal, reference_date, &discount_curve, &calendar)?;

    let dcc = DayCountConvention::Act360.to_day_count();
    let schedule = generate_schedule(
        reference_date,
        maturity,
        Frequency::Quarterly,
        StubMethod::ShortBack,
        &calendar,
        BusinessDayConvention::ModifiedFollowing,
        dcc.as_ref(),
    )
    .map_err(|e| anyhow::anyhow!("{}", e))?;

    let spread = par_spread(
        reference_date,
        reference_date,
        maturity,
        &schedule,
        &discount_curve,
        &credit_curve,
        deal.pay_accrued_on_default,
    )
    .map_err(|e| anyhow::anyhow!("{}", e))?;

    let rows = vec![KeyValue::from_bps("Par Spread", spread)];
    output_rows(&rows, "Par Spread", format)
}

fn execute_convert(args: ConvertArgs, format: OutputFormat) -> Result<()> {
    let reference_date = get_reference_date(&args.reference_date)?;
    let maturity = parse_date(&args.maturity).map_err(|e| anyhow::anyhow!("{}", e))?;
    let coupon = validate_spread_bps(args.coupon)? / 10_000.0;
    let recovery = validate_recovery(args.recovery)?;

    let calendar = resolve_calendar(&args.calendar)?;
    let discount_curve = build_discount_curve(reference_date, &args.discount_instruments, &calendar)?;
    let conventions = ConversionConventions::default();

    let result = match (args.spread, args.upfront) {
        (Some(spread_bps), None) => {
            let spread = validate_spread_bps(spread_bps)? / 10_000.0;
            spread_to_upfront(
                coupon,
                spread,
                reference_date,
                reference_date,
                reference_date,
                maturity,
                &discount_curve,
                recovery,
                &calendar,
                conventions,
            )
            .map_err(|e| anyhow::anyhow!("{}", e))?
        }
        (None, Some(upfront)) => upfront_to_spread(
            coupon,
            upfront,
            reference_date,
            reference_date,
            reference_date,
            maturity,
            &discount_curve,
            recovery,
            &calendar,
            conventions,
        )
        .map_err(|e| anyhow::anyhow!("{}", e))?,
        _ => {
            return Err(anyhow::anyhow!(
                "Exactly one of --spread or --upfront must be provided"
            ))
        }
    };

    let rows = vec![
        KeyValue::from_f64("Upfront (points)", result.upfront, 6),
        KeyValue::from_bps("Par Spread", result.par_spread),
        KeyValue::from_bps("Flat Hazard Rate", result.flat_hazard_rate),
        KeyValue::from_f64("Clean Price", result.clean_price, 6),
        KeyValue::from_f64("Accrued", result.accrued, 6),
    ];

    output_rows(&rows, "Spread/Upfront Conversion", format)
}

fn output_rows(rows: &[KeyValue], title: &str, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            print_header(title);
            crate::output::print_output(rows, format)?;
        }
        OutputFormat::Json => {
            let output: std::collections::HashMap<String, String> = rows
                .iter()
                .map(|r| (r.key.clone(), r.value.clone()))
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Csv | OutputFormat::Minimal => {
            crate::output::print_output(rows, format)?;
        }
    }
    Ok(())
}
