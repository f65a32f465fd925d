use std::sync::Arc;

use clap::{Args, Parser, Subcommand};

use crate::api::{self, SharedStore};
use crate::config::AppConfig;
use crate::core::{DEFAULT_TERMS, LoanTerms, quote};
use crate::error::AppError;
use crate::store::InMemoryStore;
use crate::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "loandesk",
    about = "Serve the loan brokerage site or print an amortization quote",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP site (default command)
    Serve(ServeArgs),
    /// Compute one amortization quote and print it
    Quote(QuoteArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured bind host
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct QuoteArgs {
    /// Loan principal in rupees
    #[arg(long, default_value_t = DEFAULT_TERMS.principal)]
    amount: f64,
    /// Nominal annual interest rate in percent
    #[arg(long, default_value_t = DEFAULT_TERMS.annual_rate_percent)]
    rate: f64,
    /// Repayment term in months
    #[arg(long, default_value_t = DEFAULT_TERMS.term_months)]
    tenure: u32,
    /// Emit the quote as JSON instead of a table
    #[arg(long)]
    json: bool,
}

pub async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    match cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()))
    {
        Command::Serve(args) => serve(args).await,
        Command::Quote(args) => print_quote(args),
    }
}

async fn serve(args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let store: SharedStore = Arc::new(InMemoryStore::default());
    api::serve(&config, store).await
}

fn print_quote(args: QuoteArgs) -> Result<(), AppError> {
    let result = quote(LoanTerms {
        principal: args.amount,
        annual_rate_percent: args.rate,
        term_months: args.tenure,
    })?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("Monthly payment  {}", format_inr(result.monthly_payment));
        println!("Total payment    {}", format_inr(result.total_payment));
        println!("Total interest   {}", format_inr(result.total_interest));
    }
    Ok(())
}

/// Whole-rupee display figure with lakh/crore digit grouping. Rounding here
/// is presentation only; computed values stay unrounded.
fn format_inr(amount: f64) -> String {
    let negative = amount < 0.0;
    // out-of-range casts saturate
    let rounded = amount.abs().round() as u64;
    let digits = rounded.to_string();
    let (head, tail) = digits.split_at(digits.len().saturating_sub(3));

    let mut groups = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (next, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = next;
    }
    if !rest.is_empty() {
        groups.push(rest);
    }

    let mut out = String::from(if negative { "-₹" } else { "₹" });
    for group in groups.iter().rev() {
        out.push_str(group);
        out.push(',');
    }
    out.push_str(tail);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_amounts_have_no_grouping() {
        assert_eq!(format_inr(0.0), "₹0");
        assert_eq!(format_inr(499.4), "₹499");
        assert_eq!(format_inr(8_791.588), "₹8,792");
    }

    #[test]
    fn grouping_follows_lakh_and_crore_boundaries() {
        assert_eq!(format_inr(105_499.06), "₹1,05,499");
        assert_eq!(format_inr(10_000_000.0), "₹1,00,00,000");
        assert_eq!(format_inr(2_082_775.76), "₹20,82,776");
    }

    #[test]
    fn negative_amounts_keep_the_sign_outside() {
        assert_eq!(format_inr(-5_499.0), "-₹5,499");
    }
}
