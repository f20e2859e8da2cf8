//! Pricing CLI
//!
//! Evaluates payable amounts and installment splits from the command line.
//!
//! Usage:
//!   pricectl payable <amount> [currency]
//!   pricectl round <amount> <mode> <precision> [currency]
//!   pricectl split <amount> <count> [currency]

use std::process::ExitCode;
use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::{debug, error};

use pricing_core::price::{Price, RoundingMode};
use pricing_shared::{AppConfig, AppError, AppResult, telemetry};

const USAGE: &str = "usage: pricectl payable <amount> [currency]
       pricectl round <amount> <mode> <precision> [currency]
       pricectl split <amount> <count> [currency]";

/// Upper bound for `split`; every part is printed on its own line.
const MAX_SPLIT_PARTS: usize = 10_000;

/// A parsed command line.
#[derive(Debug, PartialEq)]
enum Command {
    Payable(Price),
    Round {
        price: Price,
        mode: RoundingMode,
        precision: u32,
    },
    Split {
        price: Price,
        count: usize,
    },
}

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            let err = AppError::from(err);
            eprintln!("{err}");
            return exit_code(&err);
        }
    };

    if let Err(err) = telemetry::init(&config.logging) {
        eprintln!("Failed to initialise logging: {err}");
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args, &config) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(code = err.error_code(), "{err}");
            if matches!(err, AppError::Validation(_)) {
                eprintln!("{USAGE}");
            }
            exit_code(&err)
        }
    }
}

fn exit_code(err: &AppError) -> ExitCode {
    ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1))
}

fn run(args: &[String], config: &AppConfig) -> AppResult<Vec<String>> {
    let command = parse_command(args, &config.pricing.default_currency)?;
    debug!(?command, "Executing command");
    execute(command)
}

fn parse_command(args: &[String], default_currency: &str) -> AppResult<Command> {
    let (name, rest) = args
        .split_first()
        .ok_or_else(|| AppError::Validation("missing command".to_string()))?;

    match (name.as_str(), rest) {
        ("payable", [amount, currency @ ..]) if currency.len() <= 1 => Ok(Command::Payable(
            parse_price(amount, currency.first().map_or(default_currency, String::as_str))?,
        )),
        ("round", [amount, mode, precision, currency @ ..]) if currency.len() <= 1 => {
            Ok(Command::Round {
                price: parse_price(
                    amount,
                    currency.first().map_or(default_currency, String::as_str),
                )?,
                mode: RoundingMode::from_str(mode).map_err(AppError::Validation)?,
                precision: precision.parse().map_err(|_| {
                    AppError::Validation(format!("invalid precision: {precision}"))
                })?,
            })
        }
        ("split", [amount, count, currency @ ..]) if currency.len() <= 1 => Ok(Command::Split {
            price: parse_price(amount, currency.first().map_or(default_currency, String::as_str))?,
            count: parse_split_count(count)?,
        }),
        _ => Err(AppError::Validation(format!(
            "unknown command or wrong arguments: {}",
            args.join(" ")
        ))),
    }
}

fn parse_split_count(count: &str) -> AppResult<usize> {
    let parsed: usize = count
        .parse()
        .map_err(|_| AppError::Validation(format!("invalid count: {count}")))?;
    if parsed > MAX_SPLIT_PARTS {
        return Err(AppError::Validation(format!(
            "count {parsed} exceeds the maximum of {MAX_SPLIT_PARTS} parts"
        )));
    }
    Ok(parsed)
}

fn parse_price(amount: &str, currency: &str) -> AppResult<Price> {
    let amount = Decimal::from_str(amount)
        .map_err(|err| AppError::Validation(format!("invalid amount {amount}: {err}")))?;
    Ok(Price::from_decimal(amount, currency))
}

fn execute(command: Command) -> AppResult<Vec<String>> {
    match command {
        Command::Payable(price) => Ok(vec![price.get_payable().to_string()]),
        Command::Round {
            price,
            mode,
            precision,
        } => {
            let rounded = price.payable_by_rounding_mode_checked(mode, precision);
            if rounded.overflowed {
                return Err(AppError::Validation(format!(
                    "{price} cannot be rounded to {precision} minor units"
                )));
            }
            Ok(vec![rounded.price.to_string()])
        }
        Command::Split { price, count } => Ok(price
            .split_in_payables(count)?
            .iter()
            .map(ToString::to_string)
            .collect()),
    }
}
