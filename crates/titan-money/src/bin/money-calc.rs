//! # Money Calculator
//!
//! Small command-line front end for titan-money.
//!
//! ## Usage
//! ```bash
//! # Checked arithmetic on Money<Usd, 4, HalfEven>
//! cargo run -p titan-money --bin money-calc -- 10.01 '*' 1.1
//! cargo run -p titan-money --bin money-calc -- 3.10 + 1.40
//!
//! # Raw rounding engine
//! cargo run -p titan-money --bin money-calc -- round 1005 1 half_up
//!
//! # Custom config file, verbose logs
//! RUST_LOG=titan_money=debug cargo run -p titan-money --bin money-calc -- -c ./money.toml 1 / 3
//! ```
//!
//! ## Operators
//! - `+` / `-` take a second amount (text, parsed with the configured separator)
//! - `*` / `/` / `%` take a real scalar

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use titan_money::config::MoneyConfig;
use titan_money::{round_integer, Money, MoneyError, MoneyResult, RoundingMode, Usd};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Calculator profile: four decimal places, bankers rounding.
type Amount = Money<Usd, 4>;

fn print_help() {
    println!("Titan Money Calculator");
    println!();
    println!("Usage:");
    println!("  money-calc [OPTIONS] <AMOUNT> <OP> <OPERAND>");
    println!("  money-calc [OPTIONS] round <INTEGER> <PLACES> <MODE>");
    println!();
    println!("Operators:");
    println!("  +  -        OPERAND is an amount (e.g. 1.40)");
    println!("  *  /  %     OPERAND is a real scalar (e.g. 1.1)");
    println!();
    println!("Options:");
    println!("  -c, --config <PATH>  Config file (default: platform config dir/money.toml)");
    println!("  -h, --help           Show this help message");
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mut config_path: Option<PathBuf> = None;
    let mut positional: Vec<String> = Vec::new();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-c" | "--config" => match args.next() {
                Some(path) => config_path = Some(PathBuf::from(path)),
                None => {
                    eprintln!("--config needs a path");
                    return ExitCode::from(2);
                }
            },
            "-h" | "--help" => {
                print_help();
                return ExitCode::SUCCESS;
            }
            _ => positional.push(arg),
        }
    }

    let config = match MoneyConfig::load(config_path) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "configuration rejected");
            eprintln!("Error: {e}");
            return ExitCode::from(2);
        }
    };
    debug!(?config, "configuration loaded");

    let outcome = match positional.as_slice() {
        [cmd, x, places, mode] if cmd == "round" => run_round(x, places, mode),
        [lhs, op, rhs] => run_arithmetic(&config, lhs, op, rhs),
        _ => {
            print_help();
            return ExitCode::from(2);
        }
    };

    match outcome {
        Ok(line) => {
            println!("{line}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_round(x: &str, places: &str, mode: &str) -> MoneyResult<String> {
    let x: i64 = x
        .parse()
        .map_err(|_| MoneyError::Parse {
            input: x.to_string(),
            reason: "expected an integer".to_string(),
        })?;
    let places: u32 = places.parse().map_err(|_| MoneyError::Parse {
        input: places.to_string(),
        reason: "expected a decimal place count".to_string(),
    })?;
    let mode: RoundingMode = mode.parse()?;
    round_integer(x, places, mode).map(|rounded| rounded.to_string())
}

fn run_arithmetic(config: &MoneyConfig, lhs: &str, op: &str, rhs: &str) -> MoneyResult<String> {
    let separator = config.format.decimal_separator;
    let amount = Amount::parse_with_separator(lhs, separator)?;

    let result = match op {
        "+" => amount.checked_add(Amount::parse_with_separator(rhs, separator)?)?,
        "-" => amount.checked_sub(Amount::parse_with_separator(rhs, separator)?)?,
        "*" | "x" => amount.checked_mul_f64(parse_scalar(rhs)?)?,
        "/" => amount.checked_div_f64(parse_scalar(rhs)?)?,
        "%" => amount.checked_rem_f64(parse_scalar(rhs)?)?,
        other => {
            return Err(MoneyError::Parse {
                input: other.to_string(),
                reason: "unknown operator, expected one of + - * / %".to_string(),
            })
        }
    };

    config.format.render(&result)
}

fn parse_scalar(text: &str) -> MoneyResult<f64> {
    text.parse().map_err(|_| MoneyError::Parse {
        input: text.to_string(),
        reason: "expected a real number".to_string(),
    })
}
