use std::process::ExitCode;

use boolcalc::{Error, Evaluator};
use clap::Parser;
use itertools::Itertools;
use tracing_subscriber::{fmt, EnvFilter};

/// Truth tables above this many variables are refused.
const MAX_TABLE_LOCALS: usize = 16;

#[derive(Parser, Debug)]
#[command(name = "boolcalc")]
#[command(about = "Compile and evaluate boolean mask expressions", long_about = None)]
struct Args {
    /// Mask expression, e.g. "(#1 || #2) && !#3"
    expression: String,

    /// Values for #1, #2, ... separated by commas (1/0/true/false)
    #[arg(long, value_delimiter = ',', value_parser = parse_bool)]
    inputs: Option<Vec<bool>>,

    /// Print the result for every assignment of the variables
    #[arg(long)]
    table: bool,

    /// Fail unless the expression uses exactly the variables #1..#N
    #[arg(long, value_name = "N")]
    expect: Option<usize>,
}

fn parse_bool(s: &str) -> Result<bool, String> {
    match s.trim() {
        "1" | "true" | "t" => Ok(true),
        "0" | "false" | "f" => Ok(false),
        other => Err(format!("'{}' is not a boolean", other)),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<bool, Error> {
    let mut calc = Evaluator::with_expression(&args.expression)?;
    print!("{}", calc.dump_program());
    println!("max_local = {}", calc.max_local());
    println!("max_depth = {}", calc.max_depth());
    println!("has_union = {}", calc.has_union());

    if let Some(n) = args.expect {
        if !calc.check_args(n) {
            eprintln!(
                "error: expression must use each of the variables #1..#{} and no others",
                n
            );
            return Ok(false);
        }
    }

    if let Some(inputs) = args.inputs {
        println!("{}", calc.run(&inputs)?);
    }

    if args.table {
        let n = calc.max_local();
        if n > MAX_TABLE_LOCALS {
            eprintln!(
                "error: refusing to print a truth table for {} variables (max {})",
                n, MAX_TABLE_LOCALS
            );
            return Ok(false);
        }
        if n == 0 {
            println!("=> {}", calc.run(&[])?);
            return Ok(true);
        }
        println!("{} | result", (1..=n).map(|i| format!("#{}", i)).join(" "));
        for inputs in (0..n).map(|_| [false, true]).multi_cartesian_product() {
            let result = calc.run(&inputs)?;
            println!(
                "{} | {}",
                inputs.iter().map(|&v| u8::from(v)).join("  "),
                u8::from(result)
            );
        }
    }
    Ok(true)
}
