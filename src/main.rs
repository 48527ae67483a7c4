use std::fs;
use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use double_eval::{EvaluationError, Evaluator, EvaluatorConfig, InverseTrigInput};
use log::{debug, info};
use miette::IntoDiagnostic;
use miette::WrapErr;

/// Exit status when a file contains an expression that does not evaluate.
const DATA_ERROR: i32 = 65;

#[derive(Parser, Debug)]
#[command(about = "Evaluate arithmetic expressions")]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Define a variable, e.g. `-v x=2.5`. May be repeated.
    #[arg(short = 'v', long = "var", global = true, value_parser = parse_variable)]
    variables: Vec<(String, f64)>,

    /// Treat the argument of asin/acos/atan as a ratio instead of degrees.
    #[arg(long, global = true)]
    ratio_inverse_trig: bool,

    /// Deepest nesting of parentheses, unary operators and exponents.
    #[arg(long, global = true, default_value_t = EvaluatorConfig::DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Evaluate a single expression.
    Eval { expression: String },
    /// Evaluate every line of a file; blank lines and `#` comments are skipped.
    File { filename: PathBuf },
}

fn parse_variable(s: &str) -> Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected `name=value`, got `{s}`"))?;
    let name = name.trim();
    if !name.starts_with(char::is_alphabetic) || !name.chars().all(char::is_alphanumeric) {
        return Err(format!("`{name}` is not a valid variable name"));
    }
    let value = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid value for `{name}`: {e}"))?;
    Ok((name.to_string(), value))
}

/// The lines of a file worth evaluating, with their 1-based line numbers.
fn expressions(contents: &str) -> impl Iterator<Item = (usize, &str)> {
    contents
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

impl Args {
    fn config(&self) -> EvaluatorConfig {
        let inverse_trig = if self.ratio_inverse_trig {
            InverseTrigInput::Ratio
        } else {
            InverseTrigInput::Degrees
        };
        EvaluatorConfig::default()
            .with_max_depth(self.max_depth)
            .with_inverse_trig(inverse_trig)
    }

    fn evaluator(&self, expression: &str) -> Evaluator {
        let mut evaluator = Evaluator::with_config(expression, self.config());
        evaluator.register_variables(self.variables.iter().cloned());
        debug!("{} name(s) defined", evaluator.variables().count());
        evaluator
    }

    /// Evaluates every expression in `contents`, stopping at the first one
    /// that fails and returning its line number with the error.
    fn evaluate_lines<'a>(
        &self,
        source: &str,
        contents: &'a str,
    ) -> Result<Vec<(&'a str, f64)>, (usize, EvaluationError)> {
        expressions(contents)
            .map(|(line_number, expression)| {
                self.evaluator(expression)
                    .with_name(format!("{source}:{line_number}"))
                    .eval()
                    .map(|value| (expression, value))
                    .map_err(|e| (line_number, e))
            })
            .collect()
    }
}

fn main() -> miette::Result<()> {
    pretty_env_logger::init();
    let args = Args::parse();

    match &args.command {
        Commands::Eval { expression } => {
            let value = args.evaluator(expression).eval()?;
            println!("{value}");
        }
        Commands::File { filename } => {
            let file_contents = fs::read_to_string(filename)
                .into_diagnostic()
                .wrap_err_with(|| format!("reading `{}` failed", filename.display()))?;

            match args.evaluate_lines(&filename.display().to_string(), &file_contents) {
                Ok(results) => {
                    for (expression, value) in &results {
                        println!("{expression}: {value}");
                    }
                    info!("evaluated {} expression(s) from {}", results.len(), filename.display());
                }
                Err((line_number, e)) => {
                    eprintln!("[line {line_number}] Error: {e}");
                    eprintln!("{:?}", miette::Report::new(e));
                    std::process::exit(DATA_ERROR);
                }
            }
        }
    }
    Ok(())
}
