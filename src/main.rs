use clap::{Parser as ClapParser, Subcommand};
use statscript::cli::{self, CliError, EvalOptions, EvalResult, NumericMode};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "statscript")]
#[command(about = "statscript - compile and evaluate compound stat formulas")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a formula and evaluate it against a stat set
    Eval {
        /// The formula to compile, e.g. "(add 35 (mul *strength 3))"
        formula: String,

        /// JSON object of stat name -> value (reads from stdin if not provided)
        #[arg(short, long)]
        stats: Option<String>,

        /// Numeric backing to evaluate with
        #[arg(long, value_enum, default_value = "float")]
        mode: NumericMode,

        /// Only validate syntax, don't evaluate
        #[arg(long)]
        syntax_only: bool,
    },

    /// Print the token stream of a formula
    Scan {
        /// The formula to scan
        formula: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Eval {
            formula,
            stats,
            mode,
            syntax_only,
        } => run_eval(formula, stats, mode, syntax_only),
        Commands::Scan { formula } => run_scan(&formula),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_eval(
    formula: String,
    stats: Option<String>,
    mode: NumericMode,
    syntax_only: bool,
) -> Result<(), CliError> {
    let stats = match stats {
        Some(s) => Some(s),
        None if !syntax_only && !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(CliError::Io)?;
            Some(buffer)
        }
        None => None,
    };

    let options = EvalOptions {
        formula,
        stats,
        mode,
        syntax_only,
    };

    match cli::execute_eval(&options)? {
        EvalResult::SyntaxValid => println!("Syntax is valid"),
        EvalResult::Value(output) => println!("{}", output),
    }
    Ok(())
}

fn run_scan(formula: &str) -> Result<(), CliError> {
    for token in cli::execute_scan(formula)? {
        println!("{:>4}  {}", token.offset, token.kind);
    }
    Ok(())
}
