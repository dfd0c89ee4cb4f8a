//! Keypad Calc CLI
//!
//! ## Usage
//!
//! ```bash
//! keypad-calc press "12+3="          # Press keys, print both display lines
//! keypad-calc press --trace 1 + 2 =  # Show the display after every key
//! keypad-calc --format json repl     # One JSON object per input line
//! keypad-calc keypad                 # Show the keypad layout
//! ```

use std::io;
use std::process::ExitCode;

use clap::Parser;
use keypad_calc_cli::{
    logging, run_keypad, run_press, run_repl, Cli, CliConfig, CliResult, ColorChoice, Commands,
    OutputFormat, Verbosity,
};
use tracing::debug;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let config = build_config(&cli);
    logging::init(config.verbosity);
    debug!(?config, "configuration");

    let mut out = io::stdout().lock();
    match cli.command {
        Commands::Press(args) => run_press(&config, &args, &mut out),
        Commands::Repl(args) => run_repl(
            &config,
            &args,
            io::stdin().lock(),
            &mut out,
            &mut io::stderr(),
        ),
        Commands::Keypad => run_keypad(&config, &mut out),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let color: ColorChoice = cli.color.into();
    let format: OutputFormat = cli.format.into();

    CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(color)
        .with_format(format)
}
