//! Keypad Calc CLI Library
//!
//! Terminal front end for the [`keypad_calc`] engine.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod logging;
mod output;
mod runner;

pub use commands::{Cli, ColorArg, Commands, FormatArg, PressArgs, ReplArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{render_keypad, OutputFormat, Report, TraceStep};
pub use runner::{run_keypad, run_press, run_repl};
