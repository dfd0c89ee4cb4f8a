//! Command execution

use std::io::{BufRead, Write};

use keypad_calc::driver::{CalculatorDriver, Session};
use keypad_calc::keypad::{parse_keys, Keypad};
use tracing::{debug, info, warn};

use crate::commands::{PressArgs, ReplArgs};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::{render_keypad, Report, TraceStep};

/// Lines that end a repl session
const QUIT_WORDS: [&str; 2] = ["quit", "exit"];

/// Presses the given keys on a fresh session and prints the display
pub fn run_press<W: Write>(config: &CliConfig, args: &PressArgs, out: &mut W) -> CliResult<()> {
    let buttons = parse_keys(&args.keys.join(" "))?;
    if buttons.is_empty() {
        return Err(CliError::invalid_argument("no keys to press"));
    }

    let mut session = Session::new();
    let mut steps = Vec::new();
    for button in &buttons {
        let lines = session.press(*button);
        if args.trace {
            steps.push(TraceStep::new(*button, &lines));
        }
    }
    info!(keys = buttons.len(), "key sequence complete");

    let mut report = Report::from_lines(&session.lines()).with_steps(steps);
    if args.tape {
        report = report.with_tape(session.history().iter().cloned().collect());
    }
    write_report(config, &report, out)
}

/// Reads key sequences line by line and prints the display after each.
///
/// The session carries over between lines. A line with an unknown key is
/// reported on `err` and skipped.
pub fn run_repl<R, W, E>(
    config: &CliConfig,
    args: &ReplArgs,
    input: R,
    out: &mut W,
    err: &mut E,
) -> CliResult<()>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut session = Session::new();
    for line in input.lines() {
        let line = line?;
        let keys = line.trim();
        if keys.is_empty() {
            continue;
        }
        if QUIT_WORDS.contains(&keys) {
            debug!("repl quit");
            break;
        }
        match session.press_all(keys) {
            Ok(lines) => write_report(config, &Report::from_lines(&lines), out)?,
            Err(e) => {
                warn!(input = keys, error = %e, "rejected key sequence");
                writeln!(err, "Error: {e}")?;
            }
        }
    }

    if args.tape {
        let report = Report::from_lines(&session.lines())
            .with_tape(session.history().iter().cloned().collect());
        write_report(config, &report, out)?;
    }
    Ok(())
}

/// Prints the keypad layout
pub fn run_keypad<W: Write>(config: &CliConfig, out: &mut W) -> CliResult<()> {
    writeln!(out, "{}", render_keypad(&Keypad::new(), config.format)?)?;
    Ok(())
}

fn write_report<W: Write>(config: &CliConfig, report: &Report, out: &mut W) -> CliResult<()> {
    let rendered = report.render(
        config.format,
        config.verbosity.is_quiet(),
        config.color.should_color(),
    )?;
    writeln!(out, "{rendered}")?;
    Ok(())
}
