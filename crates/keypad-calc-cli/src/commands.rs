//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Keypad Calc: a button-driven decimal calculator for the terminal
#[derive(Parser, Debug)]
#[command(name = "keypad-calc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (print only the current line)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Output format (text, json)
    #[arg(long, default_value = "text", global = true)]
    pub format: FormatArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Press a sequence of keys and print the display
    Press(PressArgs),

    /// Read key sequences from stdin, one line per entry
    Repl(ReplArgs),

    /// Print the keypad layout
    Keypad,
}

/// Arguments for the press command
#[derive(Args, Debug, Clone)]
pub struct PressArgs {
    /// Keys to press, e.g. `12+3=` or `1 2 + 3 =`
    ///
    /// Every argument after the first key is read as keys, so flags go
    /// before them: `keypad-calc -q press 5` rather than `keypad-calc press 5 -q`.
    #[arg(required = true, allow_hyphen_values = true)]
    pub keys: Vec<String>,

    /// Print the display after every key
    #[arg(long)]
    pub trace: bool,

    /// Print the calculation tape
    #[arg(long)]
    pub tape: bool,
}

/// Arguments for the repl command
#[derive(Args, Debug, Clone, Default)]
pub struct ReplArgs {
    /// Print the calculation tape at end of input
    #[arg(long)]
    pub tape: bool,
}

/// Color choice argument
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

/// Output format argument
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum FormatArg {
    /// Past line then current line
    #[default]
    Text,
    /// JSON object
    Json,
}

impl From<FormatArg> for crate::output::OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::config::ColorChoice;
    use crate::output::OutputFormat;

    #[test]
    fn test_parse_press_command() {
        let cli = Cli::parse_from(["keypad-calc", "press", "12+3="]);
        if let Commands::Press(args) = cli.command {
            assert_eq!(args.keys, vec!["12+3=".to_string()]);
            assert!(!args.trace);
            assert!(!args.tape);
        } else {
            panic!("expected Press command");
        }
    }

    #[test]
    fn test_parse_press_accepts_hyphen_keys() {
        let cli = Cli::parse_from(["keypad-calc", "press", "9", "-", "+/-", "<-"]);
        if let Commands::Press(args) = cli.command {
            assert_eq!(args.keys, ["9", "-", "+/-", "<-"]);
        } else {
            panic!("expected Press command");
        }
    }

    #[test]
    fn test_flag_after_keys_is_read_as_key_text() {
        let cli = Cli::parse_from(["keypad-calc", "press", "5", "-q"]);
        assert!(!cli.quiet);
        if let Commands::Press(args) = cli.command {
            assert_eq!(args.keys, ["5", "-q"]);
        } else {
            panic!("expected Press command");
        }
    }

    #[test]
    fn test_parse_press_flags() {
        let cli = Cli::parse_from(["keypad-calc", "press", "--trace", "--tape", "1+1="]);
        if let Commands::Press(args) = cli.command {
            assert!(args.trace);
            assert!(args.tape);
        } else {
            panic!("expected Press command");
        }
    }

    #[test]
    fn test_press_requires_keys() {
        assert!(Cli::try_parse_from(["keypad-calc", "press"]).is_err());
    }

    #[test]
    fn test_parse_repl_and_keypad() {
        let cli = Cli::parse_from(["keypad-calc", "repl", "--tape"]);
        assert!(matches!(cli.command, Commands::Repl(ReplArgs { tape: true })));
        let cli = Cli::parse_from(["keypad-calc", "keypad"]);
        assert!(matches!(cli.command, Commands::Keypad));
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from([
            "keypad-calc",
            "-vv",
            "--format",
            "json",
            "--color",
            "never",
            "keypad",
        ]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.format, FormatArg::Json));
        assert!(matches!(cli.color, ColorArg::Never));
    }

    #[test]
    fn test_quiet_flag_after_subcommand() {
        let cli = Cli::parse_from(["keypad-calc", "keypad", "-q"]);
        assert!(cli.quiet);
    }

    #[test]
    fn test_arg_conversions() {
        assert_eq!(ColorChoice::from(ColorArg::Always), ColorChoice::Always);
        assert_eq!(OutputFormat::from(FormatArg::Json), OutputFormat::Json);
        assert_eq!(OutputFormat::from(FormatArg::default()), OutputFormat::Text);
    }
}
