use clap::builder::RangedU64ValueParser;
use clap::error::ErrorKind;

use crate::transcript::{DEFAULT_CONTEXT_LIMIT, DEFAULT_TAIL_LINES};

#[derive(clap::Parser, Debug, Clone)]
#[command(name = "context-statusline", version, about)]
pub struct Args {
    /// Context window size in tokens used for the usage estimate and bar
    #[arg(
        long,
        env = "CLAUDE_CONTEXT_LIMIT",
        default_value_t = DEFAULT_CONTEXT_LIMIT,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub context_limit: u64,

    /// Trailing transcript lines to inspect for usage or context warnings
    #[arg(
        long,
        env = "CLAUDE_TRANSCRIPT_TAIL_LINES",
        default_value_t = DEFAULT_TAIL_LINES,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub tail_lines: usize,

    /// Emit JSON instead of colored text
    #[arg(long)]
    pub json: bool,

    /// Disable ANSI colors (also honored via NO_COLOR)
    #[arg(long)]
    pub no_color: bool,

    /// Debug mode: print scan details to stderr
    #[arg(long, env = "CLAUDE_DEBUG")]
    pub debug: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            context_limit: DEFAULT_CONTEXT_LIMIT,
            tail_lines: DEFAULT_TAIL_LINES,
            json: false,
            no_color: false,
            debug: false,
        }
    }
}

impl Args {
    /// Parse arguments without ever exiting on bad input: the status line must still
    /// render, so invalid flags fall back to defaults and the error is returned for
    /// debug output. `--help` and `--version` still print and exit.
    pub fn parse_lenient() -> (Self, Option<String>) {
        Self::parse_lenient_from(std::env::args_os())
    }

    pub fn parse_lenient_from<I, T>(itr: I) -> (Self, Option<String>)
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        match <Args as clap::Parser>::try_parse_from(itr) {
            Ok(args) => (args, None),
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                e.exit()
            }
            Err(e) => {
                let msg = e.to_string();
                let first = msg.lines().next().unwrap_or_default().to_string();
                (Args::default(), Some(first))
            }
        }
    }
}
