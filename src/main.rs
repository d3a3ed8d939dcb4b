use anyhow::Context;
#[cfg(feature = "colors")]
use owo_colors::OwoColorize;

use context_statusline::cli::Args;
use context_statusline::render::{render, render_guarded, Outcome, RenderOptions};
use context_statusline::utils::read_stdin;

fn main() {
    // Panics are reported through the fallback line, never on stderr
    std::panic::set_hook(Box::new(|_| {}));

    let (args, args_error) = Args::parse_lenient();
    let opts = RenderOptions::from_args(&args);
    let outcome = render_guarded(
        || {
            let stdin = read_stdin().context("read stdin")?;
            render(&stdin, &opts)
        },
        &opts,
    );
    println!("{}", outcome.line);

    if args.debug {
        print_debug(&args, &opts, &outcome, args_error.as_deref());
    }
}

fn print_debug(args: &Args, opts: &RenderOptions, outcome: &Outcome, args_error: Option<&str>) {
    let rule = |s: &str| -> String {
        #[cfg(feature = "colors")]
        {
            if opts.palette.enabled() {
                return s.bright_black().to_string();
            }
        }
        s.to_string()
    };
    eprintln!();
    eprintln!("{}", rule("=== Debug Information ==="));
    if let Some(e) = args_error {
        eprintln!("Args: invalid ({e}); using defaults");
    }
    eprintln!(
        "Limit: {} tokens, tail: {} lines, json: {}",
        opts.context_limit, opts.tail_lines, args.json
    );
    match &outcome.rendered {
        Some(r) => {
            eprintln!(
                "Transcript: {}",
                r.transcript_path.as_deref().unwrap_or("(none)")
            );
            eprintln!(
                "Scanned: {} lines ({} skipped, {} bytes read)",
                r.scan.lines_scanned, r.scan.lines_skipped, r.scan.bytes_read
            );
            match r.scan.estimate {
                Some(ctx) => eprintln!(
                    "Context: {:.1}% (tokens: {}, source: {}, warning: {})",
                    ctx.percent,
                    ctx.tokens
                        .map(|t| t.to_string())
                        .unwrap_or_else(|| "n/a".to_string()),
                    ctx.source.as_str(),
                    ctx.warning.map(|w| w.as_str()).unwrap_or("none")
                ),
                None => eprintln!("Context: no estimate"),
            }
        }
        None => eprintln!(
            "Fallback: {}",
            outcome.error.as_deref().unwrap_or("unknown error")
        ),
    }
    eprintln!("{}", rule("========================"));
}
