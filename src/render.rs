//! # Render Module
//!
//! Runs the whole stdin-to-line pipeline behind a single error boundary. Any error or
//! panic raised while rendering is converted into the fallback line, so a caller always
//! gets exactly one line to print.

use anyhow::{Context, Result};
use std::panic::{self, AssertUnwindSafe};

use crate::cli::Args;
use crate::display::{build_json_fallback, build_json_output, compose_status_line, fallback_line};
use crate::models::HookJson;
use crate::style::Palette;
use crate::transcript::{scan_transcript_report, ScanReport};
use crate::utils::cwd_leaf;

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub context_limit: u64,
    pub tail_lines: usize,
    pub json: bool,
    pub palette: Palette,
}

impl RenderOptions {
    pub fn from_args(args: &Args) -> Self {
        Self {
            context_limit: args.context_limit,
            tail_lines: args.tail_lines,
            json: args.json,
            palette: Palette::from_env(args.no_color || args.json),
        }
    }
}

/// A successfully rendered line plus what went into it
#[derive(Debug, Clone)]
pub struct Rendered {
    pub line: String,
    pub transcript_path: Option<String>,
    pub scan: ScanReport,
}

/// What the binary prints, whether or not rendering succeeded
#[derive(Debug, Clone)]
pub struct Outcome {
    pub line: String,
    pub rendered: Option<Rendered>,
    /// Full message of the failure behind a fallback line
    pub error: Option<String>,
}

/// Render a status line from a raw stdin payload.
pub fn render(input: &[u8], opts: &RenderOptions) -> Result<Rendered> {
    let hook: HookJson = serde_json::from_slice(input).context("parse hook json")?;
    let transcript_path = hook.transcript_path.clone().filter(|p| !p.is_empty());
    let scan = scan_transcript_report(
        transcript_path.as_deref().unwrap_or(""),
        opts.context_limit,
        opts.tail_lines,
    );

    let line = if opts.json {
        serde_json::to_string(&build_json_output(
            &hook,
            scan.estimate.as_ref(),
            opts.context_limit,
        ))
        .context("serialize json output")?
    } else {
        compose_status_line(
            &hook,
            scan.estimate.as_ref(),
            opts.context_limit,
            &opts.palette,
        )
    };

    Ok(Rendered {
        line,
        transcript_path,
        scan,
    })
}

/// Run `pipeline`, replacing any error or panic with the fallback line.
pub fn render_guarded<F>(pipeline: F, opts: &RenderOptions) -> Outcome
where
    F: FnOnce() -> Result<Rendered>,
{
    let message = match panic::catch_unwind(AssertUnwindSafe(pipeline)) {
        Ok(Ok(rendered)) => {
            return Outcome {
                line: rendered.line.clone(),
                rendered: Some(rendered),
                error: None,
            };
        }
        // The excerpt should show the underlying cause, not our context label
        Ok(Err(e)) => e.root_cause().to_string(),
        Err(payload) => panic_message(payload.as_ref()),
    };
    Outcome {
        line: fallback(&message, opts),
        rendered: None,
        error: Some(message),
    }
}

fn fallback(message: &str, opts: &RenderOptions) -> String {
    let directory = cwd_leaf();
    if opts.json {
        build_json_fallback(&directory, message).to_string()
    } else {
        fallback_line(&directory, message, &opts.palette)
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic".to_string()
    }
}
