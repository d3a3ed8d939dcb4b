use serde_json::json;

use crate::models::{ContextEstimate, HookCost, HookJson, HookWorkspace};
use crate::style::{Palette, Tone};
use crate::utils::{
    format_cost, format_duration, format_net_lines, format_tokens, path_leaf, strip_dir_prefix,
    truncate_chars,
};

pub const BAR_SEGMENTS: u64 = 10;
const FILLED_GLYPH: &str = "◉";
const EMPTY_GLYPH: &str = "○";

/// Characters of an error message shown by the fallback line
pub const ERROR_EXCERPT_CHARS: usize = 20;

/// Color and alert label for a context usage percentage.
pub fn context_tier(percent: f64) -> (Tone, Option<&'static str>) {
    if percent >= 95.0 {
        (Tone::Critical, Some("CRIT"))
    } else if percent >= 90.0 {
        (Tone::Red, Some("HIGH"))
    } else if percent >= 75.0 {
        (Tone::LightRed, None)
    } else if percent >= 50.0 {
        (Tone::Yellow, None)
    } else {
        (Tone::Cyan, None)
    }
}

/// Alert label for an estimate; a host warning beats the percentage tier.
pub fn context_alert(ctx: &ContextEstimate) -> Option<&'static str> {
    match ctx.warning {
        Some(w) => Some(w.alert_label()),
        None => context_tier(ctx.percent).1,
    }
}

/// Segments lit for `tokens` out of `context_limit`; any partial segment counts.
pub fn filled_segments(tokens: u64, context_limit: u64) -> u64 {
    if context_limit == 0 {
        return if tokens > 0 { BAR_SEGMENTS } else { 0 };
    }
    let per_segment = context_limit as f64 / BAR_SEGMENTS as f64;
    let ratio = tokens as f64 / per_segment;
    let mut filled = ratio.floor() as u64;
    if tokens as f64 % per_segment > 0.0 {
        filled += 1;
    }
    filled.min(BAR_SEGMENTS)
}

pub fn context_bar(filled: u64) -> String {
    (0..BAR_SEGMENTS)
        .map(|i| if i < filled { FILLED_GLYPH } else { EMPTY_GLYPH })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Context segment, e.g. `◉ ◉ ○ ○ ○ ○ ○ ○ ○ ○  34k/200k`. Empty without an estimate.
pub fn format_context(
    context: Option<&ContextEstimate>,
    context_limit: u64,
    palette: &Palette,
) -> String {
    let Some(ctx) = context else {
        return String::new();
    };
    let (tone, _) = context_tier(ctx.percent);
    // Warning-derived estimates carry no token count
    let tokens = ctx.tokens.unwrap_or(0);
    let bar = context_bar(filled_segments(tokens, context_limit));
    let mut out = format!(
        "{}  {}/{}",
        palette.paint(tone, &bar),
        format_tokens(tokens),
        format_tokens(context_limit)
    );
    if let Some(alert) = context_alert(ctx) {
        out.push(' ');
        out.push_str(alert);
    }
    out
}

/// Directory label relative to the project when possible. Never empty.
pub fn directory_display(workspace: Option<&HookWorkspace>) -> String {
    let non_empty =
        |s: &Option<String>| s.as_deref().filter(|v| !v.is_empty()).map(str::to_owned);
    let current = workspace.and_then(|w| non_empty(&w.current_dir));
    let project = workspace.and_then(|w| non_empty(&w.project_dir));
    match (current, project) {
        (Some(cur), Some(proj)) => match strip_dir_prefix(&cur, &proj) {
            Some("") => path_leaf(&proj),
            Some(rel) => rel.to_string(),
            None => path_leaf(&cur),
        },
        (None, Some(proj)) => path_leaf(&proj),
        (Some(cur), None) => path_leaf(&cur),
        (None, None) => "unknown".to_string(),
    }
}

pub fn cost_tone(usd: f64) -> Tone {
    if usd >= 5.0 {
        Tone::Red
    } else if usd >= 1.0 {
        Tone::Yellow
    } else {
        Tone::Green
    }
}

pub fn duration_tone(ms: u64) -> Tone {
    if ms as f64 / 60_000.0 >= 30.0 {
        Tone::Yellow
    } else {
        Tone::Gray
    }
}

pub fn lines_tone(net: i64) -> Tone {
    match net.signum() {
        1 => Tone::Green,
        -1 => Tone::Red,
        _ => Tone::Yellow,
    }
}

/// Net line change, or `None` when nothing was added or removed.
pub fn net_lines(cost: &HookCost) -> Option<i64> {
    let added = cost.total_lines_added.unwrap_or(0);
    let removed = cost.total_lines_removed.unwrap_or(0);
    if added != 0 || removed != 0 {
        Some(added.saturating_sub(removed))
    } else {
        None
    }
}

/// Cost, duration and line-delta segments with a leading divider, or "" when none apply.
pub fn format_session_metrics(cost: Option<&HookCost>, palette: &Palette) -> String {
    let Some(cost) = cost else {
        return String::new();
    };
    let mut metrics: Vec<String> = Vec::new();

    if let Some(usd) = cost.total_cost_usd.filter(|v| *v > 0.0) {
        metrics.push(palette.paint(cost_tone(usd), &format_cost(usd)));
    }
    if let Some(ms) = cost.total_duration_ms.filter(|v| *v > 0) {
        metrics.push(palette.paint(duration_tone(ms), &format_duration(ms)));
    }
    if let Some(net) = net_lines(cost) {
        metrics.push(palette.paint(lines_tone(net), &format_net_lines(net)));
    }

    if metrics.is_empty() {
        return String::new();
    }
    let divider = palette.divider();
    format!(" {divider} {}", metrics.join(&format!(" {divider} ")))
}

/// Full status line for a parsed session snapshot.
pub fn compose_status_line(
    hook: &HookJson,
    context: Option<&ContextEstimate>,
    context_limit: u64,
    palette: &Palette,
) -> String {
    let divider = palette.divider();
    let model = palette.paint(Tone::Cyan, &format!("[{}]", hook.model_display_name()));
    let directory = directory_display(hook.workspace.as_ref());
    let mut components = vec![
        model,
        divider.clone(),
        palette.paint(Tone::LightYellow, &format!("📁 {directory}")),
    ];

    let context_display = format_context(context, context_limit, palette);
    if !context_display.is_empty() {
        components.push(format!("{divider} {context_display}"));
    }
    // Already carries its own leading divider
    let metrics = format_session_metrics(hook.cost.as_ref(), palette);
    if !metrics.is_empty() {
        components.push(metrics);
    }
    components.join(" ")
}

/// Degraded line printed when anything in the pipeline fails.
pub fn fallback_line(directory: &str, error: &str, palette: &Palette) -> String {
    format!(
        "{} {} {}",
        palette.paint(Tone::Blue, "[Claude]"),
        palette.paint(Tone::LightYellow, &format!("📁 {directory}")),
        palette.paint(
            Tone::Red,
            &format!("[Error: {}]", truncate_chars(error, ERROR_EXCERPT_CHARS))
        )
    )
}

pub fn build_json_output(
    hook: &HookJson,
    context: Option<&ContextEstimate>,
    context_limit: u64,
) -> serde_json::Value {
    let context_json = context.map(|ctx| {
        json!({
            "percent": (ctx.percent * 10.0).round() / 10.0,
            "tokens": ctx.tokens,
            "limit": context_limit,
            "warning": ctx.warning,
            "source": ctx.source,
            "alert": context_alert(ctx),
        })
    });
    let cost = hook.cost.clone().unwrap_or_default();
    json!({
        "model": hook.model_display_name(),
        "directory": directory_display(hook.workspace.as_ref()),
        "context": context_json,
        "cost": {
            "usd": cost.total_cost_usd,
            "duration_ms": cost.total_duration_ms,
            "lines_added": cost.total_lines_added,
            "lines_removed": cost.total_lines_removed,
            "net_lines": net_lines(&cost),
        },
    })
}

pub fn build_json_fallback(directory: &str, error: &str) -> serde_json::Value {
    json!({
        "model": "Claude",
        "directory": directory,
        "error": truncate_chars(error, ERROR_EXCERPT_CHARS),
    })
}
