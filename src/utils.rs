use std::env;
use std::io::Read;
use std::path::{self, Path};

pub fn read_stdin() -> anyhow::Result<Vec<u8>> {
    let mut buf = Vec::new();
    std::io::stdin().read_to_end(&mut buf)?;
    Ok(buf)
}

/// Compact token count: whole thousands with a `k` suffix from 1000 up.
pub fn format_tokens(n: u64) -> String {
    if n >= 1_000 {
        format!("{}k", n / 1_000)
    } else {
        n.to_string()
    }
}

/// Session cost: rounded cents below one cent's worth of dollars, else dollars to 3 places.
pub fn format_cost(usd: f64) -> String {
    if usd < 0.01 {
        format!("{}¢", (usd * 100.0).round() as i64)
    } else {
        format!("${usd:.3}")
    }
}

/// Session duration: whole seconds under a minute, minutes rounded half to even otherwise.
pub fn format_duration(ms: u64) -> String {
    let minutes = ms as f64 / 60_000.0;
    if minutes < 1.0 {
        format!("{}s", ms / 1_000)
    } else {
        format!("{}m", minutes.round_ties_even() as u64)
    }
}

pub fn format_net_lines(net: i64) -> String {
    if net >= 0 {
        format!("+{net}")
    } else {
        net.to_string()
    }
}

/// Last component of a path; the path itself when it has none (e.g. `/`).
pub fn path_leaf(p: &str) -> String {
    Path::new(p)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| p.to_owned())
}

/// Leaf of the process working directory, used by the fallback line.
pub fn cwd_leaf() -> String {
    env::current_dir()
        .map(|d| path_leaf(&d.to_string_lossy()))
        .unwrap_or_else(|_| "unknown".to_string())
}

/// `p` with `prefix` removed along with any separators that follow it.
pub fn strip_dir_prefix<'a>(p: &'a str, prefix: &str) -> Option<&'a str> {
    p.strip_prefix(prefix)
        .map(|rest| rest.trim_start_matches(path::is_separator))
}

pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
