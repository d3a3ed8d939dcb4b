use serde::Serialize;

/// Warning raised by the host in a `system_message` transcript record
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ContextWarning {
    AutoCompact,
    Low,
}

impl ContextWarning {
    pub fn as_str(self) -> &'static str {
        match self {
            ContextWarning::AutoCompact => "auto-compact",
            ContextWarning::Low => "low",
        }
    }

    pub fn alert_label(self) -> &'static str {
        match self {
            ContextWarning::AutoCompact => "AUTO-COMPACT!",
            ContextWarning::Low => "LOW!",
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContextSource {
    /// Token counts from an assistant message's usage block
    Usage,
    /// Percentage parsed from a system warning
    System,
}

impl ContextSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ContextSource::Usage => "usage",
            ContextSource::System => "system",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextEstimate {
    /// Share of the context window in use, 0..=100
    pub percent: f64,
    /// Raw token count; only known for `ContextSource::Usage`
    pub tokens: Option<u64>,
    pub warning: Option<ContextWarning>,
    pub source: ContextSource,
}

impl ContextEstimate {
    pub fn from_usage(tokens: u64, context_limit: u64) -> Self {
        let percent = if context_limit == 0 {
            100.0
        } else {
            (tokens as f64 / context_limit as f64 * 100.0).min(100.0)
        };
        Self {
            percent,
            tokens: Some(tokens),
            warning: None,
            source: ContextSource::Usage,
        }
    }

    pub fn from_warning(percent_left: u64, warning: ContextWarning) -> Self {
        Self {
            percent: (100.0 - percent_left as f64).clamp(0.0, 100.0),
            tokens: None,
            warning: Some(warning),
            source: ContextSource::System,
        }
    }
}
