use serde::Deserialize;

#[derive(Deserialize, Debug, Default, Clone)]
pub struct HookModel {
    pub display_name: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct HookWorkspace {
    pub current_dir: Option<String>,
    pub project_dir: Option<String>,
}

/// Cumulative session totals provided by the host's statusLine input
#[derive(Deserialize, Debug, Default, Clone)]
pub struct HookCost {
    pub total_cost_usd: Option<f64>,
    pub total_duration_ms: Option<u64>,
    pub total_lines_added: Option<i64>,
    pub total_lines_removed: Option<i64>,
}

/// Session snapshot read from stdin. Every field may be absent.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct HookJson {
    pub model: Option<HookModel>,
    pub workspace: Option<HookWorkspace>,
    pub transcript_path: Option<String>,
    pub cost: Option<HookCost>,
}

impl HookJson {
    pub fn model_display_name(&self) -> &str {
        self.model
            .as_ref()
            .and_then(|m| m.display_name.as_deref())
            .unwrap_or("Claude")
    }
}
