use serde::Serialize;

use crate::pipeline::stage3_scenarios::SheetOutcome;

#[derive(Debug, Clone, Serialize)]
pub struct PassFail {
    pub column: String,
    pub threshold: f64,
    pub total: f64,
    pub pass: f64,
    pub fail: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SheetSummary {
    pub name: String,
    pub statistic: String,
    pub sinks: Vec<String>,
    /// Scenario label and error text when the sheet stopped early.
    pub aborted: Option<String>,
    pub pass_fail: Vec<PassFail>,
    #[serde(flatten)]
    pub outcome: SheetOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub tool: String,
    pub version: String,
    pub mode: String,
    pub input: String,
    pub n_rows: usize,
    pub sheets: Vec<SheetSummary>,
}

impl RunSummary {
    pub fn n_aborted(&self) -> usize {
        self.sheets.iter().filter(|s| s.aborted.is_some()).count()
    }
}

pub fn render_summary_json(summary: &RunSummary) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(summary)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/json.rs"]
mod tests;
