use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::ReportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProjectMode {
    /// Bracket offset catalog (pitch, yaw, roll, suspension).
    #[default]
    Adcam,
    /// Driving environment catalog (road, weather, daytime, suspension).
    Cariad,
}

impl ProjectMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectMode::Adcam => "adcam",
            ProjectMode::Cariad => "cariad",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum StatisticKind {
    WeightedPercentiles,
    Percentiles,
    MinMedAveMax,
    StateRatio,
    DegradeCauseRatio,
    TwoSigma,
}

impl StatisticKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StatisticKind::WeightedPercentiles => "weighted_percentiles",
            StatisticKind::Percentiles => "percentiles",
            StatisticKind::MinMedAveMax => "min_med_ave_max",
            StatisticKind::StateRatio => "state_ratio",
            StatisticKind::DegradeCauseRatio => "degrade_cause_ratio",
            StatisticKind::TwoSigma => "two_sigma",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weighting {
    /// Input already carries the weight column.
    Precomputed,
    /// One row per frame; collapse repeated values into weighted rows.
    #[default]
    Collapse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub weight: String,
    pub road: String,
    pub weather: String,
    pub daytime: String,
    pub suspension: String,
    pub pitch: String,
    pub yaw: String,
    pub roll: String,
    pub log: String,
    pub state: String,
    pub cam_height: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            weight: "weight".to_string(),
            road: "road".to_string(),
            weather: "weather".to_string(),
            daytime: "daytime".to_string(),
            suspension: "suspension".to_string(),
            pitch: "pitch".to_string(),
            yaw: "yaw".to_string(),
            roll: "roll".to_string(),
            log: "log".to_string(),
            state: "calib_state".to_string(),
            cam_height: "cam_height".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamLabel {
    pub column: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassThreshold {
    pub column: String,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetConfig {
    pub name: String,
    pub statistic: StatisticKind,
    pub params: Vec<ParamLabel>,
    #[serde(default)]
    pub percentile_columns: Option<Vec<String>>,
    #[serde(default)]
    pub weighting: Weighting,
    /// Keep only frames whose state column equals this value before weighting.
    #[serde(default)]
    pub state_filter: Option<f64>,
    #[serde(default)]
    pub pass_thresholds: Vec<PassThreshold>,
}

impl SheetConfig {
    pub fn accuracy() -> Self {
        let param = |column: &str, label: &str| ParamLabel {
            column: column.to_string(),
            label: label.to_string(),
        };
        let threshold = |column: &str, max: f64| PassThreshold {
            column: column.to_string(),
            max,
        };
        Self {
            name: "Accuracy".to_string(),
            statistic: StatisticKind::WeightedPercentiles,
            params: vec![
                param("delta_yaw", "Yaw "),
                param("delta_pitch", "Pitch "),
                param("delta_roll", "Roll "),
                param("delta_height", "Height "),
            ],
            percentile_columns: None,
            weighting: Weighting::Collapse,
            state_filter: None,
            pass_thresholds: vec![
                threshold("delta_pitch", 0.3),
                threshold("delta_yaw", 0.3),
                threshold("delta_roll", 0.5),
                threshold("delta_height", 0.06),
            ],
        }
    }

    /// Columns the statistic runs on: the override list, or the param column itself.
    pub fn stat_columns<'a>(&'a self, param: &'a ParamLabel) -> Vec<&'a str> {
        match &self.percentile_columns {
            Some(cols) => cols.iter().map(String::as_str).collect(),
            None => vec![param.column.as_str()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub mode: ProjectMode,
    pub columns: ColumnNames,
    /// Rows left blank after each successful block.
    pub write_spacer: usize,
    /// Rows left blank after each scenario.
    pub scenario_spacer: usize,
    pub sheets: Vec<SheetConfig>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            mode: ProjectMode::default(),
            columns: ColumnNames::default(),
            write_spacer: 1,
            scenario_spacer: 2,
            sheets: vec![SheetConfig::accuracy()],
        }
    }
}

impl ReportConfig {
    pub fn load(path: &Path) -> Result<Self, ReportError> {
        let text = std::fs::read_to_string(path)?;
        let config: ReportConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReportError> {
        if self.sheets.is_empty() {
            return Err(ReportError::Config("no sheets configured".to_string()));
        }
        for sheet in &self.sheets {
            if sheet.params.is_empty() {
                return Err(ReportError::Config(format!(
                    "sheet {} has no params",
                    sheet.name
                )));
            }
            if sheet.percentile_columns.as_ref().is_some_and(|c| c.is_empty()) {
                return Err(ReportError::Config(format!(
                    "sheet {} has an empty percentile_columns list",
                    sheet.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/config.rs"]
mod tests;
