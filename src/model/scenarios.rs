use crate::config::{ColumnNames, ProjectMode};
use crate::error::StatsError;
use crate::model::env::{ANY, Daytime, Road, Suspension, Weather};
use crate::table::{Table, and_masks};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scenario {
    /// Bracket offset in degrees plus suspension: exact equality on all four fields.
    Bracket {
        pitch: f64,
        yaw: f64,
        roll: f64,
        suspension: Suspension,
    },
    /// Driving environment plus suspension: `Any` leaves that field unfiltered.
    Drive {
        road: Road,
        weather: Weather,
        daytime: Daytime,
        suspension: Suspension,
    },
}

const CAM_POS: [(f64, f64, f64, Suspension); 24] = [
    (0.0, 0.0, 0.0, Suspension::Default),
    (0.0, 0.0, 0.0, Suspension::High),
    (0.0, 0.0, 0.0, Suspension::Low),
    (0.0, 0.0, 0.0, Suspension::Varying),
    (3.5, 0.0, 0.0, Suspension::Default),
    (2.5, 0.0, 0.0, Suspension::Default),
    (-2.5, 0.0, 0.0, Suspension::Default),
    (-3.5, 0.0, 0.0, Suspension::Default),
    (0.0, 3.5, 0.0, Suspension::Default),
    (0.0, 2.5, 0.0, Suspension::Default),
    (0.0, -2.5, 0.0, Suspension::Default),
    (0.0, -3.5, 0.0, Suspension::Default),
    (0.0, 0.0, 3.5, Suspension::Default),
    (0.0, 0.0, 2.5, Suspension::Default),
    (0.0, 0.0, -2.5, Suspension::Default),
    (0.0, 0.0, -3.5, Suspension::Default),
    (3.5, 3.5, 3.5, Suspension::Default),
    (-3.5, -3.5, -3.5, Suspension::Default),
    (4.0, 0.0, 0.0, Suspension::Default),
    (-4.0, 0.0, 0.0, Suspension::Default),
    (0.0, 4.0, 0.0, Suspension::Default),
    (0.0, -4.0, 0.0, Suspension::Default),
    (5.0, 0.0, 0.0, Suspension::Default),
    (-5.0, 0.0, 0.0, Suspension::Default),
];

const DRIVE: [(Road, Weather, Daytime, Suspension); 9] = [
    (Road::Any, Weather::Any, Daytime::Any, Suspension::Any),
    (Road::Any, Weather::Clear, Daytime::Day, Suspension::Low),
    (Road::Any, Weather::Clear, Daytime::Night, Suspension::Low),
    (Road::Any, Weather::Clear, Daytime::Day, Suspension::High),
    (Road::Any, Weather::Clear, Daytime::Night, Suspension::High),
    (Road::Any, Weather::Rain, Daytime::Day, Suspension::Low),
    (Road::Any, Weather::Rain, Daytime::Night, Suspension::Low),
    (Road::Any, Weather::Rain, Daytime::Day, Suspension::High),
    (Road::Any, Weather::Rain, Daytime::Night, Suspension::High),
];

pub fn scenario_catalog(mode: ProjectMode) -> Vec<Scenario> {
    match mode {
        ProjectMode::Adcam => CAM_POS
            .iter()
            .map(|&(pitch, yaw, roll, suspension)| Scenario::Bracket {
                pitch,
                yaw,
                roll,
                suspension,
            })
            .collect(),
        ProjectMode::Cariad => DRIVE
            .iter()
            .map(|&(road, weather, daytime, suspension)| Scenario::Drive {
                road,
                weather,
                daytime,
                suspension,
            })
            .collect(),
    }
}

impl Scenario {
    pub fn is_baseline(&self) -> bool {
        match *self {
            Scenario::Bracket {
                pitch,
                yaw,
                roll,
                suspension,
            } => pitch == 0.0 && yaw == 0.0 && roll == 0.0 && suspension == Suspension::Default,
            Scenario::Drive {
                road,
                weather,
                daytime,
                suspension,
            } => {
                road == Road::Any
                    && weather == Weather::Any
                    && daytime == Daytime::Any
                    && suspension == Suspension::Any
            }
        }
    }

    /// Tuple text appended to a row-label prefix, e.g. `(3.5, 0, 0, default)`.
    pub fn tag(&self) -> String {
        match self {
            Scenario::Bracket {
                pitch,
                yaw,
                roll,
                suspension,
            } => format!("({pitch}, {yaw}, {roll}, {})", suspension.as_str()),
            Scenario::Drive {
                road,
                weather,
                daytime,
                suspension,
            } => format!(
                "({}, {}, {}, {})",
                road.as_str(),
                weather.as_str(),
                daytime.as_str(),
                suspension.as_str()
            ),
        }
    }

    pub fn label(&self, prefix: &str) -> String {
        format!("{prefix}{}", self.tag())
    }

    /// Rows of `table` belonging to this scenario, as a new table.
    pub fn select(&self, table: &Table, columns: &ColumnNames) -> Result<Table, StatsError> {
        let mut mask = vec![true; table.n_rows()];
        match *self {
            Scenario::Bracket {
                pitch,
                yaw,
                roll,
                suspension,
            } => {
                and_masks(&mut mask, &table.numeric_eq_mask(&columns.pitch, pitch)?);
                and_masks(&mut mask, &table.numeric_eq_mask(&columns.yaw, yaw)?);
                and_masks(&mut mask, &table.numeric_eq_mask(&columns.roll, roll)?);
                and_masks(
                    &mut mask,
                    &table.text_eq_mask(&columns.suspension, suspension.as_str())?,
                );
            }
            Scenario::Drive {
                road,
                weather,
                daytime,
                suspension,
            } => {
                for (column, value) in [
                    (&columns.road, road.as_str()),
                    (&columns.weather, weather.as_str()),
                    (&columns.daytime, daytime.as_str()),
                    (&columns.suspension, suspension.as_str()),
                ] {
                    if value == ANY {
                        continue;
                    }
                    and_masks(&mut mask, &table.text_eq_mask(column, value)?);
                }
            }
        }
        Ok(table.filter(&mask))
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/scenarios.rs"]
mod tests;
