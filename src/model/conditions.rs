use crate::config::{ColumnNames, ProjectMode};
use crate::error::StatsError;
use crate::model::env::{Daytime, Road, Weather};
use crate::table::{Table, and_masks};

pub const FULL_DATA: &str = "Full data";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    Road(Road),
    Weather(Weather),
    Daytime(Daytime),
}

/// Named conjunction of categorical equality tests. No terms means the whole table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub name: &'static str,
    pub terms: Vec<Term>,
}

impl Condition {
    fn new(name: &'static str, terms: &[Term]) -> Self {
        Self {
            name,
            terms: terms.to_vec(),
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        self.terms.is_empty()
    }

    /// Row mask for this condition. Terms are checked in declaration order, so a
    /// missing column is reported for the first term that needs it.
    pub fn mask(&self, table: &Table, columns: &ColumnNames) -> Result<Vec<bool>, StatsError> {
        let mut mask = vec![true; table.n_rows()];
        for term in &self.terms {
            let part = match term {
                Term::Road(r) => table.text_eq_mask(&columns.road, r.as_str())?,
                Term::Weather(w) => table.text_eq_mask(&columns.weather, w.as_str())?,
                Term::Daytime(d) => table.text_eq_mask(&columns.daytime, d.as_str())?,
            };
            and_masks(&mut mask, &part);
        }
        Ok(mask)
    }
}

const CITY: Term = Term::Road(Road::City);
const HIGHWAY: Term = Term::Road(Road::Highway);
const RURAL: Term = Term::Road(Road::Rural);
const DAY: Term = Term::Daytime(Daytime::Day);
const NIGHT: Term = Term::Daytime(Daytime::Night);
const CLEAR: Term = Term::Weather(Weather::Clear);
const RAIN: Term = Term::Weather(Weather::Rain);
const SNOW: Term = Term::Weather(Weather::Snow);
const FOG: Term = Term::Weather(Weather::Fog);

/// Road split used for every non-baseline scenario.
pub fn road_conditions() -> Vec<Condition> {
    vec![
        Condition::new(FULL_DATA, &[]),
        Condition::new("City", &[CITY]),
        Condition::new("Highway", &[HIGHWAY]),
        Condition::new("Rural", &[RURAL]),
    ]
}

/// Full environment split used for the baseline scenario. The order is the row
/// order of the report block.
pub fn full_conditions(mode: ProjectMode) -> Vec<Condition> {
    // The Rain family keeps its "Day" names but selects night frames in Cariad mode.
    let rain_daytime = match mode {
        ProjectMode::Cariad => NIGHT,
        ProjectMode::Adcam => DAY,
    };

    vec![
        Condition::new(FULL_DATA, &[]),
        Condition::new("Day", &[DAY]),
        Condition::new("Night", &[NIGHT]),
        Condition::new("City", &[CITY]),
        Condition::new("Highway", &[HIGHWAY]),
        Condition::new("Rural", &[RURAL]),
        Condition::new("Clear", &[CLEAR]),
        Condition::new("Rain", &[RAIN]),
        Condition::new("Snow", &[SNOW]),
        Condition::new("Fog", &[FOG]),
        Condition::new("CityDayClear", &[CITY, DAY, CLEAR]),
        Condition::new("HighwayDayClear", &[HIGHWAY, DAY, CLEAR]),
        Condition::new("RuralDayClear", &[RURAL, DAY, CLEAR]),
        Condition::new("CityNightClear", &[CITY, NIGHT, CLEAR]),
        Condition::new("HighwayNightClear", &[HIGHWAY, NIGHT, CLEAR]),
        Condition::new("RuralNightClear", &[RURAL, NIGHT, CLEAR]),
        Condition::new("CityDayRain", &[CITY, rain_daytime, RAIN]),
        Condition::new("HighwayDayRain", &[HIGHWAY, rain_daytime, RAIN]),
        Condition::new("RuralDayRain", &[RURAL, rain_daytime, RAIN]),
        Condition::new("CityDaySnow", &[CITY, DAY, SNOW]),
        Condition::new("HighwayDaySnow", &[HIGHWAY, DAY, SNOW]),
        Condition::new("RuralDaySnow", &[RURAL, DAY, SNOW]),
        Condition::new("CityDayFog", &[CITY, DAY, FOG]),
        Condition::new("HighwayDayFog", &[HIGHWAY, DAY, FOG]),
        Condition::new("RuralDayFog", &[RURAL, DAY, FOG]),
    ]
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/conditions.rs"]
mod tests;
