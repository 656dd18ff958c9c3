use serde::ser::{Serialize, SerializeMap, Serializer};

pub const NO_DATA_TEXT: &str = "No Data";
pub const NAN_TEXT: &str = "None";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    /// Numeric statistic over an empty series.
    NotANumber,
    /// Statistic that reports an empty partition as text.
    NoData,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatValue {
    Value(f64),
    Missing(Missing),
}

impl StatValue {
    pub fn from_f64(v: f64) -> Self {
        if v.is_nan() {
            StatValue::Missing(Missing::NotANumber)
        } else {
            StatValue::Value(v)
        }
    }

    pub fn nan() -> Self {
        StatValue::Missing(Missing::NotANumber)
    }

    pub fn no_data() -> Self {
        StatValue::Missing(Missing::NoData)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StatValue::Value(v) => Some(*v),
            StatValue::Missing(_) => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, StatValue::Missing(_))
    }

    /// Spreadsheet cell text.
    pub fn render(&self) -> String {
        match self {
            StatValue::Value(v) => format!("{v}"),
            StatValue::Missing(Missing::NotANumber) => NAN_TEXT.to_string(),
            StatValue::Missing(Missing::NoData) => NO_DATA_TEXT.to_string(),
        }
    }
}

impl Serialize for StatValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StatValue::Value(v) => serializer.serialize_f64(*v),
            StatValue::Missing(Missing::NotANumber) => serializer.serialize_none(),
            StatValue::Missing(Missing::NoData) => serializer.serialize_str(NO_DATA_TEXT),
        }
    }
}

/// Ordered title -> value cells produced by one statistic call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatRow {
    cells: Vec<(String, StatValue)>,
}

impl StatRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, title: impl Into<String>, value: StatValue) {
        self.cells.push((title.into(), value));
    }

    pub fn with(mut self, title: impl Into<String>, value: StatValue) -> Self {
        self.push(title, value);
        self
    }

    pub fn get(&self, title: &str) -> Option<StatValue> {
        self.cells
            .iter()
            .find(|(t, _)| t == title)
            .map(|(_, v)| *v)
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(t, _)| t.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, StatValue)> {
        self.cells.iter().map(|(t, v)| (t.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Serialize for StatRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (title, value) in &self.cells {
            map.serialize_entry(title, value)?;
        }
        map.end()
    }
}

/// Condition name -> statistic row. Iteration order is insertion order, which is
/// the condition catalog order. Consumers address rows by position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatResult {
    rows: Vec<(&'static str, StatRow)>,
}

impl StatResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, condition: &'static str, row: StatRow) {
        if let Some(slot) = self.rows.iter_mut().find(|(c, _)| *c == condition) {
            slot.1 = row;
        } else {
            self.rows.push((condition, row));
        }
    }

    pub fn get(&self, condition: &str) -> Option<&StatRow> {
        self.rows
            .iter()
            .find(|(c, _)| *c == condition)
            .map(|(_, r)| r)
    }

    pub fn conditions(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rows.iter().map(|(c, _)| *c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &StatRow)> {
        self.rows.iter().map(|(c, r)| (*c, r))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Serialize for StatResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(serde::Serialize)]
        struct Entry<'a> {
            condition: &'a str,
            values: &'a StatRow,
        }
        serializer.collect_seq(self.rows.iter().map(|(condition, values)| Entry {
            condition,
            values,
        }))
    }
}
