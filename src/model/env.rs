use serde::{Deserialize, Serialize};

pub const ANY: &str = "any";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Road {
    Any,
    Highway,
    Rural,
    City,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    Any,
    Clear,
    Rain,
    Snow,
    Fog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Daytime {
    Any,
    Day,
    Night,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suspension {
    Any,
    Default,
    Low,
    High,
    Varying,
}

impl Road {
    pub fn as_str(self) -> &'static str {
        match self {
            Road::Any => ANY,
            Road::Highway => "highway",
            Road::Rural => "rural",
            Road::City => "city",
        }
    }
}

impl Weather {
    pub fn as_str(self) -> &'static str {
        match self {
            Weather::Any => ANY,
            Weather::Clear => "clear",
            Weather::Rain => "rain",
            Weather::Snow => "snow",
            Weather::Fog => "fog",
        }
    }
}

impl Daytime {
    pub fn as_str(self) -> &'static str {
        match self {
            Daytime::Any => ANY,
            Daytime::Day => "day",
            Daytime::Night => "night",
        }
    }
}

impl Suspension {
    pub fn as_str(self) -> &'static str {
        match self {
            Suspension::Any => ANY,
            Suspension::Default => "default",
            Suspension::Low => "low",
            Suspension::High => "high",
            Suspension::Varying => "varying",
        }
    }
}
