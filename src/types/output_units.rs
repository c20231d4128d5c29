use crate::settings::SettingsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Physical quantity shown in the rendered figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputUnits {
    /// Radar reflectivity in dBZ.
    #[serde(rename = "dBZ")]
    Dbz,
    /// Rain rate in mm/h, derived with the Z-R relation `Z = 256 * R^1.42`.
    #[serde(rename = "rainrate")]
    RainRate,
}

impl OutputUnits {
    /// Unit label shown next to the colorbar.
    pub fn label(&self) -> &'static str {
        match self {
            OutputUnits::Dbz => "dBZ",
            OutputUnits::RainRate => "mm/h",
        }
    }
}

impl FromStr for OutputUnits {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dbz" => Ok(OutputUnits::Dbz),
            "rainrate" => Ok(OutputUnits::RainRate),
            _ => Err(SettingsError::InvalidOutputUnits(s.to_string())),
        }
    }
}

impl fmt::Display for OutputUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputUnits::Dbz => write!(f, "dBZ"),
            OutputUnits::RainRate => write!(f, "rainrate"),
        }
    }
}
