//! Hazard types and susceptibility classification.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HazardMapError;

/// Type of a hazard dataset. Every hazard kind is displayed as a separate map layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HazardKind {
    /// Flood susceptibility.
    Flood,
    /// Landslide susceptibility.
    Landslide,
    /// Liquefaction susceptibility.
    Liquefaction,
}

impl HazardKind {
    /// All hazard kinds in the order their layers are drawn.
    pub const ALL: [HazardKind; 3] = [
        HazardKind::Flood,
        HazardKind::Landslide,
        HazardKind::Liquefaction,
    ];

    /// Identifier of the hazard kind as used by the backend API (`flood`, `landslide`, `liquefaction`).
    pub fn as_str(&self) -> &'static str {
        match self {
            HazardKind::Flood => "flood",
            HazardKind::Landslide => "landslide",
            HazardKind::Liquefaction => "liquefaction",
        }
    }

    /// Capitalized name of the hazard for display.
    pub fn label(&self) -> &'static str {
        match self {
            HazardKind::Flood => "Flood",
            HazardKind::Landslide => "Landslide",
            HazardKind::Liquefaction => "Liquefaction",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            HazardKind::Flood => 0,
            HazardKind::Landslide => 1,
            HazardKind::Liquefaction => 2,
        }
    }
}

impl Display for HazardKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HazardKind {
    type Err = HazardMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HazardKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s.trim())
            .ok_or_else(|| {
                HazardMapError::Validation(format!(
                    "Invalid dataset type '{s}'. Must be one of: flood, landslide, liquefaction"
                ))
            })
    }
}

/// Susceptibility classification of a hazard polygon.
///
/// The backend standardizes all datasets into four levels: `LS`, `MS`, `HS` and `VHS`. Any other code is kept as
/// [`SusceptibilityLevel::Other`] and displayed with the fallback style.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SusceptibilityLevel {
    /// `LS`
    Low,
    /// `MS`
    Moderate,
    /// `HS`
    High,
    /// `VHS`
    VeryHigh,
    /// Any unrecognized code.
    Other(String),
}

const FLOOD_CODES: &[(&str, &str)] = &[("LF", "LS"), ("MF", "MS"), ("HF", "HS"), ("VHF", "VHS")];

const LANDSLIDE_CODES: &[(&str, &str)] = &[
    ("LL", "LS"),
    ("ML", "MS"),
    ("HL", "HS"),
    ("VHL", "VHS"),
    ("DF", "DF"),
];

const LIQUEFACTION_CODES: &[(&str, &str)] = &[
    ("low susceptibility", "LS"),
    ("moderate susceptibility", "MS"),
    ("high susceptibility", "HS"),
];

impl SusceptibilityLevel {
    /// Parses a standardized susceptibility code.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "LS" => Self::Low,
            "MS" => Self::Moderate,
            "HS" => Self::High,
            "VHS" => Self::VeryHigh,
            other => Self::Other(other.to_string()),
        }
    }

    /// Converts a code from the source dataset into a standardized level the same way the backend does it on
    /// shapefile import.
    ///
    /// Flood and landslide codes that are not in the table are kept as is. Unrecognized liquefaction descriptions
    /// are classified as low susceptibility.
    pub fn standardize(kind: HazardKind, original_code: &str) -> Self {
        let code = original_code.trim();
        let standardized = match kind {
            HazardKind::Flood => lookup(FLOOD_CODES, code).unwrap_or(code),
            HazardKind::Landslide => lookup(LANDSLIDE_CODES, code).unwrap_or(code),
            HazardKind::Liquefaction => {
                lookup(LIQUEFACTION_CODES, &code.to_lowercase()).unwrap_or("LS")
            }
        };

        Self::from_code(standardized)
    }

    /// Standardized code of the level.
    pub fn code(&self) -> &str {
        match self {
            Self::Low => "LS",
            Self::Moderate => "MS",
            Self::High => "HS",
            Self::VeryHigh => "VHS",
            Self::Other(code) => code,
        }
    }

    /// Human readable name of the level.
    pub fn description(&self) -> &str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::VeryHigh => "Very High",
            Self::Other(_) => "Unknown",
        }
    }
}

impl Display for SusceptibilityLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Other(code) => write!(f, "{code}"),
            level => write!(f, "{} ({})", level.description(), level.code()),
        }
    }
}

fn lookup<'a>(table: &[(&str, &'a str)], code: &str) -> Option<&'a str> {
    table
        .iter()
        .find(|(source, _)| *source == code)
        .map(|(_, target)| *target)
}
