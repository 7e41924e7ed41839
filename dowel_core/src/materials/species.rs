//! Wood Species Groups (NDS 2018 Table 12.3.3A)
//!
//! Connection design only needs a species group's specific gravity G; the
//! grade of the lumber does not affect dowel bearing strength.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Wood species groups per NDS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WoodSpecies {
    /// Douglas Fir-Larch
    #[serde(rename = "DF-L")]
    DouglasFirLarch,
    /// Southern Pine
    #[serde(rename = "SP")]
    SouthernPine,
    /// Hem-Fir
    #[serde(rename = "HF")]
    HemFir,
    /// Spruce-Pine-Fir
    #[serde(rename = "SPF")]
    SprucePineFir,
    /// Douglas Fir-South
    #[serde(rename = "DF-S")]
    DouglasFirSouth,
}

impl WoodSpecies {
    /// All wood species variants
    pub const ALL: [WoodSpecies; 5] = [
        WoodSpecies::DouglasFirLarch,
        WoodSpecies::SouthernPine,
        WoodSpecies::HemFir,
        WoodSpecies::SprucePineFir,
        WoodSpecies::DouglasFirSouth,
    ];

    /// Short code (e.g., "DF-L", "SP")
    pub fn code(&self) -> &'static str {
        match self {
            WoodSpecies::DouglasFirLarch => "DF-L",
            WoodSpecies::SouthernPine => "SP",
            WoodSpecies::HemFir => "HF",
            WoodSpecies::SprucePineFir => "SPF",
            WoodSpecies::DouglasFirSouth => "DF-S",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_uppercase().replace([' ', '_'], "-").as_str() {
            "DF-L" | "DOUGLAS-FIR-LARCH" | "DFL" => Ok(WoodSpecies::DouglasFirLarch),
            "SP" | "SOUTHERN-PINE" | "SYP" => Ok(WoodSpecies::SouthernPine),
            "HF" | "HEM-FIR" => Ok(WoodSpecies::HemFir),
            "SPF" | "SPRUCE-PINE-FIR" => Ok(WoodSpecies::SprucePineFir),
            "DF-S" | "DOUGLAS-FIR-SOUTH" | "DFS" => Ok(WoodSpecies::DouglasFirSouth),
            _ => Err(CalcError::material_not_found(s)),
        }
    }

    /// Specific gravity G for connection design (NDS Table 12.3.3A)
    pub fn specific_gravity(&self) -> f64 {
        match self {
            WoodSpecies::DouglasFirLarch => 0.50,
            WoodSpecies::SouthernPine => 0.55,
            WoodSpecies::HemFir => 0.43,
            WoodSpecies::SprucePineFir => 0.42,
            WoodSpecies::DouglasFirSouth => 0.46,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            WoodSpecies::DouglasFirLarch => "Douglas Fir-Larch",
            WoodSpecies::SouthernPine => "Southern Pine",
            WoodSpecies::HemFir => "Hem-Fir",
            WoodSpecies::SprucePineFir => "Spruce-Pine-Fir",
            WoodSpecies::DouglasFirSouth => "Douglas Fir-South",
        }
    }
}

impl std::fmt::Display for WoodSpecies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
