//! # Connection Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - A validated value type whose queries are pure functions
//!
//! ## Available Calculations
//!
//! - [`connection`] - Single dowel-type fastener, single or double shear

pub mod connection;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use connection::{
    CapacityResult, DowelConnection, DowelConnectionInput, IntermediateTerms, ModeCapacity,
    ShearConfiguration,
};

use crate::errors::CalcResult;
use crate::units::Degrees;

/// Enum wrapper for all calculation types.
///
/// Lets a JSON document hold any supported calculation behind a `"type"`
/// discriminator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// Single dowel-type fastener
    DowelConnection(DowelConnectionInput),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::DowelConnection(c) => &c.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::DowelConnection(_) => "DowelConnection",
        }
    }

    /// Validate and evaluate this item at `theta`
    pub fn calculate(&self, theta: Degrees) -> CalcResult<CapacityResult> {
        match self {
            CalculationItem::DowelConnection(input) => DowelConnection::new(input)?.analyze(theta),
        }
    }
}
