//! # Unit Types
//!
//! Type-safe wrappers for the engineering units used by dowel calculations.
//! These are simple f64 newtypes that serialize as bare numbers.
//!
//! ## US Customary Units
//!
//! The NDS yield limit equations are dimensionally consistent but their
//! empirical constants (16600, 11200, 6100) assume:
//! - Length: inches (in)
//! - Stress: pounds per square inch (psi)
//! - Force: pounds (lb)
//! - Withdrawal strength: pounds per inch of penetration (lb/in)
//! - Load angle to grain: degrees
//!
//! ## Example
//!
//! ```rust
//! use dowel_core::units::{Degrees, Ksi, Psi};
//!
//! let fyb = Psi(45_000.0);
//! let fyb_ksi: Ksi = fyb.into();
//! assert_eq!(fyb_ksi.0, 45.0);
//!
//! assert_eq!(Degrees::PARALLEL.0, 0.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::Mul;

// ============================================================================
// Length Units
// ============================================================================

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

// ============================================================================
// Force Units
// ============================================================================

/// Force in pounds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pounds(pub f64);

/// Force per unit penetration (lb/in), used for withdrawal
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoundsPerInch(pub f64);

impl Mul<Inches> for PoundsPerInch {
    type Output = Pounds;

    fn mul(self, rhs: Inches) -> Pounds {
        Pounds(self.0 * rhs.0)
    }
}

// ============================================================================
// Stress Units
// ============================================================================

/// Stress in pounds per square inch (psi)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Psi(pub f64);

/// Stress in kips per square inch (ksi)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ksi(pub f64);

impl From<Psi> for Ksi {
    fn from(psi: Psi) -> Self {
        Ksi(psi.0 / 1000.0)
    }
}

impl From<Ksi> for Psi {
    fn from(ksi: Ksi) -> Self {
        Psi(ksi.0 * 1000.0)
    }
}

// ============================================================================
// Angle Units
// ============================================================================

/// Load angle to grain in degrees (0 = parallel, 90 = perpendicular)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

impl Degrees {
    /// Load parallel to grain
    pub const PARALLEL: Degrees = Degrees(0.0);
    /// Load perpendicular to grain
    pub const PERPENDICULAR: Degrees = Degrees(90.0);

    /// Angle in radians
    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }
}

/// The NDS reference condition is load perpendicular to grain.
impl Default for Degrees {
    fn default() -> Self {
        Degrees::PERPENDICULAR
    }
}

impl From<f64> for Degrees {
    fn from(deg: f64) -> Self {
        Degrees(deg)
    }
}

// ============================================================================
// Display
// ============================================================================

impl std::fmt::Display for Inches {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4} in", self.0)
    }
}

impl std::fmt::Display for Pounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} lb", self.0)
    }
}

impl std::fmt::Display for PoundsPerInch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} lb/in", self.0)
    }
}

impl std::fmt::Display for Psi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0} psi", self.0)
    }
}

impl std::fmt::Display for Ksi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} ksi", self.0)
    }
}

impl std::fmt::Display for Degrees {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.0)
    }
}
