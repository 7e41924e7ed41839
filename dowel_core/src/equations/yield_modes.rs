//! # Yield Limit Equations
//!
//! The six NDS yield modes for a single dowel-type fastener (NDS 12.3.1,
//! Table 12.3.1A) together with the intermediate ratios and coefficients
//! they depend on.
//!
//! ## Notation
//!
//! - `D` = Effective dowel diameter (in)
//! - `ℓm`, `ℓs` = Main / side member dowel bearing length (in)
//! - `Fem`, `Fes` = Main / side member dowel bearing strength (psi)
//! - `Fyb` = Dowel bending yield strength (psi)
//! - `Re = Fem / Fes`, `Rt = ℓm / ℓs`
//! - `Rd` = Reduction term (NDS Table 12.3.1B)
//!
//! ## Yield Modes
//!
//! ```text
//! Im    Z = D ℓm Fem / Rd                       main member bearing
//! Is    Z = D ℓs Fes / Rd                       side member bearing
//! II    Z = k1 D ℓs Fes / Rd                    dowel rotation
//! IIIm  Z = k2 D ℓm Fem / ((1 + 2Re) Rd)        one hinge, main member crushing
//! IIIs  Z = k3 D ℓs Fem / ((2 + Re) Rd)         one hinge, side member crushing
//! IV    Z = D² √(2 Fem Fyb / (3 (1 + Re))) / Rd two hinges
//! ```
//!
//! Every radicand is checked; a negative one is reported as a
//! [`CalcError::DomainError`] naming the coefficient and mode rather than
//! propagating NaN.

use serde::{Deserialize, Serialize};

use crate::equations::bearing::check_load_angle;
use crate::errors::{CalcError, CalcResult};
use crate::units::Degrees;

/// Effective diameter at or below which KD = 2.2 (in)
pub const KD_CONSTANT_LIMIT_IN: f64 = 0.17;

/// Effective diameter below which Rd = KD (in)
pub const RD_DIAMETER_LIMIT_IN: f64 = 0.25;

/// The six yield modes of a dowel connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YieldMode {
    /// Bearing in the main member
    Im,
    /// Bearing in the side member
    Is,
    /// Dowel rotation without bending
    II,
    /// Plastic hinge in the dowel, crushing in the main member
    IIIm,
    /// Plastic hinge in the dowel, crushing in the side member
    IIIs,
    /// Two plastic hinges in the dowel
    IV,
}

impl YieldMode {
    /// All yield modes, in NDS table order
    pub const ALL: [YieldMode; 6] = [
        YieldMode::Im,
        YieldMode::Is,
        YieldMode::II,
        YieldMode::IIIm,
        YieldMode::IIIs,
        YieldMode::IV,
    ];

    /// Mode-specific constant multiplied by Kθ in the reduction term
    pub fn rd_baseline(&self) -> f64 {
        match self {
            YieldMode::Im | YieldMode::Is => 4.0,
            YieldMode::II => 3.6,
            YieldMode::IIIm | YieldMode::IIIs | YieldMode::IV => 3.2,
        }
    }

    /// Short label (e.g., "IIIs")
    pub fn label(&self) -> &'static str {
        match self {
            YieldMode::Im => "Im",
            YieldMode::Is => "Is",
            YieldMode::II => "II",
            YieldMode::IIIm => "IIIm",
            YieldMode::IIIs => "IIIs",
            YieldMode::IV => "IV",
        }
    }

    /// Description of the failure mechanism
    pub fn description(&self) -> &'static str {
        match self {
            YieldMode::Im => "Main member bearing",
            YieldMode::Is => "Side member bearing",
            YieldMode::II => "Fastener rotation",
            YieldMode::IIIm => "Fastener hinge, main member crushing",
            YieldMode::IIIs => "Fastener hinge, side member crushing",
            YieldMode::IV => "Two fastener hinges",
        }
    }
}

impl std::fmt::Display for YieldMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// =============================================================================
// Angle and diameter constants
// =============================================================================

/// Diameter constant KD
///
/// ```text
/// D ≤ 0.17":  KD = 2.2
/// D > 0.17":  KD = 10 D + 0.5
/// ```
#[inline]
pub fn kd(deff_in: f64) -> f64 {
    if deff_in <= KD_CONSTANT_LIMIT_IN {
        2.2
    } else {
        10.0 * deff_in + 0.5
    }
}

/// Angle constant Kθ = 1 + 0.25 (θ / 90)
#[inline]
pub fn k_theta(theta: Degrees) -> f64 {
    1.0 + 0.25 * (theta.0 / 90.0)
}

/// Reduction term Rd (NDS Table 12.3.1B)
///
/// Below a quarter inch Rd = KD regardless of angle and mode; otherwise
/// Rd = Kθ × baseline.
#[inline]
pub fn reduction_term(deff_in: f64, theta: Degrees, baseline: f64) -> f64 {
    if deff_in < RD_DIAMETER_LIMIT_IN {
        kd(deff_in)
    } else {
        k_theta(theta) * baseline
    }
}

fn checked_sqrt(quantity: &str, radicand: f64) -> CalcResult<f64> {
    if radicand.is_nan() || radicand < 0.0 || radicand.is_infinite() {
        return Err(CalcError::domain_error(
            quantity,
            format!("square root of {} is undefined", radicand),
        ));
    }
    Ok(radicand.sqrt())
}

// =============================================================================
// Nonlinear coefficients
// =============================================================================

/// Coefficient k1 (mode II)
///
/// ```text
/// k1 = [√(Re + 2Re²(1 + Rt + Rt²) + Rt²Re³) − Re(1 + Rt)] / (1 + Re)
/// ```
pub fn k1(re: f64, rt: f64) -> CalcResult<f64> {
    let radicand = re + 2.0 * re.powi(2) * (1.0 + rt + rt.powi(2)) + rt.powi(2) * re.powi(3);
    let root = checked_sqrt("K1", radicand)?;
    Ok((root - re * (1.0 + rt)) / (1.0 + re))
}

/// Coefficient k2 (mode IIIm)
///
/// ```text
/// k2 = −1 + √(2(1 + Re) + 2 Fyb (1 + 2Re) D² / (3 Fem ℓm²))
/// ```
pub fn k2(re: f64, fyb_psi: f64, deff_in: f64, fem_psi: f64, lm_in: f64) -> CalcResult<f64> {
    let radicand = 2.0 * (1.0 + re)
        + (2.0 * fyb_psi * (1.0 + 2.0 * re) * deff_in.powi(2)) / (3.0 * fem_psi * lm_in.powi(2));
    Ok(checked_sqrt("K2", radicand)? - 1.0)
}

/// Coefficient k3 (mode IIIs)
///
/// ```text
/// k3 = −1 + √(2(1 + Re)/Re + 2 Fyb (2 + Re) D² / (3 Fem ℓs²))
/// ```
pub fn k3(re: f64, fyb_psi: f64, deff_in: f64, fem_psi: f64, ls_in: f64) -> CalcResult<f64> {
    if re == 0.0 {
        return Err(CalcError::domain_error("K3", "Re is zero"));
    }
    let radicand = 2.0 * (1.0 + re) / re
        + (2.0 * fyb_psi * (2.0 + re) * deff_in.powi(2)) / (3.0 * fem_psi * ls_in.powi(2));
    Ok(checked_sqrt("K3", radicand)? - 1.0)
}

// =============================================================================
// Evaluator
// =============================================================================

/// Yield limit evaluation of one connection at one load angle.
///
/// Holds the angle-specific bearing strengths alongside the fixed geometry;
/// every accessor is a pure function of those fields, so modes are
/// evaluated lazily and only on request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YieldModeEvaluator {
    deff_in: f64,
    lm_in: f64,
    ls_in: f64,
    fyb_psi: f64,
    fem_psi: f64,
    fes_psi: f64,
    theta: Degrees,
}

impl YieldModeEvaluator {
    /// Create an evaluator from resolved bearing strengths.
    ///
    /// Fails with a `DomainError` if Re is undefined or zero, or θ is
    /// outside 0°–90°.
    pub fn new(
        deff_in: f64,
        lm_in: f64,
        ls_in: f64,
        fyb_psi: f64,
        fem_psi: f64,
        fes_psi: f64,
        theta: Degrees,
    ) -> CalcResult<Self> {
        check_load_angle(theta)?;
        if !(fes_psi.is_finite() && fes_psi > 0.0) {
            return Err(CalcError::domain_error(
                "RE",
                format!("side member bearing strength must be positive, got {}", fes_psi),
            ));
        }
        if !(fem_psi.is_finite() && fem_psi > 0.0) {
            return Err(CalcError::domain_error(
                "RE",
                format!("main member bearing strength must be positive, got {}", fem_psi),
            ));
        }
        Ok(Self {
            deff_in,
            lm_in,
            ls_in,
            fyb_psi,
            fem_psi,
            fes_psi,
            theta,
        })
    }

    /// Load angle this evaluator was built for
    pub fn theta(&self) -> Degrees {
        self.theta
    }

    /// Main member bearing strength Fem (psi)
    pub fn fem(&self) -> f64 {
        self.fem_psi
    }

    /// Side member bearing strength Fes (psi)
    pub fn fes(&self) -> f64 {
        self.fes_psi
    }

    /// Re = Fem / Fes
    pub fn re(&self) -> f64 {
        self.fem_psi / self.fes_psi
    }

    /// Rt = ℓm / ℓs
    pub fn rt(&self) -> f64 {
        self.lm_in / self.ls_in
    }

    pub fn kd(&self) -> f64 {
        kd(self.deff_in)
    }

    pub fn k_theta(&self) -> f64 {
        k_theta(self.theta)
    }

    /// Rd for a given mode baseline
    pub fn rd(&self, baseline: f64) -> f64 {
        reduction_term(self.deff_in, self.theta, baseline)
    }

    pub fn k1(&self) -> CalcResult<f64> {
        k1(self.re(), self.rt())
    }

    pub fn k2(&self) -> CalcResult<f64> {
        k2(self.re(), self.fyb_psi, self.deff_in, self.fem_psi, self.lm_in)
    }

    pub fn k3(&self) -> CalcResult<f64> {
        k3(self.re(), self.fyb_psi, self.deff_in, self.fem_psi, self.ls_in)
    }

    /// Lateral design value Z (lb) for a single yield mode.
    ///
    /// Domain errors raised while evaluating are tagged with the mode.
    pub fn capacity(&self, mode: YieldMode) -> CalcResult<f64> {
        let z = self.evaluate(mode).map_err(|e| e.in_mode(mode.label()))?;
        tracing::trace!(mode = %mode, theta = self.theta.0, z_lb = z, "yield mode capacity");
        Ok(z)
    }

    fn evaluate(&self, mode: YieldMode) -> CalcResult<f64> {
        let d = self.deff_in;
        let re = self.re();
        let rd = self.rd(mode.rd_baseline());

        let z = match mode {
            YieldMode::Im => d * self.lm_in * self.fem_psi / rd,
            YieldMode::Is => d * self.ls_in * self.fes_psi / rd,
            YieldMode::II => self.k1()? * d * self.ls_in * self.fes_psi / rd,
            YieldMode::IIIm => {
                self.k2()? * d * self.lm_in * self.fem_psi / ((1.0 + 2.0 * re) * rd)
            }
            YieldMode::IIIs => {
                self.k3()? * d * self.ls_in * self.fem_psi / ((2.0 + re) * rd)
            }
            YieldMode::IV => {
                let root = checked_sqrt("ZIV", 2.0 * self.fem_psi * self.fyb_psi / (3.0 * (1.0 + re)))?;
                root * d.powi(2) / rd
            }
        };

        if !z.is_finite() {
            return Err(CalcError::domain_error(
                format!("Z{}", mode.label()),
                format!("capacity evaluated to {}", z),
            ));
        }
        Ok(z)
    }
}
