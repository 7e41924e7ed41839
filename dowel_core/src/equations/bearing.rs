//! # Dowel Bearing Strength
//!
//! Dowel bearing strength Fe of a wood member per NDS Table 12.3.3 footnotes
//! and the Hankinson formula (NDS Appendix J).
//!
//! ## Notation
//!
//! - `G` = Specific gravity of the member
//! - `D` = Dowel diameter (in)
//! - `θ` = Load angle to grain (0° parallel, 90° perpendicular)
//! - `Fe∥` = Bearing strength parallel to grain (psi)
//! - `Fe⟂` = Bearing strength perpendicular to grain (psi)
//!
//! ## Formulas
//!
//! ```text
//! D < 1/4":   Fe = 16600 G^1.84                       (angle independent)
//! D ≥ 1/4":   Fe∥ = 11200 G
//!             Fe⟂ = 6100 G^1.45 / √D
//!             Feθ = Fe∥ Fe⟂ / (Fe∥ sin²θ + Fe⟂ cos²θ)
//! ```
//!
//! Non-wood members (steel side plates, etc.) carry a direct bearing strength
//! instead of a specific gravity; see [`MemberBearing`].

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{Degrees, Psi};

/// Diameter below which the small-fastener bearing equation applies (in)
pub const SMALL_DIAMETER_LIMIT_IN: f64 = 0.25;

/// Bearing strength for small-diameter fasteners, Fe = 16600 G^1.84
///
/// # Example
/// ```rust
/// use dowel_core::equations::bearing::small_diameter_bearing_strength;
///
/// let fe = small_diameter_bearing_strength(0.5);
/// assert!((fe - 4636.7).abs() < 1.0);
/// ```
#[inline]
pub fn small_diameter_bearing_strength(g: f64) -> f64 {
    16600.0 * g.powf(1.84)
}

/// Bearing strength parallel to grain, Fe∥ = 11200 G
#[inline]
pub fn parallel_bearing_strength(g: f64) -> f64 {
    11200.0 * g
}

/// Bearing strength perpendicular to grain, Fe⟂ = 6100 G^1.45 / √D
#[inline]
pub fn perpendicular_bearing_strength(diameter_in: f64, g: f64) -> f64 {
    6100.0 * g.powf(1.45) / diameter_in.sqrt()
}

/// Dowel bearing strength of a wood member at a load angle to grain.
///
/// At exactly 0° and 90° (mod 180°) the end values Fe∥ and Fe⟂ are returned
/// as-is so the interpolation never perturbs them.
///
/// # Arguments
/// * `diameter_in` - Dowel diameter (in)
/// * `g` - Specific gravity
/// * `theta` - Load angle to grain
///
/// # Errors
/// `DomainError` if `G ≤ 0`, `D ≤ 0`, either is non-finite, θ is outside
/// 0°–90°, or the interpolation denominator is not positive.
///
/// # Example
/// ```rust
/// use dowel_core::equations::bearing::dowel_bearing_strength;
/// use dowel_core::units::Degrees;
///
/// // 1/2" dowel in G = 0.50 wood, load perpendicular to grain
/// let fe = dowel_bearing_strength(0.5, 0.5, Degrees(90.0)).unwrap();
/// assert!((fe - 3157.6).abs() < 0.5);
/// ```
pub fn dowel_bearing_strength(diameter_in: f64, g: f64, theta: Degrees) -> CalcResult<f64> {
    if !(g.is_finite() && g > 0.0) {
        return Err(CalcError::domain_error(
            "Fe",
            format!("specific gravity must be positive and finite, got {}", g),
        ));
    }
    if !(diameter_in.is_finite() && diameter_in > 0.0) {
        return Err(CalcError::domain_error(
            "Fe",
            format!("diameter must be positive and finite, got {}", diameter_in),
        ));
    }
    check_load_angle(theta)?;

    if diameter_in < SMALL_DIAMETER_LIMIT_IN {
        return Ok(small_diameter_bearing_strength(g));
    }

    let fe_par = parallel_bearing_strength(g);
    let fe_perp = perpendicular_bearing_strength(diameter_in, g);

    if theta.0 == 0.0 {
        return Ok(fe_par);
    }
    if theta.0 == 90.0 {
        return Ok(fe_perp);
    }

    let rad = theta.to_radians();
    let denom = fe_par * rad.sin().powi(2) + fe_perp * rad.cos().powi(2);
    if !(denom.is_finite() && denom > 0.0) {
        return Err(CalcError::domain_error(
            "Fe",
            format!("Hankinson denominator is {} at {}", denom, theta),
        ));
    }

    Ok(fe_par * fe_perp / denom)
}

/// The yield limit equations are calibrated for 0° ≤ θ ≤ 90°.
pub(crate) fn check_load_angle(theta: Degrees) -> CalcResult<()> {
    if !(theta.0.is_finite() && (0.0..=90.0).contains(&theta.0)) {
        return Err(CalcError::domain_error(
            "theta",
            format!("load angle to grain must be within 0..=90 degrees, got {}", theta.0),
        ));
    }
    Ok(())
}

/// Source of a member's dowel bearing strength.
///
/// ## JSON
///
/// ```json
/// { "gravity": 0.50 }
/// { "override": 87000.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberBearing {
    /// Wood member: Fe is derived from specific gravity
    Gravity(f64),
    /// Non-wood member: Fe is given directly (psi)
    Override(f64),
}

impl MemberBearing {
    /// Bearing strength of this member for a dowel of `diameter_in` at `theta`.
    ///
    /// Override members return their stress at every angle.
    pub fn bearing_strength(&self, diameter_in: f64, theta: Degrees) -> CalcResult<f64> {
        match *self {
            MemberBearing::Gravity(g) => dowel_bearing_strength(diameter_in, g, theta),
            MemberBearing::Override(fe_psi) => {
                check_load_angle(theta)?;
                Ok(fe_psi)
            }
        }
    }

    /// Bearing strength as a typed unit
    pub fn fe(&self, diameter_in: f64, theta: Degrees) -> CalcResult<Psi> {
        self.bearing_strength(diameter_in, theta).map(Psi)
    }

    /// Specific gravity, if this is a wood member
    pub fn specific_gravity(&self) -> Option<f64> {
        match *self {
            MemberBearing::Gravity(g) => Some(g),
            MemberBearing::Override(_) => None,
        }
    }

    /// True if the bearing strength is supplied directly
    pub fn is_override(&self) -> bool {
        matches!(self, MemberBearing::Override(_))
    }
}

impl std::fmt::Display for MemberBearing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemberBearing::Gravity(g) => write!(f, "G = {:.2}", g),
            MemberBearing::Override(fe) => write!(f, "Fe = {}", Psi(*fe)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, rel: f64) -> bool {
        (a - b).abs() <= rel * b.abs()
    }

    #[test]
    fn test_perpendicular_half_inch() {
        // Fe⟂ = 6100 × 0.5^1.45 / √0.5 = 3157.6 psi
        let fe = dowel_bearing_strength(0.5, 0.5, Degrees(90.0)).unwrap();
        assert!(approx_eq(fe, 3157.6, 0.001));
    }

    #[test]
    fn test_parallel_is_exact() {
        let fe = dowel_bearing_strength(0.75, 0.55, Degrees::PARALLEL).unwrap();
        assert_eq!(fe, 11200.0 * 0.55);
    }

    #[test]
    fn test_perpendicular_is_exact() {
        let fe = dowel_bearing_strength(0.75, 0.55, Degrees::PERPENDICULAR).unwrap();
        assert_eq!(fe, 6100.0 * 0.55_f64.powf(1.45) / 0.75_f64.sqrt());
    }

    #[test]
    fn test_hankinson_between_end_values() {
        let par = dowel_bearing_strength(0.5, 0.5, Degrees(0.0)).unwrap();
        let perp = dowel_bearing_strength(0.5, 0.5, Degrees(90.0)).unwrap();
        let mid = dowel_bearing_strength(0.5, 0.5, Degrees(45.0)).unwrap();
        assert!(mid < par && mid > perp);
        // At 45°, sin² = cos² = 1/2 so Feθ is the harmonic mean
        let harmonic = 2.0 * par * perp / (par + perp);
        assert!(approx_eq(mid, harmonic, 1e-12));
    }

    #[test]
    fn test_small_diameter_ignores_angle() {
        let a = dowel_bearing_strength(0.148, 0.5, Degrees(0.0)).unwrap();
        let b = dowel_bearing_strength(0.148, 0.5, Degrees(90.0)).unwrap();
        assert_eq!(a, b);
        assert!(approx_eq(a, 16600.0 * 0.5_f64.powf(1.84), 1e-12));
    }

    #[test]
    fn test_quarter_inch_uses_hankinson() {
        // D = 0.25 is not "small"
        let fe = dowel_bearing_strength(0.25, 0.5, Degrees(0.0)).unwrap();
        assert_eq!(fe, 5600.0);
    }

    #[test]
    fn test_invalid_gravity() {
        let err = dowel_bearing_strength(0.5, 0.0, Degrees(90.0)).unwrap_err();
        assert_eq!(err.error_code(), "DOMAIN_ERROR");
        assert!(dowel_bearing_strength(0.5, -0.4, Degrees(90.0)).is_err());
        assert!(dowel_bearing_strength(0.5, f64::NAN, Degrees(90.0)).is_err());
    }

    #[test]
    fn test_invalid_diameter() {
        assert!(dowel_bearing_strength(0.0, 0.5, Degrees(90.0)).is_err());
        assert!(dowel_bearing_strength(-0.5, 0.5, Degrees(90.0)).is_err());
    }

    #[test]
    fn test_invalid_angle() {
        assert!(dowel_bearing_strength(0.5, 0.5, Degrees(95.0)).is_err());
        assert!(dowel_bearing_strength(0.5, 0.5, Degrees(-1.0)).is_err());
        assert!(dowel_bearing_strength(0.5, 0.5, Degrees(f64::INFINITY)).is_err());
    }

    #[test]
    fn test_override_ignores_angle() {
        let steel = MemberBearing::Override(87_000.0);
        assert_eq!(steel.bearing_strength(0.5, Degrees(0.0)).unwrap(), 87_000.0);
        assert_eq!(steel.bearing_strength(0.5, Degrees(90.0)).unwrap(), 87_000.0);
        assert_eq!(steel.specific_gravity(), None);
        assert!(steel.is_override());
    }

    #[test]
    fn test_gravity_member() {
        let wood = MemberBearing::Gravity(0.5);
        let fe = wood.fe(0.5, Degrees(90.0)).unwrap();
        assert!(approx_eq(fe.0, 3157.6, 0.001));
        assert_eq!(wood.specific_gravity(), Some(0.5));
    }

    #[test]
    fn test_member_bearing_json() {
        let json = serde_json::to_string(&MemberBearing::Override(87_000.0)).unwrap();
        assert_eq!(json, r#"{"override":87000.0}"#);
        let parsed: MemberBearing = serde_json::from_str(r#"{"gravity":0.5}"#).unwrap();
        assert_eq!(parsed, MemberBearing::Gravity(0.5));
    }
}
