//! # Dowel Connection Calculation
//!
//! Reference lateral design value Z of a single dowel-type fastener (bolt,
//! lag screw, pin) per the NDS yield limit equations.
//!
//! ## Assumptions
//!
//! - Reference conditions only: no C_D, C_M, C_t, C_g or C_Δ adjustment
//! - One fastener; no group action, spacing, or net section checks
//! - Single shear: one side member, all six yield modes
//! - Double shear: two identical side members, modes Im, Is, IIIs, IV
//!
//! ## Example
//!
//! ```rust
//! use dowel_core::calculations::connection::{DowelConnection, DowelConnectionInput};
//!
//! // 1/2" full diameter dowel through two 1.5" G = 0.50 members
//! let input = DowelConnectionInput::with_defaults(0.5);
//! let connection = DowelConnection::new(&input).unwrap();
//!
//! let z = connection.capacity(90.0).unwrap();
//! assert!((z - 218.0).abs() < 1.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::bearing::MemberBearing;
use crate::equations::yield_modes::{YieldMode, YieldModeEvaluator};
use crate::errors::{CalcError, CalcResult};
use crate::units::{Degrees, Inches, Pounds, PoundsPerInch, Psi};

/// Default specific gravity for either member (Douglas Fir-Larch)
pub const DEFAULT_SPECIFIC_GRAVITY: f64 = 0.50;
/// Default dowel bending yield strength (psi)
pub const DEFAULT_FYB_PSI: f64 = 45_000.0;
/// Default member thickness (in), a nominal 2x
pub const DEFAULT_THICKNESS_IN: f64 = 1.50;

const SINGLE_SHEAR_MODES: [(YieldMode, f64); 6] = [
    (YieldMode::Im, 1.0),
    (YieldMode::Is, 1.0),
    (YieldMode::II, 1.0),
    (YieldMode::IIIm, 1.0),
    (YieldMode::IIIs, 1.0),
    (YieldMode::IV, 1.0),
];

// Modes II and IIIm cannot develop when the main member is loaded
// symmetrically by two side members.
const DOUBLE_SHEAR_MODES: [(YieldMode, f64); 4] = [
    (YieldMode::Im, 1.0),
    (YieldMode::Is, 2.0),
    (YieldMode::IIIs, 2.0),
    (YieldMode::IV, 2.0),
];

/// Input parameters for a dowel connection.
///
/// Every field maps one-to-one onto the connection model; a member's
/// specific gravity is only required when no bearing override is given.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Ledger bolt",
///   "d_in": 0.5,
///   "dr_in": 0.406,
///   "lm_in": 3.5,
///   "ls_in": 1.5,
///   "gm": 0.5,
///   "gs": 0.5,
///   "fyb_psi": 45000.0,
///   "full_diameter": true,
///   "double_shear": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DowelConnectionInput {
    /// User label for this connection (e.g., "C-1", "Ledger bolt")
    #[serde(default)]
    pub label: String,

    /// Nominal (outer) dowel diameter in inches
    pub d_in: f64,

    /// Root (reduced) diameter in inches; absent means full diameter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dr_in: Option<f64>,

    /// Main member dowel bearing length in inches
    pub lm_in: f64,

    /// Side member dowel bearing length in inches
    pub ls_in: f64,

    /// Main member specific gravity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gm: Option<f64>,

    /// Side member specific gravity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gs: Option<f64>,

    /// Main member bearing strength override in psi (non-wood members)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fe_main_psi: Option<f64>,

    /// Side member bearing strength override in psi (non-wood members)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fe_side_psi: Option<f64>,

    /// Dowel bending yield strength Fyb in psi
    pub fyb_psi: f64,

    /// Threaded penetration into the main member in inches; defaults to lm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pt_in: Option<f64>,

    /// Unit withdrawal design value in lb per inch of penetration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w_lb_per_in: Option<f64>,

    /// Dowel bears on wood at its full outer diameter
    #[serde(default)]
    pub full_diameter: bool,

    /// Two side members share one main member
    #[serde(default)]
    pub double_shear: bool,
}

impl DowelConnectionInput {
    /// Convenience input with the documented defaults:
    /// G = 0.50 for both members, Fyb = 45,000 psi, ℓm = ℓs = 1.5 in.
    pub fn with_defaults(d_in: f64) -> Self {
        Self {
            label: String::new(),
            d_in,
            dr_in: None,
            lm_in: DEFAULT_THICKNESS_IN,
            ls_in: DEFAULT_THICKNESS_IN,
            gm: Some(DEFAULT_SPECIFIC_GRAVITY),
            gs: Some(DEFAULT_SPECIFIC_GRAVITY),
            fe_main_psi: None,
            fe_side_psi: None,
            fyb_psi: DEFAULT_FYB_PSI,
            pt_in: None,
            w_lb_per_in: None,
            full_diameter: false,
            double_shear: false,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_root_diameter(mut self, dr_in: f64) -> Self {
        self.dr_in = Some(dr_in);
        self
    }

    pub fn with_thicknesses(mut self, lm_in: f64, ls_in: f64) -> Self {
        self.lm_in = lm_in;
        self.ls_in = ls_in;
        self
    }

    /// Set the main member bearing source
    pub fn with_main_bearing(mut self, bearing: MemberBearing) -> Self {
        match bearing {
            MemberBearing::Gravity(g) => {
                self.gm = Some(g);
                self.fe_main_psi = None;
            }
            MemberBearing::Override(fe) => self.fe_main_psi = Some(fe),
        }
        self
    }

    /// Set the side member bearing source
    pub fn with_side_bearing(mut self, bearing: MemberBearing) -> Self {
        match bearing {
            MemberBearing::Gravity(g) => {
                self.gs = Some(g);
                self.fe_side_psi = None;
            }
            MemberBearing::Override(fe) => self.fe_side_psi = Some(fe),
        }
        self
    }

    pub fn with_fyb(mut self, fyb_psi: f64) -> Self {
        self.fyb_psi = fyb_psi;
        self
    }

    pub fn with_threaded_penetration(mut self, pt_in: f64) -> Self {
        self.pt_in = Some(pt_in);
        self
    }

    pub fn with_withdrawal(mut self, w_lb_per_in: f64) -> Self {
        self.w_lb_per_in = Some(w_lb_per_in);
        self
    }

    pub fn with_full_diameter(mut self, full_diameter: bool) -> Self {
        self.full_diameter = full_diameter;
        self
    }

    pub fn with_double_shear(mut self, double_shear: bool) -> Self {
        self.double_shear = double_shear;
        self
    }

    /// Validate and build the connection
    pub fn build(&self) -> CalcResult<DowelConnection> {
        DowelConnection::new(self)
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("d_in", self.d_in, "Dowel diameter must be positive")?;
        if let Some(dr) = self.dr_in {
            require_positive("dr_in", dr, "Root diameter must be positive")?;
            if dr > self.d_in {
                return Err(CalcError::invalid_input(
                    "dr_in",
                    dr.to_string(),
                    format!("Root diameter cannot exceed the nominal diameter ({})", self.d_in),
                ));
            }
        }
        require_positive("lm_in", self.lm_in, "Main member length must be positive")?;
        require_positive("ls_in", self.ls_in, "Side member length must be positive")?;
        require_positive("fyb_psi", self.fyb_psi, "Bending yield strength must be positive")?;
        if let Some(pt) = self.pt_in {
            require_positive("pt_in", pt, "Threaded penetration must be positive")?;
        }
        if let Some(w) = self.w_lb_per_in {
            require_positive("w_lb_per_in", w, "Withdrawal design value must be positive")?;
        }
        self.main_bearing()?;
        self.side_bearing()?;
        Ok(())
    }

    fn main_bearing(&self) -> CalcResult<MemberBearing> {
        member_bearing("gm", self.gm, "fe_main_psi", self.fe_main_psi)
    }

    fn side_bearing(&self) -> CalcResult<MemberBearing> {
        member_bearing("gs", self.gs, "fe_side_psi", self.fe_side_psi)
    }
}

fn require_positive(field: &str, value: f64, reason: &str) -> CalcResult<()> {
    if !(value.is_finite() && value > 0.0) {
        return Err(CalcError::invalid_input(field, value.to_string(), reason));
    }
    Ok(())
}

/// An override wins over a specific gravity; the gravity is then ignored.
fn member_bearing(
    g_field: &str,
    g: Option<f64>,
    fe_field: &str,
    fe: Option<f64>,
) -> CalcResult<MemberBearing> {
    match (fe, g) {
        (Some(fe), _) => {
            require_positive(fe_field, fe, "Bearing strength override must be positive")?;
            Ok(MemberBearing::Override(fe))
        }
        (None, Some(g)) => {
            require_positive(g_field, g, "Specific gravity must be positive")?;
            Ok(MemberBearing::Gravity(g))
        }
        (None, None) => Err(CalcError::missing_field(g_field)),
    }
}

/// Shear configuration of a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShearConfiguration {
    Single,
    Double,
}

impl std::fmt::Display for ShearConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShearConfiguration::Single => write!(f, "Single shear"),
            ShearConfiguration::Double => write!(f, "Double shear"),
        }
    }
}

/// A validated, immutable dowel connection.
///
/// Construction validates every parameter once; all capacity queries are
/// pure and recompute from the stored parameters, so repeated calls return
/// bit-identical values and an instance can be shared freely across threads.
///
/// Deserializing goes through [`DowelConnectionInput`] and is validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DowelConnectionInput", into = "DowelConnectionInput")]
pub struct DowelConnection {
    label: String,
    d_in: f64,
    dr_in: Option<f64>,
    lm_in: f64,
    ls_in: f64,
    main: MemberBearing,
    side: MemberBearing,
    fyb_psi: f64,
    pt_in: f64,
    w_lb_per_in: Option<f64>,
    full_diameter: bool,
    double_shear: bool,
}

impl DowelConnection {
    /// Validate `input` and build the connection.
    ///
    /// # Errors
    /// `InvalidInput` or `MissingField` for any violated invariant.
    pub fn new(input: &DowelConnectionInput) -> CalcResult<Self> {
        input.validate()?;

        Ok(Self {
            label: input.label.clone(),
            d_in: input.d_in,
            dr_in: input.dr_in,
            lm_in: input.lm_in,
            ls_in: input.ls_in,
            main: input.main_bearing()?,
            side: input.side_bearing()?,
            fyb_psi: input.fyb_psi,
            pt_in: input.pt_in.unwrap_or(input.lm_in),
            w_lb_per_in: input.w_lb_per_in,
            full_diameter: input.full_diameter || input.dr_in.is_none(),
            double_shear: input.double_shear,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Nominal diameter D (in)
    pub fn diameter(&self) -> Inches {
        Inches(self.d_in)
    }

    /// Root diameter Dr (in); equals D when none was given
    pub fn root_diameter(&self) -> Inches {
        Inches(self.dr_in.unwrap_or(self.d_in))
    }

    /// Diameter engaged in bearing: D for full diameter, Dr otherwise
    pub fn effective_diameter(&self) -> f64 {
        if self.full_diameter {
            self.d_in
        } else {
            self.dr_in.unwrap_or(self.d_in)
        }
    }

    pub fn main_length(&self) -> Inches {
        Inches(self.lm_in)
    }

    pub fn side_length(&self) -> Inches {
        Inches(self.ls_in)
    }

    pub fn threaded_penetration(&self) -> Inches {
        Inches(self.pt_in)
    }

    pub fn fyb(&self) -> Psi {
        Psi(self.fyb_psi)
    }

    pub fn main_bearing(&self) -> MemberBearing {
        self.main
    }

    pub fn side_bearing(&self) -> MemberBearing {
        self.side
    }

    pub fn is_full_diameter(&self) -> bool {
        self.full_diameter
    }

    pub fn is_double_shear(&self) -> bool {
        self.double_shear
    }

    pub fn shear_configuration(&self) -> ShearConfiguration {
        if self.double_shear {
            ShearConfiguration::Double
        } else {
            ShearConfiguration::Single
        }
    }

    /// Yield modes that participate in the governing capacity, with the
    /// multiplier applied to each.
    pub fn participating_modes(&self) -> &'static [(YieldMode, f64)] {
        if self.double_shear {
            &DOUBLE_SHEAR_MODES
        } else {
            &SINGLE_SHEAR_MODES
        }
    }

    /// Main member bearing strength Fem at `theta` (psi).
    ///
    /// Wood bearing strength is keyed on the nominal diameter.
    pub fn main_bearing_strength(&self, theta: impl Into<Degrees>) -> CalcResult<f64> {
        self.main.bearing_strength(self.d_in, theta.into())
    }

    /// Side member bearing strength Fes at `theta` (psi)
    pub fn side_bearing_strength(&self, theta: impl Into<Degrees>) -> CalcResult<f64> {
        self.side.bearing_strength(self.d_in, theta.into())
    }

    /// Yield mode evaluator for this connection at `theta`
    pub fn evaluator(&self, theta: impl Into<Degrees>) -> CalcResult<YieldModeEvaluator> {
        let theta = theta.into();
        let fem = self
            .main_bearing_strength(theta)
            .map_err(|e| relabel_bearing(e, "Fem"))?;
        let fes = self
            .side_bearing_strength(theta)
            .map_err(|e| relabel_bearing(e, "Fes"))?;

        YieldModeEvaluator::new(
            self.effective_diameter(),
            self.lm_in,
            self.ls_in,
            self.fyb_psi,
            fem,
            fes,
            theta,
        )
    }

    /// Unscaled lateral design value of a single yield mode (lb)
    pub fn mode_capacity(&self, mode: YieldMode, theta: impl Into<Degrees>) -> CalcResult<f64> {
        self.evaluator(theta)?.capacity(mode)
    }

    /// Reference lateral design value Z (lb) at load angle `theta`.
    ///
    /// ```text
    /// Single shear:  Z = min(Zim, Zis, Zii, Ziiim, Ziiis, Ziv)
    /// Double shear:  Z = min(Zim, 2 Zis, 2 Ziiis, 2 Ziv)
    /// ```
    ///
    /// In double shear modes II and IIIm are never evaluated, so they can
    /// neither govern nor fail the calculation.
    pub fn capacity(&self, theta: impl Into<Degrees>) -> CalcResult<f64> {
        let evaluator = self.evaluator(theta)?;
        let (_, governing) = self.evaluate_modes(&evaluator)?;
        Ok(governing.capacity_lb)
    }

    /// Reference lateral design value at the NDS reference angle (90°)
    pub fn capacity_default(&self) -> CalcResult<f64> {
        self.capacity(Degrees::default())
    }

    /// Full capacity report at `theta`: every participating mode, the
    /// governing one, and the intermediate terms.
    pub fn analyze(&self, theta: impl Into<Degrees>) -> CalcResult<CapacityResult> {
        let evaluator = self.evaluator(theta)?;
        let (modes, governing) = self.evaluate_modes(&evaluator)?;

        let uses = |mode: YieldMode| modes.iter().any(|m| m.mode == mode);
        let terms = IntermediateTerms {
            deff_in: self.effective_diameter(),
            fem_psi: evaluator.fem(),
            fes_psi: evaluator.fes(),
            re: evaluator.re(),
            rt: evaluator.rt(),
            kd: evaluator.kd(),
            k_theta: evaluator.k_theta(),
            k1: if uses(YieldMode::II) { Some(evaluator.k1()?) } else { None },
            k2: if uses(YieldMode::IIIm) { Some(evaluator.k2()?) } else { None },
            k3: if uses(YieldMode::IIIs) { Some(evaluator.k3()?) } else { None },
        };

        Ok(CapacityResult {
            label: self.label.clone(),
            theta_deg: evaluator.theta().0,
            shear: self.shear_configuration(),
            capacity_lb: governing.capacity_lb,
            governing_mode: governing.mode,
            modes,
            terms,
            withdrawal_lb: self.withdrawal_capacity().map(|p| p.0),
        })
    }

    fn evaluate_modes(
        &self,
        evaluator: &YieldModeEvaluator,
    ) -> CalcResult<(Vec<ModeCapacity>, ModeCapacity)> {
        let mut modes = Vec::with_capacity(self.participating_modes().len());
        for &(mode, multiplier) in self.participating_modes() {
            let z_lb = evaluator.capacity(mode)?;
            modes.push(ModeCapacity {
                mode,
                multiplier,
                z_lb,
                capacity_lb: multiplier * z_lb,
            });
        }

        // Ties keep the first mode in table order
        let governing = modes
            .iter()
            .copied()
            .reduce(|best, m| if m.capacity_lb < best.capacity_lb { m } else { best })
            .ok_or_else(|| CalcError::domain_error("Z", "no yield modes evaluated"))?;

        tracing::debug!(
            label = %self.label,
            shear = %self.shear_configuration(),
            theta = evaluator.theta().0,
            governing = %governing.mode,
            z_lb = governing.capacity_lb,
            "governing yield mode"
        );

        Ok((modes, governing))
    }

    /// Reference withdrawal design value W × ℓm (lb).
    ///
    /// `None` when no unit withdrawal value was given: withdrawal is not
    /// applicable, which is different from a capacity of zero.
    pub fn withdrawal_capacity(&self) -> Option<Pounds> {
        self.w_lb_per_in
            .map(|w| PoundsPerInch(w) * Inches(self.lm_in))
    }
}

fn relabel_bearing(err: CalcError, quantity: &str) -> CalcError {
    match err {
        CalcError::DomainError { mode, reason, .. } => CalcError::DomainError {
            quantity: quantity.to_string(),
            mode,
            reason,
        },
        other => other,
    }
}

impl TryFrom<DowelConnectionInput> for DowelConnection {
    type Error = CalcError;

    fn try_from(input: DowelConnectionInput) -> CalcResult<Self> {
        DowelConnection::new(&input)
    }
}

impl From<DowelConnection> for DowelConnectionInput {
    fn from(c: DowelConnection) -> Self {
        let (gm, fe_main_psi) = split_bearing(c.main);
        let (gs, fe_side_psi) = split_bearing(c.side);
        DowelConnectionInput {
            label: c.label,
            d_in: c.d_in,
            dr_in: c.dr_in,
            lm_in: c.lm_in,
            ls_in: c.ls_in,
            gm,
            gs,
            fe_main_psi,
            fe_side_psi,
            fyb_psi: c.fyb_psi,
            pt_in: Some(c.pt_in),
            w_lb_per_in: c.w_lb_per_in,
            full_diameter: c.full_diameter,
            double_shear: c.double_shear,
        }
    }
}

fn split_bearing(bearing: MemberBearing) -> (Option<f64>, Option<f64>) {
    match bearing {
        MemberBearing::Gravity(g) => (Some(g), None),
        MemberBearing::Override(fe) => (None, Some(fe)),
    }
}

/// Capacity of one yield mode as it enters the governing minimum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeCapacity {
    pub mode: YieldMode,
    /// 2 for side-member modes in double shear, otherwise 1
    pub multiplier: f64,
    /// Unscaled yield limit value (lb)
    pub z_lb: f64,
    /// multiplier × z_lb (lb)
    pub capacity_lb: f64,
}

/// Intermediate terms of the yield limit equations at one load angle.
///
/// k1-k3 are only present when a participating mode needs them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntermediateTerms {
    pub deff_in: f64,
    pub fem_psi: f64,
    pub fes_psi: f64,
    pub re: f64,
    pub rt: f64,
    pub kd: f64,
    pub k_theta: f64,
    pub k1: Option<f64>,
    pub k2: Option<f64>,
    pub k3: Option<f64>,
}

/// Results from a dowel connection calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "",
///   "theta_deg": 90.0,
///   "shear": "Single",
///   "capacity_lb": 218.0,
///   "governing_mode": "II",
///   "modes": [ { "mode": "Im", "multiplier": 1.0, "z_lb": 473.6, "capacity_lb": 473.6 } ],
///   "terms": { "deff_in": 0.5, "fem_psi": 3157.6, "re": 1.0 },
///   "withdrawal_lb": null
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityResult {
    pub label: String,
    pub theta_deg: f64,
    pub shear: ShearConfiguration,
    /// Governing reference lateral design value Z (lb)
    pub capacity_lb: f64,
    pub governing_mode: YieldMode,
    /// Every participating mode, in NDS table order
    pub modes: Vec<ModeCapacity>,
    pub terms: IntermediateTerms,
    /// Reference withdrawal design value (lb), when applicable
    pub withdrawal_lb: Option<f64>,
}

impl CapacityResult {
    /// Human-readable description of the governing mode
    pub fn governing_condition(&self) -> String {
        format!(
            "Mode {} ({})",
            self.governing_mode.label(),
            self.governing_mode.description()
        )
    }

    /// Capacity entry for `mode`, if it participated
    pub fn mode(&self, mode: YieldMode) -> Option<&ModeCapacity> {
        self.modes.iter().find(|m| m.mode == mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, rel: f64) -> bool {
        (a - b).abs() <= rel * b.abs()
    }

    fn half_inch() -> DowelConnectionInput {
        DowelConnectionInput::with_defaults(0.5)
    }

    #[test]
    fn test_single_shear_governed_by_mode_ii() {
        let conn = DowelConnection::new(&half_inch()).unwrap();
        let z = conn.capacity(90.0).unwrap();
        assert!(approx_eq(z, 218.0, 0.005));

        let result = conn.analyze(90.0).unwrap();
        assert_eq!(result.governing_mode, YieldMode::II);
        assert_eq!(result.modes.len(), 6);
        assert_eq!(result.capacity_lb, z);
    }

    #[test]
    fn test_double_shear_governed_by_mode_im() {
        let conn = half_inch().with_double_shear(true).build().unwrap();
        let z = conn.capacity(90.0).unwrap();
        assert!(approx_eq(z, 473.6, 0.005));

        let result = conn.analyze(90.0).unwrap();
        assert_eq!(result.governing_mode, YieldMode::Im);
        assert_eq!(result.shear, ShearConfiguration::Double);
    }

    #[test]
    fn test_double_shear_excludes_ii_and_iiim() {
        let conn = half_inch().with_double_shear(true).build().unwrap();
        let result = conn.analyze(90.0).unwrap();

        let modes: Vec<YieldMode> = result.modes.iter().map(|m| m.mode).collect();
        assert_eq!(modes, vec![YieldMode::Im, YieldMode::Is, YieldMode::IIIs, YieldMode::IV]);
        assert!(result.mode(YieldMode::II).is_none());
        assert!(result.terms.k1.is_none());
        assert!(result.terms.k2.is_none());

        // Zii alone (218 lb) would govern if it participated
        let zii = conn.mode_capacity(YieldMode::II, 90.0).unwrap();
        assert!(zii < result.capacity_lb);
    }

    #[test]
    fn test_double_shear_multipliers() {
        let conn = half_inch().with_double_shear(true).build().unwrap();
        let result = conn.analyze(90.0).unwrap();
        let zis = result.mode(YieldMode::Is).unwrap();
        assert_eq!(zis.multiplier, 2.0);
        assert_eq!(zis.capacity_lb, 2.0 * zis.z_lb);
        assert_eq!(result.mode(YieldMode::Im).unwrap().multiplier, 1.0);
    }

    #[test]
    fn test_default_angle() {
        let conn = half_inch().build().unwrap();
        assert_eq!(conn.capacity_default().unwrap(), conn.capacity(90.0).unwrap());
    }

    #[test]
    fn test_capacity_idempotent() {
        let conn = half_inch().build().unwrap();
        let a = conn.capacity(37.5).unwrap();
        let b = conn.capacity(37.5).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_capacity_depends_on_angle() {
        let conn = half_inch().build().unwrap();
        let z0 = conn.capacity(0.0).unwrap();
        let z90 = conn.capacity(90.0).unwrap();
        assert!(z0 > z90);
    }

    #[test]
    fn test_effective_diameter() {
        let full = half_inch().build().unwrap();
        assert!(full.is_full_diameter());
        assert_eq!(full.effective_diameter(), 0.5);

        let reduced = half_inch().with_root_diameter(0.406).build().unwrap();
        assert!(!reduced.is_full_diameter());
        assert_eq!(reduced.effective_diameter(), 0.406);

        let forced = half_inch()
            .with_root_diameter(0.406)
            .with_full_diameter(true)
            .build()
            .unwrap();
        assert_eq!(forced.effective_diameter(), 0.5);
    }

    #[test]
    fn test_reduced_diameter_lowers_capacity() {
        let full = half_inch().build().unwrap();
        let reduced = half_inch().with_root_diameter(0.406).build().unwrap();
        assert!(reduced.capacity(90.0).unwrap() < full.capacity(90.0).unwrap());
        // Bearing strength still uses the nominal diameter
        assert_eq!(
            reduced.main_bearing_strength(90.0).unwrap(),
            full.main_bearing_strength(90.0).unwrap()
        );
    }

    #[test]
    fn test_zero_side_thickness_rejected() {
        let err = half_inch().with_thicknesses(1.5, 0.0).build().unwrap_err();
        assert!(err.is_validation());
        match err {
            CalcError::InvalidInput { field, .. } => assert_eq!(field, "ls_in"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_root_diameter_larger_than_nominal_rejected() {
        let err = half_inch().with_root_diameter(0.6).build().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_missing_gravity_rejected() {
        let mut input = half_inch();
        input.gs = None;
        let err = input.build().unwrap_err();
        assert_eq!(err, CalcError::missing_field("gs"));
    }

    #[test]
    fn test_non_positive_values_rejected() {
        assert!(half_inch().with_fyb(0.0).build().is_err());
        assert!(DowelConnectionInput::with_defaults(-0.5).build().is_err());
        assert!(DowelConnectionInput::with_defaults(f64::NAN).build().is_err());
        assert!(half_inch().with_withdrawal(0.0).build().is_err());
        assert!(half_inch().with_threaded_penetration(-1.0).build().is_err());
        assert!(half_inch()
            .with_main_bearing(MemberBearing::Gravity(0.0))
            .build()
            .is_err());
    }

    #[test]
    fn test_override_skips_gravity() {
        let mut input = half_inch().with_side_bearing(MemberBearing::Override(87_000.0));
        input.gs = Some(-1.0);
        let conn = input.build().unwrap();
        assert_eq!(conn.side_bearing(), MemberBearing::Override(87_000.0));
        assert_eq!(conn.side_bearing_strength(0.0).unwrap(), 87_000.0);
        assert_eq!(conn.side_bearing_strength(90.0).unwrap(), 87_000.0);
    }

    #[test]
    fn test_steel_side_plate() {
        let wood = half_inch().build().unwrap();
        let steel = half_inch()
            .with_side_bearing(MemberBearing::Override(87_000.0))
            .build()
            .unwrap();
        assert!(steel.capacity(90.0).unwrap() > wood.capacity(90.0).unwrap());
    }

    #[test]
    fn test_withdrawal() {
        let conn = half_inch().build().unwrap();
        assert_eq!(conn.withdrawal_capacity(), None);

        let conn = half_inch().with_withdrawal(200.0).build().unwrap();
        assert_eq!(conn.withdrawal_capacity(), Some(Pounds(300.0)));
        assert_eq!(conn.analyze(90.0).unwrap().withdrawal_lb, Some(300.0));
    }

    #[test]
    fn test_threaded_penetration_defaults_to_main_length() {
        let conn = half_inch().with_thicknesses(3.5, 1.5).build().unwrap();
        assert_eq!(conn.threaded_penetration(), Inches(3.5));
        let conn = half_inch().with_threaded_penetration(2.0).build().unwrap();
        assert_eq!(conn.threaded_penetration(), Inches(2.0));
    }

    #[test]
    fn test_invalid_angle_is_domain_error() {
        let conn = half_inch().build().unwrap();
        let err = conn.capacity(120.0).unwrap_err();
        assert_eq!(err.error_code(), "DOMAIN_ERROR");
    }

    #[test]
    fn test_small_diameter_uses_kd() {
        // 0.148" nail-size dowel: Rd = KD = 2.2 for every mode
        let conn = DowelConnectionInput::with_defaults(0.148).build().unwrap();
        let ev = conn.evaluator(90.0).unwrap();
        assert_eq!(ev.rd(4.0), 2.2);
        assert_eq!(ev.rd(3.2), 2.2);
        assert_eq!(conn.capacity(0.0).unwrap(), conn.capacity(90.0).unwrap());
    }

    #[test]
    fn test_serialization_validates() {
        let json = r#"{"d_in": 0.5, "lm_in": 1.5, "ls_in": 0.0, "gm": 0.5, "gs": 0.5, "fyb_psi": 45000.0}"#;
        assert!(serde_json::from_str::<DowelConnection>(json).is_err());

        let json = r#"{"d_in": 0.5, "lm_in": 1.5, "ls_in": 1.5, "gm": 0.5, "gs": 0.5, "fyb_psi": 45000.0}"#;
        let conn: DowelConnection = serde_json::from_str(json).unwrap();
        assert!(conn.is_full_diameter());

        let out = serde_json::to_string(&conn).unwrap();
        let back: DowelConnection = serde_json::from_str(&out).unwrap();
        assert_eq!(conn, back);
    }

    #[test]
    fn test_result_serialization() {
        let conn = half_inch().with_label("C-1").build().unwrap();
        let result = conn.analyze(90.0).unwrap();
        let json = serde_json::to_string_pretty(&result).unwrap();
        assert!(json.contains("\"governing_mode\": \"II\""));
        assert!(json.contains("\"label\": \"C-1\""));
        assert_eq!(result.governing_condition(), "Mode II (Fastener rotation)");
    }
}
