//! # Dowel Connection Equations
//!
//! Closed-form NDS equations for the lateral design value of a single
//! dowel-type fastener. Keeping the formulas in one place enables:
//! - Easy verification against the NDS tables they come from
//! - One implementation shared by every connection type
//!
//! ## Modules
//!
//! - [`bearing`] - Dowel bearing strength Fe (specific gravity, diameter, angle)
//! - [`yield_modes`] - Re, Rt, KD, Kθ, Rd, k1-k3, and the six yield modes
//!
//! ## References
//!
//! - NDS 2018: National Design Specification for Wood Construction, Chapter 12
//! - NDS 2018 Appendix I: Yield Limit Equations for Connections
//! - NDS 2018 Appendix J: Solution of Hankinson Formula

pub mod bearing;
pub mod yield_modes;

pub use bearing::{
    dowel_bearing_strength,
    parallel_bearing_strength,
    perpendicular_bearing_strength,
    small_diameter_bearing_strength,
    MemberBearing,
};
pub use yield_modes::{k1, k2, k3, k_theta, kd, reduction_term, YieldMode, YieldModeEvaluator};

/// NDS code section references for dowel connection design.
pub mod nds_ref {
    /// Yield limit equations
    pub const YIELD_LIMIT: &str = "NDS Table 12.3.1A";
    /// Reduction term Rd
    pub const REDUCTION_TERM: &str = "NDS Table 12.3.1B";
    /// Dowel bearing strength
    pub const BEARING_STRENGTH: &str = "NDS Table 12.3.3";
    /// Dowel bearing strength at an angle to grain
    pub const HANKINSON: &str = "NDS Appendix J";
    /// Withdrawal design value
    pub const WITHDRAWAL: &str = "NDS 12.2";
    /// Bolt dimensions and bending yield strength
    pub const BOLT_TABLE: &str = "NDS Appendix L, Table L1";
}
