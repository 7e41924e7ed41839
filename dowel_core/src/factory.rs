//! # Connection Factory
//!
//! Builds [`DowelConnection`]s from named materials and tabulated fastener
//! sizes. Lookup failures from either provider are returned unchanged; no
//! defaults are substituted for a missing material or size.
//!
//! ## Example
//!
//! ```rust
//! use dowel_core::factory::{BoltOptions, ConnectionFactory, MaterialSpec};
//!
//! let factory = ConnectionFactory::nds().unwrap();
//!
//! // 3/4" bolt, 3.5" DF-L main member, 1/4" A36 side plate
//! let options = BoltOptions {
//!     material: MaterialSpec::pair("DFL", "A36"),
//!     ..BoltOptions::default()
//! };
//! let bolt = factory.bolt(0.75, 3.5, 0.25, &options).unwrap();
//! assert!(bolt.capacity(90.0).unwrap() > 0.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::connection::{
    DowelConnection, DowelConnectionInput, DEFAULT_FYB_PSI, DEFAULT_THICKNESS_IN,
};
use crate::errors::CalcResult;
use crate::materials::{
    BoltTable, FastenerPropertyProvider, MaterialPropertyProvider, MaterialTable,
    MemberMaterialProperties,
};

/// Default material name for both members
pub const DEFAULT_MATERIAL: &str = "DFL";

/// Material names for the two members.
///
/// ## JSON
///
/// ```json
/// "DFL"
/// { "main": "DFL", "side": "A36" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MaterialSpec {
    /// Same material for main and side members
    Same(String),
    /// Different materials
    Pair { main: String, side: String },
}

impl MaterialSpec {
    pub fn pair(main: impl Into<String>, side: impl Into<String>) -> Self {
        MaterialSpec::Pair {
            main: main.into(),
            side: side.into(),
        }
    }

    pub fn main(&self) -> &str {
        match self {
            MaterialSpec::Same(m) => m,
            MaterialSpec::Pair { main, .. } => main,
        }
    }

    pub fn side(&self) -> &str {
        match self {
            MaterialSpec::Same(m) => m,
            MaterialSpec::Pair { side, .. } => side,
        }
    }
}

impl Default for MaterialSpec {
    fn default() -> Self {
        MaterialSpec::Same(DEFAULT_MATERIAL.to_string())
    }
}

impl From<&str> for MaterialSpec {
    fn from(name: &str) -> Self {
        MaterialSpec::Same(name.to_string())
    }
}

impl From<(&str, &str)> for MaterialSpec {
    fn from((main, side): (&str, &str)) -> Self {
        MaterialSpec::pair(main, side)
    }
}

/// Options for a generic dowel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DowelOptions {
    pub material: MaterialSpec,
    pub dr_in: Option<f64>,
    pub fyb_psi: f64,
    pub tm_in: f64,
    pub ts_in: f64,
    pub w_lb_per_in: Option<f64>,
    pub pt_in: Option<f64>,
    pub full_diameter: bool,
    pub double_shear: bool,
}

impl Default for DowelOptions {
    fn default() -> Self {
        Self {
            material: MaterialSpec::default(),
            dr_in: None,
            fyb_psi: DEFAULT_FYB_PSI,
            tm_in: DEFAULT_THICKNESS_IN,
            ts_in: DEFAULT_THICKNESS_IN,
            w_lb_per_in: None,
            pt_in: None,
            full_diameter: false,
            double_shear: false,
        }
    }
}

/// Options for a tabulated bolt.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoltOptions {
    pub material: MaterialSpec,
    pub full_diameter: bool,
    pub double_shear: bool,
}

/// Builds connections by resolving names through property providers.
#[derive(Debug, Clone)]
pub struct ConnectionFactory<F, M> {
    fasteners: F,
    materials: M,
}

impl ConnectionFactory<BoltTable, &'static MaterialTable> {
    /// Factory over the NDS A307 bolt table and the default material table
    pub fn nds() -> CalcResult<Self> {
        Ok(Self::new(BoltTable::nds_a307()?, MaterialTable::nds()))
    }
}

impl<F, M> ConnectionFactory<F, M>
where
    F: FastenerPropertyProvider,
    M: MaterialPropertyProvider,
{
    pub fn new(fasteners: F, materials: M) -> Self {
        Self {
            fasteners,
            materials,
        }
    }

    pub fn fasteners(&self) -> &F {
        &self.fasteners
    }

    pub fn materials(&self) -> &M {
        &self.materials
    }

    /// Generic dowel of diameter `d_in`; Fyb and root diameter come from
    /// `options`.
    pub fn dowel(&self, d_in: f64, options: &DowelOptions) -> CalcResult<DowelConnection> {
        let (main, side) = self.resolve(&options.material)?;

        let mut input = DowelConnectionInput::with_defaults(d_in)
            .with_thicknesses(options.tm_in, options.ts_in)
            .with_main_bearing(main.bearing())
            .with_side_bearing(side.bearing())
            .with_fyb(options.fyb_psi)
            .with_full_diameter(options.full_diameter)
            .with_double_shear(options.double_shear);
        input.dr_in = options.dr_in;
        input.pt_in = options.pt_in;
        input.w_lb_per_in = options.w_lb_per_in;

        input.build()
    }

    /// Tabulated bolt: root diameter and Fyb come from the fastener
    /// provider, which must have an exact entry for `d_in`.
    pub fn bolt(
        &self,
        d_in: f64,
        tm_in: f64,
        ts_in: f64,
        options: &BoltOptions,
    ) -> CalcResult<DowelConnection> {
        let fastener = self.fasteners.lookup(d_in)?;
        let (main, side) = self.resolve(&options.material)?;

        tracing::debug!(
            d_in,
            dr_in = fastener.root_diameter_in,
            fyb_psi = fastener.bending_yield_strength_psi,
            main = options.material.main(),
            side = options.material.side(),
            "building bolt connection"
        );

        DowelConnectionInput::with_defaults(d_in)
            .with_root_diameter(fastener.root_diameter_in)
            .with_thicknesses(tm_in, ts_in)
            .with_main_bearing(main.bearing())
            .with_side_bearing(side.bearing())
            .with_fyb(fastener.bending_yield_strength_psi)
            .with_full_diameter(options.full_diameter)
            .with_double_shear(options.double_shear)
            .build()
    }

    fn resolve(
        &self,
        spec: &MaterialSpec,
    ) -> CalcResult<(MemberMaterialProperties, MemberMaterialProperties)> {
        Ok((
            self.materials.lookup(spec.main())?,
            self.materials.lookup(spec.side())?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::bearing::MemberBearing;
    use crate::errors::CalcError;

    fn factory() -> ConnectionFactory<BoltTable, &'static MaterialTable> {
        ConnectionFactory::nds().unwrap()
    }

    #[test]
    fn test_default_dowel_matches_defaults() {
        let dowel = factory().dowel(0.5, &DowelOptions::default()).unwrap();
        let direct = DowelConnectionInput::with_defaults(0.5).build().unwrap();
        assert_eq!(dowel.capacity(90.0).unwrap(), direct.capacity(90.0).unwrap());
        assert!(dowel.is_full_diameter());
    }

    #[test]
    fn test_dowel_honors_fyb() {
        let weak = DowelOptions {
            fyb_psi: 30_000.0,
            ..DowelOptions::default()
        };
        let dowel = factory().dowel(0.5, &weak).unwrap();
        assert_eq!(dowel.fyb().0, 30_000.0);
    }

    #[test]
    fn test_bolt_uses_table_values() {
        let bolt = factory().bolt(0.5, 3.5, 1.5, &BoltOptions::default()).unwrap();
        assert_eq!(bolt.root_diameter().0, 0.406);
        assert_eq!(bolt.fyb().0, 45_000.0);
        assert!(!bolt.is_full_diameter());
        assert_eq!(bolt.effective_diameter(), 0.406);

        let full = BoltOptions {
            full_diameter: true,
            ..BoltOptions::default()
        };
        let bolt = factory().bolt(0.5, 3.5, 1.5, &full).unwrap();
        assert_eq!(bolt.effective_diameter(), 0.5);
    }

    #[test]
    fn test_bolt_unknown_size_propagates() {
        let err = factory().bolt(0.55, 3.5, 1.5, &BoltOptions::default()).unwrap_err();
        assert_eq!(err, CalcError::fastener_not_found("0.5500"));
    }

    #[test]
    fn test_unknown_material_propagates() {
        let options = BoltOptions {
            material: MaterialSpec::pair("DFL", "UNOBTAINIUM"),
            ..BoltOptions::default()
        };
        let err = factory().bolt(0.5, 3.5, 1.5, &options).unwrap_err();
        assert_eq!(err, CalcError::material_not_found("UNOBTAINIUM"));
    }

    #[test]
    fn test_steel_side_member() {
        let options = BoltOptions {
            material: ("DFL", "A36").into(),
            double_shear: true,
            ..BoltOptions::default()
        };
        let bolt = factory().bolt(0.75, 5.5, 0.25, &options).unwrap();
        assert_eq!(bolt.main_bearing(), MemberBearing::Gravity(0.5));
        assert_eq!(bolt.side_bearing(), MemberBearing::Override(87_000.0));
        assert!(bolt.is_double_shear());
    }

    #[test]
    fn test_material_spec_json() {
        let same: MaterialSpec = serde_json::from_str("\"SP\"").unwrap();
        assert_eq!(same, MaterialSpec::from("SP"));
        let pair: MaterialSpec = serde_json::from_str(r#"{"main":"DFL","side":"A36"}"#).unwrap();
        assert_eq!(pair.main(), "DFL");
        assert_eq!(pair.side(), "A36");
    }

    #[test]
    fn test_custom_providers() {
        struct OneBolt;
        impl FastenerPropertyProvider for OneBolt {
            fn lookup(&self, d: f64) -> CalcResult<crate::materials::FastenerProperties> {
                if d == 0.5 {
                    Ok(crate::materials::FastenerProperties {
                        nominal_diameter_in: 0.5,
                        root_diameter_in: 0.4,
                        bending_yield_strength_psi: 60_000.0,
                    })
                } else {
                    Err(CalcError::fastener_not_found(d.to_string()))
                }
            }
        }

        let factory = ConnectionFactory::new(OneBolt, MaterialTable::default());
        let bolt = factory.bolt(0.5, 1.5, 1.5, &BoltOptions::default()).unwrap();
        assert_eq!(bolt.fyb().0, 60_000.0);
        assert!(factory.bolt(0.625, 1.5, 1.5, &BoltOptions::default()).is_err());
    }
}
