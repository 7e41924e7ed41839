//! Member Materials for Connection Design
//!
//! Resolves a material name into the values a connection member needs: a
//! specific gravity and, for non-wood members, a direct dowel bearing
//! strength.
//!
//! Names are resolved in this order:
//!
//! 1. Aliases (e.g., `A36`, `A992`, `A572` → `STEEL`)
//! 2. Table entries (`DFL`, `SP`, `STEEL`, ...)
//! 3. Long species names (`"Douglas Fir-Larch"`)
//! 4. A bare number, taken as the specific gravity of a wood member (`"0.43"`)

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::equations::bearing::MemberBearing;
use crate::errors::{CalcError, CalcResult};
use crate::materials::species::WoodSpecies;

/// Specific gravity recorded for structural steel
pub const STEEL_SPECIFIC_GRAVITY: f64 = 7.80;

/// Dowel bearing strength of ASTM A36 steel plate, Fe = 1.5 Fu (psi)
pub const STEEL_BEARING_STRENGTH_PSI: f64 = 87_000.0;

/// Properties of one connection member material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemberMaterialProperties {
    /// Specific gravity G
    pub specific_gravity: f64,
    /// Direct dowel bearing strength (psi), for non-wood members
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearing_override_psi: Option<f64>,
}

impl MemberMaterialProperties {
    /// Wood member whose bearing strength follows from G
    pub fn wood(specific_gravity: f64) -> Self {
        Self {
            specific_gravity,
            bearing_override_psi: None,
        }
    }

    /// Member with a directly specified bearing strength
    pub fn with_bearing(specific_gravity: f64, bearing_psi: f64) -> Self {
        Self {
            specific_gravity,
            bearing_override_psi: Some(bearing_psi),
        }
    }

    /// Bearing source for the connection model
    pub fn bearing(&self) -> MemberBearing {
        match self.bearing_override_psi {
            Some(fe) => MemberBearing::Override(fe),
            None => MemberBearing::Gravity(self.specific_gravity),
        }
    }
}

/// Resolves a material name into member properties.
pub trait MaterialPropertyProvider {
    /// Look up `name`.
    ///
    /// # Errors
    /// `MaterialNotFound` when the name has no entry.
    fn lookup(&self, name: &str) -> CalcResult<MemberMaterialProperties>;
}

impl<T: MaterialPropertyProvider + ?Sized> MaterialPropertyProvider for &T {
    fn lookup(&self, name: &str) -> CalcResult<MemberMaterialProperties> {
        (**self).lookup(name)
    }
}

/// Table-backed material provider with alias support.
///
/// Keys and aliases are case-insensitive.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialTable {
    entries: HashMap<String, MemberMaterialProperties>,
    aliases: HashMap<String, String>,
}

static NDS_MATERIALS: Lazy<MaterialTable> = Lazy::new(MaterialTable::default);

impl MaterialTable {
    /// Empty table
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    /// Shared instance of the default table
    pub fn nds() -> &'static MaterialTable {
        &NDS_MATERIALS
    }

    /// Add or replace an entry
    pub fn with_material(mut self, key: &str, props: MemberMaterialProperties) -> Self {
        self.entries.insert(normalize(key), props);
        self
    }

    /// Make `alias` resolve to `key`
    pub fn with_alias(mut self, alias: &str, key: &str) -> Self {
        self.aliases.insert(normalize(alias), normalize(key));
        self
    }

    /// Table keys, sorted
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

/// NDS species groups plus structural steel.
impl Default for MaterialTable {
    fn default() -> Self {
        let mut table = MaterialTable::empty();
        for species in WoodSpecies::ALL {
            table = table.with_material(
                species.code(),
                MemberMaterialProperties::wood(species.specific_gravity()),
            );
        }
        table
            .with_alias("DFL", "DF-L")
            .with_alias("DFS", "DF-S")
            .with_material(
                "STEEL",
                MemberMaterialProperties::with_bearing(STEEL_SPECIFIC_GRAVITY, STEEL_BEARING_STRENGTH_PSI),
            )
            .with_alias("A36", "STEEL")
            .with_alias("A992", "STEEL")
            .with_alias("A572", "STEEL")
    }
}

impl MaterialPropertyProvider for MaterialTable {
    fn lookup(&self, name: &str) -> CalcResult<MemberMaterialProperties> {
        let key = normalize(name);
        let key = self.aliases.get(&key).unwrap_or(&key);

        if let Some(props) = self.entries.get(key) {
            return Ok(*props);
        }

        if let Ok(species) = WoodSpecies::from_str_flexible(name) {
            if let Some(props) = self.entries.get(species.code()) {
                return Ok(*props);
            }
        }

        match name.trim().parse::<f64>() {
            Ok(g) if g.is_finite() && g > 0.0 => Ok(MemberMaterialProperties::wood(g)),
            _ => Err(CalcError::material_not_found(name)),
        }
    }
}

fn normalize(key: &str) -> String {
    key.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wood_lookup() {
        let props = MaterialTable::nds().lookup("DFL").unwrap();
        assert_eq!(props.specific_gravity, 0.50);
        assert_eq!(props.bearing(), MemberBearing::Gravity(0.50));

        let props = MaterialTable::nds().lookup("sp").unwrap();
        assert_eq!(props.specific_gravity, 0.55);
    }

    #[test]
    fn test_long_species_name() {
        let props = MaterialTable::nds().lookup("Hem Fir").unwrap();
        assert_eq!(props.specific_gravity, 0.43);
    }

    #[test]
    fn test_steel_aliases() {
        let steel = MaterialTable::nds().lookup("STEEL").unwrap();
        assert_eq!(steel.bearing(), MemberBearing::Override(87_000.0));
        for alias in ["A36", "a992", "A572"] {
            assert_eq!(MaterialTable::nds().lookup(alias).unwrap(), steel);
        }
    }

    #[test]
    fn test_numeric_specific_gravity() {
        let props = MaterialTable::nds().lookup("0.43").unwrap();
        assert_eq!(props, MemberMaterialProperties::wood(0.43));
        assert!(MaterialTable::nds().lookup("-0.43").is_err());
        assert!(MaterialTable::nds().lookup("NaN").is_err());
    }

    #[test]
    fn test_unknown_material() {
        let err = MaterialTable::nds().lookup("OAK").unwrap_err();
        assert_eq!(err, CalcError::material_not_found("OAK"));
        assert!(err.is_lookup());
    }

    #[test]
    fn test_custom_table() {
        let table = MaterialTable::empty()
            .with_material("LVL", MemberMaterialProperties::wood(0.50))
            .with_alias("MICROLLAM", "LVL");
        assert_eq!(table.lookup("microllam").unwrap().specific_gravity, 0.50);
        assert_eq!(table.keys(), vec!["LVL"]);
        // Species fallback needs the species to be in this table
        assert!(table.lookup("DF-L").is_err());
    }

    #[test]
    fn test_provider_by_reference() {
        fn g_of(provider: impl MaterialPropertyProvider, name: &str) -> f64 {
            provider.lookup(name).unwrap().specific_gravity
        }
        assert_eq!(g_of(MaterialTable::nds(), "SPF"), 0.42);
    }
}
