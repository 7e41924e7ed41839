//! Fastener Properties (NDS Appendix L)
//!
//! Tabulated dimensions and bending yield strength of dowel-type fasteners.
//! The bolt table ships as a versioned TOML dataset embedded at compile
//! time; other datasets with the same columns can be loaded from a string.
//!
//! Lookups require an exact nominal diameter match (to four decimals).
//! There is no fallback to the nearest size.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

const NDS_BOLTS_TOML: &str = include_str!("../../data/bolts.toml");

/// Fastener type of the NDS reference bolts
pub const A307: &str = "A307";

/// Values a connection needs from a fastener.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FastenerProperties {
    /// Nominal diameter D (in)
    pub nominal_diameter_in: f64,
    /// Root diameter Dr (in)
    pub root_diameter_in: f64,
    /// Dowel bending yield strength Fyb (psi)
    pub bending_yield_strength_psi: f64,
}

/// Resolves a nominal fastener diameter into fastener properties.
pub trait FastenerPropertyProvider {
    /// Look up the fastener with nominal diameter `nominal_diameter_in`.
    ///
    /// # Errors
    /// `FastenerNotFound` when no entry matches exactly.
    fn lookup(&self, nominal_diameter_in: f64) -> CalcResult<FastenerProperties>;
}

impl<T: FastenerPropertyProvider + ?Sized> FastenerPropertyProvider for &T {
    fn lookup(&self, nominal_diameter_in: f64) -> CalcResult<FastenerProperties> {
        (**self).lookup(nominal_diameter_in)
    }
}

/// One row of the bolt dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoltRecord {
    /// Designation (e.g., "1/2 MB")
    pub name: String,
    /// ASTM specification (e.g., "A307")
    #[serde(rename = "type")]
    pub fastener_type: String,
    pub d_in: f64,
    pub dr_in: f64,
    pub fyb_psi: f64,
    pub fu_psi: f64,
    pub fy_psi: f64,
}

impl BoltRecord {
    pub fn properties(&self) -> FastenerProperties {
        FastenerProperties {
            nominal_diameter_in: self.d_in,
            root_diameter_in: self.dr_in,
            bending_yield_strength_psi: self.fyb_psi,
        }
    }
}

#[derive(Debug, Deserialize)]
struct BoltDataset {
    version: String,
    #[serde(default)]
    bolt: Vec<BoltRecord>,
}

/// Bolt table keyed by nominal diameter.
#[derive(Debug, Clone, PartialEq)]
pub struct BoltTable {
    version: String,
    rows: BTreeMap<String, BoltRecord>,
}

impl BoltTable {
    /// A307 bolts from NDS Appendix L, Table L1
    ///
    /// # Example
    /// ```rust
    /// use dowel_core::materials::{BoltTable, FastenerPropertyProvider};
    ///
    /// let bolts = BoltTable::nds_a307().unwrap();
    /// let half = bolts.lookup(0.5).unwrap();
    /// assert_eq!(half.root_diameter_in, 0.406);
    /// ```
    pub fn nds_a307() -> CalcResult<Self> {
        Self::from_toml_str(NDS_BOLTS_TOML, A307)
    }

    /// Parse a bolt dataset, keeping rows of `fastener_type`.
    ///
    /// # Errors
    /// `SerializationError` for malformed TOML, `InvalidInput` for rows with
    /// non-positive values, a root diameter larger than the nominal, or a
    /// duplicated nominal diameter.
    pub fn from_toml_str(toml_str: &str, fastener_type: &str) -> CalcResult<Self> {
        let dataset: BoltDataset = toml::from_str(toml_str)?;

        let mut rows = BTreeMap::new();
        for record in dataset
            .bolt
            .into_iter()
            .filter(|r| r.fastener_type.eq_ignore_ascii_case(fastener_type))
        {
            validate_record(&record)?;
            let key = diameter_key(record.d_in);
            if rows.contains_key(&key) {
                return Err(CalcError::invalid_input(
                    "d_in",
                    key,
                    format!("Duplicate {} bolt diameter", fastener_type),
                ));
            }
            rows.insert(key, record);
        }

        tracing::debug!(
            version = %dataset.version,
            fastener_type,
            rows = rows.len(),
            "loaded bolt table"
        );

        Ok(Self {
            version: dataset.version,
            rows,
        })
    }

    /// Dataset version string
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Full row for a nominal diameter
    pub fn record(&self, nominal_diameter_in: f64) -> CalcResult<&BoltRecord> {
        let key = diameter_key(nominal_diameter_in);
        self.rows
            .get(&key)
            .ok_or_else(|| CalcError::fastener_not_found(key))
    }

    /// All rows, ascending by diameter
    pub fn records(&self) -> impl Iterator<Item = &BoltRecord> {
        let mut rows: Vec<&BoltRecord> = self.rows.values().collect();
        rows.sort_by(|a, b| a.d_in.total_cmp(&b.d_in));
        rows.into_iter()
    }

    /// Available nominal diameters, ascending
    pub fn sizes(&self) -> Vec<f64> {
        self.records().map(|r| r.d_in).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FastenerPropertyProvider for BoltTable {
    fn lookup(&self, nominal_diameter_in: f64) -> CalcResult<FastenerProperties> {
        self.record(nominal_diameter_in).map(BoltRecord::properties)
    }
}

/// Table key: the diameter formatted to four decimals (0.3125 → "0.3125")
fn diameter_key(d_in: f64) -> String {
    format!("{:.4}", d_in)
}

fn validate_record(record: &BoltRecord) -> CalcResult<()> {
    let fields = [
        ("d_in", record.d_in),
        ("dr_in", record.dr_in),
        ("fyb_psi", record.fyb_psi),
        ("fu_psi", record.fu_psi),
        ("fy_psi", record.fy_psi),
    ];
    for (field, value) in fields {
        if !(value.is_finite() && value > 0.0) {
            return Err(CalcError::invalid_input(
                field,
                value.to_string(),
                format!("Bolt '{}' has a non-positive value", record.name),
            ));
        }
    }
    if record.dr_in > record.d_in {
        return Err(CalcError::invalid_input(
            "dr_in",
            record.dr_in.to_string(),
            format!("Bolt '{}' root diameter exceeds nominal diameter", record.name),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nds_table_loads() {
        let bolts = BoltTable::nds_a307().unwrap();
        assert_eq!(bolts.len(), 8);
        assert_eq!(bolts.version(), "NDS-2015");
        assert_eq!(
            bolts.sizes(),
            vec![0.25, 0.3125, 0.375, 0.5, 0.625, 0.75, 0.875, 1.0]
        );
    }

    #[test]
    fn test_exact_lookup() {
        let bolts = BoltTable::nds_a307().unwrap();
        let props = bolts.lookup(0.3125).unwrap();
        assert_eq!(props.root_diameter_in, 0.245);
        assert_eq!(props.bending_yield_strength_psi, 45_000.0);

        let row = bolts.record(1.0).unwrap();
        assert_eq!(row.name, "1 MB");
        assert_eq!(row.fu_psi, 58_000.0);
    }

    #[test]
    fn test_no_nearest_size_fallback() {
        let bolts = BoltTable::nds_a307().unwrap();
        let err = bolts.lookup(0.55).unwrap_err();
        assert_eq!(err, CalcError::fastener_not_found("0.5500"));
        assert!(bolts.lookup(1.25).is_err());
    }

    #[test]
    fn test_filters_by_type() {
        let toml = r#"
            version = "test"
            [[bolt]]
            name = "1/2 HS"
            type = "A325"
            d_in = 0.5
            dr_in = 0.406
            fyb_psi = 90000.0
            fu_psi = 120000.0
            fy_psi = 92000.0
        "#;
        let a307 = BoltTable::from_toml_str(toml, A307).unwrap();
        assert!(a307.is_empty());
        let a325 = BoltTable::from_toml_str(toml, "a325").unwrap();
        assert_eq!(a325.lookup(0.5).unwrap().bending_yield_strength_psi, 90_000.0);
    }

    #[test]
    fn test_rejects_bad_rows() {
        let toml = r#"
            version = "bad"
            [[bolt]]
            name = "broken"
            type = "A307"
            d_in = 0.5
            dr_in = 0.6
            fyb_psi = 45000.0
            fu_psi = 58000.0
            fy_psi = 36000.0
        "#;
        let err = BoltTable::from_toml_str(toml, A307).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = BoltTable::from_toml_str("version = ", A307).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
