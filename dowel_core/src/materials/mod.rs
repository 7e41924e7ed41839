//! # Materials and Fasteners
//!
//! Property providers that turn identifiers into the numbers a dowel
//! connection consumes. The connection model never depends on how these
//! lookups work, only on the values they return.
//!
//! ## Providers
//!
//! - [`MaterialPropertyProvider`]: material name → specific gravity and
//!   optional bearing override ([`MaterialTable`])
//! - [`FastenerPropertyProvider`]: nominal diameter → root diameter and
//!   Fyb ([`BoltTable`])
//!
//! ## Example
//!
//! ```rust
//! use dowel_core::materials::{
//!     BoltTable, FastenerPropertyProvider, MaterialPropertyProvider, MaterialTable,
//! };
//!
//! let steel = MaterialTable::nds().lookup("A36").unwrap();
//! assert_eq!(steel.bearing_override_psi, Some(87_000.0));
//!
//! let bolt = BoltTable::nds_a307().unwrap().lookup(0.75).unwrap();
//! assert_eq!(bolt.root_diameter_in, 0.627);
//! ```

pub mod fasteners;
pub mod member;
pub mod species;

pub use fasteners::{BoltRecord, BoltTable, FastenerProperties, FastenerPropertyProvider};
pub use member::{MaterialPropertyProvider, MaterialTable, MemberMaterialProperties};
pub use species::WoodSpecies;
