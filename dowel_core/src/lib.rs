//! # dowel_core - Dowel Connection Capacity Engine
//!
//! `dowel_core` computes the reference lateral design value Z of a single
//! dowel-type fastener (bolt, lag screw, pin) joining two members, using
//! the NDS yield limit equations. All inputs and outputs are
//! JSON-serializable, making it easy to drive from other tools and LLMs.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: A validated connection is immutable; every query is a pure function
//! - **JSON-First**: All inputs and results implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types naming the field or yield mode at fault
//!
//! ## Quick Start
//!
//! ```rust
//! use dowel_core::{DowelConnection, DowelConnectionInput, YieldMode};
//!
//! // 1/2" dowel, two 1.5" DF-L members, single shear
//! let connection = DowelConnection::new(&DowelConnectionInput::with_defaults(0.5)).unwrap();
//!
//! let result = connection.analyze(90.0).unwrap();
//! assert_eq!(result.governing_mode, YieldMode::II);
//!
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`equations`] - Bearing strength and yield limit equations
//! - [`calculations`] - The dowel connection value type and its results
//! - [`materials`] - Material and fastener property providers
//! - [`factory`] - Connections from material names and tabulated bolt sizes
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod factory;
pub mod materials;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CapacityResult, DowelConnection, DowelConnectionInput, ShearConfiguration};
pub use equations::{MemberBearing, YieldMode};
pub use errors::{CalcError, CalcResult};
pub use factory::{BoltOptions, ConnectionFactory, DowelOptions, MaterialSpec};
pub use materials::{BoltTable, FastenerPropertyProvider, MaterialPropertyProvider, MaterialTable};
