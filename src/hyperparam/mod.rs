//! # Hyperparameter System
//!
//! This module provides a typed, constrained and hierarchically addressable
//! model of hyperparameters, loaded from YAML documents.
//!
//! ## Key Features
//!
//! - **Typed Values**: Every hyperparameter declares a kind (`int`, `float`, `str`, `bool`, `list`, `dict`) and values must match it exactly
//! - **Constraints**: Restrict values to a set of choices or an inclusive range
//! - **Nested Models**: Group hyperparameters into models, and models into sets
//! - **Path Addressing**: Read and write values with dotted paths such as `k_means.strata.0`
//! - **Bulk Updates**: Export to and update from flat dotted mappings
//!
//! ## Core Components
//!
//! - [`Hyperparam`]: A single named, typed and constrained value
//! - [`HyperparamModel`]: An ordered group of hyperparameters and nested models
//! - [`HyperparamSet`]: The named models of one document
//! - [`HyperparamSetLoader`]: Parses and validates documents
//! - [`Path`]: Parses dotted addresses, including the `node()` accessor
//!
//! ## Example Usage
//!
//! ```rust
//! use hyperparam_rs::hyperparam::{HyperparamSetLoader, Value};
//!
//! let mut set = HyperparamSetLoader::load_str(r#"
//! svm:
//!   C: {type: float}
//!   kernel: {type: str, choices: [radial, linear]}
//! "#).unwrap();
//!
//! set.set("svm.kernel", "linear").unwrap();
//! assert!(set.set("svm.kernel", "nada").is_err());
//!
//! let flat = set.flatten();
//! assert_eq!(flat["svm.kernel"], Value::from("linear"));
//! ```

pub mod bounds;
pub mod loader;
pub mod model;
pub mod param;
pub mod path;
pub mod set;
pub mod value;

// Re-export key types
pub use bounds::{Bounds, BoundsError};
pub use loader::HyperparamSetLoader;
pub use model::{Flatten, HyperparamModel, Member};
pub use param::{Hyperparam, ValueError};
pub use path::{is_identifier, Path, PathError, Resolved, NODE_ACCESSOR};
pub use set::HyperparamSet;
pub use value::{FlatMap, Kind, UnknownKindError, Value};
