//! # hyperparam-rs
//!
//! `hyperparam-rs` describes the hyperparameters of learning algorithms as
//! typed, constrained values grouped into models, loaded from YAML.
//!
//! The library provides:
//! - Hyperparameters with a declared kind, documentation, choices and ranges
//! - Models and sets that keep declaration order and reject invalid names
//! - Dotted path access such as `k_means.strata.0` or `svm.max_iter.node()`
//! - Flattening to, and bulk updates from, `{"model.param": value}` mappings
//! - Renderers for text, JSON, YAML, Sphinx dataclasses and tables
//!
//! ## Basic Usage
//!
//! ```
//! use hyperparam_rs::hyperparam::HyperparamSetLoader;
//! use hyperparam_rs::render::{render_to_string, OutputFormat, WriteOptions};
//!
//! let mut set = HyperparamSetLoader::load_str(r#"
//! svm:
//!   max_iter: {type: int, value: 20, range: [1, 30]}
//! "#).unwrap();
//!
//! set.set("svm.max_iter", 25).unwrap();
//! assert!(set.set("svm.max_iter", 31).is_err());
//!
//! let text = render_to_string(&set, OutputFormat::Short, &WriteOptions::default()).unwrap();
//! assert!(text.contains("max_iter: 25 (int) in [1, 30]"));
//! ```

// Public modules
pub mod error;

// Hyperparameter system
pub mod hyperparam;

// Output formats
pub mod render;

// Re-exports for convenience
pub use error::{HyperparamError, Result};
pub use hyperparam::{
    Hyperparam, HyperparamModel, HyperparamSet, HyperparamSetLoader, Kind, Value,
};
pub use render::{render, OutputFormat, WriteOptions};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
