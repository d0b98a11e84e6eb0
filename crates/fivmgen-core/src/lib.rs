#![forbid(unsafe_code)]
//! fivmgen-core: shared vocabulary for the variable-order compiler.
//!
//! - Strongly-typed node ids (`id`).
//! - Relation schemas and schema catalogs (`schema`).
//! - Compile-time configuration (`config`).
//! - Fingerprints of emitted artifacts (`fingerprint`).
//! - The error taxonomy every other crate maps into (`error`).
//!
//! Pure data. The tree lives in `fivmgen-vo`, text generation in
//! `fivmgen-codegen`.

pub mod config;
pub mod error;
pub mod fingerprint;
pub mod id;
pub mod prelude;
pub mod schema;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
