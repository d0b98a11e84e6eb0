#![forbid(unsafe_code)]
//! fivmgen-vo: variable-order (elimination-order) trees.
//!
//! Responsibilities:
//! - Hold the tree as an arena of nodes addressed by `NodeIdx` (`tree`).
//! - Grow it from a seed skeleton, one relation at a time (`builder`).
//! - Assign dense pre-order ids and expose ancestor-id chains (`number`).
//! - Mark the single-relation runs the SQL pass collapses (`chain`).
//! - Provide debug-time verification helpers (`verify`).
//!
//! **No text generation here.** The codegen crate consumes the numbered tree.

pub mod builder;
pub mod chain;
pub mod number;
pub mod seed;
pub mod tree;
pub mod verify;

pub use builder::{build_variable_order, Bindings, BuiltOrder, InsertPolicy, TreeBuilder};
pub use seed::SeedNode;
pub use tree::{TreeNode, VariableOrder};
