//! Convenient re-exports for downstream crates.

pub use crate::config::CompileConfig;
pub use crate::error::{Error, Result};
pub use crate::fingerprint::Fingerprint;
pub use crate::id::{NodeId, NodeIdx};
pub use crate::schema::{AttrType, Attribute, Catalog, RelationSchema};
