//! Strongly-typed identifiers.
//!
//! `NodeId` is the dense pre-order number the downstream engine sees.
//! Arena slots (`NodeIdx`) are positional handles inside one tree and never
//! leave the process.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! new_id {
    ($name:ident, $repr:ty) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Ord, PartialOrd,
        )]
        #[serde(transparent)]
        pub struct $name($repr);

        impl $name {
            pub const fn new(v: $repr) -> Self {
                Self(v)
            }
            pub const fn get(self) -> $repr {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

new_id!(NodeId, u32);
new_id!(NodeIdx, usize);

impl NodeId {
    /// First id handed out by pre-order numbering.
    pub const ROOT: NodeId = NodeId(0);

    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_with_type_name() {
        assert_eq!(NodeId::new(7).to_string(), "NodeId(7)");
        assert_eq!(NodeIdx::new(2).to_string(), "NodeIdx(2)");
    }

    #[test]
    fn node_id_serializes_transparently() {
        let json = serde_json::to_string(&NodeId::new(3)).unwrap();
        assert_eq!(json, "3");
        assert_eq!(NodeId::ROOT.next().get(), 1);
    }
}
