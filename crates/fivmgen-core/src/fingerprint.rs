//! Artifact fingerprints.
//!
//! A fingerprint is blake3 over the exact bytes a compile emitted, so two
//! runs agree iff their config or SQL text is byte-identical. Trees are
//! fingerprinted through their JSON dump, which is pre-order and has no
//! map fields, so equal trees always serialize the same way.

use serde::Serialize;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(blake3::Hash);

impl Fingerprint {
    /// Fingerprint of an emitted artifact (config file or SQL program).
    pub fn of_artifact(text: &str) -> Self {
        Self(blake3::hash(text.as_bytes()))
    }

    /// Fingerprint of a value's JSON dump, e.g. a numbered variable order.
    pub fn of_json<T: Serialize>(value: &T) -> Result<Self> {
        let bytes = serde_json::to_vec(value)?;
        Ok(Self(blake3::hash(&bytes)))
    }

    /// Leading 12 hex digits, as printed by `fivmgen explain`.
    pub fn short(&self) -> String {
        self.0.to_hex().as_str()[..12].to_string()
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.to_hex().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_newline_changes_the_artifact() {
        assert_eq!(Fingerprint::of_artifact("3 2\n"), Fingerprint::of_artifact("3 2\n"));
        assert_ne!(Fingerprint::of_artifact("3 2\n"), Fingerprint::of_artifact("3 2"));
    }

    #[test]
    fn short_form_prefixes_full_hex() {
        let fp = Fingerprint::of_artifact("SELECT SUM(\n)\nFROM ;\n");
        let full = fp.to_string();
        assert_eq!(full.len(), 64);
        assert!(full.starts_with(&fp.short()));
    }

    #[test]
    fn json_fingerprint_follows_child_order() {
        let a = Fingerprint::of_json(&vec!["x", "y"]).unwrap();
        let b = Fingerprint::of_json(&vec!["y", "x"]).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, Fingerprint::of_json(&["x", "y"]).unwrap());
    }
}
