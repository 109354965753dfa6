//! Proof production settings.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Calculus a proof is translated into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProofFormat {
    /// Alethe, checked by veriT-compatible tools
    #[default]
    Alethe,
    /// Tactic steps for the Lean checker
    Lean,
}

/// Settings shared by the boolean bridge, the rewrite engine and the
/// translator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProofConfig {
    /// Re-check every buffered step against its expected conclusion and
    /// every emitted Alethe step against its premises
    pub pedantic: bool,
    /// Emit explicit `symm` and `reordering` steps. When unset they are
    /// folded into the steps that use them and scopes skip their reorder
    pub extended: bool,
    /// Target calculus of the translation
    pub format: ProofFormat,
    /// Fail finalization when free assumptions other than inputs remain
    pub check_closedness: bool,
    /// Append the `(cl (not false))` / `(cl)` steps when a translated root
    /// concludes `(cl false)`
    pub final_empty_clause: bool,
    /// Maximum recursion depth of the rewrite engine
    pub max_rewrite_depth: usize,
}

impl Default for ProofConfig {
    fn default() -> Self {
        Self {
            pedantic: false,
            extended: true,
            format: ProofFormat::Alethe,
            check_closedness: true,
            final_empty_clause: true,
            max_rewrite_depth: 100_000,
        }
    }
}

impl ProofConfig {
    /// Settings with every consistency check enabled.
    pub fn pedantic() -> Self {
        Self {
            pedantic: true,
            ..Self::default()
        }
    }

    /// Parse settings from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize settings to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ProofConfig::from_json(r#"{ "pedantic": true }"#).unwrap();
        assert!(config.pedantic);
        assert!(config.check_closedness);
        assert_eq!(config.max_rewrite_depth, 100_000);
        assert!(config.extended);
        assert_eq!(config.format, ProofFormat::Alethe);
    }

    #[test]
    fn test_format_by_name() {
        let config = ProofConfig::from_json(r#"{ "format": "lean", "extended": false }"#).unwrap();
        assert_eq!(config.format, ProofFormat::Lean);
        assert!(!config.extended);
        assert!(ProofConfig::from_json(r#"{ "format": "coq" }"#).is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let config = ProofConfig {
            final_empty_clause: false,
            ..ProofConfig::pedantic()
        };
        let json = config.to_json().unwrap();
        assert_eq!(ProofConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_malformed_json() {
        assert!(ProofConfig::from_json("{ pedantic: yes }").is_err());
    }
}
