//! Consensus lock runtime configuration.
//!
//! Read from the `[consensus_lock]` table of the signer's TOML config. Every
//! field has a default, so an absent table yields [`ConsensusLockConfig::default`].

use serde::{Deserialize, Serialize};
use signguard_core::{LockValueType, Result, SignGuardError};
use std::path::Path;

/// Runtime settings for the consensus lock.
///
/// Enforcement itself is not configurable: a violation always refuses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsensusLockConfig {
    /// Tag recorded on newly created locks.
    pub value_type: LockValueType,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    consensus_lock: ConsensusLockConfig,
}

impl ConsensusLockConfig {
    /// Parse from a full signer config document.
    ///
    /// Tables other than `[consensus_lock]` belong to other components and
    /// are ignored here.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(toml_str)
            .map_err(|e| SignGuardError::config(format!("invalid consensus_lock config: {e}")))?;
        Ok(file.consensus_lock)
    }

    /// Load from a config file on disk.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SignGuardError::config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConsensusLockConfig::default();
        assert_eq!(config.value_type, LockValueType::Block);
    }

    #[test]
    fn test_missing_table_uses_defaults() {
        let config = ConsensusLockConfig::from_toml_str("[signer]\nlisten = \"0.0.0.0:1234\"\n")
            .unwrap();
        assert_eq!(config, ConsensusLockConfig::default());
    }

    #[test]
    fn test_parse_table() {
        let config = ConsensusLockConfig::from_toml_str(
            "[consensus_lock]\nvalue_type = \"block\"\n",
        )
        .unwrap();
        assert_eq!(config.value_type, LockValueType::Block);
    }

    #[test]
    fn test_enforcement_cannot_be_disabled() {
        let err = ConsensusLockConfig::from_toml_str("[consensus_lock]\nenforce = false\n")
            .unwrap_err();
        assert!(matches!(err, SignGuardError::Config { .. }));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = ConsensusLockConfig::from_toml_str("[consensus_lock]\nenforced = true\n")
            .unwrap_err();
        assert!(matches!(err, SignGuardError::Config { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = ConsensusLockConfig::load_from_file(Path::new("/nonexistent/signguard.toml"))
            .unwrap_err();
        assert!(matches!(err, SignGuardError::Config { .. }));
    }
}
