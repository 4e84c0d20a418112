// ============================================================
// Preparation Config
// ============================================================
// Every knob a preparation run needs, saved as pretty JSON so
// the training loop can rebuild the exact same encoding later.
//
// Example file:
//   {
//     "data_dir": "data",
//     "prefix": "train",
//     "tokenizer_dir": "tokenizer",
//     "vocab_size": 30522,
//     "block_size": 512,
//     "pad_token_id": 0,
//     "separator_token_id": 102,
//     "add_special_tokens": true
//   }
//
// Reference: serde / serde_json documentation

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::traits::Persistable;
use crate::error::{PrepError, Result};
use crate::infra::tokenizer_store::{PAD_TOKEN_ID, SEP_TOKEN_ID};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepareConfig {
    /// Directory holding `<prefix>.csv`
    pub data_dir:           PathBuf,
    /// "train" enables titles; anything else is inference mode
    pub prefix:             String,
    /// Where tokenizer.json is loaded from (or built into)
    pub tokenizer_dir:      PathBuf,
    pub vocab_size:         usize,
    pub block_size:         usize,
    pub pad_token_id:       u32,
    pub separator_token_id: u32,
    /// Let the tokenizer wrap each line in [CLS] ... [SEP]
    pub add_special_tokens: bool,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            data_dir:           PathBuf::from("data"),
            prefix:             "train".to_string(),
            tokenizer_dir:      PathBuf::from("tokenizer"),
            vocab_size:         30522,
            block_size:         512,
            pad_token_id:       PAD_TOKEN_ID,
            separator_token_id: SEP_TOKEN_ID,
            add_special_tokens: true,
        }
    }
}

impl PrepareConfig {
    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            return Err(PrepError::Config("block_size must be positive".into()));
        }
        if self.pad_token_id == self.separator_token_id {
            return Err(PrepError::Config(format!(
                "pad_token_id and separator_token_id are both {}",
                self.pad_token_id
            )));
        }
        if self.prefix.is_empty() {
            return Err(PrepError::Config("prefix must not be empty".into()));
        }
        Ok(())
    }
}

impl Persistable for PrepareConfig {
    fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| PrepError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!("Saved preparation config to '{}'", path.display());
        Ok(())
    }

    fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| PrepError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_is_valid() {
        assert!(PrepareConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_block_size() {
        let cfg = PrepareConfig { block_size: 0, ..Default::default() };
        assert!(matches!(cfg.validate(), Err(PrepError::Config(_))));
    }

    #[test]
    fn test_rejects_pad_equal_to_separator() {
        let cfg = PrepareConfig { separator_token_id: 0, ..Default::default() };
        assert!(matches!(cfg.validate(), Err(PrepError::Config(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir  = tempdir().unwrap();
        let path = dir.path().join("prepare_config.json");
        let cfg  = PrepareConfig { block_size: 128, prefix: "test".into(), ..Default::default() };

        cfg.save(&path).unwrap();
        assert_eq!(PrepareConfig::load(&path).unwrap(), cfg);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let dir  = tempdir().unwrap();
        let path = dir.path().join("partial.json");
        fs::write(&path, r#"{ "block_size": 64 }"#).unwrap();

        let cfg = PrepareConfig::load(&path).unwrap();
        assert_eq!(cfg.block_size, 64);
        assert_eq!(cfg.separator_token_id, SEP_TOKEN_ID);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir  = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{ "block_size": 0 }"#).unwrap();

        assert!(matches!(PrepareConfig::load(&path), Err(PrepError::Config(_))));
    }
}
