use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_HEADER_TABLE_SIZE: usize = 4096;
pub const DEFAULT_MAX_HEADER_FIELD_SIZE: usize = 16 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DecoderConfig {
    /// SETTINGS_HEADER_TABLE_SIZE advertised to the peer.
    pub header_table_size: usize,
    pub max_header_field_size: usize,
    /// Fail on incremental-indexing literals that cannot fit the table
    /// instead of emptying it.
    pub strict_entry_size: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            header_table_size: DEFAULT_HEADER_TABLE_SIZE,
            max_header_field_size: DEFAULT_MAX_HEADER_FIELD_SIZE,
            strict_entry_size: false,
        }
    }
}

impl DecoderConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|err| ConfigError::Serialize(err.to_string()))
    }

    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let raw =
                std::fs::read_to_string(path).map_err(|err| ConfigError::Read(err.to_string()))?;
            Self::from_toml_str(&raw)
        } else {
            let config = Self::default();
            config.save(path)?;
            Ok(config)
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml_string()?;
        std::fs::write(path, contents).map_err(|err| ConfigError::Write(err.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_header_field_size == 0 {
            return Err(ConfigError::Invalid(
                "max_header_field_size must be greater than zero".to_string(),
            ));
        }
        if self.header_table_size > u32::MAX as usize {
            return Err(ConfigError::Invalid(format!(
                "header_table_size {} does not fit a SETTINGS value",
                self.header_table_size
            )));
        }
        Ok(())
    }
}
