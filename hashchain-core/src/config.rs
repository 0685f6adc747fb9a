//! Chain configuration
//!
//! A [`ChainConfig`] can only be obtained through [`ChainConfigBuilder::build`],
//! [`ChainConfig::from_env`] or `Default`, so every config a chain sees has
//! passed the sentinel check.

use crate::chain::{VerifyOptions, GENESIS_HASH};
use crate::digest::is_valid_hex_digest;
use crate::error::{ChainError, Result};

/// Environment variable overriding the genesis sentinel
pub const ENV_GENESIS_HASH: &str = "HASHCHAIN_GENESIS_HASH";

/// Environment variable enabling the genesis check during verification
pub const ENV_CHECK_GENESIS: &str = "HASHCHAIN_CHECK_GENESIS";

/// Configuration for a [`HashChain`](crate::HashChain)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainConfig {
    genesis_hash: String,
    check_genesis: bool,
}

impl ChainConfig {
    /// Create a new configuration builder
    pub fn builder() -> ChainConfigBuilder {
        ChainConfigBuilder::default()
    }

    /// Build a configuration from `HASHCHAIN_*` environment variables
    ///
    /// Unset variables fall back to defaults. A set but malformed value is
    /// an error rather than being ignored.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from any key/value source using the
    /// `HASHCHAIN_*` names
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(genesis) = lookup(ENV_GENESIS_HASH) {
            builder = builder.genesis_hash(genesis);
        }

        if let Some(raw) = lookup(ENV_CHECK_GENESIS) {
            let check = raw.trim().parse::<bool>().map_err(|_| ChainError::InvalidConfig {
                reason: format!("{} must be 'true' or 'false', got '{}'", ENV_CHECK_GENESIS, raw),
            })?;
            builder = builder.check_genesis(check);
        }

        builder.build()
    }

    /// Previous hash given to the first appended record
    pub fn genesis_hash(&self) -> &str {
        &self.genesis_hash
    }

    /// Whether verification also checks record 0 against the sentinel
    pub fn check_genesis(&self) -> bool {
        self.check_genesis
    }

    /// Verification options derived from this configuration
    pub fn verify_options(&self) -> VerifyOptions {
        VerifyOptions {
            check_genesis: self.check_genesis,
            genesis_hash: self.genesis_hash.clone(),
        }
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            genesis_hash: GENESIS_HASH.to_string(),
            check_genesis: false,
        }
    }
}

/// Builder for ChainConfig
#[derive(Debug, Default)]
pub struct ChainConfigBuilder {
    genesis_hash: Option<String>,
    check_genesis: Option<bool>,
}

impl ChainConfigBuilder {
    /// Set the genesis sentinel (empty, or a 64-char lowercase hex digest)
    pub fn genesis_hash(mut self, hash: impl Into<String>) -> Self {
        self.genesis_hash = Some(hash.into());
        self
    }

    /// Enable or disable the genesis check
    pub fn check_genesis(mut self, enabled: bool) -> Self {
        self.check_genesis = Some(enabled);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ChainConfig> {
        let genesis_hash = self
            .genesis_hash
            .unwrap_or_else(|| GENESIS_HASH.to_string());

        if !genesis_hash.is_empty() && !is_valid_hex_digest(&genesis_hash) {
            return Err(ChainError::InvalidConfig {
                reason: format!(
                    "genesis hash must be empty or 64 lowercase hex characters, got '{}'",
                    genesis_hash
                ),
            });
        }

        Ok(ChainConfig {
            genesis_hash,
            check_genesis: self.check_genesis.unwrap_or(false),
        })
    }
}
