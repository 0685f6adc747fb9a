//! In-memory hash chain
//!
//! The chain owns its records exclusively. Records can be appended and
//! their payloads edited in place; there is no reordering or removal.

use std::fmt;

use crate::config::ChainConfig;
use crate::error::{ChainError, Result};

use super::{
    record::Record,
    verify::{ChainVerification, ChainVerifier},
};

/// Ordered sequence of records linked by their digests
#[derive(Debug, Clone, Default)]
pub struct HashChain {
    records: Vec<Record>,
    config: ChainConfig,
}

impl HashChain {
    /// Create an empty chain with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty chain with the given configuration
    pub fn with_config(config: ChainConfig) -> Self {
        Self {
            records: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Append a record linked to the current tip of the chain
    ///
    /// The first record links to the configured genesis sentinel.
    pub fn append(&mut self, payload: impl Into<String>, nonce: i64) -> &Record {
        let record = Record::new(payload, nonce, self.last_hash());
        tracing::debug!(
            index = self.records.len(),
            hash = %record.current_hash(),
            "appended record"
        );
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    /// Append a record built elsewhere with [`Record::new`]
    ///
    /// The record is not checked here; tampered or mislinked records are
    /// reported by verification.
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Replace the payload of the record at `index` and refresh its hash
    ///
    /// Records after `index` are left untouched, so the next link breaks.
    pub fn mutate(&mut self, index: usize, new_payload: impl Into<String>) -> Result<()> {
        let len = self.records.len();
        let record = self
            .records
            .get_mut(index)
            .ok_or(ChainError::RecordNotFound { index, len })?;

        record.mutate(new_payload);
        tracing::debug!(index, hash = %record.current_hash(), "mutated record");
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Record> {
        self.records.get_mut(index)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Hash of the last record, or the genesis sentinel when empty
    pub fn last_hash(&self) -> String {
        self.records
            .last()
            .map(|r| r.current_hash().to_string())
            .unwrap_or_else(|| self.config.genesis_hash().to_string())
    }

    /// Whether every self-hash and link is consistent
    pub fn verify(&self) -> bool {
        self.verify_detailed().is_valid()
    }

    /// Verify and report the first failing record and check
    pub fn verify_detailed(&self) -> ChainVerification {
        ChainVerifier::verify(&self.records, &self.config.verify_options())
    }

    /// Verify, turning a failure into [`ChainError::IntegrityViolation`]
    pub fn verify_strict(&self) -> Result<ChainVerification> {
        let mut verification = self.verify_detailed();
        match verification.fault.take() {
            Some(fault) => Err(ChainError::IntegrityViolation {
                index: fault.index,
                kind: fault.kind,
                reason: fault.detail,
            }),
            None => Ok(verification),
        }
    }

    /// Render the chain as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }
}

impl fmt::Display for HashChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, record) in self.records.iter().enumerate() {
            writeln!(f, "Record {}:", i + 1)?;
            write!(f, "{}", record)?;
        }
        Ok(())
    }
}

impl FromIterator<Record> for HashChain {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
            config: ChainConfig::default(),
        }
    }
}

impl<'a> IntoIterator for &'a HashChain {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
