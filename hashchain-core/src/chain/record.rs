//! Chain records
//!
//! A record carries a payload, a nonce, the hash of its predecessor and its
//! own digest over those three fields.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::digest::digest_record;

/// A single entry in a hash chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub(crate) payload: String,
    pub(crate) nonce: i64,
    pub(crate) previous_hash: String,
    pub(crate) current_hash: String,
}

impl Record {
    /// Create a record linked to `previous_hash` and compute its digest
    ///
    /// `payload` and `previous_hash` may be empty.
    pub fn new(payload: impl Into<String>, nonce: i64, previous_hash: impl Into<String>) -> Self {
        let mut record = Self {
            payload: payload.into(),
            nonce,
            previous_hash: previous_hash.into(),
            current_hash: String::new(),
        };
        record.current_hash = record.compute_hash();
        record
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn nonce(&self) -> i64 {
        self.nonce
    }

    pub fn previous_hash(&self) -> &str {
        &self.previous_hash
    }

    pub fn current_hash(&self) -> &str {
        &self.current_hash
    }

    /// Recompute the digest from the record's current fields
    pub fn compute_hash(&self) -> String {
        digest_record(&self.payload, self.nonce, &self.previous_hash)
    }

    /// Verify this record's stored hash against its fields
    pub fn verify_hash(&self) -> bool {
        self.current_hash == self.compute_hash()
    }

    /// Replace the payload and refresh the stored hash
    ///
    /// The link to the predecessor is left alone and nothing downstream is
    /// updated, so a successor's `previous_hash` stops matching.
    pub fn mutate(&mut self, new_payload: impl Into<String>) {
        self.payload = new_payload.into();
        self.current_hash = self.compute_hash();
    }

    /// Overwrite the stored hash without recomputing it
    pub fn forge_current_hash(&mut self, hash: impl Into<String>) {
        self.current_hash = hash.into();
    }

    /// Overwrite the stored link without recomputing anything
    pub fn forge_previous_hash(&mut self, hash: impl Into<String>) {
        self.previous_hash = hash.into();
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Payload: {}", self.payload)?;
        writeln!(f, "  Nonce: {}", self.nonce)?;
        writeln!(f, "  Previous Hash: {}", self.previous_hash)?;
        writeln!(f, "  Current Hash: {}", self.current_hash)
    }
}
