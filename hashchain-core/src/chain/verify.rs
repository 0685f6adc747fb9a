//! Hash chain verification
//!
//! Walks a record sequence and confirms every stored hash and every link is
//! consistent. Any single failure marks the whole chain invalid.

use serde::{Deserialize, Serialize};

use super::{record::Record, GENESIS_HASH};

/// Verify a chain of records
///
/// For every record after the first, checks that its stored hash matches
/// its fields and that its `previous_hash` equals its predecessor's hash.
/// Empty and single-record chains are valid.
pub fn verify_chain(records: &[Record]) -> bool {
    ChainVerifier::verify(records, &VerifyOptions::default()).is_valid()
}

/// Which check a record failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
    /// Stored hash differs from the digest of the record's fields
    HashMismatch,
    /// `previous_hash` differs from the predecessor's stored hash
    ChainBroken,
    /// Record 0 is not linked to the configured sentinel
    InvalidGenesis,
}

impl FaultKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FaultKind::HashMismatch => "hash_mismatch",
            FaultKind::ChainBroken => "chain_broken",
            FaultKind::InvalidGenesis => "invalid_genesis",
        }
    }
}

impl std::fmt::Display for FaultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First broken record found by a walk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainFault {
    pub index: usize,
    pub kind: FaultKind,
    /// Stored and expected hashes, for humans
    pub detail: String,
}

/// Outcome of walking a chain
///
/// `tip_hash` is the hash a new record would link to: the last record's
/// stored hash, or the genesis sentinel for an empty chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainVerification {
    pub record_count: usize,
    pub tip_hash: String,
    pub fault: Option<ChainFault>,
}

impl ChainVerification {
    pub fn is_valid(&self) -> bool {
        self.fault.is_none()
    }

    pub fn first_invalid_index(&self) -> Option<usize> {
        self.fault.as_ref().map(|f| f.index)
    }

    pub fn fault_kind(&self) -> Option<FaultKind> {
        self.fault.as_ref().map(|f| f.kind)
    }
}

/// Options controlling how strictly the first record is checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyOptions {
    /// Also check record 0's hash and its link to `genesis_hash`
    pub check_genesis: bool,
    /// Sentinel the first record must link to when `check_genesis` is set
    pub genesis_hash: String,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            check_genesis: false,
            genesis_hash: GENESIS_HASH.to_string(),
        }
    }
}

/// Hash chain verifier
pub struct ChainVerifier;

impl ChainVerifier {
    /// Verify a chain of records, stopping at the first fault
    ///
    /// Each record after the first must hash correctly and then link to its
    /// predecessor. With `check_genesis`, record 0 must also link to the
    /// sentinel and hash correctly.
    pub fn verify(records: &[Record], options: &VerifyOptions) -> ChainVerification {
        let tip_hash = records
            .last()
            .map(|r| r.current_hash.clone())
            .unwrap_or_else(|| options.genesis_hash.clone());

        ChainVerification {
            record_count: records.len(),
            tip_hash,
            fault: Self::first_fault(records, options),
        }
    }

    fn first_fault(records: &[Record], options: &VerifyOptions) -> Option<ChainFault> {
        let first = records.first()?;

        if options.check_genesis {
            if first.previous_hash != options.genesis_hash {
                return Some(Self::fault(
                    0,
                    FaultKind::InvalidGenesis,
                    format!(
                        "links to {:?}, sentinel is {:?}",
                        first.previous_hash, options.genesis_hash
                    ),
                ));
            }
            if let Some(fault) = Self::check_self_hash(0, first) {
                return Some(fault);
            }
        }

        records.windows(2).enumerate().find_map(|(i, pair)| {
            let (prev, record) = (&pair[0], &pair[1]);
            let index = i + 1;

            Self::check_self_hash(index, record).or_else(|| {
                (record.previous_hash != prev.current_hash).then(|| {
                    Self::fault(
                        index,
                        FaultKind::ChainBroken,
                        format!(
                            "links to {}, predecessor hash is {}",
                            record.previous_hash, prev.current_hash
                        ),
                    )
                })
            })
        })
    }

    fn check_self_hash(index: usize, record: &Record) -> Option<ChainFault> {
        let computed = record.compute_hash();
        (computed != record.current_hash).then(|| {
            Self::fault(
                index,
                FaultKind::HashMismatch,
                format!("stored {}, computed {}", record.current_hash, computed),
            )
        })
    }

    fn fault(index: usize, kind: FaultKind, detail: String) -> ChainFault {
        tracing::warn!(index, kind = %kind, "chain verification failed: {}", detail);
        ChainFault {
            index,
            kind,
            detail,
        }
    }

    /// Index of the first record whose stored hash differs between two chains
    ///
    /// A length difference counts as divergence at the shorter length.
    pub fn find_divergence(chain_a: &[Record], chain_b: &[Record]) -> Option<usize> {
        chain_a
            .iter()
            .zip(chain_b)
            .position(|(a, b)| a.current_hash != b.current_hash)
            .or_else(|| {
                (chain_a.len() != chain_b.len()).then(|| chain_a.len().min(chain_b.len()))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_chain() -> Vec<Record> {
        let first = Record::new("genesis", 0, "");
        let second = Record::new("b to a", 123, first.current_hash.clone());
        let third = Record::new("c to d", 789, second.current_hash.clone());
        vec![first, second, third]
    }

    #[test]
    fn test_verify_valid_chain() {
        let chain = create_test_chain();
        let result = ChainVerifier::verify(&chain, &VerifyOptions::default());

        assert!(result.is_valid());
        assert_eq!(result.record_count, 3);
        assert!(result.fault.is_none());
        assert_eq!(result.tip_hash, chain[2].current_hash());
        assert!(verify_chain(&chain));
    }

    #[test]
    fn test_verify_trivial_chains() {
        assert!(verify_chain(&[]));
        assert!(verify_chain(&[Record::new("alone", 1, "anything")]));

        let result = ChainVerifier::verify(&[], &VerifyOptions::default());
        assert!(result.is_valid());
        assert_eq!(result.record_count, 0);
        assert_eq!(result.tip_hash, GENESIS_HASH);
    }

    #[test]
    fn test_single_record_with_bad_hash_passes_default_walk() {
        let mut record = Record::new("alone", 1, "");
        record.forge_current_hash("bogus");
        assert!(verify_chain(&[record]));
    }

    #[test]
    fn test_detect_hash_mismatch() {
        let mut chain = create_test_chain();

        // Tamper with payload without refreshing the hash
        chain[1].payload = "b to z".to_string();

        let result = ChainVerifier::verify(&chain, &VerifyOptions::default());

        assert!(!result.is_valid());
        assert_eq!(result.first_invalid_index(), Some(1));
        assert_eq!(result.fault_kind(), Some(FaultKind::HashMismatch));
        // Tip is still reported for an invalid chain
        assert_eq!(result.tip_hash, chain[2].current_hash());
    }

    #[test]
    fn test_detect_broken_link_after_mutation() {
        let mut chain = create_test_chain();
        chain[1].mutate("forged");

        assert!(chain[1].verify_hash());

        let result = ChainVerifier::verify(&chain, &VerifyOptions::default());

        assert_eq!(result.first_invalid_index(), Some(2));
        assert_eq!(result.fault_kind(), Some(FaultKind::ChainBroken));
        assert!(!verify_chain(&chain));
    }

    #[test]
    fn test_detect_forged_link() {
        let mut chain = create_test_chain();
        chain[2].previous_hash = "invalid_hash".to_string();
        chain[2].current_hash = chain[2].compute_hash();

        let result = ChainVerifier::verify(&chain, &VerifyOptions::default());

        assert_eq!(result.first_invalid_index(), Some(2));
        assert_eq!(result.fault_kind(), Some(FaultKind::ChainBroken));
        let detail = &result.fault.unwrap().detail;
        assert!(detail.contains("invalid_hash"));
    }

    #[test]
    fn test_genesis_check() {
        let chain = create_test_chain();
        let strict = VerifyOptions {
            check_genesis: true,
            genesis_hash: GENESIS_HASH.to_string(),
        };

        let result = ChainVerifier::verify(&chain, &strict);
        assert_eq!(result.first_invalid_index(), Some(0));
        assert_eq!(result.fault_kind(), Some(FaultKind::InvalidGenesis));

        let empty_sentinel = VerifyOptions {
            check_genesis: true,
            genesis_hash: String::new(),
        };
        assert!(ChainVerifier::verify(&chain, &empty_sentinel).is_valid());
    }

    #[test]
    fn test_genesis_check_catches_first_record_tamper() {
        let mut chain = create_test_chain();
        chain[0].payload = "rewritten".to_string();

        // Stored hash is unchanged, so the link to record 1 still holds and
        // only the genesis check sees the edit.
        assert!(verify_chain(&chain));

        let strict = VerifyOptions {
            check_genesis: true,
            genesis_hash: String::new(),
        };
        let result = ChainVerifier::verify(&chain, &strict);
        assert_eq!(result.first_invalid_index(), Some(0));
        assert_eq!(result.fault_kind(), Some(FaultKind::HashMismatch));
    }

    #[test]
    fn test_fault_kind_names() {
        assert_eq!(FaultKind::ChainBroken.to_string(), "chain_broken");
        assert_eq!(
            serde_json::to_string(&FaultKind::InvalidGenesis).unwrap(),
            "\"invalid_genesis\""
        );
    }

    #[test]
    fn test_find_divergence() {
        let chain_a = create_test_chain();
        let mut chain_b = chain_a.clone();

        assert!(ChainVerifier::find_divergence(&chain_a, &chain_b).is_none());

        chain_b[2].mutate("c to e");
        assert_eq!(ChainVerifier::find_divergence(&chain_a, &chain_b), Some(2));

        chain_b.pop();
        assert_eq!(ChainVerifier::find_divergence(&chain_a, &chain_b), Some(2));
    }
}
