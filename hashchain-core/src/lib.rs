//! # Hashchain Core
//!
//! A tamper-evident, in-memory sequence of records. Each record stores a
//! payload, a nonce, the hash of its predecessor and a SHA-256 digest over
//! those three fields.
//!
//! - **Construction**: [`Record::new`] / [`HashChain::append`] link a new record
//!   to a prior hash
//! - **Mutation**: [`Record::mutate`] / [`HashChain::mutate`] edit a payload and
//!   refresh that record's hash only
//! - **Verification**: [`verify_chain`] and [`ChainVerifier`] walk the chain and
//!   detect broken hashes or links
//!
//! ## Example
//!
//! ```rust
//! use hashchain_core::{HashChain, FaultKind};
//!
//! let mut chain = HashChain::new();
//! chain.append("genesis", 0);
//! chain.append("b to a", 123);
//! chain.append("c to d", 789);
//! assert!(chain.verify());
//!
//! // Edit record 1 without re-linking record 2
//! chain.mutate(1, "forged").unwrap();
//!
//! let result = chain.verify_detailed();
//! assert!(!result.is_valid());
//! assert_eq!(result.first_invalid_index(), Some(2));
//! assert_eq!(result.fault_kind(), Some(FaultKind::ChainBroken));
//! ```

pub mod chain;
pub mod config;
pub mod demo;
pub mod digest;
pub mod error;

pub use chain::{
    verify_chain, ChainFault, ChainVerification, ChainVerifier, FaultKind, HashChain, Record,
    VerifyOptions, GENESIS_HASH,
};
pub use config::{ChainConfig, ChainConfigBuilder};
pub use digest::{digest, digest_record, digest_str};
pub use error::{ChainError, Result};
