//! Hash chain records, the chain container and verification
//!
//! ## Key Properties
//!
//! - **Linked**: Each record stores the hash of its predecessor
//! - **Self-Hashing**: Each record stores a digest over its own fields
//! - **Tamper-Evident**: Editing a record breaks the link to its successor
//!
//! ```text
//! Record 0                 Record 1                 Record 2
//! ─────────────────        ─────────────────        ─────────────────
//! previous: GENESIS   ┌──► previous: H0        ┌──► previous: H1
//! current:  H0 ───────┘    current:  H1 ───────┘    current:  H2
//! ```

mod hash_chain;
mod record;
mod verify;

pub use hash_chain::HashChain;
pub use record::Record;
pub use verify::{
    verify_chain, ChainFault, ChainVerification, ChainVerifier, FaultKind, VerifyOptions,
};

/// Genesis hash - used as previous_hash for the first appended record
pub const GENESIS_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";
