//! Error types for hash chain operations
//!
//! Digest computation is total, so the only runtime failure a chain can
//! report is an integrity violation. The remaining variants cover lookups,
//! configuration and JSON rendering.
//!
//! # Error Codes
//!
//! Each variant has a stable error code (e.g., `INTEGRITY_VIOLATION`) suitable
//! for matching in callers and aggregating in logs.
//!
//! # Example
//!
//! ```rust
//! use hashchain_core::{HashChain, error::ErrorCategory};
//!
//! let mut chain = HashChain::new();
//! chain.append("genesis", 0);
//!
//! let err = chain.mutate(5, "forged").unwrap_err();
//! assert_eq!(err.category(), ErrorCategory::NotFound);
//! assert_eq!(err.error_code(), "RECORD_NOT_FOUND");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chain::FaultKind;

/// Result type alias for hash chain operations
pub type Result<T> = std::result::Result<T, ChainError>;

/// Error category for grouping related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Record index out of range
    NotFound,
    /// Configuration or input rejected
    Validation,
    /// Chain failed verification
    Integrity,
    /// Rendering or internal failure
    Internal,
}

/// Errors that can occur in hash chain operations
#[derive(Error, Debug)]
pub enum ChainError {
    /// No record exists at the requested position
    #[error("Record not found at index {index}: chain holds {len} record(s).")]
    RecordNotFound { index: usize, len: usize },

    /// Verification detected a broken self-hash or link
    #[error("Chain integrity violation at record {index} ({kind}): {reason}. The chain may have been tampered with.")]
    IntegrityViolation {
        index: usize,
        kind: FaultKind,
        reason: String,
    },

    /// Configuration value is unusable
    #[error("Invalid chain configuration: {reason}")]
    InvalidConfig { reason: String },

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ChainError {
    /// Returns the error category for grouping
    pub fn category(&self) -> ErrorCategory {
        match self {
            ChainError::RecordNotFound { .. } => ErrorCategory::NotFound,
            ChainError::InvalidConfig { .. } => ErrorCategory::Validation,
            ChainError::IntegrityViolation { .. } => ErrorCategory::Integrity,
            ChainError::JsonError(_) => ErrorCategory::Internal,
        }
    }

    /// Returns the stable error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ChainError::RecordNotFound { .. } => "RECORD_NOT_FOUND",
            ChainError::IntegrityViolation { .. } => "INTEGRITY_VIOLATION",
            ChainError::InvalidConfig { .. } => "INVALID_CONFIG",
            ChainError::JsonError(_) => "JSON_ERROR",
        }
    }

    /// Returns true if this error reports tampering
    pub fn is_integrity_violation(&self) -> bool {
        matches!(self, ChainError::IntegrityViolation { .. })
    }

    /// Converts this error to a JSON-serializable response object
    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
                category: self.category(),
            },
        }
    }
}

/// JSON-serializable error envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error details
    pub error: ErrorDetail,
}

/// Error detail for JSON output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Stable error code (e.g., "RECORD_NOT_FOUND")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Error category
    pub category: ErrorCategory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ChainError::RecordNotFound { index: 3, len: 1 }.error_code(),
            "RECORD_NOT_FOUND"
        );
        assert_eq!(
            ChainError::InvalidConfig {
                reason: "bad".to_string()
            }
            .error_code(),
            "INVALID_CONFIG"
        );
    }

    #[test]
    fn test_error_categories() {
        let err = ChainError::IntegrityViolation {
            index: 2,
            kind: FaultKind::ChainBroken,
            reason: "link mismatch".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Integrity);
        assert!(err.is_integrity_violation());

        assert_eq!(
            ChainError::RecordNotFound { index: 0, len: 0 }.category(),
            ErrorCategory::NotFound
        );
    }

    #[test]
    fn test_error_messages_are_helpful() {
        let msg = ChainError::IntegrityViolation {
            index: 2,
            kind: FaultKind::ChainBroken,
            reason: "previous hash does not match".to_string(),
        }
        .to_string();
        assert!(msg.contains("record 2"));
        assert!(msg.contains("chain_broken"));
        assert!(msg.contains("tampered"));

        let msg = ChainError::RecordNotFound { index: 7, len: 3 }.to_string();
        assert!(msg.contains("index 7"));
        assert!(msg.contains("3 record(s)"));
    }

    #[test]
    fn test_error_response_serialization() {
        let err = ChainError::RecordNotFound { index: 9, len: 3 };
        let json = serde_json::to_string_pretty(&err.to_error_response()).unwrap();
        assert!(json.contains("RECORD_NOT_FOUND"));
        assert!(json.contains("not_found"));

        let parsed: ErrorResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.error.code, "RECORD_NOT_FOUND");
        assert_eq!(parsed.error.category, ErrorCategory::NotFound);
    }
}
