//! Tamper demonstration
//!
//! Builds the three-record chain, rewrites one payload, verifies, and hashes
//! a literal string. Rendering is split from the run so both the text and
//! JSON forms can be checked without spawning the binary.

use std::fmt::Write as _;

use serde::Serialize;

use crate::chain::{ChainVerification, ChainVerifier, HashChain, Record};
use crate::config::ChainConfig;
use crate::digest::digest_str;
use crate::error::Result;

/// Payloads and nonces of the demonstration chain
pub const DEMO_RECORDS: [(&str, i64); 3] = [("genesis", 0), ("b to a", 123), ("c to d", 789)];

/// What to tamper with and what to hash
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoOptions {
    pub tamper_index: usize,
    pub forged_payload: String,
    pub literal: String,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            tamper_index: 1,
            forged_payload: "forged".to_string(),
            literal: "hello world".to_string(),
        }
    }
}

/// Everything a demo run produced
#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    pub tamper_index: usize,
    pub forged_payload: String,
    /// Why the edit was not applied, if it wasn't
    pub tamper_skipped: Option<String>,
    pub original: Vec<Record>,
    pub tampered: Vec<Record>,
    /// First record whose stored hash changed
    pub divergence: Option<usize>,
    pub verification: ChainVerification,
    pub literal: String,
    pub literal_digest: String,
}

/// Run the demonstration on a fresh chain
pub fn run(config: ChainConfig, options: &DemoOptions) -> DemoReport {
    let mut chain = HashChain::with_config(config);
    for (payload, nonce) in DEMO_RECORDS {
        chain.append(payload, nonce);
    }
    let original = chain.records().to_vec();

    let tamper_skipped = match chain.mutate(options.tamper_index, options.forged_payload.as_str()) {
        Ok(()) => None,
        Err(e) => {
            tracing::warn!("Skipping tamper step: {}", e);
            Some(e.to_string())
        }
    };

    DemoReport {
        tamper_index: options.tamper_index,
        forged_payload: options.forged_payload.clone(),
        tamper_skipped,
        divergence: ChainVerifier::find_divergence(&original, chain.records()),
        verification: chain.verify_detailed(),
        original,
        tampered: chain.records().to_vec(),
        literal: options.literal.clone(),
        literal_digest: digest_str(&options.literal),
    }
}

impl DemoReport {
    /// Human-readable rendering, sections in run order
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        out.push_str("=== Original chain ===\n");
        out.push_str(&self.original.iter().cloned().collect::<HashChain>().to_string());
        out.push('\n');

        match &self.tamper_skipped {
            None => {
                let _ = writeln!(
                    out,
                    "=== After rewriting record {} to \"{}\" ===",
                    self.tamper_index + 1,
                    self.forged_payload
                );
            }
            Some(reason) => {
                let _ = writeln!(
                    out,
                    "=== After mutation step (skipped: {}) ===",
                    reason
                );
            }
        }
        out.push_str(&self.tampered.iter().cloned().collect::<HashChain>().to_string());
        out.push('\n');

        match &self.verification.fault {
            None => out.push_str("Chain verification: PASSED\n"),
            Some(fault) => {
                let _ = writeln!(
                    out,
                    "Chain verification: FAILED at record {} ({})",
                    fault.index + 1,
                    fault.kind
                );
            }
        }
        if let Some(index) = self.divergence {
            let _ = writeln!(out, "First changed hash: record {}", index + 1);
        }
        out.push('\n');

        let _ = writeln!(out, "Digest(\"{}\"): {}", self.literal, self.literal_digest);
        out
    }

    /// Pretty JSON rendering of the whole report
    pub fn render_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::FaultKind;

    #[test]
    fn test_default_run_detects_tamper() {
        let report = run(ChainConfig::default(), &DemoOptions::default());

        assert!(report.tamper_skipped.is_none());
        assert_eq!(report.original.len(), 3);
        assert_eq!(report.tampered[1].payload(), "forged");
        assert_eq!(report.divergence, Some(1));
        assert_eq!(report.verification.first_invalid_index(), Some(2));
        assert_eq!(report.verification.fault_kind(), Some(FaultKind::ChainBroken));
    }

    #[test]
    fn test_tampering_last_record_passes() {
        let options = DemoOptions {
            tamper_index: 2,
            ..DemoOptions::default()
        };
        let report = run(ChainConfig::default(), &options);

        assert!(report.verification.is_valid());
        assert_eq!(report.divergence, Some(2));
        assert!(report.render_text().contains("Chain verification: PASSED"));
    }

    #[test]
    fn test_out_of_range_tamper_still_reprints() {
        let options = DemoOptions {
            tamper_index: 9,
            ..DemoOptions::default()
        };
        let report = run(ChainConfig::default(), &options);

        assert!(report.tamper_skipped.is_some());
        assert_eq!(report.original, report.tampered);
        assert_eq!(report.divergence, None);

        let text = report.render_text();
        assert!(text.contains("=== After mutation step (skipped: Record not found at index 9"));
        assert_eq!(text.matches("Record 1:").count(), 2);
        assert!(text.contains("Chain verification: PASSED"));
    }

    #[test]
    fn test_json_rendering() {
        let report = run(ChainConfig::default(), &DemoOptions::default());
        let json: serde_json::Value = serde_json::from_str(&report.render_json().unwrap()).unwrap();

        assert_eq!(json["divergence"], 1);
        assert_eq!(json["verification"]["fault"]["index"], 2);
        assert_eq!(json["verification"]["fault"]["kind"], "chain_broken");
        assert_eq!(json["tampered"][1]["payload"], "forged");
        assert_eq!(json["literal_digest"], digest_str("hello world"));
        assert!(json["tamper_skipped"].is_null());
    }
}
