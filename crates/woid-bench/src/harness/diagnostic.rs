// Woid - type-erasure benchmark analysis
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Non-fatal findings recorded while analyzing benchmark output.

use crate::harness::aggregator::display_variant;
use serde::Serialize;
use std::fmt;

/// A data-quality finding that excluded something from the comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A variant was measured at a different number of sizes than the baseline.
    SizeMismatch {
        /// Benchmark name.
        benchmark: String,
        /// Variant that was skipped.
        variant: String,
        /// Number of sizes measured for the variant.
        variant_len: usize,
        /// Number of sizes measured for the baseline.
        baseline_len: usize,
    },
    /// No observed variant matched the baseline policy.
    NoBaseline {
        /// Benchmark name.
        benchmark: String,
        /// Variants that were observed.
        variants: Vec<String>,
    },
    /// A benchmark process did not exit successfully; its output was dropped.
    FailedRun {
        /// Label of the run (usually the link-shuffle seed).
        label: String,
        /// Exit status, if the process exited normally.
        status: Option<i32>,
    },
}

impl Diagnostic {
    /// Benchmark the diagnostic refers to, if any.
    pub fn benchmark(&self) -> Option<&str> {
        match self {
            Diagnostic::SizeMismatch { benchmark, .. } | Diagnostic::NoBaseline { benchmark, .. } => {
                Some(benchmark.as_str())
            }
            Diagnostic::FailedRun { .. } => None,
        }
    }

    /// Short machine-friendly reason string.
    pub fn reason(&self) -> &'static str {
        match self {
            Diagnostic::SizeMismatch { .. } => "size_mismatch",
            Diagnostic::NoBaseline { .. } => "no_baseline",
            Diagnostic::FailedRun { .. } => "failed_run",
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::SizeMismatch {
                benchmark,
                variant,
                variant_len,
                baseline_len,
            } => write!(
                f,
                "Data point count mismatch ({} vs {}) for {} in {}, speedup skipped",
                variant_len,
                baseline_len,
                display_variant(variant),
                benchmark
            ),
            Diagnostic::NoBaseline {
                benchmark,
                variants,
            } => write!(
                f,
                "Cannot calculate speedup for '{}': no baseline among [{}]",
                benchmark,
                variants
                    .iter()
                    .map(|v| display_variant(v))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Diagnostic::FailedRun { label, status } => match status {
                Some(code) => write!(f, "Run '{}' exited with status {}, output dropped", label, code),
                None => write!(f, "Run '{}' was terminated by a signal, output dropped", label),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_mismatch_display() {
        let diagnostic = Diagnostic::SizeMismatch {
            benchmark: "BM_Call".to_string(),
            variant: "VShape".to_string(),
            variant_len: 2,
            baseline_len: 3,
        };
        let msg = diagnostic.to_string();
        assert!(msg.contains("2 vs 3"));
        assert!(msg.contains("VShape"));
        assert!(msg.contains("BM_Call"));
        assert_eq!(diagnostic.benchmark(), Some("BM_Call"));
        assert_eq!(diagnostic.reason(), "size_mismatch");
    }

    #[test]
    fn test_failed_run_display() {
        let diagnostic = Diagnostic::FailedRun {
            label: "seed 17".to_string(),
            status: Some(3),
        };
        assert!(diagnostic.to_string().contains("status 3"));
        assert_eq!(diagnostic.benchmark(), None);
    }

    #[test]
    fn test_no_baseline_lists_unnamed_variant() {
        let diagnostic = Diagnostic::NoBaseline {
            benchmark: "BM_Plain".to_string(),
            variants: vec![String::new(), "woid::Any".to_string()],
        };
        assert!(diagnostic
            .to_string()
            .ends_with("no baseline among [(unnamed), woid::Any]"));
    }

    #[test]
    fn test_serialize_tagged() {
        let diagnostic = Diagnostic::NoBaseline {
            benchmark: "BM_Copy".to_string(),
            variants: vec!["woid::Any".to_string()],
        };
        let json = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(json["kind"], "no_baseline");
        assert_eq!(json["benchmark"], "BM_Copy");
    }
}
