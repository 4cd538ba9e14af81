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

//! Speedup computation against a baseline variant.
//!
//! A speedup above 1.0 means the variant is faster than the baseline at
//! that size; below 1.0 means it is slower.

use crate::harness::aggregator::AggregatedSeries;
use crate::harness::diagnostic::Diagnostic;
use serde::Serialize;
use std::collections::BTreeMap;

/// Relative performance of one variant against the baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeedupSeries {
    /// Variant name.
    pub variant: String,
    /// Problem sizes, taken from the variant's series.
    pub sizes: Vec<u64>,
    /// Baseline time divided by variant time, per size. NaN marks an
    /// unusable timing and serializes as `null`.
    pub speedups: Vec<f64>,
}

impl SpeedupSeries {
    /// Iterates over `(size, speedup)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (u64, f64)> + '_ {
        self.sizes.iter().copied().zip(self.speedups.iter().copied())
    }

    /// Geometric mean of the finite, positive speedups.
    pub fn geometric_mean(&self) -> Option<f64> {
        let logs: Vec<f64> = self
            .speedups
            .iter()
            .filter(|s| s.is_finite() && **s > 0.0)
            .map(|s| s.ln())
            .collect();

        if logs.is_empty() {
            None
        } else {
            Some((logs.iter().sum::<f64>() / logs.len() as f64).exp())
        }
    }
}

/// Speedup series for one benchmark plus the variants that were skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeedupOutcome {
    /// One series per comparable non-baseline variant, sorted by variant name.
    pub series: Vec<SpeedupSeries>,
    /// Variants excluded from the comparison.
    pub skipped: Vec<Diagnostic>,
}

/// Ratio of baseline time to variant time.
///
/// Returns NaN when either time is non-finite, negative, or the variant
/// time is zero.
///
/// ```
/// use woid_bench::harness::comparator::speedup_ratio;
///
/// assert_eq!(speedup_ratio(100.0, 50.0), 2.0);
/// assert!(speedup_ratio(100.0, 0.0).is_nan());
/// ```
pub fn speedup_ratio(baseline_ns: f64, variant_ns: f64) -> f64 {
    let usable = |t: f64| t.is_finite() && t >= 0.0;
    if !usable(baseline_ns) || !usable(variant_ns) || variant_ns == 0.0 {
        f64::NAN
    } else {
        baseline_ns / variant_ns
    }
}

/// Computes speedups of every variant against `baseline`.
///
/// Variants whose number of sizes differs from the baseline's are skipped
/// and reported as [`Diagnostic::SizeMismatch`]. If `baseline` is not among
/// the variants the outcome is empty.
pub fn compute_speedups(
    benchmark: &str,
    variants: &BTreeMap<String, AggregatedSeries>,
    baseline: &str,
) -> SpeedupOutcome {
    let Some(base) = variants.get(baseline) else {
        tracing::warn!(benchmark, baseline, "baseline variant has no data");
        return SpeedupOutcome::default();
    };

    let mut outcome = SpeedupOutcome::default();

    for (variant, series) in variants {
        if variant == baseline {
            continue;
        }

        if series.len() != base.len() {
            tracing::warn!(
                benchmark,
                variant = variant.as_str(),
                variant_len = series.len(),
                baseline_len = base.len(),
                "data point count mismatch, skipping speedup"
            );
            outcome.skipped.push(Diagnostic::SizeMismatch {
                benchmark: benchmark.to_string(),
                variant: variant.clone(),
                variant_len: series.len(),
                baseline_len: base.len(),
            });
            continue;
        }

        let speedups = base
            .times()
            .iter()
            .zip(series.times())
            .map(|(&b, &v)| speedup_ratio(b, v))
            .collect();

        outcome.series.push(SpeedupSeries {
            variant: variant.clone(),
            sizes: series.sizes().to_vec(),
            speedups,
        });
    }

    outcome
}
