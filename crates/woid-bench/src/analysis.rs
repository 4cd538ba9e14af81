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

//! End-to-end analysis of captured benchmark output.
//!
//! Lines are parsed, aggregated to medians, and each benchmark is compared
//! against its resolved baseline. The analysis never fails on bad data: it
//! returns whatever could be computed together with a list of diagnostics.

use crate::error::{BenchError, Result};
use crate::harness::{
    compute_speedups, AggregatedSeries, BaselinePolicy, Diagnostic, GroupedResults,
    ResultAggregator, SpeedupSeries,
};
use crate::ingest::{collect_lines, CapturedRun};
use crate::parser::parse_counted;
use serde::Serialize;
use std::collections::BTreeMap;

/// Comparison of one benchmark against its baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkComparison {
    /// Benchmark name.
    pub benchmark: String,
    /// Resolved baseline variant, or `None` if the policy matched nothing.
    pub baseline: Option<String>,
    /// Speedup series for every comparable non-baseline variant.
    pub speedups: Vec<SpeedupSeries>,
}

impl BenchmarkComparison {
    /// Returns true if a baseline was found.
    pub fn has_baseline(&self) -> bool {
        self.baseline.is_some()
    }

    /// Speedup series for a variant, if it was comparable.
    pub fn series(&self, variant: &str) -> Option<&SpeedupSeries> {
        self.speedups.iter().find(|s| s.variant == variant)
    }
}

/// Complete result of an analysis pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Baseline candidates that were used, in priority order.
    pub policy: Vec<String>,
    /// Number of input lines examined.
    pub line_count: usize,
    /// Number of measurement records extracted.
    pub record_count: usize,
    /// Median series per benchmark and variant.
    pub grouped: GroupedResults,
    /// Comparison per benchmark, keyed by benchmark name.
    pub comparisons: BTreeMap<String, BenchmarkComparison>,
    /// Non-fatal findings.
    pub diagnostics: Vec<Diagnostic>,
}

impl AnalysisReport {
    /// Number of benchmarks with aggregated data.
    pub fn benchmark_count(&self) -> usize {
        self.grouped.len()
    }

    /// Number of benchmarks for which a baseline was resolved.
    pub fn resolved_count(&self) -> usize {
        self.comparisons.values().filter(|c| c.has_baseline()).count()
    }

    /// Comparison for a benchmark.
    pub fn comparison(&self, benchmark: &str) -> Option<&BenchmarkComparison> {
        self.comparisons.get(benchmark)
    }

    /// Aggregated series for a benchmark and variant.
    pub fn series(&self, benchmark: &str, variant: &str) -> Option<&AggregatedSeries> {
        self.grouped.get(benchmark)?.get(variant)
    }

    /// Resolved baseline for a benchmark.
    pub fn baseline_for(&self, benchmark: &str) -> Option<&str> {
        self.comparisons.get(benchmark)?.baseline.as_deref()
    }

    /// Speedup series for a benchmark; empty if it had no baseline.
    pub fn speedups_for(&self, benchmark: &str) -> &[SpeedupSeries] {
        self.comparisons
            .get(benchmark)
            .map(|c| c.speedups.as_slice())
            .unwrap_or(&[])
    }

    /// Diagnostics that refer to a benchmark.
    pub fn diagnostics_for<'a>(
        &'a self,
        benchmark: &'a str,
    ) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.diagnostics
            .iter()
            .filter(move |d| d.benchmark() == Some(benchmark))
    }

    /// Fails if benchmarks were found but none of them had a baseline.
    ///
    /// This signals that the baseline policy does not fit the benchmark
    /// binary at all, as opposed to a few benchmarks lacking a reference.
    pub fn ensure_policy_matched(&self) -> Result<()> {
        if !self.grouped.is_empty() && self.resolved_count() == 0 {
            return Err(BenchError::NoBaselineMatched {
                policy: self.policy.clone(),
                benchmarks: self.grouped.len(),
            });
        }
        Ok(())
    }
}

/// Runs the analysis with a fixed baseline policy.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    policy: BaselinePolicy,
}

impl Analyzer {
    /// Creates an analyzer with the given baseline policy.
    pub fn new(policy: BaselinePolicy) -> Self {
        Self { policy }
    }

    /// The baseline policy in use.
    pub fn policy(&self) -> &BaselinePolicy {
        &self.policy
    }

    /// Analyzes raw output lines.
    pub fn analyze_lines<I, S>(&self, lines: I) -> AnalysisReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.analyze_with(lines, Vec::new())
    }

    /// Analyzes the output of several benchmark processes.
    ///
    /// Runs that did not exit successfully are dropped and reported.
    pub fn analyze_runs(&self, runs: &[CapturedRun]) -> AnalysisReport {
        let mut diagnostics = Vec::new();
        let lines = collect_lines(runs, &mut diagnostics);
        self.analyze_with(lines, diagnostics)
    }

    /// Compares already aggregated results.
    pub fn analyze_grouped(&self, grouped: GroupedResults) -> AnalysisReport {
        self.compare(grouped, 0, 0, Vec::new())
    }

    fn analyze_with<I, S>(&self, lines: I, diagnostics: Vec<Diagnostic>) -> AnalysisReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (records, line_count) = parse_counted(lines);

        let mut aggregator = ResultAggregator::new();
        aggregator.extend(records);
        let record_count = aggregator.record_count();

        self.compare(aggregator.finish(), line_count, record_count, diagnostics)
    }

    fn compare(
        &self,
        grouped: GroupedResults,
        line_count: usize,
        record_count: usize,
        mut diagnostics: Vec<Diagnostic>,
    ) -> AnalysisReport {
        let mut comparisons = BTreeMap::new();

        for (benchmark, variants) in &grouped {
            let baseline = self.policy.resolve(variants.keys().map(String::as_str));

            let comparison = match baseline {
                Some(baseline) => {
                    let outcome = compute_speedups(benchmark, variants, baseline);
                    diagnostics.extend(outcome.skipped);
                    BenchmarkComparison {
                        benchmark: benchmark.clone(),
                        baseline: Some(baseline.to_string()),
                        speedups: outcome.series,
                    }
                }
                None => {
                    tracing::warn!(
                        benchmark = benchmark.as_str(),
                        "no baseline variant found, skipping speedup"
                    );
                    diagnostics.push(Diagnostic::NoBaseline {
                        benchmark: benchmark.clone(),
                        variants: variants.keys().cloned().collect(),
                    });
                    BenchmarkComparison {
                        benchmark: benchmark.clone(),
                        baseline: None,
                        speedups: Vec::new(),
                    }
                }
            };

            comparisons.insert(benchmark.clone(), comparison);
        }

        AnalysisReport {
            policy: self.policy.candidates().to_vec(),
            line_count,
            record_count,
            grouped,
            comparisons,
            diagnostics,
        }
    }
}

/// Analyzes raw output lines with the given baseline policy.
///
/// # Example
///
/// ```
/// use woid_bench::analysis::analyze;
/// use woid_bench::harness::BaselinePolicy;
///
/// let lines = [
///     "BM_Call<std::function>/8   20 ns",
///     "BM_Call<woid::Fun<8>>/8    10 ns",
/// ];
/// let report = analyze(lines, &BaselinePolicy::default());
///
/// assert_eq!(report.baseline_for("BM_Call"), Some("std::function"));
/// assert_eq!(report.speedups_for("BM_Call")[0].speedups, vec![2.0]);
/// ```
pub fn analyze<I, S>(lines: I, policy: &BaselinePolicy) -> AnalysisReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Analyzer::new(policy.clone()).analyze_lines(lines)
}
