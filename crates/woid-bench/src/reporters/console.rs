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

//! Console reporter for speedup comparisons.

use crate::analysis::{AnalysisReport, BenchmarkComparison};
use crate::config::AnalysisConfig;
use std::io::{self, Write};

/// Prints the full report to standard output.
pub fn print_report(report: &AnalysisReport, config: &AnalysisConfig) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    // Nothing useful can be done if stdout is gone.
    let _ = write_report(&mut out, report, config);
}

/// Writes the full report to any writer.
pub fn write_report<W: Write>(
    out: &mut W,
    report: &AnalysisReport,
    config: &AnalysisConfig,
) -> io::Result<()> {
    writeln!(out, "\n{}", "=".repeat(80))?;
    writeln!(out, "SPEEDUP REPORT")?;
    writeln!(out, "{}", "=".repeat(80))?;
    writeln!(
        out,
        "Lines: {}  Measurements: {}  Benchmarks: {}  With baseline: {}",
        report.line_count,
        report.record_count,
        report.benchmark_count(),
        report.resolved_count()
    )?;

    for comparison in report.comparisons.values() {
        write_comparison(out, comparison, config)?;
    }

    if !report.diagnostics.is_empty() {
        writeln!(out, "\n{}", "-".repeat(80))?;
        writeln!(out, "DIAGNOSTICS:")?;
        writeln!(out, "{}", "-".repeat(80))?;
        for diagnostic in &report.diagnostics {
            writeln!(out, "  - {}", diagnostic)?;
        }
    }

    writeln!(out, "{}\n", "=".repeat(80))
}

fn write_comparison<W: Write>(
    out: &mut W,
    comparison: &BenchmarkComparison,
    config: &AnalysisConfig,
) -> io::Result<()> {
    writeln!(out, "\n{}", "-".repeat(80))?;
    writeln!(out, "Speedup Comparison for: {}", comparison.benchmark)?;
    writeln!(out, "{}", "-".repeat(80))?;

    let Some(baseline) = comparison.baseline.as_deref() else {
        writeln!(out, "  (no baseline variant found, speedup not computed)")?;
        return Ok(());
    };
    writeln!(out, "Baseline: {}", config.variant_label(baseline))?;

    if comparison.speedups.is_empty() {
        writeln!(out, "  (no comparable variants)")?;
        return Ok(());
    }

    for series in &comparison.speedups {
        let geomean = series
            .geometric_mean()
            .map(|g| format!("{:.3}x", g))
            .unwrap_or_else(|| "n/a".to_string());
        writeln!(
            out,
            "  {} (geomean {})",
            config.variant_label(&series.variant),
            geomean
        )?;
        for (size, speedup) in series.points() {
            writeln!(out, "    {:>12}  {}", size, format_speedup(speedup))?;
        }
    }
    Ok(())
}

fn format_speedup(speedup: f64) -> String {
    if speedup.is_finite() {
        format!("{:.3}x", speedup)
    } else {
        "n/a".to_string()
    }
}
