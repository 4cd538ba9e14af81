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

//! CSV export for speedup tables and raw medians.

use crate::analysis::{AnalysisReport, BenchmarkComparison};
use crate::config::AnalysisConfig;
use crate::error::{BenchError, Result};
use crate::harness::display_variant;
use std::path::Path;

/// Writes one benchmark's speedup series in long format.
///
/// Columns: `benchmark, baseline, variant, size, speedup`. NaN speedups are
/// written as empty cells.
pub fn export_speedup_csv(
    comparison: &BenchmarkComparison,
    config: &AnalysisConfig,
    path: &Path,
) -> Result<()> {
    let mut writer = ::csv::Writer::from_path(path)?;
    writer.write_record(["benchmark", "baseline", "variant", "size", "speedup"])?;

    let baseline = comparison
        .baseline
        .as_deref()
        .map(|b| config.variant_label(b))
        .unwrap_or_default();

    for series in &comparison.speedups {
        let label = config.variant_label(&series.variant);
        for (size, speedup) in series.points() {
            let size = size.to_string();
            let speedup = format_speedup(speedup);
            writer.write_record([
                comparison.benchmark.as_str(),
                baseline.as_str(),
                label.as_str(),
                size.as_str(),
                speedup.as_str(),
            ])?;
        }
    }

    writer.flush().map_err(|e| BenchError::io_error(path, e))?;
    Ok(())
}

/// Writes every aggregated median.
///
/// Columns: `benchmark, variant, size, median_ns, samples`.
pub fn export_medians_csv(report: &AnalysisReport, path: &Path) -> Result<()> {
    let mut writer = ::csv::Writer::from_path(path)?;
    writer.write_record(["benchmark", "variant", "size", "median_ns", "samples"])?;

    for (benchmark, variants) in &report.grouped {
        for (variant, series) in variants {
            for ((size, median), samples) in series.points().zip(series.sample_counts()) {
                let (size, median, samples) =
                    (size.to_string(), median.to_string(), samples.to_string());
                writer.write_record([
                    benchmark.as_str(),
                    display_variant(variant),
                    size.as_str(),
                    median.as_str(),
                    samples.as_str(),
                ])?;
            }
        }
    }

    writer.flush().map_err(|e| BenchError::io_error(path, e))?;
    Ok(())
}

fn format_speedup(speedup: f64) -> String {
    if speedup.is_nan() {
        String::new()
    } else {
        format!("{:.6}", speedup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::harness::BaselinePolicy;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_export_speedup_csv() {
        let lines = [
            "BM_Copy<std::any>/8 100 ns",
            "BM_Copy<std::any>/16 90 ns",
            "BM_Copy<woid::Any<Big, alignof(void*)>>/8 50 ns",
            "BM_Copy<woid::Any<Big, alignof(void*)>>/16 0 ns",
        ];
        let report = analyze(lines, &BaselinePolicy::default());
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("speedup.csv");

        export_speedup_csv(
            report.comparison("BM_Copy").unwrap(),
            &AnalysisConfig::default(),
            &path,
        )
        .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let rows: Vec<&str> = content.lines().collect();
        assert_eq!(rows[0], "benchmark,baseline,variant,size,speedup");
        assert_eq!(rows[1], "BM_Copy,std::any,woid::Any<Big>,8,2.000000");
        assert_eq!(rows[2], "BM_Copy,std::any,woid::Any<Big>,16,");
    }

    #[test]
    fn test_export_medians_csv() {
        let lines = [
            "BM_Copy<std::any>/8 100 ns",
            "BM_Copy<std::any>/8 120 ns",
            "BM_Plain/4 3.5 ns",
        ];
        let report = analyze(lines, &BaselinePolicy::default());
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("medians.csv");

        export_medians_csv(&report, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("BM_Copy,std::any,8,110,2"));
        assert!(content.contains("BM_Plain,(unnamed),4,3.5,1"));
    }
}
