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

//! Measurement line parsing.
//!
//! Benchmark binaries print one result per line in the shape
//!
//! ```text
//! BM_Insert<std::any>/1024    120.5 ns    119.8 ns   5600000
//! ```
//!
//! where the `<...>` variant block is optional. Sizes and times are ASCII
//! decimal numbers. Everything that does not follow this shape (banners,
//! CPU info, context lines) is ignored.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static MEASUREMENT_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^\s*(?P<bench>[^<]+?)",
        r"(?:<(?P<variant>.+?)>)?/",
        r"(?P<size>[0-9]+).*?",
        r"\s+(?P<time>[0-9.]+)\s+ns.*$",
    ))
    .expect("measurement line pattern is valid")
});

/// One timing sample extracted from a benchmark output line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    /// Benchmark case, e.g. `BM_Insert`.
    pub benchmark_name: String,
    /// Implementation under test, without the surrounding angle brackets.
    pub variant_name: Option<String>,
    /// Input scale of the sample.
    pub problem_size: u64,
    /// Wall time in nanoseconds. Fractional values are kept.
    pub time_ns: f64,
}

impl MeasurementRecord {
    /// Creates a record for a named variant.
    pub fn new(
        benchmark_name: impl Into<String>,
        variant_name: impl Into<String>,
        problem_size: u64,
        time_ns: f64,
    ) -> Self {
        Self {
            benchmark_name: benchmark_name.into(),
            variant_name: Some(variant_name.into()),
            problem_size,
            time_ns,
        }
    }

    /// Creates a record for a line that named no variant.
    pub fn unnamed(benchmark_name: impl Into<String>, problem_size: u64, time_ns: f64) -> Self {
        Self {
            benchmark_name: benchmark_name.into(),
            variant_name: None,
            problem_size,
            time_ns,
        }
    }
}

/// Parses a single line of benchmark output.
///
/// Returns `None` for any line that does not match the measurement grammar,
/// including lines whose numeric fields cannot be converted.
///
/// # Example
///
/// ```
/// use woid_bench::parser::parse_line;
///
/// let record = parse_line("BM_Call<VShape>/64 iterations 45 ns").unwrap();
/// assert_eq!(record.benchmark_name, "BM_Call");
/// assert_eq!(record.variant_name.as_deref(), Some("VShape"));
/// assert_eq!(record.problem_size, 64);
/// assert_eq!(record.time_ns, 45.0);
///
/// assert!(parse_line("Run on (20 X 4700 MHz CPU s)").is_none());
/// ```
pub fn parse_line(line: &str) -> Option<MeasurementRecord> {
    let caps = MEASUREMENT_LINE.captures(line.trim())?;

    let problem_size = caps["size"].parse::<u64>().ok()?;
    let time_ns = caps["time"].parse::<f64>().ok()?;

    Some(MeasurementRecord {
        benchmark_name: caps["bench"].to_string(),
        variant_name: caps.name("variant").map(|m| m.as_str().to_string()),
        problem_size,
        time_ns,
    })
}

/// Parses every line and keeps the measurements.
pub fn parse_lines<I, S>(lines: I) -> Vec<MeasurementRecord>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_counted(lines).0
}

/// Parses every line, also returning how many lines were examined.
pub(crate) fn parse_counted<I, S>(lines: I) -> (Vec<MeasurementRecord>, usize)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut total = 0usize;
    let records: Vec<MeasurementRecord> = lines
        .into_iter()
        .inspect(|_| total += 1)
        .filter_map(|line| parse_line(line.as_ref()))
        .collect();

    tracing::debug!(
        lines = total,
        measurements = records.len(),
        "parsed benchmark output"
    );
    (records, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_with_variant() {
        let record = parse_line("BM_Insert<std::any>/1024    120.5 ns   (some suffix)").unwrap();
        assert_eq!(record.benchmark_name, "BM_Insert");
        assert_eq!(record.variant_name.as_deref(), Some("std::any"));
        assert_eq!(record.problem_size, 1024);
        assert_eq!(record.time_ns, 120.5);
    }

    #[test]
    fn test_parse_line_with_text_before_time() {
        let record = parse_line("BM_Call<VShape>/64 iterations 45 ns").unwrap();
        assert_eq!(record.variant_name.as_deref(), Some("VShape"));
        assert_eq!(record.problem_size, 64);
        assert_eq!(record.time_ns, 45.0);
    }

    #[test]
    fn test_parse_line_nested_template_variant() {
        let record =
            parse_line("BM_Copy<woid::Any<Big, alignof(void*)>>/256   98.25 ns   97.9 ns  7000")
                .unwrap();
        assert_eq!(record.benchmark_name, "BM_Copy");
        assert_eq!(
            record.variant_name.as_deref(),
            Some("woid::Any<Big, alignof(void*)>")
        );
        assert_eq!(record.problem_size, 256);
        assert_eq!(record.time_ns, 98.25);
    }

    #[test]
    fn test_parse_line_takes_first_time_column() {
        let record = parse_line("BM_Move<std::function>/8   10.5 ns   10.1 ns   68000000").unwrap();
        assert_eq!(record.time_ns, 10.5);
    }

    #[test]
    fn test_parse_line_without_variant() {
        let record = parse_line("BM_Baseline/16   3 ns   3 ns   1000").unwrap();
        assert_eq!(record.benchmark_name, "BM_Baseline");
        assert_eq!(record.variant_name, None);
        assert_eq!(record.problem_size, 16);
        assert_eq!(record.time_ns, 3.0);
    }

    #[test]
    fn test_parse_line_trims_whitespace() {
        let record = parse_line("   BM_Sort<VShape>/32   7.75 ns  \t").unwrap();
        assert_eq!(record.benchmark_name, "BM_Sort");
        assert_eq!(record.time_ns, 7.75);
    }

    #[test]
    fn test_parse_line_requires_separator() {
        assert!(parse_line("BM_Insert<std::any> 1024 120 ns").is_none());
        assert!(parse_line("BM_Insert 120 ns").is_none());
    }

    #[test]
    fn test_parse_line_requires_ns_unit() {
        assert!(parse_line("BM_Insert<std::any>/1024 120 us").is_none());
        assert!(parse_line("BM_Insert<std::any>/1024 120").is_none());
    }

    #[test]
    fn test_parse_line_rejects_noise() {
        assert!(parse_line("").is_none());
        assert!(parse_line("---------------------------------------------").is_none());
        assert!(parse_line("Benchmark            Time             CPU   Iterations").is_none());
        assert!(parse_line("SEED: 4242").is_none());
    }

    #[test]
    fn test_parse_line_rejects_malformed_time() {
        assert!(parse_line("BM_Insert<std::any>/1024 1.2.3 ns").is_none());
        assert!(parse_line("BM_Insert<std::any>/1024 . ns").is_none());
    }

    #[test]
    fn test_parse_line_rejects_overflowing_size() {
        assert!(parse_line("BM_Insert<std::any>/99999999999999999999999 12 ns").is_none());
    }

    #[test]
    fn test_parse_line_rejects_empty_variant() {
        assert!(parse_line("BM_Insert<>/16 12 ns").is_none());
    }

    #[test]
    fn test_parse_line_numbers_are_ascii_decimal() {
        assert!(parse_line("BM<std::any>/\u{661}\u{662} 5 ns").is_none());
        assert!(parse_line("BM<std::any>/12 \u{665} ns").is_none());
        assert_eq!(parse_line("BM<std::any>/12 5 ns").unwrap().problem_size, 12);
    }

    #[test]
    fn test_parse_counted_reports_examined_lines() {
        let (records, lines) = parse_counted(["noise", "BM<VShape>/1 2 ns", ""]);
        assert_eq!(lines, 3);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_parse_lines_skips_non_measurements() {
        let lines = [
            "2025-01-01T00:00:00+00:00",
            "Running build/CopyBench",
            "BM_Copy<std::any>/8   20 ns   20 ns  100",
            "BM_Copy<VShape>/8   10 ns   10 ns  100",
            "***WARNING*** CPU scaling is enabled",
        ];
        let records = parse_lines(lines);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], MeasurementRecord::new("BM_Copy", "std::any", 8, 20.0));
        assert_eq!(records[1], MeasurementRecord::new("BM_Copy", "VShape", 8, 10.0));
    }
}
