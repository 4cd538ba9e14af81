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

//! Woid Benchmark Analysis
//!
//! Turns the text output of repeated micro-benchmark runs into speedup
//! series against a reference implementation.
//!
//! ## Pipeline
//!
//! - **Parsing**: extract `(benchmark, variant, size, time)` from output lines
//! - **Aggregation**: median of repeated samples per benchmark, variant and size
//! - **Baseline resolution**: pick the reference variant by a priority list
//! - **Speedups**: baseline time divided by variant time at every size
//!
//! ## Usage
//!
//! ```
//! use woid_bench::{analyze, BaselinePolicy};
//!
//! let output = "\
//! BM_Insert<std::any>/1024      120 ns    119 ns   5600000
//! BM_Insert<woid::Any<int>>/1024 60 ns     60 ns  11000000";
//!
//! let report = analyze(output.lines(), &BaselinePolicy::default());
//! assert_eq!(report.baseline_for("BM_Insert"), Some("std::any"));
//! assert_eq!(report.speedups_for("BM_Insert")[0].speedups, vec![2.0]);
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod harness;
pub mod ingest;
pub mod parser;
pub mod reporters;

pub use analysis::{analyze, AnalysisReport, Analyzer, BenchmarkComparison};
pub use config::{AnalysisConfig, ExportFormat};
pub use error::{BenchError, Result};
pub use harness::{
    display_variant, AggregatedSeries, BaselinePolicy, Diagnostic, GroupedResults, SpeedupSeries,
    UNNAMED_VARIANT,
};
pub use ingest::CapturedRun;
pub use parser::{parse_line, parse_lines, MeasurementRecord};
pub use reporters::{present, OutputMode};
