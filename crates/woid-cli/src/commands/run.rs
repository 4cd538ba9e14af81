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

//! Run command - rebuild and execute a benchmark under several link orders

use super::finish;
use crate::error::CliError;
use crate::process::{execute, shuffle_seeds, BuildConfig};
use colored::Colorize;
use woid_bench::{AnalysisConfig, Analyzer, CapturedRun, OutputMode};

/// Options for the run command.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// CMake build settings.
    pub build: BuildConfig,
    /// Benchmark target to build and execute.
    pub target: String,
    /// Number of repetitions, each with its own link-shuffle seed.
    pub reps: usize,
    /// Master seed the per-repetition seeds are derived from.
    pub seed: u64,
    /// Arguments passed to the benchmark binary.
    pub args: Vec<String>,
    /// Record failed runs as diagnostics instead of aborting.
    pub keep_going: bool,
}

/// Build and execute the target once per derived seed, then analyze all
/// captured output together.
///
/// # Errors
///
/// Returns `Err` if `reps` is zero, configuring or building fails, the binary
/// is missing, a run fails without `keep_going`, saving fails, or the
/// baseline policy matches none of the benchmarks found.
pub fn run(
    options: &RunOptions,
    config: &AnalysisConfig,
    mode: OutputMode,
) -> Result<(), CliError> {
    if options.reps == 0 {
        return Err(CliError::invalid_input("--reps must be at least 1"));
    }

    let binary = options.build.binary_path(&options.target);
    let seeds = shuffle_seeds(options.seed, options.reps);
    let mut runs: Vec<CapturedRun> = Vec::with_capacity(seeds.len());

    for (rep, seed) in seeds.iter().copied().enumerate() {
        tracing::info!(rep = rep + 1, reps = options.reps, seed, "starting repetition");
        options.build.configure(seed)?;
        options.build.build(&options.target)?;

        let captured = execute(&binary, &options.args, &format!("seed {}", seed))?;

        println!("{} {}", "SEED:".bright_blue().bold(), seed);
        for line in captured.lines() {
            println!("{}", line);
        }

        if !captured.succeeded() {
            if !options.keep_going {
                return Err(CliError::CommandFailed {
                    command: binary.display().to_string(),
                    status: captured.status,
                });
            }
            eprintln!(
                "{} seed {} ({})",
                "✗ Run failed:".red().bold(),
                seed,
                captured.stderr.trim_end()
            );
        }
        runs.push(captured);
    }

    let report = Analyzer::new(config.baselines.clone()).analyze_runs(&runs);
    tracing::info!(
        runs = runs.len(),
        records = report.record_count,
        benchmarks = report.benchmark_count(),
        "analysis complete"
    );

    finish(&report, config, mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_rejects_zero_reps() {
        let options = RunOptions {
            build: BuildConfig::default(),
            target: "CopyBench".to_string(),
            reps: 0,
            seed: 1,
            args: Vec::new(),
            keep_going: false,
        };
        let err = run(&options, &AnalysisConfig::default(), OutputMode::Show).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
    }
}
