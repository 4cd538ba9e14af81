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

//! Analysis commands: `analyze` and `run`.

use crate::commands::{self, RunOptions};
use crate::error::CliError;
use crate::process::BuildConfig;
use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;
use woid_bench::{AnalysisConfig, BaselinePolicy, ExportFormat, OutputMode};

/// How results are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Print tables to stdout
    Show,
    /// Write result files to the output directory
    Save,
}

impl From<ModeArg> for OutputMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Show => OutputMode::Show,
            ModeArg::Save => OutputMode::Save,
        }
    }
}

/// Result file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Json,
    Csv,
    Console,
}

impl From<FormatArg> for ExportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Json => ExportFormat::Json,
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Console => ExportFormat::Console,
        }
    }
}

/// Options shared by every command that produces a report.
#[derive(Args, Debug, Clone)]
pub struct AnalysisArgs {
    /// JSON configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Baseline candidate, highest priority first (repeatable; replaces the configured list)
    #[arg(short, long = "baseline", value_name = "NAME")]
    pub baselines: Vec<String>,

    /// Presentation mode
    #[arg(short, long, value_enum, default_value = "show")]
    pub mode: ModeArg,

    /// Directory for saved results
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Formats written in save mode (repeatable; replaces the configured list)
    #[arg(short, long = "format", value_enum, value_name = "FORMAT")]
    pub formats: Vec<FormatArg>,
}

impl AnalysisArgs {
    /// Resolve the effective configuration: file (or defaults), then flags.
    pub fn to_config(&self) -> Result<AnalysisConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::load(path)?,
            None => AnalysisConfig::default(),
        };

        if !self.baselines.is_empty() {
            config = config.with_baselines(BaselinePolicy::new(&self.baselines)?);
        }
        if let Some(dir) = &self.output_dir {
            config = config.with_output_dir(dir);
        }
        if !self.formats.is_empty() {
            config = config
                .with_export_formats(self.formats.iter().copied().map(ExportFormat::from).collect());
        }

        tracing::debug!(?config, "effective configuration");
        Ok(config)
    }

    /// Presentation mode.
    pub fn output_mode(&self) -> OutputMode {
        self.mode.into()
    }
}

/// Analysis commands.
#[derive(Subcommand)]
pub enum AnalysisCommands {
    /// Analyze captured benchmark output
    ///
    /// Every file is treated as one repetition of the same benchmark binary.
    /// Medians are taken across all files before speedups are computed.
    Analyze {
        /// Files holding captured benchmark output
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        analysis: AnalysisArgs,
    },

    /// Build and run a benchmark target under several link orders
    ///
    /// Each repetition reconfigures CMake with a fresh link-shuffle seed,
    /// rebuilds the target and captures its output. Arguments after `--`
    /// are passed to the benchmark binary.
    Run {
        /// Number of repetitions
        #[arg(long)]
        reps: usize,

        /// Master seed for the link-shuffle seeds
        #[arg(long)]
        seed: u64,

        /// CMake target to build and execute
        #[arg(short, long)]
        target: String,

        /// CMake source directory
        #[arg(long, default_value = ".")]
        source_dir: PathBuf,

        /// CMake build directory
        #[arg(long, default_value = "build")]
        build_dir: PathBuf,

        /// CMAKE_BUILD_TYPE
        #[arg(long, default_value = "Release")]
        build_type: String,

        /// Compiler selection passed as CC_SELECTION
        #[arg(long, default_value = "clang")]
        compiler: String,

        /// Parallel build jobs
        #[arg(short, long, default_value = "20")]
        jobs: usize,

        /// Keep going after a failed run, reporting it as a diagnostic
        #[arg(long)]
        keep_going: bool,

        /// Arguments for the benchmark binary
        #[arg(last = true, value_name = "ARGS")]
        args: Vec<String>,

        #[command(flatten)]
        analysis: AnalysisArgs,
    },
}

impl AnalysisCommands {
    /// Execute the analysis command.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            AnalysisCommands::Analyze { files, analysis } => {
                let config = analysis.to_config()?;
                commands::analyze(&files, &config, analysis.output_mode())
            }
            AnalysisCommands::Run {
                reps,
                seed,
                target,
                source_dir,
                build_dir,
                build_type,
                compiler,
                jobs,
                keep_going,
                args,
                analysis,
            } => {
                let config = analysis.to_config()?;
                let options = RunOptions {
                    build: BuildConfig {
                        source_dir,
                        build_dir,
                        build_type,
                        compiler,
                        jobs,
                    },
                    target,
                    reps,
                    seed,
                    args,
                    keep_going,
                };
                commands::run(&options, &config, analysis.output_mode())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn parse(args: &[&str]) -> AnalysisCommands {
        match Cli::try_parse_from(args).unwrap().command {
            Commands::Analysis(cmd) => cmd,
            Commands::Utility(_) => panic!("expected an analysis command"),
        }
    }

    #[test]
    fn test_analysis_args_override_config() {
        let cmd = parse(&[
            "woid", "analyze", "a.txt", "b.txt", "-b", "VShape", "-b", "std::any", "--mode",
            "save", "-o", "plots", "-f", "json",
        ]);
        let AnalysisCommands::Analyze { files, analysis } = cmd else {
            panic!("expected analyze");
        };
        assert_eq!(files.len(), 2);
        assert_eq!(analysis.output_mode(), OutputMode::Save);

        let config = analysis.to_config().unwrap();
        assert_eq!(config.baselines.candidates(), ["VShape", "std::any"]);
        assert_eq!(config.output_dir, PathBuf::from("plots"));
        assert_eq!(config.export_formats, vec![ExportFormat::Json]);
    }

    #[test]
    fn test_invalid_baseline_rejected() {
        let cmd = parse(&["woid", "analyze", "a.txt", "-b", "std::function<void()>"]);
        let AnalysisCommands::Analyze { analysis, .. } = cmd else {
            panic!("expected analyze");
        };
        assert!(matches!(analysis.to_config(), Err(CliError::Analysis(_))));
    }

    #[test]
    fn test_run_collects_binary_args() {
        let cmd = parse(&[
            "woid",
            "run",
            "--reps",
            "3",
            "--seed",
            "7",
            "--target",
            "CopyBench",
            "--",
            "--benchmark_filter=BM_Copy",
        ]);
        let AnalysisCommands::Run {
            reps,
            seed,
            target,
            jobs,
            args,
            analysis,
            ..
        } = cmd
        else {
            panic!("expected run");
        };
        assert_eq!((reps, seed, jobs), (3, 7, 20));
        assert_eq!(target, "CopyBench");
        assert_eq!(args, vec!["--benchmark_filter=BM_Copy"]);
        assert_eq!(analysis.output_mode(), OutputMode::Show);
    }

    #[test]
    fn test_run_requires_reps_and_seed() {
        assert!(Cli::try_parse_from(["woid", "run", "--target", "CopyBench"]).is_err());
    }
}
