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

//! CLI command definitions and argument parsing.
//!
//! Commands are grouped by category and flattened into one top-level
//! command list:
//!
//! - [`analysis`]: analyze captured output, or build and run a benchmark
//! - [`utility`]: shell completion

mod analysis;
mod utility;

use crate::error::CliError;
use clap::{ArgAction, Parser, Subcommand};

pub use analysis::{AnalysisArgs, AnalysisCommands, FormatArg, ModeArg};
pub use utility::UtilityCommands;

/// Woid - type-erasure benchmark analysis
///
/// Parses Google-Benchmark-style output, takes the median of repeated
/// samples and reports the speedup of every implementation over a
/// reference such as `std::any` or `std::function`.
#[derive(Parser)]
#[command(name = "woid")]
#[command(author, version, about = "Woid - type-erasure benchmark analysis", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    // Analysis commands - flattened to appear at top level
    #[command(flatten)]
    Analysis(AnalysisCommands),

    // Utility commands - flattened to appear at top level
    #[command(flatten)]
    Utility(UtilityCommands),
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if reading, building, running or saving fails, or if
    /// the baseline policy matches none of the benchmarks found.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Analysis(cmd) => cmd.execute(),
            Commands::Utility(cmd) => cmd.execute(),
        }
    }
}
