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

//! Comparative analysis harness.
//!
//! Turns parsed measurements into comparable series.
//!
//! # Modules
//!
//! - `aggregator`: grouping and median reduction of repeated samples
//! - `baseline`: baseline policy and variant resolution
//! - `comparator`: speedup series against the resolved baseline
//! - `diagnostic`: non-fatal findings reported alongside the results

pub mod aggregator;
pub mod baseline;
pub mod comparator;
pub mod diagnostic;

pub use aggregator::{
    display_variant, group_results, median, AggregatedSeries, GroupedResults, ResultAggregator,
    UNNAMED_LABEL, UNNAMED_VARIANT,
};
pub use baseline::{resolve_baseline, variant_base, BaselinePolicy, DEFAULT_BASELINES};
pub use comparator::{compute_speedups, speedup_ratio, SpeedupOutcome, SpeedupSeries};
pub use diagnostic::Diagnostic;
