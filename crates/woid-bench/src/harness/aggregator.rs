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

//! Grouping of measurement records and median reduction.
//!
//! Samples are grouped by benchmark, then variant, then problem size. Each
//! size is reduced to the median of its samples, which keeps a single
//! unlucky link layout from skewing the estimate.

use crate::error::{BenchError, Result};
use crate::parser::MeasurementRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// Grouping key used for records that name no variant.
///
/// Measurement lines never carry an empty `<>` variant, so this key cannot
/// collide with a named one.
pub const UNNAMED_VARIANT: &str = "";

/// Display name of [`UNNAMED_VARIANT`].
pub const UNNAMED_LABEL: &str = "(unnamed)";

/// Display name of a variant key.
///
/// ```
/// use woid_bench::harness::{display_variant, UNNAMED_VARIANT};
///
/// assert_eq!(display_variant(UNNAMED_VARIANT), "(unnamed)");
/// assert_eq!(display_variant("VShape"), "VShape");
/// ```
pub fn display_variant(name: &str) -> &str {
    if name == UNNAMED_VARIANT {
        UNNAMED_LABEL
    } else {
        name
    }
}

/// Aggregated results: benchmark name -> variant name -> series.
pub type GroupedResults = BTreeMap<String, BTreeMap<String, AggregatedSeries>>;

/// Median timings of one (benchmark, variant) pair across problem sizes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedSeries {
    sizes: Vec<u64>,
    times: Vec<f64>,
    samples: Vec<usize>,
}

impl AggregatedSeries {
    /// Builds a series from parallel size and time columns.
    ///
    /// Sizes must be strictly increasing and both columns the same length.
    /// Each point is recorded as backed by a single sample.
    pub fn new(sizes: Vec<u64>, times: Vec<f64>) -> Result<Self> {
        if sizes.len() != times.len() {
            return Err(BenchError::InvalidSeries(format!(
                "{} sizes but {} times",
                sizes.len(),
                times.len()
            )));
        }
        if sizes.windows(2).any(|w| w[0] >= w[1]) {
            return Err(BenchError::InvalidSeries(
                "sizes must be strictly increasing".to_string(),
            ));
        }
        let samples = vec![1; sizes.len()];
        Ok(Self {
            sizes,
            times,
            samples,
        })
    }

    /// Problem sizes in ascending order.
    pub fn sizes(&self) -> &[u64] {
        &self.sizes
    }

    /// Median time per size, aligned with [`sizes`](Self::sizes).
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Number of raw samples behind each median.
    pub fn sample_counts(&self) -> &[usize] {
        &self.samples
    }

    /// Number of points in the series.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Returns true if the series has no points.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Iterates over `(size, median_ns)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (u64, f64)> + '_ {
        self.sizes.iter().copied().zip(self.times.iter().copied())
    }

    /// Median time at a given size, if measured.
    pub fn time_at(&self, size: u64) -> Option<f64> {
        self.sizes
            .binary_search(&size)
            .ok()
            .map(|index| self.times[index])
    }
}

/// Collects measurement records and reduces them to [`GroupedResults`].
///
/// # Example
///
/// ```
/// use woid_bench::harness::ResultAggregator;
/// use woid_bench::parser::MeasurementRecord;
///
/// let mut aggregator = ResultAggregator::new();
/// aggregator.push(MeasurementRecord::new("BM_Call", "VShape", 64, 10.0));
/// aggregator.push(MeasurementRecord::new("BM_Call", "VShape", 64, 30.0));
///
/// let grouped = aggregator.finish();
/// assert_eq!(grouped["BM_Call"]["VShape"].times(), &[20.0]);
/// ```
#[derive(Debug, Default)]
pub struct ResultAggregator {
    samples: BTreeMap<String, BTreeMap<String, BTreeMap<u64, Vec<f64>>>>,
    record_count: usize,
}

impl ResultAggregator {
    /// Creates an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one record to its (benchmark, variant, size) group.
    pub fn push(&mut self, record: MeasurementRecord) {
        let variant = record
            .variant_name
            .unwrap_or_else(|| UNNAMED_VARIANT.to_string());

        self.samples
            .entry(record.benchmark_name)
            .or_default()
            .entry(variant)
            .or_default()
            .entry(record.problem_size)
            .or_default()
            .push(record.time_ns);
        self.record_count += 1;
    }

    /// Number of records consumed so far.
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Reduces every group to its median series.
    pub fn finish(self) -> GroupedResults {
        let grouped: GroupedResults = self
            .samples
            .into_iter()
            .map(|(benchmark, variants)| {
                let series = variants
                    .into_iter()
                    .map(|(variant, by_size)| (variant, reduce_group(by_size)))
                    .collect();
                (benchmark, series)
            })
            .collect();

        tracing::debug!(
            records = self.record_count,
            benchmarks = grouped.len(),
            "aggregated measurements"
        );
        grouped
    }
}

impl Extend<MeasurementRecord> for ResultAggregator {
    fn extend<I: IntoIterator<Item = MeasurementRecord>>(&mut self, records: I) {
        for record in records {
            self.push(record);
        }
    }
}

/// Groups records and reduces them in one step.
pub fn group_results<I>(records: I) -> GroupedResults
where
    I: IntoIterator<Item = MeasurementRecord>,
{
    let mut aggregator = ResultAggregator::new();
    aggregator.extend(records);
    aggregator.finish()
}

/// Computes the median of a sample list.
///
/// For an even number of samples the mean of the two central values is
/// returned. Returns `None` for an empty slice. The slice is sorted in place.
pub fn median(samples: &mut [f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    samples.sort_by(|a, b| a.total_cmp(b));

    let mid = samples.len() / 2;
    if samples.len() % 2 == 0 {
        Some((samples[mid - 1] + samples[mid]) / 2.0)
    } else {
        Some(samples[mid])
    }
}

fn reduce_group(by_size: BTreeMap<u64, Vec<f64>>) -> AggregatedSeries {
    let mut sizes = Vec::with_capacity(by_size.len());
    let mut times = Vec::with_capacity(by_size.len());
    let mut samples = Vec::with_capacity(by_size.len());

    // BTreeMap keys come out ascending and unique.
    for (size, mut values) in by_size {
        if let Some(value) = median(&mut values) {
            sizes.push(size);
            times.push(value);
            samples.push(values.len());
        }
    }

    AggregatedSeries {
        sizes,
        times,
        samples,
    }
}
