// Copyright (c) the dct2 Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Timing of the 2D transform over a sweep of square matrix sizes.

use std::time::{Duration, Instant};

use color_eyre::eyre::{Result, WrapErr, eyre};
use dct2::{Transform2d, TransformOptions};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use tracing::{debug, info, instrument};

pub const DEFAULT_SIZES: [usize; 7] = [25, 50, 100, 200, 400, 800, 1600];

#[derive(Debug, Clone)]
pub struct SweepConfig {
    pub sizes: Vec<usize>,
    pub seed: u64,
    /// Samples are drawn uniformly from `[0, max_value]`.
    pub max_value: f64,
    pub repeat: usize,
    pub options: TransformOptions,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            seed: 0,
            max_value: 255.0,
            repeat: 1,
            options: TransformOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeTiming {
    pub size: usize,
    pub best: Duration,
    pub mean: Duration,
    /// DC coefficient of the last run, printed so the work cannot be skipped.
    pub dc: f64,
}

/// `max_value` must be finite and non-negative.
pub fn random_matrix(rng: &mut impl Rng, n: usize, max_value: f64) -> Vec<Vec<f64>> {
    (0..n)
        .map(|_| (0..n).map(|_| rng.random_range(0.0..=max_value)).collect())
        .collect()
}

/// Floor of `total / runs`, so the mean is never below the fastest run.
fn mean_duration(total: Duration, runs: usize) -> Duration {
    let nanos = total.as_nanos() / runs.max(1) as u128;
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}

/// Times one plan per size, `config.repeat` runs each.
#[instrument(level = "debug", skip_all, fields(sizes = config.sizes.len()))]
pub fn run_sweep(config: &SweepConfig) -> Result<Vec<SizeTiming>> {
    if config.repeat == 0 {
        return Err(eyre!("repeat count must be positive"));
    }
    if !config.max_value.is_finite() || config.max_value < 0.0 {
        return Err(eyre!(
            "maximum sample value must be finite and non-negative, got {}",
            config.max_value
        ));
    }

    let mut rng = ChaCha12Rng::seed_from_u64(config.seed);
    let mut timings = Vec::with_capacity(config.sizes.len());
    for &size in &config.sizes {
        let matrix = random_matrix(&mut rng, size, config.max_value);
        let mut plan = Transform2d::new(size, size, config.options)
            .wrap_err_with(|| format!("building {size}x{size} plan"))?;

        let mut best = Duration::MAX;
        let mut total = Duration::ZERO;
        let mut dc = 0.0;
        for run in 0..config.repeat {
            let start = Instant::now();
            let output = plan
                .transform(&matrix)
                .wrap_err_with(|| format!("transforming {size}x{size} matrix"))?;
            let elapsed = start.elapsed();
            debug!(size, run, ?elapsed, "transformed");
            best = best.min(elapsed);
            total += elapsed;
            dc = output[0][0];
        }
        let mean = mean_duration(total, config.repeat);
        info!(size, ?best, ?mean, "size done");
        timings.push(SizeTiming {
            size,
            best,
            mean,
            dc,
        });
    }
    Ok(timings)
}

pub fn format_summary(timings: &[SizeTiming]) -> String {
    let header = format!(
        "{:>8} {:>14} {:>14} {:>14}\n",
        "size", "best (ms)", "mean (ms)", "dc"
    );
    let rows = timings.iter().map(|timing| {
        format!(
            "{:>8} {:>14.3} {:>14.3} {:>14.3}\n",
            format!("{0}x{0}", timing.size),
            timing.best.as_secs_f64() * 1e3,
            timing.mean.as_secs_f64() * 1e3,
            timing.dc,
        )
    });
    std::iter::once(header).chain(rows).collect()
}
