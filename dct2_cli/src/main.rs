// Copyright (c) the dct2 Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use clap::{ArgAction, Parser, ValueEnum};
use color_eyre::eyre::Result;
use dct2::{CoefficientMode, TransformOptions};
use dct2_cli::check::run_check;
use dct2_cli::sweep::{DEFAULT_SIZES, SweepConfig, format_summary, run_sweep};
use tracing::level_filters::LevelFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Coefficients {
    /// Evaluate cosines inside the kernel
    OnTheFly,
    /// Precompute a cosine table per transform length
    Table,
}

impl From<Coefficients> for CoefficientMode {
    fn from(value: Coefficients) -> Self {
        match value {
            Coefficients::OnTheFly => CoefficientMode::OnTheFly,
            Coefficients::Table => CoefficientMode::Table,
        }
    }
}

/// Times the 2D DCT-II on random square matrices.
#[derive(Parser)]
#[command(version)]
struct Opt {
    /// Matrix sizes to sweep
    #[clap(long, value_delimiter = ',', default_values_t = DEFAULT_SIZES)]
    sizes: Vec<usize>,

    /// Seed for the input generator
    #[clap(long, default_value_t = 0)]
    seed: u64,

    /// Samples are drawn uniformly from [0, max-value]
    #[clap(long, default_value_t = 255.0)]
    max_value: f64,

    /// Coefficient source for the transform contexts
    #[clap(long, value_enum, default_value_t = Coefficients::OnTheFly)]
    coefficients: Coefficients,

    /// Transform all rows through one shared context
    #[clap(long)]
    share_row_context: bool,

    /// Run the row and column passes on the rayon thread pool
    #[clap(long)]
    parallel: bool,

    /// Timed runs per size
    #[clap(long, default_value_t = 1)]
    repeat: usize,

    /// Only run the known-value self-test
    #[clap(long)]
    check: bool,

    /// More logging; repeat for more detail. RUST_LOG takes precedence.
    #[clap(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let opt = Opt::parse();
    init_tracing(opt.verbose);

    if opt.check {
        run_check()?;
        println!("self-test passed");
        return Ok(());
    }

    let options = TransformOptions::default()
        .with_coefficients(opt.coefficients.into())
        .with_share_row_context(opt.share_row_context)
        .with_parallel(opt.parallel);
    let config = SweepConfig {
        sizes: opt.sizes,
        seed: opt.seed,
        max_value: opt.max_value,
        repeat: opt.repeat,
        options,
    };

    let timings = run_sweep(&config)?;
    for timing in &timings {
        println!(
            "Time taken by {0}x{0} matrix: {1:.3} ms",
            timing.size,
            timing.best.as_secs_f64() * 1e3
        );
    }
    println!();
    print!("{}", format_summary(&timings));
    Ok(())
}
