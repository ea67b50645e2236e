// Copyright (c) the dct2 Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use criterion::measurement::Measurement;
use criterion::{criterion_group, criterion_main, BenchmarkGroup, BenchmarkId, Criterion};
use dct2::blocks::{encode_blocks, BlockParams};
use dct2::{
    transform_1d, transform_2d_with_options, CoefficientMode, Transform2d, TransformContext,
    TransformOptions,
};
use std::hint::black_box;

const SIZES: [usize; 5] = [25, 50, 100, 200, 400];

fn input_row(n: usize) -> Vec<f64> {
    (0..n).map(|i| ((i * 37) % 256) as f64).collect()
}

fn input_matrix(n: usize) -> Vec<Vec<f64>> {
    (0..n)
        .map(|r| (0..n).map(|c| ((r * 31 + c * 17) % 256) as f64).collect())
        .collect()
}

fn bench_1d(c: &mut BenchmarkGroup<'_, impl Measurement>, n: usize) {
    let input = input_row(n);

    c.bench_function(BenchmarkId::new("contextless", n), |b| {
        b.iter(|| transform_1d(black_box(&input)))
    });

    for (name, mode) in [
        ("context", CoefficientMode::OnTheFly),
        ("context_table", CoefficientMode::Table),
    ] {
        let Ok(mut context) = TransformContext::with_mode(n, mode) else {
            return;
        };
        c.bench_function(BenchmarkId::new(name, n), |b| {
            b.iter(|| {
                let _ = black_box(context.transform(black_box(&input)));
            })
        });
    }
}

fn bench_2d(c: &mut BenchmarkGroup<'_, impl Measurement>, n: usize) {
    let matrix = input_matrix(n);

    let modes = [
        ("default", TransformOptions::default()),
        (
            "table",
            TransformOptions::default()
                .with_coefficients(CoefficientMode::Table)
                .with_share_row_context(true),
        ),
        ("parallel", TransformOptions::default().with_parallel(true)),
    ];
    for (name, options) in modes {
        c.bench_function(BenchmarkId::new(name, format_args!("{n}x{n}")), |b| {
            b.iter(|| transform_2d_with_options(black_box(&matrix), options))
        });
    }

    let Ok(mut plan) = Transform2d::new(n, n, TransformOptions::default()) else {
        return;
    };
    c.bench_function(BenchmarkId::new("reused_plan", format_args!("{n}x{n}")), |b| {
        b.iter(|| plan.transform(black_box(&matrix)))
    });
}

fn dct1d_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("dct1d");
    for n in SIZES {
        bench_1d(&mut group, n);
    }
    group.finish();
}

fn dct2d_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("dct2d");
    for n in SIZES {
        bench_2d(&mut group, n);
    }
    group.finish();
}

fn block_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("blocks");
    let matrix = input_matrix(256);
    for (block_size, cutoff) in [(8, 8), (16, 16), (32, 32)] {
        let Ok(params) = BlockParams::new(block_size, cutoff) else {
            continue;
        };
        group.bench_function(BenchmarkId::new("encode_256x256", block_size), |b| {
            b.iter(|| encode_blocks(black_box(&matrix), params))
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(20);
    targets = dct1d_benches, dct2d_benches, block_benches
);
criterion_main!(benches);
