//! Benchmark suite for feature extraction performance.
//!
//! Run with: `cargo bench`
//!
//! Measures:
//! - Temporal catalog throughput (mean, std, deseasonalized diff)
//! - Spatial catalog throughput (windowed stats, edge strength)
//! - Full feature-set extraction across the rayon pool

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use imagery_feature_extractor::{
    FeatureDecl, FeatureKind, FeatureService, FeatureSet, GridShape, ImageryStack, Preset,
};
use ndarray::Array3;

/// Synthetic stack: `side * side` pixels, 3 years of monthly steps, 8 bands.
fn synthetic_stack(side: usize) -> ImageryStack {
    let data = Array3::from_shape_fn((side * side, 36, 8), |(p, t, b)| {
        let seasonal = ((t % 12) as f64 / 12.0 * std::f64::consts::TAU).sin();
        p as f64 * 0.01 + seasonal + b as f64 * 0.1 + t as f64 * 0.002
    });
    ImageryStack::new(data, GridShape::new(side, side)).unwrap()
}

fn bench_temporal_features(c: &mut Criterion) {
    let stack = synthetic_stack(64);
    let mut group = c.benchmark_group("temporal");

    for (label, decl) in [
        ("mean", FeatureDecl::new(FeatureKind::Mean, 0)),
        ("std", FeatureDecl::new(FeatureKind::Std, 0)),
        (
            "deseasonalized_diff",
            FeatureDecl::new(FeatureKind::DeseasonalizedDiff, 0),
        ),
    ] {
        let service = FeatureService::new(stack.clone(), FeatureSet::new(vec![decl]));
        group.bench_function(label, |b| {
            b.iter(|| black_box(service.extract().unwrap()))
        });
    }
    group.finish();
}

fn bench_spatial_features(c: &mut Criterion) {
    let stack = synthetic_stack(64);
    let mut group = c.benchmark_group("spatial");

    for (label, decl) in [
        (
            "spatial_std_w5",
            FeatureDecl::new(FeatureKind::SpatialStd, 0),
        ),
        (
            "spatial_cv_w5",
            FeatureDecl::new(FeatureKind::SpatialCv, 0),
        ),
        (
            "edge_strength_s1",
            FeatureDecl::new(FeatureKind::SpatialEdgeStrength, 0),
        ),
    ] {
        let service = FeatureService::new(stack.clone(), FeatureSet::new(vec![decl]));
        group.bench_function(label, |b| {
            b.iter(|| black_box(service.extract().unwrap()))
        });
    }
    group.finish();
}

fn bench_full_catalog(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_catalog");
    group.sample_size(20);

    for side in [32usize, 64] {
        let service = FeatureService::new(
            synthetic_stack(side),
            Preset::FullCatalog.feature_set(),
        );
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{side}x{side}")),
            &side,
            |b, _| b.iter(|| black_box(service.extract().unwrap())),
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_temporal_features,
    bench_spatial_features,
    bench_full_catalog
);
criterion_main!(benches);
