//! Criterion benchmarks for the hot shading paths.

use alnshade::annotation::AnnotationRow;
use alnshade::feature::{FeatureColour, SequenceFeature};
use alnshade::schemes::{
    AnnotationColourGradient, ClustalxColourScheme, ColourScheme,
    ResidueContext,
};
use alnshade::shading::{shade_score, ColourRange, DataRange, ThresholdPolicy};
use alnshade::Rgb;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn score_benchmark(c: &mut Criterion) {
    let range = ColourRange::new(Rgb::new(50, 200, 150), Rgb::new(150, 100, 250));
    let policy = ThresholdPolicy::above(5.0).with_min_max(true);
    let observed = Some(DataRange { min: 0.0, max: 10.0 });
    c.bench_function("shade_score", |b| {
        b.iter(|| {
            black_box(shade_score(black_box(7.3), &range, &policy, observed))
        })
    });
}

fn annotation_row_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("annotation_row");

    for width in [100usize, 1_000, 10_000].iter() {
        let row = AnnotationRow::from_values(
            "ramp",
            (0..*width).map(|i| (i % 97) as f32),
        )
        .with_threshold(40.0);
        let scheme = AnnotationColourGradient::new(
            row,
            Rgb::ORANGE,
            Rgb::RED,
            alnshade::shading::ThresholdMode::Above,
        );
        group.bench_function(format!("{width}_columns"), |b| {
            b.iter(|| {
                for col in 0..*width {
                    let _ = black_box(scheme.colour_for(scheme.row(), col, false));
                }
            })
        });
    }
    group.finish();
}

fn clustal_benchmark(c: &mut Criterion) {
    let sequences: Vec<String> = (0..50)
        .map(|i| {
            "ACDEFGHIKLMNPQRSTVWY"
                .chars()
                .cycle()
                .skip(i % 3)
                .take(300)
                .collect()
        })
        .collect();
    let refs: Vec<&str> = sequences.iter().map(String::as_str).collect();
    let scheme = ClustalxColourScheme::new(&refs);
    c.bench_function("clustal_column_scan", |b| {
        b.iter(|| {
            for (col, residue) in refs[0].chars().enumerate() {
                let cell = ResidueContext::new(residue, col);
                let _ = black_box(scheme.find_colour(&cell));
            }
        })
    });
}

fn descriptor_benchmark(c: &mut Criterion) {
    let descriptor = "attribute|CSQ:AF|00ff00|ff0000|noValueMax|abso|0.0|1.0|below|0.5";
    c.bench_function("parse_descriptor", |b| {
        b.iter(|| black_box(FeatureColour::parse(black_box(descriptor))))
    });

    let colour = FeatureColour::graduated(Rgb::GREEN, Rgb::RED, 0.0, 100.0);
    let feature = SequenceFeature::new("domain").with_score(42.0);
    c.bench_function("graduated_feature_colour", |b| {
        b.iter(|| black_box(colour.colour_for(black_box(&feature))))
    });
}

criterion_group!(
    benches,
    score_benchmark,
    annotation_row_benchmark,
    clustal_benchmark,
    descriptor_benchmark
);
criterion_main!(benches);
