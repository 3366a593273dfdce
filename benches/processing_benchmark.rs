use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cru_grid_processor::models::{DatasetCategory, YearRange};
use cru_grid_processor::processors::{AlignmentChecker, CentroidBuilder, RowEmitter};
use cru_grid_processor::readers::GridTextReader;
use std::path::Path;

// Reconstruction text for the temperature grid
fn create_test_text(years: usize) -> String {
    let grid = DatasetCategory::Temperature.preset().grid;
    let mut text = String::new();
    for y in 0..years {
        text.push_str(&format!("{}\tsummer\n", 1500 + y));
        for r in 0..grid.rows {
            let cells: Vec<String> = (0..grid.columns)
                .map(|c| format!("{:.3}", (r as f64 - c as f64) / 10.0))
                .collect();
            text.push_str(&cells.join("\t"));
            text.push('\n');
        }
    }
    text
}

fn benchmark_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_text_reader");
    let reader = GridTextReader::new(DatasetCategory::Temperature.preset().grid.rows as usize);

    for years in [1, 10, 50].iter() {
        let text = create_test_text(*years);
        group.bench_with_input(BenchmarkId::new("parse_str", years), &text, |b, text| {
            b.iter(|| reader.parse_str(Path::new("temp_bench_su.txt"), black_box(text)))
        });
    }

    group.finish();
}

fn benchmark_centroids(c: &mut Criterion) {
    let mut group = c.benchmark_group("centroid_builder");

    for category in DatasetCategory::all() {
        let builder = CentroidBuilder::new(category.preset().grid);
        group.bench_function(category.token(), |b| b.iter(|| black_box(builder.build())));
    }

    group.finish();
}

fn benchmark_emission(c: &mut Criterion) {
    let mut group = c.benchmark_group("row_emitter");
    let grid = DatasetCategory::Temperature.preset().grid;
    let reader = GridTextReader::new(grid.rows as usize);
    let centroids = CentroidBuilder::new(grid).build();

    for years in [1, 10].iter() {
        let text = create_test_text(*years);
        let summer = reader.parse_str(Path::new("temp_su.txt"), &text).unwrap();
        let spring = reader.parse_str(Path::new("temp_sp.txt"), &text).unwrap();
        AlignmentChecker::new()
            .check(&summer, &spring, grid.cell_count())
            .unwrap();
        let range = YearRange::new(1500, 1500 + *years as i32 - 1);

        group.bench_with_input(BenchmarkId::new("rows", years), &range, |b, range| {
            b.iter(|| {
                let emitter = RowEmitter::new(&centroids, &summer, &spring, *range).unwrap();
                black_box(emitter.rows().count())
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_parser,
    benchmark_centroids,
    benchmark_emission
);
criterion_main!(benches);
