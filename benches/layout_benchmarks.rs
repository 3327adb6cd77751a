use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ocr_layout::layout::{LineClusterer, TextFragment};
use ocr_layout::table::{match_cells, TableCell};

/// Fragments laid out on a page of `rows` lines with `cols` words each.
fn page(rows: usize, cols: usize) -> Vec<TextFragment> {
    let mut fragments = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            // Jitter the baseline a little, detection order column-major
            let x = c as f32 * 80.0;
            let y = r as f32 * 30.0 + (c % 3) as f32;
            fragments.push(TextFragment::from_rect(x, y, x + 70.0, y + 18.0, "word"));
        }
    }
    fragments
}

fn grid(rows: usize, cols: usize) -> Vec<TableCell> {
    let mut cells = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            let x = c as f32 * 80.0;
            let y = r as f32 * 30.0;
            cells.push(TableCell::from_rect(x, y, x + 80.0, y + 30.0));
        }
    }
    cells
}

fn bench_line_clustering(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_clustering");
    let clusterer = LineClusterer::default();

    for rows in [10, 50, 200] {
        let fragments = page(rows, 8);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &fragments, |b, f| {
            b.iter(|| clusterer.cluster(black_box(f)).unwrap())
        });
    }

    group.finish();
}

fn bench_cell_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("cell_matching");

    for rows in [5, 20, 50] {
        let cells = grid(rows, 6);
        let fragments = page(rows, 6);
        group.bench_with_input(
            BenchmarkId::from_parameter(rows),
            &(cells, fragments),
            |b, (cells, fragments)| b.iter(|| match_cells(black_box(cells), black_box(fragments))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_line_clustering, bench_cell_matching);
criterion_main!(benches);
