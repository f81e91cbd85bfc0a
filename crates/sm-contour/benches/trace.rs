use criterion::{Criterion, black_box, criterion_group, criterion_main};
use sm_contour::{approx_polygon, find_external_contours};
use sm_core::{Image, Polygon};

/// Grid of filled squares, a stand-in for a busy synthesized scene.
fn squares_image(width: usize, height: usize, cell: usize) -> Image<u8> {
    let mut img = Image::new_fill(width, height, 0u8);
    let side = cell * 2 / 3;
    for cy in (cell / 4..height.saturating_sub(side)).step_by(cell) {
        for cx in (cell / 4..width.saturating_sub(side)).step_by(cell) {
            for y in cy..cy + side {
                for x in cx..cx + side {
                    *img.get_mut(x, y).expect("in bounds") = 255;
                }
            }
        }
    }
    img
}

fn bench_find_contours(c: &mut Criterion) {
    let img = squares_image(512, 512, 48);

    c.bench_function("find_external_contours_512", |b| {
        b.iter(|| find_external_contours(black_box(&img)))
    });
}

fn bench_approx(c: &mut Criterion) {
    let img = squares_image(512, 512, 48);
    let contours = find_external_contours(&img);

    c.bench_function("approx_polygon_all", |b| {
        b.iter(|| {
            let polys: Vec<Polygon> = contours
                .iter()
                .map(|cnt| approx_polygon(black_box(&cnt.points), 0.02 * cnt.perimeter()))
                .collect();
            polys
        })
    });
}

criterion_group!(benches, bench_find_contours, bench_approx);
criterion_main!(benches);
