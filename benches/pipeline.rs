//! Benchmarks for the layerdraw pipeline.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use layerdraw::text::{layout, wrap_text, LayoutOptions, OverflowSide, TextSource};
use layerdraw::{
    compose, resample, BlockFont, BlendOperator, Colour, ComposableItem, Font, FontSize,
    ImageItem, PlacementArea, RasterImage, ResampleMethod, TextItem,
};

const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do \
eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, \
quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat.";

fn gradient(w: u32, h: u32) -> RasterImage {
    RasterImage::from_fn(w, h, |x, y| {
        Colour::new((x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255)
    })
}

// -- Resampling benchmarks --

fn bench_resample(c: &mut Criterion) {
    let mut group = c.benchmark_group("resample");
    let src = gradient(256, 256);

    for method in [
        ResampleMethod::Nearest,
        ResampleMethod::Bilinear,
        ResampleMethod::Cubic,
    ] {
        group.bench_with_input(
            BenchmarkId::new("upscale_2x", format!("{:?}", method)),
            &method,
            |b, &method| b.iter(|| resample(black_box(&src), 512, 512, method)),
        );
        group.bench_with_input(
            BenchmarkId::new("downscale_half", format!("{:?}", method)),
            &method,
            |b, &method| b.iter(|| resample(black_box(&src), 128, 128, method)),
        );
    }

    group.finish();
}

// -- Layout benchmarks --

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let font = BlockFont::default();
    let face = font.face(FontSize::new(16.0, 72.0)).unwrap();

    group.bench_function("wrap_paragraph", |b| {
        b.iter(|| wrap_text(face.as_ref(), black_box(LOREM), 200.0))
    });

    let options = LayoutOptions::default()
        .with_line_height(20.0)
        .with_max_lines(Some(3))
        .with_overflow("...", OverflowSide::Trailing);
    let source = TextSource::Text(LOREM.to_string());
    group.bench_function("wrap_and_truncate", |b| {
        b.iter(|| layout(black_box(&source), face.as_ref(), 200.0, 400.0, &options))
    });

    group.finish();
}

// -- Composition benchmarks --

fn bench_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");
    let font: Arc<dyn Font> = Arc::new(BlockFont::default());
    let photo = Arc::new(gradient(300, 200));

    let items: Vec<ComposableItem> = vec![
        ImageItem::new(photo.clone())
            .with_placement(PlacementArea::new(0, 0, 640, 360))
            .with_blend(BlendOperator::Replace)
            .with_resample(ResampleMethod::Bilinear)
            .into(),
        ImageItem::new(photo)
            .with_placement(PlacementArea::new(20, 20, 150, 100))
            .into(),
        TextItem::new(LOREM, font)
            .with_size(18.0)
            .with_colour(Colour::WHITE)
            .with_max_lines(4)
            .with_overflow("...", OverflowSide::Trailing)
            .with_placement(PlacementArea::new(200, 40, 400, 120))
            .into(),
    ];
    let canvas = RasterImage::filled(640, 360, Colour::BLACK);

    group.bench_function("card_640x360", |b| {
        b.iter(|| compose(black_box(canvas.clone()), &items).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_resample, bench_layout, bench_compose);
criterion_main!(benches);
