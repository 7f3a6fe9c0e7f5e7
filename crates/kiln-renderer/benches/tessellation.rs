// Benchmarks for rounded-rect and border tessellation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kiln_core::types::{BoundingBox, Color, CornerRadius, Dimensions};
use kiln_core::RendererConfig;
use kiln_renderer::{BorderConfig, FontId, PrimitiveBatch, RecordingBackend, RecordingTarget, RenderCommand, Renderer, Tessellator};

fn bench_rounded_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("rounded_fill");
    let bounds = BoundingBox::new(10.0, 10.0, 120.0, 48.0);

    for segments in [4u32, 8, 16] {
        let tess = Tessellator::new(segments);
        let mut batch = PrimitiveBatch::with_capacity(128);
        group.bench_with_input(BenchmarkId::from_parameter(segments), &segments, |b, _| {
            b.iter(|| {
                batch.clear();
                tess.fill_rounded_rect(&mut batch, black_box(&bounds), &CornerRadius::all(12.0), Color::WHITE);
                black_box(batch.len());
            })
        });
    }
    group.finish();
}

fn bench_rounded_border(c: &mut Criterion) {
    let tess = Tessellator::default();
    let mut batch = PrimitiveBatch::with_capacity(128);
    let bounds = BoundingBox::new(0.0, 0.0, 200.0, 80.0);
    let border = BorderConfig::uniform(3.0, Color::BLUE).with_corner_radius(CornerRadius::all(10.0));

    c.bench_function("rounded_border", |b| {
        b.iter(|| {
            batch.clear();
            tess.stroke_border(&mut batch, black_box(&bounds), black_box(&border));
            black_box(batch.len());
        })
    });
}

fn bench_frame_dispatch(c: &mut Criterion) {
    let mut renderer = Renderer::<RecordingBackend>::new(RendererConfig::default()).expect("default config");
    let mut backend = RecordingBackend::new();
    let target = RecordingTarget::new("top");
    let dimensions = Dimensions::new(400.0, 240.0);

    let mut commands = Vec::new();
    for row in 0..6 {
        let y = row as f32 * 40.0;
        commands.push(RenderCommand::rectangle(
            BoundingBox::new(8.0, y, 384.0, 36.0),
            Color::rgb(40.0, 40.0, 60.0),
            CornerRadius::all(8.0),
        ));
        commands.push(RenderCommand::text(
            BoundingBox::new(16.0, y + 8.0, 200.0, 20.0),
            b"List item",
            FontId::SYSTEM,
            20.0,
            Color::WHITE,
        ));
    }

    c.bench_function("frame_dispatch", |b| {
        b.iter(|| {
            backend.clear();
            black_box(renderer.render(&mut backend, &target, dimensions, &commands));
        })
    });
}

criterion_group!(benches, bench_rounded_fill, bench_rounded_border, bench_frame_dispatch);
criterion_main!(benches);
