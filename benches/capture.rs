use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use digitpad::capture::{
    BATCH_SIZE, CANVAS_WIDTH, DigitLabel, GridCapture, LogicalBitmap, PointerEvent,
    TrainingSample,
};
use digitpad::collaborator::CollaboratorRequest;

const STROKE_POINTS: usize = 2_000;

fn stroke() -> Vec<(f32, f32)> {
    (0..STROKE_POINTS)
        .map(|i| {
            let t = i as f32 / STROKE_POINTS as f32;
            let x = CANVAS_WIDTH * t;
            let y = CANVAS_WIDTH * 0.5 + (t * 12.0).sin() * 60.0;
            (x, y)
        })
        .collect()
}

fn bench_drag_stroke(c: &mut Criterion) {
    let points = stroke();
    c.bench_with_input(
        BenchmarkId::new("drag_stroke", STROKE_POINTS),
        &points,
        |b, points| {
            b.iter(|| {
                let mut capture = GridCapture::new();
                capture.handle_pointer(PointerEvent::Down { x: 0.0, y: 0.0 });
                for &(x, y) in points {
                    capture.handle_pointer(PointerEvent::Move { x, y });
                }
                capture.handle_pointer(PointerEvent::Up);
                black_box(capture.bitmap().painted_count())
            });
        },
    );
}

fn bench_batch_serialization(c: &mut Criterion) {
    let mut image = LogicalBitmap::new();
    for (x, y) in stroke() {
        image.paint_at(x, y);
    }
    let samples: Vec<TrainingSample> = (0..BATCH_SIZE as u8)
        .filter_map(|label| DigitLabel::new(label % 10))
        .map(|label| TrainingSample::new(image.clone(), label))
        .collect();
    let request = CollaboratorRequest::train(samples);
    c.bench_function("serialize_train_batch", |b| {
        b.iter(|| serde_json::to_vec(black_box(&request)).map(|bytes| bytes.len()))
    });
}

criterion_group!(benches, bench_drag_stroke, bench_batch_serialization);
criterion_main!(benches);
