use criterion::{black_box, criterion_group, criterion_main, Criterion};
use folio_carousel::{compute_visual_state, Carousel, CarouselConfig, VisualConfig};

fn bench_compute(c: &mut Criterion) {
    let config = VisualConfig::default();
    c.bench_function("compute_visual_state/dragging", |b| {
        b.iter(|| {
            compute_visual_state(
                black_box(7),
                black_box(5),
                black_box(24),
                black_box(Some(-120.0)),
                &config,
            )
        })
    });
}

fn bench_all_cards(c: &mut Criterion) {
    let items: Vec<u32> = (0..64).collect();
    let mut carousel = Carousel::new(items, CarouselConfig::default()).unwrap();
    carousel.step_forward();
    carousel.begin_drag(400.0);
    carousel.update_drag(310.0);

    c.bench_function("visual_states/64_cards", |b| {
        b.iter(|| black_box(carousel.visual_states()))
    });
}

criterion_group!(benches, bench_compute, bench_all_cards);
criterion_main!(benches);
