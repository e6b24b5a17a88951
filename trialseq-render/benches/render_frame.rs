use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use trialseq_core::{Context, EventKind, Frame, PositionName};
use trialseq_experiment::Presenter;
use trialseq_render::{SkiaPresenter, StimulusGeometry};

fn harness() -> SkiaPresenter {
    let width = 1280u32;
    let height = 720u32;
    match SkiaPresenter::new(width, height, StimulusGeometry::default()) {
        Ok(p) => p,
        Err(e) => panic!("presenter setup failed: {e}"),
    }
}

pub fn bench_search_display(c: &mut Criterion) {
    let mut g = c.benchmark_group("render_frame");
    g.sample_size(40);

    for context in [Context::Parts, Context::Whole] {
        let frame = Frame::search_display(context, PositionName::BottomLeft);
        g.bench_function(format!("search_display_{}", context.as_str()), |b| {
            b.iter_batched(
                harness,
                |mut p| {
                    let _ = p.render(black_box(&frame));
                    let _ = p.present();
                    black_box(p.frames_presented());
                },
                BatchSize::SmallInput,
            )
        });
    }

    let fixation = Frame::fixation(EventKind::Fixation);
    let mut p = harness();
    g.bench_function("fixation_reused_canvas", |b| {
        b.iter(|| {
            let _ = p.render(black_box(&fixation));
            let _ = p.present();
        })
    });

    g.finish();
}

criterion_group!(benches, bench_search_display);
criterion_main!(benches);
