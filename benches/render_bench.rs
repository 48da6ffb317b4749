//! Benchmarks for response rendering and the metrics calculator
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use health_saarthi::render::{html, render_sections, text, TerminalStyle};
use health_saarthi::wellness::{compute_metrics, ActivityLevel, Profile, Sex};

fn create_plan_text(sections: usize) -> String {
    (0..sections)
        .map(|i| {
            format!(
                "### Section {}\n**Goal:** stay *consistent*\n* Eat **more** greens\n- Walk daily\n{}. Sleep by 10pm\nPlain advice with <tags> & symbols.",
                i,
                i + 1
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for size in [1, 10, 100] {
        let text = create_plan_text(size);

        group.throughput(Throughput::Bytes(text.len() as u64));

        group.bench_function(format!("sections_{}", size), |b| {
            b.iter(|| render_sections(black_box(&text)))
        });

        let sections = render_sections(&text);

        group.bench_function(format!("html_{}", size), |b| {
            b.iter(|| html::to_html(black_box(&sections), None))
        });

        group.bench_function(format!("terminal_{}", size), |b| {
            b.iter(|| text::to_terminal(black_box(&sections), None, TerminalStyle::ansi()))
        });
    }

    group.finish();
}

fn bench_metrics(c: &mut Criterion) {
    let profile = Profile::new(30, Sex::Male, 175.0, 70.0).activity(ActivityLevel::ModeratelyActive);

    c.bench_function("compute_metrics", |b| {
        b.iter(|| compute_metrics(black_box(&profile)))
    });
}

criterion_group!(benches, bench_render, bench_metrics);
criterion_main!(benches);
