//! Benchmarks for buffer diffing and full draw cycles.
//!
//! Run with: cargo bench -p tessel-render --bench diff_bench

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use tessel_core::Rect;
use tessel_render::backend::TestBackend;
use tessel_render::buffer::Buffer;
use tessel_render::terminal::Terminal;
use tessel_style::{Color, Style};

fn text_frame(width: u16, height: u16, seed: usize) -> Buffer {
    let mut buffer = Buffer::empty(Rect::new(0, 0, width, height));
    for y in 0..height {
        let line = match (usize::from(y) + seed) % 3 {
            0 => "the quick brown fox jumps over the lazy dog ",
            1 => "称号 ┌──┐ 幅広い文字 ",
            _ => "0123456789abcdefghijklmnopqrstuvwxyz",
        };
        let text = line.repeat(usize::from(width) / line.len() + 1);
        buffer.set_string(0, y, text, Style::new().fg(Color::Indexed((seed % 16) as u8)));
    }
    buffer
}

fn bench_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer/diff");

    for (w, h) in [(80, 24), (120, 40), (200, 60)] {
        group.throughput(Throughput::Elements(u64::from(w) * u64::from(h)));
        let previous = text_frame(w, h, 0);

        let same = previous.clone();
        group.bench_with_input(
            BenchmarkId::new("identical", format!("{w}x{h}")),
            &same,
            |b, next| b.iter(|| black_box(previous.diff(black_box(next)))),
        );

        let changed = text_frame(w, h, 1);
        group.bench_with_input(
            BenchmarkId::new("all_rows_changed", format!("{w}x{h}")),
            &changed,
            |b, next| b.iter(|| black_box(previous.diff(black_box(next)))),
        );
    }

    group.finish();
}

fn bench_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("terminal/draw");

    for (w, h) in [(80, 24), (200, 60)] {
        let frames = [text_frame(w, h, 0), text_frame(w, h, 1)];
        let mut terminal = match Terminal::new(TestBackend::new(w, h)) {
            Ok(terminal) => terminal,
            Err(err) => panic!("test backend cannot fail: {err}"),
        };
        let mut tick = 0usize;
        group.bench_function(BenchmarkId::new("alternating", format!("{w}x{h}")), |b| {
            b.iter(|| {
                tick += 1;
                let source = &frames[tick % 2];
                let result = terminal.draw(|frame| frame.buffer_mut().merge(source));
                black_box(result.is_ok());
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_diff, bench_draw);
criterion_main!(benches);
