use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use spacey_svg_builder::config::Config;
use spacey_svg_builder::layout::pack;
use spacey_svg_builder::parser::parse_viewers;
use spacey_svg_builder::render::render_svg;
use std::hint::black_box;

fn viewer_csv(count: usize) -> String {
    let mut out = String::new();
    for i in 0..count {
        let name_len = 3 + (i * 7) % 22;
        let name: String = (0..name_len)
            .map(|j| (b'a' + ((i + j) % 26) as u8) as char)
            .collect();
        let role = match i % 9 {
            0 => "mod",
            4 => "vip",
            _ => "",
        };
        out.push_str(&format!("{name},#33{:02x}aa,,{role}\n", i % 256));
    }
    out
}

fn bench_pack(c: &mut Criterion) {
    let config = Config::default().resolved().unwrap();
    let mut group = c.benchmark_group("pack");
    for count in [50usize, 500, 5000] {
        let entries = parse_viewers(&viewer_csv(count)).expect("bench input parses");
        group.bench_with_input(BenchmarkId::from_parameter(count), &entries, |b, entries| {
            b.iter(|| pack(black_box(entries), black_box(&config.metrics)))
        });
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let config = Config::default().resolved().unwrap();
    let source = viewer_csv(500);
    c.bench_function("parse_pack_render_500", |b| {
        b.iter(|| {
            let entries = parse_viewers(black_box(&source)).expect("bench input parses");
            let layout = pack(&entries, &config.metrics).expect("bench input fits");
            render_svg(&layout, &config)
        })
    });
}

criterion_group!(benches, bench_pack, bench_end_to_end);
criterion_main!(benches);
