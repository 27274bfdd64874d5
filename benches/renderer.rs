use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use demarc::config::LayoutConfig;
use demarc::dmrs::extract;
use demarc::layout::compute_layout;
use demarc::parser::parse_mrs;
use demarc::render::render_svg;
use demarc::theme::Theme;
use std::hint::black_box;

/// A row of quantified nouns joined by transitive verbs, plus a number of
/// long-distance verbs all anchored on the first noun. The long reaches
/// nest inside one another, so every one of them climbs to a fresh lane.
fn dense_mrs(nouns: usize, extra_links: usize) -> String {
    let mut rels = String::new();
    let mut hcons = String::from("h0 qeq h1000");
    for i in 0..nouns {
        rels.push_str(&format!(
            "[ _a_q_rel LBL: h{q} ARG0: x{x} RSTR: h{r} BODY: h{b} ] \
             [ _dog_n_1_rel LBL: h{n} ARG0: x{x} ] ",
            q = 200 + i,
            x = 10 + i,
            r = 300 + i,
            b = 400 + i,
            n = 100 + i,
        ));
        hcons.push_str(&format!(" h{} qeq h{}", 300 + i, 100 + i));
    }
    for i in 0..nouns.saturating_sub(1) {
        rels.push_str(&format!(
            "[ _chase_v_1_rel LBL: h{l} ARG0: e{e} ARG1: x{a} ARG2: x{b} ] ",
            l = 1000 + i,
            e = 500 + i,
            a = 10 + i,
            b = 11 + i,
        ));
    }
    for j in 2..nouns.min(2 + extra_links) {
        rels.push_str(&format!(
            "[ _watch_v_1_rel LBL: h{l} ARG0: e{e} ARG1: x10 ARG2: x{b} ] ",
            l = 2000 + j,
            e = 600 + j,
            b = 10 + j,
        ));
    }
    format!("[ LTOP: h0 INDEX: e500 RELS: < {rels}> HCONS: < {hcons} > ]")
}

fn fixture(name: &str) -> &'static str {
    match name {
        "dog_sleeps" => include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/benches/fixtures/dog_sleeps.mrs"
        )),
        "garden_bark" => include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/benches/fixtures/garden_bark.mrs"
        )),
        _ => panic!("unknown fixture"),
    }
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for name in ["dog_sleeps", "garden_bark"] {
        let input = fixture(name);
        group.bench_with_input(BenchmarkId::from_parameter(name), input, |b, data| {
            b.iter(|| {
                let m = parse_mrs(black_box(data)).expect("parse failed");
                black_box(m.rels.len());
            });
        });
    }
    group.finish();
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");
    for name in ["dog_sleeps", "garden_bark"] {
        let m = parse_mrs(fixture(name)).expect("parse failed");
        group.bench_with_input(BenchmarkId::from_parameter(name), &m, |b, m| {
            b.iter(|| {
                let graph = extract(black_box(m));
                black_box(graph.links.len());
            });
        });
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let theme = Theme::modern();
    let config = LayoutConfig::default();
    for name in ["dog_sleeps", "garden_bark"] {
        let graph = extract(&parse_mrs(fixture(name)).expect("parse failed"));
        group.bench_with_input(BenchmarkId::from_parameter(name), &graph, |b, graph| {
            b.iter(|| {
                let layout =
                    compute_layout(black_box(graph), &theme, &config).expect("layout failed");
                black_box(layout.links.len());
            });
        });
    }
    group.finish();
}

fn bench_lane_packing(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_lane_packing");
    let theme = Theme::modern();
    let config = LayoutConfig::default();
    for (nouns, extra_links) in [(8usize, 0usize), (16, 8), (32, 16)] {
        let name = format!("dense_{}_{}", nouns, extra_links);
        let input = dense_mrs(nouns, extra_links);
        let graph = extract(&parse_mrs(&input).expect("parse failed"));
        group.bench_with_input(BenchmarkId::from_parameter(name), &graph, |b, graph| {
            b.iter(|| {
                let layout =
                    compute_layout(black_box(graph), &theme, &config).expect("layout failed");
                black_box(layout.max_top_level);
            });
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_svg");
    let theme = Theme::modern();
    let config = LayoutConfig::default();
    for name in ["dog_sleeps", "garden_bark"] {
        let graph = extract(&parse_mrs(fixture(name)).expect("parse failed"));
        let layout = compute_layout(&graph, &theme, &config).expect("layout failed");
        group.bench_with_input(BenchmarkId::from_parameter(name), &layout, |b, data| {
            b.iter(|| {
                let svg = render_svg(black_box(data), &theme, &config);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    let theme = Theme::modern();
    let config = LayoutConfig::default();
    for name in ["dog_sleeps", "garden_bark"] {
        let input = fixture(name);
        group.bench_with_input(BenchmarkId::from_parameter(name), input, |b, data| {
            b.iter(|| {
                let m = parse_mrs(black_box(data)).expect("parse failed");
                let layout = compute_layout(&extract(&m), &theme, &config).expect("layout failed");
                let svg = render_svg(&layout, &theme, &config);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_parse, bench_extract, bench_layout, bench_lane_packing, bench_render, bench_end_to_end
);
criterion_main!(benches);
