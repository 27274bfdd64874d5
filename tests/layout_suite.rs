//! End-to-end suite: SimpleMRS text in, SVG markup out, with the lane
//! packing invariants re-checked on every fixture.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use demarc::dmrs::extract;
use demarc::{
    Graph, Layout, LayoutConfig, LinkKind, Theme, compute_layout, parse_all, render_svg,
};

// Named explicitly so a stale glob cannot silently skip a fixture.
const FIXTURES: [&str; 6] = [
    "dog_sleeps",
    "white_cat",
    "nearly_every",
    "gave_abrams",
    "said_slept",
    "garden_bark",
];

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(format!("{name}.mrs"))
}

fn fixture_graphs(name: &str) -> Vec<Graph> {
    let source = fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|err| panic!("fixture {name}: {err}"));
    parse_all(&source)
        .unwrap_or_else(|err| panic!("fixture {name}: {err}"))
        .iter()
        .map(extract)
        .collect()
}

fn fixture_layout(name: &str) -> (Graph, Layout) {
    let mut graphs = fixture_graphs(name);
    assert_eq!(graphs.len(), 1, "fixture {name} should hold a single MRS");
    let graph = graphs.remove(0);
    let layout = compute_layout(&graph, &Theme::classic(), &LayoutConfig::default())
        .unwrap_or_else(|err| panic!("fixture {name}: {err}"));
    (graph, layout)
}

fn assert_valid_svg(svg: &str, name: &str) {
    assert!(svg.starts_with("<svg"), "{name}: output has no svg root");
    assert!(svg.trim_end().ends_with("</svg>"), "{name}: svg not closed");
    assert_eq!(svg.matches("<svg").count(), 1, "{name}: nested svg roots");
    assert_eq!(
        svg.matches("<g").count(),
        svg.matches("</g>").count(),
        "{name}: unbalanced group tags"
    );
}

/// Gap range a link occupies on the baseline, normalized so `lo <= hi`.
/// The pointer from TOP drops onto a single node and covers no gap.
fn gap_span(layout: &Layout, index: usize) -> (usize, usize) {
    let positions: HashMap<u32, usize> = layout
        .nodes
        .iter()
        .enumerate()
        .map(|(pos, node)| (node.id, pos))
        .collect();
    let link = &layout.links[index];
    let end = positions[&link.end];
    if link.kind == LinkKind::Top {
        return (end, end);
    }
    let start = positions[&link.start];
    (start.min(end), start.max(end))
}

fn overlaps(a: (usize, usize), b: (usize, usize)) -> bool {
    a.0.max(b.0) < a.1.min(b.1)
}

fn assert_lanes_packed(layout: &Layout, name: &str) {
    let spans: Vec<(usize, usize)> = (0..layout.links.len())
        .map(|i| gap_span(layout, i))
        .collect();
    for (i, link) in layout.links.iter().enumerate() {
        if link.kind == LinkKind::Top {
            assert_eq!(link.dir, 1, "{name}: top pointer below the baseline");
            assert_eq!(
                link.level,
                layout.max_top_level + 1,
                "{name}: top pointer inside the packed lanes"
            );
            continue;
        }
        assert_eq!(
            link.level.signum(),
            link.dir,
            "{name}: lane sign disagrees with link direction"
        );
        // no two links may share a lane over a common gap
        for (j, other) in layout.links.iter().enumerate().skip(i + 1) {
            if other.kind != LinkKind::Top
                && other.level == link.level
                && overlaps(spans[i], spans[j])
            {
                panic!(
                    "{name}: links {i} and {j} share lane {} over a gap",
                    link.level
                );
            }
        }
        // every lane between the baseline and the assigned one is blocked
        for inner in 1..link.level.abs() {
            let lane = inner * link.dir;
            let blocked = layout.links.iter().enumerate().any(|(j, other)| {
                j != i
                    && other.kind != LinkKind::Top
                    && other.level == lane
                    && overlaps(spans[i], spans[j])
            });
            assert!(
                blocked,
                "{name}: link {i} skipped free lane {lane} for {}",
                link.level
            );
        }
    }
}

#[test]
fn renders_every_fixture() {
    for name in FIXTURES {
        let (graph, layout) = fixture_layout(name);
        assert!(!graph.nodes.is_empty(), "{name}: no nodes extracted");
        let svg = render_svg(&layout, &Theme::classic(), &LayoutConfig::default());
        assert_valid_svg(&svg, name);
        for node in &graph.nodes {
            assert!(
                svg.contains(&node.display_label()),
                "{name}: node label {} missing from the svg",
                node.display_label()
            );
        }
    }
}

#[test]
fn lanes_stay_packed_on_every_fixture() {
    for name in FIXTURES {
        let (_, layout) = fixture_layout(name);
        assert_lanes_packed(&layout, name);
    }
}

#[test]
fn canvas_tracks_the_outermost_lanes() {
    let config = LayoutConfig::default();
    for name in FIXTURES {
        let (_, layout) = fixture_layout(name);
        let span = (layout.max_top_level - layout.max_bottom_level + 3) as f32;
        assert_eq!(layout.height, span * config.level_dy, "{name}: height");
        assert_eq!(
            layout.baseline_y,
            (layout.max_top_level + 2) as f32 * config.level_dy,
            "{name}: baseline"
        );
        let mut last_x = 0.0f32;
        for node in &layout.nodes {
            assert!(node.x > last_x, "{name}: nodes out of reading order");
            last_x = node.x;
        }
    }
}

#[test]
fn top_pointer_never_disturbs_the_packing() {
    for name in FIXTURES {
        let (graph, layout) = fixture_layout(name);
        let mut without_top = graph.clone();
        without_top.links.retain(|link| !link.is_top());
        if without_top.links.len() == graph.links.len() {
            continue;
        }
        let rerun = compute_layout(&without_top, &Theme::classic(), &LayoutConfig::default())
            .unwrap_or_else(|err| panic!("fixture {name}: {err}"));
        let packed: Vec<i32> = layout
            .links
            .iter()
            .filter(|link| link.kind != LinkKind::Top)
            .map(|link| link.level)
            .collect();
        let repacked: Vec<i32> = rerun.links.iter().map(|link| link.level).collect();
        assert_eq!(packed, repacked, "{name}: top pointer moved packed lanes");
    }
}

#[test]
fn known_fixtures_lay_out_deterministically() {
    // (fixture, node count, lane per link in document order)
    let expected: [(&str, usize, &[i32]); 6] = [
        ("dog_sleeps", 3, &[2, -1, 1]),
        ("white_cat", 6, &[3, -1, 1, 2, -1, 1]),
        ("nearly_every", 4, &[2, -1, -1, 1]),
        ("gave_abrams", 7, &[3, -1, 1, 1, 2, -1, -1]),
        ("said_slept", 6, &[2, -1, 1, -2, -1, 1]),
        ("garden_bark", 9, &[3, -1, 1, 1, -1, 2, 1, 1, -1]),
    ];
    for (name, nodes, levels) in expected {
        let (_, layout) = fixture_layout(name);
        assert_eq!(layout.nodes.len(), nodes, "{name}: node count");
        let got: Vec<i32> = layout.links.iter().map(|link| link.level).collect();
        assert_eq!(got, levels.to_vec(), "{name}: lane assignment");
    }
}

#[test]
fn undirected_equalities_drop_the_arrowhead() {
    let (_, layout) = fixture_layout("nearly_every");
    let eq = layout
        .links
        .iter()
        .find(|link| link.kind == LinkKind::Eq)
        .expect("compound quantifier should yield an equality link");
    assert_eq!(eq.label, "/EQ");
    assert!(eq.level < 0);

    let svg = render_svg(&layout, &Theme::classic(), &LayoutConfig::default());
    let eq_markup = &svg[svg.find("class=\"eqedge\"").expect("eqedge path")..];
    let eq_markup = &eq_markup[..eq_markup.find("/>").unwrap()];
    assert!(eq_markup.contains("marker-end=\"none\""));
}

#[test]
fn constants_and_scopal_arguments_reach_the_svg() {
    let (_, layout) = fixture_layout("gave_abrams");
    let svg = render_svg(&layout, &Theme::classic(), &LayoutConfig::default());
    assert!(svg.contains("named(Kim)"));
    assert!(svg.contains("named(Abrams)"));

    let (_, layout) = fixture_layout("said_slept");
    let svg = render_svg(&layout, &Theme::classic(), &LayoutConfig::default());
    assert!(svg.contains("ARG2/H"), "scopal argument label missing");
}

#[test]
fn a_fixture_file_may_hold_several_readings() {
    let graphs = fixture_graphs("two_readings");
    assert_eq!(graphs.len(), 2);
    for graph in &graphs {
        let layout = compute_layout(graph, &Theme::classic(), &LayoutConfig::default())
            .expect("single-node reading lays out");
        assert_eq!(layout.nodes.len(), 1);
        assert_eq!(layout.links.len(), 1);
        assert_eq!(layout.links[0].level, 1);
        assert_eq!(layout.baseline_y, 50.0);
    }
}
