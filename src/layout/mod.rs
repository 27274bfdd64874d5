mod geometry;
mod lanes;
pub(crate) mod types;

pub use geometry::{PathCommand, PathSpec};
pub use types::*;

use std::collections::HashMap;

use crate::config::LayoutConfig;
use crate::ir::Graph;
use crate::text_metrics;
use crate::theme::Theme;
use lanes::LaneRegistry;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("link endpoint {0} is not a node in the graph")]
    UnknownNode(u32),
}

struct StagedLink {
    start: u32,
    end: u32,
    rargname: String,
    post: String,
    kind: LinkKind,
    dir: i32,
    source_pos: usize,
    target_pos: usize,
    distance: usize,
    level: i32,
}

/// Place nodes on the baseline and pack every link into a lane.
///
/// Nodes keep their document order left to right; links are packed
/// narrowest span first so that wide arcs ride outside narrow ones. The
/// TOP pointer never competes for a lane and is drawn above everything.
pub fn compute_layout(
    graph: &Graph,
    theme: &Theme,
    config: &LayoutConfig,
) -> Result<Layout, LayoutError> {
    let mut nodes = Vec::with_capacity(graph.nodes.len());
    let mut position = HashMap::with_capacity(graph.nodes.len());
    let mut cursor = config.margin_x;
    let mut width = 0.0f32;
    for (pos, node) in graph.nodes.iter().enumerate() {
        position.insert(node.id, pos);
        let label = measure_label(node.display_label(), theme, config);
        let half = label.width / 2.0;
        let x = cursor + half;
        cursor = x + half + config.node_dx;
        width += label.width + config.node_dx;
        nodes.push(NodeLayout {
            id: node.id,
            x,
            label,
            varprops: node.varprops.clone(),
            selected: false,
            sticky: false,
            flags: HighlightFlags::default(),
        });
    }

    let mut staged = Vec::with_capacity(graph.links.len());
    for link in &graph.links {
        let target_pos = *position
            .get(&link.end)
            .ok_or(LayoutError::UnknownNode(link.end))?;
        if link.is_top() {
            staged.push(StagedLink {
                start: link.start,
                end: link.end,
                rargname: link.rargname.clone(),
                post: link.post.clone(),
                kind: LinkKind::Top,
                dir: 1,
                source_pos: target_pos,
                target_pos,
                distance: 0,
                level: 0,
            });
            continue;
        }
        let source_pos = *position
            .get(&link.start)
            .ok_or(LayoutError::UnknownNode(link.start))?;
        // quantifier restrictions and undirected equalities hang below
        let dir = if link.rargname.is_empty() || link.post.eq_ignore_ascii_case("H") {
            -1
        } else {
            1
        };
        let kind = if link.rargname.is_empty() && link.post == "EQ" {
            LinkKind::Eq
        } else {
            LinkKind::Arg
        };
        staged.push(StagedLink {
            start: link.start,
            end: link.end,
            rargname: link.rargname.clone(),
            post: link.post.clone(),
            kind,
            dir,
            source_pos,
            target_pos,
            distance: source_pos.abs_diff(target_pos),
            level: 0,
        });
    }

    // narrow spans claim inner lanes first; ties keep document order
    let mut registry = LaneRegistry::new(graph.nodes.len());
    let mut order: Vec<usize> = (0..staged.len())
        .filter(|&i| staged[i].kind != LinkKind::Top)
        .collect();
    order.sort_by_key(|&i| staged[i].distance);
    let mut max_top_level = 0;
    let mut max_bottom_level = 0;
    for &i in &order {
        let staged_link = &mut staged[i];
        let level = registry.assign(staged_link.source_pos, staged_link.target_pos, staged_link.dir);
        staged_link.level = level;
        if staged_link.dir == 1 && level > max_top_level {
            max_top_level = level;
        } else if staged_link.dir == -1 && level < max_bottom_level {
            max_bottom_level = level;
        }
    }
    for staged_link in &mut staged {
        if staged_link.kind == LinkKind::Top {
            staged_link.level = max_top_level + 1;
        }
    }

    let mut links = Vec::with_capacity(staged.len());
    for staged_link in staged {
        let target = &nodes[staged_link.target_pos];
        let path = match staged_link.kind {
            LinkKind::Top => {
                geometry::top_path(target.x, target.label.height, max_top_level, config)
            }
            _ => geometry::arc_path(
                nodes[staged_link.source_pos].x,
                target.x,
                target.label.height,
                staged_link.level,
                config,
            ),
        };
        let label = format!("{}/{}", staged_link.rargname, staged_link.post);
        let (mid_x, mid_y) = path.midpoint;
        links.push(LinkLayout {
            start: staged_link.start,
            end: staged_link.end,
            rargname: staged_link.rargname,
            post: staged_link.post,
            kind: staged_link.kind,
            dir: staged_link.dir,
            level: staged_link.level,
            path,
            label,
            label_x: mid_x,
            label_y: mid_y * (-staged_link.dir as f32) - config.label_lift,
            flags: HighlightFlags::default(),
        });
    }

    Ok(Layout {
        nodes,
        links,
        width,
        height: (max_top_level - max_bottom_level + 3) as f32 * config.level_dy,
        baseline_y: (max_top_level + 2) as f32 * config.level_dy,
        max_top_level,
        max_bottom_level,
        sticky: false,
    })
}

fn measure_label(text: String, theme: &Theme, config: &LayoutConfig) -> TextBlock {
    let width = text_metrics::measure_text_width(&text, &theme.font_family, theme.font_size);
    TextBlock {
        width,
        height: theme.font_size * config.label_line_height,
        text,
    }
}
