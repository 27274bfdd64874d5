use indexmap::IndexSet;
use serde::Serialize;

use crate::ir::Graph;
use crate::layout::{HighlightFlags, Layout, NodeLayout};

/// The four node sets a selection lights up, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Highlights {
    /// Targets of the selected node's arguments.
    #[serde(rename = "out")]
    pub outs: IndexSet<u32>,
    /// Sources of arguments pointing at the selected node.
    #[serde(rename = "in")]
    pub ins: IndexSet<u32>,
    /// Nodes sharing a label with the selected node, closed over EQ links.
    pub labelset: IndexSet<u32>,
    /// Scopal dependents of the selected node.
    #[serde(rename = "scope")]
    pub scopes: IndexSet<u32>,
}

struct EdgeView<'a> {
    start: u32,
    end: u32,
    rargname: &'a str,
    post: &'a str,
}

/// Node sets for a selection, computed straight off a graph document.
/// Hosts that render their own emphasis (the wasm page) use this without
/// ever building a layout.
pub fn compute_highlights(graph: &Graph, selected: u32) -> Highlights {
    let edges: Vec<EdgeView<'_>> = graph
        .links
        .iter()
        .map(|link| EdgeView {
            start: link.start,
            end: link.end,
            rargname: &link.rargname,
            post: &link.post,
        })
        .collect();
    propagate(&edges, selected).0
}

/// Recompute every highlight flag from the current selection marks.
///
/// All flags are cleared first, then each selected node is propagated in
/// node order. A later node's propagation overwrites an earlier one's, so
/// with several selected nodes the last one wins.
pub fn update_highlights(layout: &mut Layout) {
    clear_highlights(layout);
    let selected: Vec<u32> = layout
        .nodes
        .iter()
        .filter(|node| node.selected)
        .map(|node| node.id)
        .collect();
    for sel in selected {
        let (sets, link_flags) = {
            let edges: Vec<EdgeView<'_>> = layout
                .links
                .iter()
                .map(|link| EdgeView {
                    start: link.start,
                    end: link.end,
                    rargname: &link.rargname,
                    post: &link.post,
                })
                .collect();
            propagate(&edges, sel)
        };
        for (link, flags) in layout.links.iter_mut().zip(link_flags) {
            link.flags = flags;
        }
        for node in &mut layout.nodes {
            node.flags = HighlightFlags {
                outgoing: sets.outs.contains(&node.id),
                incoming: sets.ins.contains(&node.id),
                labelset: sets.labelset.contains(&node.id),
                scope: sets.scopes.contains(&node.id),
            };
        }
    }
}

/// Reset every highlight flag. Selection and sticky marks stay put.
pub fn clear_highlights(layout: &mut Layout) {
    for node in &mut layout.nodes {
        node.flags = HighlightFlags::default();
    }
    for link in &mut layout.links {
        link.flags = HighlightFlags::default();
    }
}

fn propagate(edges: &[EdgeView<'_>], selected: u32) -> (Highlights, Vec<HighlightFlags>) {
    let mut sets = Highlights::default();
    let mut link_flags = vec![HighlightFlags::default(); edges.len()];

    for (edge, flags) in edges.iter().zip(&mut link_flags) {
        if !edge.rargname.is_empty() && edge.start == selected {
            sets.outs.insert(edge.end);
            flags.outgoing = true;
        }
        if !edge.rargname.is_empty() && edge.end == selected {
            sets.ins.insert(edge.start);
            flags.incoming = true;
        }
        if edge.post == "EQ" && (edge.start == selected || edge.end == selected) {
            sets.labelset.insert(edge.start);
            sets.labelset.insert(edge.end);
            flags.labelset = true;
        }
        if edge.post == "H" || edge.post == "HEQ" {
            if edge.start == selected {
                sets.scopes.insert(edge.end);
                flags.scope = true;
            } else if edge.end == selected {
                // the selected node sits under this scope; the link lights
                // up but its source is not a dependent
                flags.scope = true;
            }
        }
    }

    // close the labelset over EQ links; each pass adds at least one node,
    // so this ends after at most node-count passes
    let mut changed = true;
    while changed {
        changed = false;
        for edge in edges {
            if edge.post != "EQ" {
                continue;
            }
            if sets.labelset.contains(&edge.start) && !sets.labelset.contains(&edge.end) {
                sets.labelset.insert(edge.end);
                changed = true;
            } else if sets.labelset.contains(&edge.end) && !sets.labelset.contains(&edge.start) {
                sets.labelset.insert(edge.start);
                changed = true;
            }
        }
    }

    (sets, link_flags)
}

/// Pin or unpin a node. Returns the node's new sticky state, which the
/// caller stores as the layout-wide sticky flag.
///
/// Unpinning clears the node's selection; pinning first strips sticky and
/// selection from every currently selected node, so at most one node is
/// ever pinned.
pub fn toggle_sticky(layout: &mut Layout, id: u32) -> bool {
    let Some(index) = layout.nodes.iter().position(|node| node.id == id) else {
        return layout.sticky;
    };
    if layout.nodes[index].sticky {
        layout.nodes[index].sticky = false;
        layout.nodes[index].selected = false;
        false
    } else {
        for node in &mut layout.nodes {
            if node.selected {
                node.sticky = false;
                node.selected = false;
            }
        }
        layout.nodes[index].sticky = true;
        layout.nodes[index].selected = true;
        true
    }
}

/// A click on a node: toggle its pin and recompute the highlights.
pub fn click(layout: &mut Layout, id: u32) {
    layout.sticky = toggle_sticky(layout, id);
    update_highlights(layout);
}

/// The pointer entered a node. The selection only moves when nothing is
/// pinned; highlights are recomputed either way.
pub fn hover_enter(layout: &mut Layout, id: u32) {
    if !layout.sticky
        && let Some(node) = node_mut(layout, id)
    {
        node.selected = true;
    }
    update_highlights(layout);
}

/// The pointer left a node. A pinned node keeps its selection.
pub fn hover_leave(layout: &mut Layout, id: u32) {
    if let Some(node) = node_mut(layout, id)
        && !node.sticky
    {
        node.selected = false;
    }
    update_highlights(layout);
}

fn node_mut(layout: &mut Layout, id: u32) -> Option<&mut NodeLayout> {
    layout.nodes.iter_mut().find(|node| node.id == id)
}
