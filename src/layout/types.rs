use super::geometry::PathSpec;
use indexmap::IndexMap;

/// A measured run of label text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub text: String,
    pub width: f32,
    pub height: f32,
}

/// Emphasis classes a node or link carries while some node is selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighlightFlags {
    /// Reached by an outgoing argument of the selected node.
    pub outgoing: bool,
    /// Has an argument pointing at the selected node.
    pub incoming: bool,
    /// Shares a label with the selected node (transitive over EQ links).
    pub labelset: bool,
    /// In a scope relation (`H`/`HEQ`) with the selected node.
    pub scope: bool,
}

/// A node placed on the baseline. `x` is the horizontal center of the
/// label; vertical coordinates are relative to the baseline group.
#[derive(Debug, Clone)]
pub struct NodeLayout {
    pub id: u32,
    pub x: f32,
    pub label: TextBlock,
    /// Intrinsic variable properties, shown as the node's tooltip.
    pub varprops: IndexMap<String, String>,
    pub selected: bool,
    pub sticky: bool,
    pub flags: HighlightFlags,
}

/// Which style class a link renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// The TOP pointer; a vertical drop onto its target.
    Top,
    /// An undirected label-equality edge, drawn without an arrowhead.
    Eq,
    /// A regular argument edge.
    Arg,
}

impl LinkKind {
    pub fn class_name(self) -> &'static str {
        match self {
            LinkKind::Top => "topedge",
            LinkKind::Eq => "eqedge",
            LinkKind::Arg => "linkedge",
        }
    }
}

/// An arc routed through its assigned lane.
#[derive(Debug, Clone)]
pub struct LinkLayout {
    pub start: u32,
    pub end: u32,
    pub rargname: String,
    pub post: String,
    pub kind: LinkKind,
    /// 1 for arcs above the baseline, -1 below.
    pub dir: i32,
    /// Signed lane index; the sign always matches `dir`. TOP links carry a
    /// synthetic level one past the outermost packed lane.
    pub level: i32,
    pub path: PathSpec,
    /// Label text, `rargname/post`.
    pub label: String,
    pub label_x: f32,
    pub label_y: f32,
    pub flags: HighlightFlags,
}

/// A fully positioned arc diagram.
#[derive(Debug, Clone)]
pub struct Layout {
    pub nodes: Vec<NodeLayout>,
    pub links: Vec<LinkLayout>,
    pub width: f32,
    pub height: f32,
    /// Distance from the top of the canvas down to the baseline group.
    pub baseline_y: f32,
    pub max_top_level: i32,
    pub max_bottom_level: i32,
    /// True while some node is pinned; hover no longer moves the selection.
    pub sticky: bool,
}
