use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Sentinel `start` identifier marking the TOP link of a graph document.
pub const TOP_NODEID: u32 = 0;

fn unknown_span() -> i32 {
    -1
}

fn is_unknown_span(value: &i32) -> bool {
    *value == -1
}

/// One predication in a DMRS graph document.
///
/// This is the wire shape the parse service produces: `pred` is already the
/// short form (no trailing `_rel`), `carg` carries a constant argument such
/// as a proper name, and `varprops` holds the intrinsic variable's
/// properties in the order the grammar emitted them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: u32,
    pub pred: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carg: Option<String>,
    #[serde(default = "unknown_span", skip_serializing_if = "is_unknown_span")]
    pub cfrom: i32,
    #[serde(default = "unknown_span", skip_serializing_if = "is_unknown_span")]
    pub cto: i32,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub varprops: IndexMap<String, String>,
}

impl Node {
    pub fn new(id: u32, pred: impl Into<String>) -> Self {
        Self {
            id,
            pred: pred.into(),
            carg: None,
            cfrom: -1,
            cto: -1,
            varprops: IndexMap::new(),
        }
    }

    /// Label text as displayed on the baseline: `pred` or `pred(carg)`.
    pub fn display_label(&self) -> String {
        match &self.carg {
            Some(carg) => format!("{}({})", self.pred, carg),
            None => self.pred.clone(),
        }
    }
}

/// A directed dependency between two nodes, or the TOP link when
/// `start == TOP_NODEID`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub start: u32,
    pub end: u32,
    #[serde(default)]
    pub rargname: String,
    pub post: String,
}

impl Link {
    pub fn new(start: u32, end: u32, rargname: impl Into<String>, post: impl Into<String>) -> Self {
        Self {
            start,
            end,
            rargname: rargname.into(),
            post: post.into(),
        }
    }

    pub fn is_top(&self) -> bool {
        self.start == TOP_NODEID
    }
}

/// A DMRS graph document: ordered nodes and links as received from the
/// parse service. Order is meaningful — node order fixes baseline
/// positions, link order breaks lane-assignment ties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: u32) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }
}
