use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub background: String,
    pub node_fill: String,
    pub node_stroke: String,
    pub node_text_color: String,
    pub edge_color: String,
    pub top_edge_color: String,
    pub eq_edge_color: String,
    pub label_color: String,
    pub out_color: String,
    pub in_color: String,
    pub labelset_color: String,
    pub scope_color: String,
    pub selected_fill: String,
}

impl Theme {
    /// The original viewer look: thin dark strokes over white, muted
    /// grey for the undirected and TOP edges.
    pub fn classic() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size: 14.0,
            background: "#FFFFFF".to_string(),
            node_fill: "#FFFFFF".to_string(),
            node_stroke: "#333333".to_string(),
            node_text_color: "#333333".to_string(),
            edge_color: "#333333".to_string(),
            top_edge_color: "#AAAAAA".to_string(),
            eq_edge_color: "#AAAAAA".to_string(),
            label_color: "#777777".to_string(),
            out_color: "#1F77B4".to_string(),
            in_color: "#2CA02C".to_string(),
            labelset_color: "#9467BD".to_string(),
            scope_color: "#FF7F0E".to_string(),
            selected_fill: "#FFF3B0".to_string(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            background: "#FFFFFF".to_string(),
            node_fill: "#F8FAFF".to_string(),
            node_stroke: "#C7D2E5".to_string(),
            node_text_color: "#1C2430".to_string(),
            edge_color: "#7A8AA6".to_string(),
            top_edge_color: "#B9C4D8".to_string(),
            eq_edge_color: "#B9C4D8".to_string(),
            label_color: "#5B6B85".to_string(),
            out_color: "#2F6FED".to_string(),
            in_color: "#1F9D63".to_string(),
            labelset_color: "#8B5CF6".to_string(),
            scope_color: "#E8762D".to_string(),
            selected_fill: "#FDE68A".to_string(),
        }
    }
}
