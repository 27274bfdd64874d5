use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Geometry constants for the arc diagram. Distances are SVG user units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Vertical separation between lanes.
    pub level_dy: f32,
    /// Corner radius of the rounded arc shoulders.
    pub edge_radius: f32,
    /// Horizontal nudge of the source riser off the node center.
    pub edge_xoffset: f32,
    /// Gap the arc keeps short of its full lane and node box.
    pub edge_inset: f32,
    /// Horizontal separation between node labels.
    pub node_dx: f32,
    /// Left margin before the first node.
    pub margin_x: f32,
    /// Padding between label text and its box.
    pub node_pad: f32,
    /// Corner radius of the node box.
    pub node_box_radius: f32,
    /// How far edge labels float off their lane.
    pub label_lift: f32,
    pub label_line_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            level_dy: 25.0,
            edge_radius: 15.0,
            edge_xoffset: 10.0,
            edge_inset: 5.0,
            node_dx: 20.0,
            margin_x: 10.0,
            node_pad: 2.0,
            node_box_radius: 4.0,
            label_lift: 3.0,
            label_line_height: 1.2,
        }
    }
}

/// Paths of the two grammar-service endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub parse_endpoint: String,
    pub generate_endpoint: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            parse_endpoint: "parse".to_string(),
            generate_endpoint: "generate".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub service: ServiceConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::classic(),
            layout: LayoutConfig::default(),
            service: ServiceConfig::default(),
        }
    }
}

/// Presentation knobs for the one-call render entry points and the wasm
/// wrapper.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub theme: Theme,
    pub layout: LayoutConfig,
}

impl RenderOptions {
    pub fn classic() -> Self {
        Self {
            theme: Theme::classic(),
            layout: LayoutConfig::default(),
        }
    }

    pub fn modern() -> Self {
        Self {
            theme: Theme::modern(),
            layout: LayoutConfig::default(),
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::classic()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariablesFile>,
    layout: Option<LayoutConfigFile>,
    service: Option<ServiceConfigFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariablesFile {
    font_family: Option<String>,
    font_size: Option<f32>,
    background: Option<String>,
    node_fill: Option<String>,
    node_stroke: Option<String>,
    node_text_color: Option<String>,
    edge_color: Option<String>,
    top_edge_color: Option<String>,
    eq_edge_color: Option<String>,
    label_color: Option<String>,
    out_color: Option<String>,
    in_color: Option<String>,
    labelset_color: Option<String>,
    scope_color: Option<String>,
    selected_fill: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    level_dy: Option<f32>,
    edge_radius: Option<f32>,
    edge_xoffset: Option<f32>,
    edge_inset: Option<f32>,
    node_dx: Option<f32>,
    margin_x: Option<f32>,
    node_pad: Option<f32>,
    node_box_radius: Option<f32>,
    label_lift: Option<f32>,
    label_line_height: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServiceConfigFile {
    parse_endpoint: Option<String>,
    generate_endpoint: Option<String>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;
    apply_config_file(parsed, &mut config);
    Ok(config)
}

fn apply_config_file(parsed: ConfigFile, config: &mut Config) {
    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "modern" {
            config.theme = Theme::modern();
        } else if theme_name == "classic" || theme_name == "default" {
            config.theme = Theme::classic();
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
        if let Some(v) = vars.node_fill {
            config.theme.node_fill = v;
        }
        if let Some(v) = vars.node_stroke {
            config.theme.node_stroke = v;
        }
        if let Some(v) = vars.node_text_color {
            config.theme.node_text_color = v;
        }
        if let Some(v) = vars.edge_color {
            config.theme.edge_color = v;
        }
        if let Some(v) = vars.top_edge_color {
            config.theme.top_edge_color = v;
        }
        if let Some(v) = vars.eq_edge_color {
            config.theme.eq_edge_color = v;
        }
        if let Some(v) = vars.label_color {
            config.theme.label_color = v;
        }
        if let Some(v) = vars.out_color {
            config.theme.out_color = v;
        }
        if let Some(v) = vars.in_color {
            config.theme.in_color = v;
        }
        if let Some(v) = vars.labelset_color {
            config.theme.labelset_color = v;
        }
        if let Some(v) = vars.scope_color {
            config.theme.scope_color = v;
        }
        if let Some(v) = vars.selected_fill {
            config.theme.selected_fill = v;
        }
    }

    if let Some(layout) = parsed.layout {
        if let Some(v) = layout.level_dy {
            config.layout.level_dy = v;
        }
        if let Some(v) = layout.edge_radius {
            config.layout.edge_radius = v;
        }
        if let Some(v) = layout.edge_xoffset {
            config.layout.edge_xoffset = v;
        }
        if let Some(v) = layout.edge_inset {
            config.layout.edge_inset = v;
        }
        if let Some(v) = layout.node_dx {
            config.layout.node_dx = v;
        }
        if let Some(v) = layout.margin_x {
            config.layout.margin_x = v;
        }
        if let Some(v) = layout.node_pad {
            config.layout.node_pad = v;
        }
        if let Some(v) = layout.node_box_radius {
            config.layout.node_box_radius = v;
        }
        if let Some(v) = layout.label_lift {
            config.layout.label_lift = v;
        }
        if let Some(v) = layout.label_line_height {
            config.layout.label_line_height = v;
        }
    }

    if let Some(service) = parsed.service {
        if let Some(v) = service.parse_endpoint {
            config.service.parse_endpoint = v;
        }
        if let Some(v) = service.generate_endpoint {
            config.service.generate_endpoint = v;
        }
    }
}
