//! Arc-diagram rendering for DMRS dependency graphs.
//!
//! The pipeline reads SimpleMRS text ([`parser`]), extracts the dependency
//! graph ([`dmrs`]), packs its links into lanes above and below a node
//! baseline ([`layout`]), and emits SVG ([`render`]). Interactive concerns
//! (selection, hover, highlight propagation) live in [`highlight`];
//! [`protocol`] models the external grammar processor boundary.

pub mod config;
pub mod dmrs;
pub mod highlight;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod mrs;
pub mod parser;
pub mod protocol;
pub mod render;
pub mod text_metrics;
pub mod theme;

pub use config::{Config, LayoutConfig, RenderOptions, ServiceConfig, load_config};
pub use highlight::{
    Highlights, clear_highlights, click, compute_highlights, hover_enter, hover_leave,
    toggle_sticky, update_highlights,
};
pub use ir::{Graph, Link, Node, TOP_NODEID};
pub use layout::{HighlightFlags, Layout, LayoutError, LinkKind, compute_layout};
pub use parser::{MrsParseError, parse_all, parse_mrs, serialize_mrs};
pub use protocol::{
    GenerateResponse, GrammarService, ParseResponse, ServiceError, build_generate_response,
    build_parse_response,
};
pub use render::{render_svg, write_output_svg};
pub use theme::Theme;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] MrsParseError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Lay out and render one graph document.
pub fn render_with_options(graph: &Graph, options: &RenderOptions) -> Result<String, Error> {
    let layout = compute_layout(graph, &options.theme, &options.layout)?;
    Ok(render_svg(&layout, &options.theme, &options.layout))
}

/// Render every MRS in a SimpleMRS string, one SVG per reading.
pub fn render_mrs(input: &str, options: &RenderOptions) -> Result<Vec<String>, Error> {
    let mut svgs = Vec::new();
    for m in parse_all(input)? {
        let graph = dmrs::extract(&m);
        svgs.push(render_with_options(&graph, options)?);
    }
    Ok(svgs)
}
