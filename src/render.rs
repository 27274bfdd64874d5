use crate::config::LayoutConfig;
use crate::layout::{HighlightFlags, Layout, LinkKind, LinkLayout, NodeLayout};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

/// Serialize a laid-out graph to a standalone SVG document.
///
/// The markup mirrors what the interactive page builds: one `g.node` per
/// node (box behind the label text, variable properties in a `<title>`)
/// and one `g.link` per link (the arc path plus its role label). Arcs are
/// emitted in the upper half-plane and flipped below the baseline with a
/// `scale(1,-dir)` transform, so one path formula serves both directions.
pub fn render_svg(layout: &Layout, theme: &Theme, config: &LayoutConfig) -> String {
    let mut svg = String::new();
    let width = layout.width;
    let height = layout.height;

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!("<style>{}</style>", style_block(theme)));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    svg.push_str("<defs>");
    svg.push_str(&format!(
        "<marker class=\"linkend\" id=\"arrowhead\" refX=\"1\" refY=\"2\" markerWidth=\"5\" markerHeight=\"4\" orient=\"auto\"><path d=\"M0,0 L1,2 L0,4 L5,2 Z\" fill=\"{}\"/></marker>",
        theme.edge_color
    ));
    svg.push_str("</defs>");

    svg.push_str(&format!("<g transform=\"translate(0,{})\">", layout.baseline_y));

    for node in &layout.nodes {
        svg.push_str(&format!("<g class=\"{}\">", node_classes(node)));
        if !node.varprops.is_empty() {
            let lines: Vec<String> = node
                .varprops
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect();
            svg.push_str(&format!("<title>{}</title>", escape_xml(&lines.join("\n"))));
        }
        let w = node.label.width;
        let h = node.label.height;
        svg.push_str(&format!(
            "<rect class=\"nodeBox\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{}\" ry=\"{}\"/>",
            node.x - w / 2.0 - config.node_pad,
            -h / 2.0 - config.node_pad,
            w + 2.0 * config.node_pad,
            h + 2.0 * config.node_pad,
            config.node_box_radius,
            config.node_box_radius
        ));
        svg.push_str(&format!(
            "<text class=\"nodeText\" x=\"{}\" y=\"0\" dy=\"{}\">{}</text>",
            node.x,
            h / 5.0,
            escape_xml(&node.label.text)
        ));
        svg.push_str("</g>");
    }

    for link in &layout.links {
        svg.push_str(&format!("<g class=\"{}\">", link_classes(link)));
        let marker = if link.kind == LinkKind::Eq {
            "none"
        } else {
            "url(#arrowhead)"
        };
        svg.push_str(&format!(
            "<path class=\"{}\" d=\"{}\" transform=\"scale(1,{})\" marker-end=\"{}\"/>",
            link.kind.class_name(),
            link.path.to_svg(),
            -link.dir,
            marker
        ));
        svg.push_str(&format!(
            "<text class=\"rargname\" x=\"{}\" y=\"{}\">{}</text>",
            link.label_x,
            link.label_y,
            escape_xml(&link.label)
        ));
        svg.push_str("</g>");
    }

    svg.push_str("</g></svg>");
    svg
}

fn node_classes(node: &NodeLayout) -> String {
    let mut classes = String::from("node");
    if node.selected {
        classes.push_str(" selected");
    }
    push_flag_classes(&mut classes, node.flags);
    classes
}

fn link_classes(link: &LinkLayout) -> String {
    let mut classes = String::from("link");
    push_flag_classes(&mut classes, link.flags);
    classes
}

fn push_flag_classes(classes: &mut String, flags: HighlightFlags) {
    if flags.outgoing {
        classes.push_str(" out");
    }
    if flags.incoming {
        classes.push_str(" in");
    }
    if flags.labelset {
        classes.push_str(" labelset");
    }
    if flags.scope {
        classes.push_str(" scope");
    }
}

fn style_block(theme: &Theme) -> String {
    format!(
        "text{{font-family:{font};font-size:{size}px}}\
         .nodeText{{fill:{node_text};text-anchor:middle}}\
         .nodeBox{{fill:{node_fill};stroke:{node_stroke}}}\
         .link path{{fill:none}}\
         .linkedge{{stroke:{edge}}}\
         .topedge{{stroke:{top_edge}}}\
         .eqedge{{stroke:{eq_edge};stroke-dasharray:5 5}}\
         .rargname{{fill:{label};text-anchor:middle}}\
         .node.selected .nodeBox{{fill:{selected}}}\
         .node.out .nodeBox,.link.out path{{stroke:{out}}}\
         .node.in .nodeBox,.link.in path{{stroke:{incoming}}}\
         .node.labelset .nodeBox,.link.labelset path{{stroke:{labelset}}}\
         .node.scope .nodeBox,.link.scope path{{stroke:{scope}}}",
        font = theme.font_family,
        size = theme.font_size,
        node_text = theme.node_text_color,
        node_fill = theme.node_fill,
        node_stroke = theme.node_stroke,
        edge = theme.edge_color,
        top_edge = theme.top_edge_color,
        eq_edge = theme.eq_edge_color,
        label = theme.label_color,
        selected = theme.selected_fill,
        out = theme.out_color,
        incoming = theme.in_color,
        labelset = theme.labelset_color,
        scope = theme.scope_color,
    )
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
