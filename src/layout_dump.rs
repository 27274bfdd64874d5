use crate::layout::Layout;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// JSON mirror of a computed layout, for inspection and test tooling.
#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub baseline_y: f32,
    pub max_top_level: i32,
    pub max_bottom_level: i32,
    pub nodes: Vec<NodeDump>,
    pub links: Vec<LinkDump>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: u32,
    pub x: f32,
    pub label: String,
    pub label_width: f32,
    pub label_height: f32,
}

#[derive(Debug, Serialize)]
pub struct LinkDump {
    pub start: u32,
    pub end: u32,
    pub rargname: String,
    pub post: String,
    pub kind: String,
    pub dir: i32,
    pub level: i32,
    pub path: String,
    pub label: String,
    pub label_x: f32,
    pub label_y: f32,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let nodes = layout
            .nodes
            .iter()
            .map(|node| NodeDump {
                id: node.id,
                x: node.x,
                label: node.label.text.clone(),
                label_width: node.label.width,
                label_height: node.label.height,
            })
            .collect();

        let links = layout
            .links
            .iter()
            .map(|link| LinkDump {
                start: link.start,
                end: link.end,
                rargname: link.rargname.clone(),
                post: link.post.clone(),
                kind: format!("{:?}", link.kind),
                dir: link.dir,
                level: link.level,
                path: link.path.to_svg(),
                label: link.label.clone(),
                label_x: link.label_x,
                label_y: link.label_y,
            })
            .collect();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            baseline_y: layout.baseline_y,
            max_top_level: layout.max_top_level,
            max_bottom_level: layout.max_bottom_level,
            nodes,
            links,
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &Layout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
