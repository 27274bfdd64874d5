use crate::config::LayoutConfig;

/// One segment of an arc outline, in lane-local coordinates (y grows away
/// from the baseline; the render flips by `scale(1, -dir)`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo { x: f32, y: f32 },
    LineTo { x: f32, y: f32 },
    QuadTo { cx: f32, cy: f32, x: f32, y: f32 },
}

/// An arc outline plus the label anchor computed alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSpec {
    pub commands: Vec<PathCommand>,
    pub midpoint: (f32, f32),
}

impl PathSpec {
    /// The SVG `d` attribute for this path.
    pub fn to_svg(&self) -> String {
        let mut parts = Vec::with_capacity(self.commands.len());
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo { x, y } => parts.push(format!("M {x} {y}")),
                PathCommand::LineTo { x, y } => parts.push(format!("L {x} {y}")),
                PathCommand::QuadTo { cx, cy, x, y } => {
                    parts.push(format!("Q {cx} {cy} {x} {y}"))
                }
            }
        }
        parts.join(" ")
    }
}

/// Vertical drop for the TOP pointer: from one lane above the outermost
/// packed lane straight down onto the target node.
pub(super) fn top_path(
    target_x: f32,
    node_height: f32,
    max_top_level: i32,
    config: &LayoutConfig,
) -> PathSpec {
    let y1 = node_height;
    let y2 = y1 + (max_top_level + 1) as f32 * config.level_dy;
    PathSpec {
        commands: vec![
            PathCommand::MoveTo { x: target_x, y: y2 },
            PathCommand::LineTo { x: target_x, y: y1 },
        ],
        midpoint: (target_x, (y1 + y2) / 2.0),
    }
}

/// Rounded orthogonal arc: a short riser off the source, the lane run, and
/// a drop onto the target. The label anchor sits at the span center,
/// computed before the riser is nudged sideways off the node center.
pub(super) fn arc_path(
    source_x: f32,
    target_x: f32,
    node_height: f32,
    level: i32,
    config: &LayoutConfig,
) -> PathSpec {
    let radius = config.edge_radius;
    let inset = config.edge_inset;
    let y1 = node_height;
    let y2 = y1 + (level.unsigned_abs() as f32 * config.level_dy - inset);
    let midpoint = ((source_x + target_x) / 2.0, y2);
    let x2 = target_x;
    let commands = if source_x < x2 {
        let x1 = source_x + config.edge_xoffset;
        vec![
            PathCommand::MoveTo { x: x1, y: y1 - inset },
            PathCommand::LineTo { x: x1, y: y2 - radius },
            PathCommand::QuadTo { cx: x1, cy: y2, x: x1 + radius, y: y2 },
            PathCommand::LineTo { x: x2 - radius, y: y2 },
            PathCommand::QuadTo { cx: x2, cy: y2, x: x2, y: y2 - radius },
            PathCommand::LineTo { x: x2, y: y1 },
        ]
    } else {
        let x1 = source_x - config.edge_xoffset;
        vec![
            PathCommand::MoveTo { x: x1, y: y1 - inset },
            PathCommand::LineTo { x: x1, y: y2 - radius },
            PathCommand::QuadTo { cx: x1, cy: y2, x: x1 - radius, y: y2 },
            PathCommand::LineTo { x: x2 + radius, y: y2 },
            PathCommand::QuadTo { cx: x2, cy: y2, x: x2, y: y2 - radius },
            PathCommand::LineTo { x: x2, y: y1 },
        ]
    };
    PathSpec { commands, midpoint }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rightward_arc_nudges_the_riser_toward_the_target() {
        let config = LayoutConfig::default();
        let spec = arc_path(20.0, 120.0, 20.0, 1, &config);
        assert_eq!(spec.midpoint, (70.0, 40.0));
        assert_eq!(
            spec.to_svg(),
            "M 30 15 L 30 25 Q 30 40 45 40 L 105 40 Q 120 40 120 25 L 120 20"
        );
    }

    #[test]
    fn leftward_arc_mirrors_the_corners() {
        let config = LayoutConfig::default();
        let spec = arc_path(120.0, 20.0, 20.0, -2, &config);
        // |level| = 2 lanes out: y2 = 20 + 2*25 - 5
        assert_eq!(spec.midpoint, (70.0, 65.0));
        assert_eq!(
            spec.to_svg(),
            "M 110 15 L 110 50 Q 110 65 95 65 L 35 65 Q 20 65 20 50 L 20 20"
        );
    }

    #[test]
    fn label_anchor_ignores_the_riser_offset() {
        let config = LayoutConfig::default();
        let right = arc_path(20.0, 120.0, 20.0, 1, &config);
        let left = arc_path(120.0, 20.0, 20.0, 1, &config);
        assert_eq!(right.midpoint.0, 70.0);
        assert_eq!(left.midpoint.0, 70.0);
    }

    #[test]
    fn top_path_drops_from_above_the_outermost_lane() {
        let config = LayoutConfig::default();
        let spec = top_path(148.0, 20.0, 2, &config);
        assert_eq!(spec.to_svg(), "M 148 95 L 148 20");
        assert_eq!(spec.midpoint, (148.0, 57.5));
    }
}
