//! Connector curves between a positioned parent and one of its children.
//!
//! A connector runs from the anchor below the parent to the anchor above the
//! child. Nearly vertical pairs get a straight segment; everything else gets
//! an S-shaped cubic whose control points sit directly above/below their own
//! endpoint, so the curve always leaves and arrives vertically.

#[cfg(test)]
#[path = "curve_test.rs"]
mod curve_test;

use serde::Serialize;

use crate::layout::{LayoutConfig, Point};

/// Path description for one parent/child edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Connector {
    Line { from: Point, to: Point },
    Cubic { from: Point, c1: Point, c2: Point, to: Point },
}

impl Connector {
    /// Start anchor (below the parent).
    #[must_use]
    pub fn start(&self) -> Point {
        match *self {
            Self::Line { from, .. } | Self::Cubic { from, .. } => from,
        }
    }

    /// End anchor (above the child).
    #[must_use]
    pub fn end(&self) -> Point {
        match *self {
            Self::Line { to, .. } | Self::Cubic { to, .. } => to,
        }
    }

    /// SVG path data, e.g. `M 0.00 60.00 C 0.00 ...`.
    #[must_use]
    pub fn to_svg_path(&self) -> String {
        let mut d = String::new();
        match *self {
            Self::Line { from, to } => {
                push_cmd(&mut d, 'M', &[from]);
                push_cmd(&mut d, 'L', &[to]);
            }
            Self::Cubic { from, c1, c2, to } => {
                push_cmd(&mut d, 'M', &[from]);
                push_cmd(&mut d, 'C', &[c1, c2, to]);
            }
        }
        d
    }
}

/// Compute the connector between a parent at `parent` and a child at `child`.
#[must_use]
pub fn connector(parent: Point, child: Point, config: &LayoutConfig) -> Connector {
    let offset = config.anchor_offset();
    let from = Point::new(parent.x, parent.y + offset);
    let to = Point::new(child.x, child.y - offset);

    if (to.x - from.x).abs() < config.straight_threshold {
        return Connector::Line { from, to };
    }

    let mid_y = f64::midpoint(from.y, to.y);
    let damping = config.curve_damping;
    Connector::Cubic {
        from,
        c1: Point::new(from.x, mid_y + (from.y - mid_y) * damping),
        c2: Point::new(to.x, mid_y + (to.y - mid_y) * damping),
        to,
    }
}

fn push_cmd(d: &mut String, cmd: char, points: &[Point]) {
    if !d.is_empty() {
        d.push(' ');
    }
    d.push(cmd);
    for (i, p) in points.iter().enumerate() {
        let sep = if i == 0 { " " } else { ", " };
        d.push_str(&format!("{sep}{:.2} {:.2}", p.x, p.y));
    }
}
