//! Layout engine: assigns every node a position by recursive subtree centering.
//!
//! DESIGN
//! ======
//! Layout is recomputed for the whole tree after every shape mutation. Trees
//! in this domain hold tens of nodes, so rebuilding from scratch is cheap and
//! leaves no room for stale positions.
//!
//! Horizontal placement threads a cursor through a post-order walk. Each leaf
//! takes the cursor as its `x` and advances it by one sibling slot. An
//! internal node sits at the unweighted mean of its children's laid-out `x`,
//! so a node with one child is always directly above it. Rows are fixed per
//! depth: `y = base_y + depth * level_height`.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::consts::{
    BASE_Y, CURVE_DAMPING, LEVEL_HEIGHT, NODE_HEIGHT, NODE_WIDTH, SIBLING_SPACING, START_X, STRAIGHT_THRESHOLD,
};
use crate::tree::{Node, NodeId};

/// A point in layout space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A `LayoutConfig` value that cannot produce a valid layout.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("{field} must be a finite number greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },
}

impl LayoutError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotPositive { .. } => "E_LAYOUT_NOT_POSITIVE",
            Self::NotFinite { .. } => "E_LAYOUT_NOT_FINITE",
        }
    }
}

/// Tunable layout and connector constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Cursor value for the leftmost leaf.
    pub start_x: f64,
    /// Row of the root.
    pub base_y: f64,
    /// Distance between depth rows.
    pub level_height: f64,
    /// Cursor advance per leaf.
    pub sibling_spacing: f64,
    /// Visual node width, used by renderers.
    pub node_width: f64,
    /// Visual node height; connector anchors sit half of this from center.
    pub node_height: f64,
    /// Horizontal offset below which connectors are straight.
    pub straight_threshold: f64,
    /// Pull of cubic control points toward their endpoints.
    pub curve_damping: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            start_x: START_X,
            base_y: BASE_Y,
            level_height: LEVEL_HEIGHT,
            sibling_spacing: SIBLING_SPACING,
            node_width: NODE_WIDTH,
            node_height: NODE_HEIGHT,
            straight_threshold: STRAIGHT_THRESHOLD,
            curve_damping: CURVE_DAMPING,
        }
    }
}

impl LayoutConfig {
    /// Reject settings that would let sibling subtrees overlap or produce
    /// non-numeric positions.
    ///
    /// # Errors
    ///
    /// Returns `NotPositive` for a spacing, row height or node size that is
    /// zero, negative or not finite, and `NotFinite` for any other NaN or
    /// infinite field.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let positive = [
            ("sibling_spacing", self.sibling_spacing),
            ("level_height", self.level_height),
            ("node_width", self.node_width),
            ("node_height", self.node_height),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::NotPositive { field, value });
            }
        }
        let finite = [
            ("start_x", self.start_x),
            ("base_y", self.base_y),
            ("straight_threshold", self.straight_threshold),
            ("curve_damping", self.curve_damping),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(LayoutError::NotFinite { field, value });
            }
        }
        Ok(())
    }

    /// Canonical position of a lone root.
    #[must_use]
    pub fn anchor(&self) -> Point {
        Point::new(self.start_x, self.base_y)
    }

    /// Distance from a node's center to its top or bottom connector anchor.
    #[must_use]
    pub fn anchor_offset(&self) -> f64 {
        self.node_height / 2.0
    }

    /// Row for nodes at `depth`.
    #[must_use]
    pub fn row_y(&self, depth: usize) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let depth = depth as f64;
        self.base_y + depth * self.level_height
    }
}

/// Recompute `position` and `depth` for every node reachable from `root`.
///
/// Returns the cursor after the last leaf, i.e. the right edge of the slot
/// range the tree occupies.
pub fn layout_tree(nodes: &mut HashMap<NodeId, Node>, root: NodeId, config: &LayoutConfig) -> f64 {
    place(nodes, root, 0, config.start_x, config)
}

/// Lay out the subtree at `id`, starting at `cursor`. Returns the advanced cursor.
fn place(nodes: &mut HashMap<NodeId, Node>, id: NodeId, depth: usize, cursor: f64, config: &LayoutConfig) -> f64 {
    let Some(children) = nodes.get(&id).map(|n| n.children.clone()) else {
        return cursor;
    };

    let mut next = cursor;
    let mut centers = Vec::with_capacity(children.len());
    for child in children {
        next = place(nodes, child, depth + 1, next, config);
        if let Some(laid_out) = nodes.get(&child) {
            centers.push(laid_out.position.x);
        }
    }

    let x = if centers.is_empty() {
        next = cursor + config.sibling_spacing;
        cursor
    } else {
        #[allow(clippy::cast_precision_loss)]
        let count = centers.len() as f64;
        centers.iter().sum::<f64>() / count
    };

    if let Some(node) = nodes.get_mut(&id) {
        node.depth = depth;
        node.position = Point::new(x, config.row_y(depth));
    }
    next
}
