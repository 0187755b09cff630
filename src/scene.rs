//! Renderer-facing snapshot of the tree.
//!
//! The renderer never touches the store directly. After each mutation it
//! builds a `Scene`: every node with its resolved position, depth, color and
//! media, plus one connector per parent/child edge.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use serde::Serialize;

use crate::curve::{Connector, connector};
use crate::layout::Point;
use crate::media::MediaRef;
use crate::tree::{BranchPolicy, NodeId, TreeStore};

/// A node as the renderer sees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneNode {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub depth: usize,
    pub color: String,
    pub media: Option<MediaRef>,
    /// True when the node can offer an "add child" affordance.
    pub can_branch: bool,
}

/// A drawable parent/child edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneEdge {
    pub parent: NodeId,
    pub child: NodeId,
    /// Stroke color, taken from the child.
    pub color: String,
    pub connector: Connector,
    /// SVG path data for `connector`.
    pub path: String,
}

/// Axis-aligned extent of all node boxes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// Everything a renderer needs to draw the current tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub root: NodeId,
    pub node_width: f64,
    pub node_height: f64,
    /// Pre-order from the root.
    pub nodes: Vec<SceneNode>,
    pub edges: Vec<SceneEdge>,
    pub bounds: Bounds,
}

impl Scene {
    /// Snapshot `store` for rendering.
    #[must_use]
    pub fn build(store: &TreeStore) -> Self {
        let config = store.config();
        let permissive = store.policy() == BranchPolicy::Permissive;

        let mut nodes = Vec::with_capacity(store.len());
        let mut edges = Vec::with_capacity(store.len().saturating_sub(1));
        for node in store.nodes() {
            nodes.push(SceneNode {
                id: node.id,
                x: node.position.x,
                y: node.position.y,
                depth: node.depth,
                color: node.color.clone(),
                media: node.media.clone(),
                can_branch: permissive || node.has_media(),
            });

            let Some(parent) = node.parent.and_then(|id| store.get(&id)) else {
                continue;
            };
            let curve = connector(parent.position, node.position, config);
            edges.push(SceneEdge {
                parent: parent.id,
                child: node.id,
                color: node.color.clone(),
                path: curve.to_svg_path(),
                connector: curve,
            });
        }

        let bounds = bounds_of(&nodes, config.node_width, config.node_height);
        Self {
            root: store.root(),
            node_width: config.node_width,
            node_height: config.node_height,
            nodes,
            edges,
            bounds,
        }
    }

    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.id == *id)
    }
}

fn bounds_of(nodes: &[SceneNode], width: f64, height: f64) -> Bounds {
    let (half_w, half_h) = (width / 2.0, height / 2.0);
    let mut min = Point::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for n in nodes {
        min.x = min.x.min(n.x - half_w);
        min.y = min.y.min(n.y - half_h);
        max.x = max.x.max(n.x + half_w);
        max.y = max.y.max(n.y + half_h);
    }
    if nodes.is_empty() {
        return Bounds { min: Point::default(), max: Point::default() };
    }
    Bounds { min, max }
}
