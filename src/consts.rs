//! Shared constants for the cliptree crate.

// ── Palette ─────────────────────────────────────────────────────

/// Node colors, assigned cyclically by creation order.
pub const PALETTE: [&str; 8] = [
    "#D94B4B", "#E39B3B", "#D8C545", "#5DA65D", "#3F8FC4", "#6A5ACD", "#B05CB0", "#4BA8A0",
];

// ── Layout ──────────────────────────────────────────────────────

/// Horizontal cursor value where the leftmost leaf is placed.
pub const START_X: f64 = 120.0;

/// Row of the root node.
pub const BASE_Y: f64 = 80.0;

/// Vertical distance between consecutive depth rows.
pub const LEVEL_HEIGHT: f64 = 220.0;

/// Horizontal cursor advance per leaf.
pub const SIBLING_SPACING: f64 = 240.0;

/// Visual node box width.
pub const NODE_WIDTH: f64 = 200.0;

/// Visual node box height. Connector anchors sit half of this above/below center.
pub const NODE_HEIGHT: f64 = 120.0;

// ── Connectors ──────────────────────────────────────────────────

/// Horizontal offset below which a connector is drawn as a straight line.
pub const STRAIGHT_THRESHOLD: f64 = 1.0;

/// Fraction by which cubic control points are pulled from the vertical
/// midpoint toward their own endpoint.
pub const CURVE_DAMPING: f64 = 0.25;
