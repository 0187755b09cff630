//! Standalone SVG export of a [`Scene`].
//!
//! Nodes become rounded rectangles centered on their layout position, edges
//! become `<path>` elements using the connector path data. Placeholders are
//! drawn dashed; clips are filled with their palette color.

#[cfg(test)]
#[path = "svg_test.rs"]
mod svg_test;

use crate::scene::{Scene, SceneNode};

const MARGIN: f64 = 40.0;
const STROKE: &str = "#1F1A17";
const PLACEHOLDER_FILL: &str = "#FFFFFF";
const PLACEHOLDER_DASH: &str = "8,4";
const EDGE_WIDTH: f64 = 3.0;
const CORNER_RADIUS: f64 = 12.0;

/// Render `scene` as an SVG document string.
#[must_use]
pub fn render(scene: &Scene) -> String {
    let b = scene.bounds;
    let view_x = b.min.x - MARGIN;
    let view_y = b.min.y - MARGIN;
    let view_w = b.width() + 2.0 * MARGIN;
    let view_h = b.height() + 2.0 * MARGIN;

    let mut out = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{view_x:.2} {view_y:.2} {view_w:.2} {view_h:.2}\" \
         width=\"{view_w:.0}\" height=\"{view_h:.0}\">\n"
    );

    out.push_str("  <g class=\"edges\" fill=\"none\">\n");
    for edge in &scene.edges {
        out.push_str(&format!(
            "    <path d=\"{}\" stroke=\"{}\" stroke-width=\"{EDGE_WIDTH}\"/>\n",
            edge.path, edge.color
        ));
    }
    out.push_str("  </g>\n");

    out.push_str("  <g class=\"nodes\">\n");
    for node in &scene.nodes {
        out.push_str(&node_rect(node, scene.node_width, scene.node_height));
    }
    out.push_str("  </g>\n</svg>\n");
    out
}

fn node_rect(node: &SceneNode, width: f64, height: f64) -> String {
    let x = node.x - width / 2.0;
    let y = node.y - height / 2.0;
    let (fill, dash) = match node.media {
        Some(_) => (node.color.as_str(), String::new()),
        None => (PLACEHOLDER_FILL, format!(" stroke-dasharray=\"{PLACEHOLDER_DASH}\"")),
    };
    let title = node.media.as_ref().map_or_else(|| "empty".to_owned(), |m| escape(&m.uri));
    format!(
        "    <rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{width:.2}\" height=\"{height:.2}\" rx=\"{CORNER_RADIUS}\" \
         fill=\"{fill}\" stroke=\"{STROKE}\"{dash}><title>{title}</title></rect>\n"
    )
}

/// Escape text for use inside SVG markup.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
