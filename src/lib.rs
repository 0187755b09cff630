//! Layout and connector engine for a branching tree of video clips.
//!
//! A tree starts from a single media-less root placeholder. Any node with a
//! video attached can branch into further child placeholders. Every change to
//! the tree's shape re-runs a full layout pass so sibling subtrees never
//! overlap, and each parent/child pair gets a connector curve the renderer can
//! draw as an SVG path. The library owns no I/O: uploads, styling and viewport
//! behavior belong to the host, which reads a [`scene::Scene`] after each
//! mutation.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`tree`] | Node records and the [`tree::TreeStore`] that mutates them |
//! | [`media`] | Media references and the video type check |
//! | [`layout`] | Recursive subtree-centering layout and [`layout::LayoutConfig`] |
//! | [`curve`] | Parent-to-child connector curves and SVG path data |
//! | [`scene`] | Renderer-facing snapshot of nodes and connectors |
//! | [`svg`] | Standalone SVG export of a scene |
//! | [`script`] | Line-oriented command scripts driving a store |
//! | [`consts`] | Palette and layout defaults |

pub mod consts;
pub mod curve;
pub mod layout;
pub mod media;
pub mod scene;
pub mod script;
pub mod svg;
pub mod tree;
