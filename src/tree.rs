//! Tree store: node records keyed by id and the mutations that grow the tree.
//!
//! DESIGN
//! ======
//! Nodes live in an id-indexed map with explicit parent/child id links, so
//! there is no shared ownership between records and the whole tree is
//! trivially serializable. Every shape mutation (`reset`, `add_child`) ends
//! with a full layout pass, so readers never see stale positions or depths.
//! Attaching media does not move anything and skips the pass.
//!
//! ERROR HANDLING
//! ==============
//! Operations either fully apply or are rejected before anything changes.
//! A non-video resource is not an error: `attach_media` reports it as
//! [`AttachOutcome::NotVideo`] and leaves the node untouched.

#[cfg(test)]
#[path = "tree_test.rs"]
mod tree_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};
use uuid::Uuid;

use crate::consts::PALETTE;
use crate::curve::{Connector, connector};
use crate::layout::{LayoutConfig, LayoutError, Point, layout_tree};
use crate::media::MediaRef;

// =============================================================================
// TYPES
// =============================================================================

/// Unique identifier for a tree node.
pub type NodeId = Uuid;

/// One entry in the clip tree: either an empty placeholder or a clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Attached video, `None` for a placeholder.
    pub media: Option<MediaRef>,
    /// Derived by the layout pass.
    pub position: Point,
    /// Palette entry picked at creation.
    pub color: String,
    /// `None` only for the root.
    pub parent: Option<NodeId>,
    /// Children in layout order.
    pub children: Vec<NodeId>,
    /// Distance from the root. Derived by the layout pass.
    pub depth: usize,
}

impl Node {
    fn new(id: NodeId, parent: Option<NodeId>, color: &str) -> Self {
        Self {
            id,
            media: None,
            position: Point::default(),
            color: color.to_owned(),
            parent,
            children: Vec::new(),
            depth: 0,
        }
    }

    #[must_use]
    pub fn has_media(&self) -> bool {
        self.media.is_some()
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Whether a media-less placeholder may gain children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchPolicy {
    /// Only nodes with media attached can branch.
    #[default]
    RequireMedia,
    /// Any node can branch.
    Permissive,
}

/// Result of a media attachment that addressed a valid node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachOutcome {
    Attached,
    /// The resource was not a video; nothing changed.
    NotVideo,
}

#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    #[error("node not found: {0}")]
    NotFound(NodeId),
    #[error("node has no media and cannot branch: {0}")]
    MissingMedia(NodeId),
    #[error("node already has media attached: {0}")]
    MediaAlreadyAttached(NodeId),
    #[error("node {child} is not a child of {parent}")]
    NotChild { parent: NodeId, child: NodeId },
}

impl TreeError {
    /// Stable machine-readable code for hosts.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "E_NODE_NOT_FOUND",
            Self::MissingMedia(_) => "E_MISSING_MEDIA",
            Self::MediaAlreadyAttached(_) => "E_MEDIA_ALREADY_ATTACHED",
            Self::NotChild { .. } => "E_NOT_CHILD",
        }
    }
}

// =============================================================================
// STORE
// =============================================================================

/// Owns the canonical node mapping and applies legal mutations.
#[derive(Debug, Clone)]
pub struct TreeStore {
    nodes: HashMap<NodeId, Node>,
    root: NodeId,
    /// Creation counter; drives palette selection.
    created: usize,
    layout_passes: u64,
    config: LayoutConfig,
    policy: BranchPolicy,
}

impl TreeStore {
    /// Create a store with default layout and the media-required policy.
    #[must_use]
    pub fn new() -> Self {
        Self::build(LayoutConfig::default(), BranchPolicy::default())
    }

    /// Create a store holding a single root, laid out with `config`.
    ///
    /// # Errors
    ///
    /// Returns a `LayoutError` when `config` fails `LayoutConfig::validate`.
    pub fn with_config(config: LayoutConfig, policy: BranchPolicy) -> Result<Self, LayoutError> {
        config.validate()?;
        Ok(Self::build(config, policy))
    }

    fn build(config: LayoutConfig, policy: BranchPolicy) -> Self {
        let mut store = Self {
            nodes: HashMap::new(),
            root: Uuid::nil(),
            created: 0,
            layout_passes: 0,
            config,
            policy,
        };
        store.reset();
        store
    }

    // --- Mutations ---

    /// Replace the whole tree with a fresh media-less root at the anchor.
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.created = 0;
        let root = self.create_node(None);
        self.root = root;
        debug!(root_id = %root, "tree reset");
        self.relayout();
    }

    /// Append a new placeholder under `parent_id` and relayout.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the parent doesn't exist, or `MissingMedia` if
    /// the policy requires media and the parent has none.
    pub fn add_child(&mut self, parent_id: NodeId) -> Result<NodeId, TreeError> {
        let parent = self.nodes.get(&parent_id).ok_or(TreeError::NotFound(parent_id))?;
        if self.policy == BranchPolicy::RequireMedia && !parent.has_media() {
            return Err(TreeError::MissingMedia(parent_id));
        }

        let id = self.create_node(Some(parent_id));
        if let Some(parent) = self.nodes.get_mut(&parent_id) {
            parent.children.push(id);
        }
        debug!(node_id = %id, parent_id = %parent_id, "child added");
        self.relayout();
        Ok(id)
    }

    /// Attach a video to an existing node. Position is unaffected.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown node and `MediaAlreadyAttached` if
    /// the node already holds media.
    pub fn attach_media(&mut self, node_id: NodeId, media: MediaRef) -> Result<AttachOutcome, TreeError> {
        let node = self.nodes.get_mut(&node_id).ok_or(TreeError::NotFound(node_id))?;
        if node.media.is_some() {
            return Err(TreeError::MediaAlreadyAttached(node_id));
        }
        if !media.is_video() {
            warn!(node_id = %node_id, mime_type = %media.mime_type, "ignoring non-video media");
            return Ok(AttachOutcome::NotVideo);
        }
        debug!(node_id = %node_id, uri = %media.uri, "media attached");
        node.media = Some(media);
        Ok(AttachOutcome::Attached)
    }

    // --- Queries ---

    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[must_use]
    pub fn get(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of nodes in the tree, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a store holds at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    #[must_use]
    pub fn policy(&self) -> BranchPolicy {
        self.policy
    }

    /// Number of layout passes run since the store was created.
    #[must_use]
    pub fn layout_passes(&self) -> u64 {
        self.layout_passes
    }

    /// All nodes in pre-order from the root, children in layout order.
    #[must_use]
    pub fn nodes(&self) -> Vec<&Node> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(&id) else {
                continue;
            };
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// Every `(parent, child)` pair, in the same order as [`Self::nodes`].
    #[must_use]
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        self.nodes()
            .into_iter()
            .filter_map(|node| node.parent.map(|parent| (parent, node.id)))
            .collect()
    }

    /// Connector from `parent_id` down to `child_id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if either node is missing, or `NotChild` if the
    /// pair is not a parent/child edge.
    pub fn connector(&self, parent_id: NodeId, child_id: NodeId) -> Result<Connector, TreeError> {
        let parent = self.nodes.get(&parent_id).ok_or(TreeError::NotFound(parent_id))?;
        let child = self.nodes.get(&child_id).ok_or(TreeError::NotFound(child_id))?;
        if child.parent != Some(parent_id) {
            return Err(TreeError::NotChild { parent: parent_id, child: child_id });
        }
        Ok(connector(parent.position, child.position, &self.config))
    }

    // --- Internals ---

    fn create_node(&mut self, parent: Option<NodeId>) -> NodeId {
        let mut id = Uuid::new_v4();
        while self.contains(&id) {
            id = Uuid::new_v4();
        }
        let color = PALETTE[self.created % PALETTE.len()];
        self.created += 1;
        self.nodes.insert(id, Node::new(id, parent, color));
        id
    }

    fn relayout(&mut self) {
        let right = layout_tree(&mut self.nodes, self.root, &self.config);
        self.layout_passes += 1;
        trace!(nodes = self.nodes.len(), right, pass = self.layout_passes, "layout pass");
    }
}

impl Default for TreeStore {
    fn default() -> Self {
        Self::new()
    }
}
