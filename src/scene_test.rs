#![allow(clippy::float_cmp)]

use super::*;
use crate::consts::{NODE_HEIGHT, NODE_WIDTH, PALETTE, SIBLING_SPACING, START_X};
use crate::layout::LayoutConfig;
use crate::tree::BranchPolicy;

fn clip() -> MediaRef {
    MediaRef::new("blob:clip", "video/mp4")
}

#[test]
fn single_root_scene() {
    let store = TreeStore::new();
    let scene = Scene::build(&store);

    assert_eq!(scene.root, store.root());
    assert_eq!(scene.nodes.len(), 1);
    assert!(scene.edges.is_empty());
    let root = &scene.nodes[0];
    assert_eq!(root.depth, 0);
    assert_eq!(root.color, PALETTE[0]);
    assert!(!root.can_branch);
    assert_eq!(scene.bounds.width(), NODE_WIDTH);
    assert_eq!(scene.bounds.height(), NODE_HEIGHT);
}

#[test]
fn scene_has_one_edge_per_child() {
    let mut store = TreeStore::new();
    let root = store.root();
    store.attach_media(root, clip()).unwrap();
    let a = store.add_child(root).unwrap();
    let b = store.add_child(root).unwrap();

    let scene = Scene::build(&store);
    assert_eq!(scene.nodes.len(), 3);
    assert_eq!(scene.edges.len(), 2);
    assert_eq!((scene.edges[0].parent, scene.edges[0].child), (root, a));
    assert_eq!((scene.edges[1].parent, scene.edges[1].child), (root, b));
    for edge in &scene.edges {
        assert_eq!(edge.path, edge.connector.to_svg_path());
        assert_eq!(edge.connector, store.connector(edge.parent, edge.child).unwrap());
        assert_eq!(edge.color, store.get(&edge.child).unwrap().color);
    }
}

#[test]
fn can_branch_follows_media_and_policy() {
    let mut store = TreeStore::new();
    let root = store.root();
    store.attach_media(root, clip()).unwrap();
    let child = store.add_child(root).unwrap();

    let scene = Scene::build(&store);
    assert!(scene.node(&root).unwrap().can_branch);
    assert!(!scene.node(&child).unwrap().can_branch);

    let permissive = TreeStore::with_config(LayoutConfig::default(), BranchPolicy::Permissive).unwrap();
    let scene = Scene::build(&permissive);
    assert!(scene.nodes[0].can_branch);
}

#[test]
fn bounds_cover_all_boxes() {
    let mut store = TreeStore::with_config(LayoutConfig::default(), BranchPolicy::Permissive).unwrap();
    let root = store.root();
    store.add_child(root).unwrap();
    store.add_child(root).unwrap();
    store.add_child(root).unwrap();

    let scene = Scene::build(&store);
    assert_eq!(scene.bounds.min.x, START_X - NODE_WIDTH / 2.0);
    assert_eq!(scene.bounds.max.x, START_X + 2.0 * SIBLING_SPACING + NODE_WIDTH / 2.0);
    assert_eq!(scene.bounds.height(), LayoutConfig::default().level_height + NODE_HEIGHT);
}

#[test]
fn scene_serializes_for_renderer() {
    let mut store = TreeStore::new();
    let root = store.root();
    store.attach_media(root, clip()).unwrap();
    store.add_child(root).unwrap();

    let json = serde_json::to_value(Scene::build(&store)).unwrap();
    assert_eq!(json["nodes"].as_array().unwrap().len(), 2);
    assert_eq!(json["nodes"][0]["media"]["mime_type"], "video/mp4");
    assert!(json["nodes"][1]["media"].is_null());
    assert_eq!(json["edges"][0]["connector"]["kind"], "line");
    assert!(json["edges"][0]["path"].as_str().unwrap().starts_with("M "));
}
