use super::*;
use crate::layout::LayoutConfig;
use crate::tree::BranchPolicy;

// =============================================================================
// PARSER TESTS
// =============================================================================

#[test]
fn parse_all_commands() {
    let input = r"
        # build a small tree
        attach 0 video/mp4 file:///clips/intro.mp4
        add 0
        add 0

        reset
    ";
    let steps = parse(input).unwrap();
    assert_eq!(steps.len(), 4);
    assert_eq!(steps[0].line, 3);
    assert_eq!(
        steps[0].command,
        Command::Attach { node: 0, media: MediaRef::new("file:///clips/intro.mp4", "video/mp4") }
    );
    assert_eq!(steps[1].command, Command::Add { parent: 0 });
    assert_eq!(steps[3].command, Command::Reset);
    assert_eq!(steps[3].line, 7);
}

#[test]
fn parse_uri_keeps_spaces_and_fragments() {
    let steps = parse("attach 2 video/webm file:///my clips/take 1.webm#t=5").unwrap();
    let Command::Attach { node, media } = &steps[0].command else {
        panic!("expected attach");
    };
    assert_eq!(*node, 2);
    assert_eq!(media.uri, "file:///my clips/take 1.webm#t=5");
    assert_eq!(media.mime_type, "video/webm");
}

#[test]
fn parse_empty_script() {
    assert!(parse("").unwrap().is_empty());
    assert!(parse("# only comments\n\n   \n").unwrap().is_empty());
}

#[test]
fn parse_rejects_unknown_command() {
    let err = parse("add 0\ndelete 1\n").unwrap_err();
    assert!(matches!(err, ScriptError::Parse { line: 2, .. }));
    assert_eq!(err.to_string(), "line 2: unknown command: delete");
}

#[test]
fn parse_rejects_bad_arguments() {
    for input in ["add", "add x", "add -1", "add 1 2", "attach 0", "attach 0 video/mp4", "reset now"] {
        let err = parse(input).unwrap_err();
        assert!(matches!(err, ScriptError::Parse { line: 1, .. }), "{input}: {err}");
    }
}

// =============================================================================
// RUNNER TESTS
// =============================================================================

#[test]
fn runner_builds_tree() {
    let steps = parse(
        "attach 0 video/mp4 a.mp4\n\
         add 0\n\
         add 0\n\
         attach 1 video/mp4 b.mp4\n\
         add 1\n",
    )
    .unwrap();
    let mut store = TreeStore::new();
    let mut runner = Runner::new(&mut store);
    runner.run(&steps).unwrap();

    let ids = runner.ids().to_vec();
    assert_eq!(ids.len(), 4);
    assert_eq!(runner.rejected_media(), 0);
    assert_eq!(store.len(), 4);
    assert_eq!(store.get(&ids[3]).unwrap().parent, Some(ids[1]));
    assert_eq!(store.get(&ids[0]).unwrap().children, vec![ids[1], ids[2]]);
}

#[test]
fn runner_counts_rejected_media() {
    let steps = parse("attach 0 image/png a.png\nattach 0 video/mp4 a.mp4\n").unwrap();
    let mut store = TreeStore::new();
    let mut runner = Runner::new(&mut store);
    runner.run(&steps).unwrap();
    assert_eq!(runner.rejected_media(), 1);
    assert!(store.get(&store.root()).unwrap().has_media());
}

#[test]
fn runner_unknown_index() {
    let steps = parse("attach 0 video/mp4 a.mp4\nadd 3\n").unwrap();
    let mut store = TreeStore::new();
    let err = Runner::new(&mut store).run(&steps).unwrap_err();
    assert!(matches!(err, ScriptError::UnknownNode { line: 2, index: 3 }));
}

#[test]
fn runner_surfaces_tree_errors_with_line() {
    let steps = parse("add 0\n").unwrap();
    let mut store = TreeStore::new();
    let err = Runner::new(&mut store).run(&steps).unwrap_err();
    assert!(matches!(err, ScriptError::Tree { line: 1, source: TreeError::MissingMedia(_) }));
    assert!(err.to_string().starts_with("line 1: node has no media"));
}

#[test]
fn runner_permissive_store_allows_placeholder_branching() {
    let steps = parse("add 0\nadd 1\n").unwrap();
    let mut store = TreeStore::with_config(LayoutConfig::default(), BranchPolicy::Permissive).unwrap();
    let mut runner = Runner::new(&mut store);
    runner.run(&steps).unwrap();
    let leaf = runner.id(2).unwrap();
    assert_eq!(store.get(&leaf).unwrap().depth, 2);
}

#[test]
fn runner_reset_restarts_indices() {
    let steps = parse("attach 0 video/mp4 a.mp4\nadd 0\nreset\nadd 1\n").unwrap();
    let mut store = TreeStore::new();
    let mut runner = Runner::new(&mut store);
    let err = runner.run(&steps).unwrap_err();
    assert!(matches!(err, ScriptError::UnknownNode { line: 4, index: 1 }));
    assert_eq!(runner.ids().len(), 1);
}
