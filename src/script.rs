//! Line-oriented command scripts for driving a [`TreeStore`].
//!
//! ```text
//! # lines starting with '#' are comments
//! attach 0 video/mp4 file:///clips/intro.mp4
//! add 0
//! add 0
//! attach 1 video/webm file:///clips/left branch.webm
//! add 1
//! reset
//! ```
//!
//! Nodes are addressed by creation index: `0` is the root, `1` the first
//! child added, and so on. `reset` starts the numbering over. Everything after
//! the MIME type on an `attach` line is the URI, spaces included.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use tracing::debug;

use crate::media::MediaRef;
use crate::tree::{AttachOutcome, NodeId, TreeError, TreeStore};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Reset,
    Add { parent: usize },
    Attach { node: usize, media: MediaRef },
}

/// A parsed command with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub line: usize,
    pub command: Command,
}

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("line {line}: no node with index {index}")]
    UnknownNode { line: usize, index: usize },
    #[error("line {line}: {source}")]
    Tree {
        line: usize,
        #[source]
        source: TreeError,
    },
}

// =============================================================================
// PARSE
// =============================================================================

/// Parse a whole script.
///
/// # Errors
///
/// Returns `Parse` for the first malformed line.
pub fn parse(input: &str) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    for (i, raw) in input.lines().enumerate() {
        let line = i + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        let command = parse_command(text).map_err(|message| ScriptError::Parse { line, message })?;
        steps.push(Step { line, command });
    }
    Ok(steps)
}

fn parse_command(text: &str) -> Result<Command, String> {
    let (verb, rest) = split_word(text);
    match verb {
        "reset" => {
            if !rest.is_empty() {
                return Err(format!("unexpected arguments to reset: {rest}"));
            }
            Ok(Command::Reset)
        }
        "add" => {
            let (index, extra) = split_word(rest);
            if !extra.is_empty() {
                return Err(format!("unexpected arguments to add: {extra}"));
            }
            Ok(Command::Add { parent: parse_index(index)? })
        }
        "attach" => {
            let (index, rest) = split_word(rest);
            let (mime_type, uri) = split_word(rest);
            if mime_type.is_empty() || uri.is_empty() {
                return Err("usage: attach <index> <mime-type> <uri>".to_owned());
            }
            Ok(Command::Attach { node: parse_index(index)?, media: MediaRef::new(uri, mime_type) })
        }
        other => Err(format!("unknown command: {other}")),
    }
}

fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (text, ""),
    }
}

fn parse_index(word: &str) -> Result<usize, String> {
    if word.is_empty() {
        return Err("missing node index".to_owned());
    }
    word.parse::<usize>().map_err(|e| format!("invalid node index `{word}`: {e}"))
}

// =============================================================================
// RUN
// =============================================================================

/// Applies parsed steps to a store, tracking creation indices.
pub struct Runner<'a> {
    store: &'a mut TreeStore,
    ids: Vec<NodeId>,
    rejected_media: usize,
}

impl<'a> Runner<'a> {
    /// Start addressing `store`'s current root as index 0.
    ///
    /// Only the root is addressable until nodes are added through the runner.
    pub fn new(store: &'a mut TreeStore) -> Self {
        let ids = vec![store.root()];
        Self { store, ids, rejected_media: 0 }
    }

    /// Apply every step in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns `UnknownNode` for an index that was never created, or `Tree`
    /// when the store rejects the operation.
    pub fn run(&mut self, steps: &[Step]) -> Result<(), ScriptError> {
        for step in steps {
            self.apply(step)?;
        }
        Ok(())
    }

    /// Apply one step.
    ///
    /// # Errors
    ///
    /// See [`Self::run`].
    pub fn apply(&mut self, step: &Step) -> Result<(), ScriptError> {
        let line = step.line;
        match &step.command {
            Command::Reset => {
                self.store.reset();
                self.ids = vec![self.store.root()];
            }
            Command::Add { parent } => {
                let parent_id = self.resolve(line, *parent)?;
                let id = self
                    .store
                    .add_child(parent_id)
                    .map_err(|source| ScriptError::Tree { line, source })?;
                self.ids.push(id);
            }
            Command::Attach { node, media } => {
                let node_id = self.resolve(line, *node)?;
                let outcome = self
                    .store
                    .attach_media(node_id, media.clone())
                    .map_err(|source| ScriptError::Tree { line, source })?;
                if outcome == AttachOutcome::NotVideo {
                    self.rejected_media += 1;
                }
            }
        }
        debug!(line, command = ?step.command, "script step applied");
        Ok(())
    }

    /// Id of the node created at `index`.
    #[must_use]
    pub fn id(&self, index: usize) -> Option<NodeId> {
        self.ids.get(index).copied()
    }

    /// Ids in creation order.
    #[must_use]
    pub fn ids(&self) -> &[NodeId] {
        &self.ids
    }

    /// Number of `attach` steps ignored because the media was not video.
    #[must_use]
    pub fn rejected_media(&self) -> usize {
        self.rejected_media
    }

    fn resolve(&self, line: usize, index: usize) -> Result<NodeId, ScriptError> {
        self.id(index).ok_or(ScriptError::UnknownNode { line, index })
    }
}
