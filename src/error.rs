//! Error types
//!
//! Structural misuse of the tree (attaching a child to a measured leaf,
//! resetting an attached node, ...) is modeled by [`TreeError`]. The
//! panicking tree methods ([`crate::Node::insert_child`] and friends) wrap
//! the `try_*` variants and abort with the error's message, matching the
//! engine's fatal-precondition contract; hosts that prefer `?` can call the
//! `try_*` variants directly.
//!
//! Indefinite numeric values are not errors. They are carried as `NAN` and
//! every consumer branch is gated by an explicit definedness test.

use thiserror::Error;

/// Result type alias for fallible tree operations
pub type Result<T> = std::result::Result<T, TreeError>;

/// Structural precondition violations on the node tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
  /// The child being inserted is still attached to another parent
  #[error("Child already has a parent, it must be removed first.")]
  ChildAlreadyAttached,

  /// Nodes with measure callbacks are leaves and cannot take children
  #[error("Cannot add child: Nodes with measure functions cannot have children.")]
  ChildUnderMeasureNode,

  /// A measure callback can only be installed on a childless node
  #[error("Cannot set measure function: Nodes with measure functions cannot have children.")]
  MeasureFuncOnNonLeaf,

  /// Reset requires a detached node
  #[error("Cannot reset a node which still has children attached")]
  ResetNodeWithChildren,

  /// Reset requires a detached node
  #[error("Cannot reset a node still attached to a parent")]
  ResetAttachedNode,

  /// Only measured leaves track external content and may be manually dirtied
  #[error("Only leaf nodes with custom measure functions should manually mark themselves as dirty")]
  DirtyNonMeasuredNode,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn messages_name_the_violated_precondition() {
    assert!(TreeError::ChildAlreadyAttached.to_string().contains("parent"));
    assert!(TreeError::MeasureFuncOnNonLeaf
      .to_string()
      .contains("measure function"));
    assert!(TreeError::ResetAttachedNode.to_string().contains("reset"));
  }
}
