use super::NodeIndex;

/// Errors raised while assembling a [`RootedTree`](super::RootedTree)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// Node index does not exist in the arena
    #[error("Node index {0} is out of range")]
    NodeOutOfRange(NodeIndex),

    /// Node already hangs below another parent
    #[error("Node {0} already has a parent edge")]
    AlreadyHasParent(NodeIndex),

    /// The tree already has a root
    #[error("Root is already set to node {0}")]
    RootAlreadySet(NodeIndex),

    /// The root cannot be attached below another node
    #[error("Root node {0} cannot become a child")]
    RootAsChild(NodeIndex),

    /// `child` is `parent` itself or lies above it
    #[error("Edge {parent} -> {child} would close a cycle")]
    WouldCreateCycle { parent: NodeIndex, child: NodeIndex },
}
