//! Persistence contract for the project tree.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::models::{NewNode, Node, NodeKey, NodeType, NodeUpdate, RootType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    NotFound(NodeKey),
    InvalidTarget(String),
    Unavailable(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::NotFound(id) => write!(f, "node {id} not found"),
            BackendError::InvalidTarget(reason) => write!(f, "invalid target: {reason}"),
            BackendError::Unavailable(reason) => write!(f, "backend unavailable: {reason}"),
        }
    }
}

impl std::error::Error for BackendError {}

pub type Result<T> = std::result::Result<T, BackendError>;

pub type BackendFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// The seven calls the tree store relies on. Implementations must be cheap to share.
pub trait ProjectBackend: Send + Sync {
    fn fetch_tree(&self, root: RootType) -> BackendFuture<'_, Vec<Node>>;

    /// Lazy children of a group node.
    fn fetch_children(&self, id: NodeKey, kind: NodeType) -> BackendFuture<'_, Vec<Node>>;

    fn create_node(
        &self,
        root: RootType,
        parent: Option<NodeKey>,
        new_node: NewNode,
    ) -> BackendFuture<'_, Node>;

    fn update_node(&self, id: NodeKey, update: NodeUpdate) -> BackendFuture<'_, ()>;

    fn delete_node(&self, id: NodeKey) -> BackendFuture<'_, ()>;

    fn move_node(
        &self,
        dragged: NodeKey,
        target: NodeKey,
        root: RootType,
    ) -> BackendFuture<'_, ()>;

    /// Duplicates `id` next to the original and returns the copy.
    fn copy_node(&self, id: NodeKey) -> BackendFuture<'_, Node>;
}
