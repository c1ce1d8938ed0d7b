use std::fmt;

use thiserror::Error;

/// Which argument of an algorithm referenced the missing node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Center,
    Start,
    End,
    Source,
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeRole::Center => "center",
            NodeRole::Start => "start",
            NodeRole::End => "end",
            NodeRole::Source => "source",
        };
        f.write_str(name)
    }
}

/// Errors raised by the graph algorithms and the executor.
///
/// Argument errors (`RemovalCountExceeded`, `MissingNode`) are always returned
/// before any traversal is started or any task is scheduled.
#[derive(Debug, Error)]
pub enum GraphError {
    /// More removal rounds were requested than the graph has edges.
    #[error("cannot remove {requested} edges, the graph only has {available}")]
    RemovalCountExceeded { requested: usize, available: usize },

    /// A node passed as an argument is not part of the graph.
    #[error("{role} node {node} does not exist")]
    MissingNode { role: NodeRole, node: String },

    /// A traversal that should have reached `to` did not.
    #[error("traversal from {from} never reached {to}")]
    Unreached { from: String, to: String },

    /// The worker dropped the task before producing a result (it panicked).
    #[error("algorithm task aborted before completion")]
    TaskAborted,

    /// A blocking wait was attempted on a thread driving an async runtime.
    #[error("cannot block on a task from inside an async runtime, await it instead")]
    BlockingInRuntime,

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl GraphError {
    pub(crate) fn missing_node<N: fmt::Debug>(role: NodeRole, node: &N) -> Self {
        GraphError::MissingNode {
            role,
            node: format!("{:?}", node),
        }
    }

    /// True for errors caused by the caller's arguments.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            GraphError::RemovalCountExceeded { .. } | GraphError::MissingNode { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
