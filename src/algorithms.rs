pub mod community_separation;
pub mod dominating_set;
pub mod egonet;
pub mod scc;
pub mod shortest_path;
pub mod shortest_paths;

use crate::error::Result;
use crate::graph::{Graph, Node};

/// A unit of analytical work over a read-only graph.
///
/// `validate` checks the arguments against the graph and must not traverse it;
/// `execute` runs the algorithm to completion on the calling thread. The
/// [`Executor`](crate::task::Executor) runs `validate` on the caller and
/// `execute` on a worker.
pub trait Algorithm<N: Node>: Send + 'static {
    type Output: Send + 'static;

    fn validate(&self, _graph: &Graph<N>) -> Result<()> {
        Ok(())
    }

    fn execute(&self, graph: &Graph<N>) -> Result<Self::Output>;

    /// Validate and execute synchronously.
    fn compute(&self, graph: &Graph<N>) -> Result<Self::Output> {
        self.validate(graph)?;
        self.execute(graph)
    }
}
