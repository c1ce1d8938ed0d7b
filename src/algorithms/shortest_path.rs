use crate::algorithms::Algorithm;
use crate::error::{GraphError, NodeRole, Result};
use crate::graph::{Graph, Node};
use crate::traversal::{bfs_tree, reconstruct_path};

/// Hop-count shortest path between two vertices.
///
/// The result runs from `from` to `to` inclusive. When `to` cannot be reached
/// from `from` the path is empty.
#[derive(Debug, Clone)]
pub struct ShortestPathFromTo<N> {
    pub from: N,
    pub to: N,
}

impl<N: Node> ShortestPathFromTo<N> {
    pub fn new(from: N, to: N) -> Self {
        ShortestPathFromTo { from, to }
    }
}

impl<N: Node> Algorithm<N> for ShortestPathFromTo<N> {
    type Output = Vec<N>;

    fn validate(&self, graph: &Graph<N>) -> Result<()> {
        if !graph.has_node(&self.from) {
            return Err(GraphError::missing_node(NodeRole::Start, &self.from));
        }
        if !graph.has_node(&self.to) {
            return Err(GraphError::missing_node(NodeRole::End, &self.to));
        }
        Ok(())
    }

    fn execute(&self, graph: &Graph<N>) -> Result<Vec<N>> {
        let (parent_map, reached) = bfs_tree(graph, &self.from, Some(&self.to));
        if !reached {
            return Ok(Vec::new());
        }
        reconstruct_path(&parent_map, &self.from, &self.to)
    }
}
