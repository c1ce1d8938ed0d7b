use std::collections::BTreeSet;

use crate::algorithms::Algorithm;
use crate::error::{GraphError, NodeRole, Result};
use crate::graph::{Graph, Node};

/// The subgraph induced by a vertex and its direct successors.
///
/// Besides the star of `center`, every edge among the successors (and back to
/// the center) is copied from the original graph.
#[derive(Debug, Clone)]
pub struct Egonet<N> {
    pub center: N,
}

impl<N: Node> Egonet<N> {
    pub fn new(center: N) -> Self {
        Egonet { center }
    }
}

impl<N: Node> Algorithm<N> for Egonet<N> {
    type Output = Graph<N>;

    fn validate(&self, graph: &Graph<N>) -> Result<()> {
        if !graph.has_node(&self.center) {
            return Err(GraphError::missing_node(NodeRole::Center, &self.center));
        }
        Ok(())
    }

    fn execute(&self, graph: &Graph<N>) -> Result<Graph<N>> {
        let mut vertex_set = BTreeSet::new();
        vertex_set.insert(self.center.clone());
        if let Some(successors) = graph.out_edges(&self.center) {
            vertex_set.extend(successors.iter().cloned());
        }
        Ok(graph.induced_subgraph(&vertex_set))
    }
}
