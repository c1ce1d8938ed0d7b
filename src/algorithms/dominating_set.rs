use std::cmp::Reverse;
use std::collections::{BTreeSet, HashSet};

use log::debug;

use crate::algorithms::Algorithm;
use crate::error::Result;
use crate::graph::{Graph, Node};

/// Greedy dominating set ordered by out-degree.
///
/// Vertices are visited from the highest out-degree down; equal degrees are
/// visited in ascending node order. A visited vertex joins the set unless it is
/// already covered by the successors of a selected vertex.
#[derive(Debug, Clone, Copy, Default)]
pub struct DominatingSet;

impl<N: Node> Algorithm<N> for DominatingSet {
    type Output = BTreeSet<N>;

    fn execute(&self, graph: &Graph<N>) -> Result<BTreeSet<N>> {
        let mut dominating_set = BTreeSet::new();
        let mut marked = HashSet::new();

        // (degree, node) keys keep same-degree vertices as separate entries.
        let mut queue: BTreeSet<(Reverse<usize>, &N)> = graph
            .adjacency()
            .iter()
            .map(|(node, successors)| (Reverse(successors.len()), node))
            .collect();

        while let Some((_, vertex)) = queue.pop_first() {
            if dominating_set.contains(vertex) || marked.contains(vertex) {
                continue;
            }
            dominating_set.insert(vertex.clone());
            if let Some(successors) = graph.out_edges(vertex) {
                marked.extend(successors.iter().cloned());
            }
        }

        debug!(
            "Dominating set holds {} of {} vertices",
            dominating_set.len(),
            graph.node_count()
        );
        Ok(dominating_set)
    }
}
