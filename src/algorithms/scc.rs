use std::collections::{BTreeSet, HashSet};
use std::iter::Flatten;
use std::option;

use log::debug;

use crate::algorithms::Algorithm;
use crate::error::Result;
use crate::graph::{Graph, Node};

/// Strongly connected components with Kosaraju's two-pass algorithm.
///
/// Every component is returned as the subgraph of the original graph induced
/// by its vertex set. A vertex on no cycle forms a one-vertex component.
#[derive(Debug, Clone, Copy, Default)]
pub struct StronglyConnectedComponents;

/// One pending vertex of an iterative depth-first search and the successors
/// still to be explored from it.
type Frame<'a, N> = (&'a N, Successors<'a, N>);

type Successors<'a, N> = Flatten<option::IntoIter<&'a BTreeSet<N>>>;

fn successors<'a, N: Node>(graph: &'a Graph<N>, node: &N) -> Successors<'a, N> {
    graph.out_edges(node).into_iter().flatten()
}

/// Depth-first search from `root`, calling `on_finish` for each vertex once
/// all of its successors are done (post-order).
fn dfs_post_order<'a, N: Node>(
    graph: &'a Graph<N>,
    root: &'a N,
    visited: &mut HashSet<&'a N>,
    mut on_finish: impl FnMut(&'a N),
) {
    visited.insert(root);
    let mut stack: Vec<Frame<'a, N>> = vec![(root, successors(graph, root))];

    while let Some((node, pending)) = stack.last_mut() {
        match pending.find(|n| !visited.contains(*n)) {
            Some(next) => {
                visited.insert(next);
                stack.push((next, successors(graph, next)));
            }
            None => {
                on_finish(*node);
                stack.pop();
            }
        }
    }
}

impl<N: Node> Algorithm<N> for StronglyConnectedComponents {
    type Output = Vec<Graph<N>>;

    fn execute(&self, graph: &Graph<N>) -> Result<Vec<Graph<N>>> {
        // Pass 1: finish order on the original graph.
        let mut visited = HashSet::new();
        let mut finish_stack = Vec::with_capacity(graph.node_count());
        for node in graph.nodes() {
            if !visited.contains(node) {
                dfs_post_order(graph, node, &mut visited, |n| finish_stack.push(n));
            }
        }

        // Pass 2: collect components on the reverse graph.
        let reverse = graph.reversed();
        let mut visited = HashSet::new();
        let mut components = Vec::new();
        while let Some(root) = finish_stack.pop() {
            // Look the vertex up in the reverse graph so borrows share its lifetime.
            let Some((root, _)) = reverse.adjacency().get_key_value(root) else {
                continue;
            };
            if visited.contains(root) {
                continue;
            }
            let mut vertex_set = BTreeSet::new();
            dfs_post_order(&reverse, root, &mut visited, |n| {
                vertex_set.insert(n.clone());
            });
            components.push(graph.induced_subgraph(&vertex_set));
        }

        debug!(
            "Found {} strongly connected components over {} vertices",
            components.len(),
            graph.node_count()
        );
        Ok(components)
    }
}
