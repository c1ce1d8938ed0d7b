use std::collections::BTreeMap;

use itertools::Itertools;
use log::{debug, info};

use crate::algorithms::Algorithm;
use crate::error::{GraphError, Result};
use crate::graph::{Graph, Node};
use crate::traversal::bfs_tree;

/// Usage count of every directed edge over all BFS trees of one round.
pub type BetweennessMap<N> = BTreeMap<(N, N), usize>;

/// An edge removed while separating communities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedEdge<N> {
    pub round: usize,
    pub from: N,
    pub to: N,
    /// Betweenness of the selected edge in its round. The reverse edge removed
    /// alongside it carries the same value.
    pub betweenness: usize,
}

/// Outcome of a separation run.
#[derive(Debug, Clone)]
pub struct Separation<N: Node> {
    pub graph: Graph<N>,
    pub removed: Vec<RemovedEdge<N>>,
}

impl<N: Node> Separation<N> {
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }

    pub fn was_removed(&self, from: &N, to: &N) -> bool {
        self.removed.iter().any(|e| &e.from == from && &e.to == to)
    }
}

/// Split a graph into communities by repeatedly cutting the busiest edge.
///
/// Every round rebuilds the betweenness map from scratch, removes the edge with
/// the highest count (ties go to the smallest `(from, to)` pair) and, if present,
/// its reverse edge. The caller's graph is never touched.
#[derive(Debug, Clone, Copy)]
pub struct CommunitySeparation {
    pub rounds: usize,
}

impl CommunitySeparation {
    pub fn new(rounds: usize) -> Self {
        CommunitySeparation { rounds }
    }
}

/// Compute the single-path edge betweenness of `graph`.
///
/// For each source a BFS tree is built and every reached vertex walks its
/// parent chain back to the source, counting each traversed tree edge once.
pub fn edge_betweenness<N: Node>(graph: &Graph<N>) -> BetweennessMap<N> {
    let mut betweenness_map = BetweennessMap::new();
    for start in graph.nodes() {
        let (parent_map, _) = bfs_tree(graph, start, None);
        for reached in parent_map.keys() {
            let mut current = reached;
            // The root has no parent, so the walk stops there.
            while let Some(parent) = parent_map.get(current) {
                *betweenness_map
                    .entry((parent.clone(), current.clone()))
                    .or_insert(0) += 1;
                current = parent;
            }
        }
    }
    betweenness_map
}

/// Pick the edge with the highest count, smallest pair on ties.
fn busiest_edge<N: Node>(betweenness_map: &BetweennessMap<N>) -> Option<(&(N, N), usize)> {
    betweenness_map
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(edge, count)| (edge, *count))
}

impl<N: Node> Algorithm<N> for CommunitySeparation {
    type Output = Separation<N>;

    fn validate(&self, graph: &Graph<N>) -> Result<()> {
        if self.rounds > graph.edge_count() {
            return Err(GraphError::RemovalCountExceeded {
                requested: self.rounds,
                available: graph.edge_count(),
            });
        }
        Ok(())
    }

    fn execute(&self, graph: &Graph<N>) -> Result<Separation<N>> {
        let mut working = graph.clone();
        let mut removed = Vec::new();

        for round in 0..self.rounds {
            let betweenness_map = edge_betweenness(&working);
            let Some(((from, to), count)) = busiest_edge(&betweenness_map) else {
                // Only self-loops (or nothing) left, no tree edge to cut.
                debug!("Round {}: no edge carries any path, stopping early", round);
                break;
            };

            working.remove_edge(from, to);
            removed.push(RemovedEdge {
                round,
                from: from.clone(),
                to: to.clone(),
                betweenness: count,
            });
            if working.remove_edge(to, from) {
                removed.push(RemovedEdge {
                    round,
                    from: to.clone(),
                    to: from.clone(),
                    betweenness: count,
                });
            }
            debug!("Round {}: cut {:?} -> {:?} (betweenness {})", round, from, to, count);
        }

        info!(
            "Community separation removed {} edges: [{}]",
            removed.len(),
            removed.iter().map(|e| format!("{:?}->{:?}", e.from, e.to)).format(", ")
        );
        Ok(Separation { graph: working, removed })
    }
}

#[cfg(test)]
mod test_community_separation {
    use crate::algorithms::community_separation::{edge_betweenness, CommunitySeparation};
    use crate::algorithms::Algorithm;
    use crate::error::GraphError;
    use crate::fixture::sample_graph;
    use crate::graph::Graph;

    #[test]
    fn test_cut_bridge() {
        let graph = sample_graph();
        let result = CommunitySeparation::new(1).compute(&graph).unwrap();
        assert_eq!(result.removed_count(), 2);
        assert!(result.was_removed(&6, &7));
        assert!(result.was_removed(&7, &6));
        // The tie between 6->7 and 7->6 goes to the smaller pair.
        assert_eq!((result.removed[0].from, result.removed[0].to), (6, 7));
        assert_eq!(result.removed[0].betweenness, 36);
        assert_eq!(result.graph.edge_count(), 36);
        assert_eq!(result.graph.node_count(), 12);

        // The input graph is left intact.
        assert_eq!(graph.edge_count(), 38);
        assert!(graph.contains_edge(&6, &7));
    }

    #[test]
    fn test_bridge_betweenness() {
        let graph = sample_graph();
        let betweenness_map = edge_betweenness(&graph);
        let max = *betweenness_map.values().max().unwrap();
        assert_eq!(max, 36);
        assert_eq!(betweenness_map.get(&(6, 7)), Some(&36));
        assert_eq!(betweenness_map.get(&(7, 6)), Some(&36));
        assert_eq!(betweenness_map.values().filter(|&&c| c == max).count(), 2);
    }

    #[test]
    fn test_too_many_edges() {
        let graph = sample_graph();
        for _ in 0..2 {
            match CommunitySeparation::new(100).compute(&graph) {
                Err(GraphError::RemovalCountExceeded { requested, available }) => {
                    assert_eq!(requested, 100);
                    assert_eq!(available, 38);
                }
                other => panic!("unexpected result: {:?}", other.map(|s| s.removed)),
            }
        }
    }

    #[test]
    fn test_one_way_edge() {
        // A single chain: the middle edge carries the most paths.
        let graph = Graph::from_edge_list(&[(1, 2), (2, 3), (3, 4)]);
        let result = CommunitySeparation::new(1).compute(&graph).unwrap();
        assert_eq!(result.removed_count(), 1);
        assert!(result.was_removed(&2, &3));
        assert_eq!(result.graph.edge_count(), 2);
    }

    #[test]
    fn test_rounds_are_recorded() {
        let graph = sample_graph();
        let result = CommunitySeparation::new(3).compute(&graph).unwrap();
        let rounds: Vec<usize> = result.removed.iter().map(|e| e.round).collect();
        assert_eq!(rounds[0], 0);
        assert!(rounds.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*rounds.last().unwrap(), 2);
        assert_eq!(result.graph.edge_count(), 38 - result.removed_count());
    }

    #[test]
    fn test_self_loops_only() {
        let graph = Graph::from_edge_list(&[(1, 1), (2, 2)]);
        let result = CommunitySeparation::new(2).compute(&graph).unwrap();
        assert_eq!(result.removed_count(), 0);
        assert_eq!(result.graph.edge_count(), 2);
    }

    #[test]
    fn test_zero_rounds() {
        let graph = sample_graph();
        let result = CommunitySeparation::new(0).compute(&graph).unwrap();
        assert_eq!(result.graph, graph);
        assert!(result.removed.is_empty());
    }
}
