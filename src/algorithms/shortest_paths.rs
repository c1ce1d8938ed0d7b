use std::collections::{BTreeMap, HashSet};

use log::debug;
use rayon::prelude::*;

use crate::algorithms::Algorithm;
use crate::error::{GraphError, NodeRole, Result};
use crate::graph::{Graph, Node};

/// Shortest paths from one source to every vertex it reaches.
///
/// Each path runs from the source to the target inclusive. The source's own
/// zero-length path is not reported. Paths come out in the order the targets
/// are settled, i.e. by non-decreasing hop count.
#[derive(Debug, Clone)]
pub struct ShortestPathsFrom<N> {
    pub source: N,
}

impl<N: Node> ShortestPathsFrom<N> {
    pub fn new(source: N) -> Self {
        ShortestPathsFrom { source }
    }
}

/// Shortest paths between every ordered pair of connected vertices.
///
/// One single-source run per vertex is fanned out on the current rayon pool;
/// the joined result holds one contiguous run of paths per source, sources in
/// node order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestPaths;

/// Settle vertices in order of the shortest known path.
///
/// The unsettled vertex with the fewest hops is found by a linear scan; equal
/// lengths settle the smaller vertex first.
fn paths_from<N: Node>(graph: &Graph<N>, source: &N) -> Vec<Vec<N>> {
    let mut paths_list = Vec::new();
    let mut settled = HashSet::new();
    let mut unsettled: BTreeMap<N, Vec<N>> = BTreeMap::new();
    unsettled.insert(source.clone(), vec![source.clone()]);

    while let Some(current) = unsettled
        .iter()
        .min_by_key(|(_, path)| path.len())
        .map(|(node, _)| node.clone())
    {
        let Some(path) = unsettled.remove(&current) else {
            break;
        };
        // Settle before relaxing so a self-loop cannot bring the vertex back.
        settled.insert(current.clone());

        if let Some(successors) = graph.out_edges(&current) {
            for next in successors.iter().filter(|n| !settled.contains(*n)) {
                let shorter = unsettled
                    .get(next)
                    .map_or(true, |known| known.len() > path.len() + 1);
                if shorter {
                    let mut extended = path.clone();
                    extended.push(next.clone());
                    unsettled.insert(next.clone(), extended);
                }
            }
        }

        if &current != source {
            paths_list.push(path);
        }
    }
    paths_list
}

impl<N: Node> Algorithm<N> for ShortestPathsFrom<N> {
    type Output = Vec<Vec<N>>;

    fn validate(&self, graph: &Graph<N>) -> Result<()> {
        if !graph.has_node(&self.source) {
            return Err(GraphError::missing_node(NodeRole::Source, &self.source));
        }
        Ok(())
    }

    fn execute(&self, graph: &Graph<N>) -> Result<Vec<Vec<N>>> {
        Ok(paths_from(graph, &self.source))
    }
}

impl<N: Node> Algorithm<N> for ShortestPaths {
    type Output = Vec<Vec<N>>;

    fn execute(&self, graph: &Graph<N>) -> Result<Vec<Vec<N>>> {
        let sources: Vec<&N> = graph.nodes().collect();
        let runs: Vec<Vec<Vec<N>>> = sources
            .par_iter()
            .map(|source| paths_from(graph, source))
            .collect();

        let paths: Vec<Vec<N>> = runs.into_iter().flatten().collect();
        debug!(
            "All-pairs run over {} sources produced {} paths",
            sources.len(),
            paths.len()
        );
        Ok(paths)
    }
}

/// Summary of a list of paths, measured in hops.
#[derive(Debug, Clone, PartialEq)]
pub struct PathStats<N> {
    pub count: usize,
    /// First path of maximal length.
    pub longest: Option<Vec<N>>,
    pub max_hops: usize,
    pub mean_hops: f64,
}

impl<N: Clone> PathStats<N> {
    pub fn from_paths(paths: &[Vec<N>]) -> Self {
        let hops = |path: &Vec<N>| path.len().saturating_sub(1);

        let mut longest: Option<&Vec<N>> = None;
        for path in paths {
            if longest.map_or(true, |l| hops(path) > hops(l)) {
                longest = Some(path);
            }
        }
        let total: usize = paths.iter().map(hops).sum();
        let mean_hops = if paths.is_empty() {
            0.0
        } else {
            total as f64 / paths.len() as f64
        };

        PathStats {
            count: paths.len(),
            max_hops: longest.map_or(0, hops),
            longest: longest.cloned(),
            mean_hops,
        }
    }
}
