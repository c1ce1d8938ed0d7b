//! Breadth-first exploration with parent tracking.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::error::{GraphError, Result};
use crate::graph::{Graph, Node};

/// Maps every discovered vertex to the vertex it was first reached from.
pub type ParentMap<N> = HashMap<N, N>;

/// Run a BFS from `start` until the queue drains or `stop_at` is dequeued.
///
/// Only the first-discovered predecessor of each vertex is recorded, so the
/// parent map is one shortest-path tree rooted at `start`. The start vertex
/// never has a parent. Returns the map and whether `stop_at` was dequeued.
pub fn bfs_tree<N: Node>(graph: &Graph<N>, start: &N, stop_at: Option<&N>) -> (ParentMap<N>, bool) {
    let mut parent_map = ParentMap::new();
    let mut visited = HashSet::new();
    let mut to_explore = VecDeque::new();

    visited.insert(start.clone());
    to_explore.push_back(start.clone());

    while let Some(next) = to_explore.pop_front() {
        if stop_at == Some(&next) {
            return (parent_map, true);
        }
        let Some(neighbors) = graph.out_edges(&next) else {
            continue;
        };
        for neighbor in neighbors {
            if visited.insert(neighbor.clone()) {
                parent_map.insert(neighbor.clone(), next.clone());
                to_explore.push_back(neighbor.clone());
            }
        }
    }
    (parent_map, false)
}

/// Walk the parent chain from `to` back to `from`, returning the path from
/// `from` to `to` inclusive.
pub fn reconstruct_path<N: Node>(parent_map: &ParentMap<N>, from: &N, to: &N) -> Result<Vec<N>> {
    let mut path = vec![to.clone()];
    let mut current = to;
    while current != from {
        current = parent_map.get(current).ok_or_else(|| GraphError::Unreached {
            from: format!("{:?}", from),
            to: format!("{:?}", to),
        })?;
        path.push(current.clone());
    }
    path.reverse();
    Ok(path)
}
