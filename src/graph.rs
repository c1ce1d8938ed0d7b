use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;
use std::hash::Hash;

/// Identity of a vertex. Any ordered, hashable, cloneable value can be a node;
/// the ordering is only used to make tie-breaks deterministic.
pub trait Node: Clone + Ord + Hash + Debug + Send + Sync + 'static {}

impl<T> Node for T where T: Clone + Ord + Hash + Debug + Send + Sync + 'static {}

/// The successor sets of every vertex.
pub type AdjMap<N> = BTreeMap<N, BTreeSet<N>>;

/// Directed graph backed by an adjacency map, without duplicate edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph<N: Node> {
    adj_map: AdjMap<N>,
    v_size: usize,
    e_size: usize,
}

impl<N: Node> Default for Graph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Node> Graph<N> {
    pub fn new() -> Self {
        // Create a new empty graph.
        Graph {
            adj_map: AdjMap::new(),
            v_size: 0,
            e_size: 0,
        }
    }

    /// Build a graph from a list of directed edges.
    pub fn from_edge_list(edge_list: &[(N, N)]) -> Self {
        edge_list.iter().cloned().collect()
    }

    pub fn node_count(&self) -> usize {
        self.v_size
    }

    pub fn edge_count(&self) -> usize {
        self.e_size
    }

    pub fn is_empty(&self) -> bool {
        self.v_size == 0
    }

    /// Return the immutable reference of the adj map.
    pub fn adjacency(&self) -> &AdjMap<N> {
        &self.adj_map
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.adj_map.keys()
    }

    /// Iterate over all directed edges in (source, target) order.
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N)> + '_ {
        self.adj_map
            .iter()
            .flat_map(|(u, neighbors)| neighbors.iter().map(move |v| (u, v)))
    }

    /// Insert a vertex, returns false if it was already present.
    pub fn add_node(&mut self, node: N) -> bool {
        if self.adj_map.contains_key(&node) {
            return false;
        }
        self.adj_map.insert(node, BTreeSet::new());
        self.v_size += 1;
        true
    }

    /// Remove a vertex together with its outgoing and incoming edges.
    ///
    /// There is no reverse index, so every other adjacency set is scanned.
    pub fn remove_node(&mut self, node: &N) -> bool {
        let neighbors = match self.adj_map.remove(node) {
            Some(neighbors) => neighbors,
            None => return false,
        };
        self.e_size -= neighbors.len();
        for successors in self.adj_map.values_mut() {
            if successors.remove(node) {
                self.e_size -= 1;
            }
        }
        self.v_size -= 1;
        true
    }

    /// Insert the directed edge (from -> to), creating both endpoints if needed.
    /// Returns false if the edge already existed.
    pub fn add_edge(&mut self, from: N, to: N) -> bool {
        self.add_node(from.clone());
        self.add_node(to.clone());
        if self.adj_map.entry(from).or_default().insert(to) {
            self.e_size += 1;
            true
        } else {
            false
        }
    }

    pub fn remove_edge(&mut self, from: &N, to: &N) -> bool {
        let removed = self
            .adj_map
            .get_mut(from)
            .map_or(false, |successors| successors.remove(to));
        if removed {
            self.e_size -= 1;
        }
        removed
    }

    pub fn has_node(&self, node: &N) -> bool {
        self.adj_map.contains_key(node)
    }

    /// Check whether the directed edge (from -> to) exists.
    /// Returns None when `from` is not in the graph.
    pub fn has_edge(&self, from: &N, to: &N) -> Option<bool> {
        self.adj_map.get(from).map(|successors| successors.contains(to))
    }

    pub fn contains_edge(&self, from: &N, to: &N) -> bool {
        self.has_edge(from, to).unwrap_or(false)
    }

    /// Successors of `node`, None when the node is absent.
    pub fn out_edges(&self, node: &N) -> Option<&BTreeSet<N>> {
        self.adj_map.get(node)
    }

    /// Predecessors of `node`, computed by scanning every adjacency set.
    pub fn in_edges(&self, node: &N) -> Option<BTreeSet<N>> {
        if !self.has_node(node) {
            return None;
        }
        let predecessors = self
            .adj_map
            .iter()
            .filter(|(_, successors)| successors.contains(node))
            .map(|(u, _)| u.clone())
            .collect();
        Some(predecessors)
    }

    pub fn out_degree(&self, node: &N) -> usize {
        self.adj_map.get(node).map_or(0, |v| v.len())
    }

    pub fn clear(&mut self) {
        self.adj_map.clear();
        self.v_size = 0;
        self.e_size = 0;
    }

    /// Build the graph with every edge flipped. All vertices are kept, also
    /// those without incoming edges.
    pub fn reversed(&self) -> Graph<N> {
        let mut reverse = Graph::new();
        for node in self.nodes() {
            reverse.add_node(node.clone());
        }
        for (u, v) in self.edges() {
            reverse.add_edge(v.clone(), u.clone());
        }
        reverse
    }

    /// Subgraph on `vertex_set` holding every edge of this graph whose both
    /// endpoints are in the set. Vertices unknown to this graph are ignored.
    pub fn induced_subgraph(&self, vertex_set: &BTreeSet<N>) -> Graph<N> {
        let mut subgraph = Graph::new();
        for vertex in vertex_set.iter().filter(|v| self.has_node(v)) {
            subgraph.add_node(vertex.clone());
        }
        for vertex in vertex_set {
            let Some(successors) = self.adj_map.get(vertex) else {
                continue;
            };
            for neighbor in successors.iter().filter(|n| vertex_set.contains(*n)) {
                subgraph.add_edge(vertex.clone(), neighbor.clone());
            }
        }
        subgraph
    }
}

impl<N: Node> FromIterator<(N, N)> for Graph<N> {
    fn from_iter<I: IntoIterator<Item = (N, N)>>(iter: I) -> Self {
        let mut graph = Graph::new();
        graph.extend(iter);
        graph
    }
}

impl<N: Node> Extend<(N, N)> for Graph<N> {
    fn extend<I: IntoIterator<Item = (N, N)>>(&mut self, iter: I) {
        for (from, to) in iter {
            self.add_edge(from, to);
        }
    }
}
