//! Directed graph engine with a handful of analytical algorithms:
//! betweenness-driven community separation, greedy dominating sets, egonets,
//! hop-count shortest paths and strongly connected components.
//!
//! Every algorithm implements [`Algorithm`]. Call [`Algorithm::compute`] to run
//! it on the current thread, or hand it to an [`Executor`] to run it on a worker
//! pool and await the returned [`TaskHandle`].

pub mod algorithms;
pub mod config;
pub mod error;
pub mod graph;
pub mod logger;
pub mod task;
pub mod traversal;

pub use algorithms::community_separation::{CommunitySeparation, RemovedEdge, Separation};
pub use algorithms::dominating_set::DominatingSet;
pub use algorithms::egonet::Egonet;
pub use algorithms::scc::StronglyConnectedComponents;
pub use algorithms::shortest_path::ShortestPathFromTo;
pub use algorithms::shortest_paths::{PathStats, ShortestPaths, ShortestPathsFrom};
pub use algorithms::Algorithm;
pub use config::{EngineConfig, LogConfig};
pub use error::{GraphError, NodeRole, Result};
pub use graph::{Graph, Node};
pub use task::{Executor, TaskHandle};
