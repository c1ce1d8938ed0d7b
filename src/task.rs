use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::FutureExt;
use log::{debug, error};
use rayon::{ThreadPool, ThreadPoolBuilder};
use tokio::sync::oneshot;

use crate::algorithms::Algorithm;
use crate::config::EngineConfig;
use crate::error::{GraphError, Result};
use crate::graph::{Graph, Node};

/// Result of an algorithm running on a worker. Resolves once the worker is
/// done; can be awaited on any runtime or waited on synchronously.
#[must_use = "a task handle does nothing unless awaited"]
pub struct TaskHandle<T> {
    rx: oneshot::Receiver<Result<T>>,
}

impl<T> TaskHandle<T> {
    /// Block the current thread until the result is ready.
    ///
    /// Must not be called from a worker of the executor that runs the task.
    /// Returns `BlockingInRuntime` when called from inside a tokio runtime,
    /// where the handle has to be awaited.
    pub fn wait(self) -> Result<T> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(GraphError::BlockingInRuntime);
        }
        self.rx.blocking_recv().unwrap_or(Err(GraphError::TaskAborted))
    }
}

impl<T> Future for TaskHandle<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.rx
            .poll_unpin(cx)
            .map(|received| received.unwrap_or(Err(GraphError::TaskAborted)))
    }
}

/// Worker pool that runs algorithms in the background.
///
/// Arguments are validated on the caller's thread, so an argument error means
/// nothing was scheduled. Parallel algorithms fan out on the same pool.
#[derive(Clone)]
pub struct Executor {
    pool: Arc<ThreadPool>,
}

impl Executor {
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let prefix = config.thread_name_prefix.clone();
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.worker_count())
            .thread_name(move |index| format!("{}-{}", prefix, index))
            // A panicking task drops its sender, the handle reports TaskAborted.
            .panic_handler(|_| error!("Algorithm task panicked"))
            .build()?;
        debug!("Executor started with {} workers", pool.current_num_threads());
        Ok(Executor { pool: Arc::new(pool) })
    }

    pub fn worker_count(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Validate `algorithm` against `graph` and run it on a worker.
    pub fn spawn<N, A>(&self, graph: Arc<Graph<N>>, algorithm: A) -> Result<TaskHandle<A::Output>>
    where
        N: Node,
        A: Algorithm<N>,
    {
        algorithm.validate(&graph)?;

        let (tx, rx) = oneshot::channel();
        self.pool.spawn(move || {
            let result = algorithm.execute(&graph);
            if let Err(ref err) = result {
                error!("Algorithm failed: {}", err);
            }
            // The caller may have dropped the handle, that is fine.
            let _ = tx.send(result);
        });
        Ok(TaskHandle { rx })
    }
}

#[cfg(test)]
mod test_task {
    use std::sync::Arc;

    use crate::algorithms::community_separation::CommunitySeparation;
    use crate::algorithms::dominating_set::DominatingSet;
    use crate::algorithms::egonet::Egonet;
    use crate::algorithms::scc::StronglyConnectedComponents;
    use crate::algorithms::shortest_path::ShortestPathFromTo;
    use crate::algorithms::shortest_paths::{ShortestPaths, ShortestPathsFrom};
    use crate::algorithms::Algorithm;
    use crate::config::EngineConfig;
    use crate::error::{GraphError, Result};
    use crate::fixture::sample_graph;
    use crate::graph::Graph;
    use crate::task::Executor;

    fn executor() -> Executor {
        let config = EngineConfig {
            worker_threads: 4,
            ..Default::default()
        };
        Executor::new(&config).unwrap()
    }

    /// Always panics on the worker.
    struct Exploding;

    impl Algorithm<u32> for Exploding {
        type Output = ();

        fn execute(&self, _graph: &Graph<u32>) -> Result<()> {
            panic!("boom");
        }
    }

    #[tokio::test]
    async fn test_spawn_all_algorithms() {
        let executor = executor();
        let graph = Arc::new(sample_graph());

        let separation = executor.spawn(graph.clone(), CommunitySeparation::new(1)).unwrap();
        let dominating = executor.spawn(graph.clone(), DominatingSet).unwrap();
        let egonet = executor.spawn(graph.clone(), Egonet::new(1)).unwrap();
        let path = executor.spawn(graph.clone(), ShortestPathFromTo::new(1, 7)).unwrap();
        let from_one = executor.spawn(graph.clone(), ShortestPathsFrom::new(1)).unwrap();
        let all_pairs = executor.spawn(graph.clone(), ShortestPaths).unwrap();
        let components = executor.spawn(graph.clone(), StronglyConnectedComponents).unwrap();

        assert_eq!(separation.await.unwrap().graph.edge_count(), 36);
        assert!(dominating.await.unwrap().contains(&12));
        assert_eq!(egonet.await.unwrap().edge_count(), 4);
        assert_eq!(path.await.unwrap(), vec![1, 5, 6, 7]);
        assert_eq!(from_one.await.unwrap().len(), 11);
        assert_eq!(all_pairs.await.unwrap().len(), 132);
        assert_eq!(components.await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_all_pairs_matches_sync() {
        let executor = executor();
        let graph = sample_graph();
        let expected = ShortestPaths.compute(&graph).unwrap();
        let paths = executor.spawn(Arc::new(graph), ShortestPaths).unwrap().await.unwrap();
        assert_eq!(paths, expected);
    }

    #[test]
    fn test_argument_errors_before_scheduling() {
        let executor = executor();
        let graph = Arc::new(sample_graph());
        for _ in 0..2 {
            let err = executor.spawn(graph.clone(), CommunitySeparation::new(100)).err().unwrap();
            assert!(err.is_invalid_argument());
            let err = executor.spawn(graph.clone(), Egonet::new(25)).err().unwrap();
            assert!(err.is_invalid_argument());
            let err = executor.spawn(graph.clone(), ShortestPathFromTo::new(1, 15)).err().unwrap();
            assert!(err.is_invalid_argument());
            let err = executor.spawn(graph.clone(), ShortestPathsFrom::new(15)).err().unwrap();
            assert!(err.is_invalid_argument());
        }
    }

    #[test]
    fn test_wait_blocking() {
        let executor = executor();
        let graph = Arc::new(sample_graph());
        let set = executor.spawn(graph, DominatingSet).unwrap().wait().unwrap();
        assert!(set.contains(&1));
    }

    #[tokio::test]
    async fn test_wait_inside_runtime_is_rejected() {
        let executor = executor();
        let graph = Arc::new(sample_graph());
        let handle = executor.spawn(graph, DominatingSet).unwrap();
        assert!(matches!(handle.wait(), Err(GraphError::BlockingInRuntime)));
    }

    #[test]
    fn test_panicking_worker_aborts_task() {
        let executor = executor();
        let graph = Arc::new(sample_graph());
        let handle = executor.spawn(graph, Exploding).unwrap();
        assert!(matches!(handle.wait(), Err(GraphError::TaskAborted)));
    }
}
