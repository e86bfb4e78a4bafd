use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Admission gate bounding how many resolvers run at once.
///
/// `submit` parks the caller until a slot frees up, then starts the work and
/// returns without waiting for it. The slot travels into the spawned task
/// and is given back whenever that task ends, aborts included. Dropping the
/// dispatcher aborts everything still in flight.
pub struct Dispatcher {
    limit: usize,
    slots: Arc<Semaphore>,
    tasks: JoinSet<()>,
}

impl Dispatcher {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            slots: Arc::new(Semaphore::new(limit)),
            tasks: JoinSet::new(),
        }
    }

    /// Waits for a free slot, then spawns `work` and hands control back.
    pub async fn submit<F>(&mut self, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let slot = self
            .slots
            .clone()
            .acquire_owned()
            .await
            .expect("admission semaphore closed");
        self.tasks.spawn(async move {
            work.await;
            drop(slot);
        });
    }

    /// Blocks until every submitted task has finished.
    pub async fn join_all(&mut self) {
        while self.tasks.join_next().await.is_some() {}
    }

    /// Number of tasks currently holding a slot.
    pub fn active(&self) -> usize {
        self.limit - self.slots.available_permits()
    }
}
