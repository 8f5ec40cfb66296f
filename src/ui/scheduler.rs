use tokio::sync::mpsc;

use super::grid::ViewId;

/// Work deferred to the next host tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeferredTask {
    /// Ask the host to draw the view.
    Render(ViewId),
    /// Ask the host to close the view, then tear it down.
    Close(ViewId),
}

/// What: Fire-and-forget queue of [`DeferredTask`]s, drained once per tick.
///
/// Details:
/// - Single-threaded ordering only; there is no result and no cancellation.
/// - Tasks submitted while a tick is running are left for the next tick.
#[derive(Debug)]
pub struct Scheduler {
    tx: mpsc::UnboundedSender<DeferredTask>,
    rx: mpsc::UnboundedReceiver<DeferredTask>,
}

impl Scheduler {
    /// Empty queue.
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    /// Queue `task` for the next tick.
    pub fn submit(&self, task: DeferredTask) {
        if self.tx.send(task).is_err() {
            tracing::warn!(task = ?task, "[Scheduler] Queue closed; task dropped");
        }
    }

    /// What: Take every task queued so far, in submission order.
    pub fn drain(&mut self) -> Vec<DeferredTask> {
        let mut tasks = Vec::new();
        while let Ok(task) = self.rx.try_recv() {
            tasks.push(task);
        }
        tasks
    }

    /// Number of queued tasks.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
