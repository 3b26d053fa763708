use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use crate::foundation::error::{RasterError, RasterResult};

/// A unit of work executed by a [`WorkerPool`] against the running worker's private state.
pub trait Task: Send + 'static {
    /// Per-thread mutable state handed to every task the worker runs.
    type State: Send + 'static;

    /// Execute the task.
    fn run(self, state: &mut Self::State);
}

struct Queue<T> {
    tasks: VecDeque<T>,
    // Submitted and not yet finished (queued + running).
    pending: usize,
    panicked: usize,
    stopping: bool,
}

struct Shared<T> {
    queue: Mutex<Queue<T>>,
    available: Condvar,
    drained: Condvar,
}

/// Fixed-size pool of long-lived worker threads sharing one FIFO task queue.
///
/// Worker `i` owns state slot `i` for its whole lifetime, so tasks get scratch memory without
/// synchronizing with each other. Tasks run in no defined order; the only ordering guarantee is
/// the completion barrier provided by [`WorkerPool::wait`] (and by dropping the pool, which
/// drains the queue and joins every worker).
pub struct WorkerPool<T: Task> {
    shared: Arc<Shared<T>>,
    states: Arc<[Mutex<T::State>]>,
    workers: Vec<JoinHandle<()>>,
}

impl<T: Task> WorkerPool<T> {
    /// Spawn one worker per entry of `states`.
    pub fn new(states: Vec<T::State>) -> RasterResult<Self> {
        if states.is_empty() {
            return Err(RasterError::validation(
                "worker pool needs at least one thread",
            ));
        }

        let threads = states.len();
        let mut pool = Self {
            shared: Arc::new(Shared {
                queue: Mutex::new(Queue {
                    tasks: VecDeque::new(),
                    pending: 0,
                    panicked: 0,
                    stopping: false,
                }),
                available: Condvar::new(),
                drained: Condvar::new(),
            }),
            states: states.into_iter().map(Mutex::new).collect(),
            workers: Vec::with_capacity(threads),
        };

        for index in 0..threads {
            let shared = Arc::clone(&pool.shared);
            let states = Arc::clone(&pool.states);
            // On failure the partially built pool is dropped, which joins the spawned workers.
            let handle = thread::Builder::new()
                .name(format!("softraster-worker-{index}"))
                .spawn(move || worker_loop(&shared, &states[index]))
                .map_err(|e| {
                    RasterError::pipeline(format!("failed to spawn worker thread {index}: {e}"))
                })?;
            pool.workers.push(handle);
        }

        tracing::debug!(threads, "worker pool started");
        Ok(pool)
    }

    /// Number of worker threads.
    pub fn threads(&self) -> usize {
        self.states.len()
    }

    /// Enqueue `task` and wake one idle worker.
    pub fn submit(&self, task: T) {
        {
            let mut queue = lock(&self.shared.queue);
            queue.tasks.push_back(task);
            queue.pending += 1;
        }
        self.shared.available.notify_one();
    }

    /// Block until every task submitted so far has finished.
    ///
    /// Fails if any of those tasks panicked; the workers themselves survive and the pool stays
    /// usable.
    pub fn wait(&self) -> RasterResult<()> {
        let queue = lock(&self.shared.queue);
        let mut queue = self
            .shared
            .drained
            .wait_while(queue, |q| q.pending > 0)
            .unwrap_or_else(PoisonError::into_inner);

        let panicked = std::mem::take(&mut queue.panicked);
        if panicked > 0 {
            tracing::warn!(panicked, "worker tasks panicked");
            return Err(RasterError::pipeline(format!(
                "{panicked} worker task(s) panicked"
            )));
        }
        Ok(())
    }

    /// Access state slot `index`.
    ///
    /// Intended for use between stages, after [`WorkerPool::wait`]; while tasks are running the
    /// slot is held by its worker and this call blocks until the current task finishes.
    ///
    /// Panics if `index >= self.threads()`.
    pub fn state(&self, index: usize) -> MutexGuard<'_, T::State> {
        lock(&self.states[index])
    }
}

impl<T: Task> Drop for WorkerPool<T> {
    fn drop(&mut self) {
        lock(&self.shared.queue).stopping = true;
        self.shared.available.notify_all();
        for worker in self.workers.drain(..) {
            // Task panics are caught inside the loop, so a join error is not expected.
            let _ = worker.join();
        }
    }
}

fn worker_loop<T: Task>(shared: &Shared<T>, state: &Mutex<T::State>) {
    loop {
        let task = {
            let mut queue = lock(&shared.queue);
            loop {
                if let Some(task) = queue.tasks.pop_front() {
                    break task;
                }
                if queue.stopping {
                    return;
                }
                queue = shared
                    .available
                    .wait(queue)
                    .unwrap_or_else(PoisonError::into_inner);
            }
        };

        // The task (and every handle it captured) is dropped before `pending` is decremented.
        let outcome = {
            let mut state = lock(state);
            panic::catch_unwind(AssertUnwindSafe(|| task.run(&mut state)))
        };

        let mut queue = lock(&shared.queue);
        if outcome.is_err() {
            queue.panicked += 1;
        }
        queue.pending -= 1;
        if queue.pending == 0 {
            shared.drained.notify_all();
        }
    }
}

fn lock<S>(m: &Mutex<S>) -> MutexGuard<'_, S> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
#[path = "../tests/unit/pool.rs"]
mod tests;
