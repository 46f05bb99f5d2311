//! Long-lived worker pool
//!
//! A fixed set of worker threads fed from one FIFO task queue. Workers are
//! spawned lazily on the first submission and stay alive across calls, so
//! repeated `translate` calls pay no thread start-up cost.
//!
//! Dispatch is done under a single mutex that guards only the queue and the
//! idle/busy bookkeeping; translation work always runs outside it. Each
//! worker receives at most one task at a time over its own channel and sends
//! the result straight back to the caller's handle.
//!
//! A task that panics fails only its own handle. The worker that ran it is
//! retired and not replaced.

use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::Mutex;

use super::parallel::{default_num_threads, panic_message};
use crate::engines::{EngineError, EngineResult};
use crate::modules::translation::{TranslationOptions, TranslationResult, Translator};

/// A queued unit of work; returns `false` if the work panicked
type Job = Box<dyn FnOnce() -> bool + Send + 'static>;

/// Pool lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolState {
    /// No workers spawned yet
    Empty,
    /// Workers spawned and accepting tasks
    Ready,
    /// Torn down; rejects further tasks
    Terminated,
}

/// Per-worker status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerStatus {
    Idle,
    Busy,
    /// Retired after its task panicked
    Dead,
}

struct QueuedTask {
    id: u64,
    job: Job,
}

struct Worker {
    sender: Option<Sender<Job>>,
    handle: Option<JoinHandle<()>>,
    status: WorkerStatus,
}

struct PoolInner {
    state: PoolState,
    workers: Vec<Worker>,
    queue: VecDeque<QueuedTask>,
    next_task_id: u64,
}

impl PoolInner {
    fn count(&self, status: WorkerStatus) -> usize {
        self.workers.iter().filter(|w| w.status == status).count()
    }

    fn live_workers(&self) -> usize {
        self.workers.len() - self.count(WorkerStatus::Dead)
    }

    /// Hand queued tasks to idle workers, oldest task first
    fn dispatch(&mut self) {
        while !self.queue.is_empty() {
            let Some(idx) = self.workers.iter().position(|w| w.status == WorkerStatus::Idle) else {
                break;
            };
            let Some(task) = self.queue.pop_front() else {
                break;
            };

            let worker = &mut self.workers[idx];
            let delivered = match worker.sender.as_ref() {
                Some(sender) => sender.send(task.job).is_ok(),
                None => false,
            };

            if delivered {
                worker.status = WorkerStatus::Busy;
                log::debug!("Dispatched task {} to worker {}", task.id, idx);
            } else {
                // The job went down with the channel; its handle resolves as abandoned
                worker.status = WorkerStatus::Dead;
                worker.sender = None;
                log::warn!("Worker {} unreachable; task {} abandoned", idx, task.id);
            }
        }

        if self.live_workers() == 0 && !self.queue.is_empty() {
            log::warn!(
                "No live workers left; abandoning {} queued tasks",
                self.queue.len()
            );
            self.queue.clear();
        }
    }
}

struct Shared {
    inner: Mutex<PoolInner>,
    size: usize,
}

fn worker_loop(idx: usize, jobs: Receiver<Job>, shared: Arc<Shared>) {
    while let Ok(job) = jobs.recv() {
        let survived = job();

        let mut inner = shared.inner.lock();
        if inner.state == PoolState::Terminated {
            break;
        }

        if survived {
            inner.workers[idx].status = WorkerStatus::Idle;
        } else {
            inner.workers[idx].status = WorkerStatus::Dead;
            inner.workers[idx].sender = None;
            log::warn!(
                "Worker {} died; {} of {} workers remain",
                idx,
                inner.live_workers(),
                shared.size
            );
        }
        inner.dispatch();

        if !survived {
            break;
        }
    }
}

/// Handle to a submitted task
pub struct TaskHandle<T> {
    id: u64,
    receiver: Receiver<EngineResult<T>>,
}

impl<T> TaskHandle<T> {
    /// Pool-assigned task id
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Block until the task completes
    pub fn wait(self) -> EngineResult<T> {
        let id = self.id;
        self.receiver
            .recv()
            .unwrap_or_else(|_| Err(EngineError::TaskAbandoned(id)))
    }

    /// Poll without blocking; `None` while the task is still pending
    pub fn try_wait(&self) -> Option<EngineResult<T>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(EngineError::TaskAbandoned(self.id))),
        }
    }

    /// Block for at most `timeout`; `None` if the task is still pending
    pub fn wait_timeout(&self, timeout: Duration) -> Option<EngineResult<T>> {
        match self.receiver.recv_timeout(timeout) {
            Ok(result) => Some(result),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(Err(EngineError::TaskAbandoned(self.id))),
        }
    }
}

/// Fixed-size pool of long-lived translation workers
pub struct WorkerPool {
    shared: Arc<Shared>,
}

impl WorkerPool {
    fn empty(size: usize) -> Self {
        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(PoolInner {
                    state: PoolState::Empty,
                    workers: Vec::with_capacity(size),
                    queue: VecDeque::new(),
                    next_task_id: 0,
                }),
                size,
            }),
        }
    }

    /// Create an empty pool of `size` workers; threads start on first use
    pub fn new(size: usize) -> EngineResult<Self> {
        if size == 0 {
            return Err(EngineError::InvalidOption(
                "worker pool size must be a positive integer".to_string(),
            ));
        }
        Ok(Self::empty(size))
    }

    /// Create a pool sized to the hardware concurrency
    pub fn with_default_size() -> Self {
        Self::empty(default_num_threads().max(1))
    }

    /// Configured worker count
    pub fn size(&self) -> usize {
        self.shared.size
    }

    pub fn state(&self) -> PoolState {
        self.shared.inner.lock().state
    }

    pub fn idle_workers(&self) -> usize {
        self.shared.inner.lock().count(WorkerStatus::Idle)
    }

    pub fn busy_workers(&self) -> usize {
        self.shared.inner.lock().count(WorkerStatus::Busy)
    }

    pub fn live_workers(&self) -> usize {
        self.shared.inner.lock().live_workers()
    }

    /// Tasks waiting for a worker
    pub fn queued_tasks(&self) -> usize {
        self.shared.inner.lock().queue.len()
    }

    fn spawn_workers(&self, inner: &mut PoolInner) -> EngineResult<()> {
        for idx in 0..self.shared.size {
            let (sender, receiver) = mpsc::channel::<Job>();
            let shared = Arc::clone(&self.shared);
            let spawned = thread::Builder::new()
                .name(format!("translate-pool-{}", idx))
                .spawn(move || worker_loop(idx, receiver, shared));

            match spawned {
                Ok(handle) => inner.workers.push(Worker {
                    sender: Some(sender),
                    handle: Some(handle),
                    status: WorkerStatus::Idle,
                }),
                Err(e) => {
                    // Dropping the senders lets already started workers exit
                    inner.workers.clear();
                    return Err(EngineError::Spawn(e));
                }
            }
        }

        inner.state = PoolState::Ready;
        log::info!("Initialized worker pool with {} workers", self.shared.size);
        Ok(())
    }

    /// Start the workers now instead of on first submission
    pub fn initialize(&self) -> EngineResult<()> {
        let mut inner = self.shared.inner.lock();
        match inner.state {
            PoolState::Empty => self.spawn_workers(&mut inner),
            PoolState::Ready => Ok(()),
            PoolState::Terminated => Err(EngineError::PoolTerminated),
        }
    }

    /// Queue an arbitrary job and return a handle to its result.
    ///
    /// A panic inside `job` resolves the handle to `WorkerFailure` and
    /// retires the worker that ran it.
    pub fn submit<F, T>(&self, job: F) -> EngineResult<TaskHandle<T>>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let mut inner = self.shared.inner.lock();
        match inner.state {
            PoolState::Terminated => return Err(EngineError::PoolTerminated),
            PoolState::Empty => self.spawn_workers(&mut inner)?,
            PoolState::Ready => {}
        }
        if inner.live_workers() == 0 {
            return Err(EngineError::NoLiveWorkers);
        }

        let id = inner.next_task_id;
        inner.next_task_id += 1;

        let (reply, receiver) = mpsc::channel();
        let job: Job = Box::new(move || match panic::catch_unwind(AssertUnwindSafe(job)) {
            Ok(value) => {
                // The caller may have dropped its handle
                let _ = reply.send(Ok(value));
                true
            }
            Err(payload) => {
                let msg = panic_message(payload.as_ref());
                let _ = reply.send(Err(EngineError::WorkerFailure(msg)));
                false
            }
        });

        inner.queue.push_back(QueuedTask { id, job });
        log::debug!("Queued task {} ({} waiting)", id, inner.queue.len());
        inner.dispatch();

        Ok(TaskHandle { id, receiver })
    }

    /// Translate a batch on one pool worker.
    ///
    /// Options are validated here, so configuration errors surface before
    /// anything is queued. The handle resolves to one result list per input
    /// sequence, in input order.
    pub fn translate<S: AsRef<[u8]>>(
        &self,
        sequences: &[S],
        options: &TranslationOptions,
    ) -> EngineResult<TaskHandle<Vec<Vec<TranslationResult>>>> {
        let translator = Translator::new(options.clone())?;
        let sequences: Vec<Vec<u8>> = sequences.iter().map(|s| s.as_ref().to_vec()).collect();
        self.submit(move || translator.translate_batch(&sequences))
    }

    /// Tear down every worker and drop queued tasks.
    ///
    /// Queued tasks never run; their handles resolve to `TaskAbandoned`.
    /// Tasks already running finish before this returns.
    pub fn terminate(&self) {
        let handles: Vec<JoinHandle<()>> = {
            let mut inner = self.shared.inner.lock();
            if inner.state == PoolState::Terminated {
                return;
            }
            inner.state = PoolState::Terminated;

            if !inner.queue.is_empty() {
                log::warn!("Terminating pool with {} queued tasks", inner.queue.len());
            }
            inner.queue.clear();

            inner
                .workers
                .iter_mut()
                .filter_map(|worker| {
                    worker.sender = None;
                    worker.handle.take()
                })
                .collect()
        };

        let current = thread::current().id();
        for handle in handles {
            // A job that drops the last pool handle runs terminate on a worker thread
            if handle.thread().id() == current {
                continue;
            }
            if handle.join().is_err() {
                log::warn!("Worker thread exited abnormally during shutdown");
            }
        }
        log::debug!("Worker pool terminated");
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::with_default_size()
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.terminate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Barrier;

    fn wait_until<F: Fn() -> bool>(condition: F) {
        let deadline = std::time::Instant::now() + Duration::from_secs(10);
        while !condition() {
            assert!(std::time::Instant::now() < deadline, "condition not reached in time");
            thread::yield_now();
        }
    }

    fn batch(n: usize) -> Vec<String> {
        (0..n).map(|i| "ATGGCCAAA".repeat(i % 4 + 1)).collect()
    }

    #[test]
    fn test_lazy_initialization() {
        let pool = WorkerPool::new(2).unwrap();
        assert_eq!(pool.state(), PoolState::Empty);
        assert_eq!(pool.size(), 2);
        assert_eq!(pool.idle_workers(), 0);

        let handle = pool.submit(|| 21 * 2).unwrap();
        assert_eq!(pool.state(), PoolState::Ready);
        assert_eq!(handle.wait().unwrap(), 42);
        assert_eq!(pool.live_workers(), 2);
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(WorkerPool::new(0), Err(EngineError::InvalidOption(_))));
    }

    #[test]
    fn test_translate_matches_sequential() {
        let pool = WorkerPool::new(3).unwrap();
        let options = TranslationOptions::default()
            .with_all_frames(true)
            .with_include_reverse(true);
        let sequences = batch(10);

        let expected = Translator::new(options.clone()).unwrap().translate_batch(&sequences);
        let results = pool.translate(&sequences, &options).unwrap().wait().unwrap();
        assert_eq!(results.len(), sequences.len());
        assert_eq!(results, expected);
    }

    #[test]
    fn test_concurrent_calls_keep_their_own_order() {
        let pool = WorkerPool::new(2).unwrap();
        let options = TranslationOptions::default();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let sequences: Vec<String> = (0..5).map(|j| "GCC".repeat(i + j + 1)).collect();
                (sequences.clone(), pool.translate(&sequences, &options).unwrap())
            })
            .collect();

        for (sequences, handle) in handles {
            let results = handle.wait().unwrap();
            assert_eq!(results.len(), sequences.len());
            for (sequence, result) in sequences.iter().zip(&results) {
                assert_eq!(result[0].sequence, "A".repeat(sequence.len() / 3));
            }
        }
    }

    #[test]
    fn test_empty_batch() {
        let pool = WorkerPool::new(1).unwrap();
        let empty: Vec<String> = Vec::new();
        let results = pool
            .translate(&empty, &TranslationOptions::default())
            .unwrap()
            .wait()
            .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_configuration_error_fails_fast() {
        let pool = WorkerPool::new(1).unwrap();
        let options = TranslationOptions::default().with_table("0");
        assert!(matches!(
            pool.translate(&["ATG"], &options),
            Err(EngineError::UnknownTable { .. })
        ));
        // Nothing was queued, so the pool was never started
        assert_eq!(pool.state(), PoolState::Empty);
    }

    #[test]
    fn test_fifo_dispatch() {
        let pool = WorkerPool::new(1).unwrap();
        let gate = Arc::new(Barrier::new(2));
        let order = Arc::new(Mutex::new(Vec::new()));

        let blocker = {
            let gate = Arc::clone(&gate);
            pool.submit(move || {
                gate.wait();
            })
            .unwrap()
        };

        let handles: Vec<_> = (0..5)
            .map(|i| {
                let order = Arc::clone(&order);
                pool.submit(move || order.lock().push(i)).unwrap()
            })
            .collect();
        assert_eq!(pool.queued_tasks(), 5);
        assert_eq!(pool.busy_workers(), 1);

        gate.wait();
        blocker.wait().unwrap();
        for handle in handles {
            handle.wait().unwrap();
        }
        assert_eq!(*order.lock(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_worker_failure_is_isolated() {
        let pool = WorkerPool::new(2).unwrap();
        let options = TranslationOptions::default();

        let failing = pool.submit(|| -> u32 { panic!("corrupt task") }).unwrap();
        match failing.wait() {
            Err(EngineError::WorkerFailure(msg)) => assert!(msg.contains("corrupt task")),
            other => panic!("Expected WorkerFailure, got {:?}", other),
        }

        // The surviving worker keeps serving, the dead one is not replaced
        let results = pool.translate(&["ATGGCC"], &options).unwrap().wait().unwrap();
        assert_eq!(results[0][0].sequence, "MA");
        wait_until(|| pool.live_workers() == 1);
        assert_eq!(pool.state(), PoolState::Ready);
    }

    #[test]
    fn test_failure_spares_running_and_queued_tasks() {
        let pool = WorkerPool::new(2).unwrap();
        let gate = Arc::new(Barrier::new(2));

        let running = {
            let gate = Arc::clone(&gate);
            pool.submit(move || {
                gate.wait();
                11
            })
            .unwrap()
        };
        wait_until(|| pool.busy_workers() == 1);

        let failing = pool.submit(|| -> u32 { panic!("bad frame") }).unwrap();
        assert!(matches!(failing.wait(), Err(EngineError::WorkerFailure(_))));
        wait_until(|| pool.live_workers() == 1);

        // The only live worker is still held, so this one waits in the queue
        let queued = pool.submit(|| 22).unwrap();
        assert_eq!(pool.queued_tasks(), 1);

        gate.wait();
        assert_eq!(running.wait().unwrap(), 11);
        assert_eq!(queued.wait().unwrap(), 22);
        assert_eq!(pool.live_workers(), 1);
    }

    #[test]
    fn test_translate_accepts_bytes() {
        let pool = WorkerPool::new(1).unwrap();
        let sequences: Vec<&[u8]> = vec![b"ATGGCC", b"UUUUAG"];
        let results = pool
            .translate(&sequences, &TranslationOptions::default())
            .unwrap()
            .wait()
            .unwrap();
        assert_eq!(results[0][0].sequence, "MA");
        assert_eq!(results[1][0].sequence, "F*");
    }

    #[test]
    fn test_all_workers_dead() {
        let pool = WorkerPool::new(1).unwrap();
        let gate = Arc::new(Barrier::new(2));

        let failing = {
            let gate = Arc::clone(&gate);
            pool.submit(move || {
                gate.wait();
                panic!("last worker down");
            })
            .unwrap()
        };
        let queued = pool.submit(|| 7).unwrap();

        gate.wait();
        assert!(matches!(failing.wait(), Err(EngineError::WorkerFailure(_))));
        assert!(matches!(queued.wait(), Err(EngineError::TaskAbandoned(_))));
        assert_eq!(pool.live_workers(), 0);
        assert!(matches!(pool.submit(|| 1), Err(EngineError::NoLiveWorkers)));
    }

    #[test]
    fn test_terminate() {
        let pool = WorkerPool::new(1).unwrap();
        let gate = Arc::new(Barrier::new(2));

        let running = {
            let gate = Arc::clone(&gate);
            pool.submit(move || {
                gate.wait();
                "done"
            })
            .unwrap()
        };
        let queued = pool.submit(|| "never").unwrap();
        assert!(queued.try_wait().is_none());

        thread::scope(|scope| {
            scope.spawn(|| {
                // Release the running task only once the queue has been cleared
                wait_until(|| pool.state() == PoolState::Terminated);
                gate.wait();
            });
            pool.terminate();
        });

        assert_eq!(pool.state(), PoolState::Terminated);
        assert_eq!(running.wait().unwrap(), "done");
        assert!(matches!(queued.wait(), Err(EngineError::TaskAbandoned(_))));
        assert!(matches!(pool.submit(|| 1), Err(EngineError::PoolTerminated)));
        assert!(matches!(
            pool.translate(&["ATG"], &TranslationOptions::default()),
            Err(EngineError::PoolTerminated)
        ));
        assert!(matches!(pool.initialize(), Err(EngineError::PoolTerminated)));

        // Idempotent
        pool.terminate();
    }

    #[test]
    fn test_wait_timeout() {
        let pool = WorkerPool::new(1).unwrap();
        pool.initialize().unwrap();
        assert_eq!(pool.idle_workers(), 1);

        let gate = Arc::new(Barrier::new(2));
        let handle = {
            let gate = Arc::clone(&gate);
            pool.submit(move || {
                gate.wait();
                5
            })
            .unwrap()
        };
        assert!(handle.wait_timeout(Duration::from_millis(10)).is_none());
        gate.wait();
        assert_eq!(handle.wait_timeout(Duration::from_secs(10)).unwrap().unwrap(), 5);
    }
}
