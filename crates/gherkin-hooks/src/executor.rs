//! A single worker thread that runs jobs in submission order.
//!
//! The worker drives a Tokio current-thread runtime with a [`LocalSet`].
//! Each job runs as a local task, so jobs may use
//! `tokio::task::spawn_local` and `tokio::runtime::Handle::current()`.

use std::any::Any;
use std::io;
use std::thread::{self, JoinHandle, ThreadId};

use thiserror::Error;
use tokio::runtime::{Builder, Runtime};
use tokio::sync::{mpsc, oneshot};
use tokio::task::{JoinError, LocalSet};

type Job = Box<dyn FnOnce() + Send + 'static>;

const DEFAULT_NAME: &str = "gherkin-hooks";

struct Envelope {
    job: Job,
    on_panic: Option<oneshot::Sender<String>>,
}

/// Errors reported by [`DesignatedExecutor`].
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// The runtime or the worker thread could not be started.
    #[error("failed to start executor thread: {0}")]
    Spawn(#[from] io::Error),
    /// The worker thread is no longer accepting jobs.
    #[error("executor thread has stopped")]
    Stopped,
    /// The job panicked while running on the worker thread.
    #[error("job panicked on the executor thread: {0}")]
    JobPanicked(String),
}

/// Runs every submitted job on one dedicated thread.
///
/// Jobs run one at a time in the order they were submitted. A panicking job
/// is reported to its submitter and does not stop the worker. Dropping the
/// executor finishes the queued jobs and joins the thread.
///
/// # Examples
///
/// ```
/// use gherkin_hooks::DesignatedExecutor;
///
/// let executor = DesignatedExecutor::new()?;
/// let answer = executor.execute(|| 6 * 7)?;
/// assert_eq!(answer, 42);
/// # Ok::<(), gherkin_hooks::ExecutorError>(())
/// ```
#[derive(Debug)]
pub struct DesignatedExecutor {
    sender: Option<mpsc::UnboundedSender<Envelope>>,
    worker: Option<JoinHandle<()>>,
    worker_id: ThreadId,
}

impl DesignatedExecutor {
    /// Start an executor on a thread named `gherkin-hooks`.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError::Spawn`] if the runtime or the thread cannot
    /// be created.
    pub fn new() -> Result<Self, ExecutorError> {
        Self::named(DEFAULT_NAME)
    }

    /// Start an executor on a thread with the given name.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError::Spawn`] if the runtime or the thread cannot
    /// be created.
    pub fn named(name: impl Into<String>) -> Result<Self, ExecutorError> {
        let name = name.into();
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let (sender, receiver) = mpsc::unbounded_channel();
        let worker = thread::Builder::new()
            .name(name.clone())
            .spawn(move || drain(&runtime, receiver))?;
        log::debug!("started executor thread '{name}'");
        Ok(Self {
            sender: Some(sender),
            worker_id: worker.thread().id(),
            worker: Some(worker),
        })
    }

    /// Return `true` when called from the executor's worker thread.
    #[must_use]
    pub fn is_current(&self) -> bool {
        thread::current().id() == self.worker_id
    }

    /// Queue `job` without waiting for it to run.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError::Stopped`] if the worker has exited.
    pub fn spawn(&self, job: impl FnOnce() + Send + 'static) -> Result<(), ExecutorError> {
        self.submit(Envelope {
            job: Box::new(job),
            on_panic: None,
        })
    }

    /// Run `job` on the worker thread and wait for its result.
    ///
    /// Called from the worker thread itself, the job runs inline so a job may
    /// submit further work without deadlocking. A panic in an inline job
    /// unwinds into the job that called `execute`.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError::Stopped`] if the worker has exited and
    /// [`ExecutorError::JobPanicked`] if the job panicked.
    ///
    /// # Panics
    ///
    /// Waiting for the result blocks the calling thread, which Tokio refuses
    /// inside another executor's runtime.
    pub fn execute<R>(&self, job: impl FnOnce() -> R + Send + 'static) -> Result<R, ExecutorError>
    where
        R: Send + 'static,
    {
        if self.is_current() {
            return Ok(job());
        }
        let (reply, outcome) = oneshot::channel();
        let (on_panic, panicked) = oneshot::channel();
        self.submit(Envelope {
            job: Box::new(move || {
                let _ = reply.send(job());
            }),
            on_panic: Some(on_panic),
        })?;
        outcome.blocking_recv().map_err(|_| {
            panicked
                .blocking_recv()
                .map_or(ExecutorError::Stopped, ExecutorError::JobPanicked)
        })
    }

    fn submit(&self, envelope: Envelope) -> Result<(), ExecutorError> {
        self.sender
            .as_ref()
            .ok_or(ExecutorError::Stopped)?
            .send(envelope)
            .map_err(|_| ExecutorError::Stopped)
    }
}

impl Drop for DesignatedExecutor {
    fn drop(&mut self) {
        drop(self.sender.take());
        let Some(worker) = self.worker.take() else {
            return;
        };
        if self.is_current() {
            return;
        }
        if worker.join().is_err() {
            log::warn!("executor thread terminated abnormally");
        }
    }
}

fn drain(runtime: &Runtime, mut receiver: mpsc::UnboundedReceiver<Envelope>) {
    let local = LocalSet::new();
    local.block_on(runtime, async move {
        while let Some(Envelope { job, on_panic }) = receiver.recv().await {
            let Err(error) = tokio::task::spawn_local(async move { job() }).await else {
                continue;
            };
            let message = failure_message(error);
            let Some(reply) = on_panic else {
                log::warn!("detached job panicked: {message}");
                continue;
            };
            let _ = reply.send(message);
        }
    });
}

fn failure_message(error: JoinError) -> String {
    error.try_into_panic().map_or_else(
        |error| error.to_string(),
        |payload| panic_message(payload.as_ref()),
    )
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string())
}
