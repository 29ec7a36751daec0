//! Background analysis with a worker thread.
//!
//! Large STL uploads should not block an interactive caller. The
//! [`BackgroundAnalyzer`] runs [`analyze_stl`] on a dedicated worker thread
//! as a request/response unit of work: the input buffer moves to the worker,
//! the result moves back, and no state is shared in between.
//!
//! Superseding is last-request-wins: submitting a new buffer while an older
//! one is still in flight discards the older result. There is no queue and
//! no cancellation primitive; the worker simply skips stale jobs and the
//! caller drops stale results at [`BackgroundAnalyzer::poll`].
//!
//! If the worker thread cannot be spawned, or dies, the analyzer degrades to
//! computing synchronously in `submit`: slower, never lossy. Both paths run
//! the same pure function, so results are bit-identical.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::JoinHandle;

use tracing::{debug, warn};

use crate::analyze::{analyze_stl, AnalyzeOptions, MeshAnalysis};
use crate::error::MeshResult;

/// Identifies one submitted analysis request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnalysisTicket(u64);

struct Job {
    id: u64,
    buffer: Vec<u8>,
    options: AnalyzeOptions,
}

struct Worker {
    jobs: Sender<Job>,
    results: Receiver<(u64, MeshResult<MeshAnalysis>)>,
    handle: Option<JoinHandle<()>>,
}

/// Off-thread STL analysis with last-request-wins supersession.
///
/// # Example
///
/// ```
/// use powder_mesh::{AnalyzeOptions, BackgroundAnalyzer};
///
/// let mut analyzer = BackgroundAnalyzer::new();
///
/// let mut buffer = vec![0u8; 84];
/// buffer[80..84].copy_from_slice(&0u32.to_le_bytes());
/// let ticket = analyzer.submit(buffer, AnalyzeOptions::default());
///
/// // Poll until the result arrives (an interactive caller would poll once
/// // per frame or tick instead of spinning).
/// let (done, result) = loop {
///     if let Some(outcome) = analyzer.poll() {
///         break outcome;
///     }
///     std::thread::sleep(std::time::Duration::from_millis(1));
/// };
/// assert_eq!(done, ticket);
/// assert_eq!(result.unwrap().triangle_count, 0);
/// ```
pub struct BackgroundAnalyzer {
    worker: Option<Worker>,
    next_id: u64,
    latest: u64,
    fallback_result: Option<(u64, MeshResult<MeshAnalysis>)>,
}

impl BackgroundAnalyzer {
    /// Create an analyzer, spawning its worker thread.
    ///
    /// If the thread cannot be spawned the analyzer starts degraded and
    /// every `submit` computes synchronously.
    #[must_use]
    pub fn new() -> Self {
        let worker = spawn_worker();
        if worker.is_none() {
            warn!("failed to spawn analysis worker, running synchronously");
        }
        Self {
            worker,
            next_id: 0,
            latest: 0,
            fallback_result: None,
        }
    }

    /// Submit a buffer for analysis, superseding any in-flight request.
    ///
    /// Returns a ticket identifying this request; only the most recently
    /// submitted ticket can ever be returned by [`poll`](Self::poll).
    pub fn submit(&mut self, buffer: Vec<u8>, options: AnalyzeOptions) -> AnalysisTicket {
        self.next_id += 1;
        let id = self.next_id;
        self.latest = id;

        let job = Job {
            id,
            buffer,
            options,
        };

        let sent = match &self.worker {
            Some(worker) => worker.jobs.send(job),
            None => Err(mpsc::SendError(job)),
        };

        match sent {
            Ok(()) => AnalysisTicket(id),
            Err(mpsc::SendError(returned)) => {
                if self.worker.is_some() {
                    warn!("analysis worker is gone, falling back to synchronous analysis");
                    self.shutdown_worker();
                }
                let result = analyze_stl(&returned.buffer, &returned.options);
                self.fallback_result = Some((id, result));
                AnalysisTicket(id)
            }
        }
    }

    /// Collect the result of the most recent request, if ready.
    ///
    /// Results of superseded requests are silently discarded. Returns
    /// `None` while the latest request is still in flight (or nothing was
    /// submitted).
    pub fn poll(&mut self) -> Option<(AnalysisTicket, MeshResult<MeshAnalysis>)> {
        if let Some((id, result)) = self.fallback_result.take() {
            if id == self.latest {
                return Some((AnalysisTicket(id), result));
            }
            debug!(id, latest = self.latest, "discarding superseded result");
        }

        loop {
            let received = match &self.worker {
                Some(worker) => worker.results.try_recv(),
                None => return None,
            };
            match received {
                Ok((id, result)) => {
                    if id == self.latest {
                        return Some((AnalysisTicket(id), result));
                    }
                    debug!(id, latest = self.latest, "discarding superseded result");
                }
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => {
                    warn!("analysis worker is gone, falling back to synchronous analysis");
                    self.shutdown_worker();
                    return None;
                }
            }
        }
    }

    /// Whether the worker thread is unavailable and submits run inline.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.worker.is_none()
    }

    fn shutdown_worker(&mut self) {
        if let Some(mut worker) = self.worker.take() {
            drop(worker.jobs);
            drop(worker.results);
            if let Some(handle) = worker.handle.take() {
                let _ = handle.join();
            }
        }
    }
}

impl Default for BackgroundAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for BackgroundAnalyzer {
    fn drop(&mut self) {
        self.shutdown_worker();
    }
}

fn spawn_worker() -> Option<Worker> {
    let (job_tx, job_rx) = mpsc::channel::<Job>();
    let (result_tx, result_rx) = mpsc::channel();

    let handle = std::thread::Builder::new()
        .name("powder-mesh-analyzer".to_owned())
        .spawn(move || worker_loop(&job_rx, &result_tx))
        .ok()?;

    Some(Worker {
        jobs: job_tx,
        results: result_rx,
        handle: Some(handle),
    })
}

fn worker_loop(jobs: &Receiver<Job>, results: &Sender<(u64, MeshResult<MeshAnalysis>)>) {
    while let Ok(mut job) = jobs.recv() {
        // Last-request-wins: skip anything already superseded before
        // spending time on it.
        while let Ok(newer) = jobs.try_recv() {
            debug!(superseded = job.id, by = newer.id, "skipping stale job");
            job = newer;
        }

        let result = analyze_stl(&job.buffer, &job.options);
        if results.send((job.id, result)).is_err() {
            return;
        }
    }
}
