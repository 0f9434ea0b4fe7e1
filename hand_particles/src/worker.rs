//! Session worker thread.
//!
//! Transports that deliver frames from their own threads (a decoder pipe, a
//! network peer) hand them to a `SessionWorker`.  The worker owns the
//! [`Session`] and processes jobs strictly one at a time, in arrival order.

use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread::{self, JoinHandle};

use hand_tracker::HandDetector;
use pixel_frame::Frame;
use tracing::{debug, warn};

use crate::compositor::CompositorSettings;
use crate::error::HandParticlesError;
use crate::session::{Session, SessionStats};

// ════════════════════════════════════════════════════════════════════════════
// Job / JobResult
// ════════════════════════════════════════════════════════════════════════════

struct Job {
    frame:    Frame,
    settings: CompositorSettings,
}

/// One composed frame plus the counters right after it.
pub struct JobResult {
    pub frame: Frame,
    pub stats: SessionStats,
}

// ════════════════════════════════════════════════════════════════════════════
// SessionWorker
// ════════════════════════════════════════════════════════════════════════════

/// Handle to the thread that owns a session.
pub struct SessionWorker {
    job_tx:    Option<SyncSender<Job>>,
    result_rx: Receiver<JobResult>,
    handle:    Option<JoinHandle<()>>,
}

impl SessionWorker {
    /// Start the worker thread and build the session on it with `make`.
    ///
    /// The session never crosses threads, so detectors holding
    /// thread-bound device handles work too.  A setup error from `make` is
    /// returned here.
    pub fn spawn<D, F>(make: F) -> Result<Self, HandParticlesError>
    where
        D: HandDetector + 'static,
        F: FnOnce() -> Result<Session<D>, HandParticlesError> + Send + 'static,
    {
        // Capacity 1: a producer can be at most one frame ahead.
        let (job_tx, job_rx) = mpsc::sync_channel::<Job>(1);
        let (result_tx, result_rx) = mpsc::channel::<JobResult>();
        let (ready_tx, ready_rx) = mpsc::channel::<Result<(), HandParticlesError>>();

        let handle = thread::spawn(move || {
            let mut session = match make() {
                Ok(s) => {
                    let _ = ready_tx.send(Ok(()));
                    s
                }
                Err(e) => {
                    let _ = ready_tx.send(Err(e));
                    return;
                }
            };
            worker_thread(&mut session, job_rx, result_tx);
        });

        match ready_rx.recv() {
            Ok(Ok(())) => Ok(SessionWorker { job_tx: Some(job_tx), result_rx, handle: Some(handle) }),
            Ok(Err(e)) => {
                let _ = handle.join();
                Err(e)
            }
            Err(_) => {
                let _ = handle.join();
                Err(HandParticlesError::Worker("thread exited during setup".to_string()))
            }
        }
    }

    /// Process one frame and wait for its output.
    ///
    /// `None` once the worker thread has gone away.
    pub fn submit(&mut self, frame: Frame, settings: CompositorSettings) -> Option<JobResult> {
        let tx = self.job_tx.as_ref()?;
        if tx.send(Job { frame, settings }).is_err() {
            warn!("session worker stopped accepting frames");
            return None;
        }
        self.result_rx.recv().ok()
    }
}

impl Drop for SessionWorker {
    fn drop(&mut self) {
        // Closing the job channel ends the thread's loop.
        self.job_tx.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("session worker panicked");
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// worker_thread
// ════════════════════════════════════════════════════════════════════════════

fn worker_thread<D: HandDetector>(
    session:   &mut Session<D>,
    job_rx:    Receiver<Job>,
    result_tx: mpsc::Sender<JobResult>,
) {
    for job in job_rx {
        let frame = session.step(&job.frame, &job.settings);
        let stats = session.stats();
        if result_tx.send(JobResult { frame, stats }).is_err() {
            break;
        }
    }
    debug!(frames = session.stats().frames, "session worker finished");
}
