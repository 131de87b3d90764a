//! Background classification worker.
//!
//! Classification can run off the caller's thread so an interactive surface
//! stays responsive. The worker owns a request queue and processes jobs
//! sequentially, which also serializes access to the runtime handle.
//! Completion is reported through a per-job channel; cancellation means
//! abandoning the result by dropping the ticket.

use crate::core::errors::ClassifyError;
use crate::pipeline::classifier::Classifier;
use crate::processors::ClassReport;
use image::DynamicImage;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread::JoinHandle;
use tracing::debug;

struct Job {
    image: DynamicImage,
    reply: mpsc::Sender<Result<ClassReport, ClassifyError>>,
}

/// A handle to one submitted classification job.
///
/// Dropping the ticket without waiting abandons the result; the worker keeps
/// running.
#[derive(Debug)]
pub struct ClassifyTicket {
    receiver: mpsc::Receiver<Result<ClassReport, ClassifyError>>,
}

impl ClassifyTicket {
    /// Blocks until the job completes and returns its result.
    ///
    /// No timeout is imposed; callers needing bounded latency must wrap the
    /// wait externally.
    pub fn wait(self) -> Result<ClassReport, ClassifyError> {
        self.receiver.recv().map_err(|_| {
            ClassifyError::inference_msg(
                "classification worker",
                "worker stopped before delivering a result",
            )
        })?
    }
}

/// A dedicated worker thread running classifications from a queue.
///
/// Jobs are processed one at a time in submission order. Dropping the worker
/// closes the queue and joins the thread.
#[derive(Debug)]
pub struct ClassifyWorker {
    sender: Option<mpsc::Sender<Job>>,
    handle: Option<JoinHandle<()>>,
}

impl ClassifyWorker {
    /// Spawns the worker thread for the given classifier.
    pub fn spawn(classifier: Arc<Classifier>) -> Result<Self, ClassifyError> {
        let (sender, receiver) = mpsc::channel::<Job>();

        let handle = std::thread::Builder::new()
            .name("photoclass-worker".to_string())
            .spawn(move || {
                while let Ok(job) = receiver.recv() {
                    let result = classifier.classify(&job.image);
                    // A failed send means the ticket was dropped; the result
                    // is abandoned, not an error.
                    let _ = job.reply.send(result);
                }
                debug!("classification worker shutting down");
            })?;

        Ok(Self {
            sender: Some(sender),
            handle: Some(handle),
        })
    }

    /// Enqueues an image for classification and returns a ticket for the
    /// result.
    pub fn submit(&self, image: DynamicImage) -> Result<ClassifyTicket, ClassifyError> {
        let (reply, receiver) = mpsc::channel();
        let sender = self.sender.as_ref().ok_or_else(|| {
            ClassifyError::inference_msg("classification worker", "worker already stopped")
        })?;
        sender.send(Job { image, reply }).map_err(|_| {
            ClassifyError::inference_msg(
                "classification worker",
                "worker is no longer accepting jobs",
            )
        })?;
        Ok(ClassifyTicket { receiver })
    }
}

impl Drop for ClassifyWorker {
    fn drop(&mut self) {
        // Closing the queue lets the thread drain and exit.
        drop(self.sender.take());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
