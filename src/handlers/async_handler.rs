//! Queued handler wrapper
//!
//! Moves the actual write off the logging thread: records are copied into a
//! bounded channel and a worker thread feeds them to the wrapped handler in
//! order. A full queue drops the record rather than blocking the caller.

use crate::core::{Context, Handler, HandlerMetrics, LoggerError, Params, Result};
use crossbeam_channel::{bounded, Sender, TrySendError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Default time to wait for the worker to drain its queue
///
/// Used by `Drop`. Call [`AsyncHandler::shutdown`] directly for a different
/// bound.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Queue capacity used by [`AsyncHandler::new`]
pub const DEFAULT_QUEUE_CAPACITY: usize = 8192;

enum Command {
    Record(Context, Params),
    Flush(Sender<()>),
}

pub struct AsyncHandler {
    sender: Option<Sender<Command>>,
    worker: Option<JoinHandle<()>>,
    metrics: Arc<HandlerMetrics>,
}

impl AsyncHandler {
    /// Wrap `inner` behind a queue of [`DEFAULT_QUEUE_CAPACITY`] records
    pub fn new<H: Handler + 'static>(inner: H) -> Result<Self> {
        Self::with_capacity(inner, DEFAULT_QUEUE_CAPACITY)
    }

    /// Wrap `inner` behind a queue of `capacity` records
    pub fn with_capacity<H: Handler + 'static>(inner: H, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(LoggerError::config("async handler", "queue capacity must be non-zero"));
        }

        let (sender, receiver) = bounded::<Command>(capacity);
        let worker = thread::Builder::new()
            .name("xlog-async".to_string())
            .spawn(move || {
                for command in receiver {
                    match command {
                        Command::Record(ctx, params) => inner.log(&ctx, &params),
                        Command::Flush(ack) => {
                            inner.flush();
                            let _ = ack.send(());
                        }
                    }
                }
                // Channel closed: everything queued has been delivered
                inner.flush();
            })
            .map_err(|e| LoggerError::io_operation("spawn worker thread", "xlog-async", e))?;

        Ok(Self {
            sender: Some(sender),
            worker: Some(worker),
            metrics: Arc::new(HandlerMetrics::new()),
        })
    }

    /// Counters for this handler
    pub fn metrics(&self) -> &HandlerMetrics {
        &self.metrics
    }

    pub fn dropped_count(&self) -> u64 {
        self.metrics.dropped_count()
    }

    /// Close the queue and wait up to `timeout` for the worker to drain it
    ///
    /// Returns `false` if the worker did not finish in time or panicked.
    /// Records logged after shutdown are dropped.
    pub fn shutdown(&mut self, timeout: Duration) -> bool {
        // Closing the channel lets the worker finish the backlog and exit
        drop(self.sender.take());

        let handle = match self.worker.take() {
            Some(handle) => handle,
            None => return true,
        };

        let start = Instant::now();
        loop {
            if handle.is_finished() {
                if let Err(e) = handle.join() {
                    eprintln!("[XLOG ERROR] Async worker thread panicked during shutdown: {:?}", e);
                    return false;
                }
                return true;
            }

            if start.elapsed() >= timeout {
                eprintln!(
                    "[XLOG WARNING] Async worker thread did not finish within {:?}. \
                     Some records may be lost.",
                    timeout
                );
                return false;
            }

            thread::sleep(Duration::from_millis(10));
        }
    }

    fn alert_and_drop(&self) {
        let dropped_count = self.metrics.record_dropped();

        // Alert on first drop and periodically thereafter
        if dropped_count == 0 || (dropped_count + 1) % 1000 == 0 {
            eprintln!(
                "[XLOG WARNING] Queue full, {} records dropped. \
                 Consider increasing the queue capacity.",
                dropped_count + 1
            );
        }
    }
}

impl Handler for AsyncHandler {
    fn log(&self, ctx: &Context, params: &Params) {
        let sender = match self.sender {
            Some(ref sender) => sender,
            None => {
                self.metrics.record_dropped();
                return;
            }
        };

        match sender.try_send(Command::Record(ctx.clone(), params.clone())) {
            Ok(()) => {
                self.metrics.record_logged();
            }
            Err(TrySendError::Full(_)) => {
                self.metrics.record_queue_full();
                self.alert_and_drop();
            }
            Err(TrySendError::Disconnected(_)) => {
                self.metrics.record_dropped();
            }
        }
    }

    /// Wait until everything queued so far has reached the wrapped handler
    fn flush(&self) {
        if let Some(ref sender) = self.sender {
            let (ack, done) = bounded(1);
            if sender.send_timeout(Command::Flush(ack), DEFAULT_SHUTDOWN_TIMEOUT).is_ok() {
                let _ = done.recv_timeout(DEFAULT_SHUTDOWN_TIMEOUT);
            }
        }
    }

    fn name(&self) -> &str {
        "async"
    }
}

impl Drop for AsyncHandler {
    fn drop(&mut self) {
        self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);

        let dropped = self.metrics.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[XLOG WARNING] Async handler shutting down with {} dropped records (drop rate: {:.2}%)",
                dropped,
                self.metrics.drop_rate()
            );
        }
    }
}
