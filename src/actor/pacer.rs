//! Frame Pacer: Dedicated thread for generating frame events.
//!
//! A [`NoticeView`](crate::NoticeView) does nothing on its own; the host has
//! to call `on_frame` regularly on the view's thread. The pacer provides that
//! rhythm over a channel so the host can `select!` it together with input.

use crate::error::Result;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// A frame event sent at regular intervals.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    /// Slot number. Gaps mean the consumer missed frames.
    pub number: u64,
    /// When the frame was emitted. Pass this to `on_frame`.
    pub at: Instant,
}

/// Thread emitting [`Frame`]s until stopped or dropped.
#[derive(Debug)]
pub struct FramePacer {
    frames: Receiver<Frame>,
    /// Dropping this wakes the thread and ends it.
    halt: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl FramePacer {
    /// Spawn a pacer emitting one frame per `interval`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Spawn`](crate::Error::Spawn) if the OS refuses the thread.
    pub fn spawn(interval: Duration) -> Result<Self> {
        // A slow consumer misses frames instead of queueing them
        let (frame_tx, frames) = bounded(2);
        let (halt, halt_rx) = bounded::<()>(0);

        let handle = thread::Builder::new()
            .name("notice-pacer".to_string())
            .spawn(move || pace(&frame_tx, &halt_rx, interval))?;

        tracing::debug!(?interval, "frame pacer started");
        Ok(Self {
            frames,
            halt: Some(halt),
            handle: Some(handle),
        })
    }

    /// Get the frame receiver.
    #[inline]
    pub const fn receiver(&self) -> &Receiver<Frame> {
        &self.frames
    }

    /// Stop the thread and wait for it to exit.
    pub fn join(mut self) {
        self.halt_and_join();
    }

    fn halt_and_join(&mut self) {
        self.halt.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for FramePacer {
    fn drop(&mut self) {
        self.halt_and_join();
    }
}

fn pace(frame_tx: &Sender<Frame>, halt: &Receiver<()>, interval: Duration) {
    let mut number = 0u64;
    let mut deadline = Instant::now() + interval;

    while let Err(RecvTimeoutError::Timeout) = halt.recv_deadline(deadline) {
        let now = Instant::now();
        if let Err(TrySendError::Disconnected(_)) = frame_tx.try_send(Frame { number, at: now }) {
            break;
        }
        number += 1;

        deadline += interval;
        if deadline < now {
            deadline = now + interval;
        }
    }
    tracing::debug!(frames = number, "frame pacer stopped");
}
