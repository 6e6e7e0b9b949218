//! Stop handle: Stops a view from any thread.
//!
//! A [`NoticeView`](crate::NoticeView) lives on one thread. Other threads get
//! a [`StopHandle`] whose requests are queued on a channel and carried out at
//! the start of the view's next frame.

use crossbeam_channel::Sender;

/// A `Send` handle that requests a full stop of its view.
#[derive(Debug, Clone)]
pub struct StopHandle {
    tx: Sender<()>,
}

impl StopHandle {
    pub(crate) const fn new(tx: Sender<()>) -> Self {
        Self { tx }
    }

    /// Ask the view to stop. Returns immediately.
    ///
    /// Returns `false` if the view no longer exists.
    pub fn stop(&self) -> bool {
        self.tx.send(()).is_ok()
    }
}
