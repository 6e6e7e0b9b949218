//! Collaborator traits implemented by the embedding application.

use crate::cell::{CellPool, NoticeCell};

/// Supplies the rows a [`NoticeView`](crate::NoticeView) rolls through.
///
/// The view holds its data source weakly; once the application drops it the
/// view goes inert instead of failing.
pub trait DataSource<C> {
    /// Number of rows. May change between calls.
    fn row_count(&self) -> usize;

    /// Build the cell for `index`, which is always below [`row_count`](Self::row_count).
    ///
    /// Implementations normally call [`CellPool::dequeue`] and fill in the
    /// returned cell's content. Returning `None` leaves the slot empty.
    fn cell_for(&self, pool: &mut CellPool<C>, index: usize) -> Option<NoticeCell<C>>;
}

/// Receives taps on the ticker.
pub trait NoticeDelegate {
    /// The ticker was tapped while showing row `index`.
    fn on_tap(&self, index: usize);
}
