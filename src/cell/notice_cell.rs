//! NoticeCell: The unit that rolls through the viewport.

use crate::layout::Rect;

/// Identity of a cell, unique within the process.
///
/// Ids are never handed out twice, even by different pools, so two cells with
/// equal ids are the same cell even after it has been recycled.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct CellId(pub u64);

/// A displayable notice cell.
///
/// The view owns placement (`frame`) and identity; everything the application
/// draws lives in `content`.
#[derive(Debug)]
pub struct NoticeCell<C> {
    id: CellId,
    reuse_identifier: Option<String>,
    frame: Rect,
    /// Application-owned content, rewritten on every dequeue.
    pub content: C,
}

impl<C> NoticeCell<C> {
    pub(crate) const fn new(id: CellId, reuse_identifier: Option<String>, content: C) -> Self {
        Self {
            id,
            reuse_identifier,
            frame: Rect::ZERO,
            content,
        }
    }

    /// Get the cell identity.
    #[inline]
    pub const fn id(&self) -> CellId {
        self.id
    }

    /// Get the identifier selecting this cell's reuse bucket.
    #[inline]
    pub fn reuse_identifier(&self) -> Option<&str> {
        self.reuse_identifier.as_deref()
    }

    /// Get the current placement.
    #[inline]
    pub const fn frame(&self) -> Rect {
        self.frame
    }

    /// Move the cell.
    #[inline]
    pub const fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }
}
