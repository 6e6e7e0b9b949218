//! Layout module: Placement primitives for the notice viewport.
//!
//! Cells are positioned relative to the viewport's own origin, so the visible
//! slot is always `Rect::from_size(width, height)`.

mod rect;

pub use rect::Rect;
