//! Cell module: Notice cells and the machinery that recycles them.
//!
//! This module contains:
//! - [`NoticeCell`]: A cell with identity, reuse identifier, frame and content
//! - [`CellPool`]: Recipe registry and reuse list
//! - [`Container`]: The cells attached to the viewport

mod container;
mod notice_cell;
mod pool;

pub use container::Container;
pub use notice_cell::{CellId, NoticeCell};
pub use pool::{CellPool, CellRecipe, Prefab};
